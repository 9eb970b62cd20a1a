//! Splinter tracker shell.
//!
//! Composition root: loads character fact bundles, builds the tracker from
//! environment configuration overridden by command-line arguments, and runs a
//! line-oriented shell on stdin.
//!
//! ```bash
//! splinter-tracker data/selana.ron data/brom.toml
//! TRACKER_PERSISTENCE=false splinter-tracker characters/
//! ```

mod commands;
mod shell;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracker_content::FactsLoader;
use tracker_core::CharacterFacts;
use tracker_runtime::{RuntimeConfig, Tracker};

use shell::{Flow, Shell};

/// Resource tracker for Splittermond characters
#[derive(Parser, Debug)]
#[command(name = "splinter-tracker")]
#[command(version, about, long_about = None)]
struct Args {
    /// Fact bundles (.ron, .toml) or directories holding them
    /// (defaults to `<data-dir>/characters`)
    bundles: Vec<PathBuf>,

    /// Storage root for saved usage and logs
    #[arg(long, env = "TRACKER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Do not load or save usage
    #[arg(long)]
    no_persistence: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let mut config = RuntimeConfig::from_env();
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if args.no_persistence {
        config.enable_persistence = false;
    }

    setup_logging(&config.log_dir())?;

    let bundles = if args.bundles.is_empty() {
        vec![config.data_dir.join("characters")]
    } else {
        args.bundles
    };
    let characters = load_characters(&bundles)?;

    tracing::info!("Starting tracker");
    tracing::info!("Data dir: {}", config.data_dir.display());
    tracing::info!("Persistence: {}", config.enable_persistence);

    let tracker = Tracker::builder().config(config).build().await?;
    let sessions = characters
        .iter()
        .map(|facts| tracker.open(facts))
        .collect::<Result<Vec<_>, _>>()?;

    let mut shell = Shell::new(tracker, sessions);
    run(&mut shell).await?;
    shell.shutdown().await?;

    tracing::info!("Tracker shutdown complete");
    Ok(())
}

async fn run(shell: &mut Shell) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    shell.execute("show", &mut stdout)?;
    loop {
        write!(stdout, "{}", shell.prompt())?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if shell.execute(&line, &mut stdout)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}

fn load_characters(paths: &[PathBuf]) -> Result<Vec<CharacterFacts>> {
    let mut characters = Vec::new();
    for path in paths {
        if path.is_dir() {
            let loaded = FactsLoader::load_dir(path)?;
            characters.extend(loaded.into_iter().map(|(_, facts)| facts));
        } else {
            characters.push(FactsLoader::load(path)?);
        }
    }

    anyhow::ensure!(
        !characters.is_empty(),
        "No character fact bundles found in {}",
        paths
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(characters)
}

/// Setup logging to `<log_dir>/tracker.log`; stdout belongs to the shell.
fn setup_logging(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, "tracker.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the file writer alive for the whole process
    std::mem::forget(guard);

    tracing::info!("Log file: {}/tracker.log", log_dir.display());
    Ok(())
}
