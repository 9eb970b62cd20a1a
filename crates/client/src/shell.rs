//! Line-oriented shell over the open character sessions.

use std::io::Write;

use anyhow::Result;
use strum::IntoEnumIterator;
use tracker_core::{Attribute, Category, Pool, SkillKind};
use tracker_runtime::{CharacterSession, Tracker};

use crate::commands::{HELP, ShellCommand};

/// Whether the input loop should keep reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    tracker: Tracker,
    sessions: Vec<CharacterSession>,
    selected: usize,
}

impl Shell {
    pub fn new(tracker: Tracker, sessions: Vec<CharacterSession>) -> Self {
        Self {
            tracker,
            sessions,
            selected: 0,
        }
    }

    pub fn prompt(&self) -> String {
        match self.sessions.get(self.selected) {
            Some(session) => format!("{}> ", session.name()),
            None => "> ".to_owned(),
        }
    }

    /// Run one input line. Rejected actions and bad input are reported on
    /// `out`; only I/O failures on `out` are returned as errors.
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let command = match ShellCommand::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                writeln!(out, "{e}")?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            ShellCommand::Quit => return Ok(Flow::Quit),
            ShellCommand::Help => writeln!(out, "{HELP}")?,
            ShellCommand::List => self.list(out)?,
            ShellCommand::Show => self.show(out)?,
            ShellCommand::History => self.history(out)?,
            ShellCommand::Select { index } => {
                if index <= self.sessions.len() {
                    self.selected = index - 1;
                    self.show(out)?;
                } else {
                    writeln!(out, "no character #{index}")?;
                }
            }
            command => self.apply(command, out)?,
        }

        Ok(Flow::Continue)
    }

    /// Close every session and stop the persistence worker.
    pub async fn shutdown(self) -> Result<()> {
        for session in self.sessions {
            self.tracker.close(session);
        }
        self.tracker.shutdown().await?;
        Ok(())
    }

    fn apply(&mut self, command: ShellCommand, out: &mut impl Write) -> Result<()> {
        let Some(session) = self.sessions.get_mut(self.selected) else {
            writeln!(out, "no character loaded")?;
            return Ok(());
        };

        let outcome = match command {
            ShellCommand::Spend { pool, token } => {
                session.spend(pool, &token).map_err(|e| e.to_string())
            }
            ShellCommand::Restore { pool, token } => {
                session.restore(pool, &token).map_err(|e| e.to_string())
            }
            ShellCommand::Convert { token } => {
                session.convert_channeled(&token).map_err(|e| e.to_string())
            }
            ShellCommand::ShortRest => session.short_rest().map_err(|e| e.to_string()),
            ShellCommand::LongRest => session.long_rest().map_err(|e| e.to_string()),
            ShellCommand::Reset => session.reset_usage().map_err(|e| e.to_string()),
            ShellCommand::Undo => {
                if !session.undo() {
                    writeln!(out, "nothing to undo")?;
                    return Ok(());
                }
                Ok(())
            }
            ShellCommand::Redo => {
                if !session.redo() {
                    writeln!(out, "nothing to redo")?;
                    return Ok(());
                }
                Ok(())
            }
            ShellCommand::Note { text } => {
                session.set_note(text);
                Ok(())
            }
            ShellCommand::Show
            | ShellCommand::History
            | ShellCommand::Select { .. }
            | ShellCommand::List
            | ShellCommand::Help
            | ShellCommand::Quit => Ok(()),
        };

        match outcome {
            Ok(()) => self.pools(out),
            Err(message) => {
                writeln!(out, "error: {message}")?;
                Ok(())
            }
        }
    }

    fn list(&self, out: &mut impl Write) -> Result<()> {
        for (index, session) in self.sessions.iter().enumerate() {
            let marker = if index == self.selected { '*' } else { ' ' };
            writeln!(out, "{marker} {}. {}", index + 1, session.name())?;
        }
        Ok(())
    }

    fn show(&self, out: &mut impl Write) -> Result<()> {
        let Some(session) = self.sessions.get(self.selected) else {
            writeln!(out, "no character loaded")?;
            return Ok(());
        };
        let profile = session.character().profile();
        let derived = session.derived();

        let race = profile.race.map_or("unknown", |race| race.label());
        writeln!(
            out,
            "{} ({race}, level {}, {} / {} exp)",
            session.name(),
            derived.level,
            profile.experience.spent,
            profile.experience.total(),
        )?;
        let attributes: Vec<String> = Attribute::iter()
            .map(|attribute| {
                format!(
                    "{} {}",
                    attribute.short_label(),
                    profile.attributes.get(attribute)
                )
            })
            .collect();
        writeln!(out, "{}", attributes.join("  "))?;
        writeln!(
            out,
            "speed {}  initiative {}  defense {}  mental res. {}  physical res. {}",
            derived.speed,
            derived.initiative,
            derived.defense,
            derived.mental_resistance,
            derived.physical_resistance,
        )?;
        writeln!(
            out,
            "wounded level {} ({:+})  stealth modifier {:+}",
            derived.wounded_level, -derived.wounded_deduction, derived.stealth_modifier,
        )?;

        for kind in [SkillKind::General, SkillKind::Magic] {
            let skills: Vec<String> = derived
                .skills()
                .filter(|(skill, _)| skill.kind() == kind)
                .map(|(skill, value)| format!("{skill} {value}"))
                .collect();
            writeln!(out, "{kind:?}: {}", skills.join(", "))?;
        }

        self.pools(out)?;
        if !session.character().note().is_empty() {
            writeln!(out, "note: {}", session.character().note())?;
        }
        Ok(())
    }

    fn pools(&self, out: &mut impl Write) -> Result<()> {
        let Some(session) = self.sessions.get(self.selected) else {
            return Ok(());
        };
        let maximums = session.maximums();
        let usage = session.usage();

        for pool in Pool::ALL {
            writeln!(
                out,
                "{:<10} {:>3} / {:<3} (consumed {}, exhausted {}, channeled {})",
                pool.to_string(),
                session.character().free(pool),
                maximums.get(pool),
                usage.of(pool, Category::Consumed),
                usage.of(pool, Category::Exhausted),
                usage.of(pool, Category::Channeled),
            )?;
        }
        Ok(())
    }

    fn history(&self, out: &mut impl Write) -> Result<()> {
        let Some(session) = self.sessions.get(self.selected) else {
            return Ok(());
        };
        let history = session.history();
        if history.is_empty() {
            writeln!(out, "no actions yet")?;
        }
        for (index, entry) in history.entries().iter().enumerate() {
            let marker = if index < history.current() { ' ' } else { '~' };
            writeln!(
                out,
                "{marker} {} {}",
                entry.recorded_at.format("%H:%M:%S"),
                entry.message()
            )?;
        }
        Ok(())
    }
}
