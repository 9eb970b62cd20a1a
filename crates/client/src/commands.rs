//! Line commands understood by the shell.

use tracker_core::Pool;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },

    #[error("`{0}` is not a character number")]
    InvalidIndex(String),
}

/// One parsed input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Show,
    Spend { pool: Pool, token: String },
    Restore { pool: Pool, token: String },
    Convert { token: String },
    ShortRest,
    LongRest,
    Reset,
    Undo,
    Redo,
    History,
    Note { text: String },
    /// 1-based index into the character list.
    Select { index: usize },
    List,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one input line; `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let word = word.to_ascii_lowercase();

        let command = match word.as_str() {
            "show" => Self::Show,
            "convert" => Self::Convert {
                token: required(&word, rest, "an amount")?,
            },
            "short" => Self::ShortRest,
            "long" => Self::LongRest,
            "reset" => Self::Reset,
            "undo" => Self::Undo,
            "redo" => Self::Redo,
            "history" => Self::History,
            // An empty note clears it.
            "note" => Self::Note {
                text: rest.to_owned(),
            },
            "select" => {
                let index = required(&word, rest, "a character number")?;
                match index.parse::<usize>() {
                    Ok(index) if index > 0 => Self::Select { index },
                    _ => return Err(CommandError::InvalidIndex(index)),
                }
            }
            "list" => Self::List,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => {
                let (restore, name) = match other.strip_prefix('+') {
                    Some(name) => (true, name),
                    None => (false, other),
                };
                let pool: Pool = name
                    .parse()
                    .map_err(|_| CommandError::Unknown(word.clone()))?;
                let token = required(&word, rest, "an amount")?;
                if restore {
                    Self::Restore { pool, token }
                } else {
                    Self::Spend { pool, token }
                }
            }
        };

        Ok(Some(command))
    }
}

fn required(command: &str, rest: &str, expected: &'static str) -> Result<String, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument {
            command: command.to_owned(),
            expected,
        });
    }
    Ok(rest.to_owned())
}

pub const HELP: &str = "\
commands:
  show                          character sheet and pools
  lp|focus|splinters <amount>   spend, e.g. `focus k2v1`, `lp b3`
  +lp|+focus|+splinters <amount> restore, e.g. `+lp 5`
  convert <n>                   move channeled focus to exhausted
  short | long                  short rest, long rest
  reset                         clear all pools
  undo | redo                   step through history
  history                       list recorded actions
  note <text>                   replace the note
  list | select <n>             list characters, switch character
  quit";
