//! Interactive session commands, one per input line.

use std::path::PathBuf;
use std::str::FromStr;

use instafilter_core::{FilterKind, UnknownFilter};

/// Help text listing every command.
pub const HELP: &str = "\
commands:
  open <path>         select a photo
  filter <name>       edges | gaussian-blur | pixellate | sepia-tone
  intensity <0..1>    move the intensity slider
  save                save the current photo to the library
  status              show the current state
  filters             list filters and their parameters
  help                show this help
  quit                wait for pending saves and exit";

/// A user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(PathBuf),
    Filter(FilterKind),
    Intensity(f64),
    Save,
    Status,
    Filters,
    Help,
    Quit,
}

/// Errors from parsing a command line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command {0:?}, try `help`")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Filter(#[from] UnknownFilter),

    #[error("intensity must be a number, got {0:?}")]
    Intensity(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "open" => require(rest, "open").map(|p| Self::Open(PathBuf::from(p))),
            "filter" => Ok(Self::Filter(require(rest, "filter")?.parse()?)),
            "intensity" => {
                let raw = require(rest, "intensity")?;
                raw.parse::<f64>()
                    .ok()
                    .filter(|v| !v.is_nan())
                    .map(Self::Intensity)
                    .ok_or_else(|| CommandError::Intensity(raw.to_owned()))
            }
            "save" => Ok(Self::Save),
            "status" => Ok(Self::Status),
            "filters" => Ok(Self::Filters),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word.to_owned())),
        }
    }
}

fn require<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, CommandError> {
        line.parse()
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse("save").unwrap(), Command::Save);
        assert_eq!(parse("  STATUS ").unwrap(), Command::Status);
        assert_eq!(parse("exit").unwrap(), Command::Quit);
        assert_eq!(parse("?").unwrap(), Command::Help);
    }

    #[test]
    fn open_keeps_spaces_in_path() {
        assert_eq!(
            parse("open My Photos/cat.png").unwrap(),
            Command::Open(PathBuf::from("My Photos/cat.png"))
        );
    }

    #[test]
    fn filter_accepts_display_names() {
        assert_eq!(
            parse("filter Gaussian Blur").unwrap(),
            Command::Filter(FilterKind::GaussianBlur)
        );
        assert_eq!(parse("filter edges").unwrap(), Command::Filter(FilterKind::Edges));
    }

    #[test]
    fn intensity_parses_numbers() {
        assert_eq!(parse("intensity 0.75").unwrap(), Command::Intensity(0.75));
        assert_eq!(
            parse("intensity lots"),
            Err(CommandError::Intensity("lots".into()))
        );
        assert_eq!(parse("intensity NaN"), Err(CommandError::Intensity("NaN".into())));
    }

    #[test]
    fn missing_arguments_are_reported() {
        assert_eq!(parse("open"), Err(CommandError::MissingArgument("open")));
        assert_eq!(parse("filter  "), Err(CommandError::MissingArgument("filter")));
    }

    #[test]
    fn unknown_and_empty() {
        assert_eq!(parse("   "), Err(CommandError::Empty));
        assert_eq!(parse("crop 10"), Err(CommandError::Unknown("crop".into())));
        assert!(matches!(parse("filter vignette"), Err(CommandError::Filter(_))));
    }
}
