//! Parsing of REPL input lines.

use std::path::PathBuf;
use std::str::FromStr;

use aikenize_core::SourceLanguage;
use thiserror::Error;

/// Slash commands offered for completion, in help order.
pub const COMMANDS: [&str; 15] = [
    "/edit",
    "/show",
    "/lang",
    "/new",
    "/templates",
    "/import",
    "/paste",
    "/copy",
    "/export",
    "/run",
    "/result",
    "/history",
    "/select",
    "/clear-history",
    "/help",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Edit,
    Show,
    Lang(SourceLanguage),
    New {
        language: SourceLanguage,
        template: String,
    },
    Templates,
    Import(PathBuf),
    Paste,
    Copy,
    Export(Option<PathBuf>),
    Run,
    Result,
    History,
    /// 1-based position in the history listing.
    Select(usize),
    ClearHistory,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type /help for the list of commands.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown language '{0}' (expected typescript or python)")]
    Language(String),
}

impl FromStr for ReplCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line == "quit" || line == "exit" {
            return Ok(ReplCommand::Quit);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            "/edit" => Ok(ReplCommand::Edit),
            "/show" => Ok(ReplCommand::Show),
            "/lang" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("/lang <typescript|python>"));
                }
                parse_language(rest).map(ReplCommand::Lang)
            }
            "/new" => {
                let mut args = rest.split_whitespace();
                match (args.next(), args.next()) {
                    (Some(language), Some(template)) => Ok(ReplCommand::New {
                        language: parse_language(language)?,
                        template: template.to_string(),
                    }),
                    _ => Err(CommandError::Usage("/new <typescript|python> <basic|vesting|oracle>")),
                }
            }
            "/templates" => Ok(ReplCommand::Templates),
            "/import" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("/import <path>"));
                }
                Ok(ReplCommand::Import(PathBuf::from(rest)))
            }
            "/paste" => Ok(ReplCommand::Paste),
            "/copy" => Ok(ReplCommand::Copy),
            "/export" => Ok(ReplCommand::Export(
                (!rest.is_empty()).then(|| PathBuf::from(rest)),
            )),
            "/run" => Ok(ReplCommand::Run),
            "/result" => Ok(ReplCommand::Result),
            "/history" => Ok(ReplCommand::History),
            "/select" => rest
                .parse::<usize>()
                .ok()
                .filter(|position| *position > 0)
                .map(ReplCommand::Select)
                .ok_or(CommandError::Usage("/select <n> (see /history)")),
            "/clear-history" => Ok(ReplCommand::ClearHistory),
            "/help" => Ok(ReplCommand::Help),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_language(value: &str) -> Result<SourceLanguage, CommandError> {
    SourceLanguage::from_str(value).map_err(|_| CommandError::Language(value.to_string()))
}
