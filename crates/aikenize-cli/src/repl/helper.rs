use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use aikenize_core::SourceLanguage;
use aikenize_core::template::TEMPLATE_KEYS;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use strum::IntoEnumIterator;

use super::command::COMMANDS;

/// Number of history entries, kept current by the REPL for `/select` hints.
pub type HistoryCount = Arc<AtomicUsize>;

/// Rustyline helper for the workbench.
///
/// Completes command names, language names after `/lang` and `/new`, and
/// template keys after `/new <language>`.
#[derive(Clone)]
pub struct CliHelper {
    history_count: HistoryCount,
}

/// The part of the input line being completed.
struct Word<'a> {
    start: usize,
    text: &'a str,
    candidates: Vec<String>,
}

impl CliHelper {
    pub fn new(history_count: HistoryCount) -> Self {
        Self { history_count }
    }

    fn word<'a>(&self, line: &'a str) -> Option<Word<'a>> {
        if !line.starts_with('/') {
            return None;
        }

        let Some((command, rest)) = line.split_once(char::is_whitespace) else {
            return Some(Word {
                start: 0,
                text: line,
                candidates: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
            });
        };

        // Argument under the cursor; empty right after a space
        let text = line.rsplit(char::is_whitespace).next().unwrap_or("");
        let start = line.len() - text.len();
        let finished = rest.split_whitespace().count() - usize::from(!text.is_empty());

        let candidates = match (command, finished) {
            ("/lang", 0) | ("/new", 0) => languages(),
            ("/new", 1) => TEMPLATE_KEYS.iter().map(|key| key.to_string()).collect(),
            _ => return None,
        };

        Some(Word {
            start,
            text,
            candidates,
        })
    }

    fn select_hint(&self, line: &str) -> Option<String> {
        let rest = line.strip_prefix("/select")?;
        if !rest.trim().is_empty() {
            return None;
        }

        let hint = match self.history_count.load(Ordering::Relaxed) {
            0 => "(history is empty)".to_string(),
            1 => "<1>".to_string(),
            count => format!("<1-{count}>"),
        };
        Some(if rest.is_empty() {
            format!(" {hint}")
        } else {
            hint
        })
    }
}

fn languages() -> Vec<String> {
    SourceLanguage::iter().map(|language| language.to_string()).collect()
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let Some(word) = self.word(&line[..pos]) else {
            return Ok((pos, vec![]));
        };

        let pairs = word
            .candidates
            .into_iter()
            .filter(|candidate| candidate.starts_with(word.text))
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((word.start, pairs))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if !line.starts_with('/') {
            return Borrowed(line);
        }

        let (command, rest) = match line.find(char::is_whitespace) {
            Some(i) => line.split_at(i),
            None => (line, ""),
        };
        let command = if COMMANDS.contains(&command) {
            command.bright_cyan()
        } else {
            command.yellow()
        };
        Owned(format!("{command}{rest}"))
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, line: &str, _pos: usize, _forced: bool) -> bool {
        line.starts_with('/')
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let line = &line[..pos];

        if let Some(hint) = self.select_hint(line) {
            return Some(hint);
        }

        let word = self.word(line)?;
        if word.text.is_empty() {
            return None;
        }
        word.candidates
            .iter()
            .find(|candidate| candidate.len() > word.text.len() && candidate.starts_with(word.text))
            .map(|candidate| candidate[word.text.len()..].to_string())
    }
}

impl Validator for CliHelper {}
