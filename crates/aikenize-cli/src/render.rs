//! Text rendering shared by the REPL and the one-shot commands.

use aikenize_application::{RejectReason, SessionSnapshot};
use aikenize_core::template::templates_for;
use aikenize_core::{HistoryRecord, SourceLanguage, TranslationResult};
use colored::Colorize;

const PREVIEW_WIDTH: usize = 60;

/// Translated code, explanation and any errors.
pub fn result(result: &TranslationResult) -> String {
    let mut out = String::new();

    if result.has_code() {
        out.push_str(&format!("{}\n", "--- Aiken ---".bright_magenta().bold()));
        out.push_str(&result.translated_code);
        out.push('\n');
        if !result.explanation.is_empty() {
            out.push_str(&format!("{}\n", "--- Explanation ---".bright_magenta().bold()));
            out.push_str(&result.explanation.bright_blue().to_string());
            out.push('\n');
        }
        if let Some(errors) = &result.errors {
            out.push_str(&format!("{} {}\n", "Caveats:".yellow().bold(), errors.yellow()));
        }
    } else {
        let message = result.errors.as_deref().unwrap_or("The model returned no code.");
        out.push_str(&format!("{} {}\n", "Error:".red().bold(), message.red()));
    }

    out
}

/// Current language and snippet, with line numbers.
pub fn snapshot(snapshot: &SessionSnapshot) -> String {
    let mut out = format!(
        "{} {}{}\n",
        "Language:".bright_black(),
        snapshot.language.label().bright_cyan(),
        if snapshot.is_translating {
            " (translating...)".yellow().to_string()
        } else {
            String::new()
        }
    );

    if snapshot.snippet.is_empty() {
        out.push_str(&format!("{}\n", "(empty snippet)".bright_black()));
    }
    for (number, line) in snapshot.snippet.lines().enumerate() {
        out.push_str(&format!("{} {}\n", format!("{:>3} |", number + 1).bright_black(), line));
    }

    out
}

/// One history entry; `position` is 1-based.
pub fn history_line(position: usize, record: &HistoryRecord) -> String {
    format!(
        "{:>3}. {} {} {}",
        position,
        record
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black(),
        format!("[{}]", record.source_language).bright_cyan(),
        preview(&record.snippet)
    )
}

/// First non-blank line of `text`, shortened to fit a listing.
pub fn preview(text: &str) -> String {
    let line = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");

    if line.chars().count() > PREVIEW_WIDTH {
        let shortened: String = line.chars().take(PREVIEW_WIDTH - 3).collect();
        format!("{shortened}...")
    } else {
        line.to_string()
    }
}

pub fn templates(language: SourceLanguage) -> String {
    let mut out = format!("{}\n", language.label().bright_cyan().bold());
    for template in templates_for(language) {
        out.push_str(&format!(
            "  {:<8} {}\n",
            template.key.green(),
            template.title
        ));
    }
    out
}

pub fn rejected(reason: RejectReason) -> String {
    match reason {
        RejectReason::BlankSnippet => {
            "Nothing to translate: the snippet is empty. Use /edit, /paste or /import first."
                .yellow()
                .to_string()
        }
        RejectReason::AlreadyTranslating => {
            "A translation is already running; wait for it to finish."
                .yellow()
                .to_string()
        }
    }
}

pub const HELP: &str = "\
Commands:
  /edit                     Replace the snippet (finish with a line containing only '.')
  /show                     Show the current language and snippet
  /lang <typescript|python> Switch language (resets the snippet)
  /new <lang> <template>    Start from a template (basic, vesting, oracle)
  /templates                List templates
  /import <path>            Load a .ts/.js/.py file
  /paste                    Replace the snippet with the clipboard text
  /copy                     Copy the translated code
  /export [dir]             Write the translated code to contract_<millis>.ak
  /run                      Translate the snippet in the background
  /result                   Show the current result
  /history                  List past translations
  /select <n>               Restore history entry n
  /clear-history            Delete all history
  /help                     Show this help
  quit | exit               Leave";
