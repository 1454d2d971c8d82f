//! Interactive workbench.
//!
//! Reads commands with rustyline on the main task. `/run` submits in a
//! background task and the outcome is printed by a separate printer task
//! as soon as it arrives, so the prompt stays usable while the model works.

mod command;
mod helper;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use aikenize_application::{AppContext, SessionController, SubmitOutcome, WorkbenchIo};
use aikenize_core::SourceLanguage;
use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;

use crate::render;
use command::ReplCommand;
use helper::{CliHelper, HistoryCount};

type LineEditor = Editor<CliHelper, DefaultHistory>;

enum Flow {
    Continue,
    Quit,
}

struct Repl {
    session: Arc<SessionController>,
    io: WorkbenchIo,
    outcomes: mpsc::Sender<SubmitOutcome>,
    history_count: HistoryCount,
}

pub async fn run(context: &AppContext) -> Result<()> {
    let session = context.session().await?;
    let io = context.workbench_io(session.clone());

    let history_count: HistoryCount =
        Arc::new(AtomicUsize::new(session.history().await.len()));

    let (outcome_tx, mut outcome_rx) = mpsc::channel::<SubmitOutcome>(8);
    let printer = tokio::spawn({
        let session = session.clone();
        let history_count = history_count.clone();
        async move {
            while let Some(outcome) = outcome_rx.recv().await {
                if matches!(outcome, SubmitOutcome::Completed { recorded: true, .. }) {
                    history_count.store(session.history().await.len(), Ordering::Relaxed);
                }
                print_outcome(&outcome);
            }
        }
    });

    let repl = Repl {
        session,
        io,
        outcomes: outcome_tx,
        history_count: history_count.clone(),
    };

    let mut rl: LineEditor = Editor::new()?;
    rl.set_helper(Some(CliHelper::new(history_count)));

    println!("{}", "=== aikenize ===".bright_magenta().bold());
    println!(
        "{}",
        "Translate TypeScript or Python snippets into Aiken. Type /help for commands, 'quit' to exit."
            .bright_black()
    );
    println!();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = match trimmed.parse::<ReplCommand>() {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e.to_string().yellow());
                        continue;
                    }
                };

                match repl.execute(command, &mut rl).await {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Err(e) => println!("{} {}", "Error:".red().bold(), e.to_string().red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    // Closing the channel lets the printer finish once in-flight output is shown
    drop(repl);
    let _ = printer.await;

    Ok(())
}

impl Repl {
    async fn execute(&self, command: ReplCommand, rl: &mut LineEditor) -> Result<Flow> {
        match command {
            ReplCommand::Quit => return Ok(Flow::Quit),
            ReplCommand::Help => println!("{}", render::HELP),
            ReplCommand::Edit => {
                if let Some(text) = read_multiline(rl)? {
                    self.session.set_snippet(text).await;
                    println!("{}", "Snippet updated.".bright_green());
                }
            }
            ReplCommand::Show => print!("{}", render::snapshot(&self.session.snapshot().await)),
            ReplCommand::Lang(language) => {
                self.session.change_language(language).await;
                println!(
                    "{}",
                    format!("Switched to {}; snippet reset to the default example.", language.label())
                        .bright_green()
                );
            }
            ReplCommand::New { language, template } => {
                self.session.load_template(language, &template).await;
                println!(
                    "{}",
                    format!("Loaded {} template '{}'.", language.label(), template).bright_green()
                );
            }
            ReplCommand::Templates => {
                for language in SourceLanguage::iter() {
                    print!("{}", render::templates(language));
                }
            }
            ReplCommand::Import(path) => {
                let language = self.io.import_file(&path).await?;
                println!(
                    "{}",
                    format!("Imported {} as {}.", path.display(), language.label()).bright_green()
                );
            }
            ReplCommand::Paste => {
                if self.io.paste().await? {
                    println!("{}", "Snippet replaced with clipboard text.".bright_green());
                } else {
                    println!("{}", "Clipboard is empty.".bright_black());
                }
            }
            ReplCommand::Copy => {
                if self.io.copy().await? {
                    println!("{}", "Aiken code copied.".bright_green());
                } else {
                    println!("{}", "No translated code to copy.".bright_black());
                }
            }
            ReplCommand::Export(dir) => {
                let dir = dir.unwrap_or_else(|| PathBuf::from("."));
                match self.io.export(&dir).await? {
                    Some(path) => println!("{}", format!("Exported to {}", path.display()).bright_green()),
                    None => println!("{}", "No translated code to export.".bright_black()),
                }
            }
            ReplCommand::Run => self.spawn_submit(),
            ReplCommand::Result => match self.session.snapshot().await.result {
                Some(result) => print!("{}", render::result(&result)),
                None => println!("{}", "No result yet. Use /run.".bright_black()),
            },
            ReplCommand::History => {
                let history = self.session.history().await;
                if history.is_empty() {
                    println!("{}", "No translations yet.".bright_black());
                }
                for (index, record) in history.iter().enumerate() {
                    println!("{}", render::history_line(index + 1, record));
                }
            }
            ReplCommand::Select(position) => {
                match self.session.select_history_at(position - 1).await {
                    Some(record) => {
                        println!("{}", render::history_line(position, &record));
                        print!("{}", render::result(&record.result));
                    }
                    None => println!("{}", format!("No history entry {}.", position).yellow()),
                }
            }
            ReplCommand::ClearHistory => {
                self.session.clear_history().await?;
                self.history_count
                    .store(self.session.history().await.len(), Ordering::Relaxed);
                println!("{}", "History cleared.".bright_green());
            }
        }
        Ok(Flow::Continue)
    }

    fn spawn_submit(&self) {
        let session = self.session.clone();
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            let outcome = session.submit().await;
            let _ = outcomes.send(outcome).await;
        });
        println!("{}", "Translating in the background...".bright_black());
    }
}

fn print_outcome(outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Completed { result, recorded } => {
            println!();
            print!("{}", render::result(result));
            if *recorded {
                println!("{}", "Saved to history.".bright_black());
            }
        }
        SubmitOutcome::Rejected(reason) => println!("{}", render::rejected(*reason)),
    }
}

/// Reads lines until one containing only `.`. CTRL-C cancels the edit.
fn read_multiline(rl: &mut LineEditor) -> Result<Option<String>> {
    println!(
        "{}",
        "Enter the snippet; finish with a line containing only '.' (CTRL-C cancels).".bright_black()
    );
    let mut lines = Vec::new();
    loop {
        match rl.readline(".. ") {
            Ok(line) if line.trim_end() == "." => break,
            Ok(line) => lines.push(line),
            Err(ReadlineError::Interrupted) => {
                println!("{}", "Edit cancelled.".yellow());
                return Ok(None);
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(Some(lines.join("\n")))
}
