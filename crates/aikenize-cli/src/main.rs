use std::path::PathBuf;

use aikenize_application::{AppContext, AppOptions};
use aikenize_core::SourceLanguage;
use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod logging;
mod render;
mod repl;

#[derive(Parser)]
#[command(name = "aikenize")]
#[command(about = "Translate TypeScript and Python snippets into Aiken validators", long_about = None)]
struct Cli {
    /// Directory holding config.toml and secret.json
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Directory holding history and logs
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Keep history in memory for this run only
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive workbench (the default)
    Repl,
    /// Translate a source file and print the result
    Translate {
        file: PathBuf,
        /// Source language; inferred from the extension when omitted
        #[arg(long)]
        lang: Option<SourceLanguage>,
    },
    /// Inspect or clear past translations
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// List the starter templates
    Templates {
        #[arg(long)]
        lang: Option<SourceLanguage>,
    },
    /// Print one starter template
    Template { lang: SourceLanguage, key: String },
    /// Write the code of a history entry to contract_<millis>.ak
    Export {
        /// Position in `history list` (1 is the newest)
        position: usize,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List entries, newest first
    List,
    /// Show one entry in full
    Show { position: usize },
    /// Delete all entries
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = AppOptions {
        config_dir: cli.config_dir,
        data_dir: cli.data_dir,
        ephemeral: cli.ephemeral,
    };

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            let _guard = logging::init_file(&options.paths().log_dir()?)?;
            let context = AppContext::load(&options)?;
            tracing::info!("[aikenize] REPL started");
            repl::run(&context).await
        }
        command => {
            logging::init_stderr();
            run_command(command, &options).await
        }
    }
}

async fn run_command(command: Commands, options: &AppOptions) -> Result<()> {
    match command {
        Commands::Templates { lang } => commands::templates::list(lang),
        Commands::Template { lang, key } => commands::templates::show(lang, &key),
        Commands::Translate { file, lang } => {
            let context = AppContext::load(options)?;
            commands::translate::run(&context, &file, lang).await?
        }
        Commands::History { action } => {
            let context = AppContext::load(options)?;
            match action {
                HistoryAction::List => commands::history::list(&context).await?,
                HistoryAction::Show { position } => {
                    commands::history::show(&context, position).await?
                }
                HistoryAction::Clear => commands::history::clear(&context).await?,
            }
        }
        Commands::Export { position, dir } => {
            let context = AppContext::load(options)?;
            commands::export::run(&context, position, &dir).await?
        }
        Commands::Repl => repl::run(&AppContext::load(options)?).await?,
    }
    Ok(())
}
