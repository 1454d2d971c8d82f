use std::path::Path;

use aikenize_application::{AppContext, SubmitOutcome};
use aikenize_core::SourceLanguage;
use anyhow::{Result, bail};

use crate::render;

/// Translates one file and prints the result.
///
/// Fails (non-zero exit) when the translation produced no code.
pub async fn run(context: &AppContext, file: &Path, language: Option<SourceLanguage>) -> Result<()> {
    let session = context.session().await?;
    let io = context.workbench_io(session.clone());
    io.import_file_as(file, language).await?;

    match session.submit().await {
        SubmitOutcome::Completed { result, recorded } => {
            print!("{}", render::result(&result));
            if !result.has_code() {
                bail!("Translation of {} failed", file.display());
            }
            if !recorded {
                tracing::warn!("Translation of {} was not saved to history", file.display());
            }
            Ok(())
        }
        SubmitOutcome::Rejected(reason) => bail!("Not translated: {}", reason),
    }
}
