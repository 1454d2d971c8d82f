use std::path::Path;

use aikenize_application::AppContext;
use aikenize_application::workbench_io::export_record;
use anyhow::{Result, bail};

use super::position_to_index;

/// Exports the code of history entry `position` into `dir`.
pub async fn run(context: &AppContext, position: usize, dir: &Path) -> Result<()> {
    let history = context.open_history().await;
    let index = position_to_index(position, history.len())?;
    let Some(record) = history.get(index) else {
        bail!("No history entry {}", position);
    };

    match export_record(dir, record).await? {
        Some(path) => println!("{}", path.display()),
        None => bail!("History entry {} has no code to export", position),
    }
    Ok(())
}
