use aikenize_application::AppContext;
use anyhow::Result;
use colored::Colorize;

use super::position_to_index;
use crate::render;

pub async fn list(context: &AppContext) -> Result<()> {
    let history = context.open_history().await;
    if history.is_empty() {
        println!("{}", "No translations yet.".bright_black());
        return Ok(());
    }
    for (index, record) in history.records().iter().enumerate() {
        println!("{}", render::history_line(index + 1, record));
    }
    Ok(())
}

pub async fn show(context: &AppContext, position: usize) -> Result<()> {
    let history = context.open_history().await;
    let index = position_to_index(position, history.len())?;
    let Some(record) = history.get(index) else {
        return Ok(());
    };

    println!("{}", render::history_line(position, record));
    println!("{}", "--- Source ---".bright_magenta().bold());
    println!("{}", record.snippet);
    print!("{}", render::result(&record.result));
    Ok(())
}

pub async fn clear(context: &AppContext) -> Result<()> {
    let mut history = context.open_history().await;
    history.clear().await?;
    println!("{}", "History cleared.".bright_green());
    Ok(())
}
