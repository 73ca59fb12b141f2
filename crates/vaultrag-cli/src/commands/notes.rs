//! List the notes of a vault.

use super::{load_config, open_vault};
use anyhow::Result;
use colored::Colorize;

pub fn run(vault: Option<String>, limit: Option<usize>, json: bool) -> Result<()> {
    let config = load_config()?;
    let reader = open_vault(vault, &config)?;
    let notes = reader.read_all_notes()?;
    let limit = limit.unwrap_or(usize::MAX);

    if json {
        for note in notes.iter().take(limit) {
            println!("{}", serde_json::to_string(note)?);
        }
        return Ok(());
    }

    println!(
        "Found {} notes in {}",
        notes.len().to_string().bold(),
        reader.root().display()
    );

    for note in notes.iter().take(limit) {
        let tags = if note.tags.is_empty() {
            String::new()
        } else {
            let names: Vec<&str> = note.tags.iter().map(String::as_str).collect();
            format!(" [{}]", names.join(", "))
        };
        println!(
            "  - {} {} {} chars{}",
            note.title.bold(),
            format!("({})", note.path).dimmed(),
            note.content.chars().count(),
            tags.cyan()
        );
    }

    Ok(())
}
