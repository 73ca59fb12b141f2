//! Initialize vaultrag.

use super::get_paths;
use anyhow::{Context, Result};
use colored::Colorize;
use vaultrag_config::Config;

pub fn run() -> Result<()> {
    let paths = get_paths()?;

    if paths.is_initialized() {
        println!("{} Vaultrag is already initialized.", "Note:".yellow().bold());
        println!("  Config: {}", paths.config_file.display());
        return Ok(());
    }

    println!("{}", "Initializing vaultrag...".cyan().bold());

    paths.ensure_dirs().context("Failed to create directories")?;
    Config::create_default_file(&paths.config_file).context("Failed to create config file")?;
    println!(
        "  {} Created config: {}",
        "✓".green(),
        paths.config_file.display()
    );

    println!();
    println!("Next steps:");
    println!(
        "  1. Set [vault].path in {}",
        paths.config_file.display().to_string().cyan()
    );
    println!("  2. Chunk your notes: {}", "vaultrag chunk".cyan());

    Ok(())
}
