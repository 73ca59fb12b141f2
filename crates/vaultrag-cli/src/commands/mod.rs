//! CLI command implementations.

pub mod chunk;
pub mod config;
pub mod init;
pub mod notes;

use anyhow::{Context, Result};
use std::path::PathBuf;
use vaultrag_config::{AppPaths, Config};
use vaultrag_ingest::{ChunkConfig, VaultReader};

/// Get the application paths.
pub fn get_paths() -> Result<AppPaths> {
    AppPaths::new().context("Failed to determine application directories")
}

/// Load the config file, or defaults when there is none.
pub fn load_config() -> Result<Config> {
    Config::load().context("Failed to load config")
}

/// Pick the vault root: explicit flag (or `OBSIDIAN_VAULT_PATH`) first, then the config file.
pub fn resolve_vault(flag: Option<String>, config: &Config) -> Result<PathBuf> {
    let raw = flag
        .or_else(|| config.vault.path.clone())
        .filter(|p| !p.trim().is_empty())
        .context("No vault configured. Pass --vault, set OBSIDIAN_VAULT_PATH, or set [vault].path in the config file.")?;

    let expanded = shellexpand::tilde(&raw);
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Build the chunking config from the config file plus command-line overrides.
pub fn chunk_config(
    config: &Config,
    max_chunk_size: Option<usize>,
    overlap: Option<usize>,
) -> Result<ChunkConfig> {
    let chunk_config = ChunkConfig::new(
        max_chunk_size.unwrap_or(config.chunking.max_chunk_size),
        overlap.unwrap_or(config.chunking.overlap),
    )?;
    Ok(chunk_config)
}

/// Open the vault for reading.
pub fn open_vault(flag: Option<String>, config: &Config) -> Result<VaultReader> {
    let root = resolve_vault(flag, config)?;
    let reader = VaultReader::new(&root)?;
    Ok(reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_config() {
        let mut config = Config::default();
        config.vault.path = Some("/from/config".to_string());

        let path = resolve_vault(Some("/from/flag".to_string()), &config).unwrap();
        assert_eq!(path, PathBuf::from("/from/flag"));

        let path = resolve_vault(None, &config).unwrap();
        assert_eq!(path, PathBuf::from("/from/config"));
    }

    #[test]
    fn test_missing_vault_is_an_error() {
        assert!(resolve_vault(None, &Config::default()).is_err());
        assert!(resolve_vault(Some("  ".to_string()), &Config::default()).is_err());
    }

    #[test]
    fn test_chunk_overrides() {
        let config = Config::default();
        let chunk = chunk_config(&config, Some(200), None).unwrap();
        assert_eq!(chunk.max_chunk_size(), 200);
        assert_eq!(chunk.overlap(), 50);

        assert!(chunk_config(&config, Some(40), None).is_err());
    }

    #[test]
    fn test_open_missing_vault() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope").to_string_lossy().into_owned();
        let err = open_vault(Some(missing), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
