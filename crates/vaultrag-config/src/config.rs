//! Configuration structures and loading.

use crate::error::{ConfigError, ConfigResult};
use crate::paths::AppPaths;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub vault: VaultConfig,

    #[serde(default)]
    pub chunking: ChunkingConfig,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> ConfigResult<Self> {
        let paths = AppPaths::new().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&paths.config_file)
    }

    /// Load configuration from a specific path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Create a default config file with comments.
    pub fn create_default_file(path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::default_config_string())?;
        Ok(())
    }

    /// Generate a default config file with helpful comments.
    pub fn default_config_string() -> String {
        r#"# Vaultrag Configuration

[vault]
# Root of the Obsidian vault to ingest.
# Overridden by --vault or the OBSIDIAN_VAULT_PATH environment variable.
# path = "~/Documents/Obsidian"

[chunking]
# Maximum characters per chunk
max_chunk_size = 500

# Characters repeated between consecutive chunks of one section
overlap = 50
"#
        .to_string()
    }

    /// Check settings that would make chunking impossible.
    pub fn validate(&self) -> ConfigResult<()> {
        self.chunking.validate()
    }
}

/// Vault location settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VaultConfig {
    pub path: Option<String>,
}

/// Text chunking settings, measured in characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    pub max_chunk_size: usize,
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 500,
            overlap: 50,
        }
    }
}

impl ChunkingConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_chunk_size == 0 {
            return Err(ConfigError::Invalid(
                "chunking.max_chunk_size must be greater than 0".to_string(),
            ));
        }
        if self.overlap >= self.max_chunk_size {
            return Err(ConfigError::Invalid(format!(
                "chunking.overlap ({}) must be smaller than chunking.max_chunk_size ({})",
                self.overlap, self.max_chunk_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.chunking.max_chunk_size, 500);
        assert_eq!(config.chunking.overlap, 50);
        assert!(config.vault.path.is_none());
    }

    #[test]
    fn test_default_config_string_parses() {
        let config: Config = toml::from_str(&Config::default_config_string()).unwrap();
        assert_eq!(config.chunking.max_chunk_size, 500);
        assert_eq!(config.chunking.overlap, 50);
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
            [vault]
            path = "/notes"

            [chunking]
            max_chunk_size = 800
            "#
        )
        .unwrap();

        let config = Config::load_from(temp_file.path()).unwrap();

        assert_eq!(config.vault.path.as_deref(), Some("/notes"));
        assert_eq!(config.chunking.max_chunk_size, 800);
        // Defaults should still work
        assert_eq!(config.chunking.overlap, 50);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.chunking.max_chunk_size, 500);
    }

    #[test]
    fn test_rejects_overlap_not_below_size() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[chunking]\nmax_chunk_size = 50\noverlap = 50").unwrap();

        let result = Config::load_from(temp_file.path());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_chunk_size() {
        let chunking = ChunkingConfig {
            max_chunk_size: 0,
            overlap: 0,
        };
        assert!(chunking.validate().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.vault.path = Some("~/vault".to_string());
        config.chunking.overlap = 10;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.vault.path.as_deref(), Some("~/vault"));
        assert_eq!(loaded.chunking.overlap, 10);
    }
}
