use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use storefront_core::store::{FAVORITES_KEY, REVIEWS_KEY};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub database_path: PathBuf,
    pub favorites_key: String,
    pub reviews_key: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub products_path: PathBuf,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence
    pub level: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                database_path: PathBuf::from("storefront.db"),
                favorites_key: FAVORITES_KEY.to_string(),
                reviews_key: REVIEWS_KEY.to_string(),
            },
            catalog: CatalogConfig {
                products_path: PathBuf::from("products.json"),
            },
            log: LogConfig {
                level: "warn".to_string(),
            },
        }
    }
}

/// Read the config at `path`, writing the defaults there first if it is missing
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        let config = Config::default();
        let toml = toml::to_string(&config).context("Failed to serialize default config")?;
        fs::write(path, toml)
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        return Ok(config);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storefront.toml");

        let config = load_config(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        // Second load reads the file back
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        fs::write(
            &path,
            r#"
[storage]
database_path = "/tmp/shop.db"
favorites_key = "fav"
reviews_key = "rev"

[catalog]
products_path = "catalog.json"

[log]
level = "debug"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.storage.favorites_key, "fav");
        assert_eq!(config.storage.database_path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        fs::write(&path, "storage = 3").unwrap();

        assert!(load_config(&path).is_err());
    }
}
