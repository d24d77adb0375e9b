// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_URL: &str =
    "https://web.archive.org/web/20230908091635/https://en.wikipedia.org/wiki/List_of_largest_banks";

/// Everything the run needs to know about where to read from and write to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub url: String,
    pub table_name: String,
    pub output_csv_path: PathBuf,
    pub db_path: PathBuf,
    pub exchange_rate_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            table_name: "Largest_banks".to_string(),
            output_csv_path: PathBuf::from("./Largest_banks_data.csv"),
            db_path: PathBuf::from("Banks.db"),
            exchange_rate_path: PathBuf::from("./exchange_rate.csv"),
            log_path: PathBuf::from("./code_log.txt"),
        }
    }
}

impl Config {
    /// Connection string for the sqlite file at `db_path`.
    pub fn db_url(&self) -> String {
        format!("sqlite://{}", self.db_path.display())
    }
}

fn get_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("BANKS_ETL_CONFIG") {
        return PathBuf::from(path);
    }
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("config.toml");
    path
}

/// Load the config file if there is one, otherwise fall back to the defaults.
pub fn load_config() -> anyhow::Result<Config> {
    let config_path = get_config_path();
    if !config_path.exists() {
        return Ok(Config::default());
    }
    read_config(&config_path)
}

fn read_config(path: &std::path::Path) -> anyhow::Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: Config = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.table_name, "Largest_banks");
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.db_url(), "sqlite://Banks.db");
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "table_name = \"Banks_2023\"\ndb_path = \"/tmp/other.db\"\n",
        )?;

        let config = read_config(&path)?;
        assert_eq!(config.table_name, "Banks_2023");
        assert_eq!(config.db_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.log_path, PathBuf::from("./code_log.txt"));
        assert_eq!(config.url, DEFAULT_URL);

        Ok(())
    }

    #[test]
    fn test_invalid_file_is_an_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "table_name = [")?;

        assert!(read_config(&path).is_err());
        Ok(())
    }
}
