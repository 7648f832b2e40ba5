//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::store::SearchOptions;

/// Database file used by `--dev`, relative to the working directory.
pub const DEV_DATABASE: &str = "kvault-dev.db";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database file location
    pub database: Option<PathBuf>,

    /// Maximum number of search results
    pub search_limit: Option<usize>,

    /// Marker inserted before matched terms in search snippets
    pub highlight_open: Option<String>,

    /// Marker inserted after matched terms in search snippets
    pub highlight_close: Option<String>,
}

impl Config {
    /// Load configuration from `path`, or the default location when `None`.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map_or_else(Self::config_path, Path::to_path_buf);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        let config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))?;
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/kvault/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kvault")
            .join("config.toml")
    }

    /// Returns the per-user database location.
    ///
    /// Default: `~/.local/share/kvault/kvault.db` (platform data directory)
    pub fn default_database_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kvault")
            .join("kvault.db")
    }

    /// Resolve the database file.
    ///
    /// Precedence order:
    /// 1. CLI `--db` argument (or `KVAULT_DB`)
    /// 2. `--dev`: `kvault-dev.db` in the current directory
    /// 3. Config file `database` setting
    /// 4. Per-user data directory
    pub fn database_path(&self, cli_db: Option<&PathBuf>, dev: bool) -> PathBuf {
        if let Some(path) = cli_db {
            return path.clone();
        }
        if dev {
            return PathBuf::from(DEV_DATABASE);
        }
        self.database
            .clone()
            .unwrap_or_else(Self::default_database_path)
    }

    /// Builds search options from config, with a CLI limit taking precedence.
    pub fn search_options(&self, cli_limit: Option<usize>) -> SearchOptions {
        let mut options = SearchOptions::default();
        if let Some(limit) = cli_limit.or(self.search_limit) {
            options.limit = limit;
        }
        if let Some(open) = &self.highlight_open {
            options.highlight_open = open.clone();
        }
        if let Some(close) = &self.highlight_close {
            options.highlight_close = close.clone();
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn default_config_has_no_database() {
        let config = Config::default();
        assert!(config.database.is_none());
    }

    #[test]
    fn database_path_prefers_cli_arg() {
        let config = Config {
            database: Some(PathBuf::from("/config/kvault.db")),
            ..Config::default()
        };
        let cli_db = PathBuf::from("/cli/kvault.db");
        assert_eq!(
            config.database_path(Some(&cli_db), true),
            PathBuf::from("/cli/kvault.db")
        );
    }

    #[test]
    fn database_path_dev_beats_config() {
        let config = Config {
            database: Some(PathBuf::from("/config/kvault.db")),
            ..Config::default()
        };
        assert_eq!(config.database_path(None, true), PathBuf::from(DEV_DATABASE));
    }

    #[test]
    fn database_path_falls_back_to_config() {
        let config = Config {
            database: Some(PathBuf::from("/config/kvault.db")),
            ..Config::default()
        };
        assert_eq!(
            config.database_path(None, false),
            PathBuf::from("/config/kvault.db")
        );
    }

    #[test]
    fn database_path_falls_back_to_data_dir() {
        let config = Config::default();
        let path = config.database_path(None, false);
        assert!(path.ends_with("kvault/kvault.db"));
    }

    #[test]
    fn config_path_is_in_config_dir() {
        assert!(Config::config_path().ends_with("kvault/config.toml"));
    }

    #[test]
    fn load_missing_file_returns_default() {
        let dir = tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(config.database.is_none());
        assert!(config.search_limit.is_none());
    }

    #[test]
    fn load_parses_all_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
database = "/data/notes.db"
search_limit = 10
highlight_open = "**"
highlight_close = "**"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.database, Some(PathBuf::from("/data/notes.db")));
        assert_eq!(config.search_limit, Some(10));
        assert_eq!(config.highlight_open.as_deref(), Some("**"));
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "databse = \"typo.db\"\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config file"));
    }

    #[test]
    fn search_options_use_defaults() {
        let options = Config::default().search_options(None);
        assert_eq!(options, SearchOptions::default());
    }

    #[test]
    fn search_options_cli_limit_overrides_config() {
        let config = Config {
            search_limit: Some(10),
            highlight_open: Some("[".into()),
            highlight_close: Some("]".into()),
            ..Config::default()
        };

        let options = config.search_options(Some(3));
        assert_eq!(options.limit, 3);
        assert_eq!(options.highlight_open, "[");
        assert_eq!(options.highlight_close, "]");

        assert_eq!(config.search_options(None).limit, 10);
    }
}
