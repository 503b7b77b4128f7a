use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::engine::Game;
use crate::error::ConfigError;
use crate::solver::SearchConfig;

/// Board dimensions for a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig { rows: 5, cols: 6 }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub search: SearchConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows == 0 || self.board.cols == 0 {
            return Err(ConfigError::Validation(
                "board.rows and board.cols must be > 0".into(),
            ));
        }
        Game::check_dimensions(self.board.rows, self.board.cols)
            .map_err(|e| ConfigError::Validation(format!("board: {e}")))?;
        if self.search.ply_limit == 0 {
            return Err(ConfigError::Validation(
                "search.ply_limit must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.board, BoardConfig { rows: 5, cols: 6 });
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
            [board]
            rows = 3

            [search]
            eval_cutoff = 2
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.board.rows, 3);
        assert_eq!(config.board.cols, 6, "missing keys fall back to defaults");
        assert_eq!(config.search.ply_limit, 4);
        assert_eq!(config.search.eval_cutoff, 2);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_default_config_serializes() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.board.rows = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = AppConfig::default();
        config.board = BoardConfig { rows: 1, cols: 1 };
        assert!(config.validate().is_err());

        for (rows, cols) in [(1, 2), (2, 1)] {
            let mut config = AppConfig::default();
            config.board = BoardConfig { rows, cols };
            let err = config.validate().unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("config validation error: board: a {rows}x{cols} board cannot host a game")
            );
        }

        let mut config = AppConfig::default();
        config.board = BoardConfig { rows: 1, cols: 3 };
        assert!(config.validate().is_ok());

        let mut config = AppConfig::default();
        config.search.ply_limit = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "config validation error: search.ply_limit must be > 0"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let path = Path::new("definitely/not/a/real/config.toml");
        assert!(matches!(
            AppConfig::load(path),
            Err(ConfigError::FileRead { .. })
        ));
        assert_eq!(
            AppConfig::load_or_default(path).unwrap(),
            AppConfig::default()
        );
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("chain_reaction_config_test.toml");
        std::fs::write(&path, "[board]\nrows = 4\ncols = 4\n").unwrap();
        let config = AppConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.board, BoardConfig { rows: 4, cols: 4 });
    }
}
