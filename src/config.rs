//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.sql-checker.toml` in current directory
//! 4. `~/.config/sql-checker/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [engine]
//! dialect = "sqlite"           # generic, sqlite, postgresql, mysql, ...
//! suggest_fixes = true
//! error_format = "friendly"    # friendly, raw
//!
//! [rules]
//! disabled = ["MISTAKE004"]
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SQL_CHECKER_DIALECT` | Dialect name |
//! | `SQL_CHECKER_ERROR_FORMAT` | `friendly` or `raw` |

use std::{env, fs, path::Path, path::PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::{
    checker::{EngineConfig, ErrorFormat},
    error::{AppResult, config_error},
    parser::SqlDialect
};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub rules:  RulesConfig
}

/// Engine section of the configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    pub dialect:       Option<String>,
    #[serde(default = "default_suggest_fixes")]
    pub suggest_fixes: bool,
    pub error_format:  Option<String>
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            dialect:       None,
            suggest_fixes: default_suggest_fixes(),
            error_format:  None
        }
    }
}

fn default_suggest_fixes() -> bool {
    true
}

/// Rules configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RulesConfig {
    /// Disabled rule IDs
    #[serde(default)]
    pub disabled: Vec<String>
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.sql-checker.toml)
    /// 3. Config file in home directory (~/.config/sql-checker/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-checker")
                .join("config.toml");
            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        let local_config = PathBuf::from(".sql-checker.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        if let Ok(dialect) = env::var("SQL_CHECKER_DIALECT") {
            config.engine.dialect = Some(dialect);
        }

        if let Ok(format) = env::var("SQL_CHECKER_ERROR_FORMAT") {
            config.engine.error_format = Some(format);
        }

        Ok(config)
    }

    /// Load configuration from a single TOML file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        debug!(path = %path.display(), "loaded config file");
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }

    /// Resolve into validated engine settings
    pub fn engine_config(&self) -> AppResult<EngineConfig> {
        let dialect = match &self.engine.dialect {
            Some(name) => name.parse::<SqlDialect>().map_err(config_error)?,
            None => SqlDialect::default()
        };
        let error_format = match &self.engine.error_format {
            Some(name) => name.parse::<ErrorFormat>().map_err(config_error)?,
            None => ErrorFormat::default()
        };
        let engine = EngineConfig {
            dialect,
            suggest_fixes: self.engine.suggest_fixes,
            error_format,
            disabled_rules: self.rules.disabled.clone()
        };
        engine.validate()?;
        Ok(engine)
    }
}
