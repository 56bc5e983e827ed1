//! Treasure configuration.
//!
//! The configuration file names every workbook the generator needs and the
//! worksheets expected inside each:
//!
//! ```json
//! {
//!   "tables": {
//!     "required tables": {
//!       "Treasure.xlsx": ["Treasure For CRs 0-4 Coin", "Treasure For CRs 0-4 Magic"],
//!       "Magic Items.xlsx": ["Magic Items 1", "Magic Items 2"]
//!     }
//!   }
//! }
//! ```
//!
//! Other sections (conditions, damage types, highlighting) belong to the UI
//! layer and are ignored here.

use std::path::{Path, PathBuf};

use hoardgen_domain::RequiredTables;
use serde_json::Value;
use thiserror::Error;

/// JSON pointer to the required tables section.
const REQUIRED_TABLES_POINTER: &str = "/tables/required tables";

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "data/config.json";

/// Errors reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file {path} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration is missing the section for required tables")]
    MissingRequiredTables,

    #[error("Required tables section is malformed: {0}")]
    MalformedRequiredTables(String),
}

/// Parsed treasure configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreasureConfig {
    pub required_tables: RequiredTables,
}

impl TreasureConfig {
    /// Load and parse the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            workbooks = config.required_tables.len(),
            "Loaded treasure configuration"
        );
        Ok(config)
    }

    /// Parse configuration JSON.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let root: Value = serde_json::from_str(content)?;
        let section = root
            .pointer(REQUIRED_TABLES_POINTER)
            .ok_or(ConfigError::MissingRequiredTables)?
            .clone();
        let required_tables: RequiredTables = serde_json::from_value(section)
            .map_err(|e| ConfigError::MalformedRequiredTables(e.to_string()))?;
        Ok(Self { required_tables })
    }

    /// Workbook names the configuration requires.
    pub fn workbook_names(&self) -> impl Iterator<Item = &str> {
        self.required_tables.keys().map(String::as_str)
    }
}
