//! NBA season statistics
//!
//! Joins basketball-reference style per-game and advanced team tables into
//! per-team feature vectors, brackets teams by average age, and renders trend
//! charts.

pub mod charts;
pub mod data;
pub mod features;
pub mod report;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub use data::season::SeasonLabel;
pub use features::age_brackets::{BracketConfig, BracketSummary};
pub use features::season::{SeasonLoader, SeasonRequest};
pub use features::team_index::TeamFeatureMap;

/// Application-wide errors
#[derive(Debug, Error)]
pub enum HoopsError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{path}:{line}: row has {width} fields, column {column} requested")]
    Format {
        path: PathBuf,
        line: usize,
        column: usize,
        width: usize,
    },

    #[error("{path}:{line}: column {column} is not a number: {value:?}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        value: String,
    },

    #[error("{path}: column {column} should be {expected:?}, header has {found:?}")]
    Schema {
        path: PathBuf,
        column: usize,
        expected: String,
        found: String,
    },

    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("{team} has {actual} features, expected {expected}")]
    MissingFeatures {
        team: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HoopsError>;

/// Application configuration loaded from hoops.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub brackets: BracketConfig,
    #[serde(default)]
    pub charts: ChartConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the "{season} ... Data.txt" exports
    pub data_dir: PathBuf,
    /// Directory charts are written to
    pub output_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("charts"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width: 800,
            height: 600,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HoopsError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| HoopsError::Config(format!("Failed to parse config: {}", e)))?;
        config.brackets.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HoopsError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
