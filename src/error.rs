// Error types for the clustering pipeline.
//
// Configuration problems (unmapped or missing columns) are reported before
// any clustering starts. Data problems (bad volume or position cells) fail
// fast and name the keyword they came from, so the user can fix the export.

use thiserror::Error;

/// Everything that can stop a clustering run.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// A column role has no column name configured at all.
    #[error("no column configured for the {role} role")]
    UnmappedRole { role: &'static str },

    /// A column role points at a header the input file doesn't have.
    #[error("column '{column}' for the {role} role not found in input headers")]
    MissingColumn { role: &'static str, column: String },

    #[error("invalid search volume '{value}' for keyword '{keyword}'")]
    InvalidVolume { keyword: String, value: String },

    #[error("invalid rank position '{value}' for keyword '{keyword}'")]
    InvalidPosition { keyword: String, value: String },

    #[error("invalid configuration value '{value}' for {name}")]
    InvalidSetting { name: &'static str, value: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClusterError>;
