use std::env;

use crate::error::{ClusterError, Result};

pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_OVERLAP_THRESHOLD: usize = 3;

/// Which input column plays which role.
///
/// The loader resolves these names against the CSV header row. An empty
/// name means the role is unmapped, which is a configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub keyword: String,
    pub volume: String,
    pub position: String,
    pub url: String,
    pub title: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            keyword: "Keyword".to_string(),
            volume: "Search Volume".to_string(),
            position: "Position".to_string(),
            url: "URL".to_string(),
            title: "Title".to_string(),
        }
    }
}

impl ColumnMapping {
    /// (role, column name) pairs in input order.
    pub fn roles(&self) -> [(&'static str, &str); 5] {
        [
            ("keyword", self.keyword.as_str()),
            ("search volume", self.volume.as_str()),
            ("rank position", self.position.as_str()),
            ("ranking URL", self.url.as_str()),
            ("page title", self.title.as_str()),
        ]
    }

    /// Fail if any role has no column name.
    pub fn require_all(&self) -> Result<()> {
        for (role, column) in self.roles() {
            if column.trim().is_empty() {
                return Err(ClusterError::UnmappedRole { role });
            }
        }
        Ok(())
    }
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Command-line flags
/// override whatever is set here.
#[derive(Debug, Clone)]
pub struct Config {
    pub columns: ColumnMapping,
    /// How many ranked results make up one keyword block
    pub top_k: usize,
    /// Keywords merge when they share strictly more URLs than this
    pub overlap_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: ColumnMapping::default(),
            top_k: DEFAULT_TOP_K,
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ColumnMapping::default();
        let column = |name: &str, fallback: String| lookup(name).unwrap_or(fallback);

        let columns = ColumnMapping {
            keyword: column("SERPCLUST_KEYWORD_COLUMN", defaults.keyword),
            volume: column("SERPCLUST_VOLUME_COLUMN", defaults.volume),
            position: column("SERPCLUST_POSITION_COLUMN", defaults.position),
            url: column("SERPCLUST_URL_COLUMN", defaults.url),
            title: column("SERPCLUST_TITLE_COLUMN", defaults.title),
        };

        Ok(Self {
            columns,
            top_k: parse_count(&lookup, "SERPCLUST_TOP_K", DEFAULT_TOP_K)?,
            overlap_threshold: parse_count(
                &lookup,
                "SERPCLUST_OVERLAP_THRESHOLD",
                DEFAULT_OVERLAP_THRESHOLD,
            )?,
        })
    }
}

fn parse_count<F>(lookup: &F, name: &'static str, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ClusterError::InvalidSetting { name, value: raw }),
    }
}
