// Data models for the ranking table.
//
// RawRow is what the loader hands over: five cells per row, still text.
// Row is the validated form. KeywordBlock groups the rows of one keyword
// occurrence and is what the clusterer works on.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One input row after column-role resolution, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub keyword: String,
    pub volume: String,
    pub position: String,
    pub url: String,
    pub title: String,
}

impl RawRow {
    pub fn new(keyword: &str, volume: &str, position: &str, url: &str, title: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            volume: volume.to_string(),
            position: position.to_string(),
            url: url.to_string(),
            title: title.to_string(),
        }
    }
}

/// A validated input row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub keyword: String,
    pub volume: f64,
    pub position: u32,
    pub url: String,
    pub title: String,
}

/// The full validated table, in original row order.
///
/// Kept alongside the blocks because the aggregator resolves its URL and
/// title evidence against the original rows, not the deduplicated clusters.
#[derive(Debug, Clone, Default)]
pub struct RowTable {
    pub rows: Vec<Row>,
}

impl RowTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct keyword strings in the table.
    pub fn unique_keywords(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.keyword.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

/// One ranked search result for a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedResult {
    pub position: u32,
    pub url: String,
    pub title: String,
}

/// All ranking data for one occurrence of a keyword in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordBlock {
    pub keyword: String,
    /// At most top-K results, in input row order
    pub results: Vec<RankedResult>,
    /// Volume declared on the block's first row
    pub volume: f64,
}

impl KeywordBlock {
    /// The block's result URLs as a set (duplicates count once).
    pub fn url_set(&self) -> HashSet<&str> {
        self.results.iter().map(|r| r.url.as_str()).collect()
    }

    /// Sorted result URLs. Two blocks with the same signature have the
    /// same search results in some order.
    pub fn signature(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = self.results.iter().map(|r| r.url.as_str()).collect();
        urls.sort_unstable();
        urls
    }
}
