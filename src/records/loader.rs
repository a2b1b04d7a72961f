// CSV loader: reads a ranking export and pulls out the five mapped columns.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::models::RawRow;
use crate::config::ColumnMapping;
use crate::error::{ClusterError, Result};

/// Header positions of the five column roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndices {
    keyword: usize,
    volume: usize,
    position: usize,
    url: usize,
    title: usize,
}

impl ColumnIndices {
    fn resolve(headers: &csv::StringRecord, mapping: &ColumnMapping) -> Result<Self> {
        mapping.require_all()?;

        let find = |role: &'static str, column: &str| {
            headers
                .iter()
                .position(|h| h.trim() == column.trim())
                .ok_or_else(|| ClusterError::MissingColumn {
                    role,
                    column: column.to_string(),
                })
        };

        let [keyword, volume, position, url, title] = mapping.roles();
        Ok(Self {
            keyword: find(keyword.0, keyword.1)?,
            volume: find(volume.0, volume.1)?,
            position: find(position.0, position.1)?,
            url: find(url.0, url.1)?,
            title: find(title.0, title.1)?,
        })
    }
}

/// Read the header row of a CSV file.
pub fn read_headers(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(File::open(path)?);
    Ok(reader.headers()?.iter().map(|h| h.to_string()).collect())
}

/// Load the mapped columns of a CSV file, in row order.
pub fn load_csv(path: &Path, mapping: &ColumnMapping) -> Result<Vec<RawRow>> {
    let file = File::open(path)?;
    let rows = read_rows(file, mapping)?;
    debug!(rows = rows.len(), path = %path.display(), "Loaded ranking rows");
    Ok(rows)
}

/// Load the mapped columns from any CSV source.
///
/// Columns are resolved before any record is read, so a bad mapping fails
/// without touching the data.
pub fn read_rows<R: Read>(source: R, mapping: &ColumnMapping) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let idx = ColumnIndices::resolve(&headers, mapping)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = |i: usize| record.get(i).unwrap_or("").to_string();
        rows.push(RawRow {
            keyword: cell(idx.keyword),
            volume: cell(idx.volume),
            position: cell(idx.position),
            url: cell(idx.url),
            title: cell(idx.title),
        });
    }

    Ok(rows)
}
