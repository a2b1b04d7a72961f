// Record store: validates raw rows and slices them into keyword blocks.
//
// Rows are expected to arrive grouped by keyword, K rows per keyword. We
// don't trust that blindly: blocks are cut at keyword boundaries, so a
// keyword with fewer than K rows gives a shorter block instead of bleeding
// into its neighbour, and a run longer than K becomes several blocks.

use std::collections::HashSet;

use tracing::warn;

use super::models::{KeywordBlock, RankedResult, RawRow, Row, RowTable};
use crate::error::{ClusterError, Result};

/// Validate every raw row, failing on the first bad volume or position.
pub fn validate_rows(raw: Vec<RawRow>) -> Result<RowTable> {
    let rows = raw
        .into_iter()
        .map(validate_row)
        .collect::<Result<Vec<Row>>>()?;
    Ok(RowTable { rows })
}

fn validate_row(raw: RawRow) -> Result<Row> {
    let volume = parse_volume(&raw.volume).ok_or_else(|| ClusterError::InvalidVolume {
        keyword: raw.keyword.clone(),
        value: raw.volume.clone(),
    })?;
    let position = parse_position(&raw.position).ok_or_else(|| ClusterError::InvalidPosition {
        keyword: raw.keyword.clone(),
        value: raw.position.clone(),
    })?;

    Ok(Row {
        keyword: raw.keyword,
        volume,
        position,
        url: raw.url,
        title: raw.title,
    })
}

/// Search volume: any finite, non-negative number.
fn parse_volume(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Rank position: an integer from 1 up. Spreadsheet exports sometimes write
/// integers as "3.0", so integral floats are accepted too.
fn parse_position(cell: &str) -> Option<u32> {
    let cell = cell.trim();
    if let Ok(p) = cell.parse::<u32>() {
        return (p >= 1).then_some(p);
    }
    let f = cell.parse::<f64>().ok()?;
    if f.is_finite() && f >= 1.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
        Some(f as u32)
    } else {
        None
    }
}

/// Slice the table into keyword blocks of at most `top_k` rows.
pub fn build_blocks(table: &RowTable, top_k: usize) -> Result<Vec<KeywordBlock>> {
    if top_k == 0 {
        return Err(ClusterError::InvalidSetting {
            name: "top_k",
            value: top_k.to_string(),
        });
    }

    let mut blocks = Vec::new();
    let mut finished_runs: HashSet<&str> = HashSet::new();

    for run in table.rows.chunk_by(|a, b| a.keyword == b.keyword) {
        let keyword = run[0].keyword.as_str();
        if !finished_runs.insert(keyword) {
            warn!(
                keyword,
                "Keyword rows are not contiguous, treating as another source block"
            );
        }

        for chunk in run.chunks(top_k) {
            blocks.push(KeywordBlock {
                keyword: keyword.to_string(),
                results: chunk
                    .iter()
                    .map(|r| RankedResult {
                        position: r.position,
                        url: r.url.clone(),
                        title: r.title.clone(),
                    })
                    .collect(),
                volume: chunk[0].volume,
            });
        }
    }

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_for(keyword: &str, volume: &str, count: usize) -> Vec<RawRow> {
        (1..=count)
            .map(|p| {
                RawRow::new(
                    keyword,
                    volume,
                    &p.to_string(),
                    &format!("https://{keyword}.example/{p}"),
                    &format!("{keyword} result {p}"),
                )
            })
            .collect()
    }

    #[test]
    fn test_blocks_follow_keyword_boundaries() {
        let mut raw = rows_for("alpha", "10", 10);
        raw.extend(rows_for("beta", "5", 4));
        raw.extend(rows_for("gamma", "7", 10));
        let table = validate_rows(raw).unwrap();

        let blocks = build_blocks(&table, 10).unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].results.len(), 10);
        // Short block is truncated, not padded with gamma's rows
        assert_eq!(blocks[1].keyword, "beta");
        assert_eq!(blocks[1].results.len(), 4);
        assert_eq!(blocks[2].keyword, "gamma");
        assert_eq!(blocks[2].volume, 7.0);
    }

    #[test]
    fn test_long_run_splits_into_source_blocks() {
        let raw = rows_for("alpha", "10", 20);
        let table = validate_rows(raw).unwrap();
        let blocks = build_blocks(&table, 10).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| b.keyword == "alpha"));
    }

    #[test]
    fn test_non_contiguous_keyword_still_accepted() {
        let mut raw = rows_for("alpha", "10", 3);
        raw.extend(rows_for("beta", "5", 3));
        raw.extend(rows_for("alpha", "2", 3));
        let table = validate_rows(raw).unwrap();
        let blocks = build_blocks(&table, 10).unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[2].keyword, "alpha");
        assert_eq!(blocks[2].volume, 2.0);
    }

    #[test]
    fn test_negative_volume_names_keyword() {
        let raw = rows_for("bad keyword", "-5", 1);
        match validate_rows(raw) {
            Err(ClusterError::InvalidVolume { keyword, value }) => {
                assert_eq!(keyword, "bad keyword");
                assert_eq!(value, "-5");
            }
            other => panic!("expected InvalidVolume, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_volume_rejected() {
        let raw = rows_for("x", "lots", 1);
        assert!(matches!(
            validate_rows(raw),
            Err(ClusterError::InvalidVolume { .. })
        ));
    }

    #[test]
    fn test_position_parsing() {
        assert_eq!(parse_position("3"), Some(3));
        assert_eq!(parse_position(" 4.0 "), Some(4));
        assert_eq!(parse_position("0"), None);
        assert_eq!(parse_position("2.5"), None);
        assert_eq!(parse_position("first"), None);
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let table = validate_rows(rows_for("a", "1", 2)).unwrap();
        assert!(build_blocks(&table, 0).is_err());
    }

    #[test]
    fn test_empty_table_gives_no_blocks() {
        let blocks = build_blocks(&RowTable::default(), 10).unwrap();
        assert!(blocks.is_empty());
    }
}
