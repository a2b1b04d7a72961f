// Aggregation: turn named clusters into the final report rows.
//
// Volumes are summed over every source block of a keyword, and the top-3
// URL/title evidence is looked up in the original row table, so neither
// depends on which block survived deduplication.

use std::collections::HashMap;

use serde::Serialize;

use crate::clustering::cluster::Cluster;
use crate::records::models::{KeywordBlock, Row, RowTable};

/// Positions whose URL and title are copied into the report.
pub const EVIDENCE_POSITIONS: u32 = 3;

/// One output row: a keyword and the cluster it landed in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalRow {
    pub cluster_name: String,
    pub keyword: String,
    pub volume: f64,
    /// URLs ranking at positions 1..=3, if present in the input
    pub urls: [Option<String>; EVIDENCE_POSITIONS as usize],
    pub titles: [Option<String>; EVIDENCE_POSITIONS as usize],
}

/// Build report rows, grouped by cluster and sorted by cluster volume.
///
/// Clusters with equal total volume keep the order they were emitted in.
/// Inside a cluster rows follow member order, seed first.
pub fn aggregate(clusters: &[Cluster], blocks: &[KeywordBlock], table: &RowTable) -> Vec<FinalRow> {
    let volumes = volume_by_keyword(blocks);
    let evidence = evidence_by_position(table);

    let mut grouped: Vec<(f64, Vec<FinalRow>)> = clusters
        .iter()
        .map(|cluster| {
            let rows: Vec<FinalRow> = cluster
                .members
                .iter()
                .map(|member| {
                    let keyword = member.keyword.as_str();
                    let lookup = |pos: u32| evidence.get(&(keyword, pos)).copied();
                    FinalRow {
                        cluster_name: cluster.name.clone(),
                        keyword: keyword.to_string(),
                        volume: volumes.get(keyword).copied().unwrap_or(member.volume),
                        urls: [1, 2, 3].map(|pos| lookup(pos).map(|r| r.url.clone())),
                        titles: [1, 2, 3].map(|pos| lookup(pos).map(|r| r.title.clone())),
                    }
                })
                .collect();
            let total = rows.iter().map(|r| r.volume).sum::<f64>();
            (total, rows)
        })
        .collect();

    // sort_by is stable, so ties keep emission order
    grouped.sort_by(|a, b| b.0.total_cmp(&a.0));

    grouped.into_iter().flat_map(|(_, rows)| rows).collect()
}

/// Total volume per keyword across all of its source blocks.
fn volume_by_keyword(blocks: &[KeywordBlock]) -> HashMap<&str, f64> {
    let mut volumes: HashMap<&str, f64> = HashMap::new();
    for block in blocks {
        *volumes.entry(block.keyword.as_str()).or_insert(0.0) += block.volume;
    }
    volumes
}

/// First row for each (keyword, position) among the evidence positions.
fn evidence_by_position(table: &RowTable) -> HashMap<(&str, u32), &Row> {
    let mut evidence = HashMap::new();
    for row in table
        .rows
        .iter()
        .filter(|r| r.position <= EVIDENCE_POSITIONS)
    {
        evidence
            .entry((row.keyword.as_str(), row.position))
            .or_insert(row);
    }
    evidence
}
