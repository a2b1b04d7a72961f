// Keyword clustering pipeline.
//
// Record store -> overlap clusterer -> dedup -> namer -> aggregator.
//
// Clusters are finalized one at a time: the clusterer hands out a cluster,
// we dedup and name it, report progress, then ask for the next one. The
// aggregator runs once at the end over all finalized clusters.

use serde::Serialize;
use tracing::{debug, info};

use super::aggregate::{aggregate, FinalRow};
use super::progress::{Progress, ProgressObserver};
use crate::clustering::clusterer::OverlapClusterer;
use crate::clustering::dedup::dedup_cluster;
use crate::config::{Config, DEFAULT_OVERLAP_THRESHOLD, DEFAULT_TOP_K};
use crate::error::Result;
use crate::naming::traits::ClusterNamer;
use crate::records::models::RawRow;
use crate::records::store::{build_blocks, validate_rows};

/// Tunables for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub top_k: usize,
    pub overlap_threshold: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
        }
    }
}

impl From<&Config> for PipelineOptions {
    fn from(config: &Config) -> Self {
        Self {
            top_k: config.top_k,
            overlap_threshold: config.overlap_threshold,
        }
    }
}

/// Counts describing a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub rows: usize,
    pub keywords: usize,
    pub clusters: usize,
    pub duplicates_removed: usize,
}

/// The final table plus run statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClusterReport {
    pub rows: Vec<FinalRow>,
    pub stats: RunStats,
}

impl ClusterReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cluster names with their total volume and size, in report order.
    pub fn cluster_totals(&self) -> Vec<(&str, f64, usize)> {
        let mut totals: Vec<(&str, f64, usize)> = Vec::new();
        for row in &self.rows {
            match totals.last_mut() {
                Some((name, volume, count)) if *name == row.cluster_name => {
                    *volume += row.volume;
                    *count += 1;
                }
                _ => totals.push((row.cluster_name.as_str(), row.volume, 1)),
            }
        }
        totals
    }
}

/// Run the full pipeline over raw rows.
///
/// Fails fast on invalid volume or position cells. An empty table gives an
/// empty report and no progress updates.
pub fn run(
    raw: Vec<RawRow>,
    options: &PipelineOptions,
    namer: &dyn ClusterNamer,
    progress: &mut dyn ProgressObserver,
) -> Result<ClusterReport> {
    let table = validate_rows(raw)?;
    let blocks = build_blocks(&table, options.top_k)?;

    let total_keywords = table.unique_keywords();
    info!(
        rows = table.rows.len(),
        blocks = blocks.len(),
        keywords = total_keywords,
        "Clustering keywords"
    );

    let mut clusterer = OverlapClusterer::new(&blocks, options.overlap_threshold);
    let mut clusters = Vec::new();
    let mut duplicates_removed = 0;

    while let Some(mut cluster) = clusterer.next() {
        let outcome = dedup_cluster(&mut cluster);
        duplicates_removed += outcome.signature_duplicates;

        cluster.name = namer.name(&cluster.members);
        debug!(
            name = %cluster.name,
            members = cluster.len(),
            "Cluster finalized"
        );
        clusters.push(cluster);

        progress.on_progress(&Progress::from_counts(
            clusterer.assigned_count(),
            total_keywords,
            duplicates_removed,
            clusters.len(),
        ));
    }
    progress.finish();

    let rows = aggregate(&clusters, &blocks, &table);

    let stats = RunStats {
        rows: table.rows.len(),
        keywords: total_keywords,
        clusters: clusters.len(),
        duplicates_removed,
    };
    info!(
        clusters = stats.clusters,
        duplicates_removed = stats.duplicates_removed,
        output_rows = rows.len(),
        "Clustering finished"
    );

    Ok(ClusterReport { rows, stats })
}
