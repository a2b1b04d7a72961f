// Progress reporting for a clustering run.
//
// The pipeline emits one update per finalized cluster. Observers only
// watch; nothing they do feeds back into clustering.

use serde::Serialize;

/// Snapshot taken right after a cluster is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// 0 to 100
    pub percent: u8,
    pub keywords_remaining: usize,
    pub duplicates_removed: usize,
    pub cluster_count: usize,
}

impl Progress {
    /// Build a snapshot from raw counts.
    pub fn from_counts(
        assigned: usize,
        total_keywords: usize,
        duplicates_removed: usize,
        cluster_count: usize,
    ) -> Self {
        let percent = if total_keywords == 0 {
            100
        } else {
            (assigned.saturating_mul(100) / total_keywords).min(100) as u8
        };
        Self {
            percent,
            keywords_remaining: total_keywords.saturating_sub(assigned),
            duplicates_removed,
            cluster_count,
        }
    }

    pub fn message(&self) -> String {
        format!(
            "Clustering complete. Keywords left: {}. Duplicates removed: {}. Clusters: {}",
            self.keywords_remaining, self.duplicates_removed, self.cluster_count
        )
    }
}

/// Receives progress updates.
pub trait ProgressObserver {
    fn on_progress(&mut self, progress: &Progress);

    /// Called once after the last cluster.
    fn finish(&mut self) {}
}

/// Discards all updates.
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {
    fn on_progress(&mut self, _progress: &Progress) {}
}

impl<F> ProgressObserver for F
where
    F: FnMut(&Progress),
{
    fn on_progress(&mut self, progress: &Progress) {
        self(progress)
    }
}
