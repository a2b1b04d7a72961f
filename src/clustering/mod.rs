// Clustering: seed-based SERP overlap grouping and per-cluster deduplication.

pub mod cluster;
pub mod clusterer;
pub mod dedup;
pub mod overlap;
