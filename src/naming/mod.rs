// Cluster naming: pick one member keyword to stand for the whole cluster.

pub mod tfidf;
pub mod traits;
