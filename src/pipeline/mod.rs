// Pipeline: runs a clustering batch end to end and builds the report.

pub mod aggregate;
pub mod cluster;
pub mod progress;
