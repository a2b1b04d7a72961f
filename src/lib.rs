// serpclust: keyword clustering by search-results overlap
//
// This is the library root. Each module corresponds to one stage of the
// clustering pipeline, plus the loader and output around it.

pub mod clustering;
pub mod config;
pub mod error;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod records;
