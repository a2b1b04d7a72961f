// Record store: the raw ranking table and the per-keyword blocks built from it.

pub mod loader;
pub mod models;
pub mod store;
