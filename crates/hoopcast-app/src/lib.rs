// Library root: configuration, concrete data sources, and run orchestration
// for the `hoopcast` binary. Exposed so integration tests can drive the full
// pipeline.

pub mod app;
pub mod config;
pub mod sources;
