//! Runtime layer for Climate Viz.
//!
//! Resolves a data source (local CSV or the remote aggregation service) into
//! an aggregated dataset for the presentation layer.

pub mod loader;
pub mod transport;

pub use climate_core as core;
pub use climate_data as data;
