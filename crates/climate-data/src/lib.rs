//! Data layer for Climate Viz.
//!
//! Parses wide-format monthly temperature CSV files, aggregates them into
//! yearly statistics and a flat monthly series, translates remote service
//! responses into the same shape, and builds renderer-neutral chart series.

pub mod aggregator;
pub mod parser;
pub mod remote;
pub mod series;

pub use climate_core as core;
