//! Shared domain types for the climate visualiser.
//!
//! Holds the observation and chart models, the crate-wide error type, the
//! fixed series style table, number formatting, and CLI/preference settings
//! used by every other crate in the workspace.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod styles;

pub use error::{ClimateError, Result};
