//! Terminal UI layer for Climate Viz.
//!
//! Provides themes, the header and banner components, the line chart and
//! yearly summary views, zoom/pan state, and the application event loop built
//! on top of [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod components;
pub mod summary_view;
pub mod themes;
pub mod viewport;

pub use climate_core as core;
