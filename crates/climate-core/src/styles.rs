//! Fixed presentation attributes for chart series and theme-dependent grid
//! colours.
//!
//! Series colours never depend on the theme; only axis/legend labels and the
//! grid do.

use crate::models::{GridStyle, SeriesRole, SeriesStyle, ThemeMode};

/// Dash pattern shared by both σ bands.
pub const BAND_DASH: [u32; 2] = [5, 5];

/// Return the stroke style for a series role.
pub fn series_style(role: SeriesRole) -> SeriesStyle {
    match role {
        SeriesRole::Average => SeriesStyle {
            color: "blue".to_string(),
            dash: None,
            width: 3,
            point_radius: 0,
        },
        SeriesRole::UpperBand | SeriesRole::LowerBand => SeriesStyle {
            color: "red".to_string(),
            dash: Some(BAND_DASH),
            width: 2,
            point_radius: 0,
        },
        SeriesRole::Monthly => SeriesStyle {
            color: "green".to_string(),
            dash: None,
            width: 3,
            point_radius: 3,
        },
    }
}

/// Grid and axis-label colours for `theme`.
pub fn grid_style(theme: ThemeMode) -> GridStyle {
    match theme {
        ThemeMode::Dark => GridStyle {
            grid_color: "#444".to_string(),
            label_color: "white".to_string(),
        },
        ThemeMode::Light => GridStyle {
            grid_color: "#ddd".to_string(),
            label_color: "black".to_string(),
        },
    }
}
