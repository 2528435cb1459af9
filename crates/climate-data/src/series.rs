//! Chart series construction.
//!
//! Maps an [`AggregateResult`] onto renderer-neutral [`ChartSeries`]. Inputs
//! are only borrowed; every call returns newly built series.

use climate_core::formatting::format_month_label;
use climate_core::models::{
    AggregateResult, ChartData, ChartPoint, ChartSeries, SeriesRole, ThemeMode, ViewMode,
    YearlySummary,
};
use climate_core::styles::{grid_style, series_style};

pub const AVERAGE_SERIES_NAME: &str = "Yearly Average";
pub const UPPER_BAND_SERIES_NAME: &str = "+1σ";
pub const LOWER_BAND_SERIES_NAME: &str = "-1σ";
pub const MONTHLY_SERIES_NAME: &str = "Monthly Temperature";

/// Build the chart for `mode`.
///
/// * `Yearly` → average, +1σ and −1σ series, labelled by year. `year_filter`
///   is ignored.
/// * `Monthly` → one series labelled `"<year>-<MM>"`, restricted to
///   `year_filter` when given.
///
/// `theme` only affects [`ChartData::grid`].
pub fn build_series(
    result: &AggregateResult,
    mode: ViewMode,
    year_filter: Option<i32>,
    theme: ThemeMode,
) -> ChartData {
    let series = match mode {
        ViewMode::Yearly => yearly_series(result),
        ViewMode::Monthly => vec![monthly_series(result, year_filter)],
    };

    ChartData {
        series,
        grid: grid_style(theme),
    }
}

/// Keep only the points of `series` whose label belongs to `year`.
///
/// Applied to an unfiltered monthly series this yields the same points as
/// building with `year_filter = Some(year)`.
pub fn filter_series_to_year(series: &ChartSeries, year: i32) -> ChartSeries {
    let prefix = format!("{year}-");
    ChartSeries {
        points: series
            .points
            .iter()
            .filter(|p| p.label.starts_with(&prefix))
            .cloned()
            .collect(),
        ..series.clone()
    }
}

// ── Private ───────────────────────────────────────────────────────────────────

fn yearly_series(result: &AggregateResult) -> Vec<ChartSeries> {
    vec![
        summary_series(result, SeriesRole::Average, AVERAGE_SERIES_NAME, |s| s.mean),
        summary_series(result, SeriesRole::UpperBand, UPPER_BAND_SERIES_NAME, |s| {
            s.mean + s.stddev
        }),
        summary_series(result, SeriesRole::LowerBand, LOWER_BAND_SERIES_NAME, |s| {
            s.mean - s.stddev
        }),
    ]
}

/// One point per yearly summary, labelled by year.
fn summary_series(
    result: &AggregateResult,
    role: SeriesRole,
    name: &str,
    value: impl Fn(&YearlySummary) -> f64,
) -> ChartSeries {
    ChartSeries {
        name: name.to_string(),
        role,
        points: result
            .yearly
            .iter()
            .map(|s| ChartPoint {
                label: s.year.to_string(),
                value: value(s),
            })
            .collect(),
        style: series_style(role),
    }
}

fn monthly_series(result: &AggregateResult, year_filter: Option<i32>) -> ChartSeries {
    let points = result
        .monthly
        .iter()
        .filter(|e| year_filter.map_or(true, |y| e.year == y))
        .map(|e| ChartPoint {
            label: format_month_label(e.year, e.month),
            value: e.value,
        })
        .collect();

    ChartSeries {
        name: MONTHLY_SERIES_NAME.to_string(),
        role: SeriesRole::Monthly,
        points,
        style: series_style(SeriesRole::Monthly),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
