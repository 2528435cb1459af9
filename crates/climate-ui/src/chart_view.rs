//! Line chart rendering of [`ChartData`].
//!
//! The x axis is the point index within the visible viewport; tick labels are
//! taken from the point labels at the first, middle and last visible index.
//! Terminal cells cannot draw dash patterns, so dashed series are plotted as
//! dotted scatter and series with a point radius get an extra marker layer.

use std::ops::Range;

use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition},
    Frame,
};

use climate_core::formatting::format_value;
use climate_core::models::{ChartData, ChartSeries, ViewMode};

use crate::themes::{css_color, Theme};
use crate::viewport::Viewport;

/// Fraction of the value range added above and below the data.
const Y_PADDING: f64 = 0.05;

// ── Geometry helpers ──────────────────────────────────────────────────────────

/// `(index, value)` pairs of `series` that fall inside `range`.
pub fn visible_points(series: &ChartSeries, range: Range<usize>) -> Vec<(f64, f64)> {
    series
        .points
        .iter()
        .enumerate()
        .skip(range.start)
        .take(range.len())
        .filter(|(_, p)| p.value.is_finite())
        .map(|(i, p)| (i as f64, p.value))
        .collect()
}

/// Padded `[min, max]` over every visible value; `[0, 1]` when nothing is
/// visible.
pub fn y_bounds(data: &ChartData, range: Range<usize>) -> [f64; 2] {
    let (min, max) = data
        .series
        .iter()
        .flat_map(|s| visible_points(s, range.clone()))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, v)| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let pad = if max > min {
        (max - min) * Y_PADDING
    } else {
        1.0
    };
    [min - pad, max + pad]
}

/// Labels at the first, middle and last index of `range`.
pub fn x_labels(series: &ChartSeries, range: Range<usize>) -> Vec<String> {
    if range.is_empty() {
        return Vec::new();
    }
    let last = range.end - 1;
    let mut indices = vec![range.start, range.start + (last - range.start) / 2, last];
    indices.dedup();
    indices
        .into_iter()
        .filter_map(|i| series.points.get(i).map(|p| p.label.clone()))
        .collect()
}

fn x_title(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Yearly => "Year",
        ViewMode::Monthly => "Month",
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render `data` clipped to `viewport` into `area`.
pub fn render_chart(
    frame: &mut Frame,
    area: Rect,
    data: &ChartData,
    mode: ViewMode,
    viewport: &Viewport,
    title: &str,
    theme: &Theme,
) {
    let theme = theme.clone().with_grid(&data.grid);
    let range = viewport.range();

    // Datasets borrow their points, so collect them first.
    let points: Vec<Vec<(f64, f64)>> = data
        .series
        .iter()
        .map(|s| visible_points(s, range.clone()))
        .collect();

    let mut datasets = Vec::new();
    for (series, pts) in data.series.iter().zip(&points) {
        let style = Style::default().fg(css_color(&series.style.color));
        let (marker, graph_type) = if series.style.dash.is_some() {
            (Marker::Dot, GraphType::Scatter)
        } else {
            (Marker::Braille, GraphType::Line)
        };
        datasets.push(
            Dataset::default()
                .name(series.name.clone())
                .marker(marker)
                .graph_type(graph_type)
                .style(style)
                .data(pts),
        );
        if series.style.point_radius > 0 {
            datasets.push(
                Dataset::default()
                    .marker(Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(style)
                    .data(pts),
            );
        }
    }

    let [y_min, y_max] = y_bounds(data, range.clone());
    let x_axis_labels = data
        .series
        .first()
        .map(|s| x_labels(s, range.clone()))
        .unwrap_or_default();
    let x_max = range.end.saturating_sub(1).max(range.start + 1) as f64;

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.grid)
                .title(Span::styled(format!(" {title} "), theme.header)),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled(x_title(mode), theme.axis_label))
                .style(theme.grid)
                .bounds([range.start as f64, x_max])
                .labels(
                    x_axis_labels
                        .into_iter()
                        .map(|l| Span::styled(l, theme.axis_label)),
                ),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("°C", theme.axis_label))
                .style(theme.grid)
                .bounds([y_min, y_max])
                .labels(
                    [y_min, (y_min + y_max) / 2.0, y_max]
                        .into_iter()
                        .map(|v| Span::styled(format_value(v, 1), theme.axis_label)),
                ),
        )
        .legend_position(Some(LegendPosition::TopRight))
        .style(theme.text);

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
