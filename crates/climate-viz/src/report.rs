//! Non-interactive output: the built chart as JSON, or the yearly summary as
//! a plain-text table.

use serde::Serialize;

use climate_core::models::{ChartData, Defect, ThemeMode, ViewMode, YearlySummary};
use climate_data::series::build_series;
use climate_runtime::loader::{DataOrigin, LoadedDataset};
use climate_ui::summary_view::{column_widths, summary_cells, HEADERS};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub source: String,
    pub origin: DataOrigin,
    pub view: ViewMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub theme: ThemeMode,
    pub yearly: &'a [YearlySummary],
    pub chart: ChartData,
    pub skipped_rows: usize,
    pub defects: &'a [Defect],
}

impl<'a> JsonReport<'a> {
    pub fn new(
        dataset: &'a LoadedDataset,
        view: ViewMode,
        year: Option<i32>,
        theme: ThemeMode,
    ) -> Self {
        Self {
            source: dataset.source_path.display().to_string(),
            origin: dataset.origin,
            view,
            year,
            theme,
            yearly: &dataset.aggregate.yearly,
            chart: build_series(&dataset.aggregate, view, year, theme),
            skipped_rows: dataset.skipped_rows,
            defects: &dataset.defects,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Render the yearly summaries as an aligned text table.
pub fn render_text_table(yearly: &[YearlySummary]) -> String {
    let rows: Vec<[String; 5]> = yearly.iter().map(summary_cells).collect();
    let widths = column_widths(&rows);

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{}{}", " ".repeat(w.saturating_sub(cell.width())), cell))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(format_row(&HEADERS.map(str::to_string)));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.extend(rows.iter().map(|r| format_row(r)));
    out.join("\n")
}

// ── Tests ──────────────────────────────────────────────────────────────────────
