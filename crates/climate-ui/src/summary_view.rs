//! Yearly statistics table.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per year and a
//! highlighted row for the year currently selected in the shell.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use climate_core::formatting::{format_mean_stddev, format_value};
use climate_core::models::YearlySummary;
use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

pub const HEADERS: [&str; 5] = ["Year", "Mean ± σ", "-1σ", "+1σ", "Months"];

/// Cell text for one summary row.
pub fn summary_cells(summary: &YearlySummary) -> [String; 5] {
    [
        summary.year.to_string(),
        format_mean_stddev(summary.mean, summary.stddev),
        format_value(summary.mean - summary.stddev, 2),
        format_value(summary.mean + summary.stddev, 2),
        summary.count.to_string(),
    ]
}

/// Display width of each column: the widest of its header and cells.
pub fn column_widths(rows: &[[String; 5]]) -> [usize; 5] {
    let mut widths = HEADERS.map(|h| h.width());
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width());
        }
    }
    widths
}

/// Render the yearly summary table into `area`.
pub fn render_summary_view(
    frame: &mut Frame,
    area: Rect,
    yearly: &[YearlySummary],
    selected_year: Option<i32>,
    theme: &Theme,
) {
    let header = Row::new(
        HEADERS
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let cells: Vec<[String; 5]> = yearly.iter().map(summary_cells).collect();
    let widths = column_widths(&cells).map(|w| Constraint::Length(w as u16));

    let rows: Vec<Row> = yearly
        .iter()
        .zip(cells)
        .enumerate()
        .map(|(i, (summary, cells))| {
            let style = if selected_year == Some(summary.year) {
                theme.table_highlight
            } else if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(cells.map(Cell::from)).style(style)
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" Yearly Summary ({} years) ", yearly.len())),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Placeholder shown when the current selection has nothing to plot.
pub fn render_no_data(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Press '[' or ']' to pick another year, 'v' to switch view",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.grid)
                .title(" Climate Viz "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
