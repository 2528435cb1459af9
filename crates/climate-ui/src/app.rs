//! Application state and TUI event loop for Climate Viz.
//!
//! [`App`] owns every piece of shell state (view, year filter, theme,
//! viewport, banner) and rebuilds its [`ChartData`] from the loaded aggregate
//! whenever one of them changes. Nothing here recomputes statistics.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::Text,
    widgets::Paragraph,
    Frame, Terminal,
};
use tracing::{debug, info, warn};

use climate_core::models::{ChartData, ThemeMode, ViewMode};
use climate_core::settings::Preferences;
use climate_data::aggregator::ClimateAggregator;
use climate_data::series::build_series;
use climate_runtime::loader::LoadedDataset;

use crate::chart_view;
use crate::components::{Banner, Header, Notice};
use crate::summary_view;
use crate::themes::Theme;
use crate::viewport::Viewport;

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    pub theme: Theme,
    pub view_mode: ViewMode,
    /// Monthly view restriction; `None` shows every year.
    pub year_filter: Option<i32>,
    pub viewport: Viewport,
    pub show_summary: bool,
    pub notice: Option<Notice>,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    dataset: LoadedDataset,
    years: Vec<i32>,
    chart: ChartData,
    /// Where theme changes are saved; `None` disables persistence.
    prefs_path: Option<PathBuf>,
}

impl App {
    pub fn new(
        dataset: LoadedDataset,
        view_mode: ViewMode,
        year_filter: Option<i32>,
        theme_mode: ThemeMode,
        prefs_path: Option<PathBuf>,
    ) -> Self {
        let years = ClimateAggregator::years(&dataset.aggregate);
        let notice = Notice::from_defects(dataset.skipped_rows, &dataset.defects);
        let chart = build_series(&dataset.aggregate, view_mode, year_filter, theme_mode);

        Self {
            theme: Theme::for_mode(theme_mode),
            view_mode,
            year_filter,
            viewport: Viewport::new(chart.point_count()),
            show_summary: false,
            notice,
            should_quit: false,
            dataset,
            years,
            chart,
            prefs_path,
        }
    }

    pub fn chart(&self) -> &ChartData {
        &self.chart
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme.mode
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive chart until `q` / `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout; the terminal is
    /// restored even when drawing fails.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Commands ──────────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('v') => self.toggle_view(),
            KeyCode::Char(']') => self.next_year(),
            KeyCode::Char('[') => self.previous_year(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.viewport.zoom_in(),
            KeyCode::Char('-') => self.viewport.zoom_out(),
            KeyCode::Left => self.viewport.pan_left(),
            KeyCode::Right => self.viewport.pan_right(),
            KeyCode::Char('0') => self.viewport.reset(),
            KeyCode::Char('s') => self.show_summary = !self.show_summary,
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('x') => self.notice = None,
            _ => {}
        }
    }

    pub fn toggle_view(&mut self) {
        self.view_mode = self.view_mode.toggled();
        debug!(view = %self.view_mode, "view changed");
        self.rebuild(true);
    }

    /// Step the monthly year filter forward: all → first year → … → all.
    pub fn next_year(&mut self) {
        if self.view_mode != ViewMode::Monthly || self.years.is_empty() {
            return;
        }
        self.year_filter = match self.year_filter {
            None => self.years.first().copied(),
            Some(current) => self.years.iter().copied().find(|y| *y > current),
        };
        self.rebuild(true);
    }

    /// Step the monthly year filter backward: all → last year → … → all.
    pub fn previous_year(&mut self) {
        if self.view_mode != ViewMode::Monthly || self.years.is_empty() {
            return;
        }
        self.year_filter = match self.year_filter {
            None => self.years.last().copied(),
            Some(current) => self.years.iter().rev().copied().find(|y| *y < current),
        };
        self.rebuild(true);
    }

    /// Switch theme and persist the choice. Series colours are unaffected.
    pub fn toggle_theme(&mut self) {
        let mode = self.theme.mode.toggled();
        self.theme = Theme::for_mode(mode);
        self.rebuild(false);

        if let Some(path) = &self.prefs_path {
            match Preferences::save_theme(mode, path) {
                Ok(()) => info!(theme = %mode, "theme preference saved"),
                Err(e) => {
                    warn!(error = %e, "could not save theme preference");
                    self.notice = Some(Notice::Error(format!(
                        "Could not save theme preference: {e}"
                    )));
                }
            }
        }
    }

    fn rebuild(&mut self, reset_viewport: bool) {
        self.chart = build_series(
            &self.dataset.aggregate,
            self.view_mode,
            self.year_filter,
            self.theme.mode,
        );
        if reset_viewport || self.viewport.total() != self.chart.point_count() {
            self.viewport.set_total(self.chart.point_count());
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn chart_title(&self) -> String {
        match (self.view_mode, self.year_filter) {
            (ViewMode::Yearly, _) => "Yearly Average ± 1σ".to_string(),
            (ViewMode::Monthly, Some(year)) => format!("Monthly Temperature ({year})"),
            (ViewMode::Monthly, None) => "Monthly Temperature".to_string(),
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let source = self.dataset.source_label();
        let header = Header::new(
            &source,
            self.view_mode,
            self.year_filter,
            self.theme.mode,
            &self.theme,
        );
        let banner = self.notice.as_ref().map(|n| Banner::new(n, &self.theme));
        let banner_height = banner.as_ref().map_or(0, |b| b.height());

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(banner_height),
                Constraint::Min(5),
            ])
            .split(frame.area());

        frame.render_widget(Paragraph::new(Text::from(header.to_lines())), rows[0]);
        if let Some(banner) = banner {
            frame.render_widget(Paragraph::new(Text::from(banner.to_lines())), rows[1]);
        }

        let body = if self.show_summary {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
                .split(rows[2])
        } else {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(100)])
                .split(rows[2])
        };

        if self.chart.is_empty() {
            let message = match self.year_filter {
                Some(year) => format!("No data for {year}"),
                None => "No data to plot".to_string(),
            };
            summary_view::render_no_data(frame, body[0], &message, &self.theme);
        } else {
            chart_view::render_chart(
                frame,
                body[0],
                &self.chart,
                self.view_mode,
                &self.viewport,
                &self.chart_title(),
                &self.theme,
            );
        }

        if self.show_summary {
            let selected = match self.view_mode {
                ViewMode::Monthly => self.year_filter,
                ViewMode::Yearly => None,
            };
            summary_view::render_summary_view(
                frame,
                body[1],
                &self.dataset.aggregate.yearly,
                selected,
                &self.theme,
            );
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
