use crate::themes::Theme;
use climate_core::models::{ThemeMode, ViewMode};
use ratatui::text::{Line, Span};

/// Decorative string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Shell header rendering four lines:
///
/// 1. Application title with sparkle decorations.
/// 2. A 60-column `=` separator.
/// 3. `[ view | year | theme | source ]`.
/// 4. Key hints.
pub struct Header<'a> {
    pub source: &'a str,
    pub view: ViewMode,
    /// Selected year; `None` shows every year.
    pub year: Option<i32>,
    pub theme_mode: ThemeMode,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(
        source: &'a str,
        view: ViewMode,
        year: Option<i32>,
        theme_mode: ThemeMode,
        theme: &'a Theme,
    ) -> Self {
        Self {
            source,
            view,
            year,
            theme_mode,
            theme,
        }
    }

    /// Year field text; yearly view always covers every year.
    pub fn year_text(&self) -> String {
        match (self.view, self.year) {
            (ViewMode::Monthly, Some(year)) => year.to_string(),
            _ => "all years".to_string(),
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.info),
                Span::styled(" CLIMATE VIZ ", self.theme.header),
                Span::styled(SPARKLES, self.theme.info),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.view.as_str(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.year_text(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.theme_mode.as_str(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.source, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(Span::styled(
                "v view  [ ] year  + - zoom  ← → pan  0 reset  s summary  t theme  x dismiss  q quit",
                self.theme.dim,
            )),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
