use crate::themes::Theme;
use climate_core::models::Defect;
use ratatui::text::{Line, Span};

/// Defects listed before the rest are summarised as a count.
pub const MAX_LISTED_DEFECTS: usize = 3;

/// Message shown above the chart until dismissed.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A failed action, e.g. a theme that could not be saved.
    Error(String),
    /// Rows or cells the parser had to drop.
    Warning {
        skipped_rows: usize,
        defects: Vec<Defect>,
    },
}

impl Notice {
    /// Warning for a load with defects; `None` when the load was clean.
    pub fn from_defects(skipped_rows: usize, defects: &[Defect]) -> Option<Self> {
        if skipped_rows == 0 && defects.is_empty() {
            return None;
        }
        Some(Notice::Warning {
            skipped_rows,
            defects: defects.to_vec(),
        })
    }
}

pub struct Banner<'a> {
    pub notice: &'a Notice,
    pub theme: &'a Theme,
}

impl<'a> Banner<'a> {
    pub fn new(notice: &'a Notice, theme: &'a Theme) -> Self {
        Self { notice, theme }
    }

    /// Number of lines [`Self::to_lines`] produces.
    pub fn height(&self) -> u16 {
        self.to_lines().len() as u16
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        match self.notice {
            Notice::Error(message) => vec![Line::from(vec![
                Span::styled("✗ ", self.theme.error),
                Span::styled(message.clone(), self.theme.error),
                Span::styled("  (x to dismiss)", self.theme.dim),
            ])],
            Notice::Warning {
                skipped_rows,
                defects,
            } => {
                let mut lines = vec![Line::from(vec![
                    Span::styled("⚠ ", self.theme.warning),
                    Span::styled(
                        format!(
                            "{} row(s) skipped, {} problem(s) found",
                            skipped_rows,
                            defects.len()
                        ),
                        self.theme.warning,
                    ),
                    Span::styled("  (x to dismiss)", self.theme.dim),
                ])];
                for defect in defects.iter().take(MAX_LISTED_DEFECTS) {
                    lines.push(Line::from(Span::styled(
                        format!("  {defect}"),
                        self.theme.label,
                    )));
                }
                if defects.len() > MAX_LISTED_DEFECTS {
                    lines.push(Line::from(Span::styled(
                        format!("  … and {} more", defects.len() - MAX_LISTED_DEFECTS),
                        self.theme.dim,
                    )));
                }
                lines
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
