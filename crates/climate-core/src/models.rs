use serde::{Deserialize, Serialize};
use std::fmt;

// ── Month ──────────────────────────────────────────────────────────────────────

/// Calendar month. Declaration order is calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// All twelve months, January first.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Lowercase three-letter column name, e.g. `"jan"`.
    pub fn abbrev(self) -> &'static str {
        match self {
            Month::Jan => "jan",
            Month::Feb => "feb",
            Month::Mar => "mar",
            Month::Apr => "apr",
            Month::May => "may",
            Month::Jun => "jun",
            Month::Jul => "jul",
            Month::Aug => "aug",
            Month::Sep => "sep",
            Month::Oct => "oct",
            Month::Nov => "nov",
            Month::Dec => "dec",
        }
    }

    /// Month number in `1..=12`.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Resolve a month from its number (`1..=12`).
    pub fn from_number(n: u8) -> Option<Month> {
        match n {
            1..=12 => Some(Month::ALL[usize::from(n - 1)]),
            _ => None,
        }
    }

    /// Resolve a month from a column name, ignoring case and surrounding
    /// whitespace.
    pub fn from_abbrev(name: &str) -> Option<Month> {
        let lower = name.trim().to_lowercase();
        Month::ALL.into_iter().find(|m| m.abbrev() == lower)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

// ── Observations and aggregates ────────────────────────────────────────────────

/// A single (year, month, value) reading taken from one CSV cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub year: i32,
    pub month: Month,
    pub value: f64,
}

/// Per-year statistics over that year's observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySummary {
    pub year: i32,
    /// Arithmetic mean of the year's values.
    pub mean: f64,
    /// Population standard deviation (divides by `count`).
    pub stddev: f64,
    /// Number of observations the statistics were computed from.
    pub count: usize,
}

/// One point of the flattened monthly time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyEntry {
    pub year: i32,
    pub month: Month,
    pub value: f64,
}

impl From<Observation> for MonthlyEntry {
    fn from(o: Observation) -> Self {
        Self {
            year: o.year,
            month: o.month,
            value: o.value,
        }
    }
}

/// Both derived views produced by the aggregator (or translated from the
/// remote service).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// One entry per year, ascending.
    pub yearly: Vec<YearlySummary>,
    /// Monthly entries in ascending (year, month) order.
    pub monthly: Vec<MonthlyEntry>,
}

// ── Parse diagnostics ──────────────────────────────────────────────────────────

/// A non-fatal data-quality issue found while parsing.
///
/// `line` is the 1-based line number in the source file (the header is
/// line 1) or the 1-based row position for pre-tokenised input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Defect {
    /// The whole row was ignored.
    SkippedRow { line: u64, reason: String },
    /// A single month cell could not be read as a number.
    InvalidNumericCell {
        line: u64,
        column: String,
        value: String,
    },
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Defect::SkippedRow { line, reason } => {
                write!(f, "line {line}: row skipped ({reason})")
            }
            Defect::InvalidNumericCell {
                line,
                column,
                value,
            } => write!(f, "line {line}: non-numeric {column} value {value:?}"),
        }
    }
}

/// Successful parse result: the observations plus advisory diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    /// Observations in input order.
    pub observations: Vec<Observation>,
    /// Row and cell defects in input order.
    pub defects: Vec<Defect>,
    /// Number of rows dropped entirely.
    pub skipped_rows: usize,
}

// ── Chart model ────────────────────────────────────────────────────────────────

/// Which chart the builder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Yearly averages with ±1σ bands.
    #[default]
    Yearly,
    /// Flattened month-by-month series.
    Monthly,
}

impl ViewMode {
    /// Parse a view name; anything other than `"monthly"` is yearly.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("monthly") {
            ViewMode::Monthly
        } else {
            ViewMode::Yearly
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Yearly => "yearly",
            ViewMode::Monthly => "monthly",
        }
    }

    /// The other view.
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Yearly => ViewMode::Monthly,
            ViewMode::Monthly => ViewMode::Yearly,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Light or dark presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Parse a theme name. Only `"dark"` selects the dark theme.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("dark") {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The part a series plays in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesRole {
    Average,
    UpperBand,
    LowerBand,
    Monthly,
}

/// Stroke attributes attached to a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    /// CSS-style colour name.
    pub color: String,
    /// Dash pattern `[on, off]`; `None` for a solid line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<[u32; 2]>,
    pub width: u32,
    /// Marker radius; `0` draws no markers.
    pub point_radius: u32,
}

/// Axis, legend and grid colours for a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridStyle {
    pub grid_color: String,
    pub label_color: String,
}

/// One labelled value on the x axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// A named, styled sequence of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub role: SeriesRole,
    pub points: Vec<ChartPoint>,
    pub style: SeriesStyle,
}

impl ChartSeries {
    /// Point labels in order.
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    /// Point values in order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Renderer-ready chart: ordered series plus theme-dependent grid colours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub series: Vec<ChartSeries>,
    pub grid: GridStyle,
}

impl ChartData {
    /// Length of the longest series.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_numbers_follow_calendar_order() {
        let numbers: Vec<u8> = Month::ALL.iter().map(|m| m.number()).collect();
        assert_eq!(numbers, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn test_month_from_abbrev_is_case_insensitive() {
        assert_eq!(Month::from_abbrev("JAN"), Some(Month::Jan));
        assert_eq!(Month::from_abbrev("  Jul "), Some(Month::Jul));
        assert_eq!(Month::from_abbrev("july"), None);
        assert_eq!(Month::from_abbrev(""), None);
    }

    #[test]
    fn test_month_from_number_bounds() {
        assert_eq!(Month::from_number(1), Some(Month::Jan));
        assert_eq!(Month::from_number(12), Some(Month::Dec));
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }

    #[test]
    fn test_view_mode_from_name() {
        assert_eq!(ViewMode::from_name("monthly"), ViewMode::Monthly);
        assert_eq!(ViewMode::from_name("Monthly"), ViewMode::Monthly);
        assert_eq!(ViewMode::from_name("yearly"), ViewMode::Yearly);
        assert_eq!(ViewMode::from_name("weekly"), ViewMode::Yearly);
    }

    #[test]
    fn test_theme_mode_from_name_defaults_to_light() {
        assert_eq!(ThemeMode::from_name("dark"), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_name("light"), ThemeMode::Light);
        assert_eq!(ThemeMode::from_name("solarized"), ThemeMode::Light);
    }

    #[test]
    fn test_theme_toggle_round_trips() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
    }

    #[test]
    fn test_series_role_serializes_camel_case() {
        let json = serde_json::to_string(&SeriesRole::UpperBand).unwrap();
        assert_eq!(json, "\"upperBand\"");
    }

    #[test]
    fn test_defect_display() {
        let d = Defect::InvalidNumericCell {
            line: 4,
            column: "feb".to_string(),
            value: "n/a".to_string(),
        };
        assert_eq!(d.to_string(), "line 4: non-numeric feb value \"n/a\"");
    }

    #[test]
    fn test_chart_data_point_count_uses_longest_series() {
        let style = SeriesStyle {
            color: "blue".to_string(),
            dash: None,
            width: 1,
            point_radius: 0,
        };
        let data = ChartData {
            series: vec![
                ChartSeries {
                    name: "a".to_string(),
                    role: SeriesRole::Average,
                    points: vec![ChartPoint {
                        label: "2020".to_string(),
                        value: 1.0,
                    }],
                    style: style.clone(),
                },
                ChartSeries {
                    name: "b".to_string(),
                    role: SeriesRole::Monthly,
                    points: vec![],
                    style,
                },
            ],
            grid: GridStyle {
                grid_color: "#ddd".to_string(),
                label_color: "black".to_string(),
            },
        };
        assert_eq!(data.point_count(), 1);
        assert!(!data.is_empty());
    }
}
