use climate_core::models::{GridStyle, ThemeMode};
use ratatui::style::{Color, Modifier, Style};

/// Shell chrome styles for one theme.
///
/// Series colours are deliberately absent: they come from each series'
/// [`SeriesStyle`](climate_core::models::SeriesStyle) and do not change with
/// the theme.
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,

    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub warning: Style,
    pub error: Style,

    // ── Chart ────────────────────────────────────────────────────────────────
    /// Axis lines and chart border.
    pub grid: Style,
    /// Axis titles, tick labels and legend text.
    pub axis_label: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_highlight: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    pub fn dark() -> Self {
        let grid = climate_core::styles::grid_style(ThemeMode::Dark);
        Self {
            mode: ThemeMode::Dark,

            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            grid: Style::default().fg(css_color(&grid.grid_color)),
            axis_label: Style::default().fg(css_color(&grid.label_color)),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_highlight: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Dark text on a light terminal canvas.
    pub fn light() -> Self {
        let grid = climate_core::styles::grid_style(ThemeMode::Light);
        Self {
            mode: ThemeMode::Light,

            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            grid: Style::default().fg(css_color(&grid.grid_color)),
            axis_label: Style::default().fg(css_color(&grid.label_color)),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_highlight: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Construct a theme by name; anything but `"dark"` is light.
    pub fn from_name(name: &str) -> Self {
        Self::for_mode(ThemeMode::from_name(name))
    }

    /// Chart grid styles taken from a built chart rather than the theme.
    pub fn with_grid(mut self, grid: &GridStyle) -> Self {
        self.grid = Style::default().fg(css_color(&grid.grid_color));
        self.axis_label = Style::default().fg(css_color(&grid.label_color));
        self
    }
}

// ── Colour conversion ─────────────────────────────────────────────────────────

/// Convert a CSS colour (`"blue"`, `"#444"`, `"#1e90ff"`) into a terminal
/// colour. Unknown names map to [`Color::Reset`].
pub fn css_color(name: &str) -> Color {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex).unwrap_or(Color::Reset);
    }
    match name.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "white" => Color::White,
        "red" => Color::Red,
        "green" => Color::Green,
        "blue" => Color::Blue,
        "yellow" => Color::Yellow,
        "cyan" => Color::Cyan,
        "magenta" => Color::Magenta,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        _ => Color::Reset,
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digits: Vec<u8> = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;
    match digits.as_slice() {
        // #rgb expands each nibble: #4a0 → #44aa00.
        [r, g, b] => Some(Color::Rgb(r * 17, g * 17, b * 17)),
        [r1, r2, g1, g2, b1, b2] => Some(Color::Rgb(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
