use crate::models::Month;

/// Format a reading with a fixed number of decimal places.
///
/// Non-finite values render as `"-"`, and values that round to zero never
/// carry a minus sign.
///
/// # Examples
///
/// ```
/// use climate_core::formatting::format_value;
///
/// assert_eq!(format_value(12.345, 2), "12.35");
/// assert_eq!(format_value(-0.001, 2), "0.00");
/// assert_eq!(format_value(f64::NAN, 1), "-");
/// ```
pub fn format_value(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let factor = 10_f64.powi(decimals as i32);
    // Half-ULP nudge so exact midpoints such as 1.005 round away from zero.
    let epsilon = f64::EPSILON * value.abs() * factor;
    let rounded = ((value.abs() * factor) + epsilon).round() / factor;
    let signed = if value < 0.0 && rounded != 0.0 {
        -rounded
    } else {
        rounded
    };

    format!("{:.prec$}", signed, prec = decimals as usize)
}

/// Format a temperature in degrees Celsius with one decimal place.
///
/// ```
/// use climate_core::formatting::format_temperature;
///
/// assert_eq!(format_temperature(21.46), "21.5 °C");
/// ```
pub fn format_temperature(value: f64) -> String {
    format!("{} °C", format_value(value, 1))
}

/// Format a mean with its spread, e.g. `"12.30 ± 1.05"`.
pub fn format_mean_stddev(mean: f64, stddev: f64) -> String {
    format!("{} ± {}", format_value(mean, 2), format_value(stddev, 2))
}

/// Chart label for one month of one year: `"<year>-<MM>"`.
///
/// ```
/// use climate_core::formatting::format_month_label;
/// use climate_core::models::Month;
///
/// assert_eq!(format_month_label(2021, Month::Mar), "2021-03");
/// assert_eq!(format_month_label(1999, Month::Dec), "1999-12");
/// ```
pub fn format_month_label(year: i32, month: Month) -> String {
    format!("{}-{:02}", year, month.number())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
