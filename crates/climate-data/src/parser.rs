//! CSV loading and validation for monthly climate readings.
//!
//! Turns a table with a `year` column and twelve month columns (`jan`..`dec`)
//! into [`Observation`]s. Bad rows and cells are recorded as [`Defect`]s and
//! never abort the parse; only a missing required column or an input without
//! a single usable value is an error.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use climate_core::error::{ClimateError, Result};
use climate_core::models::{Defect, Month, Observation, ParseOutcome};
use tracing::{debug, warn};

/// Name of the required year column (after normalisation).
pub const YEAR_COLUMN: &str = "year";

/// A pre-tokenised row: column name → cell text.
pub type RawRow = HashMap<String, String>;

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse CSV text held in memory.
pub fn parse_csv_str(text: &str) -> Result<ParseOutcome> {
    parse_reader(text.as_bytes())
}

/// Parse CSV data from any reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<ParseOutcome> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let layout = ColumnLayout::resolve(headers.iter())?;

    let mut state = ParseState::default();
    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header, and CSV lines are 1-based.
        let fallback_line = idx as u64 + 2;
        match result {
            Ok(record) => {
                let line = record.position().map_or(fallback_line, |p| p.line());
                state.push_row(line, &layout, |i| record.get(i));
            }
            Err(e) => {
                let line = e.position().map_or(fallback_line, |p| p.line());
                state.skip_row(line, format!("unreadable record: {e}"));
            }
        }
    }

    state.finish()
}

/// Reject paths without a `.csv` extension (case-insensitive).
pub fn ensure_csv_extension(path: &Path) -> Result<()> {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if !is_csv {
        return Err(ClimateError::InvalidFileType(path.display().to_string()));
    }
    Ok(())
}

/// Read and parse a `.csv` file from disk.
pub fn load_csv_file(path: &Path) -> Result<ParseOutcome> {
    ensure_csv_extension(path)?;

    let file = std::fs::File::open(path).map_err(|source| ClimateError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Parsing {}", path.display());
    parse_reader(std::io::BufReader::new(file))
}

/// Parse an already-tokenised row set.
///
/// `columns` is the header in source order; row keys are matched against it
/// after trimming and lowercasing. Defect line numbers are 1-based row
/// positions. When several keys of one row normalise to the same column,
/// the key that sorts first wins.
pub fn parse_rows<S, I>(columns: &[S], rows: I) -> Result<ParseOutcome>
where
    S: AsRef<str>,
    I: IntoIterator<Item = RawRow>,
{
    let normalized: Vec<String> = columns
        .iter()
        .map(|c| normalize_header(c.as_ref()))
        .collect();
    let layout = ColumnLayout::resolve(normalized.iter())?;

    let mut state = ParseState::default();
    for (idx, row) in rows.into_iter().enumerate() {
        let mut pairs: Vec<(String, String)> = row.into_iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        let mut by_name: HashMap<String, String> = HashMap::with_capacity(pairs.len());
        for (key, value) in pairs {
            by_name.entry(normalize_header(&key)).or_insert(value);
        }
        let cells: Vec<Option<&str>> = normalized
            .iter()
            .map(|c| by_name.get(c).map(String::as_str))
            .collect();
        state.push_row(idx as u64 + 1, &layout, |i| cells.get(i).copied().flatten());
    }

    state.finish()
}

// ── Column layout ─────────────────────────────────────────────────────────────

/// Positions of the required columns within a header.
struct ColumnLayout {
    year: usize,
    months: [usize; 12],
}

impl ColumnLayout {
    /// Locate `year` and `jan`..`dec`. The first occurrence of a repeated
    /// column wins.
    fn resolve<S: AsRef<str>>(headers: impl Iterator<Item = S>) -> Result<Self> {
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (i, header) in headers.enumerate() {
            positions.entry(normalize_header(header.as_ref())).or_insert(i);
        }

        let missing: Vec<String> = std::iter::once(YEAR_COLUMN)
            .chain(Month::ALL.iter().map(|m| m.abbrev()))
            .filter(|name| !positions.contains_key(*name))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            warn!("CSV header is missing columns: {}", missing.join(", "));
            return Err(ClimateError::MissingColumns(missing));
        }

        let mut months = [0usize; 12];
        for (slot, month) in months.iter_mut().zip(Month::ALL) {
            *slot = positions[month.abbrev()];
        }

        Ok(Self {
            year: positions[YEAR_COLUMN],
            months,
        })
    }
}

// ── Row accumulation ──────────────────────────────────────────────────────────

#[derive(Default)]
struct ParseState {
    outcome: ParseOutcome,
    rows_read: u64,
}

impl ParseState {
    /// Process one row. `cell` returns the raw text at a column position.
    fn push_row<'r, F>(&mut self, line: u64, layout: &ColumnLayout, cell: F)
    where
        F: Fn(usize) -> Option<&'r str>,
    {
        self.rows_read += 1;

        let year_raw = cell(layout.year).map(str::trim).unwrap_or("");
        let Some(year) = parse_year(year_raw) else {
            let reason = if year_raw.is_empty() {
                "missing year".to_string()
            } else {
                format!("invalid year {year_raw:?}")
            };
            self.skip_row(line, reason);
            return;
        };

        for (month, idx) in Month::ALL.into_iter().zip(layout.months) {
            let raw = cell(idx).map(str::trim).unwrap_or("");
            if raw.is_empty() {
                continue;
            }
            match parse_numeric(raw) {
                Some(value) => self.outcome.observations.push(Observation { year, month, value }),
                None => self.outcome.defects.push(Defect::InvalidNumericCell {
                    line,
                    column: month.abbrev().to_string(),
                    value: raw.to_string(),
                }),
            }
        }
    }

    fn skip_row(&mut self, line: u64, reason: String) {
        debug!("Skipping line {}: {}", line, reason);
        self.outcome.skipped_rows += 1;
        self.outcome.defects.push(Defect::SkippedRow { line, reason });
    }

    fn finish(self) -> Result<ParseOutcome> {
        let outcome = self.outcome;

        debug!(
            "{} rows read, {} skipped, {} observations, {} defects",
            self.rows_read,
            outcome.skipped_rows,
            outcome.observations.len(),
            outcome.defects.len(),
        );

        if outcome.observations.is_empty() {
            return Err(ClimateError::EmptyResult);
        }
        if outcome.skipped_rows > 0 {
            warn!("{} rows skipped while parsing", outcome.skipped_rows);
        }

        Ok(outcome)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Trim, lowercase, and drop a UTF-8 byte-order mark.
fn normalize_header(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Parse a finite decimal or integer reading.
fn parse_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a year cell. Accepts `2020` and whole-number decimals like `2020.0`.
fn parse_year(raw: &str) -> Option<i32> {
    if let Ok(year) = raw.parse::<i32>() {
        return Some(year);
    }
    let value = parse_numeric(raw)?;
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    (value.fract() == 0.0 && in_range).then_some(value as i32)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
