use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{ThemeMode, ViewMode};

/// Default base URL of the remote aggregation service.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000/api";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Chart monthly climate readings from a CSV file
#[derive(Parser, Debug, Clone)]
#[command(
    name = "climate-viz",
    about = "Chart monthly climate readings from a CSV file",
    version
)]
pub struct Settings {
    /// CSV file with a `year` column and one column per month (jan..dec)
    pub file: PathBuf,

    /// Chart to show first
    #[arg(long, default_value = "yearly", value_parser = ["yearly", "monthly"])]
    pub view: String,

    /// Restrict the monthly chart to one year
    #[arg(long)]
    pub year: Option<i32>,

    /// Display theme (defaults to the saved preference)
    #[arg(long, default_value = "light", value_parser = ["light", "dark"])]
    pub theme: String,

    /// Where the aggregation runs
    #[arg(long, default_value = "local", value_parser = ["local", "remote"])]
    pub source: String,

    /// Base URL of the aggregation service used with `--source remote`
    #[arg(long, default_value = DEFAULT_SERVER_URL, env = "CLIMATE_VIZ_SERVER_URL")]
    pub server_url: String,

    /// Output format
    #[arg(long, default_value = "tui", value_parser = ["tui", "json", "table"])]
    pub output: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear the saved theme preference
    #[arg(long)]
    pub clear: bool,
}

// ── Preferences ────────────────────────────────────────────────────────────────

/// The single persisted preference, saved to `~/.climate-viz/preferences.json`
/// as `{"theme": "dark"}` or `{"theme": "light"}`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl Preferences {
    /// Return the default path to the preferences file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the preferences path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".climate-viz").join("preferences.json")
    }

    /// Load preferences from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable preferences at {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Theme stored in the file, `Light` when none is stored.
    pub fn theme_mode(&self) -> ThemeMode {
        self.theme
            .as_deref()
            .map(ThemeMode::from_name)
            .unwrap_or_default()
    }

    /// Atomically write preferences to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Persist `theme` at `path`, replacing whatever was stored.
    pub fn save_theme(theme: ThemeMode, path: &Path) -> Result<(), std::io::Error> {
        Preferences {
            theme: Some(theme.as_str().to_string()),
        }
        .save_to(path)
    }

    /// Delete the preferences file at an explicit path if it exists.
    pub fn clear_at(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments and merge the saved theme preference.
    pub fn load_with_preferences() -> Self {
        Self::load_with_preferences_impl(std::env::args_os().collect(), &Preferences::config_path())
    }

    /// Full implementation: accepts args and an explicit preferences path so
    /// that tests can redirect to a temporary directory.
    ///
    /// An explicit `--theme` wins and is persisted; otherwise the saved theme
    /// is used. `--clear` deletes the saved preference first.
    pub fn load_with_preferences_impl(args: Vec<std::ffi::OsString>, prefs_path: &Path) -> Self {
        // Raw ArgMatches let us tell an explicit flag from a default value.
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = Preferences::clear_at(prefs_path) {
                tracing::warn!("Failed to clear preferences: {}", e);
            }
        }

        if is_arg_explicitly_set(&matches, "theme") {
            if let Err(e) = Preferences::save_theme(settings.theme_mode(), prefs_path) {
                tracing::warn!("Failed to save theme preference: {}", e);
            }
        } else {
            settings.theme = Preferences::load_from(prefs_path)
                .theme_mode()
                .as_str()
                .to_string();
        }

        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }

    pub fn view_mode(&self) -> ViewMode {
        ViewMode::from_name(&self.view)
    }

    pub fn theme_mode(&self) -> ThemeMode {
        ThemeMode::from_name(&self.theme)
    }

    pub fn is_remote(&self) -> bool {
        self.source == "remote"
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tmp_prefs_path(tmp: &TempDir) -> PathBuf {
        Preferences::config_path_in(tmp.path())
    }

    fn args(list: &[&str]) -> Vec<std::ffi::OsString> {
        list.iter().map(|s| std::ffi::OsString::from(*s)).collect()
    }

    // ── Preferences ───────────────────────────────────────────────────────────

    #[test]
    fn test_preferences_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_prefs_path(&tmp);

        Preferences::save_theme(ThemeMode::Dark, &path).expect("save");
        let loaded = Preferences::load_from(&path);

        assert_eq!(loaded.theme, Some("dark".to_string()));
        assert_eq!(loaded.theme_mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_preferences_file_uses_theme_key() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_prefs_path(&tmp);

        Preferences::save_theme(ThemeMode::Light, &path).expect("save");
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(raw["theme"], "light");
    }

    #[test]
    fn test_preferences_default_when_missing() {
        let tmp = TempDir::new().expect("tempdir");
        let loaded = Preferences::load_from(&tmp_prefs_path(&tmp));
        assert!(loaded.theme.is_none());
        assert_eq!(loaded.theme_mode(), ThemeMode::Light);
    }

    #[test]
    fn test_preferences_default_when_corrupt() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_prefs_path(&tmp);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();

        assert_eq!(Preferences::load_from(&path), Preferences::default());
    }

    #[test]
    fn test_preferences_clear() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_prefs_path(&tmp);

        Preferences::save_theme(ThemeMode::Dark, &path).expect("save");
        assert!(path.exists(), "file must exist after save");

        Preferences::clear_at(&path).expect("clear");
        assert!(!path.exists(), "file must be gone after clear");
    }

    // ── Settings parsing ──────────────────────────────────────────────────────

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["climate-viz", "data.csv"]);

        assert_eq!(settings.file, PathBuf::from("data.csv"));
        assert_eq!(settings.view, "yearly");
        assert!(settings.year.is_none());
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.source, "local");
        assert_eq!(settings.output, "tui");
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
        assert!(!settings.clear);
    }

    #[test]
    fn test_settings_cli_monthly_with_year() {
        let settings =
            Settings::parse_from(["climate-viz", "data.csv", "--view", "monthly", "--year", "2021"]);
        assert_eq!(settings.view_mode(), ViewMode::Monthly);
        assert_eq!(settings.year, Some(2021));
    }

    #[test]
    fn test_settings_cli_remote_source() {
        let settings = Settings::parse_from([
            "climate-viz",
            "data.csv",
            "--source",
            "remote",
            "--server-url",
            "http://example.test/api",
        ]);
        assert!(settings.is_remote());
        assert_eq!(settings.server_url, "http://example.test/api");
    }

    #[test]
    fn test_settings_rejects_unknown_view() {
        let result = Settings::try_parse_from(["climate-viz", "data.csv", "--view", "weekly"]);
        assert!(result.is_err());
    }

    // ── load_with_preferences ─────────────────────────────────────────────────

    #[test]
    fn test_load_uses_saved_theme_when_flag_absent() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_prefs_path(&tmp);
        Preferences::save_theme(ThemeMode::Dark, &path).expect("save");

        let settings = Settings::load_with_preferences_impl(args(&["climate-viz", "a.csv"]), &path);
        assert_eq!(settings.theme, "dark");
    }

    #[test]
    fn test_load_defaults_to_light_without_saved_theme() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_prefs_path(&tmp);

        let settings = Settings::load_with_preferences_impl(args(&["climate-viz", "a.csv"]), &path);
        assert_eq!(settings.theme_mode(), ThemeMode::Light);
        assert!(!path.exists(), "nothing is persisted without an explicit theme");
    }

    #[test]
    fn test_load_explicit_theme_wins_and_persists() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_prefs_path(&tmp);
        Preferences::save_theme(ThemeMode::Dark, &path).expect("save");

        let settings = Settings::load_with_preferences_impl(
            args(&["climate-viz", "a.csv", "--theme", "light"]),
            &path,
        );
        assert_eq!(settings.theme, "light");
        assert_eq!(Preferences::load_from(&path).theme_mode(), ThemeMode::Light);
    }

    #[test]
    fn test_load_clear_removes_saved_theme() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_prefs_path(&tmp);
        Preferences::save_theme(ThemeMode::Dark, &path).expect("save");

        let settings =
            Settings::load_with_preferences_impl(args(&["climate-viz", "a.csv", "--clear"]), &path);

        assert!(!path.exists(), "file must be gone after --clear");
        assert_eq!(settings.theme, "light");
    }

    #[test]
    fn test_load_debug_overrides_log_level() {
        let tmp = TempDir::new().expect("tempdir");
        let settings = Settings::load_with_preferences_impl(
            args(&["climate-viz", "a.csv", "--debug"]),
            &tmp_prefs_path(&tmp),
        );
        assert_eq!(settings.log_level, "DEBUG");
    }
}
