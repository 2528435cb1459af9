mod bootstrap;
mod report;

use anyhow::{Context, Result};
use climate_core::models::ViewMode;
use climate_core::settings::{Preferences, Settings};
use climate_runtime::loader::{load_dataset, DataSource};
use climate_runtime::transport::RemoteClient;
use climate_ui::app::App;

use crate::report::{render_text_table, JsonReport};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_preferences();
    let interactive = settings.output == "tui";

    bootstrap::ensure_directories()?;
    // The TUI owns the terminal, so it always logs to a file.
    let log_file = match (&settings.log_file, interactive) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(bootstrap::default_log_file()),
        (None, false) => None,
    };
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref(), !interactive)?;

    tracing::info!("Climate Viz v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "File: {}, View: {}, Theme: {}, Source: {}",
        settings.file.display(),
        settings.view,
        settings.theme,
        settings.source
    );

    let source = if settings.is_remote() {
        DataSource::Remote {
            client: RemoteClient::new(settings.server_url.clone()),
            path: settings.file.clone(),
        }
    } else {
        DataSource::Local(settings.file.clone())
    };

    let dataset = load_dataset(source)
        .await
        .with_context(|| format!("Could not load {}", settings.file.display()))?;

    let view = settings.view_mode();
    let theme = settings.theme_mode();
    if view == ViewMode::Yearly && settings.year.is_some() {
        tracing::debug!("--year only applies to the monthly view");
    }

    match settings.output.as_str() {
        "json" => {
            let report = JsonReport::new(&dataset, view, settings.year, theme);
            println!("{}", report.to_json()?);
        }

        "table" => {
            println!("{}", render_text_table(&dataset.aggregate.yearly));
            if dataset.has_warnings() {
                eprintln!(
                    "{} row(s) skipped, {} problem(s):",
                    dataset.skipped_rows,
                    dataset.defects.len()
                );
                for defect in &dataset.defects {
                    eprintln!("  {defect}");
                }
            }
        }

        _ => {
            let app = App::new(
                dataset,
                view,
                settings.year,
                theme,
                Some(Preferences::config_path()),
            );

            tokio::select! {
                result = app.run() => {
                    result?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down");
                }
            }
        }
    }

    Ok(())
}
