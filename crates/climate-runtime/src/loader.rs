//! Dataset loading for the shell.
//!
//! A [`DataSource`] is resolved into a [`LoadedDataset`]: the aggregate the
//! chart builder consumes plus whatever row and cell defects the parser
//! reported. Local files are parsed on the blocking pool so the async caller
//! is never stalled by disk I/O.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use climate_core::error::{ClimateError, Result};
use climate_core::models::{AggregateResult, Defect};
use climate_data::aggregator::ClimateAggregator;
use climate_data::parser::load_csv_file;
use serde::Serialize;
use tracing::{info, warn};

use crate::transport::RemoteClient;

// ── Public types ──────────────────────────────────────────────────────────────

/// Where a dataset comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Parse and aggregate a CSV file on this machine.
    Local(PathBuf),
    /// Upload a CSV file and let the remote service aggregate it.
    Remote { client: RemoteClient, path: PathBuf },
}

impl DataSource {
    pub fn path(&self) -> &PathBuf {
        match self {
            DataSource::Local(path) => path,
            DataSource::Remote { path, .. } => path,
        }
    }

    pub fn origin(&self) -> DataOrigin {
        match self {
            DataSource::Local(_) => DataOrigin::Local,
            DataSource::Remote { .. } => DataOrigin::Remote,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    Local,
    Remote,
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataOrigin::Local => f.write_str("local"),
            DataOrigin::Remote => f.write_str("remote"),
        }
    }
}

/// An aggregated dataset ready for charting.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedDataset {
    pub aggregate: AggregateResult,
    /// Rows the parser dropped entirely. Always zero for remote data.
    pub skipped_rows: usize,
    /// Row and cell problems found while parsing. Empty for remote data.
    pub defects: Vec<Defect>,
    pub origin: DataOrigin,
    pub source_path: PathBuf,
    pub loaded_at: DateTime<Utc>,
}

impl LoadedDataset {
    /// A defect-free dataset stamped with the current time.
    pub fn new(aggregate: AggregateResult, origin: DataOrigin, source_path: PathBuf) -> Self {
        Self {
            aggregate,
            skipped_rows: 0,
            defects: Vec::new(),
            origin,
            source_path,
            loaded_at: Utc::now(),
        }
    }

    pub fn with_defects(mut self, skipped_rows: usize, defects: Vec<Defect>) -> Self {
        self.skipped_rows = skipped_rows;
        self.defects = defects;
        self
    }

    /// `"<origin>: <file name>"`, e.g. `"local: temps.csv"`.
    pub fn source_label(&self) -> String {
        let name = self
            .source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source_path.display().to_string());
        format!("{}: {}", self.origin, name)
    }

    pub fn has_warnings(&self) -> bool {
        self.skipped_rows > 0 || !self.defects.is_empty()
    }
}

// ── load_dataset ──────────────────────────────────────────────────────────────

/// Load and aggregate `source`.
///
/// Every call owns its parse buffers, so concurrent loads never observe each
/// other's partial results.
pub async fn load_dataset(source: DataSource) -> Result<LoadedDataset> {
    let origin = source.origin();
    let source_path = source.path().clone();

    let (aggregate, skipped_rows, defects) = match source {
        DataSource::Local(path) => {
            let outcome = tokio::task::spawn_blocking(move || load_csv_file(&path))
                .await
                .map_err(|e| ClimateError::Other(anyhow::Error::new(e)))??;
            let aggregate = ClimateAggregator::aggregate(&outcome.observations);
            (aggregate, outcome.skipped_rows, outcome.defects)
        }
        DataSource::Remote { client, path } => {
            let aggregate = client.upload_and_process(&path).await?;
            (aggregate, 0, Vec::new())
        }
    };

    if aggregate.yearly.is_empty() {
        warn!(path = %source_path.display(), "dataset has no years");
        return Err(ClimateError::EmptyResult);
    }

    info!(
        origin = %origin,
        years = aggregate.yearly.len(),
        months = aggregate.monthly.len(),
        skipped_rows,
        defects = defects.len(),
        "dataset loaded"
    );

    Ok(LoadedDataset::new(aggregate, origin, source_path).with_defects(skipped_rows, defects))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const HEADER: &str = "year,jan,feb,mar,apr,may,jun,jul,aug,sep,oct,nov,dec";

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn test_local_load_aggregates() {
        let dir = tempfile::TempDir::new().unwrap();
        let csv = format!(
            "{HEADER}\n2020,1,2,3,4,5,6,7,8,9,10,11,12\n2021,2,3,4,5,6,7,8,9,10,11,12,13\n"
        );
        let path = write(dir.path(), "data.csv", &csv);

        let loaded = load_dataset(DataSource::Local(path.clone())).await.unwrap();
        assert_eq!(loaded.origin, DataOrigin::Local);
        assert_eq!(loaded.source_path, path);
        assert_eq!(loaded.aggregate.yearly.len(), 2);
        assert_eq!(loaded.aggregate.monthly.len(), 24);
        assert!((loaded.aggregate.yearly[0].mean - 6.5).abs() < 1e-12);
        assert!(!loaded.has_warnings());
    }

    #[tokio::test]
    async fn test_local_load_reports_defects() {
        let dir = tempfile::TempDir::new().unwrap();
        let csv = format!(
            "{HEADER}\n2020,1,abc,3,4,5,6,7,8,9,10,11,12\nnot-a-year,1,2,3,4,5,6,7,8,9,10,11,12\n"
        );
        let path = write(dir.path(), "data.csv", &csv);

        let loaded = load_dataset(DataSource::Local(path)).await.unwrap();
        assert_eq!(loaded.skipped_rows, 1);
        assert!(loaded.has_warnings());
        assert_eq!(loaded.aggregate.yearly[0].count, 11);
    }

    #[tokio::test]
    async fn test_local_load_missing_columns() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write(dir.path(), "data.csv", "year,jan\n2020,1\n");

        let err = load_dataset(DataSource::Local(path)).await.unwrap_err();
        assert!(matches!(err, ClimateError::MissingColumns(_)));
    }

    #[tokio::test]
    async fn test_concurrent_loads_are_independent() {
        let dir = tempfile::TempDir::new().unwrap();
        let a = write(
            dir.path(),
            "a.csv",
            &format!("{HEADER}\n2000,1,1,1,1,1,1,1,1,1,1,1,1\n"),
        );
        let b = write(
            dir.path(),
            "b.csv",
            &format!("{HEADER}\n1990,2,2,2,2,2,2,2,2,2,2,2,2\n1991,3,3,3,3,3,3,3,3,3,3,3,3\n"),
        );

        let (ra, rb) = tokio::join!(
            load_dataset(DataSource::Local(a.clone())),
            load_dataset(DataSource::Local(b))
        );
        let (ra, rb) = (ra.unwrap(), rb.unwrap());
        assert_eq!(ra.aggregate.yearly.len(), 1);
        assert_eq!(rb.aggregate.yearly.len(), 2);

        let again = load_dataset(DataSource::Local(a)).await.unwrap();
        assert_eq!(again.aggregate, ra.aggregate);
    }

    #[test]
    fn test_source_origin_and_path() {
        let local = DataSource::Local(PathBuf::from("x.csv"));
        assert_eq!(local.origin(), DataOrigin::Local);
        let remote = DataSource::Remote {
            client: RemoteClient::default(),
            path: PathBuf::from("y.csv"),
        };
        assert_eq!(remote.origin(), DataOrigin::Remote);
        assert_eq!(remote.path(), &PathBuf::from("y.csv"));
        assert_eq!(DataOrigin::Remote.to_string(), "remote");
    }

    #[test]
    fn test_source_label_uses_file_name() {
        let loaded = LoadedDataset::new(
            AggregateResult::default(),
            DataOrigin::Local,
            PathBuf::from("/data/climate/temps.csv"),
        );
        assert_eq!(loaded.source_label(), "local: temps.csv");
        assert!(!loaded.has_warnings());
    }
}
