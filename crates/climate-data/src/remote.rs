//! Wire types of the remote aggregation service and their translation into
//! the local [`AggregateResult`] model.
//!
//! The service pre-computes yearly statistics and returns monthly values as
//! columns aligned with `years`. Once translated, the chart builder cannot
//! tell a remote result from a locally aggregated one.

use std::collections::BTreeMap;

use climate_core::error::{ClimateError, Result};
use climate_core::models::{AggregateResult, Month, MonthlyEntry, YearlySummary};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Body of a successful `POST /upload/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub file_path: Option<String>,
}

/// Body of a failed request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Body of a successful `GET /process/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub years: Vec<i32>,
    pub yearly_averages: Vec<f64>,
    pub yearly_stddev: Vec<f64>,
    /// Month key (e.g. `"jan"`) → one value per entry of `years`.
    #[serde(default)]
    pub monthly_data: BTreeMap<String, Vec<Option<f64>>>,
}

impl ProcessResponse {
    /// Translate the response into yearly summaries and a monthly series.
    pub fn into_aggregate(self) -> Result<AggregateResult> {
        let n = self.years.len();
        if self.yearly_averages.len() != n || self.yearly_stddev.len() != n {
            return Err(ClimateError::MalformedResponse(format!(
                "{} years but {} averages and {} standard deviations",
                n,
                self.yearly_averages.len(),
                self.yearly_stddev.len()
            )));
        }

        let mut columns: Vec<(Month, Vec<Option<f64>>)> = Vec::new();
        let mut seen: BTreeMap<Month, String> = BTreeMap::new();
        for (key, values) in self.monthly_data {
            let Some(month) = Month::from_abbrev(&key) else {
                warn!("Ignoring unknown month key {:?} in server response", key);
                continue;
            };
            if let Some(first) = seen.get(&month) {
                return Err(ClimateError::MalformedResponse(format!(
                    "duplicate month key {key:?} (already given as {first:?})"
                )));
            }
            seen.insert(month, key.clone());
            if values.len() != n {
                return Err(ClimateError::MalformedResponse(format!(
                    "monthly_data[{key}] has {} values for {n} years",
                    values.len()
                )));
            }
            columns.push((month, values));
        }

        let mut monthly: Vec<MonthlyEntry> = Vec::new();
        let mut counts = vec![0usize; n];
        for (month, values) in &columns {
            for (i, value) in values.iter().enumerate() {
                if let Some(value) = value.filter(|v| v.is_finite()) {
                    counts[i] += 1;
                    monthly.push(MonthlyEntry {
                        year: self.years[i],
                        month: *month,
                        value,
                    });
                }
            }
        }
        monthly.sort_by_key(|e| (e.year, e.month));

        let mut yearly = Vec::with_capacity(n);
        for i in 0..n {
            let (mean, stddev) = (self.yearly_averages[i], self.yearly_stddev[i]);
            if !mean.is_finite() || !stddev.is_finite() || stddev < 0.0 {
                return Err(ClimateError::MalformedResponse(format!(
                    "invalid statistics for {}: mean {mean}, stddev {stddev}",
                    self.years[i]
                )));
            }
            yearly.push(YearlySummary {
                year: self.years[i],
                mean,
                stddev,
                count: counts[i],
            });
        }
        yearly.sort_by_key(|s| s.year);
        if yearly.windows(2).any(|w| w[0].year == w[1].year) {
            return Err(ClimateError::MalformedResponse(
                "duplicate years in response".to_string(),
            ));
        }

        Ok(AggregateResult { yearly, monthly })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "years": [2021, 2020],
            "yearly_averages": [15.5, 14.5],
            "yearly_stddev": [1.5, 0.5],
            "monthly_data": {
                "Jan": [15.0, 14.0],
                "feb": [16.0, null],
                "annual": [1.0, 2.0]
            }
        }"#
    }

    #[test]
    fn test_translate_sorts_years_and_months() {
        let response: ProcessResponse = serde_json::from_str(sample_json()).unwrap();
        let result = response.into_aggregate().unwrap();

        let years: Vec<i32> = result.yearly.iter().map(|s| s.year).collect();
        assert_eq!(years, vec![2020, 2021]);
        assert_eq!(result.yearly[0].mean, 14.5);
        assert_eq!(result.yearly[1].stddev, 1.5);

        let keys: Vec<(i32, Month)> = result.monthly.iter().map(|e| (e.year, e.month)).collect();
        assert_eq!(
            keys,
            vec![(2020, Month::Jan), (2021, Month::Jan), (2021, Month::Feb)]
        );
    }

    #[test]
    fn test_null_values_are_absent_and_not_counted() {
        let response: ProcessResponse = serde_json::from_str(sample_json()).unwrap();
        let result = response.into_aggregate().unwrap();

        assert_eq!(result.yearly[0].count, 1);
        assert_eq!(result.yearly[1].count, 2);
    }

    #[test]
    fn test_mismatched_yearly_lengths_rejected() {
        let response = ProcessResponse {
            years: vec![2020, 2021],
            yearly_averages: vec![1.0],
            yearly_stddev: vec![0.1, 0.2],
            monthly_data: BTreeMap::new(),
        };
        assert!(matches!(
            response.into_aggregate(),
            Err(ClimateError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_mismatched_month_column_rejected() {
        let mut monthly_data = BTreeMap::new();
        monthly_data.insert("jan".to_string(), vec![Some(1.0)]);
        let response = ProcessResponse {
            years: vec![2020, 2021],
            yearly_averages: vec![1.0, 2.0],
            yearly_stddev: vec![0.1, 0.2],
            monthly_data,
        };
        assert!(matches!(
            response.into_aggregate(),
            Err(ClimateError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_negative_stddev_rejected() {
        let response = ProcessResponse {
            years: vec![2020],
            yearly_averages: vec![1.0],
            yearly_stddev: vec![-0.1],
            monthly_data: BTreeMap::new(),
        };
        assert!(response.into_aggregate().is_err());
    }

    #[test]
    fn test_duplicate_years_rejected() {
        let response = ProcessResponse {
            years: vec![2020, 2020],
            yearly_averages: vec![1.0, 2.0],
            yearly_stddev: vec![0.1, 0.2],
            monthly_data: BTreeMap::new(),
        };
        assert!(response.into_aggregate().is_err());
    }

    #[test]
    fn test_month_keys_differing_in_case_rejected() {
        let json = r#"{
            "years": [2020],
            "yearly_averages": [2.0],
            "yearly_stddev": [0.5],
            "monthly_data": {"Jan": [1.0], "jan": [2.0], "JAN": [3.0]}
        }"#;
        let response: ProcessResponse = serde_json::from_str(json).unwrap();
        match response.into_aggregate() {
            Err(ClimateError::MalformedResponse(msg)) => {
                assert!(msg.contains("duplicate month key"), "{msg}")
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_error_and_upload_bodies_tolerate_missing_fields() {
        let err: ErrorResponse = serde_json::from_str("{}").unwrap();
        assert!(err.detail.is_none());
        let up: UploadResponse = serde_json::from_str(r#"{"file_path": "uploads/a.csv"}"#).unwrap();
        assert_eq!(up.file_path.as_deref(), Some("uploads/a.csv"));
    }
}
