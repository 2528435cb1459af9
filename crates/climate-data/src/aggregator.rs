//! Yearly statistics and the flattened monthly series.
//!
//! Every derived view the chart needs is computed here, once, from the typed
//! observations; nothing downstream recomputes means or spreads.

use std::collections::BTreeMap;

use climate_core::models::{AggregateResult, MonthlyEntry, Observation, YearlySummary};

// ── YearStats ─────────────────────────────────────────────────────────────────

/// Values collected for one year, in input order.
#[derive(Debug, Clone, Default)]
pub struct YearStats {
    values: Vec<f64>,
}

impl YearStats {
    pub fn add(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Arithmetic mean; `NaN` when empty.
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return f64::NAN;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Population standard deviation: `sqrt(Σ(x − mean)² / n)`.
    pub fn population_stddev(&self) -> f64 {
        if self.values.is_empty() {
            return f64::NAN;
        }
        let mean = self.mean();
        let sum_sq: f64 = self.values.iter().map(|v| (v - mean).powi(2)).sum();
        (sum_sq / self.values.len() as f64).sqrt()
    }

    fn summarize(&self, year: i32) -> YearlySummary {
        YearlySummary {
            year,
            mean: self.mean(),
            stddev: self.population_stddev(),
            count: self.count(),
        }
    }
}

// ── ClimateAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that groups observations by year.
pub struct ClimateAggregator;

impl ClimateAggregator {
    /// Build both derived views from `observations`.
    ///
    /// Yearly summaries are ascending by year; monthly entries are ascending
    /// by (year, month) with ties kept in input order.
    pub fn aggregate(observations: &[Observation]) -> AggregateResult {
        AggregateResult {
            yearly: Self::aggregate_yearly(observations),
            monthly: Self::monthly_series(observations),
        }
    }

    /// Per-year mean and population standard deviation.
    pub fn aggregate_yearly(observations: &[Observation]) -> Vec<YearlySummary> {
        // BTreeMap keeps years sorted and unique.
        let mut by_year: BTreeMap<i32, YearStats> = BTreeMap::new();
        for obs in observations {
            by_year.entry(obs.year).or_default().add(obs.value);
        }

        by_year
            .iter()
            .map(|(year, stats)| stats.summarize(*year))
            .collect()
    }

    /// All observations as monthly entries in calendar order.
    pub fn monthly_series(observations: &[Observation]) -> Vec<MonthlyEntry> {
        let mut entries: Vec<MonthlyEntry> =
            observations.iter().copied().map(MonthlyEntry::from).collect();
        entries.sort_by_key(|e| (e.year, e.month));
        entries
    }

    /// Monthly entries for a single year, in calendar order.
    pub fn monthly_for_year(result: &AggregateResult, year: i32) -> Vec<MonthlyEntry> {
        result
            .monthly
            .iter()
            .filter(|e| e.year == year)
            .copied()
            .collect()
    }

    /// Distinct years present, ascending.
    pub fn years(result: &AggregateResult) -> Vec<i32> {
        result.yearly.iter().map(|s| s.year).collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use climate_core::models::Month;

    fn obs(year: i32, month: Month, value: f64) -> Observation {
        Observation { year, month, value }
    }

    fn full_year(year: i32, values: [f64; 12]) -> Vec<Observation> {
        Month::ALL
            .into_iter()
            .zip(values)
            .map(|(m, v)| obs(year, m, v))
            .collect()
    }

    // ── YearStats ─────────────────────────────────────────────────────────────

    #[test]
    fn test_population_stddev_divides_by_count() {
        let mut stats = YearStats::default();
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.add(v);
        }
        assert!((stats.mean() - 5.0).abs() < 1e-12);
        // Population σ of this classic sample is exactly 2 (sample σ ≈ 2.138).
        assert!((stats.population_stddev() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_value_has_zero_stddev() {
        let mut stats = YearStats::default();
        stats.add(17.5);
        assert_eq!(stats.population_stddev(), 0.0);
        assert_eq!(stats.mean(), 17.5);
    }

    #[test]
    fn test_empty_stats_are_nan() {
        let stats = YearStats::default();
        assert!(stats.mean().is_nan());
        assert!(stats.population_stddev().is_nan());
    }

    // ── aggregate_yearly ──────────────────────────────────────────────────────

    #[test]
    fn test_two_full_years() {
        let a = [10.0, 12.0, 13.0, 15.0, 17.0, 19.0, 21.0, 20.0, 18.0, 16.0, 13.0, 14.0];
        let b = a.map(|v| v + 1.0);
        let mut observations = full_year(2020, a);
        observations.extend(full_year(2021, b));

        let yearly = ClimateAggregator::aggregate_yearly(&observations);

        assert_eq!(yearly.len(), 2);
        let mean_a = a.iter().sum::<f64>() / 12.0;
        assert!((yearly[0].mean - mean_a).abs() < 1e-9);
        assert!((yearly[1].mean - (mean_a + 1.0)).abs() < 1e-9);
        assert_eq!(yearly[0].count, 12);
        assert!(yearly.iter().all(|s| s.stddev >= 0.0));
        // Shifting every value leaves the spread unchanged.
        assert!((yearly[0].stddev - yearly[1].stddev).abs() < 1e-9);
    }

    #[test]
    fn test_years_sorted_and_unique() {
        let observations = vec![
            obs(2022, Month::Jan, 1.0),
            obs(2019, Month::Jan, 2.0),
            obs(2022, Month::Feb, 3.0),
            obs(2020, Month::Mar, 4.0),
            obs(2019, Month::Dec, 5.0),
        ];
        let yearly = ClimateAggregator::aggregate_yearly(&observations);
        let years: Vec<i32> = yearly.iter().map(|s| s.year).collect();
        assert_eq!(years, vec![2019, 2020, 2022]);
    }

    #[test]
    fn test_missing_month_excluded_from_mean() {
        let observations = vec![
            obs(2020, Month::Jan, 10.0),
            obs(2020, Month::Mar, 20.0),
        ];
        let yearly = ClimateAggregator::aggregate_yearly(&observations);
        assert_eq!(yearly[0].count, 2);
        assert!((yearly[0].mean - 15.0).abs() < 1e-12);
        assert!((yearly[0].stddev - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input_produces_no_years() {
        let result = ClimateAggregator::aggregate(&[]);
        assert!(result.yearly.is_empty());
        assert!(result.monthly.is_empty());
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let observations = vec![
            obs(2020, Month::Jan, 0.1),
            obs(2020, Month::Feb, 0.2),
            obs(2020, Month::Mar, 0.3),
            obs(2021, Month::Jan, 1.7),
        ];
        let first = ClimateAggregator::aggregate(&observations);
        let second = ClimateAggregator::aggregate(&observations);
        assert_eq!(first, second);
        assert_eq!(first.yearly[0].mean.to_bits(), second.yearly[0].mean.to_bits());
    }

    // ── monthly_series ────────────────────────────────────────────────────────

    #[test]
    fn test_monthly_sorted_by_year_then_month() {
        let observations = vec![
            obs(2021, Month::Feb, 4.0),
            obs(2020, Month::Dec, 3.0),
            obs(2021, Month::Jan, 2.0),
            obs(2020, Month::Jan, 1.0),
        ];
        let monthly = ClimateAggregator::monthly_series(&observations);
        let keys: Vec<(i32, Month)> = monthly.iter().map(|e| (e.year, e.month)).collect();
        assert_eq!(
            keys,
            vec![
                (2020, Month::Jan),
                (2020, Month::Dec),
                (2021, Month::Jan),
                (2021, Month::Feb)
            ]
        );
    }

    #[test]
    fn test_monthly_count_bounded_by_years() {
        let mut observations = full_year(2020, [1.0; 12]);
        observations.extend(full_year(2021, [2.0; 12]));
        let result = ClimateAggregator::aggregate(&observations);
        assert!(result.monthly.len() <= 12 * result.yearly.len());
    }

    #[test]
    fn test_monthly_for_year_filters_in_calendar_order() {
        let observations = vec![
            obs(2021, Month::Mar, 3.0),
            obs(2020, Month::Jan, 1.0),
            obs(2021, Month::Jan, 2.0),
        ];
        let result = ClimateAggregator::aggregate(&observations);

        let only_2021 = ClimateAggregator::monthly_for_year(&result, 2021);
        let months: Vec<Month> = only_2021.iter().map(|e| e.month).collect();
        assert_eq!(months, vec![Month::Jan, Month::Mar]);

        assert!(ClimateAggregator::monthly_for_year(&result, 1990).is_empty());
    }

    #[test]
    fn test_years_helper() {
        let observations = vec![obs(2001, Month::Jan, 1.0), obs(1999, Month::Jan, 1.0)];
        let result = ClimateAggregator::aggregate(&observations);
        assert_eq!(ClimateAggregator::years(&result), vec![1999, 2001]);
    }
}
