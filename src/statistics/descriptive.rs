//! Descriptive statistics of a one-dimensional sample.
//!
//! Population conventions throughout: variance divides by `N`. Quartiles use linear
//! interpolation between the bracketing order statistics at index `(p / 100) * (N - 1)`.

use std::fmt;

use itertools::Itertools;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::errors::{MathError, MathResult};

#[derive(Debug, Clone, PartialEq)]
pub struct StatsResult {
    pub mean: f64,
    pub median: f64,
    /// values sharing the highest frequency (> 1), in order of first appearance
    pub mode: Vec<f64>,
    pub std_dev: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub count: usize,
    pub sum: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
}

/// Splits user input on commas, semicolons and whitespace, empty pieces are ignored.
pub fn parse_data(text: &str) -> MathResult<Vec<f64>> {
    text.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|piece| !piece.is_empty())
        .map(|piece| match piece.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(MathError::Evaluation(format!("Invalid number: {}", piece))),
        })
        .collect()
}

/// Interpolated percentile of an ascending, non-empty sample.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    let index = (p / 100.0) * (sorted.len() as f64 - 1.0);
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    sorted[lower] + (sorted[upper] - sorted[lower]) * (index - lower as f64)
}

fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// bit pattern used to count equal values, `-0` counts as `0`
fn frequency_key(value: f64) -> u64 {
    if value == 0.0 { 0.0_f64.to_bits() } else { value.to_bits() }
}

fn mode(data: &[f64]) -> Vec<f64> {
    let counts = data.iter().map(|v| frequency_key(*v)).counts();
    let max_freq = counts.values().copied().max().unwrap_or(0);
    if max_freq <= 1 {
        return Vec::new();
    }
    data.iter()
        .copied()
        .filter(|v| counts.get(&frequency_key(*v)) == Some(&max_freq))
        .unique_by(|v| frequency_key(*v))
        .collect()
}

pub fn compute_stats(data: &[f64]) -> MathResult<StatsResult> {
    let n = data.len();
    if n == 0 {
        return Err(MathError::NoData);
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(MathError::Evaluation("Data contains a non-finite value".to_string()));
    }

    let sorted: Vec<f64> = data.iter().copied().sorted_by(|a, b| a.total_cmp(b)).collect();
    let (min, max) = (sorted[0], sorted[n - 1]);
    let sum: f64 = data.iter().sum();
    // sum / n does not round-trip for values like 0.1, a constant sample is handled exactly
    let (mean, variance) = if min == max {
        (min, 0.0)
    } else {
        let mean = sum / n as f64;
        (mean, data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64)
    };
    let q1 = percentile(&sorted, 25.0);
    let q3 = percentile(&sorted, 75.0);

    Ok(StatsResult {
        mean,
        median: median(&sorted),
        mode: mode(data),
        std_dev: variance.sqrt(),
        variance,
        min,
        max,
        range: max - min,
        count: n,
        sum,
        q1,
        q3,
        iqr: q3 - q1,
    })
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Statistic")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl fmt::Display for StatsResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mode = if self.mode.is_empty() {
            "none".to_string()
        } else {
            self.mode.iter().map(|v| format!("{:.4}", v)).join(", ")
        };
        let rows = vec![
            StatRow { name: "Count", value: self.count.to_string() },
            StatRow { name: "Sum", value: format!("{:.4}", self.sum) },
            StatRow { name: "Mean", value: format!("{:.4}", self.mean) },
            StatRow { name: "Median", value: format!("{:.4}", self.median) },
            StatRow { name: "Mode", value: mode },
            StatRow { name: "Std Dev", value: format!("{:.4}", self.std_dev) },
            StatRow { name: "Variance", value: format!("{:.4}", self.variance) },
            StatRow { name: "Min", value: format!("{:.4}", self.min) },
            StatRow { name: "Max", value: format!("{:.4}", self.max) },
            StatRow { name: "Range", value: format!("{:.4}", self.range) },
            StatRow { name: "Q1", value: format!("{:.4}", self.q1) },
            StatRow { name: "Q3", value: format!("{:.4}", self.q3) },
            StatRow { name: "IQR", value: format!("{:.4}", self.iqr) },
        ];
        let mut table = Table::new(rows);
        table.with(Style::modern_rounded());
        write!(f, "{}", table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_stats_scenario() {
        let stats = compute_stats(&[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
        assert_eq!(format!("{:.4}", stats.mean), "30.0000");
        assert_eq!(stats.count, 5);
        assert_eq!(stats.sum, 150.0);
        assert_eq!(stats.median, 30.0);
        assert!(stats.mode.is_empty());
        assert_relative_eq!(stats.variance, 200.0);
        assert_relative_eq!(stats.std_dev, 200.0_f64.sqrt());
        assert_eq!((stats.min, stats.max, stats.range), (10.0, 50.0, 40.0));
        assert_eq!((stats.q1, stats.q3, stats.iqr), (20.0, 40.0, 20.0));
    }

    #[test]
    fn test_even_count_median_and_interpolated_quartiles() {
        let stats = compute_stats(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.median, 2.5);
        assert_relative_eq!(stats.q1, 1.75);
        assert_relative_eq!(stats.q3, 3.25);
        assert_relative_eq!(stats.iqr, 1.5);
    }

    #[test]
    fn test_mode_ties_keep_first_appearance() {
        let stats = compute_stats(&[3.0, 1.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.mode, vec![3.0, 1.0]);
        let stats = compute_stats(&[5.0, 5.0, 5.0, 1.0, 1.0]).unwrap();
        assert_eq!(stats.mode, vec![5.0]);
        let stats = compute_stats(&[0.0, -0.0, 1.0]).unwrap();
        assert_eq!(stats.mode.len(), 1);
    }

    #[test]
    fn test_constant_sample_has_zero_variance() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            let value: f64 = rng.random_range(-100.0..100.0);
            let n: usize = rng.random_range(1..50);
            let stats = compute_stats(&vec![value; n]).unwrap();
            assert_eq!(stats.variance, 0.0);
            assert_eq!(stats.std_dev, 0.0);
            assert_eq!(stats.range, 0.0);
        }
        for (value, n) in [(0.1, 3), (0.7, 10), (1.1, 7)] {
            let stats = compute_stats(&vec![value; n]).unwrap();
            assert_eq!(stats.variance, 0.0);
            assert_eq!(stats.mean, value);
        }
    }

    #[test]
    fn test_single_value() {
        let stats = compute_stats(&[7.0]).unwrap();
        assert_eq!((stats.median, stats.q1, stats.q3), (7.0, 7.0, 7.0));
        assert!(stats.mode.is_empty());
    }

    #[test]
    fn test_errors() {
        assert_eq!(compute_stats(&[]).unwrap_err().to_string(), "No data provided");
        assert!(compute_stats(&[1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_parse_data() {
        assert_eq!(
            parse_data("1, 2;3  4.5\n-6").unwrap(),
            vec![1.0, 2.0, 3.0, 4.5, -6.0]
        );
        assert!(parse_data("  ,, ").unwrap().is_empty());
        let err = parse_data("1, two, 3").unwrap_err();
        assert_eq!(err.to_string(), "Invalid number: two");
    }

    #[test]
    fn test_table_rendering() {
        let stats = compute_stats(&[1.0, 2.0, 2.0]).unwrap();
        let table = stats.to_string();
        assert!(table.contains("Mean"));
        assert!(table.contains("1.6667"));
        assert!(table.contains("2.0000"));
    }
}
