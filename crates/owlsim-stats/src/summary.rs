//! Descriptive statistics of a sample.

use serde::Serialize;
use statrs::statistics::Statistics;

/// Summary of a non-empty sample.
///
/// `stddev` and `variance` are sample (n - 1) estimates. `skewness` and
/// `kurtosis` (excess) use the bias-corrected sample estimators; they are 0
/// when the sample is too small (fewer than 3 and 4 values) or constant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub mean: f64,
    pub variance: f64,
    pub stddev: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

impl SummaryStats {
    /// `None` for an empty sample. Non-finite values must be clamped by the
    /// caller.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len();
        let n_f = n as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let sum: f64 = values.iter().sum();
        let mean = Statistics::mean(values.iter());
        let (variance, stddev) = if n < 2 {
            (0.0, 0.0)
        } else {
            (Statistics::variance(values.iter()), Statistics::std_dev(values.iter()))
        };

        let (mut skewness, mut kurtosis) = (0.0, 0.0);
        if stddev > 0.0 && stddev.is_finite() {
            let z3: f64 = values.iter().map(|v| ((v - mean) / stddev).powi(3)).sum();
            let z4: f64 = values.iter().map(|v| ((v - mean) / stddev).powi(4)).sum();
            if n >= 3 {
                skewness = n_f / ((n_f - 1.0) * (n_f - 2.0)) * z3;
            }
            if n >= 4 {
                let a = n_f * (n_f + 1.0) / ((n_f - 1.0) * (n_f - 2.0) * (n_f - 3.0));
                let b = 3.0 * (n_f - 1.0).powi(2) / ((n_f - 2.0) * (n_f - 3.0));
                kurtosis = a * z4 - b;
            }
        }

        Some(Self {
            n,
            min,
            max,
            sum,
            mean,
            variance,
            stddev,
            skewness,
            kurtosis,
        })
    }
}
