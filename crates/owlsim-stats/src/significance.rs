//! p-values comparing a candidate IC sample with a reference.
//!
//! t and F distributions come from `statrs`; the Kolmogorov-Smirnov p-value
//! uses the asymptotic Kolmogorov distribution with the Stephens small-sample
//! correction.

use owlsim_core::errors::StatsError;
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

use crate::summary::SummaryStats;

fn distribution_error(e: impl std::fmt::Display) -> StatsError {
    StatsError::Distribution {
        message: e.to_string(),
    }
}

fn require(values: &[f64], needed: usize) -> Result<(), StatsError> {
    if values.len() < needed {
        return Err(StatsError::InsufficientData {
            needed,
            actual: values.len(),
        });
    }
    Ok(())
}

/// Two-sided one-sample t-test of `values` against the mean `mu`.
pub fn t_test(values: &[f64], mu: f64) -> Result<f64, StatsError> {
    require(values, 2)?;
    let Some(s) = SummaryStats::from_values(values) else {
        return Err(StatsError::InsufficientData { needed: 2, actual: 0 });
    };
    if s.stddev <= 0.0 {
        // No spread: the sample either sits on mu or is certainly elsewhere.
        return Ok(if (s.mean - mu).abs() < f64::EPSILON { 1.0 } else { 0.0 });
    }
    let t = (s.mean - mu) / (s.stddev / (s.n as f64).sqrt());
    let dist = StudentsT::new(0.0, 1.0, (s.n - 1) as f64).map_err(distribution_error)?;
    Ok((2.0 * dist.sf(t.abs())).clamp(0.0, 1.0))
}

/// One-way ANOVA p-value across `groups`. Needs at least two groups of two
/// values each.
pub fn anova(groups: &[&[f64]]) -> Result<f64, StatsError> {
    if groups.len() < 2 {
        return Err(StatsError::InsufficientData {
            needed: 2,
            actual: groups.len(),
        });
    }
    for g in groups {
        require(g, 2)?;
    }
    let k = groups.len() as f64;
    let n: usize = groups.iter().map(|g| g.len()).sum();
    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / n as f64;

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for g in groups {
        let mean = g.iter().sum::<f64>() / g.len() as f64;
        ss_between += g.len() as f64 * (mean - grand_mean).powi(2);
        ss_within += g.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    }
    let df_between = k - 1.0;
    let df_within = n as f64 - k;
    let ms_between = ss_between / df_between;
    let ms_within = ss_within / df_within;
    if ms_within <= 0.0 {
        return Ok(if ms_between <= 0.0 { 1.0 } else { 0.0 });
    }
    let f = ms_between / ms_within;
    let dist = FisherSnedecor::new(df_between, df_within).map_err(distribution_error)?;
    Ok(dist.sf(f).clamp(0.0, 1.0))
}

/// Largest vertical distance between the empirical CDFs of `a` and `b`.
pub fn ks_statistic(a: &[f64], b: &[f64]) -> f64 {
    let mut a: Vec<f64> = a.to_vec();
    let mut b: Vec<f64> = b.to_vec();
    a.sort_by(f64::total_cmp);
    b.sort_by(f64::total_cmp);
    let (n, m) = (a.len() as f64, b.len() as f64);
    let (mut i, mut j) = (0, 0);
    let mut d: f64 = 0.0;
    while i < a.len() && j < b.len() {
        let x = a[i].min(b[j]);
        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }
        d = d.max((i as f64 / n - j as f64 / m).abs());
    }
    d
}

/// `Q_KS(λ) = 2 Σ (-1)^(k-1) exp(-2 k² λ²)`.
fn kolmogorov_sf(lambda: f64) -> f64 {
    if lambda < 1e-3 {
        return 1.0;
    }
    let mut sum = 0.0;
    let mut sign = 1.0;
    for k in 1..=100 {
        let k = k as f64;
        let term = sign * (-2.0 * k * k * lambda * lambda).exp();
        sum += term;
        if term.abs() < 1e-12 {
            break;
        }
        sign = -sign;
    }
    (2.0 * sum).clamp(0.0, 1.0)
}

/// Two-sample Kolmogorov-Smirnov p-value.
pub fn kolmogorov_smirnov(a: &[f64], b: &[f64]) -> Result<f64, StatsError> {
    require(a, 1)?;
    require(b, 1)?;
    let d = ks_statistic(a, b);
    let (n, m) = (a.len() as f64, b.len() as f64);
    let ne = (n * m / (n + m)).sqrt();
    Ok(kolmogorov_sf((ne + 0.12 + 0.11 / ne) * d))
}
