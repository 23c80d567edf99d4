//! Fixed-width binning of IC values.

use serde::Serialize;

/// Counts of values in `bins` equal-width bins spanning `[lower, upper]`.
/// The last bin is closed; values outside the range land in the nearest
/// edge bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub lower: f64,
    pub upper: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn new(values: &[f64], bins: usize, lower: f64, upper: f64) -> Self {
        let bins = bins.max(1);
        let mut counts = vec![0; bins];
        let width = (upper - lower) / bins as f64;
        for v in values.iter().filter(|v| v.is_finite()) {
            let idx = if width > 0.0 {
                (((v - lower) / width).floor().max(0.0) as usize).min(bins - 1)
            } else {
                0
            };
            counts[idx] += 1;
        }
        Self { lower, upper, counts }
    }

    pub fn bin_width(&self) -> f64 {
        (self.upper - self.lower) / self.counts.len() as f64
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Counts divided by the total; all zero for an empty histogram.
    pub fn frequencies(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return vec![0.0; self.counts.len()];
        }
        self.counts.iter().map(|c| *c as f64 / total as f64).collect()
    }

    /// `[start, end)` of bin `i`.
    pub fn bin_range(&self, i: usize) -> (f64, f64) {
        let w = self.bin_width();
        (self.lower + w * i as f64, self.lower + w * (i + 1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_fall_into_equal_width_bins() {
        let h = Histogram::new(&[0.0, 0.5, 1.0, 2.5, 4.0], 4, 0.0, 4.0);
        assert_eq!(h.counts, vec![2, 1, 1, 1]);
        assert_eq!(h.total(), 5);
        assert_eq!(h.bin_range(1), (1.0, 2.0));
    }

    #[test]
    fn out_of_range_values_are_clamped_to_edges() {
        let h = Histogram::new(&[-1.0, 9.0], 2, 0.0, 4.0);
        assert_eq!(h.counts, vec![1, 1]);
    }

    #[test]
    fn degenerate_range_uses_first_bin() {
        let h = Histogram::new(&[1.0, 1.0], 3, 1.0, 1.0);
        assert_eq!(h.counts, vec![2, 0, 0]);
    }

    #[test]
    fn frequencies_sum_to_one() {
        let h = Histogram::new(&[0.1, 0.2, 3.9], 2, 0.0, 4.0);
        let f = h.frequencies();
        assert!((f.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(Histogram::new(&[], 2, 0.0, 1.0).frequencies(), vec![0.0, 0.0]);
    }
}
