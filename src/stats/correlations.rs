//! Pairwise elemental correlation with significance testing
//!
//! Computes Pearson r and a two-sided p-value (Student's t, statrs) for each
//! pair in the curated diagenesis table. Significance is directional: each
//! pair carries a signed threshold and an expected sign, and r must cross
//! the threshold in that direction; a strong correlation the wrong way is
//! reported but not flagged.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::types::{
    CorrelationResult, ElementReading, ExpectedDirection, DIAGENESIS_PAIRS,
};

/// Minimum co-detected rows before a pair is reported at all.
pub const MIN_PAIR_SAMPLES: usize = 3;

/// Correlation analysis engine over a full dataset snapshot.
pub struct CorrelationEngine;

impl CorrelationEngine {
    /// Compute all diagenesis-pair correlations over a dataset.
    ///
    /// For each pair, rows qualify only when BOTH elements are strictly
    /// positive: 0.0 encodes "not detected", and co-absence would bias r
    /// toward spurious agreement. Pairs with fewer than
    /// [`MIN_PAIR_SAMPLES`] qualifying rows are omitted, not errored.
    /// Output preserves pair-table order.
    pub fn analyze(readings: &[ElementReading]) -> Vec<CorrelationResult> {
        let mut results = Vec::with_capacity(DIAGENESIS_PAIRS.len());

        for pair in &DIAGENESIS_PAIRS {
            let (xs, ys): (Vec<f64>, Vec<f64>) = readings
                .iter()
                .filter(|r| r.detected(pair.x) && r.detected(pair.y))
                .map(|r| (r.value_of(pair.x), r.value_of(pair.y)))
                .unzip();

            let n = xs.len();
            if n < MIN_PAIR_SAMPLES {
                tracing::debug!(
                    pair = %pair.pair_name(),
                    n,
                    "Skipping pair: insufficient co-detected rows"
                );
                continue;
            }

            let r = Self::pearson(&xs, &ys);
            let p_value = Self::p_value_for_r(r, n);

            let significant = match pair.expected {
                ExpectedDirection::Positive => r > pair.threshold.abs(),
                ExpectedDirection::Negative => r < pair.threshold,
            };

            results.push(CorrelationResult {
                element_x: pair.x,
                element_y: pair.y,
                pair_name: pair.pair_name(),
                pearson_r: r,
                r_squared: r * r,
                p_value,
                n,
                significant,
                expected: pair.expected,
                threshold: pair.threshold,
            });
        }

        results
    }

    /// Pearson correlation coefficient.
    ///
    /// Formula: r = [n·Σxy − Σx·Σy] / sqrt([n·Σx² − (Σx)²][n·Σy² − (Σy)²])
    fn pearson(x: &[f64], y: &[f64]) -> f64 {
        let n = x.len() as f64;
        let sum_x: f64 = x.iter().sum();
        let sum_y: f64 = y.iter().sum();
        let sum_xy: f64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();
        let sum_x2: f64 = x.iter().map(|a| a * a).sum();
        let sum_y2: f64 = y.iter().map(|a| a * a).sum();

        let numerator = n * sum_xy - sum_x * sum_y;
        let denominator = ((n * sum_x2 - sum_x.powi(2)) * (n * sum_y2 - sum_y.powi(2))).sqrt();

        if denominator == 0.0 {
            0.0
        } else {
            numerator / denominator
        }
    }

    /// Two-tailed p-value from Student's t with n-2 degrees of freedom.
    ///
    /// Formula: t = r·sqrt(n−2) / sqrt(1−r²)
    fn p_value_for_r(r: f64, n: usize) -> f64 {
        if n < MIN_PAIR_SAMPLES {
            return 1.0;
        }

        // Perfect or near-perfect correlation saturates the t statistic
        if r.abs() >= 0.9999 {
            return 0.0;
        }

        let df = (n - 2) as f64;
        let t_stat = r * df.sqrt() / (1.0 - r * r).sqrt();

        match StudentsT::new(0.0, 1.0, df) {
            Ok(t_dist) => 2.0 * (1.0 - t_dist.cdf(t_stat.abs())),
            Err(_) => 1.0,
        }
    }
}
