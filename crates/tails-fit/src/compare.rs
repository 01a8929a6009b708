//! Vuong-style log-likelihood ratio test between two fitted families

use crate::distribution::Distribution;
use crate::likelihood::Evaluator;
use serde::{Deserialize, Serialize};
use tails_core::math::erfc;
use tails_core::{Cutoffs, Regime, SENTINEL_RATIO};

/// Signed log-likelihood ratio and its two-sided significance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Σ(ln ℓ1 - ln ℓ2); positive favors the first model
    pub ratio: f64,
    /// Probability of a ratio this far from zero by chance
    pub p_value: f64,
}

impl Comparison {
    /// Reported when the first model's fit could not be attempted
    pub fn sentinel() -> Self {
        Self {
            ratio: SENTINEL_RATIO,
            p_value: 1.0,
        }
    }

    pub fn favors_first(&self) -> bool {
        self.ratio > 0.0
    }

    /// Whether the sign of the ratio is trustworthy at `level`
    pub fn is_significant(&self, level: f64) -> bool {
        self.p_value < level
    }

    /// The same test with the models swapped
    pub fn reversed(&self) -> Self {
        Self {
            ratio: -self.ratio,
            p_value: self.p_value,
        }
    }
}

/// Compare two per-sample likelihood vectors over the same samples
///
/// With σ the population standard deviation of the pointwise log
/// differences, p = erfc(|R| / (√(2n)·σ)). An undefined p (no samples, or
/// identical models) reads as 1.
pub fn loglikelihood_ratio(likelihoods1: &[f64], likelihoods2: &[f64]) -> Comparison {
    debug_assert_eq!(likelihoods1.len(), likelihoods2.len());
    let diffs: Vec<f64> = likelihoods1
        .iter()
        .zip(likelihoods2)
        .map(|(a, b)| a.ln() - b.ln())
        .collect();
    if diffs.is_empty() {
        return Comparison {
            ratio: 0.0,
            p_value: 1.0,
        };
    }

    let n = diffs.len() as f64;
    let ratio: f64 = diffs.iter().sum();
    let mean = ratio / n;
    let sigma = (diffs.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n).sqrt();

    let z = ratio.abs() / ((2.0 * n).sqrt() * sigma);
    let p_value = if z.is_nan() { 1.0 } else { erfc(z) };
    Comparison { ratio, p_value }
}

/// Compare two distributions on the samples of `data` inside the cutoffs
pub fn compare(
    data: &[f64],
    first: &Distribution,
    second: &Distribution,
    regime: Regime,
    cutoffs: Cutoffs,
) -> Comparison {
    let evaluator = Evaluator::new(regime, cutoffs);
    let tail = cutoffs.filter(data);
    compare_tail(&evaluator, &tail, first, second)
}

pub(crate) fn compare_tail(
    evaluator: &Evaluator,
    tail: &[f64],
    first: &Distribution,
    second: &Distribution,
) -> Comparison {
    loglikelihood_ratio(
        &evaluator.tail_likelihoods(first, tail),
        &evaluator.tail_likelihoods(second, tail),
    )
}
