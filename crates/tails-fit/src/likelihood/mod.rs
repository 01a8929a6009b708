//! Per-sample likelihoods and theoretical CDFs for every family
//!
//! Each regime is a [`RegimeStrategy`] picked once per call by [`strategy`];
//! the [`Evaluator`] binds a regime to a pair of cutoffs and applies the
//! feasibility floor shared by both.

mod continuous;
mod discrete;

pub use continuous::ContinuousStrategy;
pub use discrete::DiscreteStrategy;

use crate::distribution::Distribution;
use tails_core::{sample, Cutoffs, Regime, LIKELIHOOD_FLOOR};

/// Density and cumulative distribution of every family in one regime
pub trait RegimeStrategy: Sync {
    /// Per-sample likelihoods of `tail`, which lies inside the cutoffs
    ///
    /// Parameters are assumed feasible. Entries may still underflow to zero;
    /// the caller floors them.
    fn likelihoods(&self, dist: &Distribution, tail: &[f64], cutoffs: &Cutoffs) -> Vec<f64>;

    /// Probability of drawing a value strictly below each point
    ///
    /// `points` are sorted and lie inside the cutoffs.
    fn cdf(&self, dist: &Distribution, points: &[f64], cutoffs: &Cutoffs) -> Vec<f64>;
}

/// Strategy for a regime
pub fn strategy(regime: Regime) -> &'static dyn RegimeStrategy {
    match regime {
        Regime::Continuous => &ContinuousStrategy,
        Regime::Discrete => &DiscreteStrategy,
    }
}

/// Likelihood evaluation bound to a regime and cutoffs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluator {
    pub regime: Regime,
    pub cutoffs: Cutoffs,
}

impl Evaluator {
    pub fn new(regime: Regime, cutoffs: Cutoffs) -> Self {
        Self { regime, cutoffs }
    }

    /// Likelihoods of the samples of `data` inside the cutoffs
    ///
    /// The output has one strictly positive entry per retained sample.
    pub fn likelihoods(&self, dist: &Distribution, data: &[f64]) -> Vec<f64> {
        let tail = self.cutoffs.filter(data);
        self.tail_likelihoods(dist, &tail)
    }

    /// Likelihoods of samples already restricted to the cutoffs
    pub fn tail_likelihoods(&self, dist: &Distribution, tail: &[f64]) -> Vec<f64> {
        if !dist.is_feasible(self.cutoffs.xmin) {
            return vec![LIKELIHOOD_FLOOR; tail.len()];
        }
        let mut likelihoods = strategy(self.regime).likelihoods(dist, tail, &self.cutoffs);
        sample::floor_likelihoods(&mut likelihoods);
        likelihoods
    }

    /// Summed log-likelihood of samples already restricted to the cutoffs
    pub fn loglikelihood(&self, dist: &Distribution, tail: &[f64]) -> f64 {
        sample::loglikelihood(&self.tail_likelihoods(dist, tail))
    }

    /// Theoretical CDF at sorted points inside the cutoffs
    ///
    /// Values are clamped to `[0, 1]`; infeasible parameters give NaN.
    pub fn cdf(&self, dist: &Distribution, points: &[f64]) -> Vec<f64> {
        if !dist.is_feasible(self.cutoffs.xmin) {
            return vec![f64::NAN; points.len()];
        }
        strategy(self.regime)
            .cdf(dist, points, &self.cutoffs)
            .into_iter()
            .map(|c| if c.is_nan() { c } else { c.clamp(0.0, 1.0) })
            .collect()
    }
}
