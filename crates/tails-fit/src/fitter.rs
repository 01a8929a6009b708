//! Parameter fitting for a single family at fixed cutoffs

use crate::compare::{compare_tail, Comparison};
use crate::distribution::{power_law_alpha, Distribution, Family};
use crate::ks::ks_distance;
use crate::likelihood::Evaluator;
use crate::optimizer::{nelder_mead, OptimizerConfig};
use serde::{Deserialize, Serialize};
use tails_core::{Cutoffs, Regime, SearchMethod, SENTINEL_LOGLIKELIHOOD};
use tracing::{debug, warn};

/// Outcome of fitting one family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fit {
    pub distribution: Distribution,
    /// Log-likelihood under [`SearchMethod::Likelihood`], KS distance under
    /// [`SearchMethod::Ks`]
    pub score: f64,
    pub search_method: SearchMethod,
    /// Samples inside the cutoffs
    pub n_tail: usize,
    /// Power law at the comparison exponent against this fit
    pub comparison: Option<Comparison>,
}

impl Fit {
    pub fn parameters(&self) -> Vec<f64> {
        self.distribution.parameters()
    }

    pub fn family(&self) -> Family {
        self.distribution.family()
    }

    /// The achieved log-likelihood, when that is what was optimized
    pub fn loglikelihood(&self) -> Option<f64> {
        match self.search_method {
            SearchMethod::Likelihood => Some(self.score),
            SearchMethod::Ks => None,
        }
    }

    /// Whether too few samples were left to fit anything
    pub fn is_degenerate(&self) -> bool {
        self.n_tail < 2
    }
}

/// Fits families at fixed cutoffs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fitter {
    pub regime: Regime,
    pub cutoffs: Cutoffs,
    pub method: SearchMethod,
    pub optimizer: OptimizerConfig,
}

impl Fitter {
    pub fn new(regime: Regime, cutoffs: Cutoffs) -> Self {
        Self {
            regime,
            cutoffs,
            method: SearchMethod::default(),
            optimizer: OptimizerConfig::default(),
        }
    }

    pub fn with_method(mut self, method: SearchMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    fn evaluator(&self) -> Evaluator {
        Evaluator::new(self.regime, self.cutoffs)
    }

    /// Fit `family` to the samples of `data` inside the cutoffs
    ///
    /// When `comparison_alpha` is given, the fit also carries the ratio test
    /// of a power law with that exponent against the fitted distribution.
    pub fn fit(&self, data: &[f64], family: Family, comparison_alpha: Option<f64>) -> Fit {
        let tail = self.cutoffs.filter(data);
        self.fit_tail(&tail, family, comparison_alpha)
    }

    /// [`Fitter::fit`] on samples already restricted to the cutoffs
    pub fn fit_tail(&self, tail: &[f64], family: Family, comparison_alpha: Option<f64>) -> Fit {
        if tail.len() < 2 {
            return self.degenerate(family, tail.len(), comparison_alpha);
        }

        let (distribution, score) = match self.method {
            SearchMethod::Likelihood
                if family == Family::PowerLaw
                    && self.regime == Regime::Continuous
                    && self.cutoffs.xmax.is_none() =>
            {
                debug!(n = tail.len(), "closed-form power law");
                self.closed_form_power_law(tail)
            }
            SearchMethod::Likelihood => self.maximize_likelihood(tail, family),
            SearchMethod::Ks => self.minimize_ks(tail, family),
        };

        let comparison = comparison_alpha.map(|alpha| {
            compare_tail(
                &self.evaluator(),
                tail,
                &Distribution::PowerLaw { alpha },
                &distribution,
            )
        });

        Fit {
            distribution,
            score,
            search_method: self.method,
            n_tail: tail.len(),
            comparison,
        }
    }

    fn degenerate(&self, family: Family, n_tail: usize, comparison_alpha: Option<f64>) -> Fit {
        let score = match self.method {
            SearchMethod::Likelihood => SENTINEL_LOGLIKELIHOOD,
            SearchMethod::Ks => 1.0,
        };
        Fit {
            distribution: Distribution::from_parameters(family, &[]),
            score,
            search_method: self.method,
            n_tail,
            comparison: comparison_alpha.map(|_| Comparison::sentinel()),
        }
    }

    /// Exact MLE of a continuous power law unbounded above
    ///
    /// The log-likelihood n·ln(α-1) - n·ln(xmin) - α·Σln(x/xmin) reads as 0
    /// when undefined.
    pub fn closed_form_power_law(&self, tail: &[f64]) -> (Distribution, f64) {
        let xmin = self.cutoffs.xmin;
        let n = tail.len() as f64;
        let log_sum: f64 = tail.iter().map(|x| (x / xmin).ln()).sum();
        let alpha = power_law_alpha(tail, xmin);
        let loglikelihood = n * (alpha - 1.0).ln() - n * xmin.ln() - alpha * log_sum;
        let loglikelihood = if loglikelihood.is_nan() { 0.0 } else { loglikelihood };
        (Distribution::PowerLaw { alpha }, loglikelihood)
    }

    /// Minimize the negative log-likelihood from the moment-based guess
    pub fn maximize_likelihood(&self, tail: &[f64], family: Family) -> (Distribution, f64) {
        let evaluator = self.evaluator();
        let objective = |p: &[f64]| {
            -evaluator.loglikelihood(&Distribution::from_parameters(family, p), tail)
        };
        let (distribution, value) = self.minimize(family, tail, objective);
        (distribution, -value)
    }

    /// Minimize the KS distance of the family itself
    ///
    /// Infeasible parameters score the maximal distance 1.
    pub fn minimize_ks(&self, tail: &[f64], family: Family) -> (Distribution, f64) {
        let objective = |p: &[f64]| {
            ks_distance(tail, &Distribution::from_parameters(family, p), self.regime, self.cutoffs)
                .distance()
        };
        self.minimize(family, tail, objective)
    }

    fn minimize<F>(&self, family: Family, tail: &[f64], objective: F) -> (Distribution, f64)
    where
        F: Fn(&[f64]) -> f64,
    {
        let initial = family.initial_guess(tail, self.cutoffs.xmin);
        match nelder_mead(&objective, &initial, &self.optimizer) {
            Ok(min) => (Distribution::from_parameters(family, &min.params), min.value),
            Err(err) => {
                warn!(%family, ?initial, error = %err, "minimizer failed, keeping initial guess");
                let value = objective(&initial);
                (Distribution::from_parameters(family, &initial), value)
            }
        }
    }
}
