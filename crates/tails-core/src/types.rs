//! Shared value types for fitting heavy-tailed distributions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest likelihood ever handed to a logarithm.
///
/// Infeasible parameters and underflowing densities are replaced with this
/// value so summed log-likelihoods stay finite.
pub const LIKELIHOOD_FLOOR: f64 = f64::MIN_POSITIVE;

/// Log-likelihood reported for fits that could not be attempted.
pub const SENTINEL_LOGLIKELIHOOD: f64 = -f64::MAX;

/// Log-likelihood ratio reported when a comparison could not be attempted.
pub const SENTINEL_RATIO: f64 = f64::MAX;

/// Whether samples are treated as integers or reals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Real-valued samples with closed-form densities
    #[default]
    Continuous,
    /// Integer-valued samples with sum-normalized mass functions
    Discrete,
}

impl Regime {
    /// Pick the regime from the data: integral samples are discrete
    pub fn detect(data: &[f64]) -> Self {
        if crate::sample::is_integral(data) {
            Self::Discrete
        } else {
            Self::Continuous
        }
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::Discrete)
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continuous => write!(f, "continuous"),
            Self::Discrete => write!(f, "discrete"),
        }
    }
}

/// Objective used when searching for parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMethod {
    /// Maximize the summed log-likelihood
    #[default]
    Likelihood,
    /// Minimize the Kolmogorov-Smirnov distance
    Ks,
}

/// Lower and optional upper cutoff bounding the fitted range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cutoffs {
    pub xmin: f64,
    pub xmax: Option<f64>,
}

impl Cutoffs {
    /// Cutoffs unbounded above
    pub fn new(xmin: f64) -> Self {
        Self { xmin, xmax: None }
    }

    /// Add an upper cutoff
    pub fn with_xmax(mut self, xmax: f64) -> Self {
        self.xmax = Some(xmax);
        self
    }

    /// Build from an optional upper cutoff
    pub fn bounded(xmin: f64, xmax: Option<f64>) -> Self {
        Self { xmin, xmax }
    }

    /// Reject cutoffs no fit could use
    pub fn validate(&self) -> Result<()> {
        if !self.xmin.is_finite() || self.xmin <= 0.0 {
            return Err(Error::invalid_xmin(self.xmin));
        }
        if let Some(xmax) = self.xmax {
            if !xmax.is_finite() || xmax < self.xmin {
                return Err(Error::invalid_xmax(self.xmin, xmax));
            }
        }
        Ok(())
    }

    /// Whether a value falls inside `[xmin, xmax]`
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.xmin && self.xmax.map_or(true, |xmax| x <= xmax)
    }

    /// Keep only the samples inside the cutoffs, preserving order
    pub fn filter(&self, data: &[f64]) -> Vec<f64> {
        data.iter().copied().filter(|&x| self.contains(x)).collect()
    }

    /// Upper cutoff, falling back to the largest retained sample
    pub fn xmax_or_max(&self, filtered: &[f64]) -> f64 {
        self.xmax
            .unwrap_or_else(|| filtered.iter().copied().fold(self.xmin, f64::max))
    }
}
