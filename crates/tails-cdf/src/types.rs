//! Core types for empirical distribution representation

use serde::{Deserialize, Serialize};
use std::fmt;

/// An empirical cumulative (or survival) distribution
///
/// `values[i]` is the fraction of samples strictly below `bins[i]`, or one
/// minus that fraction for a survival function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpiricalCdf {
    values: Vec<f64>,
    bins: Vec<f64>,
    survival: bool,
}

impl EmpiricalCdf {
    /// Create a new empirical CDF from matching value/bin vectors
    pub fn new(values: Vec<f64>, bins: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), bins.len());
        Self {
            values,
            bins,
            survival: false,
        }
    }

    /// The single-point result returned for empty or all-zero input
    pub fn trivial() -> Self {
        Self::new(vec![0.0], vec![0.0])
    }

    /// Flip into the survival function 1 - CDF
    pub fn into_survival(mut self) -> Self {
        for v in &mut self.values {
            *v = 1.0 - *v;
        }
        self.survival = !self.survival;
        self
    }

    /// Cumulative (or survival) values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Points at which the values are evaluated
    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    /// Whether this holds 1 - CDF
    pub fn is_survival(&self) -> bool {
        self.survival
    }

    /// Get the number of points
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the distribution is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Split into `(values, bins)`
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.values, self.bins)
    }
}

impl fmt::Display for EmpiricalCdf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.survival { "Survival" } else { "CDF" };
        match (self.bins.first(), self.bins.last()) {
            (Some(lo), Some(hi)) => write!(
                f,
                "{}({} points, range=[{:.3}, {:.3}])",
                kind,
                self.len(),
                lo,
                hi
            ),
            _ => write!(f, "{kind}(empty)"),
        }
    }
}

/// A density histogram over logarithmically spaced edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogHistogram {
    /// Density per bin: count / (total count * bin width)
    pub densities: Vec<f64>,
    /// Bin edges, one more than the number of densities
    pub edges: Vec<f64>,
}

impl LogHistogram {
    /// Get the number of bins
    pub fn len(&self) -> usize {
        self.densities.len()
    }

    /// Check if the histogram is empty
    pub fn is_empty(&self) -> bool {
        self.densities.is_empty()
    }

    /// Geometric bin centers, the natural abscissa on log-log axes
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] * w[1]).sqrt()).collect()
    }
}
