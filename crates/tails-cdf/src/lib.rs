//! Empirical distributions for heavy-tailed samples
//!
//! This crate turns raw samples into the empirical cumulative distribution
//! used by the Kolmogorov-Smirnov distance, and into log-binned density
//! histograms for plotting collaborators.
//!
//! Integer-valued samples get a CDF over unit-width bins spanning
//! `[xmin, xmax]`; real-valued samples get the rank-based CDF `i / n` at each
//! sorted observation. In both cases the value at a bin is the fraction of
//! samples strictly below it.
//!
//! # Examples
//!
//! ```rust
//! use tails_cdf::{cumulative_distribution, CdfOptions};
//!
//! let data = vec![1.0, 2.0, 2.0, 3.0, 4.0];
//! let cdf = cumulative_distribution(&data, &CdfOptions::new());
//! assert_eq!(cdf.bins(), &[1.0, 2.0, 3.0, 4.0]);
//! assert_eq!(cdf.values(), &[0.0, 0.2, 0.6, 0.8]);
//!
//! let survival = cumulative_distribution(&data, &CdfOptions::new().survival());
//! assert_eq!(survival.values()[0], 1.0);
//! assert!(survival.is_survival());
//! ```

pub mod builders;
pub mod traits;
pub mod types;

pub use builders::{is_discrete, LogBinBuilder, RankBuilder, UnitBinBuilder};
pub use traits::CdfBuilder;
pub use types::{EmpiricalCdf, LogHistogram};

use tails_core::{Cutoffs, Regime};

/// Options recognized by [`cumulative_distribution`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CdfOptions {
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    /// Return 1 - CDF instead of the CDF
    pub survival: bool,
    /// Force a regime instead of detecting it from integrality
    pub regime: Option<Regime>,
}

impl CdfOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_xmin(mut self, xmin: f64) -> Self {
        self.xmin = Some(xmin);
        self
    }

    pub fn with_xmax(mut self, xmax: f64) -> Self {
        self.xmax = Some(xmax);
        self
    }

    pub fn survival(mut self) -> Self {
        self.survival = true;
        self
    }

    pub fn with_regime(mut self, regime: Regime) -> Self {
        self.regime = Some(regime);
        self
    }
}

/// Build the empirical CDF (or survival function) of a sample
///
/// Empty or all-zero input yields the trivial single point `([0], [0])`.
pub fn cumulative_distribution(data: &[f64], options: &CdfOptions) -> EmpiricalCdf {
    if data.iter().all(|&x| x == 0.0) {
        return EmpiricalCdf::trivial();
    }

    let regime = options.regime.unwrap_or_else(|| Regime::detect(data));
    let cdf = match regime {
        Regime::Discrete => {
            let mut builder = UnitBinBuilder::new();
            if let Some(xmin) = options.xmin {
                builder = builder.with_xmin(xmin);
            }
            if let Some(xmax) = options.xmax {
                builder = builder.with_xmax(xmax);
            }
            builder.build(data)
        }
        Regime::Continuous => {
            let mut builder = RankBuilder::new();
            if options.xmin.is_some() || options.xmax.is_some() {
                let xmin = options.xmin.unwrap_or(f64::NEG_INFINITY);
                builder = builder.with_cutoffs(Cutoffs::bounded(xmin, options.xmax));
            }
            builder.build(data)
        }
    };

    if options.survival {
        cdf.into_survival()
    } else {
        cdf
    }
}

/// Density histogram over logarithmic bins spanning `[min, max]`
///
/// Missing bounds default to the smallest and largest positive sample.
pub fn log_histogram(data: &[f64], min: Option<f64>, max: Option<f64>) -> LogHistogram {
    let mut builder = LogBinBuilder::new();
    if let Some(min) = min {
        builder = builder.with_min(min);
    }
    if let Some(max) = max {
        builder = builder.with_max(max);
    }
    builder.build(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_zero_is_trivial() {
        let cdf = cumulative_distribution(&[0.0, 0.0], &CdfOptions::new());
        assert_eq!(cdf.into_parts(), (vec![0.0], vec![0.0]));
        let cdf = cumulative_distribution(&[], &CdfOptions::new().survival());
        assert_eq!(cdf.into_parts(), (vec![0.0], vec![0.0]));
    }

    #[test]
    fn test_regime_detection() {
        let discrete = cumulative_distribution(&[1.0, 3.0], &CdfOptions::new());
        assert_eq!(discrete.bins(), &[1.0, 2.0, 3.0]);

        let continuous = cumulative_distribution(&[1.0, 3.5], &CdfOptions::new());
        assert_eq!(continuous.bins(), &[1.0, 3.5]);
    }

    #[test]
    fn test_forced_regime() {
        let cdf = cumulative_distribution(
            &[1.0, 3.0],
            &CdfOptions::new().with_regime(Regime::Continuous),
        );
        assert_eq!(cdf.bins(), &[1.0, 3.0]);
        assert_eq!(cdf.values(), &[0.0, 0.5]);
    }

    #[test]
    fn test_continuous_cutoffs() {
        let data = [0.5, 1.5, 2.5, 3.5, 9.5];
        let cdf = cumulative_distribution(&data, &CdfOptions::new().with_xmin(1.0).with_xmax(4.0));
        assert_eq!(cdf.bins(), &[1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_log_histogram_bounds() {
        let hist = log_histogram(&[1.0, 10.0, 100.0], Some(1.0), Some(100.0));
        assert_eq!(hist.edges.first(), Some(&1.0));
        assert_eq!(hist.edges.last(), Some(&100.0));
    }
}
