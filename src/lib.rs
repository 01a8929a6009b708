//! Heavy-tailed distribution fitting
//!
//! Facade over the workspace crates:
//!
//! - [`tails_core`]: error type, regimes, cutoffs, sample helpers and special functions
//! - [`tails_cdf`]: empirical CDFs and log-binned histograms
//! - [`tails_fit`]: likelihoods, KS distances, cutoff search and ratio tests
//!
//! # Examples
//!
//! ```rust
//! use heavy_tails::prelude::*;
//!
//! let data = [1.2, 1.9, 2.5, 3.3, 4.1, 6.8, 9.7, 15.2, 28.4, 61.0];
//! let fit = fit(&data, Family::PowerLaw, &FitConfig::default().with_xmin(1.0)).unwrap();
//! assert!(fit.parameters()[0] > 1.0);
//! ```

pub use tails_cdf;
pub use tails_core;
pub use tails_fit;

pub use tails_cdf::{cumulative_distribution, is_discrete, log_histogram, CdfOptions, EmpiricalCdf, LogHistogram};
pub use tails_core::{Cutoffs, Error, Regime, Result, SearchMethod};
pub use tails_fit::{
    compare, find_xmin, fit, fit_all, Comparison, Distribution, Family, Fit, FitConfig, FitReport,
    KsDistance, XminChoice, XminSearch,
};

/// Convenient imports for common usage
pub mod prelude {
    pub use tails_cdf::{cumulative_distribution, log_histogram, CdfOptions};
    pub use tails_fit::prelude::*;
}
