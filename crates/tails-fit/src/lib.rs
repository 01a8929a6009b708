//! Fitting and comparing heavy-tailed distributions
//!
//! This crate fits four families to the tail of a sample:
//!
//! - **Power law**: p(x) ∝ x^(-α)
//! - **Truncated power law**: p(x) ∝ x^(-α) e^(-γx)
//! - **Exponential**: p(x) ∝ e^(-γx)
//! - **Lognormal**: ln x ~ N(μ, σ²)
//!
//! Each family has a continuous density and a discrete mass function,
//! selected once per call through [`likelihood::RegimeStrategy`]. Parameters
//! are fitted by maximum likelihood (closed form for the continuous power
//! law, Nelder-Mead otherwise) or by minimizing the Kolmogorov-Smirnov
//! distance. The lower cutoff is either given or found by
//! [`XminSelector`], and competing fits are ranked with a log-likelihood
//! ratio test.
//!
//! Numerical trouble never aborts a fit. Infeasible parameters get a floor
//! likelihood, tails with fewer than two samples get sentinel scores, and an
//! unstable cutoff search sets a noise flag. Only malformed input (NaN
//! samples, a non-positive `xmin`) is reported as an error.
//!
//! # Examples
//!
//! ```rust
//! use tails_fit::{fit_all, Family, FitConfig};
//!
//! let data = [1.0, 2.0, 2.0, 3.0, 4.0, 5.0, 7.0, 10.0, 15.0, 20.0, 30.0, 50.0, 80.0, 130.0];
//! let report = fit_all(&data, &FitConfig::for_data(&data).with_xmin(2.0)).unwrap();
//!
//! let power_law = report.fit(Family::PowerLaw).unwrap();
//! assert!(power_law.parameters()[0] > 1.0);
//! assert!(report.power_law_comparison.contains_key(&Family::Lognormal));
//! ```
//!
//! # Features
//!
//! - `parallel`: evaluate candidate cutoffs concurrently with rayon

pub mod compare;
pub mod config;
pub mod distribution;
pub mod fitter;
pub mod ks;
pub mod likelihood;
pub mod optimizer;
pub mod report;
pub mod xmin;

pub use compare::{compare, loglikelihood_ratio, Comparison};
pub use config::{FitConfig, XminChoice};
pub use distribution::{Distribution, Family};
pub use fitter::{Fit, Fitter};
pub use ks::{ks_distance, power_law_ks_distance, KsDistance};
pub use likelihood::Evaluator;
pub use optimizer::{nelder_mead, Minimum, OptimizerConfig};
pub use report::{find_xmin, fit, fit_all, FitReport};
pub use xmin::{XminSearch, XminSelector, NOISE_THRESHOLD};

pub use tails_core::{Cutoffs, Error, Regime, Result, SearchMethod};

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        compare, find_xmin, fit, fit_all, ks_distance, Comparison, Distribution, Evaluator,
        Family, Fit, FitConfig, FitReport, Fitter, KsDistance, XminChoice, XminSearch,
    };
    pub use tails_core::{Cutoffs, Regime, SearchMethod};
}
