//! Core types and numerics for fitting heavy-tailed distributions
//!
//! This crate holds the pieces shared by the CDF builder and the fitting
//! engine:
//!
//! - **Value types**: [`Regime`], [`SearchMethod`] and [`Cutoffs`]
//! - **Sample utilities**: sortedness, integrality, distinct cutoffs, moments
//! - **Special functions**: Hurwitz zeta, upper incomplete gamma for any real
//!   shape, complementary error function
//! - **Numeric floors**: the likelihood floor and the sentinel values used
//!   instead of errors when a fit degenerates
//!
//! # Example
//!
//! ```rust
//! use tails_core::{math::hurwitz_zeta, Cutoffs, Regime};
//!
//! let data = vec![1.0, 2.0, 2.0, 3.0, 8.0];
//! assert_eq!(Regime::detect(&data), Regime::Discrete);
//!
//! let tail = Cutoffs::new(2.0).filter(&data);
//! assert_eq!(tail.len(), 4);
//!
//! // Normalization of a discrete power law starting at 2
//! let norm = hurwitz_zeta(2.5, 2.0);
//! assert!(norm > 0.0);
//! ```

pub mod error;
pub mod math;
pub mod sample;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    Cutoffs, Regime, SearchMethod, LIKELIHOOD_FLOOR, SENTINEL_LOGLIKELIHOOD, SENTINEL_RATIO,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
