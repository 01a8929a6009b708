//! Core traits for empirical CDF building

use crate::types::EmpiricalCdf;
use tails_core::sample;

/// Trait for building empirical CDFs from sample data
pub trait CdfBuilder {
    /// Build a CDF from pre-sorted data
    fn build_sorted(&self, sorted_sample: &[f64]) -> EmpiricalCdf;

    /// Build a CDF from the given sample
    ///
    /// Default implementation sorts a copy only when the sample is unsorted.
    fn build(&self, sample: &[f64]) -> EmpiricalCdf {
        self.build_sorted(&sample::sorted(sample))
    }
}
