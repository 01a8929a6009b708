//! Utility functions for working with sample slices

use crate::error::{Error, Result};
use crate::types::LIKELIHOOD_FLOOR;
use ordered_float::OrderedFloat;
use std::borrow::Cow;

/// Reject samples containing NaN or infinite values
pub fn ensure_finite(data: &[f64], context: &str) -> Result<()> {
    if data.iter().any(|x| !x.is_finite()) {
        return Err(Error::non_finite(context));
    }
    Ok(())
}

/// Whether every sample is integer-valued
///
/// # Examples
///
/// ```rust
/// use tails_core::sample::is_integral;
///
/// assert!(is_integral(&[1.0, 4.0, 100.0]));
/// assert!(!is_integral(&[1.0, 4.5]));
/// ```
pub fn is_integral(data: &[f64]) -> bool {
    data.iter().all(|x| x.floor() == *x)
}

/// Whether the slice is in non-decreasing order
pub fn is_sorted(data: &[f64]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

/// Borrow the data when already sorted, otherwise sort a copy
///
/// # Examples
///
/// ```rust
/// use tails_core::sample::sorted;
///
/// let data = vec![3.0, 1.0, 5.0, 2.0, 4.0];
/// assert_eq!(sorted(&data).as_ref(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn sorted(data: &[f64]) -> Cow<'_, [f64]> {
    if is_sorted(data) {
        Cow::Borrowed(data)
    } else {
        let mut owned = data.to_vec();
        owned.sort_by_key(|&x| OrderedFloat(x));
        Cow::Owned(owned)
    }
}

/// Distinct values of a sorted slice with the index of their first occurrence
///
/// # Examples
///
/// ```rust
/// use tails_core::sample::distinct_with_first_index;
///
/// let (values, indices) = distinct_with_first_index(&[1.0, 1.0, 2.0, 5.0, 5.0]);
/// assert_eq!(values, vec![1.0, 2.0, 5.0]);
/// assert_eq!(indices, vec![0, 2, 3]);
/// ```
pub fn distinct_with_first_index(sorted: &[f64]) -> (Vec<f64>, Vec<usize>) {
    let mut values = Vec::new();
    let mut indices = Vec::new();
    for (i, &x) in sorted.iter().enumerate() {
        if values.last().map_or(true, |&last| OrderedFloat(last) != OrderedFloat(x)) {
            values.push(x);
            indices.push(i);
        }
    }
    (values, indices)
}

/// Calculate the mean of a slice
///
/// Returns 0.0 for empty slices.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Population standard deviation (divides by `n`)
///
/// Returns 0.0 for empty slices.
pub fn population_std_dev(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    let variance = data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / data.len() as f64;
    variance.sqrt()
}

/// Replace zero, negative or non-finite likelihoods with [`LIKELIHOOD_FLOOR`]
pub fn floor_likelihoods(likelihoods: &mut [f64]) {
    for l in likelihoods.iter_mut() {
        if !(l.is_finite() && *l > 0.0) {
            *l = LIKELIHOOD_FLOOR;
        }
    }
}

/// Sum of log-likelihoods
pub fn loglikelihood(likelihoods: &[f64]) -> f64 {
    likelihoods.iter().map(|l| l.ln()).sum()
}
