//! Error types for heavy-tailed distribution fitting
//!
//! Numerical degeneracy (too few samples, infeasible parameters, noisy cutoff
//! searches) is reported through sentinel values, never through this type.
//! Errors are reserved for inputs a caller can fix.

use thiserror::Error;

/// Core error type for fitting operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Errors bubbled up from collaborators such as the minimizer
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }

    /// Create an error for an unusable lower cutoff
    pub fn invalid_xmin(xmin: f64) -> Self {
        Self::InvalidParameter(format!("xmin {xmin} must be finite and positive"))
    }

    /// Create an error for an upper cutoff below the lower one
    pub fn invalid_xmax(xmin: f64, xmax: f64) -> Self {
        Self::InvalidParameter(format!(
            "xmax {xmax} must be finite and not below xmin {xmin}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("alpha must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: alpha must be positive");

        let err = Error::InvalidInput("empty sample".to_string());
        assert_eq!(err.to_string(), "Invalid input: empty sample");

        let err = Error::Computation("zeta diverged".to_string());
        assert_eq!(err.to_string(), "Computation error: zeta diverged");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::non_finite("sample");
        assert_eq!(
            err.to_string(),
            "Invalid input: sample contains NaN or infinite values"
        );

        let err = Error::invalid_xmin(-1.0);
        assert_eq!(
            err.to_string(),
            "Invalid parameter: xmin -1 must be finite and positive"
        );

        let err = Error::invalid_xmax(5.0, 2.0);
        assert!(err.to_string().contains("xmax 2"));
        assert!(err.to_string().contains("xmin 5"));
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("simplex collapsed");
        let err: Error = anyhow_err.into();

        match err {
            Error::Other(_) => {
                assert!(err.to_string().contains("simplex collapsed"));
            }
            _ => panic!("Wrong error type"),
        }
    }
}
