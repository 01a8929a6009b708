//! Distribution families and their parameterizations

use serde::{Deserialize, Serialize};
use std::fmt;
use tails_core::sample;

/// The four supported families
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    PowerLaw,
    TruncatedPowerLaw,
    Exponential,
    Lognormal,
}

impl Family {
    /// Every family, in reporting order
    pub const ALL: [Family; 4] = [
        Family::PowerLaw,
        Family::TruncatedPowerLaw,
        Family::Exponential,
        Family::Lognormal,
    ];

    /// Snake-case name used as a report key
    pub fn name(&self) -> &'static str {
        match self {
            Self::PowerLaw => "power_law",
            Self::TruncatedPowerLaw => "truncated_power_law",
            Self::Exponential => "exponential",
            Self::Lognormal => "lognormal",
        }
    }

    /// Number of free parameters
    pub fn n_parameters(&self) -> usize {
        match self {
            Self::PowerLaw | Self::Exponential => 1,
            Self::TruncatedPowerLaw | Self::Lognormal => 2,
        }
    }

    /// Moment-style starting point for the minimizer
    ///
    /// `tail` holds the samples already restricted to the cutoffs.
    pub fn initial_guess(&self, tail: &[f64], xmin: f64) -> Vec<f64> {
        match self {
            Self::PowerLaw => vec![power_law_alpha(tail, xmin)],
            Self::TruncatedPowerLaw => {
                vec![power_law_alpha(tail, xmin), 1.0 / sample::mean(tail)]
            }
            Self::Exponential => vec![1.0 / sample::mean(tail)],
            Self::Lognormal => {
                let logs: Vec<f64> = tail.iter().map(|x| x.ln()).collect();
                vec![sample::mean(&logs), sample::population_std_dev(&logs)]
            }
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed-form maximum-likelihood exponent of a continuous power law
///
/// α = 1 + n / Σ ln(x / xmin)
pub fn power_law_alpha(tail: &[f64], xmin: f64) -> f64 {
    let log_sum: f64 = tail.iter().map(|x| (x / xmin).ln()).sum();
    1.0 + tail.len() as f64 / log_sum
}

/// A family together with its parameter values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Distribution {
    /// p(x) ∝ x^(-α)
    PowerLaw { alpha: f64 },
    /// p(x) ∝ x^(-α) e^(-γx)
    TruncatedPowerLaw { alpha: f64, gamma: f64 },
    /// p(x) ∝ e^(-γx)
    Exponential { gamma: f64 },
    /// ln x ~ N(μ, σ²)
    Lognormal { mu: f64, sigma: f64 },
}

impl Distribution {
    /// Rebuild from a flat parameter vector; missing entries read as zero
    pub fn from_parameters(family: Family, params: &[f64]) -> Self {
        let p = |i: usize| params.get(i).copied().unwrap_or(0.0);
        match family {
            Family::PowerLaw => Self::PowerLaw { alpha: p(0) },
            Family::TruncatedPowerLaw => Self::TruncatedPowerLaw {
                alpha: p(0),
                gamma: p(1),
            },
            Family::Exponential => Self::Exponential { gamma: p(0) },
            Family::Lognormal => Self::Lognormal {
                mu: p(0),
                sigma: p(1),
            },
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Self::PowerLaw { .. } => Family::PowerLaw,
            Self::TruncatedPowerLaw { .. } => Family::TruncatedPowerLaw,
            Self::Exponential { .. } => Family::Exponential,
            Self::Lognormal { .. } => Family::Lognormal,
        }
    }

    /// Flat parameter vector in declaration order
    pub fn parameters(&self) -> Vec<f64> {
        match *self {
            Self::PowerLaw { alpha } => vec![alpha],
            Self::TruncatedPowerLaw { alpha, gamma } => vec![alpha, gamma],
            Self::Exponential { gamma } => vec![gamma],
            Self::Lognormal { mu, sigma } => vec![mu, sigma],
        }
    }

    /// Whether the parameters lie in the region where the density is defined
    ///
    /// The region is the same for continuous and discrete data. Outside it
    /// every likelihood is floored, so a `false` here separates "numerically
    /// floored" from "legitimately small".
    pub fn is_feasible(&self, xmin: f64) -> bool {
        if self.parameters().iter().any(|p| !p.is_finite()) {
            return false;
        }
        match *self {
            Self::PowerLaw { alpha } => alpha > 1.0,
            Self::TruncatedPowerLaw { alpha, gamma } => alpha >= 0.0 && gamma >= 0.0,
            Self::Exponential { gamma } => gamma >= 0.0,
            Self::Lognormal { mu, sigma } => sigma > 0.0 && mu >= xmin.ln(),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PowerLaw { alpha } => write!(f, "power_law(alpha={alpha:.4})"),
            Self::TruncatedPowerLaw { alpha, gamma } => {
                write!(f, "truncated_power_law(alpha={alpha:.4}, gamma={gamma:.4})")
            }
            Self::Exponential { gamma } => write!(f, "exponential(gamma={gamma:.4})"),
            Self::Lognormal { mu, sigma } => write!(f, "lognormal(mu={mu:.4}, sigma={sigma:.4})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parameter_round_trip() {
        for family in Family::ALL {
            let params: Vec<f64> = (0..family.n_parameters()).map(|i| 1.5 + i as f64).collect();
            let dist = Distribution::from_parameters(family, &params);
            assert_eq!(dist.family(), family);
            assert_eq!(dist.parameters(), params);
        }
    }

    #[test]
    fn test_missing_parameters_read_as_zero() {
        let dist = Distribution::from_parameters(Family::Lognormal, &[]);
        assert_eq!(dist, Distribution::Lognormal { mu: 0.0, sigma: 0.0 });
    }

    #[test]
    fn test_feasibility() {
        assert!(Distribution::PowerLaw { alpha: 2.0 }.is_feasible(1.0));
        assert!(!Distribution::PowerLaw { alpha: 0.5 }.is_feasible(1.0));
        assert!(!Distribution::PowerLaw { alpha: f64::NAN }.is_feasible(1.0));
        assert!(!Distribution::Exponential { gamma: -0.1 }.is_feasible(1.0));
        assert!(!Distribution::TruncatedPowerLaw { alpha: 2.0, gamma: -1.0 }.is_feasible(1.0));
        assert!(!Distribution::Lognormal { mu: 1.0, sigma: 0.0 }.is_feasible(1.0));
        // μ may not sit below ln(xmin)
        assert!(!Distribution::Lognormal { mu: 0.5, sigma: 1.0 }.is_feasible(10.0));
        assert!(Distribution::Lognormal { mu: 3.0, sigma: 1.0 }.is_feasible(10.0));
    }

    #[test]
    fn test_initial_guess() {
        let tail = [1.0, 2.0, 4.0, 8.0];
        let guess = Family::PowerLaw.initial_guess(&tail, 1.0);
        assert_relative_eq!(guess[0], 1.0 + 4.0 / (6.0 * 2f64.ln()), max_relative = 1e-12);

        let guess = Family::Exponential.initial_guess(&tail, 1.0);
        assert_relative_eq!(guess[0], 4.0 / 15.0, max_relative = 1e-12);

        let guess = Family::Lognormal.initial_guess(&tail, 1.0);
        assert_relative_eq!(guess[0], 1.5 * 2f64.ln(), max_relative = 1e-12);
        assert!(guess[1] > 0.0);
    }

    #[test]
    fn test_family_serde_names() {
        assert_eq!(serde_json::to_string(&Family::TruncatedPowerLaw).unwrap(), "\"truncated_power_law\"");
        assert_eq!(Family::Lognormal.to_string(), "lognormal");
    }
}
