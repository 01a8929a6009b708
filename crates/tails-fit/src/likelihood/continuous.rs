//! Closed-form densities for real-valued samples

use super::RegimeStrategy;
use crate::distribution::Distribution;
use std::f64::consts::{PI, SQRT_2};
use tails_core::math::{erfc, ln_upper_incomplete_gamma};
use tails_core::Cutoffs;

/// Densities normalized over `[xmin, ∞)`
///
/// An upper cutoff only restricts which samples are scored; the densities
/// are not renormalized over `[xmin, xmax]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContinuousStrategy;

impl RegimeStrategy for ContinuousStrategy {
    fn likelihoods(&self, dist: &Distribution, tail: &[f64], cutoffs: &Cutoffs) -> Vec<f64> {
        let xmin = cutoffs.xmin;
        match *dist {
            Distribution::PowerLaw { alpha } => {
                // (α-1)/xmin · (x/xmin)^(-α), in log space
                let ln_norm = (alpha - 1.0).ln() - xmin.ln();
                tail.iter()
                    .map(|&x| (ln_norm - alpha * (x / xmin).ln()).exp())
                    .collect()
            }
            Distribution::TruncatedPowerLaw { alpha, gamma } => {
                let s = 1.0 - alpha;
                let ln_norm = s * gamma.ln() - ln_upper_incomplete_gamma(s, gamma * xmin);
                tail.iter()
                    .map(|&x| (ln_norm - alpha * x.ln() - gamma * x).exp())
                    .collect()
            }
            Distribution::Exponential { gamma } => tail
                .iter()
                .map(|&x| gamma * (gamma * (xmin - x)).exp())
                .collect(),
            Distribution::Lognormal { mu, sigma } => {
                let norm = (2.0 / (PI * sigma * sigma)).sqrt()
                    / erfc((xmin.ln() - mu) / (SQRT_2 * sigma));
                tail.iter()
                    .map(|&x| {
                        let z = x.ln() - mu;
                        norm / x * (-z * z / (2.0 * sigma * sigma)).exp()
                    })
                    .collect()
            }
        }
    }

    fn cdf(&self, dist: &Distribution, points: &[f64], cutoffs: &Cutoffs) -> Vec<f64> {
        let xmin = cutoffs.xmin;
        match *dist {
            Distribution::PowerLaw { alpha } => points
                .iter()
                .map(|&x| 1.0 - (x / xmin).powf(1.0 - alpha))
                .collect(),
            Distribution::TruncatedPowerLaw { alpha, gamma } => {
                let s = 1.0 - alpha;
                let ln_tail_at_xmin = ln_upper_incomplete_gamma(s, gamma * xmin);
                points
                    .iter()
                    .map(|&x| {
                        let ratio = ln_upper_incomplete_gamma(s, gamma * x) - ln_tail_at_xmin;
                        -ratio.exp_m1()
                    })
                    .collect()
            }
            Distribution::Exponential { gamma } => points
                .iter()
                .map(|&x| -(-gamma * (x - xmin)).exp_m1())
                .collect(),
            Distribution::Lognormal { mu, sigma } => {
                let scale = SQRT_2 * sigma;
                let tail_at_xmin = erfc((xmin.ln() - mu) / scale);
                points
                    .iter()
                    .map(|&x| 1.0 - erfc((x.ln() - mu) / scale) / tail_at_xmin)
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Trapezoid integral of a density on a log grid over [xmin, upper]
    fn integrate(dist: &Distribution, xmin: f64, upper: f64) -> f64 {
        let n = 200_000;
        let step = (upper / xmin).ln() / n as f64;
        let grid: Vec<f64> = (0..=n).map(|i| xmin * (step * i as f64).exp()).collect();
        let l = ContinuousStrategy.likelihoods(dist, &grid, &Cutoffs::new(xmin));
        grid.windows(2)
            .zip(l.windows(2))
            .map(|(x, y)| 0.5 * (y[0] + y[1]) * (x[1] - x[0]))
            .sum()
    }

    #[test]
    fn test_densities_integrate_to_one() {
        let cases = [
            Distribution::PowerLaw { alpha: 2.5 },
            Distribution::TruncatedPowerLaw { alpha: 1.5, gamma: 0.1 },
            Distribution::Exponential { gamma: 0.5 },
            Distribution::Lognormal { mu: 1.0, sigma: 1.0 },
        ];
        for dist in cases {
            let mass = integrate(&dist, 1.0, 1e7);
            assert_relative_eq!(mass, 1.0, max_relative = 1e-3);
        }
    }

    #[test]
    fn test_power_law_density() {
        let l = ContinuousStrategy.likelihoods(
            &Distribution::PowerLaw { alpha: 3.0 },
            &[2.0, 4.0],
            &Cutoffs::new(2.0),
        );
        // (α-1)/xmin at x = xmin
        assert_relative_eq!(l[0], 1.0, max_relative = 1e-12);
        assert_relative_eq!(l[1], 0.125, max_relative = 1e-12);
    }

    #[test]
    fn test_cdf_matches_density() {
        // d/dx CDF = density, checked by central difference
        let dist = Distribution::TruncatedPowerLaw { alpha: 2.0, gamma: 0.2 };
        let cutoffs = Cutoffs::new(1.0);
        let h = 1e-5;
        let x = 3.0;
        let cdf = ContinuousStrategy.cdf(&dist, &[x - h, x + h], &cutoffs);
        let density = ContinuousStrategy.likelihoods(&dist, &[x], &cutoffs)[0];
        assert_relative_eq!((cdf[1] - cdf[0]) / (2.0 * h), density, max_relative = 1e-5);
    }

    #[test]
    fn test_exponential_cdf() {
        let cdf = ContinuousStrategy.cdf(
            &Distribution::Exponential { gamma: 1.0 },
            &[1.0, 2.0],
            &Cutoffs::new(1.0),
        );
        assert_eq!(cdf[0], 0.0);
        assert_relative_eq!(cdf[1], 1.0 - (-1.0f64).exp(), max_relative = 1e-14);
    }
}
