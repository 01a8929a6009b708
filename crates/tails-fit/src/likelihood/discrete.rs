//! Sum-normalized mass functions for integer-valued samples

use super::RegimeStrategy;
use crate::distribution::Distribution;
use tails_core::math::hurwitz_zeta;
use tails_core::Cutoffs;

/// Mass functions over the integers `xmin, xmin + 1, ...`
///
/// Power law and exponential have closed-form normalizers that account for
/// an upper cutoff. Truncated power law and lognormal are normalized by
/// summing an explicit table over `[xmin, xmax]`, with `xmax` defaulting to
/// the largest retained sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscreteStrategy;

impl RegimeStrategy for DiscreteStrategy {
    fn likelihoods(&self, dist: &Distribution, tail: &[f64], cutoffs: &Cutoffs) -> Vec<f64> {
        let xmin = cutoffs.xmin;
        match *dist {
            Distribution::PowerLaw { alpha } => {
                let norm = zeta_norm(alpha, cutoffs);
                tail.iter().map(|&x| x.powf(-alpha) / norm).collect()
            }
            Distribution::Exponential { gamma } => {
                let norm = geometric_norm(gamma, cutoffs);
                // (1 - e^-γ) e^(-γ(x - xmin))
                let head = -(-gamma).exp_m1();
                tail.iter()
                    .map(|&x| head * (-gamma * (x - xmin)).exp() / norm)
                    .collect()
            }
            Distribution::TruncatedPowerLaw { .. } | Distribution::Lognormal { .. } => {
                let table = MassTable::new(dist, xmin, cutoffs.xmax_or_max(tail));
                tail.iter().map(|&x| table.mass(x)).collect()
            }
        }
    }

    fn cdf(&self, dist: &Distribution, points: &[f64], cutoffs: &Cutoffs) -> Vec<f64> {
        let xmin = cutoffs.xmin;
        match *dist {
            Distribution::PowerLaw { alpha } => {
                let head = hurwitz_zeta(alpha, xmin);
                let norm = zeta_norm(alpha, cutoffs);
                points
                    .iter()
                    .map(|&x| (head - hurwitz_zeta(alpha, x)) / norm)
                    .collect()
            }
            Distribution::Exponential { gamma } => {
                let norm = geometric_norm(gamma, cutoffs);
                points
                    .iter()
                    .map(|&x| -(-gamma * (x - xmin)).exp_m1() / norm)
                    .collect()
            }
            Distribution::TruncatedPowerLaw { .. } | Distribution::Lognormal { .. } => {
                let table = MassTable::new(dist, xmin, cutoffs.xmax_or_max(points));
                points.iter().map(|&x| table.below(x)).collect()
            }
        }
    }
}

/// ζ(α, xmin), less ζ(α, xmax + 1) when bounded above
fn zeta_norm(alpha: f64, cutoffs: &Cutoffs) -> f64 {
    let head = hurwitz_zeta(alpha, cutoffs.xmin);
    match cutoffs.xmax {
        Some(xmax) => head - hurwitz_zeta(alpha, xmax + 1.0),
        None => head,
    }
}

/// Mass of the geometric tail kept by the upper cutoff
fn geometric_norm(gamma: f64, cutoffs: &Cutoffs) -> f64 {
    match cutoffs.xmax {
        Some(xmax) => -(-gamma * (xmax + 1.0 - cutoffs.xmin)).exp_m1(),
        None => 1.0,
    }
}

/// Normalized mass on `xmin + k` for `k = 0..len`, with running sums
struct MassTable {
    xmin: f64,
    masses: Vec<f64>,
    /// `cumulative[k]` is the mass strictly below `xmin + k`
    cumulative: Vec<f64>,
}

impl MassTable {
    fn new(dist: &Distribution, xmin: f64, xmax: f64) -> Self {
        let len = ((xmax - xmin).floor().max(0.0) as usize) + 1;
        let log_weight = |x: f64| match *dist {
            Distribution::TruncatedPowerLaw { alpha, gamma } => -alpha * x.ln() - gamma * x,
            Distribution::Lognormal { mu, sigma } => {
                let z = x.ln() - mu;
                -x.ln() - z * z / (2.0 * sigma * sigma)
            }
            Distribution::PowerLaw { alpha } => -alpha * x.ln(),
            Distribution::Exponential { gamma } => -gamma * x,
        };

        let log_weights: Vec<f64> = (0..len).map(|k| log_weight(xmin + k as f64)).collect();
        let peak = log_weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut masses: Vec<f64> = log_weights.iter().map(|w| (w - peak).exp()).collect();
        let total: f64 = masses.iter().sum();
        for m in &mut masses {
            *m /= total;
        }

        let mut cumulative = Vec::with_capacity(len + 1);
        let mut running = 0.0;
        cumulative.push(running);
        for m in &masses {
            running += m;
            cumulative.push(running);
        }

        Self {
            xmin,
            masses,
            cumulative,
        }
    }

    fn index(&self, x: f64, len: usize) -> usize {
        ((x - self.xmin).floor().max(0.0) as usize).min(len - 1)
    }

    fn mass(&self, x: f64) -> f64 {
        self.masses[self.index(x, self.masses.len())]
    }

    fn below(&self, x: f64) -> f64 {
        self.cumulative[self.index(x, self.cumulative.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn support(xmin: u32, xmax: u32) -> Vec<f64> {
        (xmin..=xmax).map(f64::from).collect()
    }

    #[test]
    fn test_bounded_masses_sum_to_one() {
        let cutoffs = Cutoffs::new(2.0).with_xmax(60.0);
        let points = support(2, 60);
        let cases = [
            Distribution::PowerLaw { alpha: 1.7 },
            Distribution::TruncatedPowerLaw { alpha: 1.4, gamma: 0.02 },
            Distribution::Exponential { gamma: 0.1 },
            Distribution::Lognormal { mu: 2.0, sigma: 1.0 },
        ];
        for dist in cases {
            let total: f64 = DiscreteStrategy.likelihoods(&dist, &points, &cutoffs).iter().sum();
            assert_relative_eq!(total, 1.0, max_relative = 1e-10);
        }
    }

    #[test]
    fn test_power_law_masses_from_one_sum_to_one() {
        // xmin = 1 puts q = 1 in the ζ tail, where the correction series dominates
        let cutoffs = Cutoffs::new(1.0).with_xmax(60.0);
        let l = DiscreteStrategy.likelihoods(
            &Distribution::PowerLaw { alpha: 1.7 },
            &support(1, 60),
            &cutoffs,
        );
        let total: f64 = l.iter().sum();
        assert_relative_eq!(total, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_unbounded_power_law_mass() {
        let l = DiscreteStrategy.likelihoods(
            &Distribution::PowerLaw { alpha: 2.0 },
            &[1.0],
            &Cutoffs::new(1.0),
        );
        // 1 / ζ(2)
        assert_relative_eq!(l[0], 6.0 / std::f64::consts::PI.powi(2), max_relative = 1e-12);
    }

    #[test]
    fn test_geometric_mass() {
        let gamma: f64 = 0.5;
        let l = DiscreteStrategy.likelihoods(
            &Distribution::Exponential { gamma },
            &[3.0, 4.0],
            &Cutoffs::new(3.0),
        );
        assert_relative_eq!(l[0], 1.0 - (-gamma).exp(), max_relative = 1e-14);
        assert_relative_eq!(l[1] / l[0], (-gamma).exp(), max_relative = 1e-14);
    }

    #[test]
    fn test_cdf_accumulates_mass() {
        let cutoffs = Cutoffs::new(1.0).with_xmax(30.0);
        let points = support(1, 30);
        for dist in [
            Distribution::PowerLaw { alpha: 2.0 },
            Distribution::Exponential { gamma: 0.3 },
            Distribution::Lognormal { mu: 1.0, sigma: 0.7 },
        ] {
            let masses = DiscreteStrategy.likelihoods(&dist, &points, &cutoffs);
            let cdf = DiscreteStrategy.cdf(&dist, &points, &cutoffs);
            let mut running = 0.0;
            for (c, m) in cdf.iter().zip(&masses) {
                assert_relative_eq!(*c, running, epsilon = 1e-10);
                running += m;
            }
        }
    }

    #[test]
    fn test_table_clamps_out_of_range_index() {
        let dist = Distribution::Lognormal { mu: 1.0, sigma: 1.0 };
        let table = MassTable::new(&dist, 1.0, 5.0);
        assert_eq!(table.masses.len(), 5);
        assert_eq!(table.mass(50.0), table.masses[4]);
        assert_relative_eq!(table.below(50.0), 1.0, max_relative = 1e-12);
        assert_eq!(table.below(1.0), 0.0);
    }
}
