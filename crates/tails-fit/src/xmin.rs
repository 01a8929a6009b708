//! Lower-cutoff selection by minimum KS distance among stable candidates

use crate::distribution::Family;
use crate::fitter::Fitter;
use crate::ks::power_law_ks_distance;
use crate::optimizer::OptimizerConfig;
use serde::{Deserialize, Serialize};
use tails_core::{sample, Cutoffs, Regime, SearchMethod, SENTINEL_LOGLIKELIHOOD};
use tracing::{debug, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Candidates whose exponent error σ = (α-1)/√(n-i+1) reaches this are noisy
pub const NOISE_THRESHOLD: f64 = 0.1;

/// Chosen cutoff and the power-law fit there
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XminSearch {
    pub xmin: f64,
    /// KS distance at the chosen cutoff
    pub d: f64,
    pub alpha: f64,
    /// Log-likelihood, or KS distance when searching by KS
    pub score: f64,
    /// Samples at or above the chosen cutoff
    pub n_tail: usize,
    /// Set when the search degenerated or no cutoff was stable
    pub noise_flag: bool,
}

impl XminSearch {
    /// Returned when fewer than two candidate cutoffs exist
    pub fn sentinel() -> Self {
        Self {
            xmin: 1.0,
            d: 1.0,
            alpha: 0.0,
            score: SENTINEL_LOGLIKELIHOOD,
            n_tail: 1,
            noise_flag: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    alpha: f64,
    score: f64,
    d: f64,
}

/// Scans every distinct sample value as a candidate lower cutoff
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct XminSelector {
    pub regime: Regime,
    pub xmax: Option<f64>,
    pub method: SearchMethod,
    pub optimizer: OptimizerConfig,
}

impl XminSelector {
    pub fn new(regime: Regime) -> Self {
        Self {
            regime,
            ..Self::default()
        }
    }

    pub fn with_xmax(mut self, xmax: Option<f64>) -> Self {
        self.xmax = xmax;
        self
    }

    pub fn with_method(mut self, method: SearchMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Pick the cutoff minimizing the KS distance of a fitted power law
    ///
    /// Every distinct value except the largest is a candidate. Once the
    /// exponent error first exceeds [`NOISE_THRESHOLD`], later candidates
    /// are dropped, unless the largest candidate is itself stable or the very
    /// first one is already noisy; then nothing is dropped and the result
    /// carries the noise flag.
    #[instrument(skip_all, fields(n = data.len(), regime = %self.regime))]
    pub fn search(&self, data: &[f64]) -> XminSearch {
        let mut sorted = sample::sorted(data).into_owned();
        if let Some(xmax) = self.xmax {
            sorted.retain(|&x| x <= xmax);
        }

        let (mut xmins, mut indices) = sample::distinct_with_first_index(&sorted);
        xmins.pop();
        indices.pop();
        if xmins.len() < 2 {
            debug!(candidates = xmins.len(), "too few candidate cutoffs");
            return XminSearch::sentinel();
        }
        debug!(candidates = xmins.len(), "scanning candidate cutoffs");

        let evaluate = |(&xmin, &index): (&f64, &usize)| self.evaluate(&sorted[index..], xmin);
        #[cfg(feature = "parallel")]
        let candidates: Vec<Candidate> = xmins.par_iter().zip(indices.par_iter()).map(evaluate).collect();
        #[cfg(not(feature = "parallel"))]
        let candidates: Vec<Candidate> = xmins.iter().zip(indices.iter()).map(evaluate).collect();

        let n = sorted.len() as f64;
        let good: Vec<bool> = candidates
            .iter()
            .zip(&indices)
            .map(|(c, &i)| (c.alpha - 1.0) / (n - i as f64 + 1.0).sqrt() < NOISE_THRESHOLD)
            .collect();
        let (usable, noise_flag) = stable_prefix(&good);
        let distances: Vec<f64> = candidates[..usable].iter().map(|c| c.d).collect();
        let best = closest(&distances);

        let chosen = &candidates[best];
        let xmin = xmins[best];
        let result = XminSearch {
            xmin,
            d: chosen.d,
            alpha: chosen.alpha,
            score: chosen.score,
            n_tail: sorted.len() - indices[best],
            noise_flag,
        };
        if noise_flag {
            warn!(xmin, alpha = result.alpha, "no stable cutoff, exponent may be unreliable");
        } else {
            debug!(xmin, d = result.d, alpha = result.alpha, n_tail = result.n_tail, "chose cutoff");
        }
        result
    }

    fn evaluate(&self, tail: &[f64], xmin: f64) -> Candidate {
        let cutoffs = Cutoffs::bounded(xmin, self.xmax);
        let fit = Fitter::new(self.regime, cutoffs)
            .with_method(self.method)
            .with_optimizer(self.optimizer)
            .fit_tail(tail, Family::PowerLaw, None);
        let alpha = fit.parameters()[0];
        let d = power_law_ks_distance(tail, alpha, self.regime, cutoffs).distance();
        Candidate {
            alpha,
            score: fit.score,
            d,
        }
    }
}

/// Number of leading candidates kept by the noise rule, and the noise flag
///
/// Candidates from the first unstable one onward are dropped. When the first
/// candidate is already unstable, or the last one is stable again, all are
/// kept and the search is flagged as noisy.
fn stable_prefix(good: &[bool]) -> (usize, bool) {
    let first_bad = good.iter().position(|g| !g).unwrap_or(0);
    match good.last() {
        Some(false) if first_bad > 0 => (first_bad, false),
        _ => (good.len(), true),
    }
}

/// Index of the smallest distance; the first minimum wins ties and NaN never wins
fn closest(distances: &[f64]) -> usize {
    let key = |d: f64| if d.is_nan() { f64::INFINITY } else { d };
    (1..distances.len()).fold(0, |best, i| {
        if key(distances[i]) < key(distances[best]) {
            i
        } else {
            best
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identical_values_give_sentinel() {
        let search = XminSelector::new(Regime::Discrete).search(&[3.0; 20]);
        assert_eq!(search, XminSearch::sentinel());
        assert!(search.noise_flag);
    }

    #[test]
    fn test_two_distinct_values_give_sentinel() {
        // One candidate after dropping the largest
        let search = XminSelector::new(Regime::Discrete).search(&[1.0, 1.0, 2.0, 2.0]);
        assert_eq!(search, XminSearch::sentinel());
    }

    #[test]
    fn test_xmax_filters_before_candidates() {
        let data = [1.0, 2.0, 3.0, 100.0, 200.0];
        let search = XminSelector::new(Regime::Discrete)
            .with_xmax(Some(2.5))
            .search(&data);
        assert_eq!(search, XminSearch::sentinel());
    }

    #[test]
    fn test_finds_tail_start() {
        // Uniform body on [0.1, 1) glued to a power-law tail from 1
        let mut data: Vec<f64> = (0..200).map(|i| 0.1 + 0.9 * i as f64 / 200.0).collect();
        let n = 2000;
        data.extend((0..n).map(|i| {
            let u = (i as f64 + 0.5) / n as f64;
            (1.0 - u).powf(-1.0 / 1.5)
        }));

        let search = XminSelector::new(Regime::Continuous).search(&data);
        assert!(search.xmin >= 0.9 && search.xmin <= 1.5, "xmin = {}", search.xmin);
        assert_relative_eq!(search.alpha, 2.5, epsilon = 0.15);
        assert!(search.d < 0.05);
        assert_eq!(search.n_tail, data.iter().filter(|&&x| x >= search.xmin).count());
        // Small tails near the top are unstable, so the scan is cut short
        assert!(!search.noise_flag);
        let sigma = (search.alpha - 1.0) / (search.n_tail as f64 + 1.0).sqrt();
        assert!(sigma < NOISE_THRESHOLD, "sigma = {sigma}");
    }

    #[test]
    fn test_stable_prefix_stops_at_first_unstable() {
        assert_eq!(stable_prefix(&[true, true, false, true, false]), (2, false));
        assert_eq!(stable_prefix(&[true, false, false]), (1, false));
    }

    #[test]
    fn test_stable_prefix_flags_unstable_start() {
        assert_eq!(stable_prefix(&[false, true, true, false]), (4, true));
        assert_eq!(stable_prefix(&[false, false]), (2, true));
    }

    #[test]
    fn test_stable_prefix_flags_stable_end() {
        assert_eq!(stable_prefix(&[true, false, true]), (3, true));
        assert_eq!(stable_prefix(&[true, true, true]), (3, true));
    }

    #[test]
    fn test_closest_ignores_dropped_candidates() {
        let distances = [0.30, 0.12, 0.20, 0.01, 0.02];
        let good = [true, true, true, false, false];
        let (usable, noise_flag) = stable_prefix(&good);
        assert!(!noise_flag);
        // The global minimum at index 3 lies past the first unstable candidate
        assert_eq!(closest(&distances[..usable]), 1);
        assert_eq!(closest(&distances), 3);
    }

    #[test]
    fn test_closest_ties_and_nan() {
        assert_eq!(closest(&[0.2, 0.1, 0.1]), 1);
        assert_eq!(closest(&[f64::NAN, 0.5, f64::NAN]), 1);
        assert_eq!(closest(&[f64::NAN, f64::NAN]), 0);
    }

    #[test]
    fn test_steep_small_sample_is_flagged_but_answered() {
        // Ten tightly packed values: α is large and the tail tiny, so even
        // the first candidate has σ well above the threshold
        let data: Vec<f64> = (0..10).map(|i| 1.0 + 0.05 * i as f64).collect();
        let search = XminSelector::new(Regime::Continuous).search(&data);

        assert!(search.noise_flag);
        assert_ne!(search, XminSearch::sentinel());
        assert!(data[..9].contains(&search.xmin), "xmin = {}", search.xmin);
        assert_eq!(search.n_tail, data.iter().filter(|&&x| x >= search.xmin).count());
        assert!(search.alpha > 1.0);
        assert!((0.0..=1.0).contains(&search.d));

        let first_alpha = 1.0 + data.len() as f64 / data.iter().map(|x| x.ln()).sum::<f64>();
        assert!((first_alpha - 1.0) / (data.len() as f64 + 1.0).sqrt() >= NOISE_THRESHOLD);
    }

    #[test]
    fn test_order_does_not_matter() {
        let data = [1.0, 2.0, 2.0, 3.0, 4.0, 5.0, 7.0, 10.0, 15.0, 20.0, 30.0, 50.0, 80.0, 130.0];
        let mut reversed = data;
        reversed.reverse();
        let selector = XminSelector::new(Regime::Discrete);
        assert_eq!(selector.search(&data), selector.search(&reversed));
    }
}
