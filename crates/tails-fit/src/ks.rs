//! Kolmogorov-Smirnov and Kuiper distances between data and a fitted family

use crate::distribution::Distribution;
use crate::likelihood::Evaluator;
use serde::{Deserialize, Serialize};
use tails_cdf::{cumulative_distribution, CdfOptions};
use tails_core::{sample, Cutoffs, Regime};

/// Signed deviations between the theoretical and empirical CDFs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KsDistance {
    /// max(theoretical - empirical)
    pub d_plus: f64,
    /// max(empirical - theoretical)
    pub d_minus: f64,
    /// 1 + mean(theoretical - empirical)
    pub kappa: f64,
}

impl KsDistance {
    /// Returned when fewer than two samples survive the cutoffs
    pub const UNUSABLE: KsDistance = KsDistance {
        d_plus: 1.0,
        d_minus: 1.0,
        kappa: 2.0,
    };

    /// The KS statistic D = max(D+, D-)
    pub fn distance(&self) -> f64 {
        self.d_plus.max(self.d_minus)
    }

    /// Kuiper's statistic V = D+ + D-
    pub fn kuiper(&self) -> f64 {
        self.d_plus + self.d_minus
    }

    pub fn is_unusable(&self) -> bool {
        *self == Self::UNUSABLE
    }
}

/// Distance between the samples inside the cutoffs and a fitted distribution
///
/// Continuous samples are compared at each sorted observation against the
/// rank CDF `i / n`. Discrete samples are compared on unit bins spanning
/// `[xmin, xmax]`. The result does not depend on the order of `data`.
pub fn ks_distance(
    data: &[f64],
    dist: &Distribution,
    regime: Regime,
    cutoffs: Cutoffs,
) -> KsDistance {
    let tail = cutoffs.filter(&sample::sorted(data));
    if tail.len() < 2 || !dist.is_feasible(cutoffs.xmin) {
        return KsDistance::UNUSABLE;
    }

    let evaluator = Evaluator::new(regime, cutoffs);
    let (empirical, points) = match regime {
        Regime::Continuous => {
            let n = tail.len() as f64;
            let empirical = (0..tail.len()).map(|i| i as f64 / n).collect();
            (empirical, tail)
        }
        Regime::Discrete => {
            let mut options = CdfOptions::new()
                .with_regime(Regime::Discrete)
                .with_xmin(cutoffs.xmin);
            if let Some(xmax) = cutoffs.xmax {
                options = options.with_xmax(xmax);
            }
            cumulative_distribution(&tail, &options).into_parts()
        }
    };
    let theoretical = evaluator.cdf(dist, &points);

    let mut d_plus = f64::NEG_INFINITY;
    let mut d_minus = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for (t, e) in theoretical.iter().zip(&empirical) {
        let diff = t - e;
        d_plus = d_plus.max(diff);
        d_minus = d_minus.max(-diff);
        sum += diff;
    }
    if !(d_plus.is_finite() && d_minus.is_finite()) {
        return KsDistance::UNUSABLE;
    }

    KsDistance {
        d_plus,
        d_minus,
        kappa: 1.0 + sum / theoretical.len() as f64,
    }
}

/// [`ks_distance`] against a power law with exponent `alpha`
pub fn power_law_ks_distance(
    data: &[f64],
    alpha: f64,
    regime: Regime,
    cutoffs: Cutoffs,
) -> KsDistance {
    ks_distance(data, &Distribution::PowerLaw { alpha }, regime, cutoffs)
}
