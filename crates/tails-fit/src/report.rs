//! Entry points: cutoff resolution, single fits and the fit-everything report

use crate::compare::{compare_tail, Comparison};
use crate::config::{FitConfig, XminChoice};
use crate::distribution::Family;
use crate::fitter::{Fit, Fitter};
use crate::likelihood::Evaluator;
use crate::xmin::{XminSearch, XminSelector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tails_core::{sample, Cutoffs, Regime, Result};
use tracing::{debug, instrument};

/// Every family fitted at one pair of cutoffs, with the ratio tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub regime: Regime,
    pub cutoffs: Cutoffs,
    /// Present when the lower cutoff was searched for
    pub xmin_search: Option<XminSearch>,
    pub fits: BTreeMap<Family, Fit>,
    /// Baseline power law against each alternative; positive favors the power law
    pub power_law_comparison: BTreeMap<Family, Comparison>,
    /// Truncated power law against exponential and lognormal
    pub truncated_power_law_comparison: BTreeMap<Family, Comparison>,
}

impl FitReport {
    pub fn fit(&self, family: Family) -> Option<&Fit> {
        self.fits.get(&family)
    }

    /// Alternatives the baseline power law loses to with p below `level`
    pub fn favored_over_power_law(&self, level: f64) -> Vec<Family> {
        self.power_law_comparison
            .iter()
            .filter(|(_, c)| !c.favors_first() && c.ratio != 0.0 && c.is_significant(level))
            .map(|(&family, _)| family)
            .collect()
    }
}

fn check(data: &[f64], config: &FitConfig) -> Result<()> {
    config.validate()?;
    sample::ensure_finite(data, "sample")
}

fn selector(config: &FitConfig) -> XminSelector {
    XminSelector::new(config.regime)
        .with_xmax(config.xmax)
        .with_method(config.search_method)
        .with_optimizer(config.optimizer)
}

/// Lower cutoff from the config, searching when asked to
fn resolve_cutoffs(data: &[f64], config: &FitConfig) -> (Cutoffs, Option<XminSearch>) {
    match config.xmin {
        XminChoice::Fixed(xmin) => (Cutoffs::bounded(xmin, config.xmax), None),
        XminChoice::Search => {
            let search = selector(config).search(data);
            (Cutoffs::bounded(search.xmin, config.xmax), Some(search))
        }
    }
}

/// Search for the lower cutoff above which a power law fits best
///
/// The config's `xmin` is ignored.
#[instrument(skip_all, fields(n = data.len()))]
pub fn find_xmin(data: &[f64], config: &FitConfig) -> Result<XminSearch> {
    check(data, config)?;
    Ok(selector(config).search(data))
}

/// Fit a single family, resolving the lower cutoff first
///
/// # Examples
///
/// ```rust
/// use tails_fit::{fit, Distribution, Family, FitConfig};
///
/// let data = [1.0, 1.5, 2.2, 3.1, 4.8, 7.7, 12.5, 30.2];
/// let config = FitConfig::default().with_xmin(1.0);
/// let fit = fit(&data, Family::PowerLaw, &config).unwrap();
/// assert!(matches!(fit.distribution, Distribution::PowerLaw { alpha } if alpha > 1.0));
/// ```
pub fn fit(data: &[f64], family: Family, config: &FitConfig) -> Result<Fit> {
    check(data, config)?;
    let (cutoffs, _) = resolve_cutoffs(data, config);
    Ok(Fitter::new(config.regime, cutoffs)
        .with_method(config.search_method)
        .with_optimizer(config.optimizer)
        .fit(data, family, config.comparison_alpha))
}

/// Fit every family and compare each alternative against the power law
/// and the truncated power law
///
/// The baseline exponent for comparisons is `comparison_alpha` when given,
/// else the fitted power-law exponent.
#[instrument(skip_all, fields(n = data.len(), regime = %config.regime))]
pub fn fit_all(data: &[f64], config: &FitConfig) -> Result<FitReport> {
    check(data, config)?;
    let (cutoffs, xmin_search) = resolve_cutoffs(data, config);
    let fitter = Fitter::new(config.regime, cutoffs)
        .with_method(config.search_method)
        .with_optimizer(config.optimizer);
    let evaluator = Evaluator::new(config.regime, cutoffs);
    let tail = cutoffs.filter(data);
    debug!(xmin = cutoffs.xmin, n_tail = tail.len(), "fitting all families");

    let mut fits = BTreeMap::new();
    let mut power_law_comparison = BTreeMap::new();
    let mut truncated_power_law_comparison = BTreeMap::new();

    let power_law = fitter.fit_tail(&tail, Family::PowerLaw, config.comparison_alpha);
    let baseline = config
        .comparison_alpha
        .unwrap_or_else(|| power_law.parameters()[0]);
    fits.insert(Family::PowerLaw, power_law);

    let truncated = fitter.fit_tail(&tail, Family::TruncatedPowerLaw, Some(baseline));
    if let Some(c) = truncated.comparison {
        power_law_comparison.insert(Family::TruncatedPowerLaw, c);
    }

    for family in [Family::Exponential, Family::Lognormal] {
        let alternative = fitter.fit_tail(&tail, family, Some(baseline));
        if let Some(c) = alternative.comparison {
            power_law_comparison.insert(family, c);
        }
        let nested = if truncated.is_degenerate() {
            Comparison::sentinel()
        } else {
            compare_tail(&evaluator, &tail, &truncated.distribution, &alternative.distribution)
        };
        truncated_power_law_comparison.insert(family, nested);
        fits.insert(family, alternative);
    }
    fits.insert(Family::TruncatedPowerLaw, truncated);

    Ok(FitReport {
        regime: config.regime,
        cutoffs,
        xmin_search,
        fits,
        power_law_comparison,
        truncated_power_law_comparison,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::Distribution;
    use tails_core::Error;

    fn discrete_sample() -> Vec<f64> {
        vec![1.0, 2.0, 2.0, 3.0, 4.0, 5.0, 7.0, 10.0, 15.0, 20.0, 30.0, 50.0, 80.0, 130.0]
    }

    #[test]
    fn test_rejects_bad_input() {
        let config = FitConfig::default().with_xmin(1.0);
        assert!(matches!(
            fit(&[1.0, f64::NAN], Family::PowerLaw, &config),
            Err(Error::InvalidInput(_))
        ));
        assert!(fit_all(&[1.0, 2.0], &config.with_xmin(-1.0)).is_err());
        assert!(find_xmin(&[1.0, f64::INFINITY], &config).is_err());
    }

    #[test]
    fn test_report_is_complete() {
        let data = discrete_sample();
        let report = fit_all(&data, &FitConfig::new(Regime::Discrete).with_xmin(2.0)).unwrap();
        assert!(report.xmin_search.is_none());
        assert_eq!(report.fits.keys().copied().collect::<Vec<_>>(), Family::ALL.to_vec());
        assert_eq!(report.power_law_comparison.len(), 3);
        assert_eq!(
            report.truncated_power_law_comparison.keys().copied().collect::<Vec<_>>(),
            vec![Family::Exponential, Family::Lognormal]
        );
        for c in report.power_law_comparison.values() {
            assert!((0.0..=1.0).contains(&c.p_value));
        }
    }

    #[test]
    fn test_searched_xmin_is_used() {
        let data = discrete_sample();
        let report = fit_all(&data, &FitConfig::new(Regime::Discrete)).unwrap();
        let search = report.xmin_search.unwrap();
        assert_eq!(report.cutoffs.xmin, search.xmin);
        assert_eq!(report.fit(Family::PowerLaw).unwrap().n_tail, search.n_tail);
    }

    #[test]
    fn test_degenerate_tail_gives_sentinels() {
        let config = FitConfig::new(Regime::Continuous).with_xmin(100.0);
        let report = fit_all(&[1.0, 2.0, 150.0], &config).unwrap();
        assert!(report.fits.values().all(Fit::is_degenerate));
        assert!(report
            .power_law_comparison
            .values()
            .chain(report.truncated_power_law_comparison.values())
            .all(|c| *c == Comparison::sentinel()));
    }

    #[test]
    fn test_comparison_alpha_sets_baseline() {
        let data = discrete_sample();
        let config = FitConfig::new(Regime::Discrete)
            .with_xmin(2.0)
            .with_comparison_alpha(1.5);
        let report = fit_all(&data, &config).unwrap();
        let evaluator = Evaluator::new(Regime::Discrete, report.cutoffs);
        let tail = report.cutoffs.filter(&data);
        let exponential = report.fit(Family::Exponential).unwrap();
        let expected = compare_tail(
            &evaluator,
            &tail,
            &Distribution::PowerLaw { alpha: 1.5 },
            &exponential.distribution,
        );
        assert_eq!(report.power_law_comparison[&Family::Exponential], expected);
    }

    #[test]
    fn test_report_serializes_with_family_keys() {
        let report = fit_all(&discrete_sample(), &FitConfig::new(Regime::Discrete).with_xmin(2.0)).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["fits"]["truncated_power_law"].is_object());
        assert!(json["power_law_comparison"]["lognormal"]["p_value"].is_number());
    }
}
