//! Per-call fitting options

use crate::optimizer::OptimizerConfig;
use serde::{Deserialize, Serialize};
use tails_core::{Cutoffs, Error, Regime, Result, SearchMethod};

/// How the lower cutoff is obtained
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XminChoice {
    /// Scan candidate cutoffs for the best power-law fit
    #[default]
    Search,
    Fixed(f64),
}

/// Options recognized by [`fit`](crate::fit), [`fit_all`](crate::fit_all)
/// and [`find_xmin`](crate::find_xmin)
///
/// # Examples
///
/// ```rust
/// use tails_fit::{FitConfig, XminChoice};
/// use tails_core::{Regime, SearchMethod};
///
/// let config = FitConfig::for_data(&[1.0, 2.0, 5.0])
///     .with_xmin(2.0)
///     .with_search_method(SearchMethod::Ks);
/// assert_eq!(config.regime, Regime::Discrete);
/// assert_eq!(config.xmin, XminChoice::Fixed(2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    pub regime: Regime,
    pub xmin: XminChoice,
    pub xmax: Option<f64>,
    pub search_method: SearchMethod,
    /// Fixed power-law exponent to compare every fit against
    pub comparison_alpha: Option<f64>,
    pub optimizer: OptimizerConfig,
}

impl FitConfig {
    pub fn new(regime: Regime) -> Self {
        Self {
            regime,
            ..Self::default()
        }
    }

    /// Regime detected from integrality of the samples
    pub fn for_data(data: &[f64]) -> Self {
        Self::new(Regime::detect(data))
    }

    pub fn with_xmin(mut self, xmin: f64) -> Self {
        self.xmin = XminChoice::Fixed(xmin);
        self
    }

    pub fn with_xmin_search(mut self) -> Self {
        self.xmin = XminChoice::Search;
        self
    }

    pub fn with_xmax(mut self, xmax: f64) -> Self {
        self.xmax = Some(xmax);
        self
    }

    pub fn with_search_method(mut self, search_method: SearchMethod) -> Self {
        self.search_method = search_method;
        self
    }

    pub fn with_comparison_alpha(mut self, alpha: f64) -> Self {
        self.comparison_alpha = Some(alpha);
        self
    }

    pub fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Reject options no fit could use
    pub fn validate(&self) -> Result<()> {
        match self.xmin {
            XminChoice::Fixed(xmin) => Cutoffs::bounded(xmin, self.xmax).validate()?,
            XminChoice::Search => {
                if let Some(xmax) = self.xmax {
                    if !xmax.is_finite() {
                        return Err(Error::InvalidParameter(format!(
                            "xmax {xmax} must be finite"
                        )));
                    }
                }
            }
        }
        if let Some(alpha) = self.comparison_alpha {
            if !alpha.is_finite() {
                return Err(Error::InvalidParameter(format!(
                    "comparison_alpha must be finite, got {alpha}"
                )));
            }
        }
        Ok(())
    }
}
