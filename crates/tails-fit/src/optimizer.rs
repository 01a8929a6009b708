//! Derivative-free minimization through argmin's Nelder-Mead simplex

use argmin::core::{CostFunction, Executor, State};
use argmin::solver::neldermead::NelderMead;
use serde::{Deserialize, Serialize};
use tails_core::{Error, Result};

/// Stopping rules for the simplex search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    pub max_iters: u64,
    /// Stop once the standard deviation of the simplex costs drops below this
    pub sd_tolerance: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iters: 1000,
            sd_tolerance: 1e-12,
        }
    }
}

impl OptimizerConfig {
    pub fn with_max_iters(mut self, max_iters: u64) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_sd_tolerance(mut self, sd_tolerance: f64) -> Self {
        self.sd_tolerance = sd_tolerance;
        self
    }
}

/// Best point found by the minimizer
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    pub params: Vec<f64>,
    pub value: f64,
    pub iterations: u64,
}

struct Objective<F> {
    f: F,
}

impl<F> CostFunction for Objective<F>
where
    F: Fn(&[f64]) -> f64,
{
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> std::result::Result<Self::Output, argmin::core::Error> {
        let value = (self.f)(param);
        // NaN would stall the simplex ordering
        Ok(if value.is_nan() { f64::MAX } else { value })
    }
}

/// Starting simplex: the initial point plus one vertex per coordinate,
/// nudged by 5% (or 0.00025 for a zero coordinate)
fn initial_simplex(initial: &[f64]) -> Vec<Vec<f64>> {
    let mut simplex = Vec::with_capacity(initial.len() + 1);
    simplex.push(initial.to_vec());
    for i in 0..initial.len() {
        let mut vertex = initial.to_vec();
        vertex[i] = if vertex[i] != 0.0 {
            vertex[i] * 1.05
        } else {
            0.00025
        };
        simplex.push(vertex);
    }
    simplex
}

/// Minimize `objective` starting from `initial`
///
/// Non-finite starting coordinates are rejected since no simplex can be
/// built around them.
pub fn nelder_mead<F>(objective: F, initial: &[f64], config: &OptimizerConfig) -> Result<Minimum>
where
    F: Fn(&[f64]) -> f64,
{
    if initial.is_empty() {
        return Err(Error::InvalidParameter("empty starting point".to_string()));
    }
    if initial.iter().any(|p| !p.is_finite()) {
        return Err(Error::InvalidParameter(format!(
            "non-finite starting point {initial:?}"
        )));
    }

    let solver = NelderMead::new(initial_simplex(initial)).with_sd_tolerance(config.sd_tolerance)?;
    let result = Executor::new(Objective { f: objective }, solver)
        .configure(|state| state.max_iters(config.max_iters))
        .run()?;

    let state = result.state();
    let params = state
        .get_best_param()
        .cloned()
        .ok_or_else(|| Error::Computation("minimizer returned no parameters".to_string()))?;
    Ok(Minimum {
        params,
        value: state.get_best_cost(),
        iterations: state.get_iter(),
    })
}
