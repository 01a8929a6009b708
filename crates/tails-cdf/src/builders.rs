//! Empirical CDF and histogram building strategies

use crate::traits::CdfBuilder;
use crate::types::{EmpiricalCdf, LogHistogram};
use tails_core::{sample, Cutoffs};

/// Unit-width bin CDF for integer-valued samples
///
/// Bins sit at `xmin, xmin + 1, ...` up to `xmax`. Missing cutoffs default
/// to the observed minimum and maximum.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitBinBuilder {
    xmin: Option<f64>,
    xmax: Option<f64>,
}

impl UnitBinBuilder {
    /// Create a new builder spanning the observed range
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the lower cutoff
    pub fn with_xmin(mut self, xmin: f64) -> Self {
        self.xmin = Some(xmin);
        self
    }

    /// Fix the upper cutoff
    pub fn with_xmax(mut self, xmax: f64) -> Self {
        self.xmax = Some(xmax);
        self
    }
}

impl CdfBuilder for UnitBinBuilder {
    fn build_sorted(&self, sorted_sample: &[f64]) -> EmpiricalCdf {
        let (first, last) = match (sorted_sample.first(), sorted_sample.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return EmpiricalCdf::trivial(),
        };
        let xmin = self.xmin.unwrap_or(first);
        let xmax = self.xmax.unwrap_or(last);

        let lo = sorted_sample.partition_point(|&x| x < xmin);
        let hi = sorted_sample.partition_point(|&x| x <= xmax).max(lo);
        let retained = &sorted_sample[lo..hi];
        if retained.is_empty() {
            return EmpiricalCdf::trivial();
        }

        let n = retained.len() as f64;
        let n_bins = (xmax - xmin + 1.0).ceil().max(0.0) as usize;
        let bins: Vec<f64> = (0..n_bins).map(|k| xmin + k as f64).collect();
        let values = bins
            .iter()
            .map(|&b| retained.partition_point(|&x| x < b) as f64 / n)
            .collect();

        EmpiricalCdf::new(values, bins)
    }
}

/// Rank-based CDF for real-valued samples: the i-th smallest value gets i/n
#[derive(Debug, Clone, Copy, Default)]
pub struct RankBuilder {
    cutoffs: Option<Cutoffs>,
}

impl RankBuilder {
    /// Create a new builder over the whole sample
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the sample to the given cutoffs first
    pub fn with_cutoffs(mut self, cutoffs: Cutoffs) -> Self {
        self.cutoffs = Some(cutoffs);
        self
    }
}

impl CdfBuilder for RankBuilder {
    fn build_sorted(&self, sorted_sample: &[f64]) -> EmpiricalCdf {
        let retained: Vec<f64> = match &self.cutoffs {
            Some(cutoffs) => cutoffs.filter(sorted_sample),
            None => sorted_sample.to_vec(),
        };
        if retained.is_empty() {
            return EmpiricalCdf::trivial();
        }

        let n = retained.len() as f64;
        let values = (0..retained.len()).map(|i| i as f64 / n).collect();
        EmpiricalCdf::new(values, retained)
    }
}

/// Density histogram on logarithmically spaced edges, ten bins per decade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBinBuilder {
    min: Option<f64>,
    max: Option<f64>,
}

impl LogBinBuilder {
    /// Create a new builder spanning the observed positive range
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the smallest edge
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Fix the largest edge
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Build the histogram; non-positive samples have no place on a log axis
    pub fn build(&self, sample: &[f64]) -> LogHistogram {
        let positive: Vec<f64> = sample.iter().copied().filter(|&x| x > 0.0).collect();
        let min = self
            .min
            .unwrap_or_else(|| positive.iter().copied().fold(f64::INFINITY, f64::min));
        let max = self
            .max
            .unwrap_or_else(|| positive.iter().copied().fold(f64::NEG_INFINITY, f64::max));
        if positive.is_empty() || !(min > 0.0 && max >= min) {
            return LogHistogram {
                densities: vec![],
                edges: vec![],
            };
        }

        let log_min = min.log10();
        let log_max = max.log10();
        let n_edges = (((log_max - log_min) * 10.0).ceil() as usize).max(2);
        let step = (log_max - log_min) / (n_edges - 1) as f64;
        let mut edges: Vec<f64> = (0..n_edges)
            .map(|i| 10f64.powf(log_min + step * i as f64))
            .collect();
        // Pin the outer edges so min/max land inside despite powf rounding
        edges[0] = min;
        edges[n_edges - 1] = max;

        let mut counts = vec![0usize; n_edges - 1];
        for &x in &positive {
            if x < min || x > max {
                continue;
            }
            // Last bin is closed on the right
            let bin = edges[1..]
                .partition_point(|&edge| edge <= x)
                .min(counts.len() - 1);
            counts[bin] += 1;
        }

        let total: usize = counts.iter().sum();
        let densities = counts
            .iter()
            .zip(edges.windows(2))
            .map(|(&c, w)| {
                let width = w[1] - w[0];
                if total > 0 && width > 0.0 {
                    c as f64 / (total as f64 * width)
                } else {
                    0.0
                }
            })
            .collect();

        LogHistogram { densities, edges }
    }
}

/// Whether the sample should be treated as integer-valued
pub fn is_discrete(data: &[f64]) -> bool {
    sample::is_integral(data)
}
