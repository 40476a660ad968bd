//! Configuration structures for the adaptive Gamma search and curve sampling.

use serde::{Deserialize, Serialize};

use crate::error::{GammaError, Result};
use crate::solving::RootOptions;

/// Controls the sampled `(gamma, objective)` curve attached to a solution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveOptions {
    /// First sampled gamma.
    pub start: f64,
    /// The last sampled gamma is `span_multiplier * gamma_found`.
    pub span_multiplier: f64,
    /// Number of evenly spaced samples, endpoints included.
    pub samples: usize,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            start: 0.01,
            span_multiplier: 2.0,
            samples: 300,
        }
    }
}

/// Aggregated search configuration used by [`GammaSolver`](crate::GammaSolver).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Largest upper bound the bracket search may probe.
    pub max_limit: f64,
    /// First upper bound probed; doubled after every probe without a sign change.
    pub initial_upper_bound: f64,
    /// Evaluate the indifference equation in units of `Wce` during the search.
    pub normalize_wealth: bool,
    /// Configuration for Brent's method once a bracket is found.
    pub root: RootOptions,
    /// Configuration for the diagnostic curve.
    pub curve: CurveOptions,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_limit: 1_000.0,
            initial_upper_bound: 10.0,
            normalize_wealth: false,
            root: RootOptions::default(),
            curve: CurveOptions::default(),
        }
    }
}

impl SearchConfig {
    /// Override the largest upper bound while preserving other defaults.
    pub fn with_max_limit(mut self, max_limit: f64) -> Self {
        self.max_limit = max_limit;
        self
    }

    /// Override the first probed upper bound.
    pub fn with_initial_upper_bound(mut self, initial_upper_bound: f64) -> Self {
        self.initial_upper_bound = initial_upper_bound;
        self
    }

    /// Enable or disable the wealth-normalized search.
    pub fn with_normalized_wealth(mut self, normalize: bool) -> Self {
        self.normalize_wealth = normalize;
        self
    }

    /// Override the root finder settings.
    pub fn with_root_options(mut self, root: RootOptions) -> Self {
        self.root = root;
        self
    }

    /// Override the curve settings.
    pub fn with_curve(mut self, curve: CurveOptions) -> Self {
        self.curve = curve;
        self
    }

    /// Checks `max_limit >= initial_upper_bound > 0` and the nested options.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_upper_bound > 0.0 && self.initial_upper_bound.is_finite()) {
            return Err(GammaError::invalid_config(format!(
                "initial_upper_bound must be positive and finite, found {}",
                self.initial_upper_bound
            )));
        }
        if !(self.max_limit >= self.initial_upper_bound && self.max_limit.is_finite()) {
            return Err(GammaError::invalid_config(format!(
                "max_limit ({}) must be finite and at least initial_upper_bound ({})",
                self.max_limit, self.initial_upper_bound
            )));
        }
        if self.curve.samples < 2 {
            return Err(GammaError::invalid_config("curve needs at least two samples"));
        }
        if !(self.curve.start.is_finite() && self.curve.span_multiplier.is_finite()) {
            return Err(GammaError::invalid_config("curve bounds must be finite"));
        }
        self.root.validate()
    }
}
