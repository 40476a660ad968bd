use thiserror::Error;

/// Unified error type for `crra-gamma` operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GammaError {
    /// Raised when no sign change of the indifference objective was found on
    /// `[0, upper]` for any probed `upper <= max_limit`.
    #[error(
        "could not find Gamma: no sign change on [0, {last_upper_bound}] after {probes} probes \
         (max limit {max_limit}); please check your inputs"
    )]
    NoRootFound {
        /// Largest upper bound the search is allowed to probe.
        max_limit: f64,
        /// Last upper bound that was actually probed.
        last_upper_bound: f64,
        /// Number of bracket probes performed.
        probes: usize,
    },

    /// Raised when Brent's method exhausts its iteration budget inside a valid bracket.
    #[error(
        "root finder did not converge on [{lower}, {upper}] after {iterations} iterations"
    )]
    NonConvergence {
        /// Number of iterations performed before termination.
        iterations: usize,
        /// Lower end of the bracket handed to the root finder.
        lower: f64,
        /// Upper end of the bracket handed to the root finder.
        upper: f64,
    },

    /// Raised when the root finder is called on an interval without a sign change.
    #[error("f({lower}) = {f_lower} and f({upper}) = {f_upper} do not bracket a root")]
    NotBracketed {
        lower: f64,
        upper: f64,
        f_lower: f64,
        f_upper: f64,
    },

    /// Raised when a wealth level fed to the utility function is not strictly positive.
    #[error("{label} must be positive for CRRA utility, found {value}")]
    NonPositiveWealth { label: &'static str, value: f64 },

    /// Raised when the win probability lies outside `[0, 1]`.
    #[error("probability of winning must lie in [0, 1], found {value}")]
    InvalidProbability { value: f64 },

    /// Raised when a lottery parameter is NaN or infinite.
    #[error("{field} must be finite, found {value}")]
    NonFiniteInput { field: &'static str, value: f64 },

    /// Raised when search or root finder settings are inconsistent.
    #[error("invalid search configuration: {reason}")]
    InvalidSearchConfig { reason: String },

    /// Raised when numerical routines produce NaN or infinite values.
    #[error("encountered a non-finite value during {context} at gamma = {gamma}")]
    NumericalError { context: &'static str, gamma: f64 },
}

impl GammaError {
    /// Helper to format an [`InvalidSearchConfig`](GammaError::InvalidSearchConfig) error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidSearchConfig {
            reason: reason.into(),
        }
    }

    /// Helper to raise when a numerical evaluation is not finite.
    pub fn numerical(context: &'static str, gamma: f64) -> Self {
        Self::NumericalError { context, gamma }
    }

    /// Whether the error means the search itself failed, as opposed to bad inputs.
    ///
    /// Both variants are terminal for a request; callers may retry with different inputs.
    pub fn is_search_failure(&self) -> bool {
        matches!(self, Self::NoRootFound { .. } | Self::NonConvergence { .. })
    }
}

/// Type alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, GammaError>;
