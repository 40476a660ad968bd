//! Bracketed scalar root finding (Brent's method) with configuration and diagnostics.

use serde::{Deserialize, Serialize};

use crate::error::{GammaError, Result};

/// Configuration for Brent's method on a bracketing interval.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootOptions {
    /// Absolute tolerance on the root location.
    pub x_tolerance: f64,
    /// Relative tolerance on the root location.
    pub r_tolerance: f64,
    /// Maximum number of iterations allowed before aborting.
    pub max_iterations: usize,
}

impl Default for RootOptions {
    fn default() -> Self {
        Self {
            x_tolerance: 2e-12,
            r_tolerance: 4.0 * f64::EPSILON,
            max_iterations: 100,
        }
    }
}

impl RootOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.x_tolerance > 0.0) {
            return Err(GammaError::invalid_config(format!(
                "x_tolerance must be positive, found {}",
                self.x_tolerance
            )));
        }
        if !(self.r_tolerance >= 4.0 * f64::EPSILON) {
            return Err(GammaError::invalid_config(format!(
                "r_tolerance must be at least 4 * f64::EPSILON, found {}",
                self.r_tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(GammaError::invalid_config("max_iterations must be at least 1"));
        }
        Ok(())
    }
}

/// Diagnostics returned alongside a root.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RootSummary {
    /// Location of the root.
    pub root: f64,
    /// Objective value at `root`.
    pub value: f64,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Number of objective evaluations, including the two endpoints.
    pub function_calls: usize,
    /// Whether the tolerance was met.
    pub converged: bool,
}

/// Finds a root of `f` in `[lower, upper]` with Brent's method.
///
/// `f(lower)` and `f(upper)` must have opposite signs (or one of them must be
/// exactly zero). Steps use inverse quadratic interpolation or the secant rule
/// and fall back to bisection whenever the interpolated step is not
/// contracting fast enough.
pub fn brent_root<F>(f: F, lower: f64, upper: f64, options: &RootOptions) -> Result<RootSummary>
where
    F: Fn(f64) -> f64,
{
    options.validate()?;

    let eval = |x: f64| -> Result<f64> {
        let value = f(x);
        if !value.is_finite() {
            return Err(GammaError::numerical("root refinement", x));
        }
        Ok(value)
    };

    let mut x_pre = lower;
    let mut x_cur = upper;
    let mut f_pre = eval(x_pre)?;
    let mut f_cur = eval(x_cur)?;
    let mut function_calls = 2usize;

    let summary = |root: f64, value: f64, iterations: usize, function_calls: usize| RootSummary {
        root,
        value,
        iterations,
        function_calls,
        converged: true,
    };

    if f_pre == 0.0 {
        return Ok(summary(x_pre, f_pre, 0, function_calls));
    }
    if f_cur == 0.0 {
        return Ok(summary(x_cur, f_cur, 0, function_calls));
    }
    if f_pre.signum() == f_cur.signum() {
        return Err(GammaError::NotBracketed {
            lower,
            upper,
            f_lower: f_pre,
            f_upper: f_cur,
        });
    }

    // `x_blk` is the contrapoint: f(x_blk) and f(x_cur) always have opposite signs.
    let mut x_blk = 0.0_f64;
    let mut f_blk = 0.0_f64;
    let mut s_pre = 0.0_f64;
    let mut s_cur = 0.0_f64;

    for iteration in 1..=options.max_iterations {
        if f_pre != 0.0 && f_cur != 0.0 && f_pre.is_sign_negative() != f_cur.is_sign_negative() {
            x_blk = x_pre;
            f_blk = f_pre;
            s_pre = x_cur - x_pre;
            s_cur = s_pre;
        }
        if f_blk.abs() < f_cur.abs() {
            x_pre = x_cur;
            x_cur = x_blk;
            x_blk = x_pre;

            f_pre = f_cur;
            f_cur = f_blk;
            f_blk = f_pre;
        }

        let delta = (options.x_tolerance + options.r_tolerance * x_cur.abs()) / 2.0;
        let s_bis = (x_blk - x_cur) / 2.0;
        if f_cur == 0.0 || s_bis.abs() < delta {
            return Ok(summary(x_cur, f_cur, iteration, function_calls));
        }

        if s_pre.abs() > delta && f_cur.abs() < f_pre.abs() {
            let s_try = if x_pre == x_blk {
                // secant
                -f_cur * (x_cur - x_pre) / (f_cur - f_pre)
            } else {
                // inverse quadratic interpolation
                let d_pre = (f_pre - f_cur) / (x_pre - x_cur);
                let d_blk = (f_blk - f_cur) / (x_blk - x_cur);
                -f_cur * (f_blk * d_blk - f_pre * d_pre) / (d_blk * d_pre * (f_blk - f_pre))
            };
            if 2.0 * s_try.abs() < s_pre.abs().min(3.0 * s_bis.abs() - delta) {
                s_pre = s_cur;
                s_cur = s_try;
            } else {
                s_pre = s_bis;
                s_cur = s_bis;
            }
        } else {
            s_pre = s_bis;
            s_cur = s_bis;
        }

        x_pre = x_cur;
        f_pre = f_cur;
        if s_cur.abs() > delta {
            x_cur += s_cur;
        } else {
            x_cur += if s_bis > 0.0 { delta } else { -delta };
        }

        f_cur = eval(x_cur)?;
        function_calls += 1;
    }

    Err(GammaError::NonConvergence {
        iterations: options.max_iterations,
        lower,
        upper,
    })
}
