//! Adaptive bracket search for the implied CRRA coefficient.

use log::{debug, info, warn};
use serde::Serialize;

use crate::classification::RiskBehavior;
use crate::curve::UtilityCurve;
use crate::error::{GammaError, Result};
use crate::lottery::LotteryInput;
use crate::options::{CurveOptions, SearchConfig};
use crate::solving::{brent_root, RootSummary};
use crate::utility::{checked_utility, IndifferenceObjective};

/// Lower end of every probed bracket.
const GAMMA_FLOOR: f64 = 0.0;

/// Solves the indifference equation `E[U(lottery)] = U(Wce)` for Gamma.
#[derive(Clone, Debug)]
pub struct GammaSolver {
    lottery: LotteryInput,
    config: SearchConfig,
}

impl GammaSolver {
    /// Constructs a solver after validating the search configuration.
    pub fn new(lottery: LotteryInput, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { lottery, config })
    }

    /// Accessor for the lottery.
    pub fn lottery(&self) -> &LotteryInput {
        &self.lottery
    }

    /// Accessor for the search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The indifference objective in the caller's units.
    pub fn objective(&self) -> IndifferenceObjective {
        IndifferenceObjective::new(self.lottery)
    }

    /// Runs the doubling bracket search followed by Brent's method.
    ///
    /// Starting from `initial_upper_bound`, the bracket `[0, upper]` is doubled
    /// until the objective changes sign or `upper` exceeds `max_limit`. The
    /// first bracket found is final: if Brent's method fails inside it, the
    /// search stops with [`GammaError::NonConvergence`] rather than widening
    /// the bracket further.
    pub fn solve(&self) -> Result<SolveResult> {
        let search_lottery = if self.config.normalize_wealth {
            self.lottery.normalized()
        } else {
            self.lottery
        };
        let search_objective = IndifferenceObjective::new(search_lottery);

        let (root, probed_upper_bounds) = search_bracket(&search_objective, &self.config)?;
        let gamma = root.root;
        let utilities = Utilities::at(&self.lottery, gamma)?;
        let behavior = RiskBehavior::from_gamma(gamma);

        info!(
            "implied gamma {gamma:.6} ({behavior}) after {} bracket probes and {} Brent iterations",
            probed_upper_bounds.len(),
            root.iterations
        );

        let bracket_upper = probed_upper_bounds
            .last()
            .copied()
            .unwrap_or(self.config.initial_upper_bound);

        Ok(SolveResult {
            gamma,
            converged: root.converged,
            utilities,
            behavior,
            search: SearchSummary {
                probed_upper_bounds,
                bracket: (GAMMA_FLOOR, bracket_upper),
                normalized: self.config.normalize_wealth,
                root,
            },
            lottery: self.lottery,
            curve_options: self.config.curve.clone(),
        })
    }
}

/// Solves for Gamma with the default [`SearchConfig`].
pub fn implied_gamma(lottery: LotteryInput) -> Result<SolveResult> {
    GammaSolver::new(lottery, SearchConfig::default())?.solve()
}

fn opposite_signs(a: f64, b: f64) -> bool {
    (a < 0.0 && b > 0.0) || (a > 0.0 && b < 0.0)
}

/// Doubles the upper bound until `[0, upper]` brackets a sign change, then refines it.
fn search_bracket(
    objective: &IndifferenceObjective,
    config: &SearchConfig,
) -> Result<(RootSummary, Vec<f64>)> {
    let mut upper = config.initial_upper_bound;
    let mut probed = Vec::new();

    while upper <= config.max_limit {
        probed.push(upper);
        let f_a = objective.evaluate(GAMMA_FLOOR);
        let f_b = objective.evaluate(upper);
        debug!("bracket probe [{GAMMA_FLOOR}, {upper}]: f_a = {f_a:e}, f_b = {f_b:e}");

        if opposite_signs(f_a, f_b) {
            let root = brent_root(|gamma| objective.evaluate(gamma), GAMMA_FLOOR, upper, &config.root)
                .map_err(|err| {
                    warn!("root refinement failed inside bracket [{GAMMA_FLOOR}, {upper}]: {err}");
                    err
                })?;
            debug!(
                "brent converged to {} after {} iterations ({} evaluations)",
                root.root, root.iterations, root.function_calls
            );
            return Ok((root, probed));
        }

        if !f_a.is_finite() || !f_b.is_finite() {
            warn!("non-finite objective while probing [{GAMMA_FLOOR}, {upper}]; widening anyway");
        }
        upper *= 2.0;
    }

    Err(GammaError::NoRootFound {
        max_limit: config.max_limit,
        last_upper_bound: probed.last().copied().unwrap_or(config.initial_upper_bound),
        probes: probed.len(),
    })
}

/// Utilities evaluated at the implied Gamma, in the caller's units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Utilities {
    /// `U(Wce + gain)`
    pub u_win: f64,
    /// `U(Wce - loss)`
    pub u_loss: f64,
    /// `p1 * U(win) + p2 * U(loss)`
    pub u_lottery: f64,
    /// `U(Wce)`
    pub u_ce: f64,
}

impl Utilities {
    /// Evaluates all four diagnostic utilities at `gamma`.
    pub fn at(lottery: &LotteryInput, gamma: f64) -> Result<Self> {
        let u_win = checked_utility(lottery.outcome1(), gamma)?;
        let u_loss = checked_utility(lottery.outcome2(), gamma)?;
        let u_lottery = lottery.p1() * u_win + lottery.p2() * u_loss;
        let u_ce = checked_utility(lottery.wce(), gamma)?;
        Ok(Self {
            u_win,
            u_loss,
            u_lottery,
            u_ce,
        })
    }
}

/// Diagnostics describing how the bracket and root were found.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchSummary {
    /// Upper bounds probed in order: `initial, 2 * initial, 4 * initial, ...`.
    pub probed_upper_bounds: Vec<f64>,
    /// Bracket handed to Brent's method.
    pub bracket: (f64, f64),
    /// Whether the search ran on the lottery rescaled by `Wce`.
    pub normalized: bool,
    /// Root finder diagnostics. `value` is in normalized units when `normalized` is set.
    pub root: RootSummary,
}

impl SearchSummary {
    /// Number of times the bracket was doubled before a sign change appeared.
    pub fn expansions(&self) -> usize {
        self.probed_upper_bounds.len().saturating_sub(1)
    }
}

/// Outcome of a successful Gamma search.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SolveResult {
    /// Implied coefficient of relative risk aversion.
    pub gamma: f64,
    /// Whether the root finder met its tolerance; always set on returned results.
    pub converged: bool,
    /// Utilities at `gamma`.
    pub utilities: Utilities,
    /// Risk behaviour band of `gamma`.
    pub behavior: RiskBehavior,
    /// Bracket search and root finder diagnostics.
    pub search: SearchSummary,
    #[serde(skip)]
    lottery: LotteryInput,
    #[serde(skip)]
    curve_options: CurveOptions,
}

impl SolveResult {
    /// The lottery the result was computed for.
    pub fn lottery(&self) -> &LotteryInput {
        &self.lottery
    }

    /// Lazily samples `(gamma, E[U(lottery)] - U(Wce))` on
    /// `[start, span_multiplier * gamma]` in the caller's units.
    pub fn curve(&self) -> UtilityCurve {
        let options = &self.curve_options;
        UtilityCurve::new(
            IndifferenceObjective::new(self.lottery),
            options.start,
            options.span_multiplier * self.gamma,
            options.samples,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solving::RootOptions;
    use approx::assert_relative_eq;

    fn reference_lottery() -> LotteryInput {
        LotteryInput::new(20_000.0, 0.5, 110.0, 100.0).unwrap()
    }

    #[test]
    fn doubles_once_for_reference_lottery() {
        let result = implied_gamma(reference_lottery()).unwrap();
        assert!(result.converged);
        assert_eq!(result.search.probed_upper_bounds, vec![10.0, 20.0]);
        assert_eq!(result.search.expansions(), 1);
        assert_eq!(result.search.bracket, (0.0, 20.0));
        assert_relative_eq!(result.gamma, 18.170_256_556, epsilon = 1e-6);
        assert_eq!(result.behavior, RiskBehavior::HighlyRiskAverse);
    }

    #[test]
    fn root_inside_initial_bracket_needs_no_expansion() {
        let lottery = LotteryInput::new(100.0, 0.5, 30.0, 20.0).unwrap();
        let result = implied_gamma(lottery).unwrap();
        assert_eq!(result.search.probed_upper_bounds, vec![10.0]);
        assert_relative_eq!(result.gamma, 1.668_466_881, epsilon = 1e-8);
        assert_eq!(result.behavior, RiskBehavior::ModeratelyRiskAverse);
    }

    #[test]
    fn utilities_are_consistent_at_the_root() {
        let lottery = LotteryInput::new(100.0, 0.5, 50.0, 40.0).unwrap();
        let result = implied_gamma(lottery).unwrap();
        let u = result.utilities;
        assert!(u.u_win > u.u_loss);
        assert_relative_eq!(u.u_lottery, 0.5 * u.u_win + 0.5 * u.u_loss);
        assert_relative_eq!(u.u_lottery, u.u_ce, epsilon = 1e-9);
        assert_eq!(result.behavior, RiskBehavior::ApproximatelyRiskNeutral);
    }

    #[test]
    fn non_convergence_stops_the_search_without_widening() {
        let config = SearchConfig::default().with_root_options(RootOptions {
            max_iterations: 1,
            ..RootOptions::default()
        });
        let solver = GammaSolver::new(reference_lottery(), config).unwrap();
        let result = solver.solve();
        assert!(matches!(
            result,
            Err(GammaError::NonConvergence { lower, upper, .. }) if lower == 0.0 && upper == 20.0
        ));
    }

    #[test]
    fn reports_no_root_after_exhausting_doublings() {
        let certain_win = LotteryInput::new(100.0, 1.0, 20.0, 10.0).unwrap();
        let result = implied_gamma(certain_win);
        assert_eq!(
            result,
            Err(GammaError::NoRootFound {
                max_limit: 1_000.0,
                last_upper_bound: 640.0,
                probes: 7,
            })
        );
    }

    #[test]
    fn rejects_invalid_config_before_solving() {
        let config = SearchConfig::default().with_max_limit(5.0);
        assert!(matches!(
            GammaSolver::new(reference_lottery(), config),
            Err(GammaError::InvalidSearchConfig { .. })
        ));
    }

    #[test]
    fn curve_spans_twice_the_root() {
        let result = implied_gamma(reference_lottery()).unwrap();
        let points: Vec<_> = result.curve().collect();
        assert_eq!(points.len(), 300);
        assert_eq!(points[0].gamma, 0.01);
        assert_eq!(points[299].gamma, 2.0 * result.gamma);
        // The gap is positive for small gamma and negative past the root.
        assert!(points[0].difference > 0.0);
        assert!(points[299].difference < 0.0);
    }

    #[test]
    fn opposite_signs_ignores_zero_and_nan() {
        assert!(opposite_signs(-1.0, 2.0));
        assert!(opposite_signs(3.0, -1e-300));
        assert!(!opposite_signs(0.0, -1.0));
        assert!(!opposite_signs(f64::NAN, -1.0));
        assert!(!opposite_signs(1.0, 1.0));
    }
}
