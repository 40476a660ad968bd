//! CRRA utility and the lottery indifference objective.

use crate::error::{GammaError, Result};
use crate::lottery::LotteryInput;

/// Constant relative risk aversion utility of wealth `x` at coefficient `gamma`.
///
/// Uses `ln(x)` when `gamma` is exactly one and `x^(1-gamma) / (1-gamma)`
/// otherwise. No domain checks are performed; see [`checked_utility`].
pub fn utility(x: f64, gamma: f64) -> f64 {
    if gamma == 1.0 {
        x.ln()
    } else {
        let exponent = 1.0 - gamma;
        x.powf(exponent) / exponent
    }
}

/// Like [`utility`] but rejects non-positive wealth and non-finite results.
pub fn checked_utility(x: f64, gamma: f64) -> Result<f64> {
    if x <= 0.0 || x.is_nan() {
        return Err(GammaError::NonPositiveWealth {
            label: "utility argument",
            value: x,
        });
    }
    let value = utility(x, gamma);
    if !value.is_finite() {
        return Err(GammaError::numerical("utility evaluation", gamma));
    }
    Ok(value)
}

/// Difference between the expected utility of a lottery and the utility of its
/// certainty equivalent, as a function of `gamma`.
///
/// A root is a `gamma` at which the decision-maker is indifferent between the
/// lottery and receiving `Wce` for sure.
#[derive(Clone, Copy, Debug)]
pub struct IndifferenceObjective {
    lottery: LotteryInput,
}

impl IndifferenceObjective {
    pub fn new(lottery: LotteryInput) -> Self {
        Self { lottery }
    }

    /// The lottery the objective is built from.
    pub fn lottery(&self) -> &LotteryInput {
        &self.lottery
    }

    /// Probability-weighted utility of the two lottery outcomes.
    pub fn expected_utility(&self, gamma: f64) -> f64 {
        let lottery = &self.lottery;
        lottery.p1() * utility(lottery.outcome1(), gamma)
            + lottery.p2() * utility(lottery.outcome2(), gamma)
    }

    /// Utility of the certainty equivalent.
    pub fn certainty_utility(&self, gamma: f64) -> f64 {
        utility(self.lottery.wce(), gamma)
    }

    /// `E[U(lottery)] - U(Wce)` at `gamma`.
    pub fn evaluate(&self, gamma: f64) -> f64 {
        self.expected_utility(gamma) - self.certainty_utility(gamma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn utility_matches_power_form_away_from_one() {
        for &(x, gamma) in &[(2.0, 0.0), (2.0, 0.5), (150.0, 3.0), (0.25, 7.5)] {
            let expected = f64::powf(x, 1.0 - gamma) / (1.0 - gamma);
            assert_eq!(utility(x, gamma), expected);
        }
        // Risk neutrality is linear utility.
        assert_eq!(utility(42.0, 0.0), 42.0);
    }

    #[test]
    fn utility_is_log_at_exactly_one() {
        assert_eq!(utility(20_000.0, 1.0), 20_000.0_f64.ln());
        // Close to one the power form approaches the log up to a constant, but is not switched.
        let near = utility(20_000.0, 1.0 + 1e-9);
        assert!(near < 0.0);
    }

    #[test]
    fn checked_utility_rejects_non_positive_wealth() {
        assert!(matches!(
            checked_utility(0.0, 2.0),
            Err(GammaError::NonPositiveWealth { .. })
        ));
        assert!(matches!(
            checked_utility(-5.0, 0.5),
            Err(GammaError::NonPositiveWealth { .. })
        ));
        assert_relative_eq!(checked_utility(4.0, 0.5).unwrap(), 4.0);
    }

    #[test]
    fn objective_at_zero_is_expected_value_gap() {
        let lottery = LotteryInput::new(20_000.0, 0.5, 110.0, 100.0).unwrap();
        let objective = IndifferenceObjective::new(lottery);
        assert_relative_eq!(objective.evaluate(0.0), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_lottery_compares_single_outcome_with_certainty() {
        let certain_win = LotteryInput::new(100.0, 1.0, 20.0, 10.0).unwrap();
        let objective = IndifferenceObjective::new(certain_win);
        for &gamma in &[0.0, 0.5, 1.0, 2.0, 10.0] {
            let expected = utility(120.0, gamma) - utility(100.0, gamma);
            assert_relative_eq!(objective.evaluate(gamma), expected, epsilon = 1e-12);
            assert!(objective.evaluate(gamma) > 0.0);
        }

        let certain_loss = LotteryInput::new(100.0, 0.0, 20.0, 10.0).unwrap();
        let objective = IndifferenceObjective::new(certain_loss);
        for &gamma in &[0.0, 1.0, 4.0] {
            let expected = utility(90.0, gamma) - utility(100.0, gamma);
            assert_relative_eq!(objective.evaluate(gamma), expected, epsilon = 1e-12);
        }
    }
}
