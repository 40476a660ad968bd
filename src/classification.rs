//! Fixed-threshold interpretation of an implied Gamma.

use std::fmt;

use serde::Serialize;

/// Upper end of the approximately risk-neutral band (exclusive).
pub const RISK_NEUTRAL_CEILING: f64 = 1.0;
/// Upper end of the moderately risk-averse band (inclusive).
pub const MODERATE_AVERSION_CEILING: f64 = 3.0;

/// Categorical risk behaviour implied by a Gamma value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBehavior {
    /// `gamma < 1`
    ApproximatelyRiskNeutral,
    /// `1 <= gamma <= 3`
    ModeratelyRiskAverse,
    /// `gamma > 3`
    HighlyRiskAverse,
}

impl RiskBehavior {
    pub fn from_gamma(gamma: f64) -> Self {
        if gamma < RISK_NEUTRAL_CEILING {
            Self::ApproximatelyRiskNeutral
        } else if (RISK_NEUTRAL_CEILING..=MODERATE_AVERSION_CEILING).contains(&gamma) {
            Self::ModeratelyRiskAverse
        } else {
            Self::HighlyRiskAverse
        }
    }

    /// Sentence shown to end users.
    pub fn description(&self) -> &'static str {
        match self {
            Self::ApproximatelyRiskNeutral => "The individual is approximately risk-neutral.",
            Self::ModeratelyRiskAverse => "The individual is moderately risk-averse.",
            Self::HighlyRiskAverse => "The individual is highly risk-averse.",
        }
    }
}

impl fmt::Display for RiskBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ApproximatelyRiskNeutral => "approximately risk-neutral",
            Self::ModeratelyRiskAverse => "moderately risk-averse",
            Self::HighlyRiskAverse => "highly risk-averse",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive_on_the_moderate_band() {
        assert_eq!(RiskBehavior::from_gamma(0.0), RiskBehavior::ApproximatelyRiskNeutral);
        assert_eq!(RiskBehavior::from_gamma(0.999), RiskBehavior::ApproximatelyRiskNeutral);
        assert_eq!(RiskBehavior::from_gamma(1.0), RiskBehavior::ModeratelyRiskAverse);
        assert_eq!(RiskBehavior::from_gamma(3.0), RiskBehavior::ModeratelyRiskAverse);
        assert_eq!(RiskBehavior::from_gamma(3.0001), RiskBehavior::HighlyRiskAverse);
        assert_eq!(RiskBehavior::from_gamma(18.17), RiskBehavior::HighlyRiskAverse);
    }

    #[test]
    fn displays_short_label() {
        assert_eq!(RiskBehavior::ModeratelyRiskAverse.to_string(), "moderately risk-averse");
        assert!(RiskBehavior::HighlyRiskAverse
            .description()
            .contains("highly risk-averse"));
    }
}
