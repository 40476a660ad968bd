//! Binary lottery description and validation of the four user-supplied parameters.

use serde::Serialize;

use crate::error::{GammaError, Result};

/// A binary lottery anchored at a stated certainty equivalent.
///
/// The lottery pays `wce + gain` with probability `p1` and `wce - loss` with
/// probability `1 - p1`. Construction validates that every wealth level the
/// utility function will see is strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LotteryInput {
    wce: f64,
    p1: f64,
    gain: f64,
    loss: f64,
}

impl LotteryInput {
    /// Creates a `LotteryInput` from validated components.
    pub fn new(wce: f64, p1: f64, gain: f64, loss: f64) -> Result<Self> {
        LotteryInputBuilder::new(wce)
            .win_probability(p1)
            .gain(gain)
            .loss(loss)
            .build()
    }

    /// Certainty equivalent `Wce`.
    pub fn wce(&self) -> f64 {
        self.wce
    }

    /// Probability of the winning outcome.
    pub fn p1(&self) -> f64 {
        self.p1
    }

    /// Probability of the losing outcome, `1 - p1`.
    pub fn p2(&self) -> f64 {
        1.0 - self.p1
    }

    /// Amount added to `Wce` on a win.
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Amount subtracted from `Wce` on a loss.
    pub fn loss(&self) -> f64 {
        self.loss
    }

    /// Wealth in the winning state, `Wce + gain`.
    pub fn outcome1(&self) -> f64 {
        self.wce + self.gain
    }

    /// Wealth in the losing state, `Wce - loss`.
    pub fn outcome2(&self) -> f64 {
        self.wce - self.loss
    }

    /// Expected wealth of the lottery.
    pub fn expected_value(&self) -> f64 {
        self.p1 * self.outcome1() + self.p2() * self.outcome2()
    }

    /// Returns the same lottery expressed in units of `Wce`.
    ///
    /// CRRA utility is homogeneous, so the indifference equation keeps the
    /// same roots after rescaling while the powers stay representable.
    pub fn normalized(&self) -> Self {
        Self {
            wce: 1.0,
            p1: self.p1,
            gain: self.gain / self.wce,
            loss: self.loss / self.wce,
        }
    }
}

/// Builder that validates the lottery before constructing [`LotteryInput`].
#[derive(Debug)]
pub struct LotteryInputBuilder {
    wce: f64,
    p1: f64,
    gain: f64,
    loss: f64,
}

impl LotteryInputBuilder {
    /// Start building a lottery around a certainty equivalent.
    ///
    /// Defaults to a fair coin with no gain and no loss.
    pub fn new(wce: f64) -> Self {
        Self {
            wce,
            p1: 0.5,
            gain: 0.0,
            loss: 0.0,
        }
    }

    /// Sets the probability of winning.
    pub fn win_probability(mut self, p1: f64) -> Self {
        self.p1 = p1;
        self
    }

    /// Sets the gain amount if the lottery is won.
    pub fn gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    /// Sets the loss amount if the lottery is lost.
    pub fn loss(mut self, loss: f64) -> Self {
        self.loss = loss;
        self
    }

    /// Finalizes construction after validating finiteness, probability and wealth levels.
    pub fn build(self) -> Result<LotteryInput> {
        for (field, value) in [
            ("certainty equivalent", self.wce),
            ("probability of winning", self.p1),
            ("gain", self.gain),
            ("loss", self.loss),
        ] {
            if !value.is_finite() {
                return Err(GammaError::NonFiniteInput { field, value });
            }
        }

        if !(0.0..=1.0).contains(&self.p1) {
            return Err(GammaError::InvalidProbability { value: self.p1 });
        }

        let lottery = LotteryInput {
            wce: self.wce,
            p1: self.p1,
            gain: self.gain,
            loss: self.loss,
        };

        for (label, value) in [
            ("certainty equivalent", lottery.wce()),
            ("winning outcome (Wce + gain)", lottery.outcome1()),
            ("losing outcome (Wce - loss)", lottery.outcome2()),
        ] {
            if value <= 0.0 {
                return Err(GammaError::NonPositiveWealth { label, value });
            }
        }

        Ok(lottery)
    }
}
