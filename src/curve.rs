//! Lazily sampled `(gamma, objective(gamma))` pairs for plotting the indifference gap.

use serde::Serialize;

use crate::utility::IndifferenceObjective;

/// A single point of the indifference curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CurvePoint {
    pub gamma: f64,
    /// `E[U(lottery)] - U(Wce)` at `gamma`.
    pub difference: f64,
}

/// Evenly spaced samples of the objective between `start` and `end`, both included.
///
/// The iterator evaluates the objective on demand and is consumed once.
#[derive(Clone, Debug)]
pub struct UtilityCurve {
    objective: IndifferenceObjective,
    start: f64,
    end: f64,
    samples: usize,
    next: usize,
}

impl UtilityCurve {
    pub fn new(objective: IndifferenceObjective, start: f64, end: f64, samples: usize) -> Self {
        Self {
            objective,
            start,
            end,
            samples,
            next: 0,
        }
    }

    fn gamma_at(&self, index: usize) -> f64 {
        if self.samples == 1 {
            return self.start;
        }
        if index + 1 == self.samples {
            return self.end;
        }
        let step = (self.end - self.start) / (self.samples - 1) as f64;
        self.start + step * index as f64
    }
}

impl Iterator for UtilityCurve {
    type Item = CurvePoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.samples {
            return None;
        }
        let gamma = self.gamma_at(self.next);
        self.next += 1;
        Some(CurvePoint {
            gamma,
            difference: self.objective.evaluate(gamma),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.samples - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for UtilityCurve {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lottery::LotteryInput;
    use approx::assert_relative_eq;

    fn objective() -> IndifferenceObjective {
        IndifferenceObjective::new(LotteryInput::new(100.0, 0.5, 30.0, 20.0).unwrap())
    }

    #[test]
    fn samples_are_evenly_spaced_and_include_endpoints() {
        let points: Vec<_> = UtilityCurve::new(objective(), 0.01, 4.0, 300).collect();
        assert_eq!(points.len(), 300);
        assert_eq!(points[0].gamma, 0.01);
        assert_eq!(points[299].gamma, 4.0);
        let step = (4.0 - 0.01) / 299.0;
        assert_relative_eq!(points[1].gamma - points[0].gamma, step, epsilon = 1e-12);
        assert_relative_eq!(points[150].gamma, 0.01 + 150.0 * step, epsilon = 1e-12);
    }

    #[test]
    fn differences_come_from_the_objective() {
        let objective = objective();
        for point in UtilityCurve::new(objective, 0.5, 3.0, 11) {
            assert_eq!(point.difference, objective.evaluate(point.gamma));
        }
    }

    #[test]
    fn reports_exact_length() {
        let mut curve = UtilityCurve::new(objective(), 0.01, 1.0, 5);
        assert_eq!(curve.len(), 5);
        curve.next();
        curve.next();
        assert_eq!(curve.len(), 3);
        assert_eq!(curve.count(), 3);
    }
}
