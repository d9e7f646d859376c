//! Interpolated Predictor
//!
//! The randomized decision rule fitted for a single group. It mixes two threshold
//! operations and, for equalized odds, may additionally fall back to a pure random
//! guess in order to reach an operating point below the group's own ROC curve.
use crate::curve::InterpolatedPoint;
use crate::operation::ThresholdOperation;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Apply `operation0` with probability `p0` and `operation1` with probability `p1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationMixture {
    pub p0: f64,
    pub operation0: ThresholdOperation,
    pub p1: f64,
    pub operation1: ThresholdOperation,
}

impl OperationMixture {
    pub fn positive_probability(&self, score: f64) -> f64 {
        self.p0 * self.operation0.indicator(score) + self.p1 * self.operation1.indicator(score)
    }
}

impl From<&InterpolatedPoint> for OperationMixture {
    fn from(point: &InterpolatedPoint) -> Self {
        OperationMixture {
            p0: point.p0,
            operation0: point.operation0,
            p1: point.p1,
            operation1: point.operation1,
        }
    }
}

/// The post-processed predictor of one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InterpolatedPredictor {
    /// Mix two threshold operations.
    Mixture(OperationMixture),
    /// With probability `p_ignore` ignore the score and predict 1 with probability
    /// `prediction_constant`, otherwise use the mixture. This moves the group's
    /// operating point towards the diagonal of the ROC plot.
    DiagonalMixture {
        mixture: OperationMixture,
        p_ignore: f64,
        prediction_constant: f64,
    },
}

impl InterpolatedPredictor {
    /// Probability of predicting the positive label for `score`.
    pub fn positive_probability(&self, score: f64) -> f64 {
        match self {
            InterpolatedPredictor::Mixture(mixture) => mixture.positive_probability(score),
            InterpolatedPredictor::DiagonalMixture {
                mixture,
                p_ignore,
                prediction_constant,
            } => (1.0 - p_ignore) * mixture.positive_probability(score) + p_ignore * prediction_constant,
        }
    }

    /// Draw a label for `score`. Repeated calls for the same score may differ.
    pub fn predict<R: Rng + ?Sized>(&self, score: f64, rng: &mut R) -> u8 {
        u8::from(rng.gen::<f64>() < self.positive_probability(score))
    }

    /// Probability of ignoring the score, zero for a plain mixture.
    pub fn p_ignore(&self) -> f64 {
        match self {
            InterpolatedPredictor::Mixture(_) => 0.0,
            InterpolatedPredictor::DiagonalMixture { p_ignore, .. } => *p_ignore,
        }
    }

    pub fn mixture(&self) -> &OperationMixture {
        match self {
            InterpolatedPredictor::Mixture(mixture) => mixture,
            InterpolatedPredictor::DiagonalMixture { mixture, .. } => mixture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mixture() -> OperationMixture {
        OperationMixture {
            p0: 0.25,
            operation0: ThresholdOperation::Greater(0.7),
            p1: 0.75,
            operation1: ThresholdOperation::Greater(0.3),
        }
    }

    #[test]
    fn test_mixture_probability() {
        let predictor = InterpolatedPredictor::Mixture(mixture());
        assert_eq!(predictor.positive_probability(0.9), 1.0);
        assert_eq!(predictor.positive_probability(0.5), 0.75);
        assert_eq!(predictor.positive_probability(0.1), 0.0);
        assert_eq!(predictor.p_ignore(), 0.0);
    }

    #[test]
    fn test_diagonal_mixture_probability() {
        let predictor = InterpolatedPredictor::DiagonalMixture {
            mixture: mixture(),
            p_ignore: 0.5,
            prediction_constant: 0.2,
        };
        assert!((predictor.positive_probability(0.9) - 0.6).abs() < 1e-12);
        assert!((predictor.positive_probability(0.5) - 0.475).abs() < 1e-12);
        assert!((predictor.positive_probability(0.1) - 0.1).abs() < 1e-12);
        assert_eq!(predictor.p_ignore(), 0.5);
        assert_eq!(predictor.mixture(), &mixture());
    }

    #[test]
    fn test_predict_draws_bernoulli() {
        let predictor = InterpolatedPredictor::Mixture(mixture());
        let mut rng = StdRng::seed_from_u64(0);
        assert!((0..100).all(|_| predictor.predict(0.9, &mut rng) == 1));
        assert!((0..100).all(|_| predictor.predict(0.1, &mut rng) == 0));

        let n = 20_000;
        let positives: usize = (0..n).map(|_| predictor.predict(0.5, &mut rng) as usize).sum();
        let rate = positives as f64 / n as f64;
        assert!((rate - 0.75).abs() < 0.02, "rate {}", rate);
    }
}
