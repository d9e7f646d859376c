//! Threshold Operations
//!
//! The raw decision rules recorded on every ROC curve vertex. A rule maps a score
//! to a hard 0/1 decision; randomized rules are built by mixing two of them.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A deterministic decision rule over a classifier score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThresholdOperation {
    /// Predict 1 when the score is strictly greater than the threshold.
    Greater(f64),
    /// Predict 1 when the score is strictly less than the threshold.
    /// Used for flipped hypotheses.
    Less(f64),
    /// Predict the same label for every score.
    Constant(bool),
}

impl ThresholdOperation {
    /// Apply the rule to a single score.
    #[inline]
    pub fn apply(&self, score: f64) -> bool {
        match *self {
            ThresholdOperation::Greater(t) => score > t,
            ThresholdOperation::Less(t) => score < t,
            ThresholdOperation::Constant(c) => c,
        }
    }

    /// The rule predicting the opposite label, for every score that is not on the threshold.
    pub fn flipped(&self) -> Self {
        match *self {
            ThresholdOperation::Greater(t) => ThresholdOperation::Less(t),
            ThresholdOperation::Less(t) => ThresholdOperation::Greater(t),
            ThresholdOperation::Constant(c) => ThresholdOperation::Constant(!c),
        }
    }

    /// Apply the rule and return the decision as 0.0 or 1.0.
    #[inline]
    pub fn indicator(&self, score: f64) -> f64 {
        if self.apply(score) {
            1.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for ThresholdOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdOperation::Greater(t) => write!(f, "[>{}]", t),
            ThresholdOperation::Less(t) => write!(f, "[<{}]", t),
            ThresholdOperation::Constant(c) => write!(f, "[={}]", u8::from(*c)),
        }
    }
}
