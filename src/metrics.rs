//! Metrics
//!
//! Expected classification rates of a randomized predictor, computed from its
//! positive probabilities instead of sampled labels.
use serde::{Deserialize, Serialize};

/// Expected rates of a randomized predictor over a set of samples.
/// Rates conditioned on a label that never occurs are NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupRates {
    /// P[Y_hat=1]
    pub selection_rate: f64,
    /// P[Y_hat=1 | Y=1]
    pub true_positive_rate: f64,
    /// P[Y_hat=1 | Y=0]
    pub false_positive_rate: f64,
    /// P[Y_hat != Y]
    pub error_rate: f64,
}

/// Calculate the expected rates given the labels and the predicted positive probabilities.
///
/// * `y` - Binary labels.
/// * `probabilities` - Probability of predicting the positive label for each sample.
pub fn expected_rates(y: &[f64], probabilities: &[f64]) -> GroupRates {
    let mut positives = 0.0;
    let mut negatives = 0.0;
    let mut true_positives = 0.0;
    let mut false_positives = 0.0;
    for (y_, p_) in y.iter().zip(probabilities) {
        if *y_ == 1.0 {
            positives += 1.0;
            true_positives += p_;
        } else {
            negatives += 1.0;
            false_positives += p_;
        }
    }
    let n = positives + negatives;
    let rate = |count: f64, total: f64| if total > 0.0 { count / total } else { f64::NAN };

    GroupRates {
        selection_rate: rate(true_positives + false_positives, n),
        true_positive_rate: rate(true_positives, positives),
        false_positive_rate: rate(false_positives, negatives),
        error_rate: rate(false_positives + (positives - true_positives), n),
    }
}
