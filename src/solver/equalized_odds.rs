//! Equalized Odds Solver
//!
//! Aligns the ROC hulls of all groups on a shared false positive rate grid and searches
//! the region where all curves overlap. Groups whose curve lies above the chosen point
//! are pulled down to it by mixing in random guesses along the diagonal.
use crate::curve::{grid, interpolate_curve, InterpolatedPoint};
use crate::data::{GroupKey, GroupedDataset};
use crate::errors::FairnessError;
use crate::predictor::{InterpolatedPredictor, OperationMixture};
use crate::solver::{group_hulls, Constraint, Solution};
use crate::utils::first_argmin;
use log::{debug, info};
use std::collections::BTreeMap;

/// Calculate the ROC hull of every group, take the overlap of all of them, and select
/// the point of the overlap with minimal error.
///
/// Ties are resolved in favour of the lowest false positive rate.
///
/// * `data` - Validated samples grouped by sensitive attribute value.
/// * `grid_size` - Number of ticks on the false positive rate grid.
/// * `flip` - Allow flipping to negative weights if it improves accuracy.
/// * `parallel` - Build the per group hulls in parallel.
pub fn threshold_optimization_equalized_odds<K: GroupKey>(
    data: &GroupedDataset<K>,
    grid_size: usize,
    flip: bool,
    parallel: bool,
) -> Result<Solution<K>, FairnessError> {
    let x_grid = grid(grid_size);
    let roc = group_hulls(data, flip, parallel)
        .into_iter()
        .map(|(key, hull)| Ok((key, interpolate_curve(&hull, &x_grid)?)))
        .collect::<Result<Vec<_>, FairnessError>>()?;

    // The overlap of the ROC curves is the lowest y value at every given x.
    let y_min: Vec<f64> = (0..x_grid.len())
        .map(|i| roc.iter().map(|(_, curve)| curve[i].y).fold(f64::INFINITY, f64::min))
        .collect();

    // The error at any given x is the sum of
    // a) the proportion of negative labels times x, i.e. P[Y_hat=1 | Y=0] weighted, and
    // b) the proportion of positive labels times 1 - y_min, i.e. P[Y_hat=0 | Y=1] weighted.
    let n = data.n_samples as f64;
    let n_positive = data.n_positive as f64;
    let n_negative = data.n_negative() as f64;
    let error_given_x: Vec<f64> = x_grid
        .iter()
        .zip(&y_min)
        .map(|(x, y)| (n_negative / n) * x + (n_positive / n) * (1.0 - y))
        .collect();

    let i_best = first_argmin(&error_given_x).unwrap_or(0);
    let x_best = x_grid[i_best];
    let y_best = y_min[i_best];
    let error = error_given_x[i_best];
    info!(
        "Best equalized odds solution: error={:.3}, FP rate={:.3}, TP rate={:.3}",
        error, x_best, y_best
    );

    let predictors: BTreeMap<K, InterpolatedPredictor> = roc
        .into_iter()
        .map(|(key, curve)| {
            let point = &curve[i_best];
            let p_ignore = p_ignore(point, y_best);
            debug!(
                "Sensitive attribute value {:?}: TP rate {:.4} at FP rate {:.4}, p_ignore={:.4}",
                key, point.y, point.x, p_ignore
            );
            let mixture = OperationMixture::from(point);
            let predictor = if p_ignore > 0.0 {
                InterpolatedPredictor::DiagonalMixture {
                    mixture,
                    p_ignore,
                    prediction_constant: x_best,
                }
            } else {
                InterpolatedPredictor::Mixture(mixture)
            };
            (key, predictor)
        })
        .collect();

    Ok(Solution {
        constraint: Constraint::EqualizedOdds,
        predictors,
        x_best,
        y_best: Some(y_best),
        error,
    })
}

/// Probability of ignoring the score that moves `point` down to `y_best`.
///
/// Mixing the group's point `(x, y)` with the diagonal point `(x, x)` gives
/// `p_ignore * x + (1 - p_ignore) * y`, which equals `y_best` for
/// `p_ignore = (y - y_best) / (y - x)`. A point on the diagonal needs no mixing.
pub fn p_ignore(point: &InterpolatedPoint, y_best: f64) -> f64 {
    let vertical_distance_from_diagonal = point.y - point.x;
    if vertical_distance_from_diagonal <= 0.0 {
        return 0.0;
    }
    let difference_from_best_predictor = point.y - y_best;
    (difference_from_best_predictor / vertical_distance_from_diagonal).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::expected_rates;
    use crate::operation::ThresholdOperation;

    // Group A separates perfectly, group B only reaches a TP rate of 0.5 without false positives.
    // There are more negatives than positives, so the best shared point is (0, 0.5).
    const ATTRIBUTES: [&str; 9] = ["A", "A", "A", "A", "A", "B", "B", "B", "B"];
    const LABELS: [f64; 9] = [0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0];
    const SCORES: [f64; 9] = [0.1, 0.15, 0.2, 0.8, 0.9, 0.3, 0.6, 0.4, 0.7];

    fn group_data(key: &str) -> (Vec<f64>, Vec<f64>) {
        ATTRIBUTES
            .iter()
            .zip(LABELS.iter().zip(SCORES.iter()))
            .filter(|(a, _)| **a == key)
            .map(|(_, (l, s))| (*l, *s))
            .unzip()
    }

    fn solution(grid_size: usize) -> Solution<&'static str> {
        let data = GroupedDataset::new(&ATTRIBUTES, &LABELS, &SCORES).unwrap();
        threshold_optimization_equalized_odds(&data, grid_size, true, false).unwrap()
    }

    #[test]
    fn test_overlap_solution() {
        let solution = solution(100);
        assert_eq!(solution.x_best, 0.0);
        assert_eq!(solution.y_best, Some(0.5));
        assert!((solution.error - 4.0 / 9.0 * 0.5).abs() < 1e-12);

        match solution.predictors["A"] {
            InterpolatedPredictor::DiagonalMixture {
                p_ignore,
                prediction_constant,
                ..
            } => {
                assert!((p_ignore - 0.5).abs() < 1e-12);
                assert_eq!(prediction_constant, 0.0);
            }
            other => panic!("expected a diagonal mixture, got {:?}", other),
        }
        assert!(matches!(solution.predictors["B"], InterpolatedPredictor::Mixture(_)));
    }

    #[test]
    fn test_groups_share_rates() {
        let grid_size = 100;
        let solution = solution(grid_size);
        let y_best = solution.y_best.unwrap();
        for key in ["A", "B"] {
            let (labels, scores) = group_data(key);
            let predictor = solution.predictors[key];
            let probabilities: Vec<f64> = scores.iter().map(|s| predictor.positive_probability(*s)).collect();
            let rates = expected_rates(&labels, &probabilities);
            assert!(
                (rates.false_positive_rate - solution.x_best).abs() <= 1.0 / grid_size as f64,
                "group {} FP rate {}",
                key,
                rates.false_positive_rate
            );
            assert!(
                (rates.true_positive_rate - y_best).abs() <= 1.0 / grid_size as f64,
                "group {} TP rate {}",
                key,
                rates.true_positive_rate
            );
        }
    }

    #[test]
    fn test_more_positives_moves_solution_right() {
        let attributes = ["A", "A", "A", "A", "A", "A", "B", "B", "B", "B", "B", "B"];
        let labels = [0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        let scores = [0.1, 0.5, 0.6, 0.7, 0.8, 0.9, 0.3, 0.6, 0.4, 0.7, 0.35, 0.75];
        let data = GroupedDataset::new(&attributes, &labels, &scores).unwrap();
        let solution = threshold_optimization_equalized_odds(&data, 20, true, false).unwrap();
        let y_best = solution.y_best.unwrap();
        assert!(solution.x_best > 0.0);
        assert!(y_best > 0.5);

        for key in ["A", "B"] {
            let (l, s): (Vec<f64>, Vec<f64>) = attributes
                .iter()
                .zip(labels.iter().zip(scores.iter()))
                .filter(|(a, _)| **a == key)
                .map(|(_, (l, s))| (*l, *s))
                .unzip();
            let predictor = solution.predictors[key];
            let probabilities: Vec<f64> = s.iter().map(|s| predictor.positive_probability(*s)).collect();
            let rates = expected_rates(&l, &probabilities);
            assert!((rates.false_positive_rate - solution.x_best).abs() < 1e-9);
            assert!((rates.true_positive_rate - y_best).abs() < 1e-9);
        }
    }

    #[test]
    fn test_p_ignore() {
        let op = ThresholdOperation::Constant(true);
        let point = InterpolatedPoint {
            x: 0.2,
            y: 0.8,
            p0: 1.0,
            operation0: op,
            p1: 0.0,
            operation1: op,
        };
        assert!((p_ignore(&point, 0.5) - 0.5).abs() < 1e-12);
        assert_eq!(p_ignore(&point, 0.8), 0.0);
        let diagonal = InterpolatedPoint { y: 0.2, ..point };
        assert_eq!(p_ignore(&diagonal, 0.2), 0.0);
    }
}
