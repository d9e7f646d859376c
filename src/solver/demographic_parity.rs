//! Demographic Parity Solver
//!
//! Re-expresses every group's ROC hull as a curve of error over selection rate, so the
//! shared grid axis is the constrained quantity itself. The grid point with the lowest
//! population weighted error is then feasible for every group by construction.
use crate::curve::{grid, interpolate_curve, CurvePoint};
use crate::data::{GroupKey, GroupedDataset};
use crate::errors::FairnessError;
use crate::predictor::{InterpolatedPredictor, OperationMixture};
use crate::solver::{group_hulls, Constraint, Solution};
use crate::utils::{first_argmin, fmt_vec_output};
use log::{debug, info};
use std::collections::BTreeMap;

/// Calculate selection and error rates of every group at the hull vertices, weigh each
/// group's error by its share of the data, and pick the selection rate of minimal error.
///
/// Ties are resolved in favour of the lowest selection rate.
///
/// * `data` - Validated samples grouped by sensitive attribute value.
/// * `grid_size` - Number of ticks on the selection rate grid.
/// * `flip` - Allow flipping to negative weights if it improves accuracy.
/// * `parallel` - Build the per group hulls in parallel.
pub fn threshold_optimization_demographic_parity<K: GroupKey>(
    data: &GroupedDataset<K>,
    grid_size: usize,
    flip: bool,
    parallel: bool,
) -> Result<Solution<K>, FairnessError> {
    let x_grid = grid(grid_size);
    let mut error_given_selection = vec![0.0; x_grid.len()];
    let mut selection_error_curves = Vec::with_capacity(data.groups.len());

    for (key, roc_convex_hull) in group_hulls(data, flip, parallel) {
        let group = &data.groups[&key];
        let n_group = group.len() as f64;
        let n_positive = group.n_positive() as f64;
        let n_negative = n_group - n_positive;
        let p_attribute = data.group_proportion(&key);

        let selection_error: Vec<CurvePoint> = roc_convex_hull
            .iter()
            .map(|p| {
                let fraction_negative_label_positive_sample = (n_negative / n_group) * p.x;
                let fraction_positive_label_positive_sample = (n_positive / n_group) * p.y;
                let fraction_positive_label_negative_sample = (n_positive / n_group) * (1.0 - p.y);
                CurvePoint::new(
                    fraction_negative_label_positive_sample + fraction_positive_label_positive_sample,
                    fraction_negative_label_positive_sample + fraction_positive_label_negative_sample,
                    p.operation,
                )
            })
            .collect();
        debug!(
            "Sensitive attribute value {:?}: selection [{}], error [{}]",
            key,
            fmt_vec_output(&selection_error.iter().map(|p| p.x).collect::<Vec<_>>()),
            fmt_vec_output(&selection_error.iter().map(|p| p.y).collect::<Vec<_>>()),
        );

        let curve = interpolate_curve(&selection_error, &x_grid)?;
        for (e, point) in error_given_selection.iter_mut().zip(&curve) {
            *e += p_attribute * point.y;
        }
        selection_error_curves.push((key, curve));
    }

    let i_best = first_argmin(&error_given_selection).unwrap_or(0);
    let x_best = x_grid[i_best];
    let error = error_given_selection[i_best];
    info!(
        "Best demographic parity solution: error={:.3}, selection rate={:.3}",
        error, x_best
    );

    let predictors: BTreeMap<K, InterpolatedPredictor> = selection_error_curves
        .into_iter()
        .map(|(key, curve)| {
            let point = &curve[i_best];
            (key, InterpolatedPredictor::Mixture(OperationMixture::from(point)))
        })
        .collect();

    Ok(Solution {
        constraint: Constraint::DemographicParity,
        predictors,
        x_best,
        y_best: None,
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::expected_rates;

    fn fit(attributes: &[&'static str], labels: &[f64], scores: &[f64], grid_size: usize) -> Solution<&'static str> {
        let data = GroupedDataset::new(attributes, labels, scores).unwrap();
        threshold_optimization_demographic_parity(&data, grid_size, true, false).unwrap()
    }

    #[test]
    fn test_two_separable_groups() {
        let attributes = ["A", "A", "B", "B"];
        let labels = [0.0, 1.0, 0.0, 1.0];
        let scores = [0.1, 0.9, 0.2, 0.8];
        let solution = fit(&attributes, &labels, &scores, 100);

        assert_eq!(solution.x_best, 0.5);
        assert!(solution.error.abs() < 1e-12);
        assert_eq!(solution.y_best, None);
        for (key, predictor) in &solution.predictors {
            assert_eq!(predictor.p_ignore(), 0.0);
            let (l, s): (Vec<f64>, Vec<f64>) = attributes
                .iter()
                .zip(labels.iter().zip(&scores))
                .filter(|(a, _)| *a == key)
                .map(|(_, (l, s))| (*l, *s))
                .unzip();
            let probabilities: Vec<f64> = s.iter().map(|s| predictor.positive_probability(*s)).collect();
            assert_eq!(probabilities, l, "group {} is not classified perfectly", key);
        }
    }

    #[test]
    fn test_selection_rate_is_shared() {
        let attributes = ["A", "A", "A", "A", "A", "B", "B", "B", "B", "B", "B"];
        let labels = [1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let scores = [0.9, 0.8, 0.3, 0.6, 0.2, 0.7, 0.65, 0.5, 0.1, 0.4, 0.35];
        let grid_size = 50;
        let solution = fit(&attributes, &labels, &scores, grid_size);

        for key in ["A", "B"] {
            let (l, s): (Vec<f64>, Vec<f64>) = attributes
                .iter()
                .zip(labels.iter().zip(&scores))
                .filter(|(a, _)| **a == key)
                .map(|(_, (l, s))| (*l, *s))
                .unzip();
            let probabilities: Vec<f64> = s
                .iter()
                .map(|s| solution.predictors[key].positive_probability(*s))
                .collect();
            let rates = expected_rates(&l, &probabilities);
            assert!(
                (rates.selection_rate - solution.x_best).abs() <= 1.0 / grid_size as f64,
                "group {} selects {} instead of {}",
                key,
                rates.selection_rate,
                solution.x_best
            );
        }
    }

    #[test]
    fn test_error_plateau_picks_lowest_selection_rate() {
        // The tied scores put a slope 1 segment on the hull, which is flat in error
        // between selection rates 0.25 and 0.75.
        let attributes = ["A", "A", "A", "A"];
        let labels = [1.0, 0.0, 1.0, 0.0];
        let scores = [1.0, 0.5, 0.5, 0.0];
        let solution = fit(&attributes, &labels, &scores, 8);

        assert_eq!(solution.x_best, 0.25);
        assert_eq!(solution.error, 0.25);

        let data = GroupedDataset::new(&attributes, &labels, &scores).unwrap();
        let hull = crate::curve::roc_convex_hull(&data.groups["A"], true);
        let plateau: Vec<f64> = crate::curve::interpolate_curve(
            &hull
                .iter()
                .map(|p| CurvePoint::new(0.5 * p.x + 0.5 * p.y, 0.5 * p.x + 0.5 * (1.0 - p.y), p.operation))
                .collect::<Vec<_>>(),
            &grid(8),
        )
        .unwrap()
        .iter()
        .map(|p| p.y)
        .collect();
        assert_eq!(plateau, vec![0.5, 0.375, 0.25, 0.25, 0.25, 0.25, 0.25, 0.375, 0.5]);
    }

    #[test]
    fn test_single_label_group_guesses_at_selection_rate() {
        let attributes = ["A", "A", "A", "A", "B", "B"];
        let labels = [0.0, 1.0, 0.0, 1.0, 1.0, 1.0];
        let scores = [0.1, 0.9, 0.2, 0.8, 0.3, 0.6];
        let solution = fit(&attributes, &labels, &scores, 100);

        let predictor = solution.predictors["B"];
        let p = predictor.positive_probability(0.3);
        assert!((p - solution.x_best).abs() < 1e-12);
        assert!((predictor.positive_probability(0.6) - p).abs() < 1e-12);
    }
}
