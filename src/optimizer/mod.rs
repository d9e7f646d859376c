//! Threshold Optimizer
//!
//! Post-processes the scores of a binary classifier into a randomized threshold rule
//! per sensitive attribute value, following Hardt, Price & Srebro (2016),
//! "Equality of Opportunity in Supervised Learning". Exactly one categorical
//! sensitive attribute is supported.
//!
//! # Submodules
//!
//! * `config`: Configuration and JSON IO.
//! * `predict`: Routing samples to the predictor of their group.
//! * `setters`: Builder style setters for the configuration.
use crate::data::{validate_labels, GroupKey, GroupedDataset, Matrix};
use crate::errors::FairnessError;
use crate::metrics::{expected_rates, GroupRates};
use crate::scorer::Scorer;
use crate::solver::{solve, Constraint, Solution};
use crate::utils::{validate_equal_length, validate_positive_int_parameter};
use log::info;
use std::collections::BTreeMap;

pub mod config;
pub mod predict;
pub mod setters;

use config::OptimizerConfig;

/// Wraps a scorer and learns, per sensitive attribute value, the randomized threshold
/// rule that satisfies a fairness constraint with minimal error.
pub struct ThresholdOptimizer<S, K> {
    /// The unconstrained classifier whose scores are post-processed.
    pub scorer: S,
    /// Optimizer configuration.
    pub cfg: OptimizerConfig,
    solution: Option<Solution<K>>,
}

impl<S, K> ThresholdOptimizer<S, K>
where
    S: Scorer,
    K: GroupKey,
{
    /// Create an optimizer with the default configuration, enforcing demographic parity.
    ///
    /// * `scorer` - The trained classifier, or an untrained one if `prefit` is set to false.
    pub fn new(scorer: S) -> Self {
        Self::with_config(scorer, OptimizerConfig::default())
    }

    /// Create an optimizer with the given configuration.
    pub fn with_config(scorer: S, cfg: OptimizerConfig) -> Self {
        ThresholdOptimizer {
            scorer,
            cfg,
            solution: None,
        }
    }

    /// Create an optimizer from the name of a constraint, `"demographic_parity"` or
    /// `"equalized_odds"`. Unsupported names are rejected before any data is seen.
    pub fn with_constraint_name(scorer: S, constraint: &str) -> Result<Self, FairnessError> {
        let constraint: Constraint = constraint.parse()?;
        Ok(Self::new(scorer).set_constraint(constraint))
    }

    /// Fit the optimizer on training features, labels, and sensitive features.
    /// If the optimizer is not prefit, the wrapped scorer is trained on `data` and `y` first.
    ///
    /// Inputs are validated before the scorer is trained. Failures that depend on the
    /// scores themselves, such as a NaN score, are only detected after training, in which
    /// case the scorer stays trained while the previous solution is kept.
    ///
    /// * `data` - Feature matrix, only passed on to the scorer.
    /// * `y` - Binary labels.
    /// * `sensitive_features` - Sensitive attribute value of every row.
    pub fn fit(&mut self, data: &Matrix<f64>, y: &[f64], sensitive_features: &[K]) -> Result<(), FairnessError> {
        validate_input_data(data.rows, sensitive_features.len(), Some(y))?;
        validate_positive_int_parameter(self.cfg.grid_size, "grid_size")?;
        data.validate_shape()?;
        self.scorer.validate_input(data)?;

        if !self.cfg.prefit {
            self.scorer.fit(data, y)?;
        }
        let scores = self.score_rows(data)?;
        self.fit_scores(sensitive_features, y, &scores)
    }

    /// Score every row of `data` with the wrapped scorer, after checking the matrix
    /// and the scorer's requirements on it.
    pub(crate) fn score_rows(&self, data: &Matrix<f64>) -> Result<Vec<f64>, FairnessError> {
        data.validate_shape()?;
        self.scorer.validate_input(data)?;
        let scores = self.scorer.predict_scores(data);
        validate_equal_length(&[data.rows, scores.len()], "Rows of data and scores")?;
        Ok(scores)
    }

    /// Fit the optimizer directly on the scores of the unconstrained classifier.
    /// A previous solution is only replaced if fitting succeeds.
    ///
    /// * `sensitive_features` - Sensitive attribute value of every sample.
    /// * `y` - Binary labels.
    /// * `scores` - Scores of the unconstrained classifier.
    pub fn fit_scores(&mut self, sensitive_features: &[K], y: &[f64], scores: &[f64]) -> Result<(), FairnessError> {
        let data = GroupedDataset::new(sensitive_features, y, scores)?;
        info!(
            "Fitting {} threshold optimizer on {} samples in {} groups.",
            self.cfg.constraint,
            data.n_samples,
            data.groups.len()
        );
        let solution = solve(&data, &self.cfg)?;
        self.solution = Some(solution);
        Ok(())
    }

    /// The fitted solution, if any.
    pub fn solution(&self) -> Option<&Solution<K>> {
        self.solution.as_ref()
    }

    pub fn is_fitted(&self) -> bool {
        self.solution.is_some()
    }

    pub(crate) fn fitted_solution(&self) -> Result<&Solution<K>, FairnessError> {
        self.solution.as_ref().ok_or(FairnessError::NotFitted)
    }

    /// Expected selection, true positive, false positive, and error rates of the fitted
    /// predictors for every group present in the given samples.
    ///
    /// * `sensitive_features` - Sensitive attribute value of every sample.
    /// * `y` - Binary labels.
    /// * `scores` - Scores of the unconstrained classifier.
    pub fn expected_group_rates(
        &self,
        sensitive_features: &[K],
        y: &[f64],
        scores: &[f64],
    ) -> Result<BTreeMap<K, GroupRates>, FairnessError> {
        let probabilities = self.predict_proba_scores(sensitive_features, scores)?;
        validate_input_data(scores.len(), sensitive_features.len(), Some(y))?;

        let mut per_group: BTreeMap<K, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
        for ((k, y_), p_) in sensitive_features.iter().zip(y).zip(probabilities) {
            let (labels, probs) = per_group.entry(k.clone()).or_default();
            labels.push(*y_);
            probs.push(p_);
        }
        Ok(per_group
            .into_iter()
            .map(|(k, (labels, probs))| (k, expected_rates(&labels, &probs)))
            .collect())
    }
}

/// Eager validation of the row aligned inputs of fit and predict.
pub(crate) fn validate_input_data(rows: usize, n_sensitive: usize, y: Option<&[f64]>) -> Result<(), FairnessError> {
    if rows == 0 || n_sensitive == 0 || y.is_some_and(|y| y.is_empty()) {
        return Err(FairnessError::EmptyInput);
    }
    match y {
        Some(y) => {
            validate_equal_length(&[rows, n_sensitive, y.len()], "X, sensitive_features, and y")?;
            validate_labels(y)
        }
        None => validate_equal_length(&[rows, n_sensitive], "X and sensitive_features"),
    }
}
