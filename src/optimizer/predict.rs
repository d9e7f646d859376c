//! Prediction Methods
//!
//! Routes every sample to the predictor of its sensitive attribute value. Randomness
//! is drawn from an explicit generator, one uniform draw per row in row order, so a
//! seeded batch is reproducible.
use crate::data::{GroupKey, Matrix};
use crate::errors::FairnessError;
use crate::optimizer::{validate_input_data, ThresholdOptimizer};
use crate::scorer::Scorer;
use crate::solver::Solution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Debug;

/// Probability of the positive label for every sample, using the predictor of the
/// sample's sensitive attribute value.
///
/// * `solution` - The fitted predictors.
/// * `sensitive_features` - Sensitive attribute value of every sample.
/// * `scores` - Scores of the unconstrained classifier, same length as `sensitive_features`.
pub fn vectorized_probability<K: Ord + Debug>(
    solution: &Solution<K>,
    sensitive_features: &[K],
    scores: &[f64],
) -> Result<Vec<f64>, FairnessError> {
    sensitive_features
        .iter()
        .zip(scores)
        .map(|(k, s)| {
            solution
                .predictor(k)
                .map(|predictor| predictor.positive_probability(*s))
                .ok_or_else(|| FairnessError::UnseenGroup(format!("{:?}", k)))
        })
        .collect()
}

/// Draw a label for every sample, comparing its positive probability with one uniform
/// draw of `rng`. Nothing is drawn if a sample belongs to an unseen group.
pub fn vectorized_prediction<K: Ord + Debug, R: Rng + ?Sized>(
    solution: &Solution<K>,
    sensitive_features: &[K],
    scores: &[f64],
    rng: &mut R,
) -> Result<Vec<u8>, FairnessError> {
    let routed = sensitive_features
        .iter()
        .zip(scores)
        .map(|(k, s)| {
            solution
                .predictor(k)
                .map(|predictor| (predictor, *s))
                .ok_or_else(|| FairnessError::UnseenGroup(format!("{:?}", k)))
        })
        .collect::<Result<Vec<_>, FairnessError>>()?;
    Ok(routed
        .into_iter()
        .map(|(predictor, score)| predictor.predict(score, rng))
        .collect())
}

impl<S, K> ThresholdOptimizer<S, K>
where
    S: Scorer,
    K: GroupKey,
{
    /// Predict a label for each row of `data` while taking into account sensitive features.
    ///
    /// * `data` - The feature matrix.
    /// * `sensitive_features` - Sensitive attribute value of every row.
    /// * `random_state` - Seed for reproducible predictions, fresh entropy if `None`.
    pub fn predict(
        &self,
        data: &Matrix<f64>,
        sensitive_features: &[K],
        random_state: Option<u64>,
    ) -> Result<Vec<u8>, FairnessError> {
        let mut rng = match random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.predict_with_rng(data, sensitive_features, &mut rng)
    }

    /// Predict a label for each row of `data`, drawing from `rng`.
    pub fn predict_with_rng<R: Rng + ?Sized>(
        &self,
        data: &Matrix<f64>,
        sensitive_features: &[K],
        rng: &mut R,
    ) -> Result<Vec<u8>, FairnessError> {
        let solution = self.fitted_solution()?;
        validate_input_data(data.rows, sensitive_features.len(), None)?;
        let scores = self.score_rows(data)?;
        vectorized_prediction(solution, sensitive_features, &scores, rng)
    }

    /// Probability of the positive label for each row of `data`.
    pub fn predict_proba(&self, data: &Matrix<f64>, sensitive_features: &[K]) -> Result<Vec<f64>, FairnessError> {
        self.fitted_solution()?;
        validate_input_data(data.rows, sensitive_features.len(), None)?;
        let scores = self.score_rows(data)?;
        self.predict_proba_scores(sensitive_features, &scores)
    }

    /// Probability mass function `[P(0), P(1)]` for each row of `data`.
    pub fn predict_pmf(&self, data: &Matrix<f64>, sensitive_features: &[K]) -> Result<Vec<[f64; 2]>, FairnessError> {
        Ok(self
            .predict_proba(data, sensitive_features)?
            .into_iter()
            .map(|p| [1.0 - p, p])
            .collect())
    }

    /// Probability of the positive label given already computed scores.
    pub fn predict_proba_scores(&self, sensitive_features: &[K], scores: &[f64]) -> Result<Vec<f64>, FairnessError> {
        let solution = self.fitted_solution()?;
        validate_input_data(scores.len(), sensitive_features.len(), None)?;
        vectorized_probability(solution, sensitive_features, scores)
    }

    /// Predict labels given already computed scores, drawing from `rng`.
    pub fn predict_scores_with_rng<R: Rng + ?Sized>(
        &self,
        sensitive_features: &[K],
        scores: &[f64],
        rng: &mut R,
    ) -> Result<Vec<u8>, FairnessError> {
        let solution = self.fitted_solution()?;
        validate_input_data(scores.len(), sensitive_features.len(), None)?;
        vectorized_prediction(solution, sensitive_features, scores, rng)
    }
}
