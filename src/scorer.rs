//! Scorer
//!
//! The unconstrained classifier wrapped by the threshold optimizer. Anything that
//! produces one real valued score per row can be post-processed.
use crate::data::Matrix;
use crate::errors::FairnessError;

/// A classifier producing a score per input row.
pub trait Scorer {
    /// Score every row of `data`.
    fn predict_scores(&self, data: &Matrix<f64>) -> Vec<f64>;

    /// Check that `data` can be scored. Called before training and scoring, so a scorer
    /// that would index out of bounds can fail with an error instead.
    fn validate_input(&self, _data: &Matrix<f64>) -> Result<(), FairnessError> {
        Ok(())
    }

    /// Train the scorer. Only called when the optimizer is not configured as prefit.
    ///
    /// * `data` - Feature matrix.
    /// * `y` - Binary labels.
    fn fit(&mut self, _data: &Matrix<f64>, _y: &[f64]) -> Result<(), FairnessError> {
        Err(FairnessError::EstimatorNotTrainable)
    }
}

/// Plain functions and closures can be used as an already trained scorer.
impl<F> Scorer for F
where
    F: Fn(&Matrix<f64>) -> Vec<f64>,
{
    fn predict_scores(&self, data: &Matrix<f64>) -> Vec<f64> {
        self(data)
    }
}

/// Scores every row with the value of a single feature column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnScorer {
    pub column: usize,
}

impl Scorer for ColumnScorer {
    fn predict_scores(&self, data: &Matrix<f64>) -> Vec<f64> {
        data.get_col(self.column).to_vec()
    }

    fn validate_input(&self, data: &Matrix<f64>) -> Result<(), FairnessError> {
        if self.column < data.cols {
            Ok(())
        } else {
            Err(FairnessError::InvalidParameter(
                "column".to_string(),
                format!("an index below {}", data.cols),
                self.column.to_string(),
            ))
        }
    }
}
