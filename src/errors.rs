//! Errors
//!
//! Custom error types used throughout the `fairthresh` crate.
use thiserror::Error;

/// Errors that can occur while fitting or applying a threshold optimizer.
#[derive(Debug, Error)]
pub enum FairnessError {
    /// At least one of the attribute, label, or score inputs is empty.
    #[error("At least one of attributes, labels, or scores are empty.")]
    EmptyInput,
    /// Inputs that must be aligned row by row have different lengths.
    #[error("{0} need to be of equal length.")]
    DifferentInputLength(String),
    /// A label other than 0 or 1 was found.
    #[error("Labels other than 0/1 were provided, found {0}.")]
    NonBinaryLabel(f64),
    /// A score was NaN.
    #[error("The score at row {0} is NaN.")]
    NanScore(usize),
    /// Invalid value parsing for a constraint name.
    #[error("Invalid constraint {0}, currently only {1} are supported constraints.")]
    UnsupportedConstraint(String, String),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Prediction was requested before a solution was fitted.
    #[error("It is required to call 'fit' before 'predict'.")]
    NotFitted,
    /// A sensitive attribute value was not present when fitting.
    #[error("No predictor was fitted for the sensitive attribute value {0}.")]
    UnseenGroup(String),
    /// A curve needs at least two vertices to be interpolated.
    #[error("A curve with {0} vertices can not be interpolated, at least 2 are required.")]
    DegenerateCurve(usize),
    /// The wrapped scorer can only be used prefit.
    #[error("The wrapped scorer does not support training, set prefit to true.")]
    EstimatorNotTrainable,
    /// Unable to write to file or string.
    #[error("Unable to write: {0}")]
    UnableToWrite(String),
    /// Unable to read from file or string.
    #[error("Unable to read: {0}")]
    UnableToRead(String),
}
