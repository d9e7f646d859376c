// Modules
pub mod constants;
pub mod curve;
pub mod data;
pub mod errors;
pub mod metrics;
pub mod operation;
pub mod optimizer;
pub mod predictor;
pub mod scorer;
pub mod solver;
pub mod utils;

// Individual classes, and functions
pub use data::Matrix;
pub use errors::FairnessError;
pub use optimizer::config::{OptimizerConfig, OptimizerIO};
pub use optimizer::ThresholdOptimizer;
pub use predictor::InterpolatedPredictor;
pub use scorer::{ColumnScorer, Scorer};
pub use solver::{Constraint, Solution};
