//! Optimizer Configuration
//!
//! Defines the configuration of the `ThresholdOptimizer` and the JSON IO shared by
//! the configuration and fitted solutions.
use crate::constants::DEFAULT_GRID_SIZE;
use crate::errors::FairnessError;
use crate::solver::{Constraint, Solution};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}
fn default_flip() -> bool {
    true
}
fn default_prefit() -> bool {
    true
}

/// Configuration for the `ThresholdOptimizer`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Fairness constraint to satisfy.
    #[serde(default)]
    pub constraint: Constraint,
    /// Number of ticks on the grid over which the curves are evaluated. A larger grid
    /// approximates the curves better, so it increases the chance of being very close
    /// to the actual best solution.
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    /// Allow flipping to negative weights if it improves accuracy.
    #[serde(default = "default_flip")]
    pub flip: bool,
    /// Whether the wrapped scorer is already trained. If false, `fit` trains it first.
    #[serde(default = "default_prefit")]
    pub prefit: bool,
    /// Build the per group ROC curves in parallel.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            constraint: Constraint::DemographicParity,
            grid_size: DEFAULT_GRID_SIZE,
            flip: true,
            prefit: true,
            parallel: false,
        }
    }
}

/// IO
pub trait OptimizerIO: Serialize + DeserializeOwned + Sized {
    /// Save as a json object to a file.
    ///
    /// * `path` - Path to save to.
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), FairnessError> {
        fs::write(path, self.json_dump()?).map_err(|e| FairnessError::UnableToWrite(e.to_string()))
    }

    /// Dump as a json object
    fn json_dump(&self) -> Result<String, FairnessError> {
        serde_json::to_string(self).map_err(|e| FairnessError::UnableToWrite(e.to_string()))
    }

    /// Load from Json string
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, FairnessError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| FairnessError::UnableToRead(e.to_string()))
    }

    /// Load from a path to a json object.
    ///
    /// * `path` - Path to load from.
    fn load<P: AsRef<Path>>(path: P) -> Result<Self, FairnessError> {
        let json_str = fs::read_to_string(path).map_err(|e| FairnessError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl OptimizerIO for OptimizerConfig {}

impl<K> OptimizerIO for Solution<K> where K: Serialize + DeserializeOwned + Ord {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::ThresholdOperation;
    use crate::predictor::{InterpolatedPredictor, OperationMixture};
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    #[test]
    fn test_optimizer_config_default() {
        let config = OptimizerConfig::default();
        assert_eq!(config.constraint, Constraint::DemographicParity);
        assert_eq!(config.grid_size, 1000);
        assert!(config.flip);
        assert!(config.prefit);
        assert!(!config.parallel);
    }

    #[test]
    fn test_optimizer_config_json() {
        let config = OptimizerConfig {
            constraint: Constraint::EqualizedOdds,
            grid_size: 50,
            ..Default::default()
        };
        let json = config.json_dump().unwrap();
        assert_eq!(OptimizerConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_optimizer_config_serde_defaults() {
        let config = OptimizerConfig::from_json(r#"{"constraint": "equalized_odds"}"#).unwrap();
        assert_eq!(config.constraint, Constraint::EqualizedOdds);
        assert_eq!(config.grid_size, 1000);
        assert!(config.flip);

        let err = OptimizerConfig::from_json(r#"{"constraint": "bogus"}"#).unwrap_err();
        assert!(matches!(err, FairnessError::UnableToRead(_)));
    }

    #[test]
    fn test_optimizer_config_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.json");
        let config = OptimizerConfig {
            flip: false,
            ..Default::default()
        };
        config.save(&file_path).unwrap();
        assert_eq!(OptimizerConfig::load(&file_path).unwrap(), config);
    }

    #[test]
    fn test_solution_json() {
        let mixture = OperationMixture {
            p0: 0.4,
            operation0: ThresholdOperation::Greater(0.5),
            p1: 0.6,
            operation1: ThresholdOperation::Constant(true),
        };
        let mut predictors = BTreeMap::new();
        predictors.insert(1, InterpolatedPredictor::Mixture(mixture));
        predictors.insert(
            2,
            InterpolatedPredictor::DiagonalMixture {
                mixture,
                p_ignore: 0.25,
                prediction_constant: 0.3,
            },
        );
        let solution = Solution {
            constraint: Constraint::EqualizedOdds,
            predictors,
            x_best: 0.3,
            y_best: Some(0.7),
            error: 0.2,
        };
        let json = solution.json_dump().unwrap();
        let loaded = Solution::<i32>::from_json(&json).unwrap();
        assert_eq!(loaded, solution);
    }
}
