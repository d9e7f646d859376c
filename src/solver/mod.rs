//! Solvers
//!
//! Search the shared grid for the error minimizing operating point that satisfies a
//! fairness constraint, and derive one randomized predictor per group from it.
//!
//! # Submodules
//!
//! * `demographic_parity`: Equal selection rate across groups.
//! * `equalized_odds`: Equal true and false positive rates across groups.
use crate::constants::{DEMOGRAPHIC_PARITY, EQUALIZED_ODDS};
use crate::curve::{roc_convex_hull, CurvePoint};
use crate::data::{GroupKey, GroupedDataset};
use crate::errors::FairnessError;
use crate::optimizer::config::OptimizerConfig;
use crate::predictor::InterpolatedPredictor;
use crate::utils::{items_to_strings, validate_positive_int_parameter};
use log::warn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub mod demographic_parity;
pub mod equalized_odds;

pub use demographic_parity::threshold_optimization_demographic_parity;
pub use equalized_odds::threshold_optimization_equalized_odds;

/// Fairness constraint enforced across groups.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Constraint {
    /// Equal positive prediction rate across groups.
    #[default]
    #[serde(rename = "demographic_parity")]
    DemographicParity,
    /// Equal true positive and false positive rates across groups.
    #[serde(rename = "equalized_odds")]
    EqualizedOdds,
}

impl FromStr for Constraint {
    type Err = FairnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            DEMOGRAPHIC_PARITY => Ok(Constraint::DemographicParity),
            EQUALIZED_ODDS => Ok(Constraint::EqualizedOdds),
            _ => Err(FairnessError::UnsupportedConstraint(
                s.to_string(),
                items_to_strings(vec![DEMOGRAPHIC_PARITY, EQUALIZED_ODDS]),
            )),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::DemographicParity => write!(f, "{}", DEMOGRAPHIC_PARITY),
            Constraint::EqualizedOdds => write!(f, "{}", EQUALIZED_ODDS),
        }
    }
}

/// The fitted post-processed predictor: one predictor per sensitive attribute value,
/// together with the operating point it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize",
    deserialize = "K: Deserialize<'de> + Ord"
))]
pub struct Solution<K> {
    /// Constraint the solution satisfies.
    pub constraint: Constraint,
    /// Predictor of every group seen while fitting.
    pub predictors: BTreeMap<K, InterpolatedPredictor>,
    /// Selection rate for demographic parity, false positive rate for equalized odds.
    pub x_best: f64,
    /// Shared true positive rate, only set for equalized odds.
    pub y_best: Option<f64>,
    /// Population weighted error at the chosen operating point.
    pub error: f64,
}

impl<K: Ord> Solution<K> {
    pub fn predictor(&self, key: &K) -> Option<&InterpolatedPredictor> {
        self.predictors.get(key)
    }
}

/// Run the solver of the configured constraint.
pub fn solve<K: GroupKey>(data: &GroupedDataset<K>, config: &OptimizerConfig) -> Result<Solution<K>, FairnessError> {
    validate_positive_int_parameter(config.grid_size, "grid_size")?;
    match config.constraint {
        Constraint::DemographicParity => {
            threshold_optimization_demographic_parity(data, config.grid_size, config.flip, config.parallel)
        }
        Constraint::EqualizedOdds => {
            threshold_optimization_equalized_odds(data, config.grid_size, config.flip, config.parallel)
        }
    }
}

/// ROC convex hull of every group, in key order.
pub(crate) fn group_hulls<K: GroupKey>(
    data: &GroupedDataset<K>,
    flip: bool,
    parallel: bool,
) -> Vec<(K, Vec<CurvePoint>)> {
    for (key, group) in &data.groups {
        if group.n_positive() == 0 || group.n_negative() == 0 {
            warn!(
                "Sensitive attribute value {:?} only has samples of a single label, its ROC curve is the diagonal.",
                key
            );
        }
    }
    let groups: Vec<_> = data.groups.iter().collect();
    if parallel {
        groups
            .par_iter()
            .map(|(key, group)| ((*key).clone(), roc_convex_hull(group, flip)))
            .collect()
    } else {
        groups
            .iter()
            .map(|(key, group)| ((*key).clone(), roc_convex_hull(group, flip)))
            .collect()
    }
}
