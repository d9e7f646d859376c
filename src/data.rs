//! Data
//!
//! Containers for the inputs of the threshold optimizer: the feature `Matrix` that is
//! handed to the wrapped scorer, and the `GroupedDataset` holding labels and scores
//! split by sensitive attribute value.
use crate::constants::{NEGATIVE_LABEL, POSITIVE_LABEL};
use crate::errors::FairnessError;
use crate::utils::validate_equal_length;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Contiguous Column Major Matrix data container.
///
/// The threshold optimizer never reads the features itself, it only passes them to
/// the wrapped scorer and checks that the number of rows lines up with the other inputs.
pub struct Matrix<'a, T> {
    /// The raw data stored in a single slice.
    pub data: &'a [T],
    /// Number of rows in the matrix.
    pub rows: usize,
    /// Number of columns in the matrix.
    pub cols: usize,
}

impl<'a, T> Matrix<'a, T> {
    /// Create a new Matrix.
    pub fn new(data: &'a [T], rows: usize, cols: usize) -> Self {
        Matrix { data, rows, cols }
    }

    /// Get a single reference to an item in the matrix.
    ///
    /// * `i` - The ith row of the data to get.
    /// * `j` - the jth column of the data to get.
    pub fn get(&self, i: usize, j: usize) -> &T {
        &self.data[j * self.rows + i]
    }

    /// Check that the slice holds exactly `rows * cols` values.
    pub fn validate_shape(&self) -> Result<(), FairnessError> {
        if self.data.len() == self.rows * self.cols {
            Ok(())
        } else {
            Err(FairnessError::InvalidParameter(
                "data".to_string(),
                format!("{} values for {} rows and {} columns", self.rows * self.cols, self.rows, self.cols),
                format!("{} values", self.data.len()),
            ))
        }
    }

    /// Get an entire column in the matrix.
    ///
    /// * `col` - The index of the column to get.
    pub fn get_col(&self, col: usize) -> &[T] {
        &self.data[col * self.rows..(col + 1) * self.rows]
    }
}

/// Requirements on sensitive attribute values. Groups are ordered by key, and may be
/// processed on several threads.
pub trait GroupKey: Ord + Clone + Debug + Send + Sync {}

impl<T> GroupKey for T where T: Ord + Clone + Debug + Send + Sync {}

/// Labels and scores of all samples sharing one sensitive attribute value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    /// Binary labels, 0.0 or 1.0.
    pub labels: Vec<f64>,
    /// Scores produced by the unconstrained classifier.
    pub scores: Vec<f64>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn n_positive(&self) -> usize {
        self.labels.iter().filter(|l| **l == POSITIVE_LABEL).count()
    }

    pub fn n_negative(&self) -> usize {
        self.len() - self.n_positive()
    }
}

/// Validated samples grouped by sensitive attribute value.
///
/// Groups are kept in ascending key order, so every reduction over groups
/// happens in the same order for the same data.
#[derive(Debug, Clone)]
pub struct GroupedDataset<K> {
    pub groups: BTreeMap<K, Group>,
    pub n_samples: usize,
    pub n_positive: usize,
}

impl<K: GroupKey> GroupedDataset<K> {
    /// Validate and group the raw inputs.
    ///
    /// * `attributes` - Sensitive attribute value of each sample.
    /// * `labels` - Binary labels of each sample.
    /// * `scores` - Scores of the unconstrained classifier for each sample.
    pub fn new(attributes: &[K], labels: &[f64], scores: &[f64]) -> Result<Self, FairnessError> {
        validate_samples(attributes.len(), labels, scores)?;

        let mut groups: BTreeMap<K, Group> = BTreeMap::new();
        for ((a, l), s) in attributes.iter().zip(labels).zip(scores) {
            let group = groups.entry(a.clone()).or_default();
            group.labels.push(*l);
            group.scores.push(*s);
        }
        let n_positive = labels.iter().filter(|l| **l == POSITIVE_LABEL).count();

        Ok(GroupedDataset {
            groups,
            n_samples: labels.len(),
            n_positive,
        })
    }

    pub fn n_negative(&self) -> usize {
        self.n_samples - self.n_positive
    }

    /// Share of all samples that belong to the group `key`.
    pub fn group_proportion(&self, key: &K) -> f64 {
        self.groups
            .get(key)
            .map_or(0.0, |g| g.len() as f64 / self.n_samples as f64)
    }
}

/// Check that the row aligned inputs are usable before anything is computed from them.
pub fn validate_samples(n_attributes: usize, labels: &[f64], scores: &[f64]) -> Result<(), FairnessError> {
    if n_attributes == 0 || labels.is_empty() || scores.is_empty() {
        return Err(FairnessError::EmptyInput);
    }
    validate_equal_length(
        &[n_attributes, labels.len(), scores.len()],
        "sensitive_features, labels, and scores",
    )?;
    validate_labels(labels)?;
    if let Some(i) = scores.iter().position(|s| s.is_nan()) {
        return Err(FairnessError::NanScore(i));
    }
    Ok(())
}

pub fn validate_labels(labels: &[f64]) -> Result<(), FairnessError> {
    match labels
        .iter()
        .find(|l| **l != NEGATIVE_LABEL && **l != POSITIVE_LABEL)
    {
        Some(l) => Err(FairnessError::NonBinaryLabel(*l)),
        None => Ok(()),
    }
}
