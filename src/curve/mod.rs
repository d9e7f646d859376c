//! Curves
//!
//! Per group operating curves and their alignment on a shared grid.
//!
//! # Submodules
//!
//! * `roc`: Empirical ROC points and their upper convex hull.
//! * `interpolate`: Realizing every grid value as a mixture of two hull vertices.
use crate::operation::ThresholdOperation;
use serde::{Deserialize, Serialize};

pub mod interpolate;
pub mod roc;

pub use interpolate::{grid, interpolate_curve};
pub use roc::{convex_hull, roc_convex_hull, roc_points};

/// A vertex of a curve, realized by a single threshold operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
    pub operation: ThresholdOperation,
}

impl CurvePoint {
    pub fn new(x: f64, y: f64, operation: ThresholdOperation) -> Self {
        CurvePoint { x, y, operation }
    }
}

/// A point of a curve evaluated at a grid value `x`.
///
/// The point is realized by applying `operation0` with probability `p0` and
/// `operation1` with probability `p1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedPoint {
    pub x: f64,
    pub y: f64,
    pub p0: f64,
    pub operation0: ThresholdOperation,
    pub p1: f64,
    pub operation1: ThresholdOperation,
}
