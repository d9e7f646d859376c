//! Curve Interpolator
//!
//! Evaluates a hull reduced curve at every value of a uniform grid. Because the hull
//! is piecewise linear and concave, any `x` between two adjacent vertices is realized
//! exactly by mixing the decision rules of those two vertices.
use crate::curve::{CurvePoint, InterpolatedPoint};
use crate::errors::FairnessError;

/// A uniform grid of `grid_size + 1` values from 0 to 1 inclusive.
pub fn grid(grid_size: usize) -> Vec<f64> {
    (0..=grid_size).map(|i| i as f64 / grid_size as f64).collect()
}

/// Interpolate a curve along the values of `x_grid`.
///
/// Assumes `curve` is sorted by `x`, its `y` is concave in `x`, and that the grid lies
/// within the `x` range of the curve. Grid values outside of that range are clamped to
/// the closest segment end.
///
/// * `curve` - Vertices of the curve, at least two.
/// * `x_grid` - Ascending values to evaluate the curve at.
pub fn interpolate_curve(curve: &[CurvePoint], x_grid: &[f64]) -> Result<Vec<InterpolatedPoint>, FairnessError> {
    if curve.len() < 2 {
        return Err(FairnessError::DegenerateCurve(curve.len()));
    }
    let last_segment = curve.len() - 2;

    // Skip a vertical start, the top of it is the better point at the same x.
    let mut i = 0;
    while i < last_segment && curve[i + 1].x == curve[0].x {
        i += 1;
    }

    let mut result = Vec::with_capacity(x_grid.len());
    for &x in x_grid {
        while i < last_segment && x > curve[i + 1].x {
            i += 1;
        }
        let (start, end) = (&curve[i], &curve[i + 1]);

        let x_distance_between_points = end.x - start.x;
        let p0 = if x_distance_between_points > 0.0 {
            ((end.x - x) / x_distance_between_points).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let p1 = 1.0 - p0;
        result.push(InterpolatedPoint {
            x,
            y: p0 * start.y + p1 * end.y,
            p0,
            operation0: start.operation,
            p1,
            operation1: end.operation,
        });
    }
    Ok(result)
}
