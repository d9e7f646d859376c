//! ROC Curve Builder
//!
//! Builds the empirical ROC curve of a single group and reduces it to its upper
//! convex hull. Every vertex carries the threshold operation realizing it, so points
//! between vertices can later be turned into an actual randomized decision rule.
use crate::curve::CurvePoint;
use crate::data::Group;
use crate::operation::ThresholdOperation;
use log::debug;

/// The no-information curve, from always predicting 0 to always predicting 1.
pub fn diagonal() -> Vec<CurvePoint> {
    vec![
        CurvePoint::new(0.0, 0.0, ThresholdOperation::Constant(false)),
        CurvePoint::new(1.0, 1.0, ThresholdOperation::Constant(true)),
    ]
}

/// Calculate the ROC points of a group, sorted by `(x, y)`.
///
/// `x` is the false positive rate P[Y_hat=1 | Y=0] and `y` the true positive rate
/// P[Y_hat=1 | Y=1] of thresholding between two consecutive distinct scores.
///
/// * `group` - Labels and scores of the group.
/// * `flip` - Replace points below the diagonal by the point of the complementary rule.
pub fn roc_points(group: &Group, flip: bool) -> Vec<CurvePoint> {
    let n_positive = group.n_positive();
    let n_negative = group.n_negative();
    if n_positive == 0 || n_negative == 0 {
        return diagonal();
    }

    // Sort by descending score, everything above a threshold gets a label of 1.
    let mut indices: Vec<usize> = (0..group.len()).collect();
    indices.sort_by(|&a, &b| group.scores[b].total_cmp(&group.scores[a]));

    let mut points = Vec::with_capacity(indices.len() + 1);
    points.push(CurvePoint::new(0.0, 0.0, ThresholdOperation::Constant(false)));

    // [negatives, positives] scored at or above the current threshold
    let mut counts = [0usize; 2];
    let mut i = 0;
    while i < indices.len() {
        let threshold = group.scores[indices[i]];
        while i < indices.len() && group.scores[indices[i]] == threshold {
            counts[group.labels[indices[i]] as usize] += 1;
            i += 1;
        }

        let x = counts[0] as f64 / n_negative as f64;
        let y = counts[1] as f64 / n_positive as f64;
        let lower = indices.get(i).map(|&next| group.scores[next]);
        if flip && x > y {
            points.push(CurvePoint::new(1.0 - x, 1.0 - y, split_operation(threshold, lower, true)));
        } else {
            points.push(CurvePoint::new(x, y, split_operation(threshold, lower, false)));
        }
    }

    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    points
}

/// The rule separating the run of scores at `upper` and above from the scores at `lower`
/// and below, or from nothing if `upper` is the lowest score. The complementary rule is
/// returned for `flipped`.
///
/// The midpoint is only used if it lies strictly between the two scores. Adjacent
/// floats and infinite scores fall back to the score itself, which is exact because no
/// sample is scored between `lower` and `upper`.
fn split_operation(upper: f64, lower: Option<f64>, flipped: bool) -> ThresholdOperation {
    let Some(lower) = lower else {
        return ThresholdOperation::Constant(!flipped);
    };
    let mid = upper / 2.0 + lower / 2.0;
    let separates = lower < mid && mid < upper;
    match (flipped, separates) {
        (false, true) => ThresholdOperation::Greater(mid),
        (false, false) => ThresholdOperation::Greater(lower),
        (true, true) => ThresholdOperation::Less(mid),
        (true, false) => ThresholdOperation::Less(upper),
    }
}

/// Keep only the points on the upper convex hull of points sorted by `(x, y)`.
///
/// For the last two selected points `r0`, `r1` and the next point `r2`, `r1` is
/// dropped unless it lies strictly above the line from `r0` to `r2`. The slopes are
/// compared through cross products, so vertical segments need no special case.
pub fn convex_hull(points: Vec<CurvePoint>) -> Vec<CurvePoint> {
    let mut selected: Vec<CurvePoint> = Vec::with_capacity(points.len());
    for r2 in points {
        while selected.len() >= 2 {
            let r1 = selected[selected.len() - 1];
            let r0 = selected[selected.len() - 2];
            if (r1.y - r0.y) * (r2.x - r0.x) <= (r2.y - r0.y) * (r1.x - r0.x) {
                selected.pop();
            } else {
                break;
            }
        }
        selected.push(r2);
    }
    selected
}

/// The upper convex hull of the ROC curve of a group.
pub fn roc_convex_hull(group: &Group, flip: bool) -> Vec<CurvePoint> {
    let points = roc_points(group, flip);
    let hull = convex_hull(points);
    debug!(
        "ROC convex hull with {} vertices: {}",
        hull.len(),
        hull.iter()
            .map(|p| format!("({:.4}, {:.4}) {}", p.x, p.y, p.operation))
            .collect::<Vec<_>>()
            .join(", ")
    );
    hull
}
