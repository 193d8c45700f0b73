//! Layout oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets a scenario collect all failures in one pass.

use cad_kernel::{Shape, distance_to_plane};
use cad_render::{ProcessedProjections, ProcessedView, StandardViews};
use cad_solver::{Face, face_center, mated_face};

use crate::helpers::HarnessError;

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: Some(value),
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: Some(value),
        }
    }

    /// Turn a failed verdict into an error.
    pub fn into_result(self) -> Result<(), HarnessError> {
        if self.passed {
            Ok(())
        } else {
            Err(HarnessError::OracleFailure {
                oracle: self.oracle_name,
                detail: self.detail,
            })
        }
    }
}

// ── Layout Oracles ──────────────────────────────────────────────────────────

/// The moving part, mated against `fixed_face`, sits flush on it: the face it
/// now presents is coplanar with the fixed face and shares its centre.
pub fn check_flush_mate<S: Shape>(fixed: &S, fixed_face: Face, moved: &S, tol: f64) -> OracleVerdict {
    let name = "flush_mate";
    let landed = mated_face(fixed_face);
    let c1 = face_center(&fixed.bounding_box(), fixed_face);
    let c2 = face_center(&moved.bounding_box(), landed);
    let gap = distance_to_plane(&c2, &c1, &fixed_face.normal());
    let offset = c1.distance_to(&c2);
    if gap.abs() <= tol && offset <= tol {
        OracleVerdict::pass_val(name, format!("{fixed_face}/{landed} flush"), gap)
    } else {
        OracleVerdict::fail_val(
            name,
            format!("{fixed_face}/{landed}: plane gap {gap:.3e}, centre offset {offset:.3e}"),
            gap,
        )
    }
}

/// No two parts' bounding boxes overlap by more than `tol` on every axis.
pub fn check_no_overlap<S: Shape>(parts: &[S], tol: f64) -> OracleVerdict {
    let name = "no_overlap";
    let boxes: Vec<_> = parts.iter().map(|p| p.bounding_box()).collect();
    for (i, a) in boxes.iter().enumerate() {
        for (j, b) in boxes.iter().enumerate().skip(i + 1) {
            let overlap = (0..3)
                .map(|axis| a.max[axis].min(b.max[axis]) - a.min[axis].max(b.min[axis]))
                .fold(f64::INFINITY, f64::min);
            if overlap > tol {
                return OracleVerdict::fail_val(name, format!("parts {i} and {j} overlap by {overlap:.3e}"), overlap);
            }
        }
    }
    OracleVerdict::pass_val(name, format!("{} parts disjoint", parts.len()), 0.0)
}

fn view_contains_layers(view: &ProcessedView) -> bool {
    const EPS: f64 = 1e-9;
    let outer = view.view_box;
    [view.visible.view_box, view.hidden.view_box]
        .into_iter()
        .flatten()
        .all(|layer| {
            layer.x >= outer.x - EPS
                && layer.y >= outer.y - EPS
                && layer.max_x() <= outer.max_x() + EPS
                && layer.max_y() <= outer.max_y() + EPS
        })
}

/// Every combined view box covers the boxes of its visible and hidden layers.
pub fn check_view_boxes_consistent(processed: &ProcessedProjections) -> OracleVerdict {
    let name = "view_boxes_consistent";
    let all_views = |views: &StandardViews<ProcessedView>| [views.front.clone(), views.top.clone(), views.right.clone()];
    let mut checked = 0;
    for view in all_views(&processed.standard)
        .into_iter()
        .chain(processed.parts.iter().flat_map(|p| all_views(&p.views)))
    {
        if !view_contains_layers(&view) {
            return OracleVerdict::fail(name, format!("view box {} misses a layer", view.view_box));
        }
        checked += 1;
    }
    OracleVerdict::pass_val(name, format!("{checked} views consistent"), checked as f64)
}

/// Run the given oracles and collect the failures.
pub fn failures(verdicts: impl IntoIterator<Item = OracleVerdict>) -> Vec<OracleVerdict> {
    verdicts.into_iter().filter(|v| !v.passed).collect()
}
