//! Rich assertion helpers with diagnostic output.
//!
//! Every failure names the context, the expected and the actual values, so a
//! scenario can bubble errors up with `?` instead of panicking mid-way.

use cad_kernel::{Point3d, Shape};
use cad_render::ProcessedView;
use cad_solver::{Face, are_faces_mated, face_center};

use crate::helpers::HarnessError;

/// Assert the bounding box of `shape` spans `expected_min..expected_max`.
pub fn assert_bounding_box<S: Shape>(
    shape: &S,
    expected_min: [f64; 3],
    expected_max: [f64; 3],
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let bb = shape.bounding_box();
    let checks = (0..3).flat_map(|axis| {
        [
            ("min", axis, expected_min[axis], bb.min[axis]),
            ("max", axis, expected_max[axis], bb.max[axis]),
        ]
    });
    for (bound, axis, expected, actual) in checks {
        if (actual - expected).abs() > tol {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{ctx}] {bound}.{}: expected {expected:.6}, got {actual:.6} (box {:?}..{:?}, tol={tol})",
                    ["x", "y", "z"][axis],
                    bb.min.to_array(),
                    bb.max.to_array(),
                ),
            });
        }
    }
    Ok(())
}

/// Assert two points coincide within `tol`.
pub fn assert_point_near(actual: &Point3d, expected: [f64; 3], tol: f64, ctx: &str) -> Result<(), HarnessError> {
    let distance = actual.distance_to(&Point3d::from(expected));
    if distance <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected point {:?}, got {:?} (distance {:.3e}, tol={})",
                ctx,
                expected,
                actual.to_array(),
                distance,
                tol,
            ),
        })
    }
}

/// Assert `face1` of `model1` and `face2` of `model2` are flush and opposed.
pub fn assert_faces_mated<S: Shape>(
    model1: &S,
    face1: Face,
    model2: &S,
    face2: Face,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    if are_faces_mated(model1, face1, model2, face2, tol) {
        return Ok(());
    }
    let c1 = face_center(&model1.bounding_box(), face1);
    let c2 = face_center(&model2.bounding_box(), face2);
    Err(HarnessError::AssertionFailed {
        detail: format!(
            "[{}] {} / {} not mated: face centres {:?} and {:?}",
            ctx,
            face1,
            face2,
            c1.to_array(),
            c2.to_array(),
        ),
    })
}

/// Assert the combined view box of a processed view.
pub fn assert_view_box(view: &ProcessedView, expected: &str, ctx: &str) -> Result<(), HarnessError> {
    let actual = view.view_box.to_string();
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{}] view box: expected {:?}, got {:?}", ctx, expected, actual),
        })
    }
}

/// Assert a shape did not move.
pub fn assert_unmoved<S: Shape>(before: &S, after: &S, tol: f64, ctx: &str) -> Result<(), HarnessError> {
    let (a, b) = (before.bounding_box(), after.bounding_box());
    if a.approx_eq(&b, tol) {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] shape moved: {:?}..{:?} became {:?}..{:?}",
                ctx,
                a.min.to_array(),
                a.max.to_array(),
                b.min.to_array(),
                b.max.to_array(),
            ),
        })
    }
}
