//! Vector algebra used by the layout engine: angles, parallelism tests,
//! perpendicular construction and point/line/plane relations.
//!
//! All angles are in degrees, matching the kernel's rotate convention.

use crate::GeometryError;

use super::point::Point3d;
use super::vector::Vec3;

/// Default tolerance for parallelism and line/plane tests.
pub const PARALLEL_TOLERANCE: f64 = 1e-10;

/// Angle between two vectors in degrees, in `[0, 180]`.
pub fn angle_between(v1: &Vec3, v2: &Vec3) -> Result<f64, GeometryError> {
    if v1.normalized().is_none() || v2.normalized().is_none() {
        return Err(GeometryError::DegenerateVector {
            operation: "angle_between",
        });
    }
    Ok(v1.angle_to(v2))
}

/// True iff `‖normalize(v1) × normalize(v2)‖ < tol`.
///
/// Zero-length vectors have no direction and are never parallel to anything.
pub fn are_parallel(v1: &Vec3, v2: &Vec3, tol: f64) -> bool {
    match (v1.normalized(), v2.normalized()) {
        (Some(n1), Some(n2)) => n1.cross(&n2).length() < tol,
        _ => false,
    }
}

/// Parallel and pointing in opposite directions.
pub fn are_anti_parallel(v1: &Vec3, v2: &Vec3, tol: f64) -> bool {
    match (v1.normalized(), v2.normalized()) {
        (Some(n1), Some(n2)) => n1.cross(&n2).length() < tol && n1.dot(&n2) < 0.0,
        _ => false,
    }
}

/// A deterministic unit vector perpendicular to `v`.
///
/// The smallest-magnitude component of the normalized input is zeroed (ties
/// go to X, then Y) and the remaining two are swapped with one negated. The
/// largest component always survives, so the result is never zero. A
/// zero-length input returns `+X`.
pub fn perpendicular_to(v: &Vec3) -> Vec3 {
    let Some(n) = v.normalized() else {
        return Vec3::X;
    };
    let (ax, ay, az) = (n.x.abs(), n.y.abs(), n.z.abs());
    let p = if ax <= ay && ax <= az {
        Vec3::new(0.0, -n.z, n.y)
    } else if ay <= az {
        Vec3::new(-n.z, 0.0, n.x)
    } else {
        Vec3::new(-n.y, n.x, 0.0)
    };
    p.normalized_or(Vec3::X)
}

/// Unit axis that rotates `from` towards `to`, i.e. `normalize(from × to)`.
///
/// Returns `None` when the vectors are (anti-)parallel and the cross product
/// vanishes; callers fall back to [`perpendicular_to`] for the 180° case.
pub fn rotation_axis(from: &Vec3, to: &Vec3) -> Option<Vec3> {
    let axis = from.cross(to);
    if axis.length() < PARALLEL_TOLERANCE {
        None
    } else {
        axis.normalized()
    }
}

/// Signed distance from `point` to the plane through `plane_point` with
/// `plane_normal`. Positive on the side the normal points to.
pub fn distance_to_plane(point: &Point3d, plane_point: &Point3d, plane_normal: &Vec3) -> f64 {
    match plane_normal.normalized() {
        Some(n) => (*point - *plane_point).dot(&n),
        None => 0.0,
    }
}

/// Remove the component of `v` along `plane_normal`.
pub fn project_onto_plane(v: &Vec3, plane_normal: &Vec3) -> Vec3 {
    match plane_normal.normalized() {
        Some(n) => *v - n * v.dot(&n),
        None => *v,
    }
}

/// Intersection of a line with a plane, `None` when the line is parallel to it.
pub fn line_plane_intersection(
    line_point: &Point3d,
    line_direction: &Vec3,
    plane_point: &Point3d,
    plane_normal: &Vec3,
) -> Option<Point3d> {
    let n = plane_normal.normalized()?;
    let d = line_direction.normalized()?;
    let denominator = d.dot(&n);
    if denominator.abs() < PARALLEL_TOLERANCE {
        return None;
    }
    let t = (*plane_point - *line_point).dot(&n) / denominator;
    Some(*line_point + d * t)
}
