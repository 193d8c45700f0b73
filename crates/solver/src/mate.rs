//! Face-to-face mating of bounding boxes.
//!
//! A mate rotates the moving part so its chosen face points against the fixed
//! face, then slides it until both face centres coincide. Rotation happens
//! about the moving face's own centre, so the translation computed up front
//! stays exact after the rotation is applied.
//!
//! Mating is a single closed-form step: compute rotation, compute
//! translation, apply rotation, apply translation. Nothing is iterated and no
//! state survives between calls.

use cad_kernel::{BoundingBox, Point3d, Shape, Transform, Vec3, are_anti_parallel, distance_to_plane};
use cad_kernel::{default_tolerance, perpendicular_to, rotation_axis};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::addressing::{Face, face_center, find_matching_faces};

/// Angles closer than this (degrees) to 0 or 180 take the degenerate branch.
const ANGLE_EPSILON: f64 = 1e-9;

// ── Rigid transform ──────────────────────────────────────────────────────────

/// Rotation about `pivot` followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidTransform {
    /// Unit rotation axis, or zero when there is no rotation.
    pub rotation_axis: Vec3,
    pub rotation_angle_degrees: f64,
    pub translation: Vec3,
    /// Rotation centre.
    pub pivot: Point3d,
}

impl RigidTransform {
    pub fn translation_only(translation: Vec3) -> Self {
        Self {
            rotation_axis: Vec3::ZERO,
            rotation_angle_degrees: 0.0,
            translation,
            pivot: Point3d::ORIGIN,
        }
    }

    /// Whether applying the transform rotates anything.
    pub fn has_rotation(&self) -> bool {
        self.rotation_angle_degrees != 0.0
            && !default_tolerance().is_zero_length(self.rotation_axis.length())
    }

    pub fn to_transform(&self) -> Transform {
        let translate = Transform::translation(self.translation);
        if self.has_rotation() {
            Transform::rotation_about(self.rotation_axis, self.rotation_angle_degrees, self.pivot)
                .then(&translate)
        } else {
            translate
        }
    }

    /// Rotate `shape` about the pivot (when there is a rotation), then translate.
    pub fn apply<S: Shape>(&self, shape: &S) -> S {
        let rotated = if self.has_rotation() {
            shape.rotated(self.rotation_angle_degrees, self.pivot, self.rotation_axis)
        } else {
            shape.clone()
        };
        rotated.translated(self.translation)
    }
}

/// Rotation taking direction `from` onto direction `to`, as `(axis, degrees)`.
///
/// Aligned inputs give `(ZERO, 0)`; opposed inputs turn 180° about
/// [`perpendicular_to`]`(from)`.
pub(crate) fn rotation_between(from: &Vec3, to: &Vec3) -> (Vec3, f64) {
    let angle = from.angle_to(to);
    if angle.abs() < ANGLE_EPSILON {
        (Vec3::ZERO, 0.0)
    } else if (angle - 180.0).abs() < ANGLE_EPSILON {
        (perpendicular_to(from), 180.0)
    } else {
        match rotation_axis(from, to) {
            Some(axis) => (axis, angle),
            None => (perpendicular_to(from), angle),
        }
    }
}

// ── Mating ───────────────────────────────────────────────────────────────────

/// Transform that mates `moving_face` of `moving` flush against `fixed_face`
/// of `fixed`.
#[instrument(level = "debug", skip(fixed, moving))]
pub fn calculate_mate_transformation(
    fixed: &BoundingBox,
    fixed_face: Face,
    moving: &BoundingBox,
    moving_face: Face,
) -> RigidTransform {
    let n1 = fixed_face.normal();
    let n2 = moving_face.normal();
    let tol = default_tolerance();

    let (rotation_axis, rotation_angle_degrees) = if are_anti_parallel(&n1, &n2, tol.parallel) {
        (Vec3::ZERO, 0.0)
    } else {
        rotation_between(&n2, &(-n1))
    };

    let pivot = face_center(moving, moving_face);
    let translation = face_center(fixed, fixed_face) - pivot;

    debug!(
        angle = rotation_angle_degrees,
        ?rotation_axis,
        ?translation,
        "mate transform computed"
    );
    RigidTransform {
        rotation_axis,
        rotation_angle_degrees,
        translation,
        pivot,
    }
}

/// Move `moving` so its `moving_face` lies flush on `fixed_face` of `fixed`.
///
/// Afterwards the moving face occupies [`mated_face`]`(fixed_face)` of the
/// result's bounding box.
#[instrument(level = "debug", skip(fixed, moving))]
pub fn mate_bounding_box_faces<S: Shape>(
    fixed: &S,
    fixed_face: Face,
    moving: &S,
    moving_face: Face,
) -> S {
    let transform = calculate_mate_transformation(
        &fixed.bounding_box(),
        fixed_face,
        &moving.bounding_box(),
        moving_face,
    );
    transform.apply(moving)
}

/// Mate on the face pair chosen by [`find_matching_faces`].
#[instrument(level = "debug", skip(fixed, moving))]
pub fn auto_mate_bounding_boxes<S: Shape>(fixed: &S, moving: &S, prefer_larger: bool) -> S {
    let (fixed_face, moving_face) =
        find_matching_faces(&fixed.bounding_box(), &moving.bounding_box(), prefer_larger);
    info!(%fixed_face, %moving_face, "auto mate selected faces");
    mate_bounding_box_faces(fixed, fixed_face, moving, moving_face)
}

/// Translate `model` by `distance` along the normal of `reference_face`.
///
/// `face` names the mated face of `model`; only the reference face decides the
/// direction, so a positive distance always moves away from the fixed part.
pub fn offset_mated_model<S: Shape>(model: &S, face: Face, distance: f64, reference_face: Face) -> S {
    debug!(%face, %reference_face, distance, "offsetting mated model");
    RigidTransform::translation_only(reference_face.normal() * distance).apply(model)
}

/// Whether `face1` of `model1` and `face2` of `model2` are anti-parallel and
/// coplanar within `tol`.
pub fn are_faces_mated<S: Shape>(model1: &S, face1: Face, model2: &S, face2: Face, tol: f64) -> bool {
    let n1 = face1.normal();
    let n2 = face2.normal();
    if !are_anti_parallel(&n1, &n2, default_tolerance().parallel) {
        return false;
    }
    let c1 = face_center(&model1.bounding_box(), face1);
    let c2 = face_center(&model2.bounding_box(), face2);
    distance_to_plane(&c2, &c1, &n1).abs() < tol
}

/// The face label a moving face carries after being mated against
/// `fixed_face`.
pub fn mated_face(fixed_face: Face) -> Face {
    fixed_face.opposite()
}

/// Stack `top` on `bottom`, centred, with its bottom face on `bottom`'s top.
pub fn place_on_top<S: Shape>(bottom: &S, top: &S) -> S {
    mate_bounding_box_faces(bottom, Face::Top, top, Face::Bottom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cad_kernel::BoxSolid;

    const TOL: f64 = 1e-9;

    fn block() -> BoxSolid {
        BoxSolid::cuboid(30.0, 50.0, 20.0)
    }

    fn cube() -> BoxSolid {
        BoxSolid::cuboid(10.0, 10.0, 10.0)
    }

    #[test]
    fn test_anti_parallel_faces_need_no_rotation() {
        let t = calculate_mate_transformation(
            &block().bounding_box(),
            Face::Top,
            &cube().bounding_box(),
            Face::Bottom,
        );
        assert_eq!(t.rotation_angle_degrees, 0.0);
        assert_eq!(t.rotation_axis, Vec3::ZERO);
        assert!(!t.has_rotation());
        assert!((t.translation - Vec3::new(10.0, 20.0, 20.0)).length() < TOL);
        assert!(t.pivot.distance_to(&Point3d::new(5.0, 5.0, 0.0)) < TOL);
    }

    #[test]
    fn test_same_facing_faces_turn_half_way() {
        let t = calculate_mate_transformation(
            &block().bounding_box(),
            Face::Top,
            &cube().bounding_box(),
            Face::Top,
        );
        assert!((t.rotation_angle_degrees - 180.0).abs() < TOL);
        assert!(t.rotation_axis.dot(&Vec3::Z).abs() < TOL);
        assert!((t.rotation_axis.length() - 1.0).abs() < TOL);
    }

    #[test]
    fn test_perpendicular_faces_quarter_turn() {
        let t = calculate_mate_transformation(
            &block().bounding_box(),
            Face::Right,
            &cube().bounding_box(),
            Face::Top,
        );
        assert!((t.rotation_angle_degrees - 90.0).abs() < TOL);
        // +Z onto -X turns about -Y.
        assert!((t.rotation_axis - Vec3::new(0.0, -1.0, 0.0)).length() < TOL);
    }

    #[test]
    fn test_every_face_pair_ends_flush() {
        let fixed = block();
        let moving = BoxSolid::cuboid(4.0, 7.0, 11.0).translated(Vec3::new(-40.0, 3.0, 9.0));
        for fixed_face in Face::ALL {
            for moving_face in Face::ALL {
                let moved = mate_bounding_box_faces(&fixed, fixed_face, &moving, moving_face);
                let landed = mated_face(fixed_face);
                assert!(
                    are_faces_mated(&fixed, fixed_face, &moved, landed, 1e-9),
                    "{fixed_face} / {moving_face}"
                );
                let center = face_center(&moved.bounding_box(), landed);
                let target = face_center(&fixed.bounding_box(), fixed_face);
                assert!(center.distance_to(&target) < 1e-9, "{fixed_face} / {moving_face}");
            }
        }
    }

    #[test]
    fn test_mate_is_idempotent() {
        let fixed = block();
        let once = mate_bounding_box_faces(&fixed, Face::Top, &cube(), Face::Bottom);
        let twice = mate_bounding_box_faces(&fixed, Face::Top, &once, Face::Bottom);
        assert!(once.bounding_box().approx_eq(&twice.bounding_box(), TOL));
    }

    #[test]
    fn test_translation_only_never_rotates() {
        let shift = RigidTransform::translation_only(Vec3::new(1.0, -2.0, 3.0));
        assert!(!shift.has_rotation());
        let moved = shift.apply(&cube());
        let expected = cube().bounding_box().translated(Vec3::new(1.0, -2.0, 3.0));
        assert!(moved.bounding_box().approx_eq(&expected, TOL));
        assert_eq!(shift.to_transform(), Transform::translation(shift.translation));
    }

    #[test]
    fn test_offset_moves_along_reference_normal() {
        let fixed = block();
        let mated = mate_bounding_box_faces(&fixed, Face::Top, &cube(), Face::Bottom);
        let same = offset_mated_model(&mated, Face::Bottom, 0.0, Face::Top);
        assert!(same.bounding_box().approx_eq(&mated.bounding_box(), TOL));
        assert!(are_faces_mated(&fixed, Face::Top, &same, Face::Bottom, TOL));

        let lifted = offset_mated_model(&mated, Face::Bottom, 5.0, Face::Top);
        assert!(!are_faces_mated(&fixed, Face::Top, &lifted, Face::Bottom, TOL));
        assert!((lifted.bounding_box().min.z - 25.0).abs() < TOL);
    }

    #[test]
    fn test_auto_mate_uses_largest_faces() {
        let fixed = block();
        let moved = auto_mate_bounding_boxes(&fixed, &cube(), true);
        let bb = moved.bounding_box();
        assert!((bb.min.z - 20.0).abs() < TOL);
        assert!(bb.center().distance_to(&Point3d::new(15.0, 25.0, 25.0)) < TOL);
    }

    #[test]
    fn test_place_on_top_stacks() {
        let stacked = place_on_top(&cube(), &block());
        let bb = stacked.bounding_box();
        assert!((bb.min.z - 10.0).abs() < TOL);
        assert!((bb.max.z - 30.0).abs() < TOL);
    }

    #[test]
    fn test_apply_matches_to_transform() {
        let t = calculate_mate_transformation(
            &block().bounding_box(),
            Face::Left,
            &cube().bounding_box(),
            Face::Front,
        );
        let via_shape = t.apply(&cube()).bounding_box();
        let affine = t.to_transform();
        let corners: Vec<Point3d> = cube()
            .bounding_box()
            .corners()
            .iter()
            .map(|c| affine.transform_point(c))
            .collect();
        assert!(via_shape.approx_eq(&BoundingBox::from_points(&corners), TOL));
    }
}
