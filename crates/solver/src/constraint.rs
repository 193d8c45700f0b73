//! Point-to-point constraints between models.
//!
//! Generalises face mating to any addressed point: the moving model's anchor
//! is carried onto the fixed model's anchor and the model is re-expressed in
//! a local frame whose Z axis is the anchor normal.

use cad_kernel::{BoundingBox, GeometryError, Plane, Shape, Vec3, perpendicular_to, project_onto_plane};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::addressing::{Face, PositionSpec, corner_faces, point_on_bounding_box};
use crate::error::LayoutError;

/// Optional overrides for [`constrain_models_by_points`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintOptions {
    /// Frame Z axis. Derived from the fixed anchor when absent.
    pub normal: Option<Vec3>,
    /// Frame X axis, orthogonalised against Z. Defaults to
    /// [`perpendicular_to`] the normal.
    pub x_dir: Option<Vec3>,
    /// Face supplying the normal of an edge anchor; must border the edge.
    pub face_for_edge: Option<Face>,
    /// Face supplying the normal of a corner anchor; must meet the corner.
    pub face_for_corner: Option<Face>,
}

impl ConstraintOptions {
    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = Some(normal);
        self
    }

    pub fn with_x_dir(mut self, x_dir: Vec3) -> Self {
        self.x_dir = Some(x_dir);
        self
    }

    pub fn with_face_for_edge(mut self, face: Face) -> Self {
        self.face_for_edge = Some(face);
        self
    }

    pub fn with_face_for_corner(mut self, face: Face) -> Self {
        self.face_for_corner = Some(face);
        self
    }
}

/// Normal of an anchor when no explicit override is given.
///
/// Faces use their own normal. Edges use `face_for_edge`, or the first face
/// of the edge. Corners use `face_for_corner`, or `+Z`, as does the centre.
pub fn normal_for_spec(spec: &PositionSpec, options: &ConstraintOptions) -> Result<Vec3, LayoutError> {
    match *spec {
        PositionSpec::Face { face, .. } => Ok(face.normal()),
        PositionSpec::Edge { edge, .. } => match options.face_for_edge {
            Some(face) if edge.borders(face) => Ok(face.normal()),
            Some(face) => Err(LayoutError::FaceNotOnEdge { face, edge }),
            None => Ok(edge.faces().0.normal()),
        },
        PositionSpec::Corner { edge, end } => match options.face_for_corner {
            Some(face) if corner_faces(edge, end).contains(&face) => Ok(face.normal()),
            Some(face) => Err(LayoutError::FaceNotOnEdge { face, edge }),
            None => Ok(Vec3::Z),
        },
        PositionSpec::Center => Ok(Vec3::Z),
    }
}

/// The local frame a constraint re-expresses the moving model in.
fn constraint_frame(
    fixed: &BoundingBox,
    fixed_spec: &PositionSpec,
    options: &ConstraintOptions,
) -> Result<Plane, LayoutError> {
    let origin = point_on_bounding_box(fixed, fixed_spec);
    let z_dir = match options.normal {
        Some(normal) => normal.normalized().ok_or(GeometryError::DegenerateVector {
            operation: "constrain_models_by_points",
        })?,
        None => normal_for_spec(fixed_spec, options)?,
    };
    let x_dir = options
        .x_dir
        .and_then(|x| project_onto_plane(&x, &z_dir).normalized())
        .unwrap_or_else(|| perpendicular_to(&z_dir));
    Ok(Plane::new(origin, x_dir, z_dir))
}

/// Carry `moving`'s anchor onto `fixed`'s anchor and orient it in the anchor
/// frame.
///
/// Every point `p` of `moving` maps to `origin + R (p - moving_point)`, where
/// the columns of `R` are the frame's X, Y and Z axes.
#[instrument(level = "debug", skip(fixed, moving))]
pub fn constrain_models_by_points<S: Shape>(
    fixed: &S,
    fixed_spec: &PositionSpec,
    moving: &S,
    moving_spec: &PositionSpec,
    options: &ConstraintOptions,
) -> Result<S, LayoutError> {
    let frame = constraint_frame(&fixed.bounding_box(), fixed_spec, options)?;
    let moving_point = point_on_bounding_box(&moving.bounding_box(), moving_spec);
    debug!(origin = ?frame.origin, normal = ?frame.normal, x_dir = ?frame.x_dir, "constraint frame");

    let local = moving.translated(-moving_point.to_vec3());
    Ok(local.transformed(&frame.to_transform()))
}

/// Translate `model` by `distance` along `direction`; a zero direction leaves
/// it in place.
pub fn offset_constrained_model<S: Shape>(model: &S, direction: Vec3, distance: f64) -> S {
    match direction.normalized() {
        Some(dir) => model.translated(dir * distance),
        None => model.clone(),
    }
}
