//! Geometry primitives and the kernel seam for the bounding-box layout engine.
//!
//! The solid modeler itself (B-rep, booleans, meshing) lives outside this
//! workspace. This crate defines what the layout engine needs from it: the
//! [`Shape`] and [`Projectable`] traits, plus [`BoxSolid`], a deterministic
//! cuboid-based implementation used by tests and the drawing demo.

pub mod geometry;
pub mod projection;
pub mod solid;

pub use geometry::math::{
    angle_between, are_anti_parallel, are_parallel, distance_to_plane, line_plane_intersection,
    perpendicular_to, project_onto_plane, rotation_axis,
};
pub use geometry::plane::Plane;
pub use geometry::point::{Point2d, Point3d};
pub use geometry::transform::{BoundingBox, Transform};
pub use geometry::vector::Vec3;
pub use projection::{Drawing, Projectable, Projection, ProjectionView, SvgDrawing};
pub use solid::{BoxSolid, Shape};

/// Errors from geometric primitives.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("degenerate (zero-length) vector in {operation}")]
    DegenerateVector { operation: &'static str },
}

/// Tolerances for geometric comparisons in the layout engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Cross-product magnitude below which unit vectors are parallel.
    pub parallel: f64,
    /// Plane distance below which two faces count as mated.
    pub mate: f64,
    /// Axis length below which a rotation is skipped.
    pub zero_length: f64,
    /// Parts closer than this to an explosion center are not moved.
    pub explosion_center: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            parallel: 1e-10,
            mate: 1e-9,
            zero_length: 1e-10,
            explosion_center: 1e-3,
        }
    }
}

impl Tolerance {
    pub fn is_zero_length(&self, length: f64) -> bool {
        length.abs() < self.zero_length
    }
}

pub fn default_tolerance() -> Tolerance {
    Tolerance::default()
}
