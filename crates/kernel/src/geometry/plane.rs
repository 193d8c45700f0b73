use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::transform::Transform;
use super::vector::Vec3;

/// A placement plane: origin plus an in-plane X direction and a normal.
///
/// `x_dir` is expected to be perpendicular to `normal`; this is not enforced,
/// callers supply an orthogonal pair. Both are normalized on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3d,
    pub x_dir: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(origin: Point3d, x_dir: Vec3, normal: Vec3) -> Self {
        Self {
            origin,
            x_dir: x_dir.normalized_or(Vec3::X),
            normal: normal.normalized_or(Vec3::Z),
        }
    }

    pub fn xy() -> Self {
        Self::new(Point3d::ORIGIN, Vec3::X, Vec3::Z)
    }

    /// In-plane Y direction, `normal × x_dir`.
    pub fn y_dir(&self) -> Vec3 {
        self.normal.cross(&self.x_dir)
    }

    /// Map local plane coordinates to world coordinates.
    pub fn to_world(&self, x: f64, y: f64, z: f64) -> Point3d {
        self.origin + self.x_dir * x + self.y_dir() * y + self.normal * z
    }

    pub fn to_transform(&self) -> Transform {
        Transform::from_frame(self.origin, self.x_dir, self.normal)
    }
}
