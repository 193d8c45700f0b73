use nalgebra::{Matrix3, Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::vector::Vec3;

/// An affine map `p -> linear * p + translation`.
///
/// Rigid motions, reflections and frame changes are all expressed this way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub linear: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            linear: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    pub fn translation(offset: Vec3) -> Self {
        Self {
            linear: Matrix3::identity(),
            translation: offset.to_na(),
        }
    }

    /// Rotation by `angle_degrees` about `axis` through `pivot` (right-hand rule).
    ///
    /// A zero-length axis yields the identity.
    pub fn rotation_about(axis: Vec3, angle_degrees: f64, pivot: Point3d) -> Self {
        let Some(axis) = axis.normalized() else {
            return Self::identity();
        };
        let rotation = Rotation3::from_axis_angle(
            &Unit::new_unchecked(axis.to_na()),
            angle_degrees.to_radians(),
        );
        Self::about_pivot(*rotation.matrix(), pivot)
    }

    /// Reflection through the plane with `normal` passing through `center`.
    ///
    /// A zero-length normal yields the identity.
    pub fn mirror(normal: Vec3, center: Point3d) -> Self {
        let Some(n) = normal.normalized() else {
            return Self::identity();
        };
        let n = n.to_na();
        let linear = Matrix3::identity() - 2.0 * n * n.transpose();
        Self::about_pivot(linear, center)
    }

    /// Map from a local frame to world coordinates.
    ///
    /// Local X goes to `x_dir`, local Z to `z_dir`, local Y to `z_dir × x_dir`,
    /// and the local origin to `origin`. Both directions must be unit length
    /// and orthogonal.
    pub fn from_frame(origin: Point3d, x_dir: Vec3, z_dir: Vec3) -> Self {
        let y_dir = z_dir.cross(&x_dir);
        Self {
            linear: Matrix3::from_columns(&[x_dir.to_na(), y_dir.to_na(), z_dir.to_na()]),
            translation: origin.to_na(),
        }
    }

    fn about_pivot(linear: Matrix3<f64>, pivot: Point3d) -> Self {
        let c = pivot.to_na();
        Self {
            linear,
            translation: c - linear * c,
        }
    }

    /// Compose: apply `self` first, then `next`.
    pub fn then(&self, next: &Transform) -> Transform {
        Transform {
            linear: next.linear * self.linear,
            translation: next.linear * self.translation + next.translation,
        }
    }

    pub fn transform_point(&self, p: &Point3d) -> Point3d {
        Point3d::from_na(&(self.linear * p.to_na() + self.translation))
    }

    /// Transform a direction (no translation).
    pub fn transform_vector(&self, v: &Vec3) -> Vec3 {
        Vec3::from_na(&(self.linear * v.to_na()))
    }

    /// Inverse map, or `None` when the linear part is singular.
    pub fn inverse(&self) -> Option<Self> {
        let inv = self.linear.try_inverse()?;
        Some(Self {
            linear: inv,
            translation: -(inv * self.translation),
        })
    }

}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Axis-aligned bounding box, as reported by the kernel for every solid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3d,
    pub max: Point3d,
}

impl BoundingBox {
    pub fn new(min: Point3d, max: Point3d) -> Self {
        Self { min, max }
    }

    /// Box spanned by two opposite corners given in any order.
    pub fn from_corners(a: Point3d, b: Point3d) -> Self {
        Self {
            min: Point3d::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3d::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3d::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3d::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Point3d]) -> Self {
        points.iter().fold(Self::empty(), |mut bb, p| {
            bb.expand_to_include(p);
            bb
        })
    }

    pub fn expand_to_include(&mut self, p: &Point3d) {
        self.min = Point3d::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = Point3d::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut bb = *self;
        bb.expand_to_include(&other.min);
        bb.expand_to_include(&other.max);
        bb
    }

    pub fn center(&self) -> Point3d {
        self.min.midpoint(&self.max)
    }

    /// Edge lengths along X, Y and Z.
    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn volume(&self) -> f64 {
        let s = self.extents();
        s.x * s.y * s.z
    }

    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// The eight corners, bottom ring (z = min) first.
    pub fn corners(&self) -> [Point3d; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3d::new(lo.x, lo.y, lo.z),
            Point3d::new(hi.x, lo.y, lo.z),
            Point3d::new(hi.x, hi.y, lo.z),
            Point3d::new(lo.x, hi.y, lo.z),
            Point3d::new(lo.x, lo.y, hi.z),
            Point3d::new(hi.x, lo.y, hi.z),
            Point3d::new(hi.x, hi.y, hi.z),
            Point3d::new(lo.x, hi.y, hi.z),
        ]
    }

    /// Whether both corners lie within `tol` of the other box's corners.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.min.distance_to(&other.min) <= tol && self.max.distance_to(&other.max) <= tol
    }
}
