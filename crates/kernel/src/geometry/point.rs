use std::ops::{Add, Index, Sub};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::vector::Vec3;

/// A position in 3D space.
///
/// Points and [`Vec3`] stay distinct: `point - point` is a displacement and
/// only a displacement can be added to a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        self.lerp(other, 0.5)
    }

    /// `self` at `t = 0`, `other` at `t = 1`; `t` is not clamped here.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        *self + (*other - *self) * t
    }

    /// Displacement from the origin.
    pub fn to_vec3(&self) -> Vec3 {
        *self - Self::ORIGIN
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn to_na(&self) -> Vector3<f64> {
        self.to_vec3().to_na()
    }

    pub fn from_na(v: &Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<[f64; 3]> for Point3d {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl Index<usize> for Point3d {
    type Output = f64;

    /// Coordinate by axis index; panics past 2.
    fn index(&self, axis: usize) -> &f64 {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("axis index {axis} out of range"),
        }
    }
}

impl Add<Vec3> for Point3d {
    type Output = Point3d;
    fn add(self, offset: Vec3) -> Point3d {
        Point3d::new(self.x + offset.x, self.y + offset.y, self.z + offset.z)
    }
}

impl Sub<Vec3> for Point3d {
    type Output = Point3d;
    fn sub(self, offset: Vec3) -> Point3d {
        self + -offset
    }
}

impl Sub for Point3d {
    type Output = Vec3;
    fn sub(self, from: Point3d) -> Vec3 {
        Vec3::new(self.x - from.x, self.y - from.y, self.z - from.z)
    }
}

/// A point on a 2D drawing sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}
