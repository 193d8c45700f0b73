use std::ops::{Add, Div, Index, Mul, Neg, Sub};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Magnitude below which a vector has no direction.
const DIRECTIONLESS: f64 = 1e-15;

/// A direction or displacement in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// `+X`, `+Y` or `+Z` for axis index 0, 1 or 2.
    pub fn unit_axis(axis: usize) -> Self {
        match axis {
            0 => Self::X,
            1 => Self::Y,
            _ => Self::Z,
        }
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.to_na().dot(&other.to_na())
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self::from_na(&self.to_na().cross(&other.to_na()))
    }

    pub fn length(&self) -> f64 {
        self.to_na().norm()
    }

    /// Unit vector in the same direction, or `None` for a (near-)zero vector.
    pub fn normalized(&self) -> Option<Self> {
        let len = self.length();
        (len >= DIRECTIONLESS).then(|| *self / len)
    }

    /// Normalize, substituting `fallback` for a zero-length vector.
    pub fn normalized_or(&self, fallback: Self) -> Self {
        self.normalized().unwrap_or(fallback)
    }

    /// Angle to `other` in degrees, in `[0, 180]`. Zero-length inputs give 0.
    pub fn angle_to(&self, other: &Self) -> f64 {
        let scale = self.length() * other.length();
        if scale < DIRECTIONLESS {
            0.0
        } else {
            (self.dot(other) / scale).clamp(-1.0, 1.0).acos().to_degrees()
        }
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn to_na(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn from_na(v: &Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl Index<usize> for Vec3 {
    type Output = f64;

    /// Component by axis index; panics past 2.
    fn index(&self, axis: usize) -> &f64 {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("axis index {axis} out of range"),
        }
    }
}

macro_rules! componentwise {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Vec3 {
            type Output = Vec3;
            fn $method(self, rhs: Vec3) -> Vec3 {
                Vec3::new(self.x $op rhs.x, self.y $op rhs.y, self.z $op rhs.z)
            }
        }
    };
}

macro_rules! scaled {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<f64> for Vec3 {
            type Output = Vec3;
            fn $method(self, rhs: f64) -> Vec3 {
                Vec3::new(self.x $op rhs, self.y $op rhs, self.z $op rhs)
            }
        }
    };
}

componentwise!(Add, add, +);
componentwise!(Sub, sub, -);
scaled!(Mul, mul, *);
scaled!(Div, div, /);

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        self * -1.0
    }
}
