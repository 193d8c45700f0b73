//! The solid-handle seam between the layout engine and the CAD kernel.
//!
//! Every operation is non-destructive: it returns a new handle and leaves the
//! receiver untouched, so no manual lifetime management is needed.

use tracing::debug;

use crate::geometry::point::Point3d;
use crate::geometry::transform::{BoundingBox, Transform};
use crate::geometry::vector::Vec3;

/// A kernel solid the layout engine can position.
///
/// Implementors only provide the bounding box and a general affine transform;
/// translation, rotation and mirroring are derived from it.
pub trait Shape: Clone {
    /// Axis-aligned bounding box in world coordinates.
    fn bounding_box(&self) -> BoundingBox;

    /// A copy of this solid mapped through `transform`.
    fn transformed(&self, transform: &Transform) -> Self;

    fn translated(&self, offset: Vec3) -> Self {
        self.transformed(&Transform::translation(offset))
    }

    /// Rotate by `angle_degrees` about `axis` through `pivot`.
    fn rotated(&self, angle_degrees: f64, pivot: Point3d, axis: Vec3) -> Self {
        self.transformed(&Transform::rotation_about(axis, angle_degrees, pivot))
    }

    /// Reflect through the plane with `normal` passing through `center`.
    fn mirrored(&self, normal: Vec3, center: Point3d) -> Self {
        self.transformed(&Transform::mirror(normal, center))
    }
}

/// Corner indices of the six faces of a cuboid, counter-clockwise seen from
/// outside, in `BoundingBox::corners` numbering.
pub(crate) const CUBOID_FACES: [[usize; 4]; 6] = [
    [0, 1, 5, 4], // front  (-Y)
    [2, 3, 7, 6], // back   (+Y)
    [3, 0, 4, 7], // left   (-X)
    [1, 2, 6, 5], // right  (+X)
    [4, 5, 6, 7], // top    (+Z)
    [0, 3, 2, 1], // bottom (-Z)
];

/// Corner index pairs of the twelve cuboid edges and the two faces
/// (indices into `CUBOID_FACES`) each one borders.
pub(crate) const CUBOID_EDGES: [(usize, usize, usize, usize); 12] = [
    (0, 1, 0, 5),
    (1, 2, 3, 5),
    (2, 3, 1, 5),
    (3, 0, 2, 5),
    (4, 5, 0, 4),
    (5, 6, 3, 4),
    (6, 7, 1, 4),
    (7, 4, 2, 4),
    (0, 4, 0, 2),
    (1, 5, 0, 3),
    (2, 6, 1, 3),
    (3, 7, 1, 2),
];

/// One cuboid of a [`BoxSolid`], stored as its eight world-space corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub corners: [Point3d; 8],
}

impl Cuboid {
    fn from_bounds(bounds: &BoundingBox) -> Self {
        Self {
            corners: bounds.corners(),
        }
    }

    fn transformed(&self, transform: &Transform) -> Self {
        Self {
            corners: self.corners.map(|c| transform.transform_point(&c)),
        }
    }

    pub fn center(&self) -> Point3d {
        self.corners[0].midpoint(&self.corners[6])
    }

    /// Outward direction of face `face` (index into the cuboid face table).
    ///
    /// Taken from the cuboid center to the face center, so it stays outward
    /// under reflections as well as rotations.
    pub(crate) fn face_direction(&self, face: usize) -> Vec3 {
        let [a, _, c, _] = CUBOID_FACES[face];
        let face_center = self.corners[a].midpoint(&self.corners[c]);
        (face_center - self.center()).normalized_or(Vec3::ZERO)
    }
}

/// Reference kernel solid: a union of (possibly rotated) cuboids.
///
/// Stands in for the real kernel in tests and demos. Fusing only collects the
/// cuboids; no boolean evaluation is done.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSolid {
    cuboids: Vec<Cuboid>,
}

impl BoxSolid {
    /// Cuboid with one corner at the origin and the opposite one at
    /// `(width, depth, height)`.
    pub fn cuboid(width: f64, depth: f64, height: f64) -> Self {
        debug!(width, depth, height, "creating cuboid solid");
        Self::from_bounds(&BoundingBox::from_corners(
            Point3d::ORIGIN,
            Point3d::new(width, depth, height),
        ))
    }

    pub fn from_bounds(bounds: &BoundingBox) -> Self {
        Self {
            cuboids: vec![Cuboid::from_bounds(bounds)],
        }
    }

    /// Union of two solids.
    pub fn fuse(&self, other: &BoxSolid) -> BoxSolid {
        let mut cuboids = self.cuboids.clone();
        cuboids.extend_from_slice(&other.cuboids);
        BoxSolid { cuboids }
    }

    /// Union of many solids; `None` when `solids` is empty.
    pub fn compound<'a>(solids: impl IntoIterator<Item = &'a BoxSolid>) -> Option<BoxSolid> {
        let cuboids: Vec<Cuboid> = solids
            .into_iter()
            .flat_map(|s| s.cuboids.iter().copied())
            .collect();
        if cuboids.is_empty() {
            None
        } else {
            Some(BoxSolid { cuboids })
        }
    }

    pub fn cuboids(&self) -> &[Cuboid] {
        &self.cuboids
    }
}

impl Shape for BoxSolid {
    fn bounding_box(&self) -> BoundingBox {
        let corners: Vec<Point3d> = self.cuboids.iter().flat_map(|c| c.corners).collect();
        BoundingBox::from_points(&corners)
    }

    fn transformed(&self, transform: &Transform) -> Self {
        Self {
            cuboids: self.cuboids.iter().map(|c| c.transformed(transform)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bb_close(actual: BoundingBox, min: [f64; 3], max: [f64; 3]) -> bool {
        actual.approx_eq(&BoundingBox::new(min.into(), max.into()), 1e-9)
    }

    #[test]
    fn test_cuboid_bounds() {
        let s = BoxSolid::cuboid(30.0, 50.0, 20.0);
        assert!(bb_close(s.bounding_box(), [0.0, 0.0, 0.0], [30.0, 50.0, 20.0]));
    }

    #[test]
    fn test_translate_is_non_destructive() {
        let s = BoxSolid::cuboid(1.0, 1.0, 1.0);
        let moved = s.translated(Vec3::new(5.0, 0.0, 0.0));
        assert!(bb_close(s.bounding_box(), [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]));
        assert!(bb_close(moved.bounding_box(), [5.0, 0.0, 0.0], [6.0, 1.0, 1.0]));
    }

    #[test]
    fn test_rotate_quarter_turn_about_corner() {
        let s = BoxSolid::cuboid(10.0, 2.0, 1.0);
        let r = s.rotated(90.0, Point3d::ORIGIN, Vec3::Z);
        assert!(bb_close(r.bounding_box(), [-2.0, 0.0, 0.0], [0.0, 10.0, 1.0]));
    }

    #[test]
    fn test_mirror() {
        let s = BoxSolid::cuboid(2.0, 2.0, 2.0);
        let m = s.mirrored(Vec3::X, Point3d::ORIGIN);
        assert!(bb_close(m.bounding_box(), [-2.0, 0.0, 0.0], [0.0, 2.0, 2.0]));
        // Faces still point outward after the handedness flip.
        let cuboid = m.cuboids()[0];
        assert!((cuboid.face_direction(3) - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_fuse_bounds() {
        let a = BoxSolid::cuboid(1.0, 1.0, 1.0);
        let b = BoxSolid::cuboid(1.0, 1.0, 1.0).translated(Vec3::new(0.0, 0.0, 4.0));
        let fused = a.fuse(&b);
        assert_eq!(fused.cuboids().len(), 2);
        assert!(bb_close(fused.bounding_box(), [0.0, 0.0, 0.0], [1.0, 1.0, 5.0]));
        assert!(BoxSolid::compound(std::iter::empty()).is_none());
    }

    #[test]
    fn test_face_table_is_outward() {
        let s = BoxSolid::cuboid(3.0, 4.0, 5.0);
        let c = s.cuboids()[0];
        let expected = [-Vec3::Y, Vec3::Y, -Vec3::X, Vec3::X, Vec3::Z, -Vec3::Z];
        for (face, normal) in expected.iter().enumerate() {
            let [a, b, d, _] = CUBOID_FACES[face];
            let winding = (c.corners[b] - c.corners[a]).cross(&(c.corners[d] - c.corners[b]));
            assert!(winding.normalized().unwrap().dot(normal) > 0.999, "face {face}");
            assert!((c.face_direction(face) - *normal).length() < 1e-12);
        }
    }
}
