//! Pattern placement: grids and lines of oriented points, and instancing of
//! models onto them.

use cad_kernel::{Plane, Point3d, Shape, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::mate::rotation_between;

/// Plane normals within this of vertical make a linear pattern fall back to
/// a `+X` plane normal.
const VERTICAL_DOT_LIMIT: f64 = 0.99;

// ── Pattern points ───────────────────────────────────────────────────────────

/// A placement target: where a model goes and which way its local `+Z` points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternPoint {
    pub position: Point3d,
    /// Normal of the plane the pattern was laid out on.
    pub direction: Vec3,
    /// Unit target for the model's local `+Z`.
    pub orientation: Vec3,
}

/// A positioned direction; its length sets the extent of a ray pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3d,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Point3d, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f64) -> Point3d {
        self.origin + self.direction * t
    }
}

/// `rows × cols` points on `plane`, row-major.
///
/// Point `(row, col)` sits at plane-local `(col * x_spacing, row * y_spacing, 0)`.
/// A zero `orientation` falls back to the plane normal.
pub fn create_rectangular_grid(
    plane: &Plane,
    rows: usize,
    cols: usize,
    x_spacing: f64,
    y_spacing: f64,
    orientation: Vec3,
) -> Vec<PatternPoint> {
    let orientation = orientation.normalized_or(plane.normal);
    (0..rows * cols)
        .map(|index| {
            let (row, col) = (index / cols, index % cols);
            PatternPoint {
                position: plane.to_world(col as f64 * x_spacing, row as f64 * y_spacing, 0.0),
                direction: plane.normal,
                orientation,
            }
        })
        .collect()
}

/// `count` points evenly spread from `origin` to `origin + direction`.
///
/// The layout plane has `direction` as its X axis and `direction × Z` as its
/// normal, or `+X` when `direction` is nearly vertical.
pub fn create_linear_pattern(
    origin: Point3d,
    direction: Vec3,
    count: usize,
    orientation: Vec3,
) -> Vec<PatternPoint> {
    let unit = direction.normalized_or(Vec3::X);
    let normal = if unit.dot(&Vec3::Z).abs() > VERTICAL_DOT_LIMIT {
        Vec3::X
    } else {
        unit.cross(&Vec3::Z).normalized_or(Vec3::X)
    };
    let spacing = if count > 1 {
        direction.length() / (count - 1) as f64
    } else {
        0.0
    };
    create_rectangular_grid(&Plane::new(origin, unit, normal), 1, count, spacing, 0.0, orientation)
}

// ── Instancing ───────────────────────────────────────────────────────────────

/// Bounding-box centre, the usual reference point for placement.
pub fn center_selector<S: Shape>(model: &S) -> Point3d {
    model.bounding_box().center()
}

/// Instance one model per point.
///
/// Each fresh model is translated so its reference point lands on the
/// target position, then rotated about that position so its local `+Z`
/// follows the point's orientation (or its direction when the orientation is
/// zero).
#[instrument(level = "debug", skip_all, fields(count = points.len()))]
pub fn place_models_at_points<S, F, R>(factory: F, selector: R, points: &[PatternPoint]) -> Vec<S>
where
    S: Shape,
    F: Fn() -> S,
    R: Fn(&S) -> Point3d,
{
    points
        .iter()
        .map(|point| {
            let model = factory();
            let reference = selector(&model);
            let placed = model.translated(point.position - reference);

            let target = point.orientation.normalized().or_else(|| point.direction.normalized());
            match target {
                Some(target) => {
                    let (axis, angle) = rotation_between(&Vec3::Z, &target);
                    if angle == 0.0 {
                        placed
                    } else {
                        placed.rotated(angle, point.position, axis)
                    }
                }
                None => placed,
            }
        })
        .collect()
}

/// Instance `count` models with reference points spread evenly along `ray`,
/// from its origin to `origin + direction`. A single model sits at the origin.
#[instrument(level = "debug", skip(factory, selector))]
pub fn place_models_along_ray<S, F, R>(factory: F, selector: R, ray: &Ray, count: usize) -> Vec<S>
where
    S: Shape,
    F: Fn() -> S,
    R: Fn(&S) -> Point3d,
{
    let models: Vec<S> = (0..count)
        .map(|i| {
            let t = if count > 1 { i as f64 / (count - 1) as f64 } else { 0.0 };
            let model = factory();
            let reference = selector(&model);
            model.translated(ray.at(t) - reference)
        })
        .collect();
    debug!(placed = models.len(), "ray pattern placed");
    models
}

#[cfg(test)]
mod tests {
    use super::*;
    use cad_kernel::BoxSolid;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_grid_is_row_major() {
        let points = create_rectangular_grid(&Plane::xy(), 2, 3, 10.0, 20.0, Vec3::Z);
        assert_eq!(points.len(), 6);
        let expected = [
            (0.0, 0.0),
            (10.0, 0.0),
            (20.0, 0.0),
            (0.0, 20.0),
            (10.0, 20.0),
            (20.0, 20.0),
        ];
        for (point, (x, y)) in points.iter().zip(expected) {
            assert!(point.position.distance_to(&Point3d::new(x, y, 0.0)) < TOL);
            assert_eq!(point.direction, Vec3::Z);
            assert_eq!(point.orientation, Vec3::Z);
        }
    }

    #[test]
    fn test_grid_on_tilted_plane() {
        let plane = Plane::new(Point3d::new(1.0, 2.0, 3.0), Vec3::Y, Vec3::X);
        let points = create_rectangular_grid(&plane, 2, 1, 5.0, 4.0, Vec3::ZERO);
        // Plane Y is X × Y = Z.
        assert!(points[1].position.distance_to(&Point3d::new(1.0, 2.0, 7.0)) < TOL);
        assert_eq!(points[1].orientation, Vec3::X);
    }

    #[test]
    fn test_linear_pattern_spacing() {
        let points = create_linear_pattern(Point3d::ORIGIN, Vec3::new(0.0, 0.0, 10.0), 3, Vec3::Z);
        let zs: Vec<f64> = points.iter().map(|p| p.position.z).collect();
        assert_eq!(points.len(), 3);
        for (z, expected) in zs.iter().zip([0.0, 5.0, 10.0]) {
            assert!((z - expected).abs() < TOL);
        }
        assert_eq!(points[0].direction, Vec3::X);

        let horizontal = create_linear_pattern(Point3d::ORIGIN, Vec3::new(9.0, 0.0, 0.0), 4, Vec3::Z);
        assert!(horizontal[3].position.distance_to(&Point3d::new(9.0, 0.0, 0.0)) < TOL);
        assert!((horizontal[0].direction - Vec3::new(0.0, -1.0, 0.0)).length() < TOL);

        let single = create_linear_pattern(Point3d::new(1.0, 1.0, 1.0), Vec3::X, 1, Vec3::Z);
        assert_eq!(single.len(), 1);
        assert!(single[0].position.distance_to(&Point3d::new(1.0, 1.0, 1.0)) < TOL);
    }

    #[test]
    fn test_place_models_centres_and_orients() {
        let points = [
            PatternPoint {
                position: Point3d::new(50.0, 0.0, 0.0),
                direction: Vec3::Z,
                orientation: Vec3::Z,
            },
            PatternPoint {
                position: Point3d::new(0.0, 50.0, 0.0),
                direction: Vec3::Z,
                orientation: Vec3::X,
            },
            PatternPoint {
                position: Point3d::ORIGIN,
                direction: Vec3::Z,
                orientation: -Vec3::Z,
            },
        ];
        let models = place_models_at_points(|| BoxSolid::cuboid(2.0, 4.0, 10.0), center_selector, &points);
        assert_eq!(models.len(), 3);

        let upright = models[0].bounding_box();
        assert!(upright.center().distance_to(&points[0].position) < TOL);
        assert!((upright.extents().z - 10.0).abs() < TOL);

        // Local +Z laid along +X.
        let lying = models[1].bounding_box();
        assert!(lying.center().distance_to(&points[1].position) < TOL);
        assert!((lying.extents().x - 10.0).abs() < TOL);

        let flipped = models[2].bounding_box();
        assert!(flipped.center().distance_to(&Point3d::ORIGIN) < TOL);
        assert!((flipped.extents().z - 10.0).abs() < TOL);
    }

    #[test]
    fn test_place_models_along_ray() {
        let ray = Ray::new(Point3d::ORIGIN, Vec3::new(0.0, 50.0, 50.0));
        let models = place_models_along_ray(|| BoxSolid::cuboid(10.0, 10.0, 10.0), center_selector, &ray, 5);
        assert_eq!(models.len(), 5);
        assert!(center_selector(&models[0]).distance_to(&Point3d::ORIGIN) < TOL);
        assert!(center_selector(&models[2]).distance_to(&Point3d::new(0.0, 25.0, 25.0)) < TOL);
        assert!(center_selector(&models[4]).distance_to(&Point3d::new(0.0, 50.0, 50.0)) < TOL);

        let one = place_models_along_ray(|| BoxSolid::cuboid(1.0, 1.0, 1.0), center_selector, &ray, 1);
        assert!(center_selector(&one[0]).distance_to(&Point3d::ORIGIN) < TOL);
    }
}
