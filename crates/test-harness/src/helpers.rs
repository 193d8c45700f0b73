//! Helper functions: error type and the reference configurator models built
//! on the layout engine.

use cad_kernel::{BoxSolid, BoundingBox, Plane, Point3d, Shape, Vec3};
use cad_render::ModelWithHelpers;
use cad_solver::{
    Face, LayoutError, Ray, center_selector, create_rectangular_grid, mate_bounding_box_faces,
    offset_mated_model, place_models_along_ray, place_models_at_points, place_on_top,
};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("model {name} has no parts")]
    EmptyModel { name: String },

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

fn compound(name: &str, parts: &[BoxSolid]) -> Result<BoxSolid, HarnessError> {
    BoxSolid::compound(parts).ok_or_else(|| HarnessError::EmptyModel { name: name.to_string() })
}

// ── Primitives ──────────────────────────────────────────────────────────────

/// Box from the origin to `(width, depth, height)`.
pub fn cuboid(width: f64, depth: f64, height: f64) -> BoxSolid {
    BoxSolid::cuboid(width, depth, height)
}

/// L-shaped profile: a horizontal flange along X and a vertical flange along
/// Z, both `depth` long in Y and centred on `y = 0`.
pub fn l_profile(depth: f64, flange_x: f64, flange_z: f64, thickness: f64) -> BoxSolid {
    let horizontal = BoxSolid::from_bounds(&BoundingBox::new(
        Point3d::new(0.0, -depth / 2.0, 0.0),
        Point3d::new(flange_x, depth / 2.0, thickness),
    ));
    let vertical = BoxSolid::from_bounds(&BoundingBox::new(
        Point3d::new(0.0, -depth / 2.0, 0.0),
        Point3d::new(thickness, depth / 2.0, flange_z),
    ));
    horizontal.fuse(&vertical)
}

// ── Configurator Models ─────────────────────────────────────────────────────

/// Parameters of the cuboid with an L-profile mated to one of its faces.
#[derive(Debug, Clone, PartialEq)]
pub struct MatedCuboidL {
    pub cuboid_width: f64,
    pub cuboid_depth: f64,
    pub cuboid_height: f64,
    pub l_length: f64,
    pub l_flange_x: f64,
    pub l_flange_z: f64,
    pub l_thickness: f64,
    /// Face names as typed by the user, e.g. `"BOTTOM"`.
    pub cuboid_face: String,
    pub l_profile_face: String,
    pub offset: f64,
}

impl Default for MatedCuboidL {
    fn default() -> Self {
        Self {
            cuboid_width: 100.0,
            cuboid_depth: 100.0,
            cuboid_height: 50.0,
            l_length: 100.0,
            l_flange_x: 50.0,
            l_flange_z: 50.0,
            l_thickness: 5.0,
            cuboid_face: "BOTTOM".into(),
            l_profile_face: "TOP".into(),
            offset: 0.0,
        }
    }
}

impl MatedCuboidL {
    /// The cuboid and the mated L-profile, in that order.
    pub fn parts(&self) -> Result<(BoxSolid, BoxSolid), HarnessError> {
        let cuboid_face: Face = self.cuboid_face.parse()?;
        let l_face: Face = self.l_profile_face.parse()?;

        let block = cuboid(self.cuboid_width, self.cuboid_depth, self.cuboid_height);
        let profile = l_profile(self.l_length, self.l_flange_x, self.l_flange_z, self.l_thickness);

        let mut mated = mate_bounding_box_faces(&block, cuboid_face, &profile, l_face);
        if self.offset != 0.0 {
            mated = offset_mated_model(&mated, l_face, self.offset, cuboid_face);
        }
        Ok((block, mated))
    }

    pub fn build(&self) -> Result<BoxSolid, HarnessError> {
        let (block, mated) = self.parts()?;
        Ok(block.fuse(&mated))
    }
}

/// Two steps: a 200-deep slab with a 280-deep slab stacked on it.
pub fn staircase(width: f64) -> Result<BoxSolid, HarnessError> {
    let bottom = cuboid(width, 200.0, 5.0);
    let top = place_on_top(&bottom, &cuboid(width, 280.0, 5.0));
    compound("staircase", &[bottom, top])
}

/// A thin main part plus, optionally, the space it is designed to fill.
pub fn helper_cuboid(width: f64, depth: f64, height: f64, show_helper: bool) -> ModelWithHelpers<BoxSolid> {
    let main = cuboid(width - 1.0, 20.0, 0.5);
    let helpers = if show_helper {
        vec![cuboid(width, depth, height)]
    } else {
        Vec::new()
    };
    ModelWithHelpers::new(main, helpers)
}

/// Parameters of a grid of identical cuboids.
#[derive(Debug, Clone, PartialEq)]
pub struct CuboidGrid {
    pub plane: Plane,
    pub rows: usize,
    pub cols: usize,
    pub x_spacing: f64,
    pub y_spacing: f64,
    pub box_size: Vec3,
    pub orientation: Vec3,
}

impl Default for CuboidGrid {
    fn default() -> Self {
        Self {
            plane: Plane::xy(),
            rows: 3,
            cols: 3,
            x_spacing: 30.0,
            y_spacing: 30.0,
            box_size: Vec3::new(10.0, 10.0, 10.0),
            orientation: Vec3::Z,
        }
    }
}

impl CuboidGrid {
    pub fn parts(&self) -> Vec<BoxSolid> {
        let points = create_rectangular_grid(
            &self.plane,
            self.rows,
            self.cols,
            self.x_spacing,
            self.y_spacing,
            self.orientation,
        );
        let size = self.box_size;
        place_models_at_points(|| cuboid(size.x, size.y, size.z), center_selector, &points)
    }

    pub fn build(&self) -> Result<BoxSolid, HarnessError> {
        compound("rectangular cuboid grid", &self.parts())
    }
}

/// `count` cuboids centred at evenly spaced points from `origin` to
/// `origin + vector`.
pub fn diagonal_cuboid_pattern(
    count: usize,
    vector: Vec3,
    origin: Point3d,
    box_size: Vec3,
) -> Result<BoxSolid, HarnessError> {
    let parts = place_models_along_ray(
        || cuboid(box_size.x, box_size.y, box_size.z),
        center_selector,
        &Ray::new(origin, vector),
        count,
    );
    compound("diagonal cuboid pattern", &parts)
}

/// Centre of a shape's bounding box.
pub fn center_of<S: Shape>(shape: &S) -> Point3d {
    shape.bounding_box().center()
}
