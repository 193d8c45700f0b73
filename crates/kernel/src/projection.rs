//! Orthographic projection of solids into 2D line drawings with SVG export.
//!
//! This is the kernel side of technical drawings: a solid is projected onto a
//! standard view plane and split into visible and hidden line sets, each of
//! which can emit SVG path data and a view box.

use serde::{Deserialize, Serialize};

use crate::geometry::point::{Point2d, Point3d};
use crate::geometry::vector::Vec3;
use crate::solid::{BoxSolid, CUBOID_EDGES};

/// Standard orthographic views of a technical drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionView {
    Front,
    Top,
    Right,
}

impl ProjectionView {
    pub const STANDARD: [ProjectionView; 3] =
        [ProjectionView::Front, ProjectionView::Top, ProjectionView::Right];

    /// Sheet right, sheet up, and the direction pointing at the viewer.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        match self {
            ProjectionView::Front => (Vec3::X, Vec3::Z, -Vec3::Y),
            ProjectionView::Top => (Vec3::X, Vec3::Y, Vec3::Z),
            ProjectionView::Right => (Vec3::Y, Vec3::Z, Vec3::X),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProjectionView::Front => "front",
            ProjectionView::Top => "top",
            ProjectionView::Right => "right",
        }
    }

    fn to_sheet(&self, p: &Point3d) -> Point2d {
        let (right, up, _) = self.basis();
        let v = p.to_vec3();
        Point2d::new(v.dot(&right), v.dot(&up))
    }
}

/// What the layout engine needs from a projected line set.
pub trait SvgDrawing {
    /// One SVG path `d` string per stroke.
    fn to_svg_paths(&self) -> Vec<String>;

    /// `"x y w h"` covering every stroke, grown by `margin` on each side.
    fn to_svg_view_box(&self, margin: f64) -> String;

    fn is_empty(&self) -> bool;
}

/// Visible and hidden line sets of one view.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection<D> {
    pub visible: D,
    pub hidden: D,
}

/// A solid that can be projected into a standard view.
pub trait Projectable {
    type Drawing: SvgDrawing;

    fn project(&self, view: ProjectionView) -> Projection<Self::Drawing>;
}

/// A set of 2D line segments in sheet coordinates (Y up).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    pub segments: Vec<(Point2d, Point2d)>,
}

const SEGMENT_TOLERANCE: f64 = 1e-9;

impl Drawing {
    fn contains(&self, a: &Point2d, b: &Point2d) -> bool {
        self.segments.iter().any(|(p, q)| {
            (p.distance_to(a) < SEGMENT_TOLERANCE && q.distance_to(b) < SEGMENT_TOLERANCE)
                || (p.distance_to(b) < SEGMENT_TOLERANCE && q.distance_to(a) < SEGMENT_TOLERANCE)
        })
    }

    /// Add a segment unless it is degenerate or already present.
    pub fn push_unique(&mut self, a: Point2d, b: Point2d) -> bool {
        if a.distance_to(&b) < SEGMENT_TOLERANCE || self.contains(&a, &b) {
            return false;
        }
        self.segments.push((a, b));
        true
    }

    /// Sheet-space bounds as `(min_x, min_y, max_x, max_y)` in SVG orientation.
    fn svg_bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = self.segments.iter().flat_map(|(a, b)| [*a, *b]);
        let first = points.next()?;
        let init = (first.x, -first.y, first.x, -first.y);
        Some(points.fold(init, |(x0, y0, x1, y1), p| {
            (x0.min(p.x), y0.min(-p.y), x1.max(p.x), y1.max(-p.y))
        }))
    }
}

/// Round away float noise and negative zero for stable SVG text.
pub fn format_coord(v: f64) -> String {
    let r = (v * 1e6).round() / 1e6;
    format!("{}", r + 0.0)
}

impl SvgDrawing for Drawing {
    fn to_svg_paths(&self) -> Vec<String> {
        // SVG's Y axis points down.
        self.segments
            .iter()
            .map(|(a, b)| {
                format!(
                    "M {} {} L {} {}",
                    format_coord(a.x),
                    format_coord(-a.y),
                    format_coord(b.x),
                    format_coord(-b.y)
                )
            })
            .collect()
    }

    fn to_svg_view_box(&self, margin: f64) -> String {
        let Some((x0, y0, x1, y1)) = self.svg_bounds() else {
            return String::new();
        };
        format!(
            "{} {} {} {}",
            format_coord(x0 - margin),
            format_coord(y0 - margin),
            format_coord(x1 - x0 + 2.0 * margin),
            format_coord(y1 - y0 + 2.0 * margin)
        )
    }

    fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Projectable for BoxSolid {
    type Drawing = Drawing;

    /// Edges bordering a face turned towards the viewer are visible; the rest
    /// are hidden unless they coincide with a visible stroke. Occlusion between
    /// different cuboids is not computed.
    fn project(&self, view: ProjectionView) -> Projection<Drawing> {
        let (_, _, toward_viewer) = view.basis();
        let mut visible = Drawing::default();
        let mut back_edges = Vec::new();

        for cuboid in self.cuboids() {
            let facing: Vec<bool> = (0..6)
                .map(|f| cuboid.face_direction(f).dot(&toward_viewer) > SEGMENT_TOLERANCE)
                .collect();
            for &(a, b, f1, f2) in &CUBOID_EDGES {
                let pa = view.to_sheet(&cuboid.corners[a]);
                let pb = view.to_sheet(&cuboid.corners[b]);
                if facing[f1] || facing[f2] {
                    visible.push_unique(pa, pb);
                } else {
                    back_edges.push((pa, pb));
                }
            }
        }

        let mut hidden = Drawing::default();
        for (a, b) in back_edges {
            if !visible.contains(&a, &b) {
                hidden.push_unique(a, b);
            }
        }

        Projection { visible, hidden }
    }
}
