//! Symbolic addressing of points on axis-aligned bounding boxes.
//!
//! Faces, edges and corners are named independently of the box size, so a
//! layout rule like "the centre of the top face" stays valid when the
//! parametric model it refers to is resized.
//!
//! Axis conventions: FRONT is `-Y`, BACK `+Y`, LEFT `-X`, RIGHT `+X`, TOP `+Z`,
//! BOTTOM `-Z`. Every edge runs from `edge_start` to `edge_end` along the
//! positive direction of its free axis.

use std::fmt;
use std::str::FromStr;

use cad_kernel::geometry::math::PARALLEL_TOLERANCE;
use cad_kernel::{BoundingBox, GeometryError, Point3d, Vec3, are_anti_parallel};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::LayoutError;

// ── Faces ────────────────────────────────────────────────────────────────────

/// One of the six faces of an axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Top,
        Face::Bottom,
    ];

    /// Outward unit normal.
    pub fn normal(&self) -> Vec3 {
        match self {
            Face::Front => Vec3::new(0.0, -1.0, 0.0),
            Face::Back => Vec3::new(0.0, 1.0, 0.0),
            Face::Left => Vec3::new(-1.0, 0.0, 0.0),
            Face::Right => Vec3::new(1.0, 0.0, 0.0),
            Face::Top => Vec3::new(0.0, 0.0, 1.0),
            Face::Bottom => Vec3::new(0.0, 0.0, -1.0),
        }
    }

    pub fn opposite(&self) -> Face {
        match self {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
            Face::Left => Face::Right,
            Face::Right => Face::Left,
            Face::Top => Face::Bottom,
            Face::Bottom => Face::Top,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Back => "back",
            Face::Left => "left",
            Face::Right => "right",
            Face::Top => "top",
            Face::Bottom => "bottom",
        }
    }

    /// Index of the axis the face is perpendicular to (0 = X, 1 = Y, 2 = Z).
    fn axis(&self) -> usize {
        match self {
            Face::Left | Face::Right => 0,
            Face::Front | Face::Back => 1,
            Face::Top | Face::Bottom => 2,
        }
    }

    /// Whether the face lies on the maximum side of its axis.
    fn is_max_side(&self) -> bool {
        matches!(self, Face::Back | Face::Right | Face::Top)
    }

    /// In-face axes the `u` and `v` parameters run along.
    fn uv_axes(&self) -> (usize, usize) {
        match self.axis() {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        }
    }

    /// `(u, v)` of the four vertices, counter-clockwise seen from outside.
    fn vertex_params(&self) -> [(f64, f64); 4] {
        match self {
            Face::Front | Face::Right | Face::Top => [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
            Face::Back | Face::Left => [(1.0, 0.0), (0.0, 0.0), (0.0, 1.0), (1.0, 1.0)],
            Face::Bottom => [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)],
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Face {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Face::ALL
            .into_iter()
            .find(|face| face.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LayoutError::InvalidIdentifier {
                kind: "face",
                value: s.to_string(),
            })
    }
}

// ── Edges ────────────────────────────────────────────────────────────────────

/// One of the twelve edges of an axis-aligned box, named by the two faces it
/// joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    FrontLeft,
    FrontRight,
    FrontTop,
    FrontBottom,
    BackLeft,
    BackRight,
    BackTop,
    BackBottom,
    LeftTop,
    LeftBottom,
    RightTop,
    RightBottom,
}

impl Edge {
    pub const ALL: [Edge; 12] = [
        Edge::FrontLeft,
        Edge::FrontRight,
        Edge::FrontTop,
        Edge::FrontBottom,
        Edge::BackLeft,
        Edge::BackRight,
        Edge::BackTop,
        Edge::BackBottom,
        Edge::LeftTop,
        Edge::LeftBottom,
        Edge::RightTop,
        Edge::RightBottom,
    ];

    /// The two faces the edge joins, in name order.
    pub fn faces(&self) -> (Face, Face) {
        match self {
            Edge::FrontLeft => (Face::Front, Face::Left),
            Edge::FrontRight => (Face::Front, Face::Right),
            Edge::FrontTop => (Face::Front, Face::Top),
            Edge::FrontBottom => (Face::Front, Face::Bottom),
            Edge::BackLeft => (Face::Back, Face::Left),
            Edge::BackRight => (Face::Back, Face::Right),
            Edge::BackTop => (Face::Back, Face::Top),
            Edge::BackBottom => (Face::Back, Face::Bottom),
            Edge::LeftTop => (Face::Left, Face::Top),
            Edge::LeftBottom => (Face::Left, Face::Bottom),
            Edge::RightTop => (Face::Right, Face::Top),
            Edge::RightBottom => (Face::Right, Face::Bottom),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Edge::FrontLeft => "front_left",
            Edge::FrontRight => "front_right",
            Edge::FrontTop => "front_top",
            Edge::FrontBottom => "front_bottom",
            Edge::BackLeft => "back_left",
            Edge::BackRight => "back_right",
            Edge::BackTop => "back_top",
            Edge::BackBottom => "back_bottom",
            Edge::LeftTop => "left_top",
            Edge::LeftBottom => "left_bottom",
            Edge::RightTop => "right_top",
            Edge::RightBottom => "right_bottom",
        }
    }

    pub fn borders(&self, face: Face) -> bool {
        let (a, b) = self.faces();
        a == face || b == face
    }

    /// The axis neither face fixes; the edge runs along it.
    fn free_axis(&self) -> usize {
        let (a, b) = self.faces();
        3 - a.axis() - b.axis()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Edge {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Edge::ALL
            .into_iter()
            .find(|edge| edge.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LayoutError::InvalidIdentifier {
                kind: "edge",
                value: s.to_string(),
            })
    }
}

/// Which end of an edge a corner sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeEnd {
    Start,
    End,
}

// ── Position specs ───────────────────────────────────────────────────────────

/// A size-independent address of a point on a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PositionSpec {
    /// Face-local parameters, each clamped to `[0, 1]`.
    Face { face: Face, u: f64, v: f64 },
    /// Parameter along the edge from start to end, clamped to `[0, 1]`.
    Edge { edge: Edge, t: f64 },
    Corner { edge: Edge, end: EdgeEnd },
    Center,
}

impl PositionSpec {
    pub fn face_center(face: Face) -> Self {
        PositionSpec::Face { face, u: 0.5, v: 0.5 }
    }

    pub fn edge_midpoint(edge: Edge) -> Self {
        PositionSpec::Edge { edge, t: 0.5 }
    }
}

impl FromStr for PositionSpec {
    type Err = LayoutError;

    /// Parses `"center"`, a face name (its centre), an edge name (its
    /// midpoint) or a corner name such as `"FRONT_LEFT_START"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("center") {
            return Ok(PositionSpec::Center);
        }
        if let Ok(face) = trimmed.parse::<Face>() {
            return Ok(PositionSpec::face_center(face));
        }
        if let Ok(edge) = trimmed.parse::<Edge>() {
            return Ok(PositionSpec::edge_midpoint(edge));
        }

        let invalid = || LayoutError::InvalidIdentifier {
            kind: "position",
            value: s.to_string(),
        };
        let (edge_part, end_part) = trimmed.rsplit_once('_').ok_or_else(invalid)?;
        let end = if end_part.eq_ignore_ascii_case("start") {
            EdgeEnd::Start
        } else if end_part.eq_ignore_ascii_case("end") {
            EdgeEnd::End
        } else {
            return Err(invalid());
        };
        let edge = edge_part.parse::<Edge>().map_err(|_| invalid())?;
        Ok(PositionSpec::Corner { edge, end })
    }
}

// ── Faces of a box ───────────────────────────────────────────────────────────

pub fn face_normal(face: Face) -> Vec3 {
    face.normal()
}

/// The face whose normal best matches `normal`: the dominant component wins,
/// ties resolve X before Y before Z.
pub fn face_from_normal(normal: &Vec3) -> Result<Face, LayoutError> {
    if normal.length() < PARALLEL_TOLERANCE {
        return Err(GeometryError::DegenerateVector {
            operation: "face_from_normal",
        }
        .into());
    }
    let (ax, ay, az) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
    let face = if ax >= ay && ax >= az {
        if normal.x > 0.0 { Face::Right } else { Face::Left }
    } else if ay >= az {
        if normal.y > 0.0 { Face::Back } else { Face::Front }
    } else if normal.z > 0.0 {
        Face::Top
    } else {
        Face::Bottom
    };
    Ok(face)
}

fn side(bb: &BoundingBox, axis: usize, max_side: bool) -> f64 {
    if max_side {
        bb.max[axis]
    } else {
        bb.min[axis]
    }
}

pub fn face_center(bb: &BoundingBox, face: Face) -> Point3d {
    let mut coords = bb.center().to_array();
    coords[face.axis()] = side(bb, face.axis(), face.is_max_side());
    Point3d::from(coords)
}

/// The four face corners, counter-clockwise when seen from outside the box.
pub fn face_vertices(bb: &BoundingBox, face: Face) -> [Point3d; 4] {
    face.vertex_params()
        .map(|(u, v)| point_on_face(bb, face, u, v))
}

pub fn face_area(bb: &BoundingBox, face: Face) -> f64 {
    let size = bb.extents().to_array();
    let (u_axis, v_axis) = face.uv_axes();
    size[u_axis] * size[v_axis]
}

/// The face with the greatest area; ties go to the earlier face in
/// [`Face::ALL`].
pub fn largest_face(bb: &BoundingBox) -> Face {
    Face::ALL
        .into_iter()
        .fold((Face::Front, f64::NEG_INFINITY), |(best, best_area), face| {
            let area = face_area(bb, face);
            if area > best_area { (face, area) } else { (best, best_area) }
        })
        .0
}

/// Point on `face` at clamped parameters `(u, v)`.
///
/// FRONT/BACK map `u` to X and `v` to Z, LEFT/RIGHT map `u` to Y and `v` to Z,
/// TOP/BOTTOM map `u` to X and `v` to Y.
pub fn point_on_face(bb: &BoundingBox, face: Face, u: f64, v: f64) -> Point3d {
    let (min, max) = (bb.min.to_array(), bb.max.to_array());
    let (u_axis, v_axis) = face.uv_axes();
    let mut coords = [0.0; 3];
    coords[face.axis()] = side(bb, face.axis(), face.is_max_side());
    coords[u_axis] = min[u_axis] + (max[u_axis] - min[u_axis]) * u.clamp(0.0, 1.0);
    coords[v_axis] = min[v_axis] + (max[v_axis] - min[v_axis]) * v.clamp(0.0, 1.0);
    Point3d::from(coords)
}

// ── Edges of a box ───────────────────────────────────────────────────────────

pub fn edge_connecting_faces(edge: Edge) -> (Face, Face) {
    edge.faces()
}

/// The edge shared by two faces, in either order.
pub fn edge_from_faces(first: Face, second: Face) -> Result<Edge, LayoutError> {
    Edge::ALL
        .into_iter()
        .find(|edge| {
            let (a, b) = edge.faces();
            (a == first && b == second) || (a == second && b == first)
        })
        .ok_or(LayoutError::InvalidEdge { first, second })
}

/// Unit direction from `edge_start` to `edge_end`.
pub fn edge_direction(edge: Edge) -> Vec3 {
    Vec3::unit_axis(edge.free_axis())
}

fn edge_point(bb: &BoundingBox, edge: Edge, free_coord: f64) -> Point3d {
    let (a, b) = edge.faces();
    let mut coords = [0.0; 3];
    coords[a.axis()] = side(bb, a.axis(), a.is_max_side());
    coords[b.axis()] = side(bb, b.axis(), b.is_max_side());
    coords[edge.free_axis()] = free_coord;
    Point3d::from(coords)
}

pub fn edge_start(bb: &BoundingBox, edge: Edge) -> Point3d {
    edge_point(bb, edge, side(bb, edge.free_axis(), false))
}

pub fn edge_end(bb: &BoundingBox, edge: Edge) -> Point3d {
    edge_point(bb, edge, side(bb, edge.free_axis(), true))
}

pub fn edge_midpoint(bb: &BoundingBox, edge: Edge) -> Point3d {
    edge_start(bb, edge).midpoint(&edge_end(bb, edge))
}

/// Point at clamped parameter `t` from start (0) to end (1).
pub fn point_on_edge(bb: &BoundingBox, edge: Edge, t: f64) -> Point3d {
    edge_start(bb, edge).lerp(&edge_end(bb, edge), t.clamp(0.0, 1.0))
}

/// The three faces meeting at a corner: the edge's two faces and the face
/// capping the edge at `end`.
pub fn corner_faces(edge: Edge, end: EdgeEnd) -> [Face; 3] {
    let (a, b) = edge.faces();
    let axis = edge.free_axis();
    let cap = match (axis, end) {
        (0, EdgeEnd::Start) => Face::Left,
        (0, EdgeEnd::End) => Face::Right,
        (1, EdgeEnd::Start) => Face::Front,
        (1, EdgeEnd::End) => Face::Back,
        (_, EdgeEnd::Start) => Face::Bottom,
        (_, EdgeEnd::End) => Face::Top,
    };
    [a, b, cap]
}

pub fn point_on_bounding_box(bb: &BoundingBox, spec: &PositionSpec) -> Point3d {
    match *spec {
        PositionSpec::Face { face, u, v } => point_on_face(bb, face, u, v),
        PositionSpec::Edge { edge, t } => point_on_edge(bb, edge, t),
        PositionSpec::Corner { edge, end: EdgeEnd::Start } => edge_start(bb, edge),
        PositionSpec::Corner { edge, end: EdgeEnd::End } => edge_end(bb, edge),
        PositionSpec::Center => bb.center(),
    }
}

// ── Face matching ────────────────────────────────────────────────────────────

/// Pick a face of each box to mate.
///
/// All 36 face pairs are considered in [`Face::ALL`] order; with
/// `prefer_larger` they are first ordered by combined area, largest first
/// (stable, so ties keep enumeration order). The first anti-parallel pair
/// wins.
pub fn find_matching_faces(bb1: &BoundingBox, bb2: &BoundingBox, prefer_larger: bool) -> (Face, Face) {
    let mut pairs: Vec<(Face, Face)> = Face::ALL
        .into_iter()
        .flat_map(|a| Face::ALL.into_iter().map(move |b| (a, b)))
        .collect();

    if prefer_larger {
        let combined = |&(a, b): &(Face, Face)| face_area(bb1, a) + face_area(bb2, b);
        pairs.sort_by(|p, q| combined(q).total_cmp(&combined(p)));
    }

    pairs
        .into_iter()
        .find(|(a, b)| are_anti_parallel(&a.normal(), &b.normal(), PARALLEL_TOLERANCE))
        .unwrap_or_else(|| {
            warn!("no anti-parallel face pair found, falling back to largest faces");
            (largest_face(bb1), largest_face(bb2))
        })
}
