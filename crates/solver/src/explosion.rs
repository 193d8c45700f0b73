//! Exploded views: parts translated outward from their assembled positions.
//!
//! Every strategy scales its offsets by a `factor` clamped to `[0, 1]`, where
//! `0` is the assembled layout and `1` the fully exploded one.

use cad_kernel::{Point3d, Shape, Vec3, default_tolerance};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Defaults used when a per-part explosion value is missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionConfig {
    pub direction: Vec3,
    pub distance: f64,
    pub axis_spacing: f64,
    pub layer_spacing: f64,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            direction: Vec3::Z,
            distance: 10.0,
            axis_spacing: 10.0,
            layer_spacing: 10.0,
        }
    }
}

/// World axis for [`axis_explode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(&self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// A part with its own explosion direction and distance.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplodablePart<S> {
    pub shape: S,
    pub direction: Vec3,
    pub distance: f64,
}

impl<S: Shape> ExplodablePart<S> {
    pub fn new(shape: S, direction: Vec3, distance: f64) -> Self {
        Self {
            shape,
            direction,
            distance,
        }
    }
}

// ── Strategies ───────────────────────────────────────────────────────────────

/// Translate `part` by `normalize(direction) * distance * factor`.
///
/// A zero direction leaves the part in place.
pub fn explode_component<S: Shape>(part: &S, direction: Vec3, distance: f64, factor: f64) -> S {
    let factor = factor.clamp(0.0, 1.0);
    match direction.normalized() {
        Some(dir) if factor != 0.0 => part.translated(dir * (distance * factor)),
        _ => part.clone(),
    }
}

/// Push every part away from `center` by its own distance from it.
///
/// Parts whose bounding-box centre is within the explosion-centre tolerance
/// of `center` stay where they are.
#[instrument(level = "debug", skip(parts), fields(count = parts.len()))]
pub fn radial_explode<S: Shape>(parts: &[S], center: Point3d, factor: f64) -> Vec<S> {
    let tol = default_tolerance();
    parts
        .iter()
        .map(|part| {
            let offset = part.bounding_box().center() - center;
            let length = offset.length();
            if length < tol.explosion_center {
                part.clone()
            } else {
                explode_component(part, offset, length, factor)
            }
        })
        .collect()
}

/// Explode each part along its own direction and distance; missing entries
/// take the defaults from `config`.
#[instrument(level = "debug", skip(parts, directions, distances), fields(count = parts.len()))]
pub fn directional_explode<S: Shape>(
    parts: &[S],
    directions: &[Vec3],
    distances: &[f64],
    factor: f64,
    config: &ExplosionConfig,
) -> Vec<S> {
    parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            let direction = directions.get(i).copied().unwrap_or(config.direction);
            let distance = distances.get(i).copied().unwrap_or(config.distance);
            explode_component(part, direction, distance, factor)
        })
        .collect()
}

/// Separate parts along one world axis; part `i` moves `positions[i] * spacing`
/// (a missing position counts as 0).
#[instrument(level = "debug", skip(parts, positions), fields(count = parts.len()))]
pub fn axis_explode<S: Shape>(parts: &[S], axis: Axis, positions: &[f64], spacing: f64, factor: f64) -> Vec<S> {
    parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            let position = positions.get(i).copied().unwrap_or(0.0);
            explode_component(part, axis.unit(), position * spacing, factor)
        })
        .collect()
}

/// Lift part `i` by `base_spacing * (i + 1)` along `+Z`.
#[instrument(level = "debug", skip(parts), fields(count = parts.len()))]
pub fn layered_explode<S: Shape>(parts: &[S], base_spacing: f64, factor: f64) -> Vec<S> {
    parts
        .iter()
        .enumerate()
        .map(|(i, part)| explode_component(part, Vec3::Z, base_spacing * (i + 1) as f64, factor))
        .collect()
}

/// Explode parts that carry their own direction and distance.
pub fn explode_parts<S: Shape>(parts: &[ExplodablePart<S>], factor: f64) -> Vec<S> {
    let exploded: Vec<S> = parts
        .iter()
        .map(|part| explode_component(&part.shape, part.direction, part.distance, factor))
        .collect();
    debug!(count = exploded.len(), factor, "parts exploded");
    exploded
}
