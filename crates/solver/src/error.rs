use cad_kernel::GeometryError;
use thiserror::Error;

use crate::addressing::{Edge, Face};

/// Errors from the layout engine.
///
/// Degenerate numeric configurations (parallel normals, zero-length radial
/// vectors) are handled by local fallbacks and never reported here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("invalid {kind} identifier: {value:?}")]
    InvalidIdentifier { kind: &'static str, value: String },

    #[error("no edge connects faces {first} and {second}")]
    InvalidEdge { first: Face, second: Face },

    #[error("face {face} does not border edge {edge}")]
    FaceNotOnEdge { face: Face, edge: Edge },

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
