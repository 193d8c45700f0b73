use cad_solver::LayoutError;
use thiserror::Error;

/// Errors from drawing generation.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid view box {value:?}, expected \"x y width height\"")]
    InvalidViewBox { value: String },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
