//! Technical drawings for laid-out models: orthographic projection sets,
//! view-box combination and SVG output.

pub mod config;
pub mod error;
pub mod projection;
pub mod viewbox;

pub use config::DrawingConfig;
pub use error::RenderError;
pub use projection::{
    ModelWithHelpers, OrthographicProjections, PartProjections, ProcessedLayer, ProcessedPart,
    ProcessedProjections, ProcessedView, StandardViews, create_orthographic_projections, exportable_model,
    process_projections_for_rendering, process_projections_with_padding, to_svg_document,
};
pub use viewbox::{DEFAULT_VIEW_BOX, ViewBox, combine_view_boxes};
