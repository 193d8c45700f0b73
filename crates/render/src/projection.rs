//! Orthographic projection sets and their preparation for rendering.
//!
//! A model is projected into the three standard views; when it carries helper
//! spaces, each component gets its own set of views too. Processing turns
//! every view into SVG path strings plus view boxes, with the visible and
//! hidden line sets sharing one combined box so they overlay correctly.

use cad_kernel::{Projectable, Projection, ProjectionView, SvgDrawing};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::DrawingConfig;
use crate::viewbox::{DEFAULT_VIEW_BOX, ViewBox};

// ── Models ───────────────────────────────────────────────────────────────────

/// A model together with the helper spaces used to lay it out.
///
/// Helper spaces show up in drawings but are never exported.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelWithHelpers<S> {
    pub main: S,
    pub helper_spaces: Vec<S>,
}

impl<S> ModelWithHelpers<S> {
    pub fn new(main: S, helper_spaces: Vec<S>) -> Self {
        Self { main, helper_spaces }
    }

    /// A model with no helper spaces.
    pub fn plain(main: S) -> Self {
        Self::new(main, Vec::new())
    }
}

/// The part of a model that gets exported: the main model alone.
pub fn exportable_model<S>(model: &ModelWithHelpers<S>) -> &S {
    &model.main
}

// ── Projections ──────────────────────────────────────────────────────────────

/// One value per standard view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardViews<T> {
    pub front: T,
    pub top: T,
    pub right: T,
}

impl<T> StandardViews<T> {
    pub fn from_fn(mut f: impl FnMut(ProjectionView) -> T) -> Self {
        Self {
            front: f(ProjectionView::Front),
            top: f(ProjectionView::Top),
            right: f(ProjectionView::Right),
        }
    }

    pub fn get(&self, view: ProjectionView) -> &T {
        match view {
            ProjectionView::Front => &self.front,
            ProjectionView::Top => &self.top,
            ProjectionView::Right => &self.right,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(ProjectionView, &T) -> U) -> StandardViews<U> {
        StandardViews::from_fn(|view| f(view, self.get(view)))
    }
}

/// Views of one component of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct PartProjections<D> {
    pub name: String,
    pub views: StandardViews<Projection<D>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicProjections<D> {
    /// Views of the exportable model.
    pub standard: StandardViews<Projection<D>>,
    /// Per-component views; empty when the model has no helper spaces.
    pub parts: Vec<PartProjections<D>>,
}

fn project_all<S: Projectable>(shape: &S) -> StandardViews<Projection<S::Drawing>> {
    StandardViews::from_fn(|view| shape.project(view))
}

/// Front, top and right views of the main model, plus one entry per
/// component when helper spaces are present.
#[instrument(level = "debug", skip_all, fields(helpers = model.helper_spaces.len()))]
pub fn create_orthographic_projections<S: Projectable>(
    model: &ModelWithHelpers<S>,
) -> OrthographicProjections<S::Drawing> {
    let standard = project_all(exportable_model(model));

    let mut parts = Vec::new();
    if !model.helper_spaces.is_empty() {
        parts.push(PartProjections {
            name: "Main Component".to_string(),
            views: project_all(&model.main),
        });
        for (index, helper) in model.helper_spaces.iter().enumerate() {
            parts.push(PartProjections {
                name: format!("Helper Space {}", index + 1),
                views: project_all(helper),
            });
        }
    }
    debug!(parts = parts.len(), "projections created");
    OrthographicProjections { standard, parts }
}

// ── Processing ───────────────────────────────────────────────────────────────

/// SVG strokes of one line set and the box around them (`None` when empty).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedLayer {
    pub paths: Vec<String>,
    pub view_box: Option<ViewBox>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedView {
    pub visible: ProcessedLayer,
    pub hidden: ProcessedLayer,
    /// Union of the non-empty layer boxes, or the default box when both
    /// layers are empty.
    pub view_box: ViewBox,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedPart {
    pub name: String,
    pub views: StandardViews<ProcessedView>,
}

/// Render-ready projections, serializable for the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedProjections {
    pub standard: StandardViews<ProcessedView>,
    pub parts: Vec<ProcessedPart>,
}

fn process_layer<D: SvgDrawing>(drawing: &D, padding: f64) -> ProcessedLayer {
    ProcessedLayer {
        paths: drawing.to_svg_paths(),
        view_box: if drawing.is_empty() {
            None
        } else {
            drawing.to_svg_view_box(padding).parse().ok()
        },
    }
}

fn process_view<D: SvgDrawing>(projection: &Projection<D>, padding: f64) -> ProcessedView {
    let visible = process_layer(&projection.visible, padding);
    let hidden = process_layer(&projection.hidden, padding);
    let view_box = match (visible.view_box, hidden.view_box) {
        (Some(a), Some(b)) => a.union(&b),
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => DEFAULT_VIEW_BOX,
    };
    ProcessedView {
        visible,
        hidden,
        view_box,
    }
}

/// Process with an explicit view-box padding.
#[instrument(level = "debug", skip(projections))]
pub fn process_projections_with_padding<D: SvgDrawing>(
    projections: &OrthographicProjections<D>,
    padding: f64,
) -> ProcessedProjections {
    let standard = projections
        .standard
        .map(|_, projection| process_view(projection, padding));
    let parts: Vec<ProcessedPart> = projections
        .parts
        .iter()
        .map(|part| ProcessedPart {
            name: part.name.clone(),
            views: part.views.map(|_, projection| process_view(projection, padding)),
        })
        .collect();
    info!(
        front = %standard.front.view_box,
        parts = parts.len(),
        "projections processed for rendering"
    );
    ProcessedProjections { standard, parts }
}

/// Paths and combined view boxes for every standard and part view, using the
/// default drawing padding.
pub fn process_projections_for_rendering<D: SvgDrawing>(
    projections: &OrthographicProjections<D>,
) -> ProcessedProjections {
    process_projections_with_padding(projections, DrawingConfig::default().padding)
}

// ── SVG output ───────────────────────────────────────────────────────────────

fn path_group(out: &mut String, layer: &ProcessedLayer, stroke: &str, width: f64, dash: Option<&str>) {
    if layer.paths.is_empty() {
        return;
    }
    let dash = dash
        .map(|d| format!(" stroke-dasharray=\"{d}\""))
        .unwrap_or_default();
    out.push_str(&format!(
        "  <g fill=\"none\" stroke=\"{stroke}\" stroke-width=\"{width}\"{dash}>\n"
    ));
    for d in &layer.paths {
        out.push_str(&format!("    <path d=\"{d}\"/>\n"));
    }
    out.push_str("  </g>\n");
}

/// A standalone SVG document for one processed view, hidden lines beneath
/// visible ones.
pub fn to_svg_document(view: &ProcessedView, config: &DrawingConfig) -> String {
    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{}\" stroke-linecap=\"round\">\n",
        view.view_box
    );
    path_group(
        &mut out,
        &view.hidden,
        &config.hidden_stroke,
        config.hidden_stroke_width,
        Some(config.hidden_dash.as_str()),
    );
    path_group(
        &mut out,
        &view.visible,
        &config.visible_stroke,
        config.visible_stroke_width,
        None,
    );
    out.push_str("</svg>\n");
    out
}
