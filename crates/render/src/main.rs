//! Generate SVG technical drawings of a demo assembly laid out with the
//! bounding-box engine.
//!
//! Usage: `render_drawings [OUTPUT_DIR]` (default `docs/drawings`). Writes one
//! SVG per standard view of the assembled and exploded layouts, plus the
//! processed projections as JSON. Logging follows `RUST_LOG`.

use std::fs;
use std::path::{Path, PathBuf};

use cad_kernel::{BoxSolid, Point3d, Shape, Vec3};
use cad_render::{
    DrawingConfig, ModelWithHelpers, ProcessedProjections, RenderError, create_orthographic_projections,
    process_projections_with_padding, to_svg_document,
};
use cad_solver::{
    ConstraintOptions, Edge, EdgeEnd, Face, PositionSpec, auto_mate_bounding_boxes, center_selector,
    constrain_models_by_points, create_linear_pattern, mate_bounding_box_faces, place_models_at_points,
    radial_explode,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Block with a lid, a side plate, a corner post and a row of pegs.
fn demo_assembly() -> Result<Vec<BoxSolid>, RenderError> {
    let block = BoxSolid::cuboid(60.0, 40.0, 30.0);
    let lid = auto_mate_bounding_boxes(&block, &BoxSolid::cuboid(60.0, 40.0, 4.0), true);
    let side = mate_bounding_box_faces(&block, Face::Right, &BoxSolid::cuboid(30.0, 40.0, 5.0), Face::Bottom);
    let post = constrain_models_by_points(
        &block,
        &PositionSpec::Corner {
            edge: Edge::FrontLeft,
            end: EdgeEnd::End,
        },
        &BoxSolid::cuboid(4.0, 4.0, 12.0),
        &PositionSpec::face_center(Face::Bottom),
        &ConstraintOptions::default().with_x_dir(Vec3::X),
    )?;

    let peg_row = create_linear_pattern(Point3d::new(10.0, 20.0, 34.0), Vec3::new(40.0, 0.0, 0.0), 5, Vec3::Z);
    let pegs = place_models_at_points(|| BoxSolid::cuboid(3.0, 3.0, 6.0), center_selector, &peg_row);

    let mut parts = vec![block, lid, side, post];
    parts.extend(pegs);
    Ok(parts)
}

fn write_views(dir: &Path, stem: &str, processed: &ProcessedProjections, config: &DrawingConfig) -> Result<(), RenderError> {
    let views = [
        ("front", &processed.standard.front),
        ("top", &processed.standard.top),
        ("right", &processed.standard.right),
    ];
    for (name, view) in views {
        let path = dir.join(format!("{stem}_{name}.svg"));
        fs::write(&path, to_svg_document(view, config))?;
        info!(path = %path.display(), view_box = %view.view_box, "wrote view");
    }
    Ok(())
}

fn render(stem: &str, parts: &[BoxSolid], dir: &Path, config: &DrawingConfig) -> Result<(), RenderError> {
    let Some(model) = BoxSolid::compound(parts) else {
        return Ok(());
    };
    let projections = create_orthographic_projections(&ModelWithHelpers::plain(model));
    let processed = process_projections_with_padding(&projections, config.padding);
    write_views(dir, stem, &processed, config)?;
    fs::write(
        dir.join(format!("{stem}.json")),
        serde_json::to_string_pretty(&processed)?,
    )?;
    Ok(())
}

fn main() -> Result<(), RenderError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("docs/drawings"));
    fs::create_dir_all(&out_dir)?;
    let config = DrawingConfig::default();

    let assembled = demo_assembly()?;
    render("assembly", &assembled, &out_dir, &config)?;

    let center = assembled[0].bounding_box().center();
    let exploded = radial_explode(&assembled, center, 0.6);
    render("assembly_exploded", &exploded, &out_dir, &config)?;

    info!(dir = %out_dir.display(), parts = assembled.len(), "drawings written");
    Ok(())
}
