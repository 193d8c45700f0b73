//! End-to-end layout scenarios over the configurator models.
//!
//! Each scenario builds a model through the layout engine and checks it with
//! the harness assertions and oracles.

use approx::assert_abs_diff_eq;

use cad_kernel::{BoxSolid, Plane, Point3d, Shape, Vec3};
use cad_render::{
    ModelWithHelpers, combine_view_boxes, create_orthographic_projections, exportable_model,
    process_projections_for_rendering, process_projections_with_padding,
};
use cad_solver::{
    Axis, ConstraintOptions, Edge, EdgeEnd, ExplodablePart, ExplosionConfig, Face, PositionSpec,
    auto_mate_bounding_boxes, axis_explode, constrain_models_by_points, create_linear_pattern,
    directional_explode, explode_parts, find_matching_faces, layered_explode, mate_bounding_box_faces,
    offset_mated_model, radial_explode,
};
use test_harness::assertions::{
    assert_bounding_box, assert_faces_mated, assert_point_near, assert_unmoved, assert_view_box,
};
use test_harness::helpers::{
    CuboidGrid, MatedCuboidL, center_of, cuboid, diagonal_cuboid_pattern, helper_cuboid, staircase,
};
use test_harness::oracle::{check_flush_mate, check_no_overlap, check_view_boxes_consistent, failures};
use test_harness::HarnessError;

const TOL: f64 = 1e-9;

// ── Scenario 1: Cube flush on a block ───────────────────────────────────

#[test]
fn test_cube_on_block_top() -> Result<(), HarnessError> {
    let block = cuboid(30.0, 50.0, 20.0);
    let cube = cuboid(10.0, 10.0, 10.0);

    let placed = mate_bounding_box_faces(&block, Face::Top, &cube, Face::Bottom);
    assert_faces_mated(&block, Face::Top, &placed, Face::Bottom, TOL, "cube on block")?;
    assert_bounding_box(&placed, [10.0, 20.0, 20.0], [20.0, 30.0, 30.0], TOL, "cube on block")?;

    // The cube's underside sits on the block's top.
    assert_abs_diff_eq!(placed.bounding_box().min.z, block.bounding_box().max.z, epsilon = TOL);
    check_flush_mate(&block, Face::Top, &placed, TOL).into_result()
}

// ── Scenario 2: Mating is idempotent ────────────────────────────────────

#[test]
fn test_remating_changes_nothing() -> Result<(), HarnessError> {
    let block = cuboid(30.0, 50.0, 20.0);
    let cube = cuboid(10.0, 10.0, 10.0).translated(Vec3::new(-70.0, 12.0, 3.0));
    let once = mate_bounding_box_faces(&block, Face::Right, &cube, Face::Left);
    let twice = mate_bounding_box_faces(&block, Face::Right, &once, Face::Left);
    assert_unmoved(&once, &twice, TOL, "re-mate")
}

// ── Scenario 3: Offsets along the fixed face ────────────────────────────

#[test]
fn test_offset_mate_keeps_gap() -> Result<(), HarnessError> {
    let block = cuboid(30.0, 50.0, 20.0);
    let cube = cuboid(10.0, 10.0, 10.0);
    let mated = mate_bounding_box_faces(&block, Face::Front, &cube, Face::Back);

    let zero = offset_mated_model(&mated, Face::Back, 0.0, Face::Front);
    assert_faces_mated(&block, Face::Front, &zero, Face::Back, TOL, "zero offset")?;

    let away = offset_mated_model(&mated, Face::Back, 4.0, Face::Front);
    assert!(assert_faces_mated(&block, Face::Front, &away, Face::Back, TOL, "offset").is_err());
    assert_abs_diff_eq!(away.bounding_box().max.y, -4.0, epsilon = TOL);
    Ok(())
}

// ── Scenario 4: Mated cuboid with L-profile ─────────────────────────────

#[test]
fn test_mated_cuboid_l_hangs_below() -> Result<(), HarnessError> {
    let params = MatedCuboidL::default();
    let (block, profile) = params.parts()?;

    // The profile's top lies on the cuboid's bottom, centred under it.
    assert_faces_mated(&block, Face::Bottom, &profile, Face::Top, TOL, "L under cuboid")?;
    assert_bounding_box(&profile, [25.0, 0.0, -50.0], [75.0, 100.0, 0.0], TOL, "L under cuboid")?;

    let model = params.build()?;
    assert_bounding_box(&model, [0.0, 0.0, -50.0], [100.0, 100.0, 50.0], TOL, "fused model")
}

#[test]
fn test_mated_cuboid_l_with_offset_and_turn() -> Result<(), HarnessError> {
    let params = MatedCuboidL {
        cuboid_face: "right".into(),
        l_profile_face: "bottom".into(),
        offset: 10.0,
        ..MatedCuboidL::default()
    };
    let (block, profile) = params.parts()?;
    let bb = profile.bounding_box();
    // Turned onto its side and pushed 10 away from the right face.
    assert_abs_diff_eq!(bb.min.x, 110.0, epsilon = TOL);
    assert_abs_diff_eq!(bb.max.x - bb.min.x, 50.0, epsilon = TOL);
    assert_point_near(
        &center_of(&profile),
        [bb.center().x, block.bounding_box().center().y, block.bounding_box().center().z],
        TOL,
        "profile centred on right face",
    )
}

// ── Scenario 5: Staircase ───────────────────────────────────────────────

#[test]
fn test_staircase_steps() -> Result<(), HarnessError> {
    let stairs = staircase(100.0)?;
    assert_eq!(stairs.cuboids().len(), 2);
    assert_bounding_box(&stairs, [0.0, -40.0, 0.0], [100.0, 240.0, 10.0], TOL, "staircase")
}

// ── Scenario 6: Auto-mate picks the big faces ───────────────────────────

#[test]
fn test_auto_mate_prefers_large_faces() -> Result<(), HarnessError> {
    let block = cuboid(30.0, 50.0, 20.0);
    let cube = cuboid(10.0, 10.0, 10.0);
    assert_eq!(
        find_matching_faces(&block.bounding_box(), &cube.bounding_box(), true),
        (Face::Top, Face::Bottom)
    );
    let placed = auto_mate_bounding_boxes(&block, &cube, true);
    assert_faces_mated(&block, Face::Top, &placed, Face::Bottom, TOL, "auto mate")?;

    let same = find_matching_faces(&block.bounding_box(), &block.bounding_box(), true);
    assert_eq!(same.0.normal(), -same.1.normal());
    Ok(())
}

// ── Scenario 7: Point constraints ───────────────────────────────────────

#[test]
fn test_corner_to_corner_constraint() -> Result<(), HarnessError> {
    let block = cuboid(30.0, 50.0, 20.0);
    let post = cuboid(2.0, 2.0, 15.0);
    let placed = constrain_models_by_points(
        &block,
        &PositionSpec::Corner {
            edge: Edge::BackTop,
            end: EdgeEnd::End,
        },
        &post,
        &PositionSpec::Corner {
            edge: Edge::FrontLeft,
            end: EdgeEnd::Start,
        },
        &ConstraintOptions::default().with_x_dir(Vec3::X),
    )?;
    assert_bounding_box(&placed, [30.0, 50.0, 20.0], [32.0, 52.0, 35.0], TOL, "post on corner")
}

#[test]
fn test_constraint_rejects_unrelated_face() {
    let block = cuboid(30.0, 50.0, 20.0);
    let result = constrain_models_by_points(
        &block,
        &PositionSpec::edge_midpoint(Edge::FrontTop),
        &block,
        &PositionSpec::Center,
        &ConstraintOptions::default().with_face_for_edge(Face::Back),
    );
    assert!(matches!(result, Err(cad_solver::LayoutError::FaceNotOnEdge { .. })));
}

// ── Scenario 8: Patterns ────────────────────────────────────────────────

#[test]
fn test_vertical_linear_pattern() {
    let points = create_linear_pattern(Point3d::ORIGIN, Vec3::new(0.0, 0.0, 10.0), 3, Vec3::Z);
    let zs: Vec<f64> = points.iter().map(|p| p.position.z).collect();
    assert_eq!(zs.len(), 3);
    assert_abs_diff_eq!(zs[0], 0.0, epsilon = TOL);
    assert_abs_diff_eq!(zs[1], 5.0, epsilon = TOL);
    assert_abs_diff_eq!(zs[2], 10.0, epsilon = TOL);
}

#[test]
fn test_cuboid_grid_layout() -> Result<(), HarnessError> {
    let grid = CuboidGrid::default();
    let parts = grid.parts();
    assert_eq!(parts.len(), 9);
    assert_point_near(&center_of(&parts[0]), [0.0, 0.0, 0.0], TOL, "grid[0]")?;
    assert_point_near(&center_of(&parts[5]), [60.0, 30.0, 0.0], TOL, "grid[5]")?;
    check_no_overlap(&parts, TOL).into_result()?;

    let model = grid.build()?;
    assert_bounding_box(&model, [-5.0, -5.0, -5.0], [65.0, 65.0, 5.0], TOL, "grid model")
}

#[test]
fn test_grid_on_wall_lays_parts_flat() -> Result<(), HarnessError> {
    let grid = CuboidGrid {
        plane: Plane::new(Point3d::ORIGIN, Vec3::X, -Vec3::Y),
        rows: 2,
        cols: 2,
        box_size: Vec3::new(4.0, 4.0, 10.0),
        orientation: -Vec3::Y,
        ..CuboidGrid::default()
    };
    let parts = grid.parts();
    // Plane Y is -Y × X = +Z, so rows climb the wall.
    assert_point_near(&center_of(&parts[2]), [0.0, 0.0, 30.0], TOL, "wall grid row 1")?;
    let extents = parts[0].bounding_box().extents();
    assert_abs_diff_eq!(extents.y, 10.0, epsilon = TOL);
    Ok(())
}

#[test]
fn test_diagonal_pattern() -> Result<(), HarnessError> {
    let model = diagonal_cuboid_pattern(
        5,
        Vec3::new(0.0, 50.0, 50.0),
        Point3d::ORIGIN,
        Vec3::new(10.0, 10.0, 10.0),
    )?;
    assert_eq!(model.cuboids().len(), 5);
    assert_bounding_box(&model, [-5.0, -5.0, -5.0], [5.0, 55.0, 55.0], TOL, "diagonal")
}

// ── Scenario 9: Exploded views ──────────────────────────────────────────

fn assembly() -> Vec<BoxSolid> {
    let block = cuboid(30.0, 50.0, 20.0);
    let lid = mate_bounding_box_faces(&block, Face::Top, &cuboid(30.0, 50.0, 2.0), Face::Bottom);
    let side = mate_bounding_box_faces(&block, Face::Right, &cuboid(3.0, 50.0, 20.0), Face::Left);
    vec![block, lid, side]
}

#[test]
fn test_explosions_are_identity_at_zero() -> Result<(), HarnessError> {
    let parts = assembly();
    let config = ExplosionConfig::default();
    let exploded = [
        radial_explode(&parts, center_of(&parts[0]), 0.0),
        directional_explode(&parts, &[], &[], 0.0, &config),
        axis_explode(&parts, Axis::X, &[0.0, 1.0, 2.0], config.axis_spacing, 0.0),
        layered_explode(&parts, config.layer_spacing, 0.0),
    ];
    for (strategy, result) in exploded.iter().enumerate() {
        for (before, after) in parts.iter().zip(result) {
            assert_unmoved(before, after, 0.0, &format!("strategy {strategy}"))?;
        }
    }
    Ok(())
}

#[test]
fn test_radial_explosion_separates_parts() -> Result<(), HarnessError> {
    let parts = assembly();
    let center = center_of(&parts[0]);
    let exploded = radial_explode(&parts, center, 1.0);

    // The part at the centre stays put; the others double their offset.
    assert_unmoved(&parts[0], &exploded[0], TOL, "centre part")?;
    let lid_offset = center_of(&parts[1]) - center;
    assert_point_near(
        &center_of(&exploded[1]),
        (center + lid_offset * 2.0).to_array(),
        TOL,
        "lid",
    )?;
    check_no_overlap(&exploded, 0.5).into_result()
}

#[test]
fn test_per_part_explosion() -> Result<(), HarnessError> {
    let parts: Vec<ExplodablePart<BoxSolid>> = assembly()
        .into_iter()
        .zip([Vec3::ZERO, Vec3::Z, Vec3::X])
        .map(|(shape, direction)| ExplodablePart::new(shape, direction, 15.0))
        .collect();
    let half = explode_parts(&parts, 0.5);
    assert_unmoved(&parts[0].shape, &half[0], TOL, "base")?;
    assert_abs_diff_eq!(half[1].bounding_box().min.z, 27.5, epsilon = TOL);
    assert_abs_diff_eq!(half[2].bounding_box().min.x, 37.5, epsilon = TOL);
    Ok(())
}

// ── Scenario 10: Technical drawings ─────────────────────────────────────

#[test]
fn test_view_box_combination() {
    assert_eq!(combine_view_boxes("0 0 10 10", "5 5 10 10"), "0 0 15 15");
    assert_eq!(combine_view_boxes("not a box", "0 0 10 10"), "0 0 100 100");
}

#[test]
fn test_block_drawing() -> Result<(), HarnessError> {
    let model = ModelWithHelpers::plain(cuboid(30.0, 50.0, 20.0));
    let processed = process_projections_with_padding(&create_orthographic_projections(&model), 0.0);
    assert_view_box(&processed.standard.front, "0 -20 30 20", "front")?;
    assert_view_box(&processed.standard.top, "0 -50 30 50", "top")?;
    assert_view_box(&processed.standard.right, "0 -20 50 20", "right")?;
    check_view_boxes_consistent(&processed).into_result()
}

#[test]
fn test_helper_cuboid_drawing_has_parts() -> Result<(), HarnessError> {
    let model = helper_cuboid(50.0, 100.0, 200.0, true);
    let projections = create_orthographic_projections(&model);
    let processed = process_projections_for_rendering(&projections);
    assert_eq!(processed.parts.len(), 2);
    assert_eq!(processed.parts[1].name, "Helper Space 1");
    // The exported model excludes the helper space.
    assert_bounding_box(exportable_model(&model), [0.0, 0.0, 0.0], [49.0, 20.0, 0.5], TOL, "export")?;

    let verdicts = [
        check_view_boxes_consistent(&processed),
        check_no_overlap(&[model.main.clone()], TOL),
    ];
    let failed = failures(verdicts);
    assert!(failed.is_empty(), "{failed:?}");

    let json = serde_json::to_value(&processed).unwrap();
    assert_eq!(json["parts"][0]["name"], "Main Component");
    Ok(())
}

#[test]
fn test_exploded_assembly_drawing() -> Result<(), HarnessError> {
    let parts = layered_explode(&assembly(), 10.0, 1.0);
    let model = BoxSolid::compound(&parts).ok_or(HarnessError::EmptyModel {
        name: "exploded assembly".into(),
    })?;
    let processed = process_projections_with_padding(
        &create_orthographic_projections(&ModelWithHelpers::plain(model)),
        0.0,
    );
    // Layers lift the three parts by 10, 20 and 30.
    assert_view_box(&processed.standard.front, "0 -50 33 40", "exploded front")?;
    check_view_boxes_consistent(&processed).into_result()
}
