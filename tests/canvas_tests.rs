mod common;
use common::fixtures::style;
use common::{Harness, TestResult, slot};
use serde_json::json;
use trellis::prelude::*;

fn canvas(container: &DecoratedContainer, child: u64) -> trellis::layout::CanvasSlot {
    slot(container, child)
        .as_canvas()
        .cloned()
        .unwrap_or_else(|| panic!("child {} has no canvas slot", child))
}

#[test]
fn percentages_resolve_against_container_size() -> TestResult {
    let mut host = Harness::new();
    let mut board = host.create("canvas", 1, &style(json!({ "width": 400, "height": 200 })))?;
    host.append(
        &mut board,
        2,
        &style(json!({ "left": "25%", "top": "10%", "width": "50%", "height": 20 })),
    )?;

    let placed = canvas(&board, 2);
    assert_eq!(placed.anchors, Anchors::default());
    assert_eq!(placed.position, Vector2::new(100.0, 20.0));
    assert_eq!(placed.size, Vector2::new(200.0, 20.0));
    assert!(!placed.auto_size);
    Ok(())
}

#[test]
fn stretched_presets_use_offsets() -> TestResult {
    let mut host = Harness::new();
    let mut board = host.create("canvas", 1, &style(json!({ "width": 100, "height": 100 })))?;
    host.append(
        &mut board,
        2,
        &style(json!({ "positionAnchor": "fill", "left": 4, "right": 6, "zIndex": 3 })),
    )?;

    let placed = canvas(&board, 2);
    assert_eq!(placed.anchors, Anchors::new(0.0, 0.0, 1.0, 1.0));
    assert_eq!(placed.offsets, Margin::new(4.0, 0.0, 6.0, 0.0));
    assert_eq!(placed.size, Vector2::zero());
    assert_eq!(placed.z_order, 3);
    Ok(())
}

#[test]
fn container_anchor_is_inherited_and_right_edge_is_negative() -> TestResult {
    let mut host = Harness::new();
    let container = style(json!({ "width": 300, "height": 100, "positionAnchor": "bottom-right" }));
    let mut board = host.create("canvas", 1, &container)?;
    host.append(
        &mut board,
        2,
        &style(json!({ "right": 12, "bottom": 8, "anchorAlign": "right bottom" })),
    )?;

    let placed = canvas(&board, 2);
    assert_eq!(placed.anchors, Anchors::new(1.0, 1.0, 1.0, 1.0));
    assert_eq!(placed.position, Vector2::new(-12.0, -8.0));
    assert_eq!(placed.alignment, Vector2::new(1.0, 1.0));
    // no size at all leaves sizing to the content
    assert!(placed.auto_size);
    Ok(())
}

#[test]
fn scale_and_aspect_ratio_derive_the_size() -> TestResult {
    let mut host = Harness::new();
    let mut board = host.create("canvas", 1, &style(json!({ "width": 100, "height": 100 })))?;
    host.append(&mut board, 2, &style(json!({ "width": 80, "aspectRatio": 2, "scale": "50%" })))?;
    host.append(&mut board, 3, &style(json!({ "height": 30, "aspectRatio": "auto" })))?;

    assert_eq!(canvas(&board, 2).size, Vector2::new(40.0, 20.0));
    let auto = canvas(&board, 3);
    assert_eq!(auto.size, Vector2::new(0.0, 30.0));
    assert!(auto.auto_size);
    Ok(())
}

#[test]
fn resizing_the_canvas_replaces_every_child() -> TestResult {
    let mut host = Harness::new();
    let old = style(json!({ "width": 100, "height": 100 }));
    let mut board = host.create("canvas", 1, &old)?;
    host.append(&mut board, 2, &style(json!({ "left": "50%", "width": "10%", "height": 5 })))?;

    host.update(&mut board, &old, &style(json!({ "width": 400 })))?;

    let placed = canvas(&board, 2);
    assert_eq!(placed.position, Vector2::new(200.0, 0.0));
    assert_eq!(placed.size, Vector2::new(40.0, 5.0));
    Ok(())
}
