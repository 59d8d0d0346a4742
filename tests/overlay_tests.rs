mod common;
use common::fixtures::{absolute_at, empty, style};
use common::{Harness, TestResult, slot};
use serde_json::json;
use trellis::layout::engines::overlay::OverlayPhase;
use trellis::prelude::*;

fn relative() -> StyleDescriptor {
    style(json!({ "position": "relative" }))
}

fn phase(container: &DecoratedContainer, child: u64) -> Option<OverlayPhase> {
    container
        .layout()
        .state()
        .as_overlay()
        .ok()
        .and_then(|state| state.phase(WidgetId(child)))
}

#[test]
fn measured_children_are_placed_synchronously() -> TestResult {
    let mut host = Harness::new();
    host.metrics.set(WidgetId(1), 400.0, 300.0);
    host.metrics.set(WidgetId(2), 40.0, 20.0);
    let mut overlay = host.create("div", 1, &relative())?;
    host.append(&mut overlay, 2, &absolute_at(json!(10), json!("10%")))?;

    assert_eq!(phase(&overlay, 2), Some(OverlayPhase::Applied));
    assert!(host.scheduler.is_empty());
    assert_eq!(slot(&overlay, 2).padding(), Some(Margin::new(10.0, 30.0, 0.0, 0.0)));
    assert_eq!(
        slot(&overlay, 2).alignment(),
        Some((HorizontalAlignment::Left, VerticalAlignment::Top))
    );
    Ok(())
}

#[test]
fn unmeasured_children_wait_for_a_retry() -> TestResult {
    let mut host = Harness::new();
    let mut overlay = host.create("div", 1, &relative())?;
    host.append(&mut overlay, 2, &style(json!({ "right": 5, "bottom": 15 })))?;

    assert_eq!(phase(&overlay, 2), Some(OverlayPhase::Waiting));
    assert_eq!(host.scheduler.len(), 1);
    assert_eq!(slot(&overlay, 2).padding(), Some(Margin::zero()));

    host.metrics.set(WidgetId(1), 200.0, 100.0);
    host.metrics.set(WidgetId(2), 20.0, 20.0);
    assert_eq!(host.fire_retries(&mut overlay)?, 1);

    assert_eq!(phase(&overlay, 2), Some(OverlayPhase::Applied));
    assert_eq!(slot(&overlay, 2).padding(), Some(Margin::new(0.0, 0.0, 5.0, 15.0)));
    assert_eq!(
        slot(&overlay, 2).alignment(),
        Some((HorizontalAlignment::Right, VerticalAlignment::Bottom))
    );
    Ok(())
}

#[test]
fn retries_stop_at_the_configured_limit() -> TestResult {
    let mut host = Harness::new();
    host.config.overlay_max_attempts = 3;
    let mut overlay = host.create("div", 1, &relative())?;
    host.append(&mut overlay, 2, &absolute_at(json!(1), json!(1)))?;

    assert_eq!(host.fire_retries(&mut overlay)?, 2);
    assert_eq!(phase(&overlay, 2), Some(OverlayPhase::Abandoned));
    Ok(())
}

#[test]
fn centered_children_and_translation() -> TestResult {
    let mut host = Harness::new();
    host.metrics.set(WidgetId(1), 300.0, 300.0);
    host.metrics.set(WidgetId(2), 40.0, 40.0);
    host.metrics.set(WidgetId(3), 40.0, 40.0);
    let mut overlay = host.create("div", 1, &relative())?;
    host.append(
        &mut overlay,
        2,
        &style(json!({ "left": "50%", "top": "50%", "transform": "translate(-50%, -50%)" })),
    )?;
    host.append(&mut overlay, 3, &style(json!({ "left": 100, "translateX": "-50%" })))?;

    assert_eq!(
        slot(&overlay, 2).alignment(),
        Some((HorizontalAlignment::Center, VerticalAlignment::Center))
    );
    assert_eq!(slot(&overlay, 3).padding(), Some(Margin::new(80.0, 0.0, 0.0, 0.0)));
    Ok(())
}

#[test]
fn only_the_literal_half_centers() -> TestResult {
    let mut host = Harness::new();
    host.metrics.set(WidgetId(1), 200.0, 100.0);
    host.metrics.set(WidgetId(2), 20.0, 20.0);
    let mut overlay = host.create("div", 1, &relative())?;
    host.append(&mut overlay, 2, &absolute_at(json!("50.0%"), json!(0)))?;

    assert_eq!(phase(&overlay, 2), Some(OverlayPhase::Applied));
    assert_eq!(
        slot(&overlay, 2).alignment(),
        Some((HorizontalAlignment::Left, VerticalAlignment::Top))
    );
    assert_eq!(slot(&overlay, 2).padding(), Some(Margin::new(100.0, 0.0, 0.0, 0.0)));
    Ok(())
}

#[test]
fn flowing_children_fill_the_top_edge() -> TestResult {
    let mut host = Harness::new();
    let mut overlay = host.create("div", 1, &relative())?;
    host.append(&mut overlay, 2, &style(json!({ "margin": "4px 8px" })))?;

    assert_eq!(phase(&overlay, 2), None);
    assert_eq!(
        slot(&overlay, 2).alignment(),
        Some((HorizontalAlignment::Fill, VerticalAlignment::Top))
    );
    assert_eq!(slot(&overlay, 2).padding(), Some(Margin::new(8.0, 4.0, 8.0, 4.0)));
    Ok(())
}

#[test]
fn becoming_static_stops_tracking() -> TestResult {
    let mut host = Harness::new();
    let mut overlay = host.create("div", 1, &relative())?;
    host.append(&mut overlay, 2, &absolute_at(json!(3), json!(3)))?;
    host.update_child(&mut overlay, 2, &style(json!({ "position": "static", "left": "auto", "top": "auto" })))?;

    assert_eq!(phase(&overlay, 2), None);
    // the ticket queued before the change is stale now
    assert_eq!(host.fire_retries(&mut overlay)?, 1);
    assert!(host.scheduler.is_empty());
    Ok(())
}

#[test]
fn removed_children_ignore_pending_tickets() -> TestResult {
    let mut host = Harness::new();
    let mut overlay = host.create("div", 1, &relative())?;
    host.append(&mut overlay, 2, &absolute_at(json!(0), json!(0)))?;
    host.append(&mut overlay, 3, &empty())?;
    host.remove(&mut overlay, 2)?;

    host.metrics.set(WidgetId(1), 10.0, 10.0);
    host.metrics.set(WidgetId(2), 10.0, 10.0);
    assert_eq!(host.fire_retries(&mut overlay)?, 1);
    assert_eq!(overlay.layout().len(), 1);
    assert_eq!(phase(&overlay, 2), None);
    Ok(())
}

#[test]
fn container_updates_restart_tracked_children() -> TestResult {
    let mut host = Harness::new();
    let mut overlay = host.create("div", 1, &relative())?;
    host.append(&mut overlay, 2, &absolute_at(json!(7), json!(9)))?;
    assert_eq!(host.scheduler.len(), 1);

    host.metrics.set(WidgetId(1), 50.0, 50.0);
    host.metrics.set(WidgetId(2), 5.0, 5.0);
    host.update(&mut overlay, &relative(), &style(json!({ "zIndex": 1 })))?;

    assert_eq!(phase(&overlay, 2), Some(OverlayPhase::Applied));
    assert_eq!(slot(&overlay, 2).padding(), Some(Margin::new(7.0, 9.0, 0.0, 0.0)));
    // the old ticket belongs to the previous generation
    assert_eq!(host.fire_retries(&mut overlay)?, 1);
    assert_eq!(phase(&overlay, 2), Some(OverlayPhase::Applied));
    Ok(())
}
