//! Absolute positioning emulated on an overlay panel.
//!
//! Offsets of absolutely positioned children depend on the pixel sizes of the
//! parent and of the child itself, which the host only knows after a layout
//! pass. Each absolute child therefore runs a small state machine: the first
//! size check happens synchronously, and while either size is still zero the engine
//! asks the [`RetryScheduler`](crate::interface::RetryScheduler) for another
//! attempt. Every (re)start issues a new generation, so tickets from an
//! earlier run, or for a removed child, are dropped on delivery.

use crate::LayoutError;
use crate::container::{Container, EngineState, Panel};
use crate::interface::{LayoutContext, LayoutEngine, RetryTicket};
use crate::node_kind::ContainerKind;
use crate::slot::OverlaySlot;
use crate::util;
use std::collections::BTreeMap;
use trellis_style::{StyleDescriptor, StyleValue, Translation, UnitResolver};
use trellis_types::{HorizontalAlignment, Margin, Size, VerticalAlignment, WidgetId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlayPhase {
    #[default]
    NotScheduled,
    /// A retry is pending for the current generation.
    Waiting,
    Applied,
    /// Sizes never became valid; the slot keeps its initial placement.
    Abandoned,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackedChild {
    pub phase: OverlayPhase,
    pub generation: u64,
    pub attempts: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayState {
    pub tracked: BTreeMap<WidgetId, TrackedChild>,
    next_generation: u64,
}

impl OverlayState {
    /// Resets `child` to a fresh generation, tracking it if it was not yet.
    fn restart(&mut self, child: WidgetId) {
        self.next_generation += 1;
        self.tracked.insert(
            child,
            TrackedChild {
                phase: OverlayPhase::NotScheduled,
                generation: self.next_generation,
                attempts: 0,
            },
        );
    }

    pub fn phase(&self, child: WidgetId) -> Option<OverlayPhase> {
        self.tracked.get(&child).map(|t| t.phase)
    }
}

pub fn is_absolute(style: &StyleDescriptor) -> bool {
    style.keyword("position").as_deref() == Some("absolute")
        || StyleDescriptor::is_set(&style.left)
        || StyleDescriptor::is_set(&style.top)
        || StyleDescriptor::is_set(&style.right)
        || StyleDescriptor::is_set(&style.bottom)
}

fn is_literal_half(value: &Option<StyleValue>) -> bool {
    matches!(value, Some(StyleValue::Text(text)) if text.trim() == "50%")
}

fn place_flowing(style: &StyleDescriptor, slot: &mut OverlaySlot, units: &dyn UnitResolver) {
    let alignment = util::self_alignment(style);
    slot.horizontal_alignment = alignment
        .justify
        .map_or(HorizontalAlignment::Fill, util::horizontal_alignment);
    slot.vertical_alignment = alignment
        .align
        .map_or(VerticalAlignment::Top, util::vertical_alignment);
    slot.padding = util::margin_padding(style, units);
}

/// Writes the resolved insets of an absolute child.
fn apply_offsets(
    style: &StyleDescriptor,
    slot: &mut OverlaySlot,
    parent: Size,
    own: Size,
    units: &dyn UnitResolver,
) {
    let px = |value: &Option<StyleValue>, extent: f32| {
        value
            .as_ref()
            .filter(|v| !v.is_auto())
            .map(|v| units.length_to_pixels(v, style, Some(extent)))
    };
    let translation = Translation::from_style(style).resolve(units, style, own);
    let mut padding = Margin::zero();

    if is_literal_half(&style.left) {
        slot.horizontal_alignment = HorizontalAlignment::Center;
    } else {
        let left = px(&style.left, parent.width);
        let right = px(&style.right, parent.width);
        slot.horizontal_alignment = match (left, right) {
            (Some(l), Some(r)) => {
                padding.left = l + translation.x;
                padding.right = r - translation.x;
                HorizontalAlignment::Fill
            }
            (Some(l), None) => {
                padding.left = l + translation.x;
                HorizontalAlignment::Left
            }
            (None, Some(r)) => {
                padding.right = r - translation.x;
                HorizontalAlignment::Right
            }
            (None, None) => {
                padding.left = translation.x;
                HorizontalAlignment::Left
            }
        };
    }

    if is_literal_half(&style.top) {
        slot.vertical_alignment = VerticalAlignment::Center;
    } else {
        let top = px(&style.top, parent.height);
        let bottom = px(&style.bottom, parent.height);
        slot.vertical_alignment = match (top, bottom) {
            (Some(t), Some(b)) => {
                padding.top = t + translation.y;
                padding.bottom = b - translation.y;
                VerticalAlignment::Fill
            }
            (Some(t), None) => {
                padding.top = t + translation.y;
                VerticalAlignment::Top
            }
            (None, Some(b)) => {
                padding.bottom = b - translation.y;
                VerticalAlignment::Bottom
            }
            (None, None) => {
                padding.top = translation.y;
                VerticalAlignment::Top
            }
        };
    }

    slot.padding = padding + util::margin_padding(style, units);
}

/// Runs one size check for `child` and advances its state machine.
fn attempt(
    container: &mut Container,
    child: WidgetId,
    ctx: &mut LayoutContext<'_>,
) -> Result<(), LayoutError> {
    let container_widget = container.widget();
    let parent = ctx.metrics.pixel_size(container_widget);
    let own = ctx.metrics.pixel_size(child);
    let max_attempts = ctx.config.overlay_max_attempts.max(1);

    let state = container.state_mut().as_overlay_mut()?;
    let Some(tracked) = state.tracked.get_mut(&child) else {
        return Ok(());
    };
    tracked.attempts += 1;

    if !(parent.is_positive() && own.is_positive()) {
        if tracked.attempts >= max_attempts {
            tracked.phase = OverlayPhase::Abandoned;
            log::debug!(
                "overlay {}: abandoning {} after {} attempts",
                container_widget,
                child,
                tracked.attempts
            );
        } else {
            tracked.phase = OverlayPhase::Waiting;
            let ticket = RetryTicket {
                container: container_widget,
                child,
                generation: tracked.generation,
            };
            log::trace!(
                "overlay {}: size of {} not ready, retry {} scheduled",
                container_widget,
                child,
                tracked.attempts
            );
            ctx.scheduler.schedule(ctx.config.retry_delay(), ticket);
        }
        return Ok(());
    }
    tracked.phase = OverlayPhase::Applied;

    if let Some(node) = container.child_mut(child) {
        if let Some(slot) = node.slot.as_overlay_mut() {
            apply_offsets(&node.style, slot, parent, own, ctx.units);
        }
    }
    Ok(())
}

/// Places `child` from its current style, starting or stopping tracking as needed.
fn place_child(
    container: &mut Container,
    child: WidgetId,
    ctx: &mut LayoutContext<'_>,
) -> Result<(), LayoutError> {
    let Some(node) = container.child_mut(child) else {
        return Ok(());
    };
    let absolute = is_absolute(&node.style);
    let Some(slot) = node.slot.as_overlay_mut() else {
        return Ok(());
    };
    if !absolute {
        place_flowing(&node.style, slot, ctx.units);
        container.state_mut().as_overlay_mut()?.tracked.remove(&child);
        return Ok(());
    }

    slot.horizontal_alignment = HorizontalAlignment::Left;
    slot.vertical_alignment = VerticalAlignment::Top;
    slot.padding = Margin::zero();
    container.state_mut().as_overlay_mut()?.restart(child);
    attempt(container, child, ctx)
}

pub struct OverlayAbsoluteLayoutEngine;

impl LayoutEngine for OverlayAbsoluteLayoutEngine {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Overlay
    }

    fn create_container(
        &self,
        widget: WidgetId,
        _style: &StyleDescriptor,
        _ctx: &mut LayoutContext<'_>,
    ) -> Container {
        log::debug!("overlay container {}", widget);
        Container::new(
            widget,
            Panel::Overlay,
            EngineState::Overlay(OverlayState::default()),
        )
    }

    fn update(
        &self,
        container: &mut Container,
        _old: &StyleDescriptor,
        _changed: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        let state = container.state_mut().as_overlay_mut()?;
        let tracked: Vec<WidgetId> = state.tracked.keys().copied().collect();
        for child in &tracked {
            state.restart(*child);
        }
        for child in tracked {
            attempt(container, child, ctx)?;
        }
        Ok(())
    }

    fn append_child(
        &self,
        container: &mut Container,
        child: WidgetId,
        style: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        container.state().as_overlay()?;
        container.insert(child, style.clone(), false)?;
        place_child(container, child, ctx)
    }

    fn update_child(
        &self,
        container: &mut Container,
        child: WidgetId,
        changed: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        container.state().as_overlay()?;
        let Some(node) = container.child_mut(child) else {
            log::debug!("update_child: {} has no slot in overlay container", child);
            return Ok(());
        };
        node.style = node.style.merged_with(changed);
        place_child(container, child, ctx)
    }

    fn remove_child(
        &self,
        container: &mut Container,
        child: WidgetId,
        _ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        container.state_mut().as_overlay_mut()?.tracked.remove(&child);
        if container.detach(child).is_none() {
            log::debug!("remove_child: {} has no slot in {}", child, container.widget());
        }
        Ok(())
    }

    fn resume(
        &self,
        container: &mut Container,
        ticket: RetryTicket,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        let state = container.state().as_overlay()?;
        let current = state.tracked.get(&ticket.child).copied();
        let live = ticket.container == container.widget()
            && current.is_some_and(|t| {
                t.generation == ticket.generation && t.phase == OverlayPhase::Waiting
            });
        if !live {
            log::debug!("overlay {}: dropping stale retry {:?}", container.widget(), ticket);
            return Ok(());
        }
        attempt(container, ticket.child, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestHost;

    fn style(json: serde_json::Value) -> StyleDescriptor {
        StyleDescriptor::from_value(json).unwrap()
    }

    fn overlay_slot(container: &Container, child: u64) -> OverlaySlot {
        container
            .slot(WidgetId(child))
            .and_then(|s| s.as_overlay())
            .cloned()
            .unwrap()
    }

    fn phase(container: &Container, child: u64) -> Option<OverlayPhase> {
        container.state().as_overlay().unwrap().phase(WidgetId(child))
    }

    #[test]
    fn flowing_children_use_self_alignment() {
        let mut host = TestHost::new();
        let mut container = host.create(&OverlayAbsoluteLayoutEngine, &StyleDescriptor::default());
        host.append(
            &OverlayAbsoluteLayoutEngine,
            &mut container,
            1,
            &style(serde_json::json!({"alignSelf": "center", "margin": 4})),
        );
        let slot = overlay_slot(&container, 1);
        assert_eq!(slot.horizontal_alignment, HorizontalAlignment::Fill);
        assert_eq!(slot.vertical_alignment, VerticalAlignment::Center);
        assert_eq!(slot.padding, Margin::all(4.0));
        assert_eq!(phase(&container, 1), None);
        assert!(host.scheduler.is_empty());
    }

    #[test]
    fn known_sizes_apply_synchronously() {
        let mut host = TestHost::new();
        let mut container = host.create(&OverlayAbsoluteLayoutEngine, &StyleDescriptor::default());
        host.metrics.set(container.widget(), Size::new(200.0, 100.0));
        host.metrics.set(WidgetId(1), Size::new(20.0, 10.0));
        host.append(
            &OverlayAbsoluteLayoutEngine,
            &mut container,
            1,
            &style(serde_json::json!({"left": "10%", "top": "50%"})),
        );

        let slot = overlay_slot(&container, 1);
        assert_eq!(slot.horizontal_alignment, HorizontalAlignment::Left);
        assert_eq!(slot.vertical_alignment, VerticalAlignment::Center);
        assert_eq!(slot.padding, Margin::new(20.0, 0.0, 0.0, 0.0));
        assert_eq!(phase(&container, 1), Some(OverlayPhase::Applied));
    }

    #[test]
    fn both_insets_fill_and_translate_uses_own_size() {
        let mut host = TestHost::new();
        let mut container = host.create(&OverlayAbsoluteLayoutEngine, &StyleDescriptor::default());
        host.metrics.set(container.widget(), Size::new(200.0, 100.0));
        host.metrics.set(WidgetId(1), Size::new(40.0, 20.0));
        host.append(
            &OverlayAbsoluteLayoutEngine,
            &mut container,
            1,
            &style(serde_json::json!({
                "left": 10,
                "right": 10,
                "bottom": 5,
                "transform": "translate(-50%, 50%)"
            })),
        );

        let slot = overlay_slot(&container, 1);
        assert_eq!(slot.horizontal_alignment, HorizontalAlignment::Fill);
        assert_eq!(slot.vertical_alignment, VerticalAlignment::Bottom);
        assert_eq!(slot.padding, Margin::new(-10.0, 0.0, 30.0, -5.0));
    }

    #[test]
    fn one_retry_when_first_size_check_fails() {
        let mut host = TestHost::new();
        let mut container = host.create(&OverlayAbsoluteLayoutEngine, &StyleDescriptor::default());
        host.append(
            &OverlayAbsoluteLayoutEngine,
            &mut container,
            1,
            &style(serde_json::json!({"position": "absolute", "top": 8})),
        );
        assert_eq!(phase(&container, 1), Some(OverlayPhase::Waiting));
        assert_eq!(host.scheduler.len(), 1);

        host.metrics.set(container.widget(), Size::new(100.0, 100.0));
        host.metrics.set(WidgetId(1), Size::new(10.0, 10.0));
        assert_eq!(host.resume_all(&OverlayAbsoluteLayoutEngine, &mut container), 1);
        assert_eq!(phase(&container, 1), Some(OverlayPhase::Applied));
        assert_eq!(overlay_slot(&container, 1).padding.top, 8.0);
    }

    #[test]
    fn abandons_after_max_attempts() {
        let mut host = TestHost::new();
        let mut container = host.create(&OverlayAbsoluteLayoutEngine, &StyleDescriptor::default());
        host.append(
            &OverlayAbsoluteLayoutEngine,
            &mut container,
            1,
            &style(serde_json::json!({"left": 5})),
        );
        assert_eq!(host.resume_all(&OverlayAbsoluteLayoutEngine, &mut container), 9);
        assert_eq!(phase(&container, 1), Some(OverlayPhase::Abandoned));
        assert_eq!(overlay_slot(&container, 1).padding, Margin::zero());
    }

    #[test]
    fn removed_child_ignores_pending_retry() {
        let mut host = TestHost::new();
        let mut container = host.create(&OverlayAbsoluteLayoutEngine, &StyleDescriptor::default());
        host.append(
            &OverlayAbsoluteLayoutEngine,
            &mut container,
            1,
            &style(serde_json::json!({"left": 5})),
        );
        host.remove(&OverlayAbsoluteLayoutEngine, &mut container, 1);
        host.append(&OverlayAbsoluteLayoutEngine, &mut container, 1, &StyleDescriptor::default());

        assert_eq!(host.resume_all(&OverlayAbsoluteLayoutEngine, &mut container), 1);
        assert_eq!(phase(&container, 1), None);
        assert_eq!(
            overlay_slot(&container, 1).horizontal_alignment,
            HorizontalAlignment::Fill
        );
    }

    #[test]
    fn update_restarts_tracked_children() {
        let mut host = TestHost::new();
        let mut container = host.create(&OverlayAbsoluteLayoutEngine, &StyleDescriptor::default());
        host.append(
            &OverlayAbsoluteLayoutEngine,
            &mut container,
            1,
            &style(serde_json::json!({"left": 5})),
        );
        let first = container.state().as_overlay().unwrap().tracked[&WidgetId(1)];

        host.metrics.set(container.widget(), Size::new(50.0, 50.0));
        host.metrics.set(WidgetId(1), Size::new(5.0, 5.0));
        let empty = StyleDescriptor::default();
        host.update(&OverlayAbsoluteLayoutEngine, &mut container, &empty, &empty);

        let restarted = container.state().as_overlay().unwrap().tracked[&WidgetId(1)];
        assert!(restarted.generation > first.generation);
        assert_eq!(restarted.phase, OverlayPhase::Applied);
        // The ticket from the first run is now stale.
        assert_eq!(host.resume_all(&OverlayAbsoluteLayoutEngine, &mut container), 1);
        assert_eq!(restarted.attempts, 1);
    }
}
