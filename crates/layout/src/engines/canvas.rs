//! Anchor-based absolute placement on a canvas panel.

use crate::LayoutError;
use crate::container::{Container, EngineState, Panel};
use crate::interface::{LayoutContext, LayoutEngine};
use crate::node_kind::ContainerKind;
use crate::slot::CanvasSlot;
use trellis_style::parsers::{parse_ratio, run_parser};
use trellis_style::{Length, LengthUnit, StyleDescriptor, StyleValue, UnitResolver};
use trellis_types::{Anchors, Margin, Size, Vector2, WidgetId};

/// Named anchor rectangles. The last six entries are synonyms.
pub const ANCHOR_PRESETS: &[(&str, Anchors)] = &[
    ("top left", Anchors::new(0.0, 0.0, 0.0, 0.0)),
    ("top center", Anchors::new(0.5, 0.0, 0.5, 0.0)),
    ("top right", Anchors::new(1.0, 0.0, 1.0, 0.0)),
    ("center left", Anchors::new(0.0, 0.5, 0.0, 0.5)),
    ("center", Anchors::new(0.5, 0.5, 0.5, 0.5)),
    ("center right", Anchors::new(1.0, 0.5, 1.0, 0.5)),
    ("bottom left", Anchors::new(0.0, 1.0, 0.0, 1.0)),
    ("bottom center", Anchors::new(0.5, 1.0, 0.5, 1.0)),
    ("bottom right", Anchors::new(1.0, 1.0, 1.0, 1.0)),
    ("top fill", Anchors::new(0.0, 0.0, 1.0, 0.0)),
    ("center fill", Anchors::new(0.0, 0.5, 1.0, 0.5)),
    ("bottom fill", Anchors::new(0.0, 1.0, 1.0, 1.0)),
    ("fill left", Anchors::new(0.0, 0.0, 0.0, 1.0)),
    ("fill center", Anchors::new(0.5, 0.0, 0.5, 1.0)),
    ("fill right", Anchors::new(1.0, 0.0, 1.0, 1.0)),
    ("fill", Anchors::new(0.0, 0.0, 1.0, 1.0)),
    ("span-all", Anchors::new(0.0, 0.0, 1.0, 1.0)),
    ("stretch", Anchors::new(0.0, 0.0, 1.0, 1.0)),
    ("center center", Anchors::new(0.5, 0.5, 0.5, 0.5)),
    ("middle", Anchors::new(0.5, 0.5, 0.5, 0.5)),
    ("stretch-horizontal", Anchors::new(0.0, 0.5, 1.0, 0.5)),
    ("stretch-vertical", Anchors::new(0.5, 0.0, 0.5, 1.0)),
];

/// Looks up a preset by name; `top-left` and `top_left` spell `top left`.
pub fn anchor_preset(name: &str) -> Option<Anchors> {
    let lookup = |key: &str| {
        ANCHOR_PRESETS
            .iter()
            .find(|(preset, _)| *preset == key)
            .map(|(_, anchors)| *anchors)
    };
    let normalized = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase();
    lookup(&normalized).or_else(|| lookup(&normalized.replace(['-', '_'], " ")))
}

fn style_anchor(style: &StyleDescriptor) -> Option<Anchors> {
    style
        .position_anchor
        .as_ref()
        .or(style.offset_anchor.as_ref())
        .and_then(StyleValue::as_text)
        .and_then(anchor_preset)
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CanvasState {
    /// Container size percentages resolve against.
    pub reference: Size,
    /// Anchor for children without their own.
    pub anchor: Option<Anchors>,
}

impl CanvasState {
    pub fn from_style(style: &StyleDescriptor, units: &dyn UnitResolver) -> Self {
        let extent = |value: &Option<StyleValue>| {
            value
                .as_ref()
                .filter(|v| !v.is_auto())
                .map_or(0.0, |v| units.length_to_pixels(v, style, None))
        };
        Self {
            reference: Size::new(extent(&style.width), extent(&style.height)),
            anchor: style_anchor(style),
        }
    }
}

/// `scale` as a factor: numbers, numeric strings and percentages. Defaults to 1.
fn scale_factor(style: &StyleDescriptor) -> f32 {
    style
        .scale
        .as_ref()
        .and_then(StyleValue::as_factor)
        .unwrap_or(1.0)
}

fn aspect_ratio(value: &StyleValue) -> Option<f32> {
    let ratio = match value {
        StyleValue::Number(n) => Some(*n),
        StyleValue::Text(text) => run_parser(parse_ratio, text.trim()).ok(),
        StyleValue::Spacing(_) => None,
    };
    ratio.filter(|r| r.is_finite() && *r > 0.0)
}

fn pivot_token(token: &str) -> Option<f32> {
    match token {
        "left" | "top" | "start" => Some(0.0),
        "center" | "middle" => Some(0.5),
        "right" | "bottom" | "end" => Some(1.0),
        other => match Length::parse(other) {
            Some(Length::Value(pct, LengthUnit::Percent)) => Some((pct / 100.0).clamp(0.0, 1.0)),
            _ => other.parse::<f32>().ok().map(|n| n.clamp(0.0, 1.0)),
        },
    }
}

/// Pivot from `anchorAlign`/`anchorPivot`; a single token applies to both axes.
fn pivot(style: &StyleDescriptor) -> Vector2 {
    let Some(value) = style.anchor_align.as_ref().or(style.anchor_pivot.as_ref()) else {
        return Vector2::zero();
    };
    if let StyleValue::Number(n) = value {
        let n = n.clamp(0.0, 1.0);
        return Vector2::new(n, n);
    }
    let keyword = value.keyword();
    let mut tokens = keyword.split_whitespace();
    let x = tokens.next().and_then(pivot_token);
    let y = match tokens.next() {
        Some(token) => pivot_token(token),
        None => x,
    };
    Vector2::new(x.unwrap_or(0.0), y.unwrap_or(0.0))
}

fn z_order(style: &StyleDescriptor) -> i32 {
    style
        .z_index
        .as_ref()
        .or(style.z_order.as_ref())
        .and_then(StyleValue::as_number)
        .filter(|n| n.is_finite())
        .map_or(0, |n| n.trunc() as i32)
}

fn place_child(
    state: &CanvasState,
    style: &StyleDescriptor,
    slot: &mut CanvasSlot,
    units: &dyn UnitResolver,
) {
    let reference = state.reference;
    let px = |value: &Option<StyleValue>, extent: f32| {
        value
            .as_ref()
            .filter(|v| !v.is_auto())
            .map(|v| units.length_to_pixels(v, style, Some(extent)))
    };

    slot.anchors = style_anchor(style)
        .or(state.anchor)
        .unwrap_or_default();
    slot.alignment = pivot(style);
    slot.z_order = z_order(style);

    let left = px(&style.left, reference.width);
    let top = px(&style.top, reference.height);
    let right = px(&style.right, reference.width);
    let bottom = px(&style.bottom, reference.height);

    if slot.anchors.is_stretched() {
        slot.offsets = Margin::new(
            left.unwrap_or(0.0),
            top.unwrap_or(0.0),
            right.unwrap_or(0.0),
            bottom.unwrap_or(0.0),
        );
        slot.position = Vector2::zero();
        slot.size = Vector2::zero();
        slot.auto_size = false;
        return;
    }

    slot.offsets = Margin::zero();
    slot.position = Vector2::new(
        left.or(right.map(|r| -r)).unwrap_or(0.0),
        top.or(bottom.map(|b| -b)).unwrap_or(0.0),
    );

    let scale = scale_factor(style);
    let width = px(&style.width, reference.width);
    let height = px(&style.height, reference.height);
    let ratio = style.aspect_ratio.as_ref();
    let ratio_is_auto = ratio.is_some_and(StyleValue::is_auto);
    let ratio = ratio.and_then(aspect_ratio);

    let (size, auto_size) = match (width, height) {
        (Some(w), Some(h)) => (Vector2::new(w, h), false),
        (Some(w), None) if ratio_is_auto => (Vector2::new(w, 0.0), true),
        (Some(w), None) => (Vector2::new(w, ratio.map_or(w, |r| w / r)), false),
        (None, Some(h)) if ratio_is_auto => (Vector2::new(0.0, h), true),
        (None, Some(h)) => (Vector2::new(ratio.map_or(h, |r| h * r), h), false),
        (None, None) => (Vector2::zero(), true),
    };
    slot.size = Vector2::new(size.x * scale, size.y * scale);
    slot.auto_size = auto_size;
}

pub struct CanvasAnchorLayoutEngine;

impl LayoutEngine for CanvasAnchorLayoutEngine {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Canvas
    }

    fn create_container(
        &self,
        widget: WidgetId,
        style: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Container {
        let state = CanvasState::from_style(style, ctx.units);
        log::debug!("canvas container {}: reference {:?}", widget, state.reference);
        Container::new(widget, Panel::Canvas, EngineState::Canvas(state))
    }

    fn update(
        &self,
        container: &mut Container,
        old: &StyleDescriptor,
        changed: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        container.state().as_canvas()?;
        let state = CanvasState::from_style(&old.merged_with(changed), ctx.units);
        for node in container.children_mut() {
            if let Some(slot) = node.slot.as_canvas_mut() {
                place_child(&state, &node.style, slot, ctx.units);
            }
        }
        container.set_state(EngineState::Canvas(state));
        Ok(())
    }

    fn append_child(
        &self,
        container: &mut Container,
        child: WidgetId,
        style: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        let state = *container.state().as_canvas()?;
        let node = container.insert(child, style.clone(), false)?;
        match node.slot.as_canvas_mut() {
            Some(slot) => place_child(&state, &node.style, slot, ctx.units),
            None => log::debug!("canvas child {} received a non-canvas slot", child),
        }
        Ok(())
    }

    fn update_child(
        &self,
        container: &mut Container,
        child: WidgetId,
        changed: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        let state = *container.state().as_canvas()?;
        let Some(node) = container.child_mut(child) else {
            log::debug!("update_child: {} has no slot in canvas container", child);
            return Ok(());
        };
        node.style = node.style.merged_with(changed);
        if let Some(slot) = node.slot.as_canvas_mut() {
            place_child(&state, &node.style, slot, ctx.units);
        }
        Ok(())
    }
}
