use crate::LayoutError;
use crate::container::{Container, EngineState, Panel, UniformGridPanel};
use crate::interface::{LayoutContext, LayoutEngine};
use crate::node_kind::ContainerKind;
use crate::slot::Slot;
use crate::util;
use trellis_style::{StyleDescriptor, StyleValue, UnitResolver};
use trellis_types::{HorizontalAlignment, VerticalAlignment, WidgetId};

fn build_panel(style: &StyleDescriptor, units: &dyn UnitResolver) -> UniformGridPanel {
    let min = |value: &Option<StyleValue>| {
        value
            .as_ref()
            .map_or(0.0, |v| units.length_to_pixels(v, style, None).max(0.0))
    };
    UniformGridPanel {
        slot_padding: style
            .cell_padding
            .as_ref()
            .map(|v| util::resolve_box_shorthand(v, style, units))
            .unwrap_or_default(),
        min_desired_slot_width: min(&style.min_cell_width),
        min_desired_slot_height: min(&style.min_cell_height),
    }
}

fn place_child(style: &StyleDescriptor, slot: &mut Slot, units: &dyn UnitResolver) {
    util::apply_self_alignment(
        slot,
        style,
        HorizontalAlignment::Fill,
        VerticalAlignment::Fill,
    );
    slot.set_padding(util::margin_padding(style, units));
    if let Some(cell) = slot.as_uniform_grid_mut() {
        cell.row = util::index_value(style.grid_row.as_ref());
        cell.column = util::index_value(style.grid_column.as_ref());
    }
}

/// Uniform cells with explicit indices; children without indices share cell (0, 0).
pub struct UniformGridLayoutEngine;

impl LayoutEngine for UniformGridLayoutEngine {
    fn kind(&self) -> ContainerKind {
        ContainerKind::UniformGrid
    }

    fn create_container(
        &self,
        widget: WidgetId,
        style: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Container {
        let panel = build_panel(style, ctx.units);
        log::debug!("uniform grid container {}: {:?}", widget, panel);
        Container::new(widget, Panel::UniformGrid(panel), EngineState::UniformGrid)
    }

    fn update(
        &self,
        container: &mut Container,
        old: &StyleDescriptor,
        changed: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        container.expect_kind(ContainerKind::UniformGrid)?;
        let panel = build_panel(&old.merged_with(changed), ctx.units);
        *container.panel_mut() = Panel::UniformGrid(panel);
        Ok(())
    }

    fn append_child(
        &self,
        container: &mut Container,
        child: WidgetId,
        style: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        container.expect_kind(ContainerKind::UniformGrid)?;
        let node = container.insert(child, style.clone(), false)?;
        place_child(&node.style, &mut node.slot, ctx.units);
        Ok(())
    }

    fn update_child(
        &self,
        container: &mut Container,
        child: WidgetId,
        changed: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        container.expect_kind(ContainerKind::UniformGrid)?;
        let Some(node) = container.child_mut(child) else {
            log::debug!("update_child: {} has no slot in uniform grid", child);
            return Ok(());
        };
        node.style = node.style.merged_with(changed);
        place_child(&node.style, &mut node.slot, ctx.units);
        Ok(())
    }
}
