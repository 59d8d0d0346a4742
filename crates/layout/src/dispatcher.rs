//! Kind resolution, engine dispatch and decoration of containers.

use crate::LayoutError;
use crate::container::Container;
use crate::decoration::{BackgroundWrapper, ScaleBoxWrapper, SizeBoxWrapper, WrapperSlot};
use crate::engines::engine_for;
use crate::interface::{LayoutContext, LayoutEngine, RetryTicket};
use crate::node_kind::ContainerKind;
use crate::util;
use trellis_style::{StyleDescriptor, UnitResolver};
use trellis_types::WidgetId;

/// A layout container plus the wrappers composed around it.
///
/// Wrappers nest outwards in field order: the background wraps the
/// container, the size box wraps the background, the scale box wraps both.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratedContainer {
    layout: Container,
    pub background: Option<BackgroundWrapper>,
    pub size_box: Option<SizeBoxWrapper>,
    pub scale_box: Option<ScaleBoxWrapper>,
}

impl DecoratedContainer {
    pub fn kind(&self) -> ContainerKind {
        self.layout.kind()
    }

    /// The undecorated layout container.
    pub fn layout(&self) -> &Container {
        &self.layout
    }

    /// Content slot of the outermost wrapper that records one.
    ///
    /// The size box takes precedence over the background; the scale box never records one.
    pub fn external_slot(&self) -> Option<&WrapperSlot> {
        self.size_box
            .as_ref()
            .map(|w| &w.content_slot)
            .or_else(|| self.background.as_ref().map(|w| &w.content_slot))
    }

    fn external_slot_mut(&mut self) -> Option<&mut WrapperSlot> {
        if let Some(size_box) = self.size_box.as_mut() {
            return Some(&mut size_box.content_slot);
        }
        self.background.as_mut().map(|w| &mut w.content_slot)
    }

    /// Creates, reconfigures or neutralises every wrapper for `style`.
    fn decorate(&mut self, style: &StyleDescriptor, units: &dyn UnitResolver) {
        if BackgroundWrapper::is_needed(style) {
            self.background
                .get_or_insert_with(BackgroundWrapper::default)
                .configure(style, units);
        } else if let Some(background) = self.background.as_mut() {
            background.reset();
        }

        if SizeBoxWrapper::is_needed(style) {
            self.size_box
                .get_or_insert_with(SizeBoxWrapper::default)
                .configure(style, units);
        } else if let Some(size_box) = self.size_box.as_mut() {
            size_box.reset();
        }

        if ScaleBoxWrapper::is_needed(style) {
            self.scale_box
                .get_or_insert_with(ScaleBoxWrapper::default)
                .configure(style);
        } else if let Some(scale_box) = self.scale_box.as_mut() {
            scale_box.reset();
        }
    }
}

/// Entry point for the tree driver: picks an engine per element and keeps
/// its decorations in sync with style changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerDispatcher;

impl ContainerDispatcher {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve_kind(
        &self,
        tag: &str,
        style: &StyleDescriptor,
    ) -> Result<ContainerKind, LayoutError> {
        ContainerKind::resolve(tag, style)
            .ok_or_else(|| LayoutError::UnknownContainerTag(tag.to_string()))
    }

    pub fn create_container(
        &self,
        tag: &str,
        widget: WidgetId,
        style: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<DecoratedContainer, LayoutError> {
        let kind = self.resolve_kind(tag, style)?;
        log::debug!("<{}> {} resolved to {}", tag, widget, kind.as_str());
        let layout = engine_for(kind).create_container(widget, style, ctx);
        let mut decorated = DecoratedContainer {
            layout,
            background: None,
            size_box: None,
            scale_box: None,
        };
        decorated.decorate(style, ctx.units);
        Ok(decorated)
    }

    pub fn update(
        &self,
        container: &mut DecoratedContainer,
        old: &StyleDescriptor,
        changed: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        engine_for(container.kind()).update(&mut container.layout, old, changed, ctx)?;
        container.decorate(&old.merged_with(changed), ctx.units);
        Ok(())
    }

    pub fn append_child(
        &self,
        container: &mut DecoratedContainer,
        child: WidgetId,
        style: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        engine_for(container.kind()).append_child(&mut container.layout, child, style, ctx)?;
        Self::align_in_wrapper(container, style, ctx.units);
        Ok(())
    }

    pub fn update_child(
        &self,
        container: &mut DecoratedContainer,
        child: WidgetId,
        changed: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        engine_for(container.kind()).update_child(&mut container.layout, child, changed, ctx)?;
        if let Some(node) = container.layout.child(child) {
            let style = node.style.clone();
            Self::align_in_wrapper(container, &style, ctx.units);
        }
        Ok(())
    }

    pub fn remove_child(
        &self,
        container: &mut DecoratedContainer,
        child: WidgetId,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        engine_for(container.kind()).remove_child(&mut container.layout, child, ctx)
    }

    /// Delivers a fired retry ticket to the engine that scheduled it.
    pub fn resume(
        &self,
        container: &mut DecoratedContainer,
        ticket: RetryTicket,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        engine_for(container.kind()).resume(&mut container.layout, ticket, ctx)
    }

    /// Applies a child's explicit self-alignment and margin to the outermost external slot.
    fn align_in_wrapper(
        container: &mut DecoratedContainer,
        style: &StyleDescriptor,
        units: &dyn UnitResolver,
    ) {
        let alignment = util::self_alignment(style);
        let has_margin = style.margin.is_some()
            || style.margin_left.is_some()
            || style.margin_top.is_some()
            || style.margin_right.is_some()
            || style.margin_bottom.is_some();
        if alignment.is_empty() && !has_margin {
            return;
        }
        let Some(slot) = container.external_slot_mut() else {
            return;
        };
        if let Some(justify) = alignment.justify {
            slot.horizontal_alignment = util::horizontal_alignment(justify);
        }
        if let Some(align) = alignment.align {
            slot.vertical_alignment = util::vertical_alignment(align);
        }
        if has_margin {
            slot.padding = util::margin_padding(style, units);
        }
    }
}
