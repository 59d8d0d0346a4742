use crate::LayoutError;
use crate::engines::canvas::CanvasState;
use crate::engines::flex::FlexState;
use crate::engines::grid::GridState;
use crate::engines::overlay::OverlayState;
use crate::node_kind::ContainerKind;
use crate::slot::{
    BoxSlot, CanvasSlot, GridSlot, OverlaySlot, Slot, UniformGridSlot, WrapSlot,
};
use trellis_style::StyleDescriptor;
use trellis_types::{FlowDirection, Margin, Orientation, Vector2, WidgetId};

// --- Panels ---

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StackPanel {
    pub flow_direction: FlowDirection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WrapPanel {
    pub flow_direction: FlowDirection,
    pub orientation: Orientation,
    /// Spacing between items (x) and between lines (y).
    pub inner_slot_padding: Vector2,
}

/// Per-track stretch proportions, one entry per column/row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridPanel {
    pub column_fill: Vec<f32>,
    pub row_fill: Vec<f32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UniformGridPanel {
    pub slot_padding: Margin,
    pub min_desired_slot_width: f32,
    pub min_desired_slot_height: f32,
}

/// The host panel a container is built on. Chosen once at creation.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    HorizontalBox(StackPanel),
    VerticalBox(StackPanel),
    WrapBox(WrapPanel),
    Grid(GridPanel),
    Canvas,
    Overlay,
    UniformGrid(UniformGridPanel),
}

impl Panel {
    /// The slot a freshly inserted child receives.
    pub fn new_slot(&self) -> Slot {
        match self {
            Panel::HorizontalBox(_) | Panel::VerticalBox(_) => Slot::Box(BoxSlot::default()),
            Panel::WrapBox(_) => Slot::Wrap(WrapSlot::default()),
            Panel::Grid(_) => Slot::Grid(GridSlot::default()),
            Panel::Canvas => Slot::Canvas(CanvasSlot::default()),
            Panel::Overlay => Slot::Overlay(OverlaySlot::default()),
            Panel::UniformGrid(_) => Slot::UniformGrid(UniformGridSlot::default()),
        }
    }
}

// --- Engine state ---

/// Engine-private state, owned exclusively by its container.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineState {
    Flex(FlexState),
    Grid(GridState),
    Canvas(CanvasState),
    Overlay(OverlayState),
    UniformGrid,
}

impl EngineState {
    pub fn kind(&self) -> ContainerKind {
        match self {
            EngineState::Flex(_) => ContainerKind::Flex,
            EngineState::Grid(_) => ContainerKind::Grid,
            EngineState::Canvas(_) => ContainerKind::Canvas,
            EngineState::Overlay(_) => ContainerKind::Overlay,
            EngineState::UniformGrid => ContainerKind::UniformGrid,
        }
    }

    fn variant_name(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn as_flex(&self) -> Result<&FlexState, LayoutError> {
        match self {
            EngineState::Flex(s) => Ok(s),
            _ => Err(LayoutError::StateMismatch("Flex", self.variant_name())),
        }
    }

    pub fn as_grid(&self) -> Result<&GridState, LayoutError> {
        match self {
            EngineState::Grid(s) => Ok(s),
            _ => Err(LayoutError::StateMismatch("Grid", self.variant_name())),
        }
    }

    pub fn as_grid_mut(&mut self) -> Result<&mut GridState, LayoutError> {
        match self {
            EngineState::Grid(s) => Ok(s),
            other => Err(LayoutError::StateMismatch("Grid", other.variant_name())),
        }
    }

    pub fn as_canvas(&self) -> Result<&CanvasState, LayoutError> {
        match self {
            EngineState::Canvas(s) => Ok(s),
            _ => Err(LayoutError::StateMismatch("Canvas", self.variant_name())),
        }
    }

    pub fn as_overlay(&self) -> Result<&OverlayState, LayoutError> {
        match self {
            EngineState::Overlay(s) => Ok(s),
            _ => Err(LayoutError::StateMismatch("Overlay", self.variant_name())),
        }
    }

    pub fn as_overlay_mut(&mut self) -> Result<&mut OverlayState, LayoutError> {
        match self {
            EngineState::Overlay(s) => Ok(s),
            other => Err(LayoutError::StateMismatch("Overlay", other.variant_name())),
        }
    }
}

// --- Container ---

/// One child placed in a container.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub widget: WidgetId,
    /// The latest merged style of the child.
    pub style: StyleDescriptor,
    pub slot: Slot,
    /// Append order, independent of the position in the child list.
    pub(crate) sequence: u64,
}

/// A host panel plus its ordered children and engine state.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    widget: WidgetId,
    panel: Panel,
    children: Vec<LayoutNode>,
    state: EngineState,
    next_sequence: u64,
}

impl Container {
    pub(crate) fn new(widget: WidgetId, panel: Panel, state: EngineState) -> Self {
        Self {
            widget,
            panel,
            children: Vec::new(),
            state,
            next_sequence: 0,
        }
    }

    pub fn widget(&self) -> WidgetId {
        self.widget
    }

    pub fn kind(&self) -> ContainerKind {
        self.state.kind()
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub(crate) fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut EngineState {
        &mut self.state
    }

    pub(crate) fn set_state(&mut self, state: EngineState) {
        self.state = state;
    }

    /// Children in host order.
    pub fn children(&self) -> &[LayoutNode] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [LayoutNode] {
        &mut self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, widget: WidgetId) -> Option<&LayoutNode> {
        self.children.iter().find(|node| node.widget == widget)
    }

    pub(crate) fn child_mut(&mut self, widget: WidgetId) -> Option<&mut LayoutNode> {
        self.children.iter_mut().find(|node| node.widget == widget)
    }

    pub fn slot(&self, widget: WidgetId) -> Option<&Slot> {
        self.child(widget).map(|node| &node.slot)
    }

    /// True when `widget` was appended before every other live child.
    pub(crate) fn is_first_appended(&self, widget: WidgetId) -> bool {
        let Some(node) = self.child(widget) else {
            return false;
        };
        self.children
            .iter()
            .all(|other| other.sequence >= node.sequence)
    }

    pub(crate) fn expect_kind(&self, kind: ContainerKind) -> Result<(), LayoutError> {
        if self.kind() == kind {
            Ok(())
        } else {
            Err(LayoutError::StateMismatch(kind.as_str(), self.kind().as_str()))
        }
    }

    /// Inserts a child with a fresh slot from the panel.
    pub(crate) fn insert(
        &mut self,
        widget: WidgetId,
        style: StyleDescriptor,
        at_front: bool,
    ) -> Result<&mut LayoutNode, LayoutError> {
        if self.child(widget).is_some() {
            return Err(LayoutError::DuplicateChild(widget));
        }
        let node = LayoutNode {
            widget,
            style,
            slot: self.panel.new_slot(),
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        let index = if at_front { 0 } else { self.children.len() };
        self.children.insert(index, node);
        Ok(&mut self.children[index])
    }

    pub(crate) fn detach(&mut self, widget: WidgetId) -> Option<LayoutNode> {
        let index = self.children.iter().position(|node| node.widget == widget)?;
        Some(self.children.remove(index))
    }
}
