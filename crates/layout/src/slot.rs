//! Per-child slot records.
//!
//! The slot variant is fixed by the panel a container is built on, so engines
//! match on [`Slot`] once instead of probing which alignment API a host slot
//! happens to offer.

use trellis_types::{
    Anchors, HorizontalAlignment, Margin, SizeRule, Vector2, VerticalAlignment,
};

/// Slot of an ordered horizontal or vertical stack.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxSlot {
    pub padding: Margin,
    pub size: SizeRule,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
}

/// Slot of a wrapping flow panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrapSlot {
    pub padding: Margin,
    pub fill_empty_space: bool,
    /// The slot fills the rest of its line while the line's free space is below this value.
    pub fill_span_when_less_than: f32,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridSlot {
    pub row: u32,
    pub column: u32,
    pub row_span: u32,
    pub column_span: u32,
    pub padding: Margin,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
}

impl Default for GridSlot {
    fn default() -> Self {
        Self {
            row: 0,
            column: 0,
            row_span: 1,
            column_span: 1,
            padding: Margin::zero(),
            horizontal_alignment: HorizontalAlignment::default(),
            vertical_alignment: VerticalAlignment::default(),
        }
    }
}

/// Slot of an anchor canvas.
///
/// Pinned anchors use `position` and `size`; stretched anchors use `offsets`
/// (left, top, right, bottom insets from the anchor edges).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasSlot {
    pub anchors: Anchors,
    pub offsets: Margin,
    pub position: Vector2,
    pub size: Vector2,
    /// Pivot inside the child, as fractions of its size.
    pub alignment: Vector2,
    pub auto_size: bool,
    pub z_order: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlaySlot {
    pub padding: Margin,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformGridSlot {
    pub row: u32,
    pub column: u32,
    pub padding: Margin,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Box(BoxSlot),
    Wrap(WrapSlot),
    Grid(GridSlot),
    Canvas(CanvasSlot),
    Overlay(OverlaySlot),
    UniformGrid(UniformGridSlot),
}

impl Slot {
    /// Sets both alignments. Canvas slots position through anchors and ignore this.
    pub fn set_alignment(&mut self, horizontal: HorizontalAlignment, vertical: VerticalAlignment) {
        let (h, v) = match self {
            Slot::Box(s) => (&mut s.horizontal_alignment, &mut s.vertical_alignment),
            Slot::Wrap(s) => (&mut s.horizontal_alignment, &mut s.vertical_alignment),
            Slot::Grid(s) => (&mut s.horizontal_alignment, &mut s.vertical_alignment),
            Slot::Overlay(s) => (&mut s.horizontal_alignment, &mut s.vertical_alignment),
            Slot::UniformGrid(s) => (&mut s.horizontal_alignment, &mut s.vertical_alignment),
            Slot::Canvas(_) => return,
        };
        *h = horizontal;
        *v = vertical;
    }

    pub fn alignment(&self) -> Option<(HorizontalAlignment, VerticalAlignment)> {
        match self {
            Slot::Box(s) => Some((s.horizontal_alignment, s.vertical_alignment)),
            Slot::Wrap(s) => Some((s.horizontal_alignment, s.vertical_alignment)),
            Slot::Grid(s) => Some((s.horizontal_alignment, s.vertical_alignment)),
            Slot::Overlay(s) => Some((s.horizontal_alignment, s.vertical_alignment)),
            Slot::UniformGrid(s) => Some((s.horizontal_alignment, s.vertical_alignment)),
            Slot::Canvas(_) => None,
        }
    }

    pub fn set_padding(&mut self, padding: Margin) {
        match self {
            Slot::Box(s) => s.padding = padding,
            Slot::Wrap(s) => s.padding = padding,
            Slot::Grid(s) => s.padding = padding,
            Slot::Overlay(s) => s.padding = padding,
            Slot::UniformGrid(s) => s.padding = padding,
            Slot::Canvas(_) => {}
        }
    }

    pub fn padding(&self) -> Option<Margin> {
        match self {
            Slot::Box(s) => Some(s.padding),
            Slot::Wrap(s) => Some(s.padding),
            Slot::Grid(s) => Some(s.padding),
            Slot::Overlay(s) => Some(s.padding),
            Slot::UniformGrid(s) => Some(s.padding),
            Slot::Canvas(_) => None,
        }
    }

    pub fn as_box(&self) -> Option<&BoxSlot> {
        match self {
            Slot::Box(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_wrap(&self) -> Option<&WrapSlot> {
        match self {
            Slot::Wrap(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_grid(&self) -> Option<&GridSlot> {
        match self {
            Slot::Grid(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_grid_mut(&mut self) -> Option<&mut GridSlot> {
        match self {
            Slot::Grid(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_canvas(&self) -> Option<&CanvasSlot> {
        match self {
            Slot::Canvas(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_canvas_mut(&mut self) -> Option<&mut CanvasSlot> {
        match self {
            Slot::Canvas(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_overlay(&self) -> Option<&OverlaySlot> {
        match self {
            Slot::Overlay(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_overlay_mut(&mut self) -> Option<&mut OverlaySlot> {
        match self {
            Slot::Overlay(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_uniform_grid(&self) -> Option<&UniformGridSlot> {
        match self {
            Slot::UniformGrid(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_uniform_grid_mut(&mut self) -> Option<&mut UniformGridSlot> {
        match self {
            Slot::UniformGrid(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_slots_ignore_box_model_setters() {
        let mut slot = Slot::Canvas(CanvasSlot::default());
        slot.set_padding(Margin::all(4.0));
        slot.set_alignment(HorizontalAlignment::Center, VerticalAlignment::Center);
        assert_eq!(slot, Slot::Canvas(CanvasSlot::default()));
        assert_eq!(slot.alignment(), None);
    }

    #[test]
    fn grid_slot_defaults_to_single_cell() {
        let slot = GridSlot::default();
        assert_eq!((slot.row_span, slot.column_span), (1, 1));
    }
}
