//! CSS Grid emulation on a host grid panel with per-track fill proportions.
//!
//! Templates compile to fr/px/auto tracks, which are flattened into the
//! panel's stretch fills. Children are placed from their line syntax or,
//! when indices are missing, by a flow cursor that wraps at the track count.
//! Gaps become half-gap padding on interior cell edges only.

use crate::LayoutError;
use crate::config::LayoutConfig;
use crate::container::{Container, EngineState, GridPanel, Panel};
use crate::interface::{LayoutContext, LayoutEngine};
use crate::node_kind::ContainerKind;
use crate::slot::Slot;
use crate::util;
use trellis_style::grid_line::{parse_grid_area, parse_grid_line_pair, parse_grid_line_value};
use trellis_style::tracks::{
    TrackUnits, parse_template_areas, parse_track_list, split_template_shorthand,
};
use trellis_style::{
    AlignKeyword, GridLine, GridTrackDefinition, StyleDescriptor, StyleValue, TrackType,
    UnitResolver,
};
use trellis_types::{HorizontalAlignment, VerticalAlignment, WidgetId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AutoFlow {
    #[default]
    Row,
    Column,
}

/// Rectangle covered by a named template area, as 0-based half-open track ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridArea {
    pub row_start: u32,
    pub row_end: u32,
    pub column_start: u32,
    pub column_end: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridState {
    pub columns: Vec<GridTrackDefinition>,
    pub rows: Vec<GridTrackDefinition>,
    pub areas: Vec<Vec<String>>,
    pub total_columns: u32,
    pub total_rows: u32,
    pub cursor_row: u32,
    pub cursor_column: u32,
    pub row_gap: f32,
    pub column_gap: f32,
    pub align_items: Option<AlignKeyword>,
    pub justify_items: Option<AlignKeyword>,
    pub auto_flow: AutoFlow,
}

impl GridState {
    pub fn from_style(
        style: &StyleDescriptor,
        units: &dyn UnitResolver,
        config: &LayoutConfig,
    ) -> Self {
        let font_size = style
            .font_size
            .as_ref()
            .map(|v| units.length_to_pixels(v, style, None))
            .filter(|px| *px > 0.0)
            .unwrap_or(config.default_font_size);

        let shorthand = style
            .grid_template
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_default();
        let (shorthand_rows, shorthand_columns) = split_template_shorthand(&shorthand);

        let track_units = TrackUnits {
            font_size,
            units,
            style,
        };
        let template = |longhand: &Option<StyleValue>, fallback: Option<&str>| {
            match longhand {
                Some(value) => parse_track_list(&value.to_string(), &track_units),
                None => fallback
                    .map(|t| parse_track_list(t, &track_units))
                    .unwrap_or_default(),
            }
        };
        let mut columns = template(&style.grid_template_columns, shorthand_columns);
        let mut rows = template(&style.grid_template_rows, shorthand_rows);

        let areas = style
            .grid_template_areas
            .as_ref()
            .and_then(StyleValue::as_text)
            .map(parse_template_areas)
            .unwrap_or_default();
        if columns.is_empty() {
            let width = areas.iter().map(Vec::len).max().unwrap_or(0);
            columns = vec![GridTrackDefinition::fr(1.0); width];
        }
        if rows.is_empty() {
            rows = vec![GridTrackDefinition::fr(1.0); areas.len()];
        }

        let gaps = util::resolve_gaps(style, units);
        let (place_align, place_justify) = style
            .place_items
            .as_ref()
            .and_then(StyleValue::as_text)
            .map(AlignKeyword::parse_pair)
            .unwrap_or((None, None));

        let auto_flow = match style.keyword("gridAutoFlow") {
            Some(flow) if flow.split_whitespace().any(|t| t == "column") => AutoFlow::Column,
            _ => AutoFlow::Row,
        };

        Self {
            total_columns: columns.len() as u32,
            total_rows: rows.len() as u32,
            columns,
            rows,
            areas,
            cursor_row: 0,
            cursor_column: 0,
            row_gap: gaps.row,
            column_gap: gaps.column,
            align_items: util::align_keyword(style.align_items.as_ref()).or(place_align),
            justify_items: util::align_keyword(style.justify_items.as_ref()).or(place_justify),
            auto_flow,
        }
    }

    fn panel(&self) -> GridPanel {
        GridPanel {
            column_fill: compute_fills(&self.columns),
            row_fill: compute_fills(&self.rows),
        }
    }

    pub fn area(&self, name: &str) -> Option<GridArea> {
        let mut found: Option<GridArea> = None;
        for (r, row) in self.areas.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell != name {
                    continue;
                }
                let (r, c) = (r as u32, c as u32);
                let area = found.get_or_insert(GridArea {
                    row_start: r,
                    row_end: r + 1,
                    column_start: c,
                    column_end: c + 1,
                });
                area.row_start = area.row_start.min(r);
                area.row_end = area.row_end.max(r + 1);
                area.column_start = area.column_start.min(c);
                area.column_end = area.column_end.max(c + 1);
            }
        }
        found
    }

    /// Returns the next free cell for an item with the given spans and advances the cursor.
    fn next_auto_cell(&mut self, row_span: u32, column_span: u32) -> (u32, u32) {
        match self.auto_flow {
            AutoFlow::Row => {
                let columns = self.total_columns.max(1);
                if self.cursor_column > 0 && self.cursor_column.saturating_add(column_span) > columns {
                    self.cursor_row = self.cursor_row.saturating_add(1);
                    self.cursor_column = 0;
                }
                let cell = (self.cursor_row, self.cursor_column);
                self.cursor_column = self.cursor_column.saturating_add(column_span);
                if self.cursor_column >= columns {
                    self.cursor_row = self.cursor_row.saturating_add(1);
                    self.cursor_column = 0;
                }
                cell
            }
            AutoFlow::Column => {
                let rows = self.total_rows.max(1);
                if self.cursor_row > 0 && self.cursor_row.saturating_add(row_span) > rows {
                    self.cursor_column = self.cursor_column.saturating_add(1);
                    self.cursor_row = 0;
                }
                let cell = (self.cursor_row, self.cursor_column);
                self.cursor_row = self.cursor_row.saturating_add(row_span);
                if self.cursor_row >= rows {
                    self.cursor_column = self.cursor_column.saturating_add(1);
                    self.cursor_row = 0;
                }
                cell
            }
        }
    }
}

/// Flattens tracks into fill proportions.
///
/// `auto` tracks borrow their nearest non-auto neighbour (ahead first, then
/// behind, else `1fr`). All-fr templates keep their values, all-absolute
/// templates become proportions scaled to the track count, and mixed
/// templates convert absolute tracks with a single `total_fr / total_px` factor.
pub fn compute_fills(tracks: &[GridTrackDefinition]) -> Vec<f32> {
    let resolved: Vec<GridTrackDefinition> = tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            if !track.is_auto() {
                return *track;
            }
            tracks[i + 1..]
                .iter()
                .find(|t| !t.is_auto())
                .or_else(|| tracks[..i].iter().rev().find(|t| !t.is_auto()))
                .copied()
                .unwrap_or(GridTrackDefinition::fr(1.0))
        })
        .collect();

    let total_fr: f32 = resolved
        .iter()
        .filter(|t| t.kind == TrackType::Fr)
        .map(|t| t.value)
        .sum();
    let total_px: f32 = resolved
        .iter()
        .filter(|t| t.kind == TrackType::Px)
        .map(|t| t.value)
        .sum();
    let has_fr = resolved.iter().any(|t| t.kind == TrackType::Fr);
    let has_px = resolved.iter().any(|t| t.kind == TrackType::Px);
    let count = resolved.len() as f32;

    resolved
        .iter()
        .map(|track| match (has_fr, has_px) {
            (true, false) => track.value,
            (false, true) if total_px > 0.0 => track.value / total_px * count,
            (false, _) => 1.0,
            (true, true) => match track.kind {
                TrackType::Px if total_px > 0.0 => track.value * total_fr / total_px,
                TrackType::Px => 0.0,
                _ => track.value,
            },
        })
        .collect()
}

/// Placement along one axis. `start` is `None` when the item needs auto-placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisPlacement {
    pub start: Option<u32>,
    pub span: u32,
}

impl AxisPlacement {
    const AUTO: AxisPlacement = AxisPlacement {
        start: None,
        span: 1,
    };
}

fn line_index(line: i32, count: u32) -> u32 {
    if line > 0 {
        (line - 1) as u32
    } else {
        (i64::from(count) + 1 + i64::from(line)).max(0) as u32
    }
}

impl AxisPlacement {
    /// Keeps the placement inside `count` tracks. Without explicit tracks
    /// only the span lower bound applies.
    fn clamped(self, count: u32) -> Self {
        let span = self.span.max(1);
        if count == 0 {
            return Self { span, ..self };
        }
        let start = self.start.map(|s| s.min(count - 1));
        let room = count - start.unwrap_or(0);
        Self {
            start,
            span: span.min(room).max(1),
        }
    }
}

/// Resolves a `start / end` pair into a 0-based start and a span.
///
/// With explicit tracks the start stays below `count` and start + span never
/// passes `count`; spans are at least 1.
pub fn resolve_axis(start: &GridLine, end: &GridLine, count: u32) -> AxisPlacement {
    let clamp_end = |index: u32| if count > 0 { index.min(count) } else { index };
    let placement = match (start, end) {
        (GridLine::Line(s), GridLine::Line(e)) => {
            let s = line_index(*s, count);
            let e = clamp_end(line_index(*e, count));
            let (s, e) = (s.min(e), s.max(e));
            AxisPlacement {
                start: Some(s),
                span: e - s,
            }
        }
        (GridLine::Line(s), GridLine::Span(n)) => AxisPlacement {
            start: Some(line_index(*s, count)),
            span: *n,
        },
        (GridLine::Line(s), _) => AxisPlacement {
            start: Some(line_index(*s, count)),
            span: 1,
        },
        (GridLine::Span(n), GridLine::Line(e)) => {
            let span = (*n).max(1);
            let e = clamp_end(line_index(*e, count));
            AxisPlacement {
                start: Some(e.saturating_sub(span)),
                span,
            }
        }
        (GridLine::Span(n), _) | (_, GridLine::Span(n)) => AxisPlacement {
            start: None,
            span: *n,
        },
        (_, GridLine::Line(e)) => {
            let e = clamp_end(line_index(*e, count));
            AxisPlacement {
                start: Some(e.saturating_sub(1)),
                span: 1,
            }
        }
        _ => AxisPlacement::AUTO,
    };
    placement.clamped(count)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Row,
    Column,
}

/// Replaces named lines by the bounds of the matching template area.
fn expand_named(
    state: &GridState,
    axis: Axis,
    start: GridLine,
    end: GridLine,
) -> (GridLine, GridLine) {
    let bounds = |name: &str| {
        state.area(name).map(|area| match axis {
            Axis::Row => (area.row_start, area.row_end),
            Axis::Column => (area.column_start, area.column_end),
        })
    };
    let line = |index: u32| GridLine::Line(index as i32 + 1);

    match (&start, &end) {
        (GridLine::Named(name), GridLine::Auto) => match bounds(name) {
            Some((s, e)) => (line(s), line(e)),
            None => (GridLine::Auto, GridLine::Auto),
        },
        _ => {
            let start = match &start {
                GridLine::Named(name) => bounds(name).map_or(GridLine::Auto, |(s, _)| line(s)),
                _ => start,
            };
            let end = match &end {
                GridLine::Named(name) => bounds(name).map_or(GridLine::Auto, |(_, e)| line(e)),
                _ => end,
            };
            (start, end)
        }
    }
}

/// Reads the raw line pair for one axis: shorthand, then longhands, then `gridArea`.
fn axis_lines(style: &StyleDescriptor, axis: Axis) -> (GridLine, GridLine) {
    let (shorthand, start, end, area_start, area_end) = match axis {
        Axis::Row => (
            &style.grid_row,
            &style.grid_row_start,
            &style.grid_row_end,
            0,
            2,
        ),
        Axis::Column => (
            &style.grid_column,
            &style.grid_column_start,
            &style.grid_column_end,
            1,
            3,
        ),
    };
    if let Some(value) = shorthand {
        return parse_grid_line_pair(value);
    }
    if start.is_some() || end.is_some() {
        let side = |v: &Option<StyleValue>| v.as_ref().map_or(GridLine::Auto, parse_grid_line_value);
        return (side(start), side(end));
    }
    let Some(area) = style.grid_area.as_ref() else {
        return (GridLine::Auto, GridLine::Auto);
    };
    let sides = parse_grid_area(area);
    if let [GridLine::Named(name)] = sides.as_slice() {
        return (GridLine::Named(name.clone()), GridLine::Auto);
    }
    let side = |i: usize| sides.get(i).cloned().unwrap_or(GridLine::Auto);
    (side(area_start), side(area_end))
}

fn resolve_placement(style: &StyleDescriptor, state: &GridState) -> (AxisPlacement, AxisPlacement) {
    let (rs, re) = axis_lines(style, Axis::Row);
    let (rs, re) = expand_named(state, Axis::Row, rs, re);
    let (cs, ce) = axis_lines(style, Axis::Column);
    let (cs, ce) = expand_named(state, Axis::Column, cs, ce);
    (
        resolve_axis(&rs, &re, state.total_rows),
        resolve_axis(&cs, &ce, state.total_columns),
    )
}

/// Reapplies gap padding, margin and alignment to a placed slot.
fn decorate_slot(
    state: &GridState,
    style: &StyleDescriptor,
    slot: &mut Slot,
    units: &dyn UnitResolver,
) {
    let default_h = state
        .justify_items
        .map_or(HorizontalAlignment::Fill, util::horizontal_alignment);
    let default_v = state
        .align_items
        .map_or(VerticalAlignment::Fill, util::vertical_alignment);
    util::apply_self_alignment(slot, style, default_h, default_v);

    let mut padding = util::margin_padding(style, units);
    if let Some(grid) = slot.as_grid() {
        let half_column = state.column_gap / 2.0;
        let half_row = state.row_gap / 2.0;
        if grid.column > 0 {
            padding.left += half_column;
        }
        if grid.column.saturating_add(grid.column_span) < state.total_columns {
            padding.right += half_column;
        }
        if grid.row > 0 {
            padding.top += half_row;
        }
        if grid.row.saturating_add(grid.row_span) < state.total_rows {
            padding.bottom += half_row;
        }
    }
    slot.set_padding(padding);
}

pub struct GridLayoutEngine;

impl LayoutEngine for GridLayoutEngine {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Grid
    }

    fn create_container(
        &self,
        widget: WidgetId,
        style: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Container {
        let state = GridState::from_style(style, ctx.units, ctx.config);
        let panel = state.panel();
        log::debug!(
            "grid container {}: columns={:?} rows={:?}",
            widget,
            panel.column_fill,
            panel.row_fill
        );
        Container::new(widget, Panel::Grid(panel), EngineState::Grid(state))
    }

    fn update(
        &self,
        container: &mut Container,
        old: &StyleDescriptor,
        changed: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        let previous = container.state().as_grid()?;
        let mut state = GridState::from_style(&old.merged_with(changed), ctx.units, ctx.config);
        if state.columns == previous.columns && state.rows == previous.rows {
            state.cursor_row = previous.cursor_row;
            state.cursor_column = previous.cursor_column;
        } else {
            log::debug!("grid {}: tracks changed, cursor reset", container.widget());
        }

        *container.panel_mut() = Panel::Grid(state.panel());
        for node in container.children_mut() {
            decorate_slot(&state, &node.style, &mut node.slot, ctx.units);
        }
        container.set_state(EngineState::Grid(state));
        Ok(())
    }

    fn append_child(
        &self,
        container: &mut Container,
        child: WidgetId,
        style: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        if container.child(child).is_some() {
            return Err(LayoutError::DuplicateChild(child));
        }
        let state = container.state_mut().as_grid_mut()?;
        let (row, column) = resolve_placement(style, state);
        let (row_index, column_index) = match (row.start, column.start) {
            (Some(r), Some(c)) => (r, c),
            (None, None) => {
                let cell = state.next_auto_cell(row.span, column.span);
                log::trace!("grid auto-placed {} at {:?}", child, cell);
                cell
            }
            (None, Some(c)) => (state.cursor_row, c),
            (Some(r), None) => (r, state.cursor_column),
        };
        let state = state.clone();

        let node = container.insert(child, style.clone(), false)?;
        if let Some(grid) = node.slot.as_grid_mut() {
            grid.row = row_index;
            grid.column = column_index;
            grid.row_span = row.span;
            grid.column_span = column.span;
        }
        decorate_slot(&state, &node.style, &mut node.slot, ctx.units);
        Ok(())
    }

    fn update_child(
        &self,
        container: &mut Container,
        child: WidgetId,
        changed: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        let state = container.state().as_grid()?.clone();
        let Some(node) = container.child_mut(child) else {
            log::debug!("update_child: {} has no slot in grid container", child);
            return Ok(());
        };
        node.style = node.style.merged_with(changed);
        let (row, column) = resolve_placement(&node.style, &state);
        if let Some(grid) = node.slot.as_grid_mut() {
            if let Some(r) = row.start {
                grid.row = r;
            }
            if let Some(c) = column.start {
                grid.column = c;
            }
            grid.row_span = row.span;
            grid.column_span = column.span;
        }
        decorate_slot(&state, &node.style, &mut node.slot, ctx.units);
        Ok(())
    }
}
