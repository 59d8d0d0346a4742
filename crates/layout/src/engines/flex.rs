//! Flexbox emulation on stack and wrap panels.
//!
//! The panel is chosen once: a wrap panel when wrapping is on, otherwise a
//! horizontal or vertical stack. Gaps become leading-edge padding on every
//! non-first stack child; wrap panels carry them as inner slot padding.
//! Slot configuration is bound at append time; container updates only touch
//! panel properties.

use crate::LayoutError;
use crate::container::{Container, EngineState, Panel, StackPanel, WrapPanel};
use crate::interface::{LayoutContext, LayoutEngine};
use crate::node_kind::ContainerKind;
use crate::slot::Slot;
use crate::util::{self, Gaps};
use trellis_style::{AlignKeyword, StyleDescriptor, StyleValue, UnitResolver};
use trellis_types::{
    FlowDirection, HorizontalAlignment, Orientation, SizeRule, Vector2, VerticalAlignment,
    WidgetId,
};

/// Derived container flags, rebuilt from the merged style on every update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlexState {
    pub is_row: bool,
    pub is_reverse: bool,
    pub is_wrap: bool,
    pub main_gap: f32,
    pub cross_gap: f32,
    pub gaps: Gaps,
    pub justify_content: Option<AlignKeyword>,
    pub align_items: Option<AlignKeyword>,
}

impl FlexState {
    pub fn from_style(style: &StyleDescriptor, units: &dyn UnitResolver) -> Self {
        let flow = style.keyword("flexFlow").unwrap_or_default();
        let flow_tokens: Vec<&str> = flow.split_whitespace().collect();

        let direction = style
            .keyword("flexDirection")
            .or_else(|| {
                flow_tokens
                    .iter()
                    .find(|t| t.starts_with("row") || t.starts_with("column"))
                    .map(|t| t.to_string())
            })
            .unwrap_or_else(|| {
                match style.keyword("display").as_deref() {
                    Some("flex" | "inline-flex") => "row",
                    _ => "column",
                }
                .to_string()
            });
        let wrap = style.keyword("flexWrap").or_else(|| {
            flow_tokens
                .iter()
                .find(|t| t.ends_with("wrap"))
                .map(|t| t.to_string())
        });

        let is_row = direction.starts_with("row");
        let gaps = util::resolve_gaps(style, units);
        let (main_gap, cross_gap) = if is_row {
            (gaps.column, gaps.row)
        } else {
            (gaps.row, gaps.column)
        };

        Self {
            is_row,
            is_reverse: direction.ends_with("-reverse"),
            is_wrap: matches!(wrap.as_deref(), Some("wrap" | "wrap-reverse")),
            main_gap,
            cross_gap,
            gaps,
            justify_content: util::align_keyword(style.justify_content.as_ref()),
            align_items: util::align_keyword(style.align_items.as_ref()),
        }
    }

    fn flow_direction(&self) -> FlowDirection {
        if self.is_row && self.is_reverse {
            FlowDirection::RightToLeft
        } else {
            FlowDirection::LeftToRight
        }
    }

    fn orientation(&self) -> Orientation {
        if self.is_row {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    fn build_panel(&self) -> Panel {
        if self.is_wrap {
            Panel::WrapBox(WrapPanel {
                flow_direction: self.flow_direction(),
                orientation: self.orientation(),
                inner_slot_padding: Vector2::new(self.gaps.column, self.gaps.row),
            })
        } else if self.is_row {
            Panel::HorizontalBox(StackPanel {
                flow_direction: self.flow_direction(),
            })
        } else {
            Panel::VerticalBox(StackPanel::default())
        }
    }

    /// Writes flow direction and wrap spacing onto an existing panel without changing its kind.
    fn apply_to_panel(&self, panel: &mut Panel) {
        match panel {
            Panel::HorizontalBox(stack) | Panel::VerticalBox(stack) => {
                stack.flow_direction = self.flow_direction();
            }
            Panel::WrapBox(wrap) => {
                wrap.flow_direction = self.flow_direction();
                wrap.orientation = self.orientation();
                wrap.inner_slot_padding = Vector2::new(self.gaps.column, self.gaps.row);
            }
            _ => {}
        }
    }
}

/// Growth factor from `flexGrow`, or the first token of the `flex` shorthand.
fn flex_grow(style: &StyleDescriptor) -> f32 {
    if let Some(grow) = style.flex_grow.as_ref().and_then(StyleValue::as_number) {
        return grow.max(0.0);
    }
    let Some(flex) = style.flex.as_ref() else {
        return 0.0;
    };
    if let Some(n) = flex.as_number() {
        return n.max(0.0);
    }
    let keyword = flex.keyword();
    match keyword.split_whitespace().next() {
        Some("auto") => 1.0,
        Some(token) => token.parse::<f32>().map_or(0.0, |n| n.max(0.0)),
        None => 0.0,
    }
}

fn place_child(
    state: &FlexState,
    is_first: bool,
    style: &StyleDescriptor,
    slot: &mut Slot,
    units: &dyn UnitResolver,
) {
    let grow = flex_grow(style);
    let space_between = state.justify_content == Some(AlignKeyword::SpaceBetween);

    let own = util::self_alignment(style);
    let main = own
        .justify
        .or(state.justify_content)
        .unwrap_or(AlignKeyword::Start);
    let cross = own
        .align
        .or(state.align_items)
        .unwrap_or(AlignKeyword::Stretch);
    let (horizontal, vertical) = if state.is_row {
        (
            util::horizontal_alignment(main),
            util::vertical_alignment(cross),
        )
    } else {
        let mut vertical = util::vertical_alignment(main);
        if state.is_reverse {
            vertical = match vertical {
                VerticalAlignment::Top => VerticalAlignment::Bottom,
                VerticalAlignment::Bottom => VerticalAlignment::Top,
                other => other,
            };
        }
        (util::horizontal_alignment(cross), vertical)
    };
    slot.set_alignment(horizontal, vertical);

    let mut padding = util::margin_padding(style, units);
    match slot {
        Slot::Box(box_slot) => {
            box_slot.size = if grow > 0.0 {
                SizeRule::Fill(grow)
            } else if space_between {
                SizeRule::Fill(1.0)
            } else {
                SizeRule::Auto
            };
            if !is_first {
                match (state.is_row, state.is_reverse) {
                    (true, false) => padding.left += state.main_gap,
                    (true, true) => padding.right += state.main_gap,
                    (false, false) => padding.top += state.main_gap,
                    (false, true) => padding.bottom += state.main_gap,
                }
            }
        }
        Slot::Wrap(wrap_slot) => {
            wrap_slot.fill_empty_space = grow > 0.0 || space_between;
            let threshold = if state.is_row {
                style.min_width.as_ref()
            } else {
                style.min_height.as_ref()
            };
            wrap_slot.fill_span_when_less_than =
                threshold.map_or(0.0, |v| units.length_to_pixels(v, style, None));
        }
        _ => {}
    }
    slot.set_padding(padding);
}

pub struct FlexLayoutEngine;

impl LayoutEngine for FlexLayoutEngine {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Flex
    }

    fn create_container(
        &self,
        widget: WidgetId,
        style: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Container {
        let state = FlexState::from_style(style, ctx.units);
        log::debug!(
            "flex container {}: row={} reverse={} wrap={} main_gap={}",
            widget,
            state.is_row,
            state.is_reverse,
            state.is_wrap,
            state.main_gap
        );
        Container::new(widget, state.build_panel(), EngineState::Flex(state))
    }

    fn update(
        &self,
        container: &mut Container,
        old: &StyleDescriptor,
        changed: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        container.state().as_flex()?;
        let state = FlexState::from_style(&old.merged_with(changed), ctx.units);
        state.apply_to_panel(container.panel_mut());
        container.set_state(EngineState::Flex(state));
        Ok(())
    }

    fn append_child(
        &self,
        container: &mut Container,
        child: WidgetId,
        style: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        let state = *container.state().as_flex()?;
        let is_first = container.is_empty();
        let at_front = !state.is_row && state.is_reverse;
        let node = container.insert(child, style.clone(), at_front)?;
        place_child(&state, is_first, &node.style, &mut node.slot, ctx.units);
        Ok(())
    }

    fn update_child(
        &self,
        container: &mut Container,
        child: WidgetId,
        changed: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        let state = *container.state().as_flex()?;
        let is_first = container.is_first_appended(child);
        let Some(node) = container.child_mut(child) else {
            log::debug!("update_child: {} has no slot in flex container", child);
            return Ok(());
        };
        node.style = node.style.merged_with(changed);
        place_child(&state, is_first, &node.style, &mut node.slot, ctx.units);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestHost;
    use trellis_types::Margin;

    fn style(json: serde_json::Value) -> StyleDescriptor {
        StyleDescriptor::from_value(json).unwrap()
    }

    #[test]
    fn display_flex_defaults_to_row() {
        let mut host = TestHost::new();
        let container = host.create(
            &FlexLayoutEngine,
            &style(serde_json::json!({"display": "flex"})),
        );
        assert!(matches!(container.panel(), Panel::HorizontalBox(_)));

        let container = host.create(&FlexLayoutEngine, &StyleDescriptor::default());
        assert!(matches!(container.panel(), Panel::VerticalBox(_)));
    }

    #[test]
    fn row_reverse_flows_right_to_left_with_trailing_gaps() {
        let mut host = TestHost::new();
        let mut container = host.create(
            &FlexLayoutEngine,
            &style(serde_json::json!({"flexDirection": "row-reverse", "gap": "8px"})),
        );
        host.append(&FlexLayoutEngine, &mut container, 1, &StyleDescriptor::default());
        host.append(&FlexLayoutEngine, &mut container, 2, &StyleDescriptor::default());

        assert_eq!(
            container.panel(),
            &Panel::HorizontalBox(StackPanel {
                flow_direction: FlowDirection::RightToLeft
            })
        );
        assert_eq!(container.slot(WidgetId(1)).unwrap().padding(), Some(Margin::zero()));
        assert_eq!(
            container.slot(WidgetId(2)).unwrap().padding(),
            Some(Margin::new(0.0, 0.0, 8.0, 0.0))
        );
    }

    #[test]
    fn column_reverse_prepends_and_swaps_main_axis() {
        let mut host = TestHost::new();
        let mut container = host.create(
            &FlexLayoutEngine,
            &style(serde_json::json!({
                "flexDirection": "column-reverse",
                "justifyContent": "flex-start",
                "rowGap": 4
            })),
        );
        host.append(&FlexLayoutEngine, &mut container, 1, &StyleDescriptor::default());
        host.append(&FlexLayoutEngine, &mut container, 2, &StyleDescriptor::default());

        let order: Vec<u64> = container.children().iter().map(|n| n.widget.raw()).collect();
        assert_eq!(order, vec![2, 1]);
        let slot = container.slot(WidgetId(2)).unwrap();
        assert_eq!(
            slot.alignment(),
            Some((HorizontalAlignment::Fill, VerticalAlignment::Bottom))
        );
        assert_eq!(slot.padding().unwrap().bottom, 4.0);
    }

    #[test]
    fn grow_and_space_between_fill() {
        let mut host = TestHost::new();
        let mut container = host.create(
            &FlexLayoutEngine,
            &style(serde_json::json!({"display": "flex", "justifyContent": "space-between"})),
        );
        host.append(&FlexLayoutEngine, &mut container, 1, &style(serde_json::json!({"flex": "2 1 0"})));
        host.append(&FlexLayoutEngine, &mut container, 2, &StyleDescriptor::default());

        let sizes: Vec<SizeRule> = container
            .children()
            .iter()
            .filter_map(|n| n.slot.as_box().map(|s| s.size))
            .collect();
        assert_eq!(sizes, vec![SizeRule::Fill(2.0), SizeRule::Fill(1.0)]);
    }

    #[test]
    fn wrap_panel_carries_gaps_and_thresholds() {
        let mut host = TestHost::new();
        let mut container = host.create(
            &FlexLayoutEngine,
            &style(serde_json::json!({"flexFlow": "row wrap", "gap": "10px 20px"})),
        );
        host.append(
            &FlexLayoutEngine,
            &mut container,
            1,
            &style(serde_json::json!({"flexGrow": 1, "minWidth": "120px"})),
        );

        match container.panel() {
            Panel::WrapBox(wrap) => {
                assert_eq!(wrap.orientation, Orientation::Horizontal);
                assert_eq!(wrap.inner_slot_padding, Vector2::new(20.0, 10.0));
            }
            other => panic!("expected wrap panel, got {:?}", other),
        }
        let slot = container.slot(WidgetId(1)).unwrap().as_wrap().unwrap();
        assert!(slot.fill_empty_space);
        assert_eq!(slot.fill_span_when_less_than, 120.0);
        assert_eq!(slot.padding, Margin::zero());
    }

    #[test]
    fn flex_shorthand_keywords() {
        let grow = |v: &str| flex_grow(&style(serde_json::json!({ "flex": v })));
        assert_eq!(grow("auto"), 1.0);
        assert_eq!(grow("none"), 0.0);
        assert_eq!(grow("3"), 3.0);
    }

    #[test]
    fn update_keeps_existing_slots() {
        let mut host = TestHost::new();
        let old = style(serde_json::json!({"display": "flex", "gap": 4}));
        let mut container = host.create(&FlexLayoutEngine, &old);
        host.append(&FlexLayoutEngine, &mut container, 1, &StyleDescriptor::default());
        host.append(&FlexLayoutEngine, &mut container, 2, &StyleDescriptor::default());
        let before = container.slot(WidgetId(2)).cloned();

        host.update(
            &FlexLayoutEngine,
            &mut container,
            &old,
            &style(serde_json::json!({"gap": 12})),
        );
        assert_eq!(container.slot(WidgetId(2)).cloned(), before);
        assert_eq!(container.state().as_flex().unwrap().main_gap, 12.0);

        host.append(&FlexLayoutEngine, &mut container, 3, &StyleDescriptor::default());
        assert_eq!(container.slot(WidgetId(3)).unwrap().padding().unwrap().left, 12.0);
    }
}
