//! Slot helpers shared by every engine: alignment mapping, box shorthands and gaps.

use crate::slot::Slot;
use trellis_style::parsers::{parse_length_list, run_parser};
use trellis_style::{AlignKeyword, StyleDescriptor, StyleValue, UnitResolver};
use trellis_types::{HorizontalAlignment, Margin, VerticalAlignment};

pub fn horizontal_alignment(keyword: AlignKeyword) -> HorizontalAlignment {
    match keyword {
        AlignKeyword::Start => HorizontalAlignment::Left,
        AlignKeyword::Center => HorizontalAlignment::Center,
        AlignKeyword::End => HorizontalAlignment::Right,
        AlignKeyword::Stretch
        | AlignKeyword::SpaceBetween
        | AlignKeyword::SpaceAround
        | AlignKeyword::SpaceEvenly => HorizontalAlignment::Fill,
    }
}

pub fn vertical_alignment(keyword: AlignKeyword) -> VerticalAlignment {
    match keyword {
        AlignKeyword::Start => VerticalAlignment::Top,
        AlignKeyword::Center => VerticalAlignment::Center,
        AlignKeyword::End => VerticalAlignment::Bottom,
        AlignKeyword::Stretch
        | AlignKeyword::SpaceBetween
        | AlignKeyword::SpaceAround
        | AlignKeyword::SpaceEvenly => VerticalAlignment::Fill,
    }
}

pub fn align_keyword(value: Option<&StyleValue>) -> Option<AlignKeyword> {
    value.and_then(StyleValue::as_text).and_then(AlignKeyword::parse)
}

/// Explicit self-alignment of a child, per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelfAlignment {
    /// Block axis (`alignSelf`).
    pub align: Option<AlignKeyword>,
    /// Inline axis (`justifySelf`).
    pub justify: Option<AlignKeyword>,
}

impl SelfAlignment {
    pub fn is_empty(&self) -> bool {
        self.align.is_none() && self.justify.is_none()
    }
}

/// Reads `placeSelf` ("align justify"), falling back per axis to `alignSelf`/`justifySelf`.
pub fn self_alignment(style: &StyleDescriptor) -> SelfAlignment {
    let (place_align, place_justify) = style
        .place_self
        .as_ref()
        .and_then(StyleValue::as_text)
        .map(AlignKeyword::parse_pair)
        .unwrap_or((None, None));
    SelfAlignment {
        align: place_align.or_else(|| align_keyword(style.align_self.as_ref())),
        justify: place_justify.or_else(|| align_keyword(style.justify_self.as_ref())),
    }
}

/// Applies the child's self-alignment, using the given defaults for unset axes.
pub fn apply_self_alignment(
    slot: &mut Slot,
    style: &StyleDescriptor,
    default_horizontal: HorizontalAlignment,
    default_vertical: VerticalAlignment,
) {
    let alignment = self_alignment(style);
    slot.set_alignment(
        alignment
            .justify
            .map_or(default_horizontal, horizontal_alignment),
        alignment.align.map_or(default_vertical, vertical_alignment),
    );
}

/// Resolves a box shorthand: a structured margin, a number, or 1–4 CSS lengths.
///
/// Unreadable shorthands resolve to zero.
pub fn resolve_box_shorthand(
    value: &StyleValue,
    style: &StyleDescriptor,
    units: &dyn UnitResolver,
) -> Margin {
    match value {
        StyleValue::Spacing(margin) => *margin,
        StyleValue::Number(n) => Margin::all(*n),
        StyleValue::Text(text) => length_list(text, style, units)
            .and_then(|values| Margin::from_css_values(&values))
            .unwrap_or_default(),
    }
}

/// Resolves a whitespace separated length list to pixels.
fn length_list(text: &str, style: &StyleDescriptor, units: &dyn UnitResolver) -> Option<Vec<f32>> {
    match run_parser(parse_length_list, text) {
        Ok(lengths) => Some(
            lengths
                .into_iter()
                .map(|length| units.resolve_length(length, style, None))
                .collect(),
        ),
        Err(e) => {
            log::debug!("unreadable length list '{}': {}", text, e);
            None
        }
    }
}

/// Child margin as slot padding: the `margin` shorthand overridden by the per-side properties.
pub fn margin_padding(style: &StyleDescriptor, units: &dyn UnitResolver) -> Margin {
    let mut margin = style
        .margin
        .as_ref()
        .map(|value| resolve_box_shorthand(value, style, units))
        .unwrap_or_default();
    let side = |value: &Option<StyleValue>| {
        value
            .as_ref()
            .map(|v| units.length_to_pixels(v, style, None))
    };
    if let Some(left) = side(&style.margin_left) {
        margin.left = left;
    }
    if let Some(top) = side(&style.margin_top) {
        margin.top = top;
    }
    if let Some(right) = side(&style.margin_right) {
        margin.right = right;
    }
    if let Some(bottom) = side(&style.margin_bottom) {
        margin.bottom = bottom;
    }
    margin
}

/// Container padding: the `padding` shorthand overridden by the per-side properties.
pub fn container_padding(style: &StyleDescriptor, units: &dyn UnitResolver) -> Margin {
    let mut padding = style
        .padding
        .as_ref()
        .map(|value| resolve_box_shorthand(value, style, units))
        .unwrap_or_default();
    let side = |value: &Option<StyleValue>| {
        value
            .as_ref()
            .map(|v| units.length_to_pixels(v, style, None))
    };
    if let Some(left) = side(&style.padding_left) {
        padding.left = left;
    }
    if let Some(top) = side(&style.padding_top) {
        padding.top = top;
    }
    if let Some(right) = side(&style.padding_right) {
        padding.right = right;
    }
    if let Some(bottom) = side(&style.padding_bottom) {
        padding.bottom = bottom;
    }
    padding
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Gaps {
    pub row: f32,
    pub column: f32,
}

/// Reads `gap` ("row column" or a single value) overridden by `rowGap`/`columnGap`.
pub fn resolve_gaps(style: &StyleDescriptor, units: &dyn UnitResolver) -> Gaps {
    let px = |value: &StyleValue| units.length_to_pixels(value, style, None);
    let mut gaps = match style.gap.as_ref() {
        Some(StyleValue::Text(text)) => match length_list(text, style, units).as_deref() {
            Some([row, column, ..]) => Gaps {
                row: *row,
                column: *column,
            },
            Some([both]) => Gaps {
                row: *both,
                column: *both,
            },
            _ => Gaps::default(),
        },
        Some(value) => {
            let both = px(value);
            Gaps {
                row: both,
                column: both,
            }
        }
        None => Gaps::default(),
    };
    if let Some(row) = style.row_gap.as_ref() {
        gaps.row = px(row);
    }
    if let Some(column) = style.column_gap.as_ref() {
        gaps.column = px(column);
    }
    gaps
}

/// Reads a non-negative integer index from a number or numeric string.
pub fn index_value(value: Option<&StyleValue>) -> u32 {
    value
        .and_then(StyleValue::as_number)
        .filter(|n| n.is_finite())
        .map_or(0, |n| n.max(0.0).trunc() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_style::CssUnits;

    #[test]
    fn box_shorthand_uses_css_order() {
        let units = CssUnits::default();
        let style = StyleDescriptor::default();
        let margin = resolve_box_shorthand(&StyleValue::from("2 4 6 8"), &style, &units);
        assert_eq!(margin, Margin::new(8.0, 2.0, 4.0, 6.0));
        let margin = resolve_box_shorthand(&StyleValue::from("1px 3px"), &style, &units);
        assert_eq!(margin, Margin::new(3.0, 1.0, 3.0, 1.0));
    }

    #[test]
    fn margin_sides_override_shorthand() {
        let units = CssUnits::default();
        let style = StyleDescriptor {
            margin: Some(StyleValue::from("4px")),
            margin_left: Some(StyleValue::Number(1.0)),
            ..Default::default()
        };
        assert_eq!(margin_padding(&style, &units), Margin::new(1.0, 4.0, 4.0, 4.0));
    }

    #[test]
    fn gap_pair_and_overrides() {
        let units = CssUnits::default();
        let style = StyleDescriptor {
            gap: Some(StyleValue::from("10px 20px")),
            ..Default::default()
        };
        assert_eq!(resolve_gaps(&style, &units), Gaps { row: 10.0, column: 20.0 });

        let style = StyleDescriptor {
            gap: Some(StyleValue::Number(6.0)),
            column_gap: Some(StyleValue::from("2px")),
            ..Default::default()
        };
        assert_eq!(resolve_gaps(&style, &units), Gaps { row: 6.0, column: 2.0 });
    }

    #[test]
    fn length_lists_resolve_units() {
        let units = CssUnits::default();
        let style = StyleDescriptor {
            gap: Some(StyleValue::from(" 1em ")),
            ..Default::default()
        };
        assert_eq!(resolve_gaps(&style, &units), Gaps { row: 16.0, column: 16.0 });

        let style = StyleDescriptor {
            gap: Some(StyleValue::from("8px wide")),
            ..Default::default()
        };
        assert_eq!(resolve_gaps(&style, &units), Gaps::default());

        let margin = resolve_box_shorthand(&StyleValue::from("1em 2px 3px"), &style, &units);
        assert_eq!(margin, Margin::new(2.0, 16.0, 2.0, 3.0));
        let margin = resolve_box_shorthand(&StyleValue::from("1 2 3 4 5"), &style, &units);
        assert_eq!(margin, Margin::default());
    }

    #[test]
    fn place_self_wins_over_longhands() {
        let style = StyleDescriptor {
            place_self: Some(StyleValue::from("end center")),
            align_self: Some(StyleValue::from("start")),
            ..Default::default()
        };
        let alignment = self_alignment(&style);
        assert_eq!(alignment.align, Some(AlignKeyword::End));
        assert_eq!(alignment.justify, Some(AlignKeyword::Center));
    }

    #[test]
    fn index_values_clamp_and_parse() {
        assert_eq!(index_value(Some(&StyleValue::from("3"))), 3);
        assert_eq!(index_value(Some(&StyleValue::Number(-2.0))), 0);
        assert_eq!(index_value(Some(&StyleValue::from("x"))), 0);
        assert_eq!(index_value(None), 0);
    }
}
