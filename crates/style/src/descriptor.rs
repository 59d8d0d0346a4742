//! The flat, resolved style descriptor consumed by every layout engine.
//!
//! A descriptor is produced fresh by the style cascade for every
//! create/update call. Engines read it, derive their placement directives,
//! and drop it; nothing here is patched in place across updates.

use crate::parsers::{StyleParseError, apply_style_property};
use crate::units::{Length, LengthUnit};
use serde::{Deserialize, Serialize};
use std::fmt;
use trellis_types::Margin;

/// A single property value as handed over by the cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f32),
    Text(String),
    Spacing(Margin),
}

impl StyleValue {
    /// Lower-cased, trimmed textual form. Numbers are rendered without a unit.
    pub fn keyword(&self) -> String {
        match self {
            StyleValue::Text(text) => text.trim().to_ascii_lowercase(),
            other => other.to_string(),
        }
    }

    /// Numeric view of the value; numeric strings such as `"2"` are accepted.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            StyleValue::Number(n) => Some(*n),
            StyleValue::Text(text) => text.trim().parse::<f32>().ok(),
            StyleValue::Spacing(_) => None,
        }
    }

    /// Multiplier view: numbers, numeric strings and percentages (`"50%"` is 0.5).
    pub fn as_factor(&self) -> Option<f32> {
        self.as_number().or_else(|| match self.as_text().and_then(Length::parse) {
            Some(Length::Value(pct, LengthUnit::Percent)) => Some(pct / 100.0),
            _ => None,
        })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Text(text) => Some(text.trim()),
            _ => None,
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, StyleValue::Text(text) if text.trim().eq_ignore_ascii_case("auto"))
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => write!(f, "{}", n),
            StyleValue::Text(text) => f.write_str(text),
            StyleValue::Spacing(m) => write!(f, "{} {} {} {}", m.top, m.right, m.bottom, m.left),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<f32> for StyleValue {
    fn from(value: f32) -> Self {
        StyleValue::Number(value)
    }
}

impl From<Margin> for StyleValue {
    fn from(value: Margin) -> Self {
        StyleValue::Spacing(value)
    }
}

macro_rules! style_properties {
    ($($field:ident => $name:literal),* $(,)?) => {
        /// Layout-relevant properties keyed by their camelCase CSS name.
        #[derive(Deserialize, Serialize, Default, Clone, PartialEq, Debug)]
        pub struct StyleDescriptor {
            $(
                #[serde(rename = $name, default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<StyleValue>,
            )*
        }

        impl StyleDescriptor {
            /// Every property name this descriptor understands, in camelCase.
            pub const PROPERTY_NAMES: &'static [&'static str] = &[$($name),*];

            /// Looks a property up by its camelCase name.
            pub fn get(&self, name: &str) -> Option<&StyleValue> {
                match name {
                    $($name => self.$field.as_ref(),)*
                    _ => None,
                }
            }

            /// Sets a property by camelCase name. Returns `false` for unknown names.
            pub fn set(&mut self, name: &str, value: StyleValue) -> bool {
                match name {
                    $($name => self.$field = Some(value),)*
                    _ => return false,
                }
                true
            }

            /// Returns a new descriptor where every property present in `changed` wins.
            pub fn merged_with(&self, changed: &StyleDescriptor) -> StyleDescriptor {
                StyleDescriptor {
                    $($field: changed.$field.clone().or_else(|| self.$field.clone()),)*
                }
            }

            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())*
            }
        }
    };
}

style_properties! {
    // Display & positioning scheme
    display => "display",
    position => "position",

    // Flexbox container
    flex_direction => "flexDirection",
    flex_wrap => "flexWrap",
    flex_flow => "flexFlow",
    justify_content => "justifyContent",
    align_items => "alignItems",
    justify_items => "justifyItems",
    place_items => "placeItems",
    gap => "gap",
    row_gap => "rowGap",
    column_gap => "columnGap",

    // Flexbox / grid item
    flex => "flex",
    flex_grow => "flexGrow",
    align_self => "alignSelf",
    justify_self => "justifySelf",
    place_self => "placeSelf",

    // Grid container
    grid_template => "gridTemplate",
    grid_template_columns => "gridTemplateColumns",
    grid_template_rows => "gridTemplateRows",
    grid_template_areas => "gridTemplateAreas",
    grid_auto_flow => "gridAutoFlow",

    // Grid item
    grid_area => "gridArea",
    grid_column => "gridColumn",
    grid_column_start => "gridColumnStart",
    grid_column_end => "gridColumnEnd",
    grid_row => "gridRow",
    grid_row_start => "gridRowStart",
    grid_row_end => "gridRowEnd",

    // Uniform grid container
    cell_padding => "cellPadding",
    min_cell_width => "minCellWidth",
    min_cell_height => "minCellHeight",

    // Offsets & sizing
    left => "left",
    top => "top",
    right => "right",
    bottom => "bottom",
    width => "width",
    height => "height",
    min_width => "minWidth",
    min_height => "minHeight",
    max_width => "maxWidth",
    max_height => "maxHeight",
    aspect_ratio => "aspectRatio",

    // Canvas anchoring & stacking
    position_anchor => "positionAnchor",
    offset_anchor => "offsetAnchor",
    anchor_align => "anchorAlign",
    anchor_pivot => "anchorPivot",
    z_index => "zIndex",
    z_order => "zOrder",

    // Transforms & fitting
    scale => "scale",
    object_fit => "objectFit",
    translate => "translate",
    translate_x => "translateX",
    translate_y => "translateY",
    transform => "transform",

    // Box model
    margin => "margin",
    margin_top => "marginTop",
    margin_right => "marginRight",
    margin_bottom => "marginBottom",
    margin_left => "marginLeft",
    padding => "padding",
    padding_top => "paddingTop",
    padding_right => "paddingRight",
    padding_bottom => "paddingBottom",
    padding_left => "paddingLeft",

    // Background & border
    background => "background",
    background_color => "backgroundColor",
    background_image => "backgroundImage",
    border => "border",
    border_color => "borderColor",
    border_width => "borderWidth",
    border_radius => "borderRadius",

    // Text metrics used by relative units
    font_size => "fontSize",
}

impl StyleDescriptor {
    /// Deserializes a descriptor from a JSON object of camelCase properties.
    pub fn from_json(json: &str) -> Result<Self, StyleParseError> {
        serde_json::from_str(json).map_err(|e| StyleParseError::Json(e.to_string()))
    }

    /// Converts an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, StyleParseError> {
        serde_json::from_value(value).map_err(|e| StyleParseError::Json(e.to_string()))
    }

    /// Parses an inline `key: value; ...` declaration block.
    pub fn from_inline_css(css: &str) -> Result<Self, StyleParseError> {
        let mut style = StyleDescriptor::default();
        for declaration in css.split(';') {
            if let Some((key, value)) = declaration.split_once(':') {
                apply_style_property(&mut style, key.trim(), value.trim())?;
            }
        }
        Ok(style)
    }

    /// Keyword form of a property, if present.
    pub fn keyword(&self, name: &str) -> Option<String> {
        self.get(name).map(StyleValue::keyword)
    }

    /// True when the property is present and is not the `auto` keyword.
    pub fn is_set(value: &Option<StyleValue>) -> bool {
        value.as_ref().is_some_and(|v| !v.is_auto())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mixed_value_kinds() {
        let style = StyleDescriptor::from_json(
            r#"{"flexGrow": 2, "gridColumn": "2 / span 2", "cellPadding": {"top": 1}}"#,
        )
        .unwrap();
        assert_eq!(style.flex_grow, Some(StyleValue::Number(2.0)));
        assert_eq!(style.grid_column, Some(StyleValue::from("2 / span 2")));
        assert_eq!(
            style.cell_padding,
            Some(StyleValue::Spacing(Margin::new(0.0, 1.0, 0.0, 0.0)))
        );
    }

    #[test]
    fn factors_accept_percentages() {
        assert_eq!(StyleValue::Number(2.0).as_factor(), Some(2.0));
        assert_eq!(StyleValue::from(" 0.5 ").as_factor(), Some(0.5));
        assert_eq!(StyleValue::from("50%").as_factor(), Some(0.5));
        assert_eq!(StyleValue::from("50px").as_factor(), None);
    }

    #[test]
    fn merge_prefers_changed_properties() {
        let old = StyleDescriptor::from_json(r#"{"gap": "4px", "display": "flex"}"#).unwrap();
        let changed = StyleDescriptor::from_json(r#"{"gap": "8px"}"#).unwrap();
        let merged = old.merged_with(&changed);
        assert_eq!(merged.gap, Some(StyleValue::from("8px")));
        assert_eq!(merged.display, Some(StyleValue::from("flex")));
    }

    #[test]
    fn inline_css_accepts_kebab_case() {
        let style =
            StyleDescriptor::from_inline_css("flex-direction: row-reverse; z-index: 3").unwrap();
        assert_eq!(style.keyword("flexDirection").as_deref(), Some("row-reverse"));
        assert_eq!(style.z_index.as_ref().and_then(StyleValue::as_number), Some(3.0));
    }

    #[test]
    fn inline_css_ignores_unknown_properties() {
        let style = StyleDescriptor::from_inline_css("colour: red; gap: 2px").unwrap();
        assert_eq!(style.gap, Some(StyleValue::from("2px")));
        assert!(StyleDescriptor::from_inline_css("colour: red").unwrap().is_empty());
    }

    #[test]
    fn auto_is_not_set() {
        assert!(!StyleDescriptor::is_set(&Some(StyleValue::from(" AUTO "))));
        assert!(StyleDescriptor::is_set(&Some(StyleValue::from("10px"))));
        assert!(!StyleDescriptor::is_set(&None));
    }
}
