//! Optional wrappers composed around a layout container.
//!
//! Background/border painting, fixed sizing and object-fit scaling are kept
//! out of the engines. The dispatcher stacks them in that order, keeps each
//! one alive once created, and resets it to a neutral configuration when the
//! style stops asking for it.

use crate::util;
use std::collections::BTreeMap;
use trellis_style::{Length, LengthUnit, StyleDescriptor, StyleValue, UnitResolver};
use trellis_style::parsers::{parse_ratio, run_parser};
use trellis_types::{HorizontalAlignment, Margin, Stretch, VerticalAlignment};

/// The slot the wrapped content sits in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrapperSlot {
    pub padding: Margin,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
}

const BACKGROUND_PROPERTIES: &[&str] = &[
    "background",
    "backgroundColor",
    "backgroundImage",
    "border",
    "borderColor",
    "borderWidth",
    "borderRadius",
];

/// Border-like wrapper carrying the paint properties and the container padding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackgroundWrapper {
    pub properties: BTreeMap<String, StyleValue>,
    pub padding: Margin,
    pub content_slot: WrapperSlot,
}

impl BackgroundWrapper {
    /// `none` counts as unset, so a host can switch a paint property off.
    fn paint_property<'a>(style: &'a StyleDescriptor, name: &str) -> Option<&'a StyleValue> {
        style.get(name).filter(|v| v.keyword() != "none")
    }

    pub fn is_needed(style: &StyleDescriptor) -> bool {
        BACKGROUND_PROPERTIES
            .iter()
            .any(|name| Self::paint_property(style, name).is_some())
    }

    pub fn configure(&mut self, style: &StyleDescriptor, units: &dyn UnitResolver) {
        self.properties = BACKGROUND_PROPERTIES
            .iter()
            .filter_map(|name| {
                Self::paint_property(style, name).map(|v| (name.to_string(), v.clone()))
            })
            .collect();
        self.padding = util::container_padding(style, units);
    }

    pub fn reset(&mut self) {
        self.properties.clear();
        self.padding = Margin::zero();
    }
}

/// Fixed-size wrapper. Percentages cannot be expressed as overrides and are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizeBoxWrapper {
    pub width_override: Option<f32>,
    pub height_override: Option<f32>,
    pub min_width: Option<f32>,
    pub min_height: Option<f32>,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
    pub aspect_ratio: Option<f32>,
    pub content_slot: WrapperSlot,
}

impl SizeBoxWrapper {
    pub fn is_needed(style: &StyleDescriptor) -> bool {
        [
            &style.width,
            &style.height,
            &style.min_width,
            &style.min_height,
            &style.max_width,
            &style.max_height,
            &style.aspect_ratio,
        ]
        .into_iter()
        .any(StyleDescriptor::is_set)
    }

    pub fn configure(&mut self, style: &StyleDescriptor, units: &dyn UnitResolver) {
        let px = |value: &Option<StyleValue>| -> Option<f32> {
            let value = value.as_ref().filter(|v| !v.is_auto())?;
            if let Some(Length::Value(_, LengthUnit::Percent)) = value.as_text().and_then(Length::parse)
            {
                return None;
            }
            Some(units.length_to_pixels(value, style, None))
        };
        self.width_override = px(&style.width);
        self.height_override = px(&style.height);
        self.min_width = px(&style.min_width);
        self.min_height = px(&style.min_height);
        self.max_width = px(&style.max_width);
        self.max_height = px(&style.max_height);
        self.aspect_ratio = style
            .aspect_ratio
            .as_ref()
            .and_then(|value| match value {
                StyleValue::Number(n) => Some(*n),
                StyleValue::Text(text) => run_parser(parse_ratio, text).ok(),
                StyleValue::Spacing(_) => None,
            })
            .filter(|ratio| *ratio > 0.0);
    }

    pub fn reset(&mut self) {
        let content_slot = std::mem::take(&mut self.content_slot);
        *self = SizeBoxWrapper {
            content_slot,
            ..Default::default()
        };
    }
}

/// Object-fit wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleBoxWrapper {
    pub stretch: Stretch,
    pub user_scale: f32,
    pub content_slot: WrapperSlot,
}

impl Default for ScaleBoxWrapper {
    fn default() -> Self {
        Self {
            stretch: Stretch::default(),
            user_scale: 1.0,
            content_slot: WrapperSlot::default(),
        }
    }
}

impl ScaleBoxWrapper {
    pub fn is_needed(style: &StyleDescriptor) -> bool {
        style.object_fit.is_some()
    }

    pub fn configure(&mut self, style: &StyleDescriptor) {
        let fit = style.keyword("objectFit").unwrap_or_default();
        self.stretch = match fit.as_str() {
            "contain" => Stretch::ScaleToFit,
            "cover" => Stretch::ScaleToFill,
            "fill" => Stretch::Fill,
            "none" => Stretch::None,
            "scale-down" => Stretch::UserSpecified,
            other => {
                log::debug!("unknown objectFit '{}', using contain", other);
                Stretch::ScaleToFit
            }
        };
        self.user_scale = if self.stretch == Stretch::UserSpecified {
            style
                .scale
                .as_ref()
                .and_then(StyleValue::as_factor)
                .unwrap_or(1.0)
        } else {
            1.0
        };
    }

    pub fn reset(&mut self) {
        self.stretch = Stretch::default();
        self.user_scale = 1.0;
    }
}
