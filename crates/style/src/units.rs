//! Length-to-pixel conversion.
//!
//! Engines never interpret units themselves. They hand a value, the style it
//! came from and an optional reference extent to a [`UnitResolver`], which
//! answers in device pixels and yields `0.0` for anything it cannot read.

use crate::descriptor::{StyleDescriptor, StyleValue};
use crate::parsers::{parse_length, run_parser};
use trellis_types::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Px,
    Pt,
    Em,
    Rem,
    Vw,
    Vh,
    Percent,
    Fr,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Auto,
    Value(f32, LengthUnit),
}

impl Length {
    pub fn px(amount: f32) -> Self {
        Length::Value(amount, LengthUnit::Px)
    }

    pub fn zero() -> Self {
        Length::px(0.0)
    }

    /// Reads a single length token. Unparseable input yields `None`.
    pub fn parse(input: &str) -> Option<Length> {
        run_parser(parse_length, input).ok()
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::zero()
    }
}

/// The length collaborator.
pub trait UnitResolver {
    /// Converts a parsed length. `reference` is the extent percentages resolve against.
    fn resolve_length(&self, length: Length, style: &StyleDescriptor, reference: Option<f32>)
    -> f32;

    /// Converts any style value to pixels; returns `0.0` on unparseable input.
    fn length_to_pixels(
        &self,
        value: &StyleValue,
        style: &StyleDescriptor,
        reference: Option<f32>,
    ) -> f32 {
        match value {
            StyleValue::Number(n) => *n,
            StyleValue::Text(text) => Length::parse(text)
                .map(|length| self.resolve_length(length, style, reference))
                .unwrap_or(0.0),
            StyleValue::Spacing(_) => 0.0,
        }
    }
}

/// Default CSS unit conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssUnits {
    /// Font size `rem` resolves against, and `em` when the style has no `fontSize`.
    pub root_font_size: f32,
    /// Extent `vw`/`vh` resolve against.
    pub viewport: Size,
    /// Pixels per typographic point.
    pub points_to_pixels: f32,
}

impl Default for CssUnits {
    fn default() -> Self {
        Self {
            root_font_size: 16.0,
            viewport: Size::new(1920.0, 1080.0),
            points_to_pixels: 4.0 / 3.0,
        }
    }
}

impl CssUnits {
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// The element font size in pixels; relative font sizes resolve against the root.
    pub fn font_size(&self, style: &StyleDescriptor) -> f32 {
        let Some(value) = style.font_size.as_ref() else {
            return self.root_font_size;
        };
        let length = match value {
            StyleValue::Number(n) => return *n,
            StyleValue::Text(text) => Length::parse(text),
            StyleValue::Spacing(_) => None,
        };
        match length {
            Some(Length::Value(v, LengthUnit::Px)) => v,
            Some(Length::Value(v, LengthUnit::Pt)) => v * self.points_to_pixels,
            Some(Length::Value(v, LengthUnit::Em | LengthUnit::Rem)) => v * self.root_font_size,
            Some(Length::Value(v, LengthUnit::Percent)) => v / 100.0 * self.root_font_size,
            _ => self.root_font_size,
        }
    }
}

impl UnitResolver for CssUnits {
    fn resolve_length(
        &self,
        length: Length,
        style: &StyleDescriptor,
        reference: Option<f32>,
    ) -> f32 {
        let Length::Value(amount, unit) = length else {
            return 0.0;
        };
        match unit {
            LengthUnit::Px => amount,
            LengthUnit::Pt => amount * self.points_to_pixels,
            LengthUnit::Em => amount * self.font_size(style),
            LengthUnit::Rem => amount * self.root_font_size,
            LengthUnit::Vw => amount / 100.0 * self.viewport.width,
            LengthUnit::Vh => amount / 100.0 * self.viewport.height,
            LengthUnit::Percent => reference.map_or(0.0, |r| amount / 100.0 * r),
            LengthUnit::Fr => 0.0,
        }
    }
}
