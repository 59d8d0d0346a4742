//! Defines primitives for size, position, and spacing in device pixels.
use serde::{Deserialize, Deserializer, Serialize, de};
use std::ops::Add;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// True when both axes have a strictly positive extent.
    pub fn is_positive(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// Per-edge spacing, used for slot padding, wrapper padding and canvas offsets.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Margin {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margin {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn zero() -> Self {
        Self::all(0.0)
    }

    /// Expands 1 to 4 values in CSS order (top, right, bottom, left).
    ///
    /// Returns `None` for an empty slice or more than four values.
    pub fn from_css_values(values: &[f32]) -> Option<Self> {
        let (top, right, bottom, left) = match *values {
            [all] => (all, all, all, all),
            [vertical, horizontal] => (vertical, horizontal, vertical, horizontal),
            [top, horizontal, bottom] => (top, horizontal, bottom, horizontal),
            [top, right, bottom, left] => (top, right, bottom, left),
            _ => return None,
        };
        Some(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Parse a plain pixel number with an optional `px` suffix.
    fn parse_pixels(input: &str) -> Result<f32, String> {
        let input = input.trim();
        let number = input.strip_suffix("px").unwrap_or(input);
        number
            .trim()
            .parse::<f32>()
            .map_err(|e| format!("Invalid number '{}': {}", input, e))
    }

    /// Parse a CSS-style shorthand made of plain pixel values.
    fn parse_shorthand(input: &str) -> Result<Self, String> {
        let values = input
            .split_whitespace()
            .map(Self::parse_pixels)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_css_values(&values).ok_or_else(|| {
            format!(
                "Invalid spacing shorthand: expected 1 to 4 values, got {}",
                values.len()
            )
        })
    }
}

impl Add for Margin {
    type Output = Margin;

    fn add(self, rhs: Margin) -> Margin {
        Margin {
            left: self.left + rhs.left,
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
        }
    }
}

impl<'de> Deserialize<'de> for Margin {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MarginVisitor;
        impl<'de> de::Visitor<'de> for MarginVisitor {
            type Value = Margin;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a number, a string like '2 4 6 8' or a map")
            }

            fn visit_f64<E>(self, value: f64) -> Result<Margin, E>
            where
                E: de::Error,
            {
                Ok(Margin::all(value as f32))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Margin, E>
            where
                E: de::Error,
            {
                Ok(Margin::all(value as f32))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Margin, E>
            where
                E: de::Error,
            {
                Ok(Margin::all(value as f32))
            }

            fn visit_str<E>(self, value: &str) -> Result<Margin, E>
            where
                E: de::Error,
            {
                Margin::parse_shorthand(value).map_err(E::custom)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Margin, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut margin = Margin::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "top" => margin.top = map.next_value()?,
                        "right" => margin.right = map.next_value()?,
                        "bottom" => margin.bottom = map.next_value()?,
                        "left" => margin.left = map.next_value()?,
                        _ => {
                            let _ = map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(margin)
            }
        }
        deserializer.deserialize_any(MarginVisitor)
    }
}
