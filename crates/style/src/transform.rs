//! Translation extracted from `transform` and the standalone translate properties.
//!
//! Only the translation part of a transform matters for layout; rotations and
//! scales are skipped. Anything unreadable degrades to the identity.

use crate::descriptor::{StyleDescriptor, StyleValue};
use crate::parsers::{run_parser, ws};
use crate::units::{Length, UnitResolver};
use nom::bytes::complete::{take_until, take_while1};
use nom::character::complete::char;
use nom::multi::many1;
use nom::sequence::delimited;
use nom::{IResult, Parser};
use trellis_types::{Size, Vector2};

/// Accumulated translation per axis, kept unresolved until a reference size is known.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Translation {
    pub x: Vec<Length>,
    pub y: Vec<Length>,
}

impl Translation {
    pub fn is_identity(&self) -> bool {
        self.x.is_empty() && self.y.is_empty()
    }

    fn extend(&mut self, other: Translation) {
        self.x.extend(other.x);
        self.y.extend(other.y);
    }

    /// Resolves to pixels; percentages are relative to `reference` (the element's own box).
    pub fn resolve(
        &self,
        units: &dyn UnitResolver,
        style: &StyleDescriptor,
        reference: Size,
    ) -> Vector2 {
        let sum = |lengths: &[Length], extent: f32| -> f32 {
            lengths
                .iter()
                .map(|l| units.resolve_length(*l, style, Some(extent)))
                .sum()
        };
        Vector2::new(
            sum(&self.x, reference.width),
            sum(&self.y, reference.height),
        )
    }

    /// Collects the translation of a style from `transform`, `translate`,
    /// `translateX` and `translateY`.
    pub fn from_style(style: &StyleDescriptor) -> Translation {
        let mut translation = Translation::default();
        if let Some(value) = style.transform.as_ref() {
            translation.extend(parse_transform_translation(&value.to_string()));
        }
        if let Some(value) = style.translate.as_ref() {
            translation.extend(parse_translate(value));
        }
        if let Some(x) = style.translate_x.as_ref().and_then(single_length) {
            translation.x.push(x);
        }
        if let Some(y) = style.translate_y.as_ref().and_then(single_length) {
            translation.y.push(y);
        }
        translation
    }
}

fn single_length(value: &StyleValue) -> Option<Length> {
    match value {
        StyleValue::Number(n) => Some(Length::px(*n)),
        StyleValue::Text(text) => Length::parse(text),
        StyleValue::Spacing(_) => None,
    }
}

fn transform_function(input: &str) -> IResult<&str, (&str, &str)> {
    ws((
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-'),
        delimited(ws(char('(')), take_until(")"), char(')')),
    ))
    .parse(input)
}

fn transform_list(input: &str) -> IResult<&str, Vec<(&str, &str)>> {
    many1(transform_function).parse(input)
}

fn arguments(args: &str) -> Option<Vec<Length>> {
    args.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(Length::parse)
        .collect()
}

/// Parses the translation functions of a `transform` value.
pub fn parse_transform_translation(value: &str) -> Translation {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return Translation::default();
    }
    let Ok(functions) = run_parser(transform_list, value) else {
        return Translation::default();
    };

    let mut translation = Translation::default();
    for (name, args) in functions {
        let name = name.to_ascii_lowercase();
        if !name.starts_with("translate") {
            continue;
        }
        let Some(args) = arguments(args) else {
            return Translation::default();
        };
        match (name.as_str(), args.as_slice()) {
            ("translate", [x]) => translation.x.push(*x),
            ("translate", [x, y]) | ("translate3d", [x, y, _]) => {
                translation.x.push(*x);
                translation.y.push(*y);
            }
            ("translatex", [x]) => translation.x.push(*x),
            ("translatey", [y]) => translation.y.push(*y),
            ("translate" | "translate3d" | "translatex" | "translatey", _) => {
                return Translation::default();
            }
            _ => {}
        }
    }
    translation
}

/// Parses the standalone `translate` property (`"x"`, `"x y"` or `"x y z"`).
pub fn parse_translate(value: &StyleValue) -> Translation {
    match value {
        StyleValue::Number(n) => Translation {
            x: vec![Length::px(*n)],
            y: Vec::new(),
        },
        StyleValue::Text(text) => {
            if text.trim().eq_ignore_ascii_case("none") {
                return Translation::default();
            }
            match arguments(text).as_deref() {
                Some([x]) => Translation {
                    x: vec![*x],
                    y: Vec::new(),
                },
                Some([x, y]) | Some([x, y, _]) => Translation {
                    x: vec![*x],
                    y: vec![*y],
                },
                _ => Translation::default(),
            }
        }
        StyleValue::Spacing(_) => Translation::default(),
    }
}
