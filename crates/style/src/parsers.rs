//! Low-level nom parser functions for CSS-like style values.
//!
//! This module provides composable parser functions for numbers, lengths and
//! length lists, plus the property dispatcher used by inline declarations.

use crate::descriptor::{StyleDescriptor, StyleValue};
use crate::units::{Length, LengthUnit};
use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, digit1, multispace0, multispace1};
use nom::combinator::{map, map_res, opt, recognize, value};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair};
use nom::{IResult, Parser};
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },

    #[error("Float parse error: {0}")]
    FloatParse(String),

    #[error("Invalid style JSON: {0}")]
    Json(String),
}

// --- Helper Parsers ---

pub(crate) fn ws<'a, O, F>(
    inner: F,
) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parses a signed decimal number such as `-12`, `0.5` or `.25`.
pub fn parse_f32(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize(pair(
            opt(alt((char('+'), char('-')))),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit1)))),
                recognize(pair(char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

// --- Unit & Length Parsers ---

fn parse_unit(input: &str) -> IResult<&str, LengthUnit> {
    alt((
        value(LengthUnit::Px, tag_no_case("px")),
        value(LengthUnit::Pt, tag_no_case("pt")),
        value(LengthUnit::Rem, tag_no_case("rem")),
        value(LengthUnit::Em, tag_no_case("em")),
        value(LengthUnit::Vw, tag_no_case("vw")),
        value(LengthUnit::Vh, tag_no_case("vh")),
        value(LengthUnit::Fr, tag_no_case("fr")),
        value(LengthUnit::Percent, char('%')),
    ))
    .parse(input)
}

/// Parses a length (`12px`, `1.5em`, `50%`, `2fr`, `auto`). A bare number is pixels.
pub fn parse_length(input: &str) -> IResult<&str, Length> {
    alt((
        value(Length::Auto, tag_no_case("auto")),
        map(pair(parse_f32, opt(parse_unit)), |(amount, unit)| {
            Length::Value(amount, unit.unwrap_or(LengthUnit::Px))
        }),
    ))
    .parse(input)
}

/// Parses a whitespace separated list of lengths (`"10px 20%"`).
pub fn parse_length_list(input: &str) -> IResult<&str, Vec<Length>> {
    separated_list1(multispace1, parse_length).parse(input)
}

/// Parses a ratio (`16/9`, `16 / 9`, `1.5`).
pub fn parse_ratio(input: &str) -> IResult<&str, f32> {
    map(
        pair(parse_f32, opt(pair(ws(char('/')), parse_f32))),
        |(numerator, denominator)| match denominator {
            Some((_, d)) if d != 0.0 => numerator / d,
            Some(_) => 0.0,
            None => numerator,
        },
    )
    .parse(input)
}

/// Helper to run a nom parser and convert its result to a `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, F>(parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: Fn(&'a str) -> IResult<&'a str, T>,
{
    match parser(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}

/// Converts `flex-direction` to `flexDirection`. camelCase input is returned unchanged.
pub fn kebab_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.trim().chars() {
        if c == '-' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

// --- High-level Style Application Functions ---

/// Applies a single declaration to a `StyleDescriptor`.
///
/// Purely numeric values are stored as numbers; everything else is kept as
/// text for the engines to interpret. Unknown properties are ignored.
pub fn apply_style_property(
    style: &mut StyleDescriptor,
    attr_name: &str,
    value: &str,
) -> Result<(), StyleParseError> {
    let name = kebab_to_camel(attr_name);
    let value = value.trim();
    if value.is_empty() {
        return Err(StyleParseError::InvalidValue {
            property: name,
            value: value.to_string(),
        });
    }

    let parsed = match value.parse::<f32>() {
        Ok(number) => StyleValue::Number(number),
        Err(_) => StyleValue::Text(value.to_string()),
    };
    // Not a layout property, ignore.
    let _ = style.set(&name, parsed);
    Ok(())
}
