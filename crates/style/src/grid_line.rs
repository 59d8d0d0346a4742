//! CSS grid-line syntax: `start / end`, `span N`, line numbers and area names.

use crate::descriptor::StyleValue;
use crate::parsers::ws;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{digit1, multispace1};
use nom::combinator::{all_consuming, map_res};
use nom::sequence::preceded;
use nom::{IResult, Parser};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridLine {
    Auto,
    /// 1-based line number; negative values count back from the last line.
    Line(i32),
    Span(u32),
    Named(String),
}

fn parse_span(input: &str) -> IResult<&str, u32> {
    all_consuming(ws(preceded(
        (tag_no_case("span"), multispace1),
        map_res(digit1, |d: &str| d.parse::<u32>()),
    )))
    .parse(input)
}

/// Reads one side of a placement. Unreadable input falls back to `auto`.
pub fn parse_grid_line(token: &str) -> GridLine {
    let token = token.trim();
    if token.is_empty() || token.eq_ignore_ascii_case("auto") {
        return GridLine::Auto;
    }
    if let Ok((_, span)) = parse_span(token) {
        return GridLine::Span(span.max(1));
    }
    if token.eq_ignore_ascii_case("span") {
        return GridLine::Span(1);
    }
    if let Ok(line) = token.parse::<i32>() {
        return if line == 0 {
            GridLine::Auto
        } else {
            GridLine::Line(line)
        };
    }
    if token
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return GridLine::Named(token.to_string());
    }
    GridLine::Auto
}

/// Reads a `"start / end"` pair. A missing side is `auto`.
pub fn parse_grid_line_pair(value: &StyleValue) -> (GridLine, GridLine) {
    match value {
        StyleValue::Number(n) => (line_from_number(*n), GridLine::Auto),
        StyleValue::Text(text) => match text.split_once('/') {
            Some((start, end)) => (parse_grid_line(start), parse_grid_line(end)),
            None => (parse_grid_line(text), GridLine::Auto),
        },
        StyleValue::Spacing(_) => (GridLine::Auto, GridLine::Auto),
    }
}

/// Reads a single placement side from a `...Start`/`...End` property.
pub fn parse_grid_line_value(value: &StyleValue) -> GridLine {
    match value {
        StyleValue::Number(n) => line_from_number(*n),
        StyleValue::Text(text) => parse_grid_line(text),
        StyleValue::Spacing(_) => GridLine::Auto,
    }
}

/// Splits a `gridArea` value into its slash-separated sides.
pub fn parse_grid_area(value: &StyleValue) -> Vec<GridLine> {
    match value {
        StyleValue::Text(text) => text.split('/').map(parse_grid_line).collect(),
        other => vec![parse_grid_line_value(other)],
    }
}

fn line_from_number(n: f32) -> GridLine {
    let line = n.trunc() as i32;
    if line == 0 {
        GridLine::Auto
    } else {
        GridLine::Line(line)
    }
}
