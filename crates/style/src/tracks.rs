//! Grid track templates: tokenizing, `repeat()` expansion and classification.

use crate::descriptor::StyleDescriptor;
use crate::units::{Length, LengthUnit, UnitResolver};
use serde::{Deserialize, Serialize};

/// Upper bound for a single `repeat()` count.
const MAX_REPEAT: usize = 1000;
/// Upper bound for the number of tracks one template expands to.
const MAX_TRACKS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    Fr,
    Px,
    Auto,
}

/// One row or column of a compiled template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridTrackDefinition {
    #[serde(rename = "type")]
    pub kind: TrackType,
    pub value: f32,
}

impl GridTrackDefinition {
    pub fn fr(value: f32) -> Self {
        Self {
            kind: TrackType::Fr,
            value,
        }
    }

    pub fn px(value: f32) -> Self {
        Self {
            kind: TrackType::Px,
            value,
        }
    }

    pub fn auto() -> Self {
        Self {
            kind: TrackType::Auto,
            value: 0.0,
        }
    }

    pub fn is_auto(&self) -> bool {
        self.kind == TrackType::Auto
    }
}

/// Splits a template into top-level tokens, keeping parenthesised groups whole.
///
/// `"repeat(2, minmax(10px, 1fr)) 20px"` yields two tokens.
pub fn split_top_level(input: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;

    for (i, c) in input.char_indices() {
        match c {
            '(' => {
                depth += 1;
                start.get_or_insert(i);
            }
            ')' => {
                depth = depth.saturating_sub(1);
            }
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    tokens.push(&input[s..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    if let Some(s) = start {
        tokens.push(&input[s..]);
    }
    tokens
}

/// Splits the arguments of a function call on top-level commas.
fn split_arguments(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut last = 0usize;
    for (i, c) in args.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(args[last..i].trim());
                last = i + 1;
            }
            _ => {}
        }
    }
    parts.push(args[last..].trim());
    parts
}

/// Returns the argument list of `name(...)` when `token` is such a call.
fn function_arguments<'a>(token: &'a str, name: &str) -> Option<&'a str> {
    let open = token.find('(')?;
    if !token[..open].trim().eq_ignore_ascii_case(name) || !token.ends_with(')') {
        return None;
    }
    Some(&token[open + 1..token.len() - 1])
}

/// Tokenizes a template preserving order, expanding `repeat(n, tokens)` inline.
///
/// `repeat()` does not nest; an inner `repeat(...)` stays a single token and
/// later classifies as `1fr`. Expansion stops at `MAX_TRACKS` tokens.
pub fn tokenize_template(template: &str) -> Vec<String> {
    let mut out = Vec::new();
    for token in split_top_level(template) {
        if out.len() >= MAX_TRACKS {
            break;
        }
        let Some(args) = function_arguments(token, "repeat") else {
            out.push(token.to_string());
            continue;
        };
        let parts = split_arguments(args);
        let count = parts
            .first()
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(1)
            .clamp(1, MAX_REPEAT);
        let inner: Vec<&str> = parts
            .get(1..)
            .unwrap_or_default()
            .iter()
            .flat_map(|part| split_top_level(*part))
            .collect();
        if inner.is_empty() {
            continue;
        }
        let room = MAX_TRACKS - out.len();
        out.extend(
            inner
                .iter()
                .cycle()
                .take((count * inner.len()).min(room))
                .map(|t| t.to_string()),
        );
    }
    out
}

/// What relative track units resolve against.
#[derive(Clone, Copy)]
pub struct TrackUnits<'a> {
    /// Font size of the grid container, used for `em`.
    pub font_size: f32,
    pub units: &'a dyn UnitResolver,
    pub style: &'a StyleDescriptor,
}

/// The track-token collaborator: classifies one token as `fr`, pixels, or `auto`.
///
/// Unreadable tokens degrade to `1fr`.
pub fn classify_track_token(token: &str, units: &TrackUnits<'_>) -> GridTrackDefinition {
    let token = token.trim();
    let lowered = token.to_ascii_lowercase();

    if matches!(lowered.as_str(), "auto" | "min-content" | "max-content")
        || function_arguments(token, "fit-content").is_some()
    {
        return GridTrackDefinition::auto();
    }
    if let Some(args) = function_arguments(token, "minmax") {
        let parts = split_arguments(args);
        if let Some(max) = parts.last() {
            return classify_track_token(max, units);
        }
    }

    match Length::parse(token) {
        Some(Length::Auto) => GridTrackDefinition::auto(),
        Some(Length::Value(v, unit)) => match unit {
            LengthUnit::Fr => GridTrackDefinition::fr(v),
            LengthUnit::Px => GridTrackDefinition::px(v),
            LengthUnit::Em => GridTrackDefinition::px(v * units.font_size),
            LengthUnit::Percent => GridTrackDefinition::fr(v / 100.0),
            LengthUnit::Pt | LengthUnit::Rem | LengthUnit::Vw | LengthUnit::Vh => {
                GridTrackDefinition::px(units.units.resolve_length(
                    Length::Value(v, unit),
                    units.style,
                    None,
                ))
            }
        },
        None => GridTrackDefinition::fr(1.0),
    }
}

/// Compiles a template string into its ordered track definitions.
///
/// `none` and the empty string compile to no tracks.
pub fn parse_track_list(template: &str, units: &TrackUnits<'_>) -> Vec<GridTrackDefinition> {
    let trimmed = template.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Vec::new();
    }
    tokenize_template(trimmed)
        .iter()
        .map(|token| classify_track_token(token, units))
        .collect()
}

/// Splits a `gridTemplate` shorthand `"<rows> / <columns>"`.
pub fn split_template_shorthand(value: &str) -> (Option<&str>, Option<&str>) {
    fn non_empty(s: &str) -> Option<&str> {
        let s = s.trim();
        (!s.is_empty()).then_some(s)
    }
    match value.split_once('/') {
        Some((rows, columns)) => (non_empty(rows), non_empty(columns)),
        None => (non_empty(value), None),
    }
}

/// Parses `grid-template-areas` (`"a a" "b c"`) into rows of cell names.
///
/// Input without quotes is read as a single row.
pub fn parse_template_areas(value: &str) -> Vec<Vec<String>> {
    let rows: Vec<&str> = if value.contains('"') || value.contains('\'') {
        value
            .split(['"', '\''])
            .skip(1)
            .step_by(2)
            .collect()
    } else {
        vec![value]
    };
    rows.into_iter()
        .map(|row| row.split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty())
        .collect()
}
