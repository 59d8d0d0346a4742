//! Alignment keywords shared by flex, grid and overlay placement.
use serde::{Deserialize, Serialize};

/// A normalised alignment keyword, independent of axis.
///
/// Note: `baseline` alignment is not supported and is treated as `start`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AlignKeyword {
    Start,
    Center,
    End,
    Stretch,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl AlignKeyword {
    /// Parses a CSS alignment token. `auto` and unknown tokens yield `None`.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim().to_ascii_lowercase();
        let token = token
            .strip_prefix("safe ")
            .or_else(|| token.strip_prefix("unsafe "))
            .unwrap_or(&token)
            .trim();
        match token {
            "start" | "flex-start" | "self-start" | "left" | "top" | "baseline"
            | "first baseline" => Some(AlignKeyword::Start),
            "center" | "middle" => Some(AlignKeyword::Center),
            "end" | "flex-end" | "self-end" | "right" | "bottom" | "last baseline" => {
                Some(AlignKeyword::End)
            }
            "stretch" | "fill" | "normal" => Some(AlignKeyword::Stretch),
            "space-between" => Some(AlignKeyword::SpaceBetween),
            "space-around" => Some(AlignKeyword::SpaceAround),
            "space-evenly" => Some(AlignKeyword::SpaceEvenly),
            _ => None,
        }
    }

    /// Splits a `place-*` shorthand into its (align, justify) keywords.
    ///
    /// A single token applies to both axes.
    pub fn parse_pair(value: &str) -> (Option<Self>, Option<Self>) {
        let mut tokens = value.split_whitespace();
        let first = tokens.next().and_then(Self::parse);
        let second = match tokens.next() {
            Some(token) => Self::parse(token),
            None => first,
        };
        (first, second)
    }

    pub fn is_distributed(self) -> bool {
        matches!(
            self,
            AlignKeyword::SpaceBetween | AlignKeyword::SpaceAround | AlignKeyword::SpaceEvenly
        )
    }
}
