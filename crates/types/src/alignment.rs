//! Alignment, flow and sizing directives understood by the host panels.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    #[default]
    Fill,
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlignment {
    #[default]
    Fill,
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum FlowDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Size rule of a stack slot: measure content, or take a proportion of the free space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum SizeRule {
    #[default]
    Auto,
    Fill(f32),
}

/// Stretch mode of a scale wrapper.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Stretch {
    None,
    Fill,
    #[default]
    ScaleToFit,
    ScaleToFitX,
    ScaleToFitY,
    ScaleToFill,
    UserSpecified,
}
