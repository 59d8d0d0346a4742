pub mod align;
pub mod descriptor;
pub mod grid_line;
pub mod parsers;
pub mod tracks;
pub mod transform;
pub mod units;

pub use align::AlignKeyword;
pub use descriptor::{StyleDescriptor, StyleValue};
pub use grid_line::GridLine;
pub use parsers::StyleParseError;
pub use tracks::{GridTrackDefinition, TrackType};
pub use transform::Translation;
pub use units::{CssUnits, Length, LengthUnit, UnitResolver};
