pub mod alignment;
pub mod anchors;
pub mod geometry;
pub mod ids;

pub use alignment::{
    FlowDirection, HorizontalAlignment, Orientation, SizeRule, Stretch, VerticalAlignment,
};
pub use anchors::Anchors;
pub use geometry::{Margin, Size, Vector2};
pub use ids::WidgetId;
