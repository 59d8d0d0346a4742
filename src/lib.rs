//! Style-to-layout compilation for retained-mode widget trees.
//!
//! The member crates are re-exported under short names; [`prelude`] pulls in
//! what a tree driver needs to create, update and fill containers.

pub use trellis_layout as layout;
pub use trellis_style as style;
pub use trellis_types as types;

pub use trellis_layout::{
    Container, ContainerDispatcher, ContainerKind, DecoratedContainer, LayoutConfig,
    LayoutContext, LayoutError, Slot,
};
pub use trellis_style::{StyleDescriptor, StyleParseError, StyleValue};

pub mod prelude {
    pub use trellis_layout::engines::{
        CanvasAnchorLayoutEngine, FlexLayoutEngine, GridLayoutEngine,
        OverlayAbsoluteLayoutEngine, UniformGridLayoutEngine, engine_for,
    };
    pub use trellis_layout::{
        Container, ContainerDispatcher, ContainerKind, DecoratedContainer, HostMetrics,
        LayoutConfig, LayoutContext, LayoutEngine, LayoutError, QueuedScheduler,
        RetryScheduler, RetryTicket, Slot,
    };
    pub use trellis_style::{CssUnits, StyleDescriptor, StyleValue, UnitResolver};
    pub use trellis_types::{
        Anchors, HorizontalAlignment, Margin, Size, SizeRule, Vector2, VerticalAlignment,
        WidgetId,
    };
}
