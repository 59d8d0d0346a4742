use thiserror::Error;
use trellis_types::WidgetId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("State mismatch: Expected state for {0}, got {1}.")]
    StateMismatch(&'static str, &'static str),
    #[error("Element '{0}' does not create a layout container.")]
    UnknownContainerTag(String),
    #[error("Child {0} already has a slot in this container.")]
    DuplicateChild(WidgetId),
    #[error("Invalid layout configuration: {0}")]
    Config(String),
}

pub mod config;
pub mod container;
pub mod decoration;
pub mod dispatcher;
pub mod engines;
pub mod interface;
pub mod node_kind;
pub mod slot;
pub mod util;

pub use self::config::LayoutConfig;
pub use self::container::{
    Container, EngineState, GridPanel, LayoutNode, Panel, StackPanel, UniformGridPanel,
    WrapPanel,
};
pub use self::decoration::{BackgroundWrapper, ScaleBoxWrapper, SizeBoxWrapper, WrapperSlot};
pub use self::dispatcher::{ContainerDispatcher, DecoratedContainer};
pub use self::engines::engine_for;
pub use self::interface::{
    HostMetrics, LayoutContext, LayoutEngine, QueuedScheduler, RetryScheduler, RetryTicket,
};
pub use self::node_kind::ContainerKind;
pub use self::slot::{
    BoxSlot, CanvasSlot, GridSlot, OverlaySlot, Slot, UniformGridSlot, WrapSlot,
};

#[cfg(test)]
mod test_utils;
