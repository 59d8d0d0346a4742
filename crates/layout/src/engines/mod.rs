//! The five layout engines and the static kind → engine registry.

pub mod canvas;
pub mod flex;
pub mod grid;
pub mod overlay;
pub mod uniform_grid;

use crate::interface::LayoutEngine;
use crate::node_kind::ContainerKind;

pub use self::canvas::CanvasAnchorLayoutEngine;
pub use self::flex::FlexLayoutEngine;
pub use self::grid::GridLayoutEngine;
pub use self::overlay::OverlayAbsoluteLayoutEngine;
pub use self::uniform_grid::UniformGridLayoutEngine;

/// Returns the engine responsible for `kind`.
pub fn engine_for(kind: ContainerKind) -> &'static dyn LayoutEngine {
    match kind {
        ContainerKind::Flex => &FlexLayoutEngine,
        ContainerKind::Grid => &GridLayoutEngine,
        ContainerKind::Canvas => &CanvasAnchorLayoutEngine,
        ContainerKind::Overlay => &OverlayAbsoluteLayoutEngine,
        ContainerKind::UniformGrid => &UniformGridLayoutEngine,
    }
}
