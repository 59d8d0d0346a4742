use trellis_style::StyleDescriptor;

/// The layout primitive a container emulates.
///
/// Selected once per container by [`ContainerKind::resolve`] and used as the
/// key of the static engine registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Flex,
    Grid,
    Canvas,
    Overlay,
    UniformGrid,
}

/// Element tags whose layout is decided by their style rather than their name.
const GENERIC_TAGS: &[&str] = &[
    "div", "view", "span", "section", "container", "box", "panel",
];

impl ContainerKind {
    /// Resolves the kind of container an element creates.
    ///
    /// Explicit layout tags map directly; generic tags pick grid for
    /// `display: grid`, overlay for `position: relative`, flex otherwise.
    /// Returns `None` for elements that do not lay out children.
    pub fn resolve(tag: &str, style: &StyleDescriptor) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        match tag.as_str() {
            "canvas" => Some(ContainerKind::Canvas),
            "overlay" => Some(ContainerKind::Overlay),
            "uniformgrid" | "uniform-grid" => Some(ContainerKind::UniformGrid),
            "grid" => Some(ContainerKind::Grid),
            generic if GENERIC_TAGS.contains(&generic) => Some(Self::from_style(style)),
            _ => None,
        }
    }

    fn from_style(style: &StyleDescriptor) -> Self {
        let display = style.keyword("display");
        if matches!(display.as_deref(), Some("grid" | "inline-grid")) {
            return ContainerKind::Grid;
        }
        if style.keyword("position").as_deref() == Some("relative") {
            return ContainerKind::Overlay;
        }
        ContainerKind::Flex
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerKind::Flex => "Flex",
            ContainerKind::Grid => "Grid",
            ContainerKind::Canvas => "Canvas",
            ContainerKind::Overlay => "Overlay",
            ContainerKind::UniformGrid => "UniformGrid",
        }
    }
}
