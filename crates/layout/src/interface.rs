use crate::config::LayoutConfig;
use crate::container::Container;
use crate::node_kind::ContainerKind;
use crate::LayoutError;
use std::collections::VecDeque;
use std::time::Duration;
use trellis_style::{StyleDescriptor, UnitResolver};
use trellis_types::{Size, WidgetId};

// --- Host collaborators ---

/// Read access to the host's measured widget sizes.
pub trait HostMetrics {
    /// Current on-screen pixel size of `widget`; zero while it has not been laid out.
    fn pixel_size(&self, widget: WidgetId) -> Size;
}

/// Identifies one pending size check of an overlay child.
///
/// The generation doubles as a cancellation token: removing, re-appending or
/// restarting a child invalidates every ticket issued before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetryTicket {
    pub container: WidgetId,
    pub child: WidgetId,
    pub generation: u64,
}

/// Timer abstraction used for deferred re-invocation.
pub trait RetryScheduler {
    /// Requests that `ticket` be handed back to the dispatcher after `delay`.
    fn schedule(&mut self, delay: Duration, ticket: RetryTicket);
}

/// FIFO scheduler; the host drains it from its own timer or frame loop.
#[derive(Debug, Default)]
pub struct QueuedScheduler {
    queue: VecDeque<(Duration, RetryTicket)>,
}

impl QueuedScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pop(&mut self) -> Option<(Duration, RetryTicket)> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl RetryScheduler for QueuedScheduler {
    fn schedule(&mut self, delay: Duration, ticket: RetryTicket) {
        self.queue.push_back((delay, ticket));
    }
}

// --- Context ---

/// Collaborators shared by every engine call.
pub struct LayoutContext<'a> {
    pub units: &'a dyn UnitResolver,
    pub metrics: &'a dyn HostMetrics,
    pub scheduler: &'a mut dyn RetryScheduler,
    pub config: &'a LayoutConfig,
}

impl<'a> LayoutContext<'a> {
    pub fn new(
        units: &'a dyn UnitResolver,
        metrics: &'a dyn HostMetrics,
        scheduler: &'a mut dyn RetryScheduler,
        config: &'a LayoutConfig,
    ) -> Self {
        Self {
            units,
            metrics,
            scheduler,
            config,
        }
    }
}

// --- Engine interface ---

/// One layout primitive emulation.
///
/// Engines are stateless; everything they remember lives in the
/// [`Container`] they created. Data problems never surface as errors, only
/// structural misuse does (e.g. a container created by another engine).
pub trait LayoutEngine: Send + Sync {
    fn kind(&self) -> ContainerKind;

    fn create_container(
        &self,
        widget: WidgetId,
        style: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Container;

    fn update(
        &self,
        container: &mut Container,
        old: &StyleDescriptor,
        changed: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError>;

    fn append_child(
        &self,
        container: &mut Container,
        child: WidgetId,
        style: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError>;

    /// Merges `changed` into the child's stored style and re-places it in its existing slot.
    fn update_child(
        &self,
        container: &mut Container,
        child: WidgetId,
        changed: &StyleDescriptor,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError>;

    fn remove_child(
        &self,
        container: &mut Container,
        child: WidgetId,
        _ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        container.expect_kind(self.kind())?;
        if container.detach(child).is_none() {
            log::debug!("remove_child: {} has no slot in {}", child, container.widget());
        }
        Ok(())
    }

    /// Delivers a fired retry ticket. Only engines that schedule retries care.
    fn resume(
        &self,
        container: &mut Container,
        _ticket: RetryTicket,
        _ctx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        container.expect_kind(self.kind())
    }
}
