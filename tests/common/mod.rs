pub mod fixtures;

use std::cell::RefCell;
use std::collections::HashMap;
use trellis::prelude::*;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Host pixel sizes keyed by widget. Unknown widgets measure zero, like a
/// widget that has not been through a layout pass yet.
#[derive(Debug, Default)]
pub struct FakeMetrics {
    sizes: RefCell<HashMap<WidgetId, Size>>,
}

impl FakeMetrics {
    pub fn set(&self, widget: WidgetId, width: f32, height: f32) {
        self.sizes
            .borrow_mut()
            .insert(widget, Size::new(width, height));
    }
}

impl HostMetrics for FakeMetrics {
    fn pixel_size(&self, widget: WidgetId) -> Size {
        self.sizes.borrow().get(&widget).copied().unwrap_or_default()
    }
}

/// Collaborators for driving the dispatcher the way a tree reconciler would.
pub struct Harness {
    pub units: CssUnits,
    pub metrics: FakeMetrics,
    pub scheduler: QueuedScheduler,
    pub config: LayoutConfig,
    pub dispatcher: ContainerDispatcher,
}

impl Harness {
    pub fn new() -> Self {
        init_logging();
        Self {
            units: CssUnits::default(),
            metrics: FakeMetrics::default(),
            scheduler: QueuedScheduler::new(),
            config: LayoutConfig::default(),
            dispatcher: ContainerDispatcher::new(),
        }
    }

    pub fn ctx(&mut self) -> LayoutContext<'_> {
        LayoutContext::new(&self.units, &self.metrics, &mut self.scheduler, &self.config)
    }

    pub fn create(
        &mut self,
        tag: &str,
        widget: u64,
        style: &StyleDescriptor,
    ) -> Result<DecoratedContainer, LayoutError> {
        let dispatcher = self.dispatcher;
        dispatcher.create_container(tag, WidgetId(widget), style, &mut self.ctx())
    }

    pub fn append(
        &mut self,
        container: &mut DecoratedContainer,
        child: u64,
        style: &StyleDescriptor,
    ) -> Result<(), LayoutError> {
        let dispatcher = self.dispatcher;
        dispatcher.append_child(container, WidgetId(child), style, &mut self.ctx())
    }

    pub fn update(
        &mut self,
        container: &mut DecoratedContainer,
        old: &StyleDescriptor,
        changed: &StyleDescriptor,
    ) -> Result<(), LayoutError> {
        let dispatcher = self.dispatcher;
        dispatcher.update(container, old, changed, &mut self.ctx())
    }

    pub fn update_child(
        &mut self,
        container: &mut DecoratedContainer,
        child: u64,
        changed: &StyleDescriptor,
    ) -> Result<(), LayoutError> {
        let dispatcher = self.dispatcher;
        dispatcher.update_child(container, WidgetId(child), changed, &mut self.ctx())
    }

    pub fn remove(
        &mut self,
        container: &mut DecoratedContainer,
        child: u64,
    ) -> Result<(), LayoutError> {
        let dispatcher = self.dispatcher;
        dispatcher.remove_child(container, WidgetId(child), &mut self.ctx())
    }

    /// Fires every queued retry ticket, including ones scheduled while firing.
    pub fn fire_retries(&mut self, container: &mut DecoratedContainer) -> Result<usize, LayoutError> {
        let dispatcher = self.dispatcher;
        let mut fired = 0;
        while let Some((_, ticket)) = self.scheduler.pop() {
            dispatcher.resume(container, ticket, &mut self.ctx())?;
            fired += 1;
        }
        Ok(fired)
    }
}

pub fn slot(container: &DecoratedContainer, child: u64) -> &Slot {
    container
        .layout()
        .slot(WidgetId(child))
        .unwrap_or_else(|| panic!("no slot for child {}", child))
}
