use crate::config::LayoutConfig;
use crate::container::Container;
use crate::interface::{HostMetrics, LayoutContext, LayoutEngine, QueuedScheduler};
use std::cell::RefCell;
use std::collections::HashMap;
use trellis_style::{CssUnits, StyleDescriptor};
use trellis_types::{Size, WidgetId};

/// Pixel sizes reported to the overlay engine; unknown widgets measure zero.
#[derive(Debug, Default)]
pub struct ScriptedMetrics {
    sizes: RefCell<HashMap<WidgetId, Size>>,
}

impl ScriptedMetrics {
    pub fn set(&self, widget: WidgetId, size: Size) {
        self.sizes.borrow_mut().insert(widget, size);
    }
}

impl HostMetrics for ScriptedMetrics {
    fn pixel_size(&self, widget: WidgetId) -> Size {
        self.sizes
            .borrow()
            .get(&widget)
            .copied()
            .unwrap_or_default()
    }
}

/// Owns every collaborator an engine call needs. Containers get ids from 1000 up.
pub struct TestHost {
    pub units: CssUnits,
    pub metrics: ScriptedMetrics,
    pub scheduler: QueuedScheduler,
    pub config: LayoutConfig,
    next_container: u64,
}

impl TestHost {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            units: CssUnits::default(),
            metrics: ScriptedMetrics::default(),
            scheduler: QueuedScheduler::new(),
            config: LayoutConfig::default(),
            next_container: 1000,
        }
    }

    pub fn ctx(&mut self) -> LayoutContext<'_> {
        LayoutContext::new(&self.units, &self.metrics, &mut self.scheduler, &self.config)
    }

    pub fn create(&mut self, engine: &dyn LayoutEngine, style: &StyleDescriptor) -> Container {
        let widget = WidgetId(self.next_container);
        self.next_container += 1;
        engine.create_container(widget, style, &mut self.ctx())
    }

    pub fn append(
        &mut self,
        engine: &dyn LayoutEngine,
        container: &mut Container,
        child: u64,
        style: &StyleDescriptor,
    ) {
        engine
            .append_child(container, WidgetId(child), style, &mut self.ctx())
            .unwrap();
    }

    pub fn update(
        &mut self,
        engine: &dyn LayoutEngine,
        container: &mut Container,
        old: &StyleDescriptor,
        changed: &StyleDescriptor,
    ) {
        engine
            .update(container, old, changed, &mut self.ctx())
            .unwrap();
    }

    pub fn remove(&mut self, engine: &dyn LayoutEngine, container: &mut Container, child: u64) {
        engine
            .remove_child(container, WidgetId(child), &mut self.ctx())
            .unwrap();
    }

    /// Delivers queued retry tickets until none are left; returns how many were delivered.
    pub fn resume_all(&mut self, engine: &dyn LayoutEngine, container: &mut Container) -> usize {
        let mut delivered = 0;
        while let Some((_, ticket)) = self.scheduler.pop() {
            engine.resume(container, ticket, &mut self.ctx()).unwrap();
            delivered += 1;
        }
        delivered
    }
}
