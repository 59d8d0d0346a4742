//! Opaque handles for host widgets.
//!
//! The layout engines never own widgets. They only refer to them through a
//! `WidgetId` handed out by the host tree, which keeps ownership and
//! lifetimes on the host side.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A handle to a widget living in the host tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WidgetId(pub u64);

impl WidgetId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for WidgetId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
