use crate::LayoutError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Delay between two size checks of an absolutely positioned overlay child
    /// whose parent or own pixel size is not known yet.
    ///
    /// Defaults to `100`.
    pub overlay_retry_delay_ms: u64,
    /// Number of size checks (including the first, synchronous one) before an
    /// absolutely positioned overlay child is left unpositioned.
    ///
    /// Defaults to `10`.
    pub overlay_max_attempts: u32,
    /// Font size used for `em` grid tracks when the container style has none.
    ///
    /// Defaults to `16.0`.
    pub default_font_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            overlay_retry_delay_ms: 100,
            overlay_max_attempts: 10,
            default_font_size: 16.0,
        }
    }
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        serde_json::from_str(json).map_err(|e| LayoutError::Config(e.to_string()))
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.overlay_retry_delay_ms)
    }
}
