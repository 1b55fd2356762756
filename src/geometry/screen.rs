use crate::errors::{ScreenBridgeError, ScreenBridgeResult};
use crate::geometry::types::ScreenBounds;

/// Reports the primary display size. Implementations must query on every
/// call; resolution changes are picked up without restarting.
pub trait ScreenBoundsProvider: Send + Sync {
    fn screen_bounds(&self) -> ScreenBridgeResult<ScreenBounds>;
}

/// Primary monitor as reported by `xcap`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrimaryMonitor;

impl ScreenBoundsProvider for PrimaryMonitor {
    fn screen_bounds(&self) -> ScreenBridgeResult<ScreenBounds> {
        let monitors = xcap::Monitor::all()
            .map_err(|e| ScreenBridgeError::Screen(format!("enumerate monitors: {e}")))?;

        let primary = monitors
            .iter()
            .find(|m| m.is_primary())
            .or_else(|| monitors.first())
            .ok_or_else(|| ScreenBridgeError::Screen("no monitor attached".into()))?;

        let bounds = ScreenBounds::new(primary.width(), primary.height());
        tracing::trace!(width = bounds.width, height = bounds.height, "primary screen bounds");
        Ok(bounds)
    }
}

/// Fixed display size, for headless environments and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedScreen(pub ScreenBounds);

impl FixedScreen {
    pub fn new(width: u32, height: u32) -> Self {
        Self(ScreenBounds::new(width, height))
    }
}

impl ScreenBoundsProvider for FixedScreen {
    fn screen_bounds(&self) -> ScreenBridgeResult<ScreenBounds> {
        Ok(self.0)
    }
}
