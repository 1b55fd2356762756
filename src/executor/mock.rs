use std::sync::{Arc, OnceLock, RwLock};

use crate::geometry::types::ScreenPoint;

static GLOBAL: OnceLock<MockOverride> = OnceLock::new();

/// Fixed answer for coordinate resolution, for page-free testing.
///
/// While set, every resolution through a controller holding this handle
/// returns the stored point without touching the page or the calculator.
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockOverride {
    point: Arc<RwLock<Option<ScreenPoint>>>,
}

impl MockOverride {
    /// A fresh override not shared with anything else.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide override.
    pub fn global() -> MockOverride {
        GLOBAL.get_or_init(MockOverride::new).clone()
    }

    /// Pins resolution to `(x, y)` when both are present; otherwise clears.
    pub fn set(&self, x: Option<i32>, y: Option<i32>) {
        let next = match (x, y) {
            (Some(x), Some(y)) => Some(ScreenPoint::new(x, y)),
            _ => None,
        };
        tracing::debug!(mock = ?next, "mock coordinates updated");
        *self.point.write().unwrap_or_else(|e| e.into_inner()) = next;
    }

    pub fn clear(&self) {
        self.set(None, None);
    }

    pub fn get(&self) -> Option<ScreenPoint> {
        *self.point.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_active(&self) -> bool {
        self.get().is_some()
    }
}
