pub mod config;
pub mod errors;
pub mod executor;
pub mod geometry;
pub mod page;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::errors::{ScreenBridgeError, ScreenBridgeResult};
pub use crate::executor::actuator::PhysicalActuator;
pub use crate::executor::coordinator::{ClickOutcome, PhysicalInputController};
pub use crate::executor::mock::MockOverride;
pub use crate::geometry::types::{BrowserOffsets, ElementBounds, ScreenBounds, ScreenPoint, WindowBounds};
pub use crate::page::traits::{CallConvention, PageEvaluator, ScriptArgs};

/// Installs the global `tracing` subscriber. `RUST_LOG` wins over the default
/// `info` filter. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
