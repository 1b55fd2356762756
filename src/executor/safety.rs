// Physical-input gate. Anything not permitted here goes through the caller's
// synthetic (in-page) path instead.
use crate::config::PhysicalInputConfig;

/// Returns true if `action` should be attempted with physical input.
pub fn permits_physical(action: &str, config: &PhysicalInputConfig) -> bool {
    config.enabled && config.actions.iter().any(|a| a == action)
}
