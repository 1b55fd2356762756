use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ScreenBridgeResult;

/// Arguments for a page script, in either of the two calling conventions a
/// rendering binding may use.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptArgs {
    /// No arguments.
    None,
    /// A single structured record, passed as the script's only argument.
    Structured(serde_json::Value),
    /// A positional argument list.
    Positional(Vec<serde_json::Value>),
}

/// Which [`ScriptArgs`] form the locator emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallConvention {
    #[default]
    Structured,
    Positional,
}

/// Narrow capability over a live rendering surface: evaluate a script against
/// the current page state and hand back the structured result.
///
/// Any rendering binding (CDP, WebDriver, an embedded engine) can satisfy this.
/// Implementations return `Err` when the page is gone or the evaluation throws;
/// a script returning `null` is `Ok(Value::Null)`.
#[async_trait]
pub trait PageEvaluator: Send + Sync {
    async fn evaluate(&self, script: &str, args: ScriptArgs) -> ScreenBridgeResult<serde_json::Value>;
}
