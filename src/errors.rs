use thiserror::Error;

use crate::geometry::types::{ScreenBounds, ScreenPoint};

#[derive(Debug, Error)]
pub enum ScreenBridgeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Element not found for locator: {locator}")]
    ElementNotFound { locator: String },

    #[error("Page query failed for locator {locator}: {message}")]
    Locator { locator: String, message: String },

    #[error("Calculated coordinates {point} are outside screen bounds {screen}{}", for_locator(.locator))]
    CoordinateOutOfBounds {
        point: ScreenPoint,
        screen: ScreenBounds,
        /// Element the point was computed for, once known.
        locator: Option<String>,
    },

    #[error("Cursor not at expected position. Expected {expected}, got {actual}{}", for_locator(.locator))]
    CursorMismatch {
        expected: ScreenPoint,
        actual: ScreenPoint,
        locator: Option<String>,
    },

    #[error("Input backend error: {0}")]
    Input(String),

    #[error("Screen query error: {0}")]
    Screen(String),

    #[error("Failsafe triggered: cursor parked at {0}")]
    FailsafeTriggered(ScreenPoint),

    #[error("Physical input not permitted for action '{action}'")]
    ActionNotPermitted { action: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl ScreenBridgeError {
    /// Wraps a failed page query with the locator it was issued for.
    pub fn locator(locator: impl Into<String>, message: impl ToString) -> Self {
        Self::Locator {
            locator: locator.into(),
            message: message.to_string(),
        }
    }

    /// Attaches the element locator to positional errors raised below the
    /// layer that knows it. Other variants pass through unchanged.
    pub fn with_locator(self, xpath: &str) -> Self {
        match self {
            Self::CoordinateOutOfBounds { point, screen, .. } => Self::CoordinateOutOfBounds {
                point,
                screen,
                locator: Some(xpath.to_string()),
            },
            Self::CursorMismatch { expected, actual, .. } => Self::CursorMismatch {
                expected,
                actual,
                locator: Some(xpath.to_string()),
            },
            other => other,
        }
    }
}

fn for_locator(locator: &Option<String>) -> String {
    locator
        .as_deref()
        .map(|l| format!(" for locator {l}"))
        .unwrap_or_default()
}

impl serde::Serialize for ScreenBridgeError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

pub type ScreenBridgeResult<T> = Result<T, ScreenBridgeError>;
