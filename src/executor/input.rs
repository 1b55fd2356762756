// OS-level input backend. Every call is synchronous and returns once the
// event has been handed to the OS; delivery is not confirmed.
use enigo::{Axis, Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};

use crate::errors::{ScreenBridgeError, ScreenBridgeResult};
use crate::executor::text_input::KeyStroke;
use crate::geometry::types::ScreenPoint;

/// The process's single pointer and keyboard focus.
pub trait InputBackend {
    fn move_to(&mut self, point: ScreenPoint) -> ScreenBridgeResult<()>;

    /// Where the OS says the cursor is now.
    fn cursor_position(&self) -> ScreenBridgeResult<ScreenPoint>;

    /// Press and release the primary button at the current cursor position.
    fn primary_click(&mut self) -> ScreenBridgeResult<()>;

    fn key_stroke(&mut self, key: KeyStroke) -> ScreenBridgeResult<()>;

    /// Vertical wheel delta, same sign convention as
    /// [`PhysicalActuator::scroll`](crate::executor::actuator::PhysicalActuator::scroll).
    fn scroll(&mut self, amount: i32) -> ScreenBridgeResult<()>;
}

pub struct EnigoBackend {
    enigo: Enigo,
}

impl EnigoBackend {
    pub fn new() -> ScreenBridgeResult<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| ScreenBridgeError::Input(format!("Failed to initialize input backend: {e}")))?;
        Ok(Self { enigo })
    }
}

impl InputBackend for EnigoBackend {
    fn move_to(&mut self, point: ScreenPoint) -> ScreenBridgeResult<()> {
        self.enigo
            .move_mouse(point.x, point.y, Coordinate::Abs)
            .map_err(|e| ScreenBridgeError::Input(format!("Failed to move mouse to {point}: {e}")))
    }

    fn cursor_position(&self) -> ScreenBridgeResult<ScreenPoint> {
        self.enigo
            .location()
            .map(ScreenPoint::from)
            .map_err(|e| ScreenBridgeError::Input(format!("Failed to read cursor position: {e}")))
    }

    fn primary_click(&mut self) -> ScreenBridgeResult<()> {
        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(|e| ScreenBridgeError::Input(format!("Failed to click: {e}")))
    }

    fn key_stroke(&mut self, key: KeyStroke) -> ScreenBridgeResult<()> {
        let os_key = match key {
            KeyStroke::Char(c) => Key::Unicode(c),
            KeyStroke::Return => Key::Return,
            KeyStroke::Tab => Key::Tab,
        };
        self.enigo
            .key(os_key, Direction::Click)
            .map_err(|e| ScreenBridgeError::Input(format!("Failed to send key {key:?}: {e}")))
    }

    fn scroll(&mut self, amount: i32) -> ScreenBridgeResult<()> {
        // enigo: positive = down; ours: positive = up
        self.enigo
            .scroll(-amount, Axis::Vertical)
            .map_err(|e| ScreenBridgeError::Input(format!("Failed to scroll: {e}")))
    }
}
