// Test doubles for the page and the OS input device.
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::TimingConfig;
use crate::errors::{ScreenBridgeError, ScreenBridgeResult};
use crate::executor::input::InputBackend;
use crate::executor::text_input::KeyStroke;
use crate::geometry::screen::ScreenBoundsProvider;
use crate::geometry::types::{ElementBounds, ScreenBounds, ScreenPoint, WindowBounds};
use crate::page::scripts;
use crate::page::traits::{PageEvaluator, ScriptArgs};

pub fn instant_timing() -> TimingConfig {
    TimingConfig {
        move_duration_ms: 0,
        move_steps: 1,
        settle_delay_ms: 0,
        action_pause_ms: 0,
    }
}

/// Fails the test if the calculator asks for screen bounds.
pub struct PanickingScreen;

impl ScreenBoundsProvider for PanickingScreen {
    fn screen_bounds(&self) -> ScreenBridgeResult<ScreenBounds> {
        panic!("screen bounds queried without validation")
    }
}

pub struct FakeElement {
    xpath: String,
    bounds: ElementBounds,
}

impl FakeElement {
    pub fn new(xpath: &str, bounds: ElementBounds) -> Self {
        Self {
            xpath: xpath.to_string(),
            bounds,
        }
    }
}

/// Page with a fixed layout. `hits` maps a page point to the element chain
/// rendered there, topmost first.
pub struct FakePage {
    window: WindowBounds,
    elements: Vec<FakeElement>,
    hits: Vec<((i64, i64), Vec<String>)>,
    closed: bool,
    calls: Mutex<Vec<ScriptArgs>>,
}

impl FakePage {
    pub fn new(window: WindowBounds) -> Self {
        Self {
            window,
            elements: Vec::new(),
            hits: Vec::new(),
            closed: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_element(mut self, element: FakeElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_hit(mut self, x: i64, y: i64, chain: Vec<&str>) -> Self {
        self.hits.push(((x, y), chain.into_iter().map(String::from).collect()));
        self
    }

    /// Every evaluation fails as if the target page had gone away.
    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    pub fn calls(&self) -> Vec<ScriptArgs> {
        self.calls.lock().unwrap().clone()
    }

    fn knows(&self, xpath: &str) -> bool {
        self.elements.iter().any(|e| e.xpath == xpath)
            || self.hits.iter().any(|(_, chain)| chain.iter().any(|c| c == xpath))
    }
}

fn arg(args: &ScriptArgs, key: &str, position: usize) -> Value {
    match args {
        ScriptArgs::Structured(record) => record.get(key).cloned().unwrap_or(Value::Null),
        ScriptArgs::Positional(list) => list.get(position).cloned().unwrap_or(Value::Null),
        ScriptArgs::None => Value::Null,
    }
}

#[async_trait]
impl PageEvaluator for FakePage {
    async fn evaluate(&self, script: &str, args: ScriptArgs) -> ScreenBridgeResult<Value> {
        self.calls.lock().unwrap().push(args.clone());
        if self.closed {
            return Err(ScreenBridgeError::locator("page", "Target page, context or browser has been closed"));
        }

        if script == scripts::WINDOW_ORIGIN {
            return Ok(json!({ "x": self.window.x, "y": self.window.y }));
        }

        let xpath = arg(&args, "xpath", 0);
        let xpath = xpath.as_str().unwrap_or_default();

        if script == scripts::ELEMENT_BOUNDS {
            return Ok(self
                .elements
                .iter()
                .find(|e| e.xpath == xpath)
                .map(|e| serde_json::to_value(e.bounds))
                .transpose()?
                .unwrap_or(Value::Null));
        }

        if script == scripts::ELEMENT_AT_POINT {
            if !self.knows(xpath) {
                return Ok(json!({ "found": false, "hit": false, "owned": false }));
            }
            let x = arg(&args, "x", 1).as_i64();
            let y = arg(&args, "y", 2).as_i64();
            let chain = match (x, y) {
                (Some(x), Some(y)) => self.hits.iter().find(|(p, _)| *p == (x, y)).map(|(_, c)| c),
                _ => None,
            };
            return Ok(match chain {
                Some(chain) => json!({ "found": true, "hit": true, "owned": chain.iter().any(|c| c == xpath) }),
                None => json!({ "found": true, "hit": false, "owned": false }),
            });
        }

        Err(ScreenBridgeError::locator(xpath, "unknown script"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Requested target of a pointer move.
    Move(ScreenPoint),
    /// Where the cursor actually was when the click fired.
    Click(ScreenPoint),
    Key(KeyStroke),
    Scroll(i32),
}

/// In-memory pointer/keyboard. Moves may drift or clamp to mimic an OS that
/// did not put the cursor exactly where asked.
pub struct SimulatedInput {
    cursor: ScreenPoint,
    drift: (i32, i32),
    clamp: Option<ScreenBounds>,
    yank: Option<(usize, ScreenPoint)>,
    failing: bool,
    events: Vec<InputEvent>,
}

impl SimulatedInput {
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            cursor: ScreenPoint::new(x, y),
            drift: (0, 0),
            clamp: None,
            yank: None,
            failing: false,
            events: Vec::new(),
        }
    }

    pub fn with_drift(mut self, dx: i32, dy: i32) -> Self {
        self.drift = (dx, dy);
        self
    }

    pub fn clamped_to(mut self, width: u32, height: u32) -> Self {
        self.clamp = Some(ScreenBounds::new(width, height));
        self
    }

    /// After `moves` pointer moves the user grabs the mouse and parks it at
    /// `point`, overriding where the last move put it.
    pub fn yanked_after(mut self, moves: usize, point: ScreenPoint) -> Self {
        self.yank = Some((moves, point));
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn cursor(&self) -> ScreenPoint {
        self.cursor
    }

    pub fn events(&self) -> Vec<InputEvent> {
        self.events.clone()
    }

    fn check(&self) -> ScreenBridgeResult<()> {
        if self.failing {
            Err(ScreenBridgeError::Input("simulated device unplugged".into()))
        } else {
            Ok(())
        }
    }
}

impl InputBackend for SimulatedInput {
    fn move_to(&mut self, point: ScreenPoint) -> ScreenBridgeResult<()> {
        self.check()?;
        self.events.push(InputEvent::Move(point));
        let mut actual = ScreenPoint::new(
            point.x.saturating_add(self.drift.0),
            point.y.saturating_add(self.drift.1),
        );
        if let Some(screen) = self.clamp {
            actual.x = actual.x.clamp(0, screen.width as i32 - 1);
            actual.y = actual.y.clamp(0, screen.height as i32 - 1);
        }
        self.cursor = actual;
        if let Some((after, point)) = self.yank {
            let moves = self.events.iter().filter(|e| matches!(e, InputEvent::Move(_))).count();
            if moves >= after {
                self.cursor = point;
            }
        }
        Ok(())
    }

    fn cursor_position(&self) -> ScreenBridgeResult<ScreenPoint> {
        self.check()?;
        Ok(self.cursor)
    }

    fn primary_click(&mut self) -> ScreenBridgeResult<()> {
        self.check()?;
        self.events.push(InputEvent::Click(self.cursor));
        Ok(())
    }

    fn key_stroke(&mut self, key: KeyStroke) -> ScreenBridgeResult<()> {
        self.check()?;
        self.events.push(InputEvent::Key(key));
        Ok(())
    }

    fn scroll(&mut self, amount: i32) -> ScreenBridgeResult<()> {
        self.check()?;
        self.events.push(InputEvent::Scroll(amount));
        Ok(())
    }
}
