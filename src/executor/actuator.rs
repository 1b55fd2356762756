//! Physical pointer and keyboard actuation.
//!
//! There is one OS cursor and one keyboard focus per process. A
//! `PhysicalActuator` is the handle to them: its methods take `&mut self`, so
//! one handle never has two actuations in flight, but nothing stops a second
//! handle from racing the first. Callers must keep to one handle at a time.
//!
//! Each call runs its whole event sequence before returning. Fixed delays
//! (movement duration, post-click settle, inter-action pause) are the only
//! pacing; OS delivery is never confirmed.
use std::time::Duration;

use crate::config::TimingConfig;
use crate::errors::{ScreenBridgeError, ScreenBridgeResult};
use crate::executor::input::InputBackend;
use crate::executor::text_input::key_sequence;
use crate::geometry::types::ScreenPoint;

/// Maximum per-axis distance between requested and observed cursor position.
pub const CURSOR_TOLERANCE_PX: u32 = 2;

/// Parking the cursor here aborts the next actuation.
const FAILSAFE_CORNER: ScreenPoint = ScreenPoint { x: 0, y: 0 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuationState {
    Idle,
    Moving,
    VerifyingCursor,
    Clicking,
    Typing,
    Scrolling,
    Settled,
}

pub struct PhysicalActuator<B: InputBackend> {
    backend: B,
    timing: TimingConfig,
    failsafe: bool,
    state: ActuationState,
}

impl<B: InputBackend> PhysicalActuator<B> {
    pub fn new(backend: B, timing: TimingConfig, failsafe: bool) -> Self {
        Self {
            backend,
            timing,
            failsafe,
            state: ActuationState::Idle,
        }
    }

    /// State reached by the last call; `Settled` after any successful one.
    pub fn state(&self) -> ActuationState {
        self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Glides the cursor to `point` over the configured duration instead of
    /// jumping, since instantaneous jumps are a common automation tell.
    ///
    /// With `verify_cursor`, reads the OS cursor back afterwards and fails with
    /// `CursorMismatch` if either axis is off by more than
    /// [`CURSOR_TOLERANCE_PX`] (the move was clamped or blocked).
    pub async fn move_to(&mut self, point: ScreenPoint, verify_cursor: bool) -> ScreenBridgeResult<()> {
        self.begin()?;
        self.glide(point, verify_cursor).await?;
        self.pause().await;
        self.transition(ActuationState::Settled);
        tracing::info!(x = point.x, y = point.y, verified = verify_cursor, "cursor moved");
        Ok(())
    }

    /// Primary-button click at the current cursor position, then the settle
    /// delay so a query issued right after sees post-click page state.
    pub async fn click(&mut self) -> ScreenBridgeResult<()> {
        self.begin()?;
        self.click_and_settle().await?;
        self.transition(ActuationState::Settled);
        tracing::info!("click issued");
        Ok(())
    }

    /// Types `text` as discrete key events.
    ///
    /// With `click_first`, moves to `point` (when given), clicks and settles
    /// before typing. Without it, keys go wherever focus already is.
    pub async fn type_text(
        &mut self,
        text: &str,
        point: Option<ScreenPoint>,
        click_first: bool,
    ) -> ScreenBridgeResult<()> {
        self.begin()?;
        if click_first {
            if let Some(point) = point {
                self.glide(point, false).await?;
            }
            self.click_and_settle().await?;
        }

        self.transition(ActuationState::Typing);
        let keys = key_sequence(text);
        for key in &keys {
            self.backend.key_stroke(*key)?;
        }
        self.pause().await;
        self.transition(ActuationState::Settled);
        tracing::info!(chars = keys.len(), click_first, "text typed");
        Ok(())
    }

    /// Vertical wheel delta. Positive scrolls toward the top of the content,
    /// negative toward the bottom.
    pub async fn scroll(&mut self, amount: i32) -> ScreenBridgeResult<()> {
        self.begin()?;
        self.transition(ActuationState::Scrolling);
        self.backend.scroll(amount)?;
        self.pause().await;
        self.transition(ActuationState::Settled);
        tracing::info!(amount, "scrolled");
        Ok(())
    }

    fn begin(&mut self) -> ScreenBridgeResult<()> {
        self.state = ActuationState::Idle;
        self.check_failsafe(None)
    }

    /// Aborts if the cursor sits in the failsafe corner, unless `commanded`
    /// is the corner itself (a glide passing through it).
    fn check_failsafe(&self, commanded: Option<ScreenPoint>) -> ScreenBridgeResult<()> {
        if !self.failsafe || commanded == Some(FAILSAFE_CORNER) {
            return Ok(());
        }
        let position = self.backend.cursor_position()?;
        if position == FAILSAFE_CORNER {
            tracing::warn!("cursor parked in failsafe corner; aborting actuation");
            return Err(ScreenBridgeError::FailsafeTriggered(position));
        }
        Ok(())
    }

    async fn glide(&mut self, target: ScreenPoint, verify_cursor: bool) -> ScreenBridgeResult<()> {
        self.transition(ActuationState::Moving);

        let steps = self.timing.move_steps.max(1);
        let duration = Duration::from_millis(self.timing.move_duration_ms);
        if steps > 1 && !duration.is_zero() {
            let start = self.backend.cursor_position()?;
            let step_delay = duration / steps;
            for i in 1..steps {
                let t = i as f64 / steps as f64;
                let waypoint = ScreenPoint::new(lerp(start.x, target.x, t), lerp(start.y, target.y, t));
                self.backend.move_to(waypoint)?;
                tokio::time::sleep(step_delay).await;
                self.check_failsafe(Some(waypoint))?;
            }
            self.backend.move_to(target)?;
            tokio::time::sleep(step_delay).await;
        } else {
            self.backend.move_to(target)?;
            tokio::time::sleep(duration).await;
        }

        if verify_cursor {
            self.transition(ActuationState::VerifyingCursor);
            let actual = self.backend.cursor_position()?;
            if target.max_axis_delta(actual) > CURSOR_TOLERANCE_PX {
                tracing::warn!(
                    expected = %target,
                    actual = %actual,
                    "cursor did not reach target"
                );
                return Err(ScreenBridgeError::CursorMismatch {
                    expected: target,
                    actual,
                    locator: None,
                });
            }
        }
        Ok(())
    }

    async fn click_and_settle(&mut self) -> ScreenBridgeResult<()> {
        self.transition(ActuationState::Clicking);
        self.backend.primary_click()?;
        tokio::time::sleep(Duration::from_millis(self.timing.settle_delay_ms)).await;
        Ok(())
    }

    async fn pause(&self) {
        if self.timing.action_pause_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.timing.action_pause_ms)).await;
        }
    }

    fn transition(&mut self, next: ActuationState) {
        tracing::trace!(from = ?self.state, to = ?next, "actuator transition");
        self.state = next;
    }
}

/// Point `t` of the way from `from` to `to`, computed in `i64` so far-apart
/// endpoints cannot overflow.
fn lerp(from: i32, to: i32, t: f64) -> i32 {
    let from = from as i64;
    let delta = to as i64 - from;
    let offset = (delta as f64 * t).round() as i64;
    (from + offset).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
