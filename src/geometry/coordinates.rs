//! Page-viewport → OS-screen coordinate mapping.
//!
//! Contract: the element center is computed from raw viewport bounds, then
//! the window origin is added, then the chrome offsets (`border` on x,
//! `header + border` on y). Offsets are never pre-folded into the bounds.
//! DPI scaling is not applied here; see [`adjust_for_dpi`].
use crate::errors::{ScreenBridgeError, ScreenBridgeResult};
use crate::geometry::screen::ScreenBoundsProvider;
use crate::geometry::types::{BrowserOffsets, ElementBounds, ScreenBounds, ScreenPoint, WindowBounds};

/// Screen point at the center of `element`.
///
/// With `validate` set, the current screen bounds are queried through
/// `screen` and an off-screen result fails with `CoordinateOutOfBounds`.
/// Without it, `screen` is never consulted and the point may be off-screen.
pub fn calculate(
    element: &ElementBounds,
    window: &WindowBounds,
    offsets: &BrowserOffsets,
    validate: bool,
    screen: &dyn ScreenBoundsProvider,
) -> ScreenBridgeResult<ScreenPoint> {
    let (center_x, center_y) = element.center();

    let border = offsets.border as f64;
    let header = offsets.header as f64;

    let point = ScreenPoint::new(
        (window.x as f64 + center_x + border).round() as i32,
        (window.y as f64 + center_y + header + border).round() as i32,
    );

    if validate {
        let bounds = screen.screen_bounds()?;
        ensure_on_screen(point, bounds)?;
    }

    tracing::debug!(
        x = point.x,
        y = point.y,
        window_x = window.x,
        window_y = window.y,
        validated = validate,
        "element center mapped to screen"
    );
    Ok(point)
}

pub fn is_on_screen(point: ScreenPoint, screen: ScreenBounds) -> bool {
    screen.contains(point)
}

fn ensure_on_screen(point: ScreenPoint, screen: ScreenBounds) -> ScreenBridgeResult<()> {
    if is_on_screen(point, screen) {
        Ok(())
    } else {
        Err(ScreenBridgeError::CoordinateOutOfBounds {
            point,
            screen,
            locator: None,
        })
    }
}

/// Scales both axes by `scale` (e.g. 1.5 for 150 %), truncating.
pub fn adjust_for_dpi(point: ScreenPoint, scale: f64) -> ScreenPoint {
    ScreenPoint::new(
        (point.x as f64 * scale) as i32,
        (point.y as f64 * scale) as i32,
    )
}
