use std::fmt;

use serde::{Deserialize, Serialize};

/// Element rectangle relative to the page viewport (top-left origin, y-down).
/// Always fetched fresh; layout can shift between two calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementBounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Screen-relative origin of the browser window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
}

impl WindowBounds {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Screen position of the viewport's top-left pixel: the window origin
    /// shifted past the border and header chrome.
    pub fn viewport_origin(&self, offsets: &BrowserOffsets) -> WindowBounds {
        let border = offsets.border as i64;
        let header = offsets.header as i64;
        WindowBounds {
            x: saturate(self.x as i64 + border),
            y: saturate(self.y as i64 + header + border),
        }
    }
}

/// Pixel sizes of the browser UI surrounding the page viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserOffsets {
    /// Height of the tab strip + toolbar.
    #[serde(default = "default_header")]
    pub header: u32,
    /// Window border width.
    #[serde(default = "default_border")]
    pub border: u32,
    /// Width of a docked side panel (devtools etc.). Not part of the transform.
    #[serde(default)]
    pub sidebar: u32,
}

fn default_header() -> u32 {
    80
}

fn default_border() -> u32 {
    2
}

impl Default for BrowserOffsets {
    fn default() -> Self {
        Self {
            header: default_header(),
            border: default_border(),
            sidebar: 0,
        }
    }
}

/// Primary display dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub width: u32,
    pub height: u32,
}

impl ScreenBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Half-open check: `0 <= x < width && 0 <= y < height`.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as i64) < self.width as i64
            && (point.y as i64) < self.height as i64
    }
}

impl fmt::Display for ScreenBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.width, self.height)
    }
}

/// Absolute OS-screen coordinates. Only on-screen when produced with validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Largest per-axis distance to `other`.
    pub fn max_axis_delta(&self, other: ScreenPoint) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Maps the point into the page coordinate space whose screen origin is
    /// `origin`. `None` when the offset does not fit in `i32`.
    pub fn relative_to(&self, origin: WindowBounds) -> Option<(i32, i32)> {
        Some((self.x.checked_sub(origin.x)?, self.y.checked_sub(origin.y)?))
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl From<(i32, i32)> for ScreenPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for ScreenPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_contains_is_half_open() {
        let screen = ScreenBounds::new(1920, 1080);
        assert!(screen.contains(ScreenPoint::new(0, 0)));
        assert!(screen.contains(ScreenPoint::new(1919, 1079)));
        assert!(!screen.contains(ScreenPoint::new(1920, 500)));
        assert!(!screen.contains(ScreenPoint::new(500, 1080)));
        assert!(!screen.contains(ScreenPoint::new(-1, 10)));
    }

    #[test]
    fn viewport_origin_adds_chrome() {
        let window = WindowBounds::new(500, 200);
        let origin = window.viewport_origin(&BrowserOffsets::default());
        assert_eq!(origin, WindowBounds::new(502, 282));
    }

    #[test]
    fn viewport_origin_saturates_at_the_coordinate_limit() {
        let window = WindowBounds::new(i32::MAX - 10, i32::MAX);
        let origin = window.viewport_origin(&BrowserOffsets::default());
        assert_eq!(origin, WindowBounds::new(i32::MAX - 8, i32::MAX));
    }

    #[test]
    fn relative_to_rejects_offsets_past_i32() {
        let point = ScreenPoint::new(620, 250);
        assert_eq!(point.relative_to(WindowBounds::new(500, 200)), Some((120, 50)));
        assert_eq!(point.relative_to(WindowBounds::new(-1920, 0)), Some((2540, 250)));

        let far = ScreenPoint::new(i32::MAX, 0);
        assert_eq!(far.relative_to(WindowBounds::new(-1920, 0)), None);
        assert_eq!(ScreenPoint::new(i32::MIN, 0).relative_to(WindowBounds::new(1, 0)), None);
    }

    #[test]
    fn offsets_fill_missing_fields_with_defaults() {
        let offsets: BrowserOffsets = serde_json::from_str(r#"{"header": 120}"#).unwrap();
        assert_eq!(offsets, BrowserOffsets { header: 120, border: 2, sidebar: 0 });
    }
}
