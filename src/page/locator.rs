//! Async bridge from locator expressions to live page geometry.
//!
//! Nothing here is cached: every call re-queries the page, since layout can
//! shift between a lookup and the action that follows it.
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::{ScreenBridgeError, ScreenBridgeResult};
use crate::geometry::types::{ElementBounds, ScreenPoint, WindowBounds};
use crate::page::scripts;
use crate::page::traits::{CallConvention, PageEvaluator, ScriptArgs};

const WINDOW_LOCATOR: &str = "window";

#[derive(Debug, Deserialize)]
struct OwnershipReport {
    #[serde(default)]
    found: bool,
    #[serde(default)]
    hit: bool,
    #[serde(default)]
    owned: bool,
}

pub struct ElementLocator<'a> {
    page: &'a dyn PageEvaluator,
    convention: CallConvention,
}

impl<'a> ElementLocator<'a> {
    pub fn new(page: &'a dyn PageEvaluator) -> Self {
        Self {
            page,
            convention: CallConvention::default(),
        }
    }

    pub fn with_convention(page: &'a dyn PageEvaluator, convention: CallConvention) -> Self {
        Self { page, convention }
    }

    /// Viewport-relative bounding rectangle of the first node matching `locator`.
    ///
    /// Errors propagate: `ElementNotFound` on zero matches, `Locator` when the
    /// query itself fails or returns something that is not a rectangle.
    pub async fn resolve_bounds(&self, locator: &str) -> ScreenBridgeResult<ElementBounds> {
        let args = self.args(json!({ "xpath": locator }), vec![json!(locator)]);
        let raw = self
            .page
            .evaluate(scripts::ELEMENT_BOUNDS, args)
            .await
            .map_err(|e| ScreenBridgeError::locator(locator, e))?;

        if raw.is_null() {
            return Err(ScreenBridgeError::ElementNotFound {
                locator: locator.to_string(),
            });
        }

        let bounds: ElementBounds =
            serde_json::from_value(raw).map_err(|e| ScreenBridgeError::locator(locator, e))?;
        if bounds.width < 0.0 || bounds.height < 0.0 {
            return Err(ScreenBridgeError::locator(
                locator,
                format!("negative element size {}x{}", bounds.width, bounds.height),
            ));
        }

        tracing::debug!(
            locator,
            x = bounds.x,
            y = bounds.y,
            width = bounds.width,
            height = bounds.height,
            "element bounds resolved"
        );
        Ok(bounds)
    }

    /// Screen-relative origin of the window hosting the page.
    pub async fn resolve_window_origin(&self) -> ScreenBridgeResult<WindowBounds> {
        let raw = self
            .page
            .evaluate(scripts::WINDOW_ORIGIN, ScriptArgs::None)
            .await
            .map_err(|e| ScreenBridgeError::locator(WINDOW_LOCATOR, e))?;

        let (x, y) = match (raw.get("x").and_then(Value::as_f64), raw.get("y").and_then(Value::as_f64)) {
            (Some(x), Some(y)) => (x.round() as i32, y.round() as i32),
            _ => {
                return Err(ScreenBridgeError::locator(
                    WINDOW_LOCATOR,
                    format!("unexpected window origin record: {raw}"),
                ))
            }
        };

        tracing::debug!(x, y, "window origin resolved");
        Ok(WindowBounds::new(x, y))
    }

    /// Whether a physical action at `point` lands on the element at `locator`.
    ///
    /// `origin` is the screen position of the page's (0, 0); `point` is mapped
    /// back into page space by subtracting it. True only when the element found
    /// there has the target in its ancestor chain (itself included) AND
    /// `is_top_element` is set.
    ///
    /// A failed query and a negative answer are reported the same way, as
    /// `false`: either way the caller must not trust this position. If a caller
    /// ever needs to tell them apart, split this into a `Result<bool>`.
    pub async fn verify_ownership(
        &self,
        locator: &str,
        point: ScreenPoint,
        origin: WindowBounds,
        is_top_element: bool,
    ) -> bool {
        match self.query_ownership(locator, point, origin).await {
            Ok(report) => {
                let verified = report.owned && is_top_element;
                tracing::debug!(
                    locator,
                    x = point.x,
                    y = point.y,
                    found = report.found,
                    hit = report.hit,
                    owned = report.owned,
                    is_top_element,
                    verified,
                    "ownership check"
                );
                verified
            }
            Err(e) => {
                tracing::warn!(locator, x = point.x, y = point.y, error = %e, "ownership check failed; treating as not verified");
                false
            }
        }
    }

    async fn query_ownership(
        &self,
        locator: &str,
        point: ScreenPoint,
        origin: WindowBounds,
    ) -> ScreenBridgeResult<OwnershipReport> {
        let (page_x, page_y) = point.relative_to(origin).ok_or_else(|| {
            ScreenBridgeError::locator(
                locator,
                format!("point {point} has no page position relative to origin ({}, {})", origin.x, origin.y),
            )
        })?;
        let args = self.args(
            json!({ "xpath": locator, "x": page_x, "y": page_y }),
            vec![json!(locator), json!(page_x), json!(page_y)],
        );
        let raw = self
            .page
            .evaluate(scripts::ELEMENT_AT_POINT, args)
            .await
            .map_err(|e| ScreenBridgeError::locator(locator, e))?;
        if raw.is_null() {
            return Err(ScreenBridgeError::locator(locator, "ownership query returned null"));
        }
        Ok(serde_json::from_value(raw)?)
    }

    fn args(&self, structured: Value, positional: Vec<Value>) -> ScriptArgs {
        match self.convention {
            CallConvention::Structured => ScriptArgs::Structured(structured),
            CallConvention::Positional => ScriptArgs::Positional(positional),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeElement, FakePage};

    fn page() -> FakePage {
        FakePage::new(WindowBounds::new(500, 200))
            .with_element(FakeElement::new("//html/body/button[1]", ElementBounds::new(20.0, 30.0, 100.0, 40.0)))
            .with_element(FakeElement::new("//html/body/div[1]", ElementBounds::new(0.0, 0.0, 800.0, 600.0)))
    }

    #[tokio::test]
    async fn resolves_bounds_in_both_conventions() {
        let page = page();
        for convention in [CallConvention::Structured, CallConvention::Positional] {
            let locator = ElementLocator::with_convention(&page, convention);
            let bounds = locator.resolve_bounds("//html/body/button[1]").await.unwrap();
            assert_eq!(bounds, ElementBounds::new(20.0, 30.0, 100.0, 40.0));
        }

        let calls = page.calls();
        assert!(matches!(calls[0], ScriptArgs::Structured(_)));
        assert!(matches!(calls[1], ScriptArgs::Positional(ref v) if v.len() == 1));
    }

    #[tokio::test]
    async fn missing_element_is_a_hard_error() {
        let page = page();
        let locator = ElementLocator::new(&page);
        let err = locator.resolve_bounds("//html/body/a[7]").await.unwrap_err();
        assert!(matches!(err, ScreenBridgeError::ElementNotFound { ref locator } if locator == "//html/body/a[7]"));
    }

    #[tokio::test]
    async fn page_faults_propagate_from_bounds_and_origin() {
        let page = page().closed();
        let locator = ElementLocator::new(&page);

        let err = locator.resolve_bounds("//html/body/button[1]").await.unwrap_err();
        assert!(matches!(err, ScreenBridgeError::Locator { ref locator, .. } if locator == "//html/body/button[1]"));

        let err = locator.resolve_window_origin().await.unwrap_err();
        assert!(matches!(err, ScreenBridgeError::Locator { .. }));
    }

    #[tokio::test]
    async fn resolves_window_origin() {
        let page = page();
        let origin = ElementLocator::new(&page).resolve_window_origin().await.unwrap();
        assert_eq!(origin, WindowBounds::new(500, 200));
    }

    #[tokio::test]
    async fn ownership_requires_ancestor_chain_and_top_flag() {
        let page = page().with_hit(120, 50, vec!["//html/body/button[1]/span[1]", "//html/body/button[1]", "//html/body"]);
        let locator = ElementLocator::new(&page);
        let origin = WindowBounds::new(500, 200);
        let point = ScreenPoint::new(620, 250);

        assert!(locator.verify_ownership("//html/body/button[1]", point, origin, true).await);
        assert!(!locator.verify_ownership("//html/body/button[1]", point, origin, false).await);
        assert!(!locator.verify_ownership("//html/body/div[1]", point, origin, true).await);
    }

    #[tokio::test]
    async fn ownership_is_false_when_nothing_is_at_the_point() {
        let page = page();
        let locator = ElementLocator::with_convention(&page, CallConvention::Positional);
        let verified = locator
            .verify_ownership("//html/body/button[1]", ScreenPoint::new(9000, 9000), WindowBounds::new(0, 0), true)
            .await;
        assert!(!verified);
    }

    #[tokio::test]
    async fn ownership_folds_query_faults_into_false() {
        let page = page().with_hit(120, 50, vec!["//html/body/button[1]"]).closed();
        let locator = ElementLocator::new(&page);
        let verified = locator
            .verify_ownership("//html/body/button[1]", ScreenPoint::new(620, 250), WindowBounds::new(500, 200), true)
            .await;
        assert!(!verified);
    }

    #[tokio::test]
    async fn ownership_is_false_when_point_is_beyond_page_space() {
        let page = page().with_hit(120, 50, vec!["//html/body/button[1]"]);
        let locator = ElementLocator::new(&page);
        let verified = locator
            .verify_ownership("//html/body/button[1]", ScreenPoint::new(i32::MAX, 0), WindowBounds::new(-1920, 0), true)
            .await;
        assert!(!verified);
        assert!(page.calls().is_empty());
    }
}
