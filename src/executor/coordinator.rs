// Element → screen point → physical action, for one element at a time.
use serde::Serialize;

use crate::config::PhysicalInputConfig;
use crate::errors::{ScreenBridgeError, ScreenBridgeResult};
use crate::executor::actuator::PhysicalActuator;
use crate::executor::input::{EnigoBackend, InputBackend};
use crate::executor::mock::MockOverride;
use crate::executor::safety::permits_physical;
use crate::geometry::coordinates;
use crate::geometry::screen::{PrimaryMonitor, ScreenBoundsProvider};
use crate::geometry::types::ScreenPoint;
use crate::page::dom::DomElementNode;
use crate::page::locator::ElementLocator;
use crate::page::traits::PageEvaluator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClickOutcome {
    pub point: ScreenPoint,
    /// `None` when ownership was not checked (disabled, or mock coordinates).
    pub verified: Option<bool>,
}

pub struct PhysicalInputController<B: InputBackend> {
    actuator: PhysicalActuator<B>,
    screen: Box<dyn ScreenBoundsProvider>,
    config: PhysicalInputConfig,
    mock: MockOverride,
}

impl PhysicalInputController<EnigoBackend> {
    /// Real OS input on the primary monitor, sharing the process-wide mock.
    pub fn from_config(config: PhysicalInputConfig) -> ScreenBridgeResult<Self> {
        let backend = EnigoBackend::new()?;
        Ok(Self::new(backend, Box::new(PrimaryMonitor), config, MockOverride::global()))
    }
}

impl<B: InputBackend> PhysicalInputController<B> {
    pub fn new(
        backend: B,
        screen: Box<dyn ScreenBoundsProvider>,
        config: PhysicalInputConfig,
        mock: MockOverride,
    ) -> Self {
        let actuator = PhysicalActuator::new(backend, config.timing, config.failsafe);
        Self {
            actuator,
            screen,
            config,
            mock,
        }
    }

    pub fn config(&self) -> &PhysicalInputConfig {
        &self.config
    }

    pub fn mock(&self) -> &MockOverride {
        &self.mock
    }

    pub fn actuator(&self) -> &PhysicalActuator<B> {
        &self.actuator
    }

    /// Whether `action` should take the physical path.
    pub fn permits(&self, action: &str) -> bool {
        permits_physical(action, &self.config)
    }

    /// Screen point at the center of `node`, or the mock point when one is set.
    pub async fn element_coordinates(
        &self,
        page: &dyn PageEvaluator,
        node: &DomElementNode,
    ) -> ScreenBridgeResult<ScreenPoint> {
        if let Some(point) = self.mock.get() {
            tracing::debug!(xpath = %node.xpath, x = point.x, y = point.y, "using mock coordinates");
            return Ok(point);
        }

        let locator = ElementLocator::with_convention(page, self.config.call_convention);
        let bounds = locator.resolve_bounds(&node.xpath).await?;
        let window = locator.resolve_window_origin().await?;
        coordinates::calculate(
            &bounds,
            &window,
            &self.config.offsets,
            self.config.validate_bounds,
            self.screen.as_ref(),
        )
        .map_err(|e| e.with_locator(&node.xpath))
    }

    /// Moves to `node`, clicks, and checks the click landed on it.
    ///
    /// The returned `verified` is advisory: `Some(false)` means the position
    /// cannot be trusted (overlay, layout shift, or a failed check) and the
    /// caller should fall back.
    pub async fn click_element(
        &mut self,
        page: &dyn PageEvaluator,
        node: &DomElementNode,
    ) -> ScreenBridgeResult<ClickOutcome> {
        let point = self
            .click_at_element(page, node)
            .await
            .map_err(|e| failed(node, "physical click", e))?;

        let verified = if self.config.verify_ownership && !self.mock.is_active() {
            Some(self.verify_landing(page, node, point).await)
        } else {
            None
        };

        tracing::info!(
            tag = %node.tag_name,
            xpath = %node.xpath,
            x = point.x,
            y = point.y,
            verified = ?verified,
            "physical click complete"
        );
        Ok(ClickOutcome { point, verified })
    }

    /// Clicks into `node` and types `text` there.
    pub async fn input_text(
        &mut self,
        page: &dyn PageEvaluator,
        node: &DomElementNode,
        text: &str,
    ) -> ScreenBridgeResult<ScreenPoint> {
        let point = self
            .type_into_element(page, node, text)
            .await
            .map_err(|e| failed(node, "physical text input", e))?;
        tracing::info!(xpath = %node.xpath, x = point.x, y = point.y, "physical text input complete");
        Ok(point)
    }

    /// Positive toward the top of the content, negative toward the bottom.
    pub async fn scroll(&mut self, amount: i32) -> ScreenBridgeResult<()> {
        self.actuator.scroll(amount).await
    }

    async fn click_at_element(
        &mut self,
        page: &dyn PageEvaluator,
        node: &DomElementNode,
    ) -> ScreenBridgeResult<ScreenPoint> {
        let point = self.element_coordinates(page, node).await?;
        self.actuator.move_to(point, self.config.verify_cursor).await?;
        self.actuator.click().await?;
        Ok(point)
    }

    async fn type_into_element(
        &mut self,
        page: &dyn PageEvaluator,
        node: &DomElementNode,
        text: &str,
    ) -> ScreenBridgeResult<ScreenPoint> {
        let point = self.element_coordinates(page, node).await?;
        self.actuator.type_text(text, Some(point), true).await?;
        Ok(point)
    }

    async fn verify_landing(&self, page: &dyn PageEvaluator, node: &DomElementNode, point: ScreenPoint) -> bool {
        let locator = ElementLocator::with_convention(page, self.config.call_convention);
        // Page space starts at the viewport, not the window frame.
        match locator.resolve_window_origin().await {
            Ok(window) => {
                let origin = window.viewport_origin(&self.config.offsets);
                locator
                    .verify_ownership(&node.xpath, point, origin, node.is_top_element)
                    .await
            }
            Err(e) => {
                tracing::warn!(xpath = %node.xpath, error = %e, "window origin unavailable for ownership check");
                false
            }
        }
    }
}

fn failed(node: &DomElementNode, action: &str, error: ScreenBridgeError) -> ScreenBridgeError {
    let error = error.with_locator(&node.xpath);
    tracing::warn!(xpath = %node.xpath, error = %error, "{} failed", action);
    error
}
