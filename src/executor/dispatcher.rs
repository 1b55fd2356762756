// Named browser action → physical input. Refusals come back as
// `ActionNotPermitted` so the orchestrator can take its synthetic path.
use serde::{Deserialize, Serialize};

use crate::errors::{ScreenBridgeError, ScreenBridgeResult};
use crate::executor::coordinator::{ClickOutcome, PhysicalInputController};
use crate::executor::input::InputBackend;
use crate::geometry::types::ScreenPoint;
use crate::page::dom::{DomElementNode, DomTree};
use crate::page::traits::PageEvaluator;

/// Wheel notches used when a scroll action carries no amount.
pub const DEFAULT_SCROLL_NOTCHES: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PhysicalAction {
    ClickElement { index: usize },
    InputText { index: usize, text: String },
    ScrollDown { amount: Option<u32> },
    ScrollUp { amount: Option<u32> },
}

impl PhysicalAction {
    pub fn name(&self) -> &'static str {
        match self {
            PhysicalAction::ClickElement { .. } => "click_element",
            PhysicalAction::InputText { .. } => "input_text",
            PhysicalAction::ScrollDown { .. } => "scroll_down",
            PhysicalAction::ScrollUp { .. } => "scroll_up",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Clicked(ClickOutcome),
    Typed { point: ScreenPoint },
    Scrolled { amount: i32 },
}

pub async fn dispatch<B: InputBackend>(
    controller: &mut PhysicalInputController<B>,
    page: &dyn PageEvaluator,
    tree: &DomTree,
    action: &PhysicalAction,
) -> ScreenBridgeResult<DispatchOutcome> {
    let name = action.name();
    if !controller.permits(name) {
        tracing::debug!(action = name, "physical input not permitted");
        return Err(ScreenBridgeError::ActionNotPermitted {
            action: name.to_string(),
        });
    }

    match action {
        PhysicalAction::ClickElement { index } => {
            let node = node_at(tree, *index)?;
            let outcome = controller.click_element(page, node).await?;
            Ok(DispatchOutcome::Clicked(outcome))
        }
        PhysicalAction::InputText { index, text } => {
            let node = node_at(tree, *index)?;
            let point = controller.input_text(page, node, text).await?;
            Ok(DispatchOutcome::Typed { point })
        }
        PhysicalAction::ScrollDown { amount } => {
            let amount = -notches(*amount);
            controller.scroll(amount).await?;
            Ok(DispatchOutcome::Scrolled { amount })
        }
        PhysicalAction::ScrollUp { amount } => {
            let amount = notches(*amount);
            controller.scroll(amount).await?;
            Ok(DispatchOutcome::Scrolled { amount })
        }
    }
}

fn node_at(tree: &DomTree, index: usize) -> ScreenBridgeResult<&DomElementNode> {
    tree.by_highlight_index(index)
        .ok_or_else(|| ScreenBridgeError::ElementNotFound {
            locator: format!("highlight index {index}"),
        })
}

fn notches(amount: Option<u32>) -> i32 {
    amount
        .unwrap_or(DEFAULT_SCROLL_NOTCHES)
        .min(i32::MAX as u32) as i32
}
