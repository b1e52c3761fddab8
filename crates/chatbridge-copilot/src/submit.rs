//! Submission trigger: wait for the site's submit control to enable, click
//! it, or fall back to a synthetic Enter-key sequence after the deadline.
//!
//! The control is re-resolved through the full locator chain on every tick —
//! the page is free to replace the button node between renders. The first
//! enabled tick clicks exactly once and cancels the loop; the very first
//! check runs before any interval elapses, so an already-enabled control is
//! clicked without waiting.

use std::time::Duration;

use chatbridge_core::{BridgeConfig, BridgeError, PollOutcome, Poller};
use tracing::debug;

use crate::driver::{PageDriver, SyntheticEvent};
use crate::locator::{locate_chat_input, locate_submit_button};

/// How submission was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submit control became enabled and was clicked.
    Clicked,
    /// The deadline passed (control never enabled, or never found); the
    /// Enter-key sequence and, where a form ancestor exists, a synthetic
    /// submit were dispatched. Best effort: the page's reaction is not
    /// observable, so this outcome does not confirm submission.
    FallbackDispatched,
}

pub(crate) async fn submit(
    driver: &dyn PageDriver,
    config: &BridgeConfig,
    max_wait: Option<Duration>,
) -> Result<SubmitOutcome, BridgeError> {
    let input = locate_chat_input(driver)
        .await?
        .ok_or_else(|| BridgeError::ElementNotFound("chat input".to_string()))?;

    let poller = Poller::new(
        config.submit_poll_interval(),
        max_wait.unwrap_or_else(|| config.submit_max_wait()),
    );
    let outcome = poller
        .run(move || async move {
            let button = match locate_submit_button(driver).await {
                Ok(Some(button)) => button,
                // Not found yet, or the page churned mid-probe: next tick.
                Ok(None) | Err(_) => return None,
            };
            match driver.is_enabled(button.selector).await {
                Ok(true) => driver.click(button.selector).await.ok(),
                Ok(false) | Err(_) => None,
            }
        })
        .await;

    match outcome {
        PollOutcome::Completed(()) => {
            debug!(target: "chatbridge::copilot", "submit control clicked");
            Ok(SubmitOutcome::Clicked)
        }
        PollOutcome::TimedOut => {
            debug!(
                target: "chatbridge::copilot",
                "submit control never enabled, dispatching Enter-key fallback"
            );
            dispatch_fallback(driver, input.selector).await?;
            Ok(SubmitOutcome::FallbackDispatched)
        }
    }
}

/// Unconditional fallback: focus the input, run the Enter key sequence in
/// native order, and submit the form ancestor when there is one.
async fn dispatch_fallback(
    driver: &dyn PageDriver,
    input_selector: &str,
) -> Result<(), BridgeError> {
    driver.focus(input_selector).await?;
    driver.dispatch(input_selector, SyntheticEvent::KeyDown).await?;
    driver.dispatch(input_selector, SyntheticEvent::KeyPress).await?;
    driver.dispatch(input_selector, SyntheticEvent::KeyUp).await?;
    let had_form = driver.submit_ancestor_form(input_selector).await?;
    debug!(target: "chatbridge::copilot", had_form, "Enter-key fallback dispatched");
    Ok(())
}
