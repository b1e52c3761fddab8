//! File attachment: three escalating strategies against a page that may or
//! may not expose a real file input.
//!
//! 1. Native `input[type=file]` anywhere in the document: assign a FileList.
//! 2. Click an upload-trigger button, wait for the page to lazily mount a
//!    file input, retry strategy 1.
//! 3. Simulate drag-and-drop of the file onto the chat input.
//!
//! Strategy 3 reports success once the events are dispatched, whether or not
//! the page accepted the file. That is a known best-effort limitation of the
//! drop path: there is no acceptance signal to observe.

use std::time::Duration;

use chatbridge_core::{BridgeError, FilePayload};
use tokio::time::sleep;
use tracing::debug;

use crate::driver::PageDriver;
use crate::locator::{locate_chat_input, locate_upload_button};

pub(crate) const FILE_INPUT_SELECTOR: &str = r#"input[type="file"]"#;

/// Which attachment strategy landed the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachStrategy {
    NativeInput,
    UploadButton,
    DragDrop,
}

impl AttachStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachStrategy::NativeInput => "native-input",
            AttachStrategy::UploadButton => "upload-button",
            AttachStrategy::DragDrop => "drag-drop",
        }
    }
}

/// Attach `file` to the pending message. Requires the chat input to exist at
/// all — without it there is nothing to attach to and no strategy is tried.
/// `mount_delay` is the grace period for strategy 2's lazily mounted input.
pub(crate) async fn attach_file(
    driver: &dyn PageDriver,
    file: &FilePayload,
    mount_delay: Duration,
) -> Result<AttachStrategy, BridgeError> {
    let input = locate_chat_input(driver)
        .await?
        .ok_or_else(|| BridgeError::ElementNotFound("chat input".to_string()))?;

    if driver.exists(FILE_INPUT_SELECTOR).await? {
        driver.assign_files(FILE_INPUT_SELECTOR, file).await?;
        debug!(target: "chatbridge::copilot", file = %file.name, strategy = "native-input", "file attached");
        return Ok(AttachStrategy::NativeInput);
    }

    if let Some(button) = locate_upload_button(driver).await? {
        driver.click(button.selector).await?;
        // Give the page time to mount the picker's backing input.
        sleep(mount_delay).await;
        if driver.exists(FILE_INPUT_SELECTOR).await? {
            driver.assign_files(FILE_INPUT_SELECTOR, file).await?;
            debug!(target: "chatbridge::copilot", file = %file.name, strategy = "upload-button", "file attached");
            return Ok(AttachStrategy::UploadButton);
        }
    }

    // Last resort. Dispatch-only: the page's acceptance is not observable.
    driver.dispatch_drag_drop(input.selector, file).await?;
    debug!(target: "chatbridge::copilot", file = %file.name, strategy = "drag-drop", "file drop dispatched");
    Ok(AttachStrategy::DragDrop)
}
