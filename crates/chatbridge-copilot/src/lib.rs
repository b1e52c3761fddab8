//! chatbridge-copilot: site adapter for the Microsoft 365 Copilot web chat.
//!
//! Delivers tool results into a third-party, unversioned chat UI over CDP:
//!
//! - **locator**: ordered CSS-selector fallback chains for the chat input,
//!   submit control, and upload button.
//! - **insert**: append a rendered tool result to the chat input and raise
//!   synthetic `input`/`change` notifications.
//! - **attach**: three escalating file-attachment strategies (native file
//!   input, upload-button remount, drag-and-drop simulation).
//! - **submit**: poll for an enabled submit control, click it, fall back to a
//!   synthetic Enter-key sequence after the deadline.
//! - **CdpDriver**: the [`PageDriver`] implementation over a live
//!   `chromiumoxide` page; adapter logic never touches CDP directly.
//!
//! The page's markup is not ours and may change without notice, so nothing
//! here caches a located node: every operation re-resolves its selectors.

mod adapter;
mod attach;
mod cdp;
mod driver;
mod insert;
mod locator;
#[cfg(test)]
pub(crate) mod mock;
mod submit;

pub use adapter::{CopilotAdapter, ADAPTER_NAME, COPILOT_HOSTNAME};
pub use attach::AttachStrategy;
pub use cdp::CdpDriver;
pub use driver::{PageDriver, SyntheticEvent};
pub use locator::{
    LocatorStrategy, CHAT_INPUT_STRATEGIES, SUBMIT_STRATEGIES, UPLOAD_BUTTON_STRATEGIES,
};
pub use submit::SubmitOutcome;
