//! PageDriver: the seam between adapter logic and the live page.
//!
//! Adapter modules speak in selectors and synthetic events; only the driver
//! knows how those become CDP evaluations. Tests swap in a recording mock.

use async_trait::async_trait;
use chatbridge_core::{BridgeError, FilePayload};

/// Synthetic events the adapter dispatches at located elements. All of them
/// bubble, matching what the page's own framework listens for. The key events
/// always carry Enter (keyCode 13); no other key is ever simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticEvent {
    Input,
    Change,
    KeyDown,
    KeyPress,
    KeyUp,
}

impl SyntheticEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            SyntheticEvent::Input => "input",
            SyntheticEvent::Change => "change",
            SyntheticEvent::KeyDown => "keydown",
            SyntheticEvent::KeyPress => "keypress",
            SyntheticEvent::KeyUp => "keyup",
        }
    }
}

/// DOM access surface the adapter needs. Every method takes a selector and
/// re-resolves it on the page: element references are stale the moment a call
/// returns, so none are ever held across calls.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Whether any element matches `selector`.
    async fn exists(&self, selector: &str) -> Result<bool, BridgeError>;

    /// Current `value` of the first match (textarea or input).
    async fn value(&self, selector: &str) -> Result<String, BridgeError>;

    /// Set `value` on the first match. Does not notify the page; callers
    /// follow up with [`dispatch`](Self::dispatch) in the order they need.
    async fn set_value(&self, selector: &str, value: &str) -> Result<(), BridgeError>;

    /// Dispatch a bubbling synthetic event at the first match.
    async fn dispatch(&self, selector: &str, event: SyntheticEvent) -> Result<(), BridgeError>;

    async fn focus(&self, selector: &str) -> Result<(), BridgeError>;

    async fn click(&self, selector: &str) -> Result<(), BridgeError>;

    /// Enabled predicate for a control: no `disabled` property, no
    /// `aria-disabled="true"`, no `disabled` class token.
    async fn is_enabled(&self, selector: &str) -> Result<bool, BridgeError>;

    /// Build a FileList containing `file` and assign it to the first match
    /// (a file input), then raise a bubbling `change`.
    async fn assign_files(&self, selector: &str, file: &FilePayload) -> Result<(), BridgeError>;

    /// Simulate a drag-and-drop of `file` onto the first match: one-shot
    /// `preventDefault` on `dragover`, then `dragover` + `drop` carrying the
    /// file payload. Dispatch-only; the page's acceptance is not observable.
    async fn dispatch_drag_drop(&self, selector: &str, file: &FilePayload)
        -> Result<(), BridgeError>;

    /// Dispatch a synthetic `submit` on the nearest form ancestor of the
    /// first match. Returns `false` when no form ancestor exists.
    async fn submit_ancestor_form(&self, selector: &str) -> Result<bool, BridgeError>;
}
