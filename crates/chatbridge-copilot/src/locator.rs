//! Ordered CSS-selector fallback chains for the Copilot chat UI.
//!
//! The page's markup is third-party and unversioned, so nothing here assumes
//! a stable id. Each chain is an explicit ordered list of named strategies
//! evaluated in sequence; the first match wins, with no scoring and no
//! disambiguation between multiple matches within one selector. Every win
//! logs the strategy name so UI drift shows up in the logs before it shows up
//! as a hard failure.

use chatbridge_core::BridgeError;
use tracing::debug;

use crate::driver::PageDriver;

/// One step of a fallback chain: a human-readable tag plus the selector it
/// probes. The tag is what appears in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatorStrategy {
    pub name: &'static str,
    pub selector: &'static str,
}

/// Chat input chain, strongest signal first: a class token the Copilot
/// composer carries, then placeholder text variants, then aria-labels, then
/// any textarea at all as a last resort.
pub const CHAT_INPUT_STRATEGIES: &[LocatorStrategy] = &[
    LocatorStrategy {
        name: "class-token",
        selector: r#"textarea[class*="chat-input"]"#,
    },
    LocatorStrategy {
        name: "placeholder-message",
        selector: r#"textarea[placeholder*="Message Copilot"]"#,
    },
    LocatorStrategy {
        name: "placeholder-ask",
        selector: r#"textarea[placeholder*="Ask me anything"]"#,
    },
    LocatorStrategy {
        name: "aria-label-message",
        selector: r#"textarea[aria-label*="Message"]"#,
    },
    LocatorStrategy {
        name: "aria-label-chat",
        selector: r#"textarea[aria-label*="chat"]"#,
    },
    LocatorStrategy {
        name: "any-textarea",
        selector: "textarea",
    },
];

/// Submit control chain: aria-label variants, `type=submit`, buttons sharing
/// a container or form with the input (`:has()` stands in for the ancestor
/// walk), then two icon heuristics.
pub const SUBMIT_STRATEGIES: &[LocatorStrategy] = &[
    LocatorStrategy {
        name: "aria-label-send",
        selector: r#"button[aria-label*="Send"]"#,
    },
    LocatorStrategy {
        name: "aria-label-submit",
        selector: r#"button[aria-label*="Submit"]"#,
    },
    LocatorStrategy {
        name: "type-submit",
        selector: r#"button[type="submit"]"#,
    },
    LocatorStrategy {
        name: "input-container-button",
        selector: r#"div:has(> textarea) button"#,
    },
    LocatorStrategy {
        name: "form-ancestor-button",
        selector: r#"form:has(textarea) button"#,
    },
    LocatorStrategy {
        name: "send-icon",
        selector: r#"button:has(svg[data-icon*="send"])"#,
    },
    LocatorStrategy {
        name: "send-testid",
        selector: r#"button[data-testid*="send"]"#,
    },
];

/// Upload-trigger button chain used by the remount attachment strategy.
pub const UPLOAD_BUTTON_STRATEGIES: &[LocatorStrategy] = &[
    LocatorStrategy {
        name: "aria-label-attach",
        selector: r#"button[aria-label*="attach" i]"#,
    },
    LocatorStrategy {
        name: "aria-label-upload",
        selector: r#"button[aria-label*="upload" i]"#,
    },
    LocatorStrategy {
        name: "title-attach",
        selector: r#"button[title*="attach" i]"#,
    },
    LocatorStrategy {
        name: "title-upload",
        selector: r#"button[title*="upload" i]"#,
    },
];

/// Probe a chain in declared order and return the first strategy whose
/// selector matches. Returns the strategy, not a node: callers re-query by
/// selector on every use because the page may re-render at any time.
pub async fn locate(
    driver: &dyn PageDriver,
    what: &'static str,
    strategies: &'static [LocatorStrategy],
) -> Result<Option<&'static LocatorStrategy>, BridgeError> {
    for strategy in strategies {
        if driver.exists(strategy.selector).await? {
            debug!(
                target: "chatbridge::copilot",
                what,
                strategy = strategy.name,
                "locator strategy matched"
            );
            return Ok(Some(strategy));
        }
    }
    debug!(target: "chatbridge::copilot", what, "locator chain exhausted");
    Ok(None)
}

pub async fn locate_chat_input(
    driver: &dyn PageDriver,
) -> Result<Option<&'static LocatorStrategy>, BridgeError> {
    locate(driver, "chat input", CHAT_INPUT_STRATEGIES).await
}

pub async fn locate_submit_button(
    driver: &dyn PageDriver,
) -> Result<Option<&'static LocatorStrategy>, BridgeError> {
    locate(driver, "submit button", SUBMIT_STRATEGIES).await
}

pub async fn locate_upload_button(
    driver: &dyn PageDriver,
) -> Result<Option<&'static LocatorStrategy>, BridgeError> {
    locate(driver, "upload button", UPLOAD_BUTTON_STRATEGIES).await
}
