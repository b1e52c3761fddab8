//! CopilotAdapter: wires the locator, insertion, attachment, and submission
//! routines into the host framework's `SiteAdapter` contract.
//!
//! Per the contract, every operation here catches its own failures: callers
//! see a bare boolean and a log line, never an error value. `false` means
//! "retry later or surface a generic error" to the host framework.

use std::time::Duration;

use async_trait::async_trait;
use chatbridge_core::{
    AdapterRegistry, BridgeConfig, BridgeError, FilePayload, PollOutcome, Poller, SiteAdapter,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::attach;
use crate::driver::PageDriver;
use crate::insert;
use crate::locator::locate_chat_input;
use crate::submit;

pub const ADAPTER_NAME: &str = "m365-copilot";
pub const COPILOT_HOSTNAME: &str = "m365.cloud.microsoft";

/// The Microsoft 365 Copilot web chat adapter, generic over the page driver
/// so tests run against a recording mock and production runs over CDP.
pub struct CopilotAdapter<D> {
    driver: D,
    config: BridgeConfig,
}

impl<D: PageDriver + 'static> CopilotAdapter<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            config: BridgeConfig::from_env(),
        }
    }

    pub fn with_config(mut self, config: BridgeConfig) -> Self {
        self.config = config;
        self
    }

    /// Register this adapter with the host framework's registry.
    pub fn register(self, registry: &mut AdapterRegistry) {
        registry.register(std::sync::Arc::new(self));
    }
}

/// Poll until the chat input mounts, returning the winning strategy name.
/// A deadline without a match is a hard [`BridgeError::Timeout`]; the adapter
/// boundary reduces it to `false` like every other failure.
async fn wait_for_chat_ui(
    driver: &dyn PageDriver,
    interval: Duration,
    max_wait: Duration,
) -> Result<&'static str, BridgeError> {
    let poller = Poller::new(interval, max_wait);
    let outcome = poller
        .run(move || async move {
            match locate_chat_input(driver).await {
                Ok(Some(strategy)) => Some(strategy.name),
                Ok(None) | Err(_) => None,
            }
        })
        .await;
    match outcome {
        PollOutcome::Completed(strategy) => Ok(strategy),
        PollOutcome::TimedOut => Err(BridgeError::Timeout {
            waited_ms: max_wait.as_millis() as u64,
        }),
    }
}

#[async_trait]
impl<D: PageDriver> SiteAdapter for CopilotAdapter<D> {
    fn name(&self) -> &str {
        ADAPTER_NAME
    }

    fn hostname(&self) -> &str {
        COPILOT_HOSTNAME
    }

    async fn ready(&self, max_wait: Option<Duration>) -> bool {
        let max_wait = max_wait.unwrap_or_else(|| self.config.ready_max_wait());
        match wait_for_chat_ui(&self.driver, self.config.ready_poll_interval(), max_wait).await {
            Ok(strategy) => {
                debug!(target: "chatbridge::copilot", strategy, "chat UI ready");
                true
            }
            Err(err) => {
                warn!(target: "chatbridge::copilot", %err, "chat UI never appeared");
                false
            }
        }
    }

    async fn insert_tool_result(&self, value: &Value) -> bool {
        match insert::insert_value(&self.driver, value).await {
            Ok(()) => true,
            Err(err) => {
                warn!(target: "chatbridge::copilot", %err, "tool result insertion failed");
                false
            }
        }
    }

    async fn attach_file(&self, file: &FilePayload) -> bool {
        match attach::attach_file(&self.driver, file, self.config.upload_mount_delay()).await {
            Ok(strategy) => {
                debug!(
                    target: "chatbridge::copilot",
                    strategy = strategy.as_str(),
                    file = %file.name,
                    "file attachment succeeded"
                );
                true
            }
            Err(err) => {
                warn!(target: "chatbridge::copilot", %err, file = %file.name, "file attachment failed");
                false
            }
        }
    }

    async fn submit(&self, max_wait: Option<Duration>) -> bool {
        match submit::submit(&self.driver, &self.config, max_wait).await {
            Ok(outcome) => {
                debug!(target: "chatbridge::copilot", ?outcome, "submission triggered");
                true
            }
            Err(err) => {
                warn!(target: "chatbridge::copilot", %err, "submission failed");
                false
            }
        }
    }

    async fn cleanup(&self) {
        // Nothing held on the page side; located references never outlive a call.
        debug!(target: "chatbridge::copilot", "adapter cleaned up");
    }
}
