//! Timing configuration loaded from the environment.
//!
//! Every wait in the bridge is tunable without code edits: third-party pages
//! drift, and a deployment against a slow tenant may need longer submit waits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_submit_poll_interval_ms() -> u64 {
    200
}

fn default_submit_max_wait_ms() -> u64 {
    5000
}

fn default_upload_mount_delay_ms() -> u64 {
    500
}

fn default_ready_poll_interval_ms() -> u64 {
    200
}

fn default_ready_max_wait_ms() -> u64 {
    10_000
}

/// Bridge timing knobs.
///
/// | Env | Default | Description |
/// |-----|---------|-------------|
/// | CHATBRIDGE_SUBMIT_POLL_INTERVAL_MS | 200 | Tick interval while waiting for the submit control to enable. |
/// | CHATBRIDGE_SUBMIT_MAX_WAIT_MS | 5000 | Deadline before the Enter-key fallback fires. |
/// | CHATBRIDGE_UPLOAD_MOUNT_DELAY_MS | 500 | Grace period for a lazily mounted file input after clicking an upload button. |
/// | CHATBRIDGE_READY_POLL_INTERVAL_MS | 200 | Tick interval while waiting for the chat UI to mount. |
/// | CHATBRIDGE_READY_MAX_WAIT_MS | 10000 | Deadline for the chat UI readiness wait. |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default = "default_submit_poll_interval_ms")]
    pub submit_poll_interval_ms: u64,
    #[serde(default = "default_submit_max_wait_ms")]
    pub submit_max_wait_ms: u64,
    #[serde(default = "default_upload_mount_delay_ms")]
    pub upload_mount_delay_ms: u64,
    #[serde(default = "default_ready_poll_interval_ms")]
    pub ready_poll_interval_ms: u64,
    #[serde(default = "default_ready_max_wait_ms")]
    pub ready_max_wait_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            submit_poll_interval_ms: default_submit_poll_interval_ms(),
            submit_max_wait_ms: default_submit_max_wait_ms(),
            upload_mount_delay_ms: default_upload_mount_delay_ms(),
            ready_poll_interval_ms: default_ready_poll_interval_ms(),
            ready_max_wait_ms: default_ready_max_wait_ms(),
        }
    }
}

fn env_ms(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or(default),
        Err(_) => default,
    }
}

impl BridgeConfig {
    /// Load from `CHATBRIDGE_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            submit_poll_interval_ms: env_ms(
                "CHATBRIDGE_SUBMIT_POLL_INTERVAL_MS",
                default_submit_poll_interval_ms(),
            ),
            submit_max_wait_ms: env_ms(
                "CHATBRIDGE_SUBMIT_MAX_WAIT_MS",
                default_submit_max_wait_ms(),
            ),
            upload_mount_delay_ms: env_ms(
                "CHATBRIDGE_UPLOAD_MOUNT_DELAY_MS",
                default_upload_mount_delay_ms(),
            ),
            ready_poll_interval_ms: env_ms(
                "CHATBRIDGE_READY_POLL_INTERVAL_MS",
                default_ready_poll_interval_ms(),
            ),
            ready_max_wait_ms: env_ms("CHATBRIDGE_READY_MAX_WAIT_MS", default_ready_max_wait_ms()),
        }
    }

    pub fn submit_poll_interval(&self) -> Duration {
        Duration::from_millis(self.submit_poll_interval_ms)
    }

    pub fn submit_max_wait(&self) -> Duration {
        Duration::from_millis(self.submit_max_wait_ms)
    }

    pub fn upload_mount_delay(&self) -> Duration {
        Duration::from_millis(self.upload_mount_delay_ms)
    }

    pub fn ready_poll_interval(&self) -> Duration {
        Duration::from_millis(self.ready_poll_interval_ms)
    }

    pub fn ready_max_wait(&self) -> Duration {
        Duration::from_millis(self.ready_max_wait_ms)
    }
}
