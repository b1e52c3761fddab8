//! Site adapter contract and registry.
//!
//! The host framework delivers tool results through a per-site adapter. Each
//! adapter maps the generic operations below onto one page's DOM structure.
//! Registration is an explicit, constructed registry passed through normal
//! composition — adapters are never hung off ambient global state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A file handed to an adapter for attachment. Bytes travel with the payload
/// so the adapter can materialize a browser `File` object on the page side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilePayload {
    pub name: String,
    /// MIME type, e.g. `text/plain` or `application/json`.
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FilePayload {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// Per-site integration object. Every operation catches its own failures and
/// reports a bare boolean: `false` means "retry later or surface a generic
/// error" — there is deliberately no structured error detail at this boundary.
#[async_trait]
pub trait SiteAdapter: Send + Sync {
    /// Short identifier, e.g. `"m365-copilot"`.
    fn name(&self) -> &str;

    /// Hostname this adapter targets, e.g. `"m365.cloud.microsoft"`.
    fn hostname(&self) -> &str;

    /// Wait until the site's chat UI has mounted. Adapters poll for their
    /// chat input rather than assuming the page is ready at attach time.
    /// `None` falls back to the adapter's configured readiness deadline.
    async fn ready(&self, max_wait: Option<Duration>) -> bool;

    /// Insert a tool result into the chat input. Non-string values are
    /// pretty-printed; existing content is preserved above a blank line.
    async fn insert_tool_result(&self, value: &Value) -> bool;

    /// Attach a file to the pending message, best effort.
    async fn attach_file(&self, file: &FilePayload) -> bool;

    /// Trigger submission of the composed message. `max_wait` bounds how long
    /// the adapter waits for the site's submit control to become enabled.
    async fn submit(&self, max_wait: Option<Duration>) -> bool;

    /// Release anything the adapter holds on the page. Called when the host
    /// framework tears the adapter down.
    async fn cleanup(&self);
}

/// Hostname-keyed adapter registry.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: HashMap<String, Arc<dyn SiteAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its own hostname. A later registration for
    /// the same hostname replaces the earlier one.
    pub fn register(&mut self, adapter: Arc<dyn SiteAdapter>) {
        self.adapters
            .insert(adapter.hostname().to_string(), adapter);
    }

    /// Resolve the adapter for a page hostname. Subdomains match their
    /// registered parent (`web.m365.cloud.microsoft` finds
    /// `m365.cloud.microsoft`).
    pub fn for_hostname(&self, hostname: &str) -> Option<Arc<dyn SiteAdapter>> {
        if let Some(adapter) = self.adapters.get(hostname) {
            return Some(Arc::clone(adapter));
        }
        self.adapters
            .iter()
            .find(|(registered, _)| {
                hostname
                    .strip_suffix(registered.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
            })
            .map(|(_, adapter)| Arc::clone(adapter))
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
