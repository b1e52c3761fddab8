//! chatbridge-core: shared contract between the host tool-execution framework
//! and per-site chat adapters.
//!
//! - **SiteAdapter**: operations an adapter exposes (insert, attach, submit).
//! - **AdapterRegistry**: explicit hostname-keyed registry (no ambient globals).
//! - **BridgeError**: the failure taxonomy; never crosses the adapter boundary.
//! - **Poller**: cancellable interval timer backing every wait-for-state loop.
//! - **BridgeConfig**: env-tunable timing knobs.

mod adapter;
mod config;
mod error;
mod poll;

pub use adapter::{AdapterRegistry, FilePayload, SiteAdapter};
pub use config::BridgeConfig;
pub use error::BridgeError;
pub use poll::{PollOutcome, Poller};
