//! Homework API client modules
//!
//! Split into the raw HTTP client, its configuration, and the polling loop
//! that drives status-change notifications.

pub mod api;
pub mod config;
pub mod poller;

// Re-export main types for convenience
pub use api::HomeworkApi;
pub use config::{ClientConfig, PollingConfig, RequestConfig};
pub use poller::{CycleOutcome, HomeworkPoller, SessionState};
