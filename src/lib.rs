//! Sync engine bridging the clinic's person records to the POS customer
//! directory.
//!
//! The two systems share no key. This crate owns the correlation between
//! them:
//! - Record mapper (local person → POS customer shape, truncation rules)
//! - Weighted matching engine for operator-assisted reconciliation
//! - API client for the POS customer endpoints
//! - Sync orchestrator with per-record failure isolation
//!
//! Sync is best-effort and eventually consistent: the primary write path
//! never blocks or fails because the POS system is unavailable.

pub mod api_client;
pub mod config;
pub mod error;
pub mod mapper;
pub mod matcher;
pub mod orchestrator;
pub mod store;
pub mod types;

pub use config::BridgeConfig;
pub use error::{SyncError, SyncResult};
pub use orchestrator::SyncOrchestrator;
pub use types::*;
