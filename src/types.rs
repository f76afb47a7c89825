//! Shared types for the sync engine.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The clinic's authoritative person record.
///
/// Owned by the primary store; the sync engine reads all fields and writes
/// only `external_id` (and `needs_review` when importing).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LocalRecord {
    pub id: Uuid,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Human-facing patient code, embedded in the mapped note for
    /// traceability.
    pub code: String,
    pub birth_date: Option<NaiveDate>,
    pub category: Option<String>,
    /// Correlation to the POS customer record. At most one per record,
    /// stored denormalized; there is no separate correlation table.
    pub external_id: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    /// Set on operator imports whose required fields were filled with
    /// sentinels; cleared manually after follow-up.
    #[serde(default)]
    pub needs_review: bool,
}

impl LocalRecord {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// The POS system's customer representation.
///
/// `id` is absent on create and present on update; the upsert endpoint
/// keys off it. Optional fields are omitted on the wire, never sent as
/// empty strings.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit_at: Option<DateTime<Utc>>,
}

/// One page of the POS customer listing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPage {
    pub customers: Vec<ExternalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Why a local record was scored against an external one.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    AlreadyLinked,
    EmailMatch,
    PhoneMatch,
    ExactNameMatch,
    PartialNameMatch,
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchReason::AlreadyLinked => "already linked",
            MatchReason::EmailMatch => "email match",
            MatchReason::PhoneMatch => "phone match",
            MatchReason::ExactNameMatch => "exact name match",
            MatchReason::PartialNameMatch => "partial name match",
        };
        f.write_str(label)
    }
}

/// A local record scored against one external record during reconciliation.
/// Ephemeral: produced for the operator, never persisted.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MatchCandidate {
    pub local: LocalRecord,
    pub score: u32,
    pub reasons: Vec<MatchReason>,
}

/// Result of a single sync attempt. A tagged value, not an error: sync
/// failures are expected conditions the triggering write must not see.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    Synced { external_id: String },
    Failed { error: String },
}

impl SyncOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncOutcome::Synced { .. })
    }

    pub fn external_id(&self) -> Option<&str> {
        match self {
            SyncOutcome::Synced { external_id } => Some(external_id),
            SyncOutcome::Failed { .. } => None,
        }
    }
}

/// Result of a remote deletion attempt. `NotLinked` is the no-op success
/// for records that never synced.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted { external_id: String },
    NotLinked,
    Failed { error: String },
}

impl DeleteOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, DeleteOutcome::Failed { .. })
    }
}

/// Accumulated outcome of a bulk sync.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// One `"{id}: {message}"` entry per failed record.
    pub errors: Vec<String>,
}

impl BatchReport {
    pub fn record_success(&mut self) {
        self.total += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, id: Uuid, message: &str) {
        self.total += 1;
        self.failed += 1;
        self.errors.push(format!("{id}: {message}"));
    }
}

/// One external record with its ranked local candidates, produced by the
/// reconciliation listing. Read-only.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ReconciliationEntry {
    pub external: ExternalRecord,
    pub candidates: Vec<MatchCandidate>,
}
