//! Sync orchestrator.
//!
//! Composes the mapper, matcher, API client, and record store into the
//! operator-facing operations. Owns the correlation lifecycle:
//!
//! `Unlinked → (sync_one success | link_existing) → Linked(external_id)
//!  → delete_remote → Unlinked`
//!
//! `sync_one`, `sync_all`, and `delete_remote` convert every error into a
//! result value at the per-record boundary: a sync failure must never
//! block or roll back the primary write that triggered it.

use crate::api_client::PosApiClient;
use crate::error::{SyncError, SyncResult};
use crate::mapper::to_external;
use crate::matcher::rank_candidates;
use crate::store::RecordStore;
use crate::types::{
    BatchReport, DeleteOutcome, ExternalRecord, LocalRecord,
    ReconciliationEntry, SyncOutcome,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Sentinel used when an imported external name is missing a half.
const UNKNOWN_NAME: &str = "(unknown)";
/// Sentinel category for imported records pending manual follow-up.
const IMPORT_CATEGORY: &str = "unverified";

/// Drives sync, deletion, and reconciliation against the POS directory.
pub struct SyncOrchestrator {
    store: Arc<dyn RecordStore>,
    client: PosApiClient,
    country_code: String,
}

impl SyncOrchestrator {
    pub fn new(
        store: Arc<dyn RecordStore>,
        client: PosApiClient,
        country_code: String,
    ) -> Self {
        Self {
            store,
            client,
            country_code,
        }
    }

    /// Syncs one local record to the POS directory.
    ///
    /// Never returns an error: any failure in the load → map → upsert →
    /// persist chain becomes `SyncOutcome::Failed`. Re-running on a linked
    /// record reuses the stored external id, so no duplicate customer is
    /// created. Two near-simultaneous calls for the same id can race on
    /// the `external_id` write; sync is best-effort and unguarded here.
    pub async fn sync_one(&self, id: Uuid) -> SyncOutcome {
        match self.try_sync_one(id).await {
            Ok(external_id) => SyncOutcome::Synced { external_id },
            Err(e) => {
                warn!(%id, error = %e, "record sync failed");
                SyncOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn try_sync_one(&self, id: Uuid) -> SyncResult<String> {
        let local = self
            .store
            .get(id)
            .await?
            .ok_or(SyncError::NotFound(id))?;

        let mapped = to_external(&local, &self.country_code);
        let remote = self.client.upsert(&mapped).await?;
        let external_id = remote.id.ok_or_else(|| {
            SyncError::RemoteApi {
                status: 200,
                body: "upsert response missing customer id".to_string(),
            }
        })?;

        self.store
            .set_external_id(id, Some(&external_id))
            .await?;
        Ok(external_id)
    }

    /// Syncs every active record, sequentially to respect the POS rate
    /// limits. One record's failure never aborts the batch.
    pub async fn sync_all(&self) -> BatchReport {
        let records = match self.store.list_active().await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "bulk sync aborted: could not list records");
                let mut report = BatchReport::default();
                report.errors.push(e.to_string());
                return report;
            }
        };

        let mut report = BatchReport::default();
        for record in records {
            match self.sync_one(record.id).await {
                SyncOutcome::Synced { .. } => report.record_success(),
                SyncOutcome::Failed { error } => {
                    report.record_failure(record.id, &error)
                }
            }
        }

        info!(
            total = report.total,
            succeeded = report.succeeded,
            failed = report.failed,
            "bulk sync finished"
        );
        report
    }

    /// Deletes the remote counterpart of a local record and clears the
    /// correlation. No-op success when the record was never linked. Never
    /// returns an error.
    pub async fn delete_remote(&self, id: Uuid) -> DeleteOutcome {
        match self.try_delete_remote(id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(%id, error = %e, "remote delete failed");
                DeleteOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn try_delete_remote(&self, id: Uuid) -> SyncResult<DeleteOutcome> {
        let local = self
            .store
            .get(id)
            .await?
            .ok_or(SyncError::NotFound(id))?;

        let Some(external_id) = local.external_id else {
            return Ok(DeleteOutcome::NotLinked);
        };

        self.client.delete(&external_id).await?;
        self.store.set_external_id(id, None).await?;
        Ok(DeleteOutcome::Deleted { external_id })
    }

    /// Lists every external customer with its ranked local match
    /// candidates. Drains all listing pages first; performs no writes.
    pub async fn list_candidates(
        &self,
    ) -> SyncResult<Vec<ReconciliationEntry>> {
        let externals = self.fetch_all_customers().await?;
        let locals = self.store.list_active().await?;

        Ok(externals
            .into_iter()
            .map(|external| {
                let candidates = rank_candidates(&external, &locals);
                ReconciliationEntry {
                    external,
                    candidates,
                }
            })
            .collect())
    }

    async fn fetch_all_customers(&self) -> SyncResult<Vec<ExternalRecord>> {
        let mut customers = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self.client.list(cursor.as_deref(), None).await?;
            customers.extend(page.customers);
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(customers)
    }

    /// Creates a local record from an external customer the operator judged
    /// to have no local match.
    ///
    /// The external name is split on whitespace: first token → first name,
    /// rest → last name, `"(unknown)"` when a half is absent. Fields the
    /// clinic requires but the POS cannot supply get explicit sentinels and
    /// the record is flagged `needs_review` for manual follow-up instead of
    /// a silent guess.
    pub async fn import_as_new(
        &self,
        external: &ExternalRecord,
    ) -> SyncResult<LocalRecord> {
        let mut parts = external.name.split_whitespace();
        let first_name = parts
            .next()
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());
        let rest: Vec<&str> = parts.collect();
        let last_name = if rest.is_empty() {
            UNKNOWN_NAME.to_string()
        } else {
            rest.join(" ")
        };

        let record = LocalRecord {
            id: Uuid::new_v4(),
            first_name,
            middle_name: None,
            last_name,
            email: external.email.clone(),
            phone: external.phone.clone(),
            address: external.address.clone(),
            code: external.code.clone().unwrap_or_default(),
            birth_date: None,
            category: Some(IMPORT_CATEGORY.to_string()),
            external_id: external.id.clone(),
            deleted_at: None,
            needs_review: true,
        };

        self.store.insert(record.clone()).await?;
        info!(id = %record.id, external_id = ?record.external_id, "imported external customer");
        Ok(record)
    }

    /// Unconditionally overwrites the stored correlation. No remote
    /// existence check; the caller got the id from a prior listing.
    pub async fn link_existing(
        &self,
        local_id: Uuid,
        external_id: &str,
    ) -> SyncResult<()> {
        self.store
            .get(local_id)
            .await?
            .ok_or(SyncError::NotFound(local_id))?;
        self.store
            .set_external_id(local_id, Some(external_id))
            .await?;
        info!(%local_id, external_id, "linked records");
        Ok(())
    }
}
