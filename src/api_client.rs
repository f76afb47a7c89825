//! HTTP client for the POS customer API.
//!
//! Thin authenticated transport: cursor-paginated listing, get-by-id,
//! upsert, delete. Performs no retries; retry policy belongs to the
//! orchestrator.

use crate::config::BridgeConfig;
use crate::error::{SyncError, SyncResult};
use crate::types::{CustomerPage, ExternalRecord};
use reqwest::Client;
use tracing::debug;

/// Client for the POS customer endpoints.
///
/// Constructable without a token for dependency wiring and tests; the
/// token is checked on the first actual call.
pub struct PosApiClient {
    client: Client,
    config: BridgeConfig,
}

impl PosApiClient {
    pub fn new(config: BridgeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self { client, config }
    }

    /// Lists one page of the customer directory.
    pub async fn list(
        &self,
        cursor: Option<&str>,
        limit: Option<u32>,
    ) -> SyncResult<CustomerPage> {
        let token = self.token()?;
        let url = format!("{}/api/customers", self.config.api_base_url);

        let mut req = self.client.get(&url).bearer_auth(token);
        if let Some(cursor) = cursor {
            req = req.query(&[("cursor", cursor)]);
        }
        if let Some(limit) = limit {
            req = req.query(&[("limit", limit.to_string())]);
        }

        debug!(cursor, "GET /api/customers");
        let resp = check(req.send().await?).await?;
        Ok(resp.json().await?)
    }

    /// Fetches one customer by its POS id.
    pub async fn get(&self, id: &str) -> SyncResult<ExternalRecord> {
        let token = self.token()?;
        let url = format!("{}/api/customers/{id}", self.config.api_base_url);

        debug!(id, "GET /api/customers/{{id}}");
        let resp = check(self.client.get(&url).bearer_auth(token).send().await?)
            .await?;
        Ok(resp.json().await?)
    }

    /// Creates or updates a customer: `id` absent selects create, present
    /// selects update. Returns the record as stored remotely, id included.
    pub async fn upsert(&self, record: &ExternalRecord) -> SyncResult<ExternalRecord> {
        let token = self.token()?;

        let req = match &record.id {
            Some(id) => {
                debug!(id, "PUT /api/customers/{{id}}");
                let url =
                    format!("{}/api/customers/{id}", self.config.api_base_url);
                self.client.put(&url)
            }
            None => {
                debug!("POST /api/customers");
                let url = format!("{}/api/customers", self.config.api_base_url);
                self.client.post(&url)
            }
        };

        let resp = check(req.bearer_auth(token).json(record).send().await?).await?;
        Ok(resp.json().await?)
    }

    /// Deletes a customer by its POS id.
    pub async fn delete(&self, id: &str) -> SyncResult<()> {
        let token = self.token()?;
        let url = format!("{}/api/customers/{id}", self.config.api_base_url);

        debug!(id, "DELETE /api/customers/{{id}}");
        check(self.client.delete(&url).bearer_auth(token).send().await?).await?;
        Ok(())
    }

    fn token(&self) -> SyncResult<&str> {
        self.config
            .api_token
            .as_deref()
            .ok_or_else(|| SyncError::Config("POS API token not set".to_string()))
    }
}

/// Maps non-success responses to `RemoteApi`, preserving status and body.
async fn check(resp: reqwest::Response) -> SyncResult<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(SyncError::RemoteApi {
        status: status.as_u16(),
        body,
    })
}
