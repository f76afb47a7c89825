//! Shared fixtures for integration tests.
#![allow(dead_code)]

use pos_bridge::config::BridgeConfig;
use pos_bridge::types::{ExternalRecord, LocalRecord};
use uuid::Uuid;

/// Config pointing at a wiremock server, token pre-set.
pub fn test_config(base_url: &str) -> BridgeConfig {
    BridgeConfig {
        api_base_url: base_url.to_string(),
        api_token: Some("test-token".into()),
        default_country_code: "PH".into(),
        page_size: 100,
        request_timeout_secs: 5,
    }
}

/// A minimal active local record.
pub fn person(first: &str, last: &str) -> LocalRecord {
    LocalRecord {
        id: Uuid::new_v4(),
        first_name: first.to_string(),
        middle_name: None,
        last_name: last.to_string(),
        email: None,
        phone: None,
        address: None,
        code: format!("P-{}", &Uuid::new_v4().to_string()[..8]),
        birth_date: None,
        category: None,
        external_id: None,
        deleted_at: None,
        needs_review: false,
    }
}

/// A local record already correlated to a POS customer.
pub fn linked_person(first: &str, last: &str, external_id: &str) -> LocalRecord {
    LocalRecord {
        external_id: Some(external_id.to_string()),
        ..person(first, last)
    }
}

/// A minimal external customer.
pub fn customer(name: &str) -> ExternalRecord {
    ExternalRecord {
        name: name.to_string(),
        ..ExternalRecord::default()
    }
}

/// An external customer as the POS would return it, id included.
pub fn stored_customer(id: &str, name: &str) -> ExternalRecord {
    ExternalRecord {
        id: Some(id.to_string()),
        ..customer(name)
    }
}
