//! Pure transform from a local person record to the POS customer shape.
//!
//! Total and deterministic: missing optional fields become omitted external
//! fields, over-length values are truncated, and nothing here can fail.
//! Violating a POS field limit is a bug in this module, not a runtime
//! error, because every outbound value passes through `truncate`.

use crate::types::{ExternalRecord, LocalRecord};

pub const NAME_MAX: usize = 64;
pub const EMAIL_MAX: usize = 100;
pub const PHONE_MAX: usize = 15;
pub const ADDRESS_MAX: usize = 192;
pub const CODE_MAX: usize = 40;

/// Maps a local record to the external customer shape.
///
/// Visit aggregates are never populated from this side. The POS system
/// owns visit history.
pub fn to_external(local: &LocalRecord, country_code: &str) -> ExternalRecord {
    let name_parts: Vec<&str> = [
        local.first_name.as_str(),
        local.middle_name.as_deref().unwrap_or(""),
        local.last_name.as_str(),
    ]
    .into_iter()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect();

    ExternalRecord {
        id: local.external_id.clone(),
        name: truncate(&name_parts.join(" "), NAME_MAX),
        email: non_empty(local.email.as_deref(), EMAIL_MAX),
        phone: non_empty(local.phone.as_deref(), PHONE_MAX),
        address: non_empty(local.address.as_deref(), ADDRESS_MAX),
        code: non_empty(Some(&local.code), CODE_MAX),
        note: Some(format!("clinic record {}", local.code)),
        country_code: Some(country_code.to_string()),
        visit_count: None,
        last_visit_at: None,
    }
}

/// Truncates to at most `max` characters, char-boundary safe.
pub fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Trims and truncates an optional field; empty values are omitted rather
/// than sent as empty strings.
fn non_empty(value: Option<&str>, max: usize) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(truncate(trimmed, max))
    }
}
