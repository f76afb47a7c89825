//! Weighted entity matching for reconciliation.
//!
//! Scores one external customer against the full local record set using
//! additive, independent signals. Signals never short-circuit each other,
//! so a record with a changed phone but unchanged email still surfaces
//! with meaningful confidence instead of being eliminated outright.
//!
//! Full-catalog reconciliation is O(n·m); fine at low-thousands scale.
//! TODO: pre-index locals by normalized email/phone before the catalogs
//! grow past that.

use crate::types::{ExternalRecord, LocalRecord, MatchCandidate, MatchReason};

pub const SCORE_ALREADY_LINKED: u32 = 100;
pub const SCORE_EMAIL: u32 = 50;
pub const SCORE_PHONE: u32 = 50;
pub const SCORE_NAME_EXACT: u32 = 30;
pub const SCORE_NAME_PARTIAL: u32 = 15;

/// Scores every local record against one external record, returning
/// candidates ranked by descending score. Zero-score records are excluded;
/// ties keep the locals' input order (the sort is stable).
pub fn rank_candidates(
    external: &ExternalRecord,
    locals: &[LocalRecord],
) -> Vec<MatchCandidate> {
    let ext_name = external.name.trim().to_lowercase();
    let ext_email = external.email.as_deref().map(str::to_lowercase);
    let ext_digits = external.phone.as_deref().map(digits_only);

    let mut candidates: Vec<MatchCandidate> = locals
        .iter()
        .filter_map(|local| {
            let (score, reasons) =
                score_one(external, local, &ext_name, &ext_email, &ext_digits);
            if score == 0 {
                None
            } else {
                Some(MatchCandidate {
                    local: local.clone(),
                    score,
                    reasons,
                })
            }
        })
        .collect();

    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}

fn score_one(
    external: &ExternalRecord,
    local: &LocalRecord,
    ext_name: &str,
    ext_email: &Option<String>,
    ext_digits: &Option<String>,
) -> (u32, Vec<MatchReason>) {
    let mut score = 0;
    let mut reasons = Vec::new();

    if let (Some(local_id), Some(ext_id)) = (&local.external_id, &external.id)
        && local_id == ext_id
    {
        score += SCORE_ALREADY_LINKED;
        reasons.push(MatchReason::AlreadyLinked);
    }

    if let (Some(local_email), Some(ext_email)) = (&local.email, ext_email)
        && !local_email.is_empty()
        && local_email.to_lowercase() == *ext_email
    {
        score += SCORE_EMAIL;
        reasons.push(MatchReason::EmailMatch);
    }

    // Digits-only comparison; no trunk/country-code folding, so "0917..."
    // and "+63 917..." only match when their digit strings are equal.
    if let (Some(local_phone), Some(ext_digits)) = (&local.phone, ext_digits) {
        let local_digits = digits_only(local_phone);
        if !local_digits.is_empty() && local_digits == *ext_digits {
            score += SCORE_PHONE;
            reasons.push(MatchReason::PhoneMatch);
        }
    }

    let full_name =
        format!("{} {}", local.first_name, local.last_name).to_lowercase();
    let last_name = local.last_name.to_lowercase();
    if !ext_name.is_empty() && ext_name == full_name {
        score += SCORE_NAME_EXACT;
        reasons.push(MatchReason::ExactNameMatch);
    } else if !ext_name.is_empty()
        && ((!last_name.is_empty() && ext_name.contains(&last_name))
            || full_name.contains(ext_name))
    {
        // Weaker signal, mutually exclusive with the exact match so the
        // same evidence is never counted twice.
        score += SCORE_NAME_PARTIAL;
        reasons.push(MatchReason::PartialNameMatch);
    }

    (score, reasons)
}

/// Strips everything but ASCII digits.
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}
