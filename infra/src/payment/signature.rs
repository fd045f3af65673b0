//! Webhook signature verification.
//!
//! Stripe signs each webhook delivery with a header of the form
//! `t=<unix_timestamp>,v1=<hex_hmac>[,v1=...]`. The signed payload is the
//! timestamp, a literal `.`, and the raw request body. Verification
//! recomputes the HMAC-SHA256 under the endpoint secret, compares in
//! constant time, and rejects timestamps outside the tolerance window to
//! bound replay.

use chrono::Utc;
use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use ds_core::errors::{DomainError, DomainResult};

type HmacSha256 = Hmac<Sha256>;

fn invalid(message: &str) -> DomainError {
    DomainError::InvalidWebhook {
        message: message.to_string(),
    }
}

/// Verify a webhook signature header against the raw payload
///
/// # Arguments
/// * `payload` - Raw request body bytes, exactly as received
/// * `header` - Value of the `Stripe-Signature` header
/// * `secret` - Webhook endpoint signing secret
/// * `tolerance_seconds` - Accepted clock skew for the signed timestamp
pub fn verify(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_seconds: i64,
) -> DomainResult<()> {
    verify_at(payload, header, secret, tolerance_seconds, Utc::now().timestamp())
}

fn parse_header(header: &str) -> (Option<i64>, Vec<&str>) {
    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = value.parse().ok(),
            Some(("v1", value)) => signatures.push(value),
            _ => {}
        }
    }
    (timestamp, signatures)
}

fn verify_at(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_seconds: i64,
    now: i64,
) -> DomainResult<()> {
    let (timestamp, signatures) = parse_header(header);
    let timestamp = timestamp.ok_or_else(|| invalid("missing timestamp in signature header"))?;
    if signatures.is_empty() {
        return Err(invalid("missing v1 signature in signature header"));
    }

    if (now - timestamp).abs() > tolerance_seconds {
        return Err(invalid("webhook timestamp outside tolerance window"));
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| invalid("invalid webhook secret"))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    let expected = hex::encode(mac.finalize().into_bytes());

    // A rotated endpoint may deliver more than one v1 entry; any match
    // accepts.
    for candidate in signatures {
        if constant_time_eq(expected.as_bytes(), candidate.as_bytes()) {
            return Ok(());
        }
    }

    Err(invalid("webhook signature mismatch"))
}
