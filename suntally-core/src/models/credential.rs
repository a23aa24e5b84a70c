//! Cached bearer credential and the expiry policy applied on refresh.
//!
//! The credential is persisted between runs as a small JSON record:
//!
//! ```json
//! {
//!   "bearerToken": "Bearer eyJhbGci...",
//!   "expiryDate": "2023-08-14 13:30:00"
//! }
//! ```
//!
//! `expiryDate` is local wall-clock time without an offset, formatted
//! `YYYY-MM-DD HH:MM:SS`.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

// ============================================================================
// Cached Credential
// ============================================================================

/// A bearer credential with an absolute expiry timestamp.
///
/// `bearer_token` holds the full `Authorization` header value, including the
/// `Bearer ` prefix, so a cache hit can be sent on the wire unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedCredential {
    /// Full `Authorization` header value (`Bearer <access token>`).
    #[serde(rename = "bearerToken")]
    pub bearer_token: String,

    /// Local time after which the token must not be reused.
    #[serde(rename = "expiryDate", with = "expiry_format")]
    pub expiry: NaiveDateTime,
}

impl CachedCredential {
    /// Creates a credential from a header value and expiry timestamp.
    pub fn new(bearer_token: impl Into<String>, expiry: NaiveDateTime) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            expiry,
        }
    }

    /// Returns true while the credential may still be used.
    ///
    /// The expiry is exclusive: at `now == expiry` the credential is stale
    /// and a refresh is required.
    pub fn is_fresh(&self, now: NaiveDateTime) -> bool {
        now < self.expiry
    }
}

// ============================================================================
// Expiry Policy
// ============================================================================

/// Expiry assigned to a freshly granted token: start of the grant day plus
/// the `expires_in` duration reported by the identity endpoint.
///
/// The anchor is midnight of the grant day, not the grant instant. A token
/// granted at 23:59 with a one-hour duration therefore expires at 01:00 of
/// the same day and is stale immediately; the only cost is an extra refresh
/// on the next run. Callers must not substitute "now + duration" arithmetic.
pub fn expiry_from_day_start(granted_at: NaiveDateTime, expires_in_secs: i64) -> NaiveDateTime {
    granted_at.date().and_time(NaiveTime::MIN) + Duration::seconds(expires_in_secs)
}

// ============================================================================
// Serde Format
// ============================================================================

/// Serde codec for the cache record's `YYYY-MM-DD HH:MM:SS` timestamps.
pub mod expiry_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Serializes a timestamp as `YYYY-MM-DD HH:MM:SS`.
    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    /// Parses a `YYYY-MM-DD HH:MM:SS` timestamp.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
