//! Auth domain models

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Digits in a generated code.
pub const OTP_LENGTH: usize = 6;

/// Minutes before an unconsumed code expires.
pub const OTP_TTL_MINUTES: i64 = 10;

/// One outstanding, unconsumed one-time code.
///
/// Keyed by the normalized email; at most one live record exists per email
/// and issuing a new code silently replaces the previous one.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    /// Normalized (lower-cased) email, the store key
    pub email: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Create a record expiring `ttl` from now.
    pub fn new(email: impl Into<String>, code: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            email: normalize_email(&email.into()),
            code: code.into(),
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Lower-case and trim an email so lookups are case-insensitive.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Generate a numeric code of `length` independently drawn digits.
///
/// Repeats and leading zeros are allowed. Uses the thread RNG; see DESIGN.md
/// for the randomness-hardening open question.
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
