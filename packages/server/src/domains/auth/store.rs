//! OTP store - authoritative holder of at most one outstanding code per email
//!
//! Defined as a trait so a deployment can back it with an external cache with
//! native TTL eviction; the default in-process implementation keeps records
//! in a tokio `RwLock`ed map for exactly the process lifetime.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::models::{normalize_email, OtpRecord};

/// Result of an atomic check-and-consume attempt.
///
/// Callers collapse everything but `Consumed` into one generic failure so
/// unknown identities stay indistinguishable from wrong or expired codes;
/// the distinction exists for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// Code matched; the record has been removed (one-time use)
    Consumed,
    /// Code did not match; the record remains for further attempts
    Mismatch,
    /// Record had expired; it has been purged
    Expired,
    /// No record exists for the email
    Absent,
}

impl ConsumeOutcome {
    pub fn is_consumed(&self) -> bool {
        matches!(self, ConsumeOutcome::Consumed)
    }
}

/// Keyed, expiring credential store.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Unconditional upsert keyed by the normalized email. Replaces any
    /// prior live record for the same email.
    async fn put(&self, record: OtpRecord);

    /// Fetch the record for an email, if any.
    async fn get(&self, email: &str) -> Option<OtpRecord>;

    /// Remove the record for an email; idempotent.
    async fn delete(&self, email: &str);

    /// Atomically check `code` against the stored record and consume it on
    /// a match. Lookup, expiry check, comparison, and deletion happen under
    /// one write guard so a code can never be consumed twice.
    async fn consume(&self, email: &str, code: &str) -> ConsumeOutcome;

    /// Drop every expired record, returning how many were removed.
    async fn purge_expired(&self) -> usize;
}

/// In-memory OTP store
pub struct InMemoryOtpStore {
    records: RwLock<HashMap<String, OtpRecord>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryOtpStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn put(&self, record: OtpRecord) {
        let mut records = self.records.write().await;
        records.insert(record.email.clone(), record);
    }

    async fn get(&self, email: &str) -> Option<OtpRecord> {
        let records = self.records.read().await;
        records.get(&normalize_email(email)).cloned()
    }

    async fn delete(&self, email: &str) {
        let mut records = self.records.write().await;
        records.remove(&normalize_email(email));
    }

    async fn consume(&self, email: &str, code: &str) -> ConsumeOutcome {
        let key = normalize_email(email);
        let mut records = self.records.write().await;

        let record = match records.get(&key) {
            Some(record) => record,
            None => return ConsumeOutcome::Absent,
        };

        // Expired codes are purged on first verification attempt
        if record.is_expired(Utc::now()) {
            records.remove(&key);
            return ConsumeOutcome::Expired;
        }

        // Exact string equality, no normalization of the supplied code
        if record.code == code {
            records.remove(&key);
            ConsumeOutcome::Consumed
        } else {
            ConsumeOutcome::Mismatch
        }
    }

    async fn purge_expired(&self) -> usize {
        let mut records = self.records.write().await;
        let now = Utc::now();
        let before = records.len();
        records.retain(|_, record| !record.is_expired(now));
        before - records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn live_record(email: &str, code: &str) -> OtpRecord {
        OtpRecord::new(email, code, Duration::minutes(10))
    }

    fn expired_record(email: &str, code: &str) -> OtpRecord {
        let mut record = live_record(email, code);
        record.created_at = record.created_at - Duration::minutes(11);
        record.expires_at = record.expires_at - Duration::minutes(11);
        record
    }

    #[tokio::test]
    async fn test_consume_is_single_use() {
        let store = InMemoryOtpStore::new();
        store.put(live_record("a@b.com", "123456")).await;

        assert_eq!(store.consume("a@b.com", "123456").await, ConsumeOutcome::Consumed);
        assert_eq!(store.consume("a@b.com", "123456").await, ConsumeOutcome::Absent);
    }

    #[tokio::test]
    async fn test_wrong_code_leaves_record_in_place() {
        let store = InMemoryOtpStore::new();
        store.put(live_record("a@b.com", "123456")).await;

        assert_eq!(store.consume("a@b.com", "000000").await, ConsumeOutcome::Mismatch);
        assert!(store.get("a@b.com").await.is_some(), "record must survive a wrong guess");

        // A later correct guess before expiry still succeeds
        assert_eq!(store.consume("a@b.com", "123456").await, ConsumeOutcome::Consumed);
        assert!(store.get("a@b.com").await.is_none());
    }

    #[tokio::test]
    async fn test_expired_record_is_purged_on_attempt() {
        let store = InMemoryOtpStore::new();
        store.put(expired_record("a@b.com", "123456")).await;

        // Even the correct code fails once expired
        assert_eq!(store.consume("a@b.com", "123456").await, ConsumeOutcome::Expired);
        assert!(store.get("a@b.com").await.is_none(), "expired record must be purged");
    }

    #[tokio::test]
    async fn test_reissue_replaces_previous_code() {
        let store = InMemoryOtpStore::new();
        store.put(live_record("a@b.com", "111111")).await;
        store.put(live_record("a@b.com", "222222")).await;

        assert_eq!(store.consume("a@b.com", "111111").await, ConsumeOutcome::Mismatch);
        assert_eq!(store.consume("a@b.com", "222222").await, ConsumeOutcome::Consumed);
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let store = InMemoryOtpStore::new();
        store.put(live_record("User@Example.com", "123456")).await;

        assert!(store.get("user@example.com").await.is_some());
        assert_eq!(
            store.consume("USER@EXAMPLE.COM", "123456").await,
            ConsumeOutcome::Consumed
        );
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemoryOtpStore::new();
        store.put(live_record("a@b.com", "123456")).await;

        store.delete("a@b.com").await;
        store.delete("a@b.com").await;
        assert!(store.get("a@b.com").await.is_none());
    }

    #[tokio::test]
    async fn test_purge_removes_only_expired_records() {
        let store = InMemoryOtpStore::new();
        store.put(live_record("live@b.com", "123456")).await;
        store.put(expired_record("old@b.com", "654321")).await;
        store.put(expired_record("older@b.com", "654321")).await;

        assert_eq!(store.purge_expired().await, 2);
        assert!(store.get("live@b.com").await.is_some());
        assert!(store.get("old@b.com").await.is_none());
    }

    #[tokio::test]
    async fn test_full_verification_scenario() {
        let store = InMemoryOtpStore::new();
        let record = live_record("a@b.com", "482913");
        let expiry = record.expires_at;
        store.put(record).await;

        let stored = store.get("a@b.com").await.expect("record stored");
        assert_eq!(stored.code.len(), 6);
        let remaining = expiry - Utc::now();
        assert!(remaining <= Duration::minutes(10) && remaining > Duration::minutes(9));

        assert_eq!(store.consume("a@b.com", "000000").await, ConsumeOutcome::Mismatch);
        assert!(store.get("a@b.com").await.is_some());

        assert_eq!(store.consume("a@b.com", "482913").await, ConsumeOutcome::Consumed);
        assert_eq!(store.consume("a@b.com", "482913").await, ConsumeOutcome::Absent);
    }
}
