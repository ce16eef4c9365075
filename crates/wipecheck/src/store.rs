use dashmap::DashMap;

use crate::profile::ProfileRecord;

/// Storage backend for submitted profiles.
///
/// Implementations must be thread-safe (`Send + Sync`). The gate never
/// overwrites an existing record.
pub trait ProfileStore: Send + Sync {
    fn insert(&self, record: ProfileRecord);

    fn get(&self, id: &str) -> Option<ProfileRecord>;
}

/// Payment state for check identifiers.
///
/// An id enters the paid set at most once and never leaves it. The consumed
/// map ties each transaction reference to the single id it unlocked, so a
/// reference cannot be replayed to unlock a second check.
pub trait PaymentLedger: Send + Sync {
    fn is_paid(&self, id: &str) -> bool;

    /// Idempotent insert into the paid set.
    fn mark_paid(&self, id: &str);

    /// Atomically claim a transaction reference for `id`.
    ///
    /// Returns `true` if the reference was unclaimed or already claimed by
    /// this same id (re-verification is idempotent). Returns `false` if a
    /// different id already consumed it (a replay attempt).
    fn try_consume(&self, tx_ref: &str, id: &str) -> bool;
}

/// In-memory profile store backed by DashMap. Lost on restart.
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: DashMap<String, ProfileRecord>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn insert(&self, record: ProfileRecord) {
        self.profiles.insert(record.id.clone(), record);
    }

    fn get(&self, id: &str) -> Option<ProfileRecord> {
        self.profiles.get(id).map(|r| r.clone())
    }
}

/// In-memory payment ledger backed by DashMap. Lost on restart.
#[derive(Default)]
pub struct InMemoryLedger {
    paid: DashMap<String, ()>,
    consumed: DashMap<String, String>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PaymentLedger for InMemoryLedger {
    fn is_paid(&self, id: &str) -> bool {
        self.paid.contains_key(id)
    }

    fn mark_paid(&self, id: &str) {
        self.paid.insert(id.to_string(), ());
    }

    fn try_consume(&self, tx_ref: &str, id: &str) -> bool {
        // DashMap's entry API provides atomicity within a single process
        use dashmap::mapref::entry::Entry;
        match self.consumed.entry(tx_ref.to_string()) {
            Entry::Occupied(e) => e.get() == id,
            Entry::Vacant(v) => {
                v.insert(id.to_string());
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileSubmission;

    #[test]
    fn test_profile_roundtrip() {
        let store = InMemoryProfileStore::new();
        assert!(store.get("missing").is_none());

        store.insert(ProfileRecord::new(
            "abc",
            ProfileSubmission {
                handle: Some("riya_travels".to_string()),
                ..Default::default()
            },
        ));
        let record = store.get("abc").unwrap();
        assert_eq!(record.id, "abc");
        assert_eq!(record.handle.as_deref(), Some("riya_travels"));
    }

    #[test]
    fn test_mark_paid_is_idempotent() {
        let ledger = InMemoryLedger::new();
        assert!(!ledger.is_paid("abc"));
        ledger.mark_paid("abc");
        ledger.mark_paid("abc");
        assert!(ledger.is_paid("abc"));
        assert!(!ledger.is_paid("other"));
    }

    #[test]
    fn test_consume_is_idempotent_per_id() {
        let ledger = InMemoryLedger::new();
        assert!(ledger.try_consume("0xdead", "abc"));
        assert!(ledger.try_consume("0xdead", "abc"));
    }

    #[test]
    fn test_consume_rejects_second_id() {
        let ledger = InMemoryLedger::new();
        assert!(ledger.try_consume("0xdead", "abc"));
        assert!(!ledger.try_consume("0xdead", "xyz"));
        // The original claimant keeps the reference
        assert!(ledger.try_consume("0xdead", "abc"));
    }
}
