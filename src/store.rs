use crate::analysis::recommendation::recommend_at;
use crate::error::StoreError;
use crate::models::debt::{Debt, DebtTerms};
use crate::models::snapshot::FinancialSnapshot;
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};

pub const DEFAULT_STORAGE_KEY: &str = "debts";

/// Read the persisted debt list. A missing key is an empty list; anything
/// that fails to parse is reported as `StoreError::Corrupt`.
pub fn read_debts(backend: &dyn KeyValueStore, key: &str) -> Result<Vec<Debt>, StoreError> {
    let Some(raw) = backend.get(key)? else {
        return Ok(Vec::new());
    };
    serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
        key: key.to_string(),
        source,
    })
}

/// Write the full list. Refuses lists that would not read back, leaving the
/// previously stored value in place.
pub fn write_debts(backend: &mut dyn KeyValueStore, key: &str, debts: &[Debt]) -> Result<(), StoreError> {
    if let Some(debt) = debts.iter().find(|debt| !debt.amount.is_finite()) {
        return Err(StoreError::NonFiniteAmount {
            id: debt.id.clone(),
        });
    }
    let raw = serde_json::to_string(debts).map_err(StoreError::Serialize)?;
    backend.set(key, &raw)
}

/// The session's debt list, newest first, mirrored to a key-value backend
/// after every mutation.
pub struct DebtStore {
    backend: Box<dyn KeyValueStore>,
    storage_key: String,
    debts: Vec<Debt>,
    persist_warning: Option<String>,
}

impl DebtStore {
    pub fn load(backend: Box<dyn KeyValueStore>, storage_key: impl Into<String>) -> Self {
        let mut store = Self {
            backend,
            storage_key: storage_key.into(),
            debts: Vec::new(),
            persist_warning: None,
        };
        store.reload();
        store
    }

    /// Replace the in-memory list with what the backend holds. Absent or
    /// corrupt data yields an empty list.
    pub fn reload(&mut self) {
        self.debts = read_debts(self.backend.as_ref(), &self.storage_key).unwrap_or_else(|e| {
            log::warn!("Discarding stored debts under '{}': {e}", self.storage_key);
            Vec::new()
        });
        log::info!("Loaded {} debt(s) from '{}'", self.debts.len(), self.storage_key);
    }

    pub fn add(&mut self, terms: DebtTerms, snapshot: FinancialSnapshot) -> Debt {
        self.add_at(terms, snapshot, Utc::now())
    }

    /// Record a debt as of `now`. The recommendation is computed here once and
    /// stored with the debt.
    pub fn add_at(&mut self, terms: DebtTerms, snapshot: FinancialSnapshot, now: DateTime<Utc>) -> Debt {
        let advice = recommend_at(
            terms.amount,
            terms.deadline,
            snapshot.surplus,
            snapshot.total_inflow,
            now.date_naive(),
        );

        let debt = Debt {
            id: uuid::Uuid::new_v4().to_string(),
            name: terms.name,
            amount: terms.amount,
            deadline: terms.deadline,
            importance: terms.importance,
            recommendation: advice.recommendation,
            rationale: advice.rationale,
            created_at: now,
        };

        log::debug!("Adding debt {} ({})", debt.id, debt.recommendation);
        self.debts.insert(0, debt.clone());
        self.persist();
        debt
    }

    /// Remove the debt with `id`. Returns false (and changes nothing in memory)
    /// when no such debt exists.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.debts.len();
        self.debts.retain(|debt| debt.id != id);
        let removed = self.debts.len() != before;
        log::debug!("Delete {id}: removed={removed}");
        self.persist();
        removed
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn get(&self, id: &str) -> Option<&Debt> {
        self.debts.iter().find(|debt| debt.id == id)
    }

    pub fn len(&self) -> usize {
        self.debts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }

    /// Most recent failed write, if any. Cleared on read.
    pub fn take_persist_warning(&mut self) -> Option<String> {
        self.persist_warning.take()
    }

    fn persist(&mut self) {
        match write_debts(self.backend.as_mut(), &self.storage_key, &self.debts) {
            Ok(()) => self.persist_warning = None,
            Err(e) => {
                log::warn!("Failed to persist debts under '{}': {e}", self.storage_key);
                self.persist_warning = Some(format!("Changes were not saved: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::debt::{Importance, Recommendation};
    use crate::storage::MemoryStore;
    use chrono::{Duration, NaiveDate};
    use std::sync::{Arc, Mutex};

    /// Backend that shares its map with the test so writes can be inspected.
    #[derive(Clone, Default)]
    struct SharedStore(Arc<Mutex<MemoryStore>>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.lock().expect("lock").get(key)
        }
        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.0.lock().expect("lock").set(key, value)
        }
    }

    struct FailingWrites;

    impl KeyValueStore for FailingWrites {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-17T10:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc)
    }

    fn terms(name: &str, amount: f64, days: i64) -> DebtTerms {
        DebtTerms {
            name: name.to_string(),
            amount,
            deadline: now().date_naive() + Duration::days(days),
            importance: Importance::Medium,
        }
    }

    #[test]
    fn add_prepends_and_freezes_recommendation() {
        let mut store = DebtStore::load(Box::new(MemoryStore::new()), DEFAULT_STORAGE_KEY);
        let first = store.add_at(terms("Rent", 10000.0, 1), FinancialSnapshot::new(15000.0, 40000.0), now());
        let second = store.add_at(terms("Phone", 10000.0, 30), FinancialSnapshot::new(7000.0, 40000.0), now());

        assert_eq!(first.recommendation, Recommendation::PayNow);
        assert_eq!(second.recommendation, Recommendation::PartialPayment);
        assert_ne!(first.id, second.id);
        assert_eq!(store.debts()[0].id, second.id);
        assert_eq!(store.debts()[1].id, first.id);
        assert_eq!(store.get(&first.id), Some(&first));
        assert_eq!(first.created_at, now());
    }

    #[test]
    fn add_then_delete_restores_previous_list() {
        let shared = SharedStore::default();
        let mut store = DebtStore::load(Box::new(shared.clone()), DEFAULT_STORAGE_KEY);
        store.add_at(terms("Rent", 10000.0, 30), FinancialSnapshot::new(3000.0, 0.0), now());
        let before = store.debts().to_vec();

        let added = store.add_at(terms("Loan", 500.0, 10), FinancialSnapshot::new(600.0, 0.0), now());
        assert!(store.delete(&added.id));

        assert_eq!(store.debts(), before.as_slice());
        let persisted = read_debts(&shared, DEFAULT_STORAGE_KEY).expect("read persisted");
        assert_eq!(persisted, before);
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let mut store = DebtStore::load(Box::new(MemoryStore::new()), DEFAULT_STORAGE_KEY);
        store.add_at(terms("Rent", 10000.0, 30), FinancialSnapshot::new(3000.0, 0.0), now());
        let before = store.debts().to_vec();

        assert!(!store.delete("missing"));
        assert_eq!(store.debts(), before.as_slice());
    }

    #[test]
    fn create_then_delete_persists_empty_array() {
        let shared = SharedStore::default();
        let mut store = DebtStore::load(Box::new(shared.clone()), DEFAULT_STORAGE_KEY);
        let debt = store.add(terms("Rent", 10000.0, 30), FinancialSnapshot::new(3000.0, 0.0));
        store.delete(&debt.id);

        assert!(store.is_empty());
        let raw = shared.get(DEFAULT_STORAGE_KEY).expect("get").expect("written");
        assert_eq!(raw, "[]");
    }

    #[test]
    fn reload_round_trips_element_wise() {
        let shared = SharedStore::default();
        let mut store = DebtStore::load(Box::new(shared.clone()), DEFAULT_STORAGE_KEY);
        store.add_at(terms("Rent", 10000.0, 2), FinancialSnapshot::new(2000.0, 0.0), now());
        store.add_at(terms("School fees", 45000.5, 60), FinancialSnapshot::new(90000.0, 0.0), Utc::now());

        let reloaded = DebtStore::load(Box::new(shared), DEFAULT_STORAGE_KEY);
        assert_eq!(reloaded.debts(), store.debts());
    }

    #[test]
    fn recommendation_is_not_recomputed_on_reload() {
        let shared = SharedStore::default();
        let mut store = DebtStore::load(Box::new(shared.clone()), DEFAULT_STORAGE_KEY);
        let debt = store.add_at(
            DebtTerms {
                deadline: NaiveDate::from_ymd_opt(2026, 11, 30).expect("valid date"),
                ..terms("Rent", 10000.0, 0)
            },
            FinancialSnapshot::new(3000.0, 0.0),
            now(),
        );
        assert_eq!(debt.recommendation, Recommendation::DelayStrategically);

        let reloaded = DebtStore::load(Box::new(shared), DEFAULT_STORAGE_KEY);
        assert_eq!(reloaded.debts()[0].recommendation, Recommendation::DelayStrategically);
        assert_eq!(reloaded.debts()[0].rationale, debt.rationale);
    }

    #[test]
    fn corrupt_or_wrong_shape_data_loads_as_empty() {
        for raw in ["not json", "{\"id\":1}", "[{\"id\":\"x\"}]"] {
            let backend = MemoryStore::with_entry(DEFAULT_STORAGE_KEY, raw);
            assert!(matches!(
                read_debts(&backend, DEFAULT_STORAGE_KEY),
                Err(StoreError::Corrupt { .. })
            ));
            let store = DebtStore::load(Box::new(backend), DEFAULT_STORAGE_KEY);
            assert!(store.is_empty());
        }
    }

    #[test]
    fn failed_write_keeps_change_and_surfaces_warning() {
        let mut store = DebtStore::load(Box::new(FailingWrites), DEFAULT_STORAGE_KEY);
        let debt = store.add_at(terms("Rent", 100.0, 30), FinancialSnapshot::new(200.0, 0.0), now());

        assert_eq!(store.len(), 1);
        assert_eq!(store.debts()[0].id, debt.id);
        let warning = store.take_persist_warning().expect("warning recorded");
        assert!(warning.contains("not saved"));
        assert!(store.take_persist_warning().is_none());
    }

    #[test]
    fn non_finite_amount_is_not_written_and_does_not_poison_reload() {
        let shared = SharedStore::default();
        let mut store = DebtStore::load(Box::new(shared.clone()), DEFAULT_STORAGE_KEY);
        let rent = store.add_at(terms("Rent", 10000.0, 30), FinancialSnapshot::new(3000.0, 0.0), now());
        assert!(store.take_persist_warning().is_none());

        let huge = store.add_at(terms("Huge", f64::INFINITY, 30), FinancialSnapshot::new(3000.0, 0.0), now());
        let warning = store.take_persist_warning().expect("warning for unsaveable amount");
        assert!(warning.contains(&huge.id));
        assert_eq!(store.len(), 2);

        let reloaded = DebtStore::load(Box::new(shared.clone()), DEFAULT_STORAGE_KEY);
        assert_eq!(reloaded.debts(), std::slice::from_ref(&rent));

        assert!(store.delete(&huge.id));
        assert!(store.take_persist_warning().is_none());
        let reloaded = DebtStore::load(Box::new(shared), DEFAULT_STORAGE_KEY);
        assert_eq!(reloaded.debts(), store.debts());
    }

    #[test]
    fn write_debts_rejects_nan() {
        let mut backend = MemoryStore::new();
        let mut debt = DebtStore::load(Box::new(MemoryStore::new()), DEFAULT_STORAGE_KEY)
            .add_at(terms("Rent", 100.0, 5), FinancialSnapshot::new(0.0, 0.0), now());
        debt.amount = f64::NAN;

        let result = write_debts(&mut backend, DEFAULT_STORAGE_KEY, &[debt]);
        assert!(matches!(result, Err(StoreError::NonFiniteAmount { .. })));
        assert_eq!(backend.get(DEFAULT_STORAGE_KEY).expect("get"), None);
    }
}
