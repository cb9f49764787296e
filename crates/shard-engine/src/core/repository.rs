use crate::api::config::StoreKeys;
use crate::components::state::{AttemptCounter, FragmentStore, VisitedSet};
use crate::core::store::{PersistentStore, StorageBackend, StoreError};

/// Typed access to the reader's persisted story state.
/// Getters never fail; setters are best-effort.
pub trait NarrativeStateRepository {
    fn visited(&self) -> VisitedSet;
    fn set_visited(&self, visited: &VisitedSet) -> Result<(), StoreError>;

    fn fragments(&self) -> FragmentStore;
    fn set_fragments(&self, fragments: &FragmentStore) -> Result<(), StoreError>;

    fn attempts(&self) -> AttemptCounter;
    fn set_attempts(&self, attempts: AttemptCounter) -> Result<(), StoreError>;

    /// Clear visited codes, fragments and attempts together.
    fn reset(&self) -> Result<(), StoreError>;
}

/// Repository over a `PersistentStore`, one key per entity.
pub struct StoreRepository<B: StorageBackend> {
    store: PersistentStore<B>,
    keys: StoreKeys,
}

impl<B: StorageBackend> StoreRepository<B> {
    pub fn new(backend: B, keys: StoreKeys) -> Self {
        Self {
            store: PersistentStore::new(backend),
            keys,
        }
    }

    pub fn store(&self) -> &PersistentStore<B> {
        &self.store
    }

    pub fn keys(&self) -> &StoreKeys {
        &self.keys
    }
}

impl<B: StorageBackend> NarrativeStateRepository for StoreRepository<B> {
    fn visited(&self) -> VisitedSet {
        self.store.load(&self.keys.visited, VisitedSet::default())
    }

    fn set_visited(&self, visited: &VisitedSet) -> Result<(), StoreError> {
        self.store.save(&self.keys.visited, visited)
    }

    fn fragments(&self) -> FragmentStore {
        self.store.load(&self.keys.fragments, FragmentStore::default())
    }

    fn set_fragments(&self, fragments: &FragmentStore) -> Result<(), StoreError> {
        self.store.save(&self.keys.fragments, fragments)
    }

    fn attempts(&self) -> AttemptCounter {
        self.store.load(&self.keys.attempts, AttemptCounter::default())
    }

    fn set_attempts(&self, attempts: AttemptCounter) -> Result<(), StoreError> {
        self.store.save(&self.keys.attempts, &attempts)
    }

    fn reset(&self) -> Result<(), StoreError> {
        // Attempt every removal even if an earlier one fails.
        let results = [
            self.store.remove(&self.keys.visited),
            self.store.remove(&self.keys.fragments),
            self.store.remove(&self.keys.attempts),
        ];
        results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Code;
    use crate::core::store::MemoryStorage;

    fn repo() -> StoreRepository<MemoryStorage> {
        StoreRepository::new(MemoryStorage::new(), StoreKeys::default())
    }

    #[test]
    fn fresh_repository_is_empty() {
        let repo = repo();
        assert!(repo.visited().is_empty());
        assert!(repo.fragments().is_empty());
        assert_eq!(repo.attempts().count(), 0);
    }

    #[test]
    fn entities_round_trip_under_their_keys() {
        let repo = repo();
        let code = Code::from_number(4).unwrap();

        let mut visited = VisitedSet::new();
        visited.insert(code);
        repo.set_visited(&visited).unwrap();

        let mut frags = FragmentStore::new();
        frags.insert(code, "four");
        repo.set_fragments(&frags).unwrap();

        repo.set_attempts(AttemptCounter::new(2)).unwrap();

        let raw = |key: &str| repo.store().backend().raw(key);
        assert_eq!(raw("bos_visited_keys_v1").as_deref(), Some(r#"{"keys":{"04":true}}"#));
        assert_eq!(raw("bos_fragments_v1").as_deref(), Some(r#"{"04":"four"}"#));
        assert_eq!(raw("bos_puzzle_attempts_v1").as_deref(), Some(r#"{"n":2}"#));

        assert!(repo.visited().contains(code));
        assert_eq!(repo.fragments().get(code), Some("four"));
        assert_eq!(repo.attempts().count(), 2);
    }

    #[test]
    fn reset_clears_everything() {
        let repo = repo();
        let code = Code::from_number(9).unwrap();
        let mut visited = VisitedSet::new();
        visited.insert(code);
        repo.set_visited(&visited).unwrap();
        let mut frags = FragmentStore::new();
        frags.insert(code, "nine");
        repo.set_fragments(&frags).unwrap();
        repo.set_attempts(AttemptCounter::new(5)).unwrap();

        repo.reset().unwrap();

        assert_eq!(repo.visited(), VisitedSet::default());
        assert_eq!(repo.fragments(), FragmentStore::default());
        assert_eq!(repo.attempts(), AttemptCounter::default());
        assert!(repo.store().backend().is_empty());
    }

    #[test]
    fn corrupted_entities_load_as_defaults() {
        let backend = MemoryStorage::new();
        backend.insert_raw("bos_visited_keys_v1", "[1,2");
        backend.insert_raw("bos_fragments_v1", r#"{"xx":"bad key"}"#);
        backend.insert_raw("bos_puzzle_attempts_v1", r#"{"n":-4}"#);
        let repo = StoreRepository::new(backend, StoreKeys::default());
        assert!(repo.visited().is_empty());
        assert!(repo.fragments().is_empty());
        assert_eq!(repo.attempts().count(), 0);
    }

    #[test]
    fn stray_keys_do_not_erase_saved_progress() {
        let backend = MemoryStorage::new();
        backend.insert_raw("bos_fragments_v1", r#"{"01":"first","05":"five","legacy":"x"}"#);
        backend.insert_raw("bos_visited_keys_v1", r#"{"keys":{"01":true,"7":true}}"#);
        let repo = StoreRepository::new(backend, StoreKeys::default());
        let code = |n| Code::from_number(n).unwrap();

        let mut frags = repo.fragments();
        frags.insert(code(2), "two");
        repo.set_fragments(&frags).unwrap();
        let mut visited = repo.visited();
        visited.insert(code(3));
        repo.set_visited(&visited).unwrap();

        let raw = |key: &str| repo.store().backend().raw(key);
        assert_eq!(
            raw("bos_fragments_v1").as_deref(),
            Some(r#"{"01":"first","02":"two","05":"five"}"#)
        );
        assert_eq!(
            raw("bos_visited_keys_v1").as_deref(),
            Some(r#"{"keys":{"01":true,"03":true}}"#)
        );
    }

    #[test]
    fn custom_keys_are_honoured() {
        let keys = StoreKeys {
            visited: "v".into(),
            fragments: "f".into(),
            attempts: "a".into(),
        };
        let repo = StoreRepository::new(MemoryStorage::new(), keys);
        repo.set_attempts(AttemptCounter::new(1)).unwrap();
        assert_eq!(repo.store().backend().raw("a").as_deref(), Some(r#"{"n":1}"#));
    }
}
