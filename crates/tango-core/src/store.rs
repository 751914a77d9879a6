use std::sync::Arc;

use tango_types::VocabularyEntry;

use crate::entry::NewEntry;
use crate::id::MonotonicIds;
use crate::storage::KeyValueStore;

/// The vocabulary list and the only writer of its storage slot.
///
/// Every mutation rewrites the whole list.
pub struct VocabularyStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    entries: Vec<VocabularyEntry>,
    ids: MonotonicIds,
}

impl VocabularyStore {
    pub fn open(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let entries = read_entries(backend.as_ref(), &key);
        let floor = entries.iter().map(|e| e.id).max().unwrap_or(0);

        tracing::info!("Loaded {} vocabulary entries", entries.len());

        Self {
            backend,
            key,
            entries,
            ids: MonotonicIds::with_floor(floor),
        }
    }

    /// Read the persisted list. Missing or malformed data reads as empty.
    pub fn load(&self) -> Vec<VocabularyEntry> {
        read_entries(self.backend.as_ref(), &self.key)
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn append(&mut self, entry: NewEntry) -> u64 {
        let id = self.ids.next();
        self.entries.push(VocabularyEntry {
            id,
            japanese: entry.japanese,
            reading: entry.reading,
            meaning: entry.meaning,
        });
        self.persist();
        id
    }

    /// No-op when `id` is unknown
    pub fn remove(&mut self, id: u64) {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);

        if self.entries.len() == before {
            tracing::debug!("No vocabulary entry with id {}", id);
            return;
        }
        self.persist();
    }

    fn persist(&self) {
        let data = match serde_json::to_string(&self.entries) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Failed to serialize vocabulary: {}", e);
                return;
            }
        };

        if let Err(e) = self.backend.set(&self.key, &data) {
            tracing::warn!("Failed to persist vocabulary: {}", e);
        }
    }
}

fn read_entries(backend: &dyn KeyValueStore, key: &str) -> Vec<VocabularyEntry> {
    let raw = match backend.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Failed to read vocabulary, starting empty: {}", e);
            return Vec::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!("Stored vocabulary is malformed, starting empty: {}", e);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::{FileStore, MemoryStore};

    const KEY: &str = "vocabulary";

    fn memory() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::new())
    }

    #[test]
    fn append_keeps_insertion_order_and_distinct_ids() {
        let backend = memory();
        let mut store = VocabularyStore::open(backend.clone(), KEY);

        let first = store.append(NewEntry::new("食べる", "to eat"));
        let second = store.append(NewEntry::new("飲む", "to drink"));

        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].japanese, "食べる");
        assert_eq!(loaded[1].japanese, "飲む");
        assert_ne!(first, second);
        assert_eq!(loaded[0].id, first);
        assert_eq!(loaded[1].id, second);
    }

    #[test]
    fn remove_unknown_id_changes_nothing() {
        let mut store = VocabularyStore::open(memory(), KEY);
        store.append(NewEntry::new("猫", "cat"));
        let before = store.entries().to_vec();

        store.remove(42);

        assert_eq!(store.entries(), before.as_slice());
        assert_eq!(store.load(), before);
    }

    #[test]
    fn remove_deletes_and_persists() {
        let mut store = VocabularyStore::open(memory(), KEY);
        let cat = store.append(NewEntry::new("猫", "cat"));
        store.append(NewEntry::new("犬", "dog"));

        store.remove(cat);

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].japanese, "犬");
    }

    #[test]
    fn survives_reload_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let backend: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));

        let mut store = VocabularyStore::open(backend, KEY);
        store.append(NewEntry::new("学校", "school").with_reading("がっこう"));
        store.append(NewEntry::new("先生", "teacher"));
        let written = store.entries().to_vec();
        drop(store);

        let reopened = VocabularyStore::open(Arc::new(FileStore::new(dir.path())), KEY);
        assert_eq!(reopened.entries(), written.as_slice());
    }

    #[test]
    fn new_ids_stay_above_persisted_ones() {
        let backend = memory();
        let future_id = u64::MAX / 2;
        backend
            .set(
                KEY,
                &format!(r#"[{{"id":{future_id},"japanese":"未来","meaning":"future"}}]"#),
            )
            .unwrap();

        let mut store = VocabularyStore::open(backend, KEY);
        let id = store.append(NewEntry::new("今", "now"));
        assert!(id > future_id);
    }

    #[test]
    fn malformed_data_reads_as_empty() {
        let backend = memory();
        backend.set(KEY, "{not json").unwrap();

        let store = VocabularyStore::open(backend, KEY);
        assert!(store.is_empty());
        assert!(store.load().is_empty());
    }

    #[test]
    fn loads_both_legacy_shapes() {
        let backend = memory();
        backend
            .set(
                KEY,
                r#"[
                    {"id": 1, "japanese": "猫", "meaning": "cat"},
                    {"id": 2, "japanese": "犬", "reading": "いぬ", "meaning": "dog"}
                ]"#,
            )
            .unwrap();

        let store = VocabularyStore::open(backend, KEY);
        assert_eq!(store.len(), 2);
        assert_eq!(store.entries()[0].reading, None);
        assert_eq!(store.entries()[1].reading.as_deref(), Some("いぬ"));
    }

    struct FullDisk;

    impl KeyValueStore for FullDisk {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk full").into())
        }
    }

    #[test]
    fn write_failure_keeps_memory_state() {
        let mut store = VocabularyStore::open(Arc::new(FullDisk), KEY);
        store.append(NewEntry::new("猫", "cat"));
        assert_eq!(store.len(), 1);
    }
}
