use std::sync::Arc;

use tango_core::{KeyValueStore, StorageError};
use tango_types::TodoItem;
use uuid::Uuid;

pub struct TodoList {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn open(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = match backend.get(&key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Stored todo list is malformed, starting empty: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read todo list: {}", e);
                Vec::new()
            }
        };

        Self {
            backend,
            key,
            items,
        }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Blank input is ignored
    pub fn add(&mut self, text: &str) -> Option<&TodoItem> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.items.push(TodoItem {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            done: false,
        });
        self.persist();
        self.items.last()
    }

    /// Flip the done flag. `id` may be a unique prefix.
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(index) = self.find(id) else {
            return false;
        };
        self.items[index].done = !self.items[index].done;
        self.persist();
        true
    }

    /// `id` may be a unique prefix
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(index) = self.find(id) else {
            return false;
        };
        self.items.remove(index);
        self.persist();
        true
    }

    fn find(&self, id: &str) -> Option<usize> {
        if id.is_empty() {
            return None;
        }
        let mut matches = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.id.starts_with(id));

        match (matches.next(), matches.next()) {
            (Some((index, _)), None) => Some(index),
            _ => None,
        }
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.items)
            .map_err(StorageError::from)
            .and_then(|data| self.backend.set(&self.key, &data));

        if let Err(e) = result {
            tracing::warn!("Failed to persist todo list: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use tango_core::MemoryStore;

    use super::*;

    fn backend() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::new())
    }

    #[test]
    fn blank_items_are_ignored() {
        let mut todos = TodoList::open(backend(), "todos");
        assert!(todos.add("   ").is_none());
        assert!(todos.items().is_empty());
    }

    #[test]
    fn add_toggle_remove_persist() {
        let backend = backend();
        let mut todos = TodoList::open(backend.clone(), "todos");

        let id = todos.add(" 漢字を練習する ").unwrap().id.clone();
        todos.add("flashcards");
        assert!(todos.toggle(&id[..8]));

        let reopened = TodoList::open(backend.clone(), "todos");
        assert_eq!(reopened.items().len(), 2);
        assert_eq!(reopened.items()[0].text, "漢字を練習する");
        assert!(reopened.items()[0].done);

        assert!(todos.remove(&id));
        assert!(!todos.remove(&id));
        assert_eq!(TodoList::open(backend, "todos").items().len(), 1);
    }

    #[test]
    fn unknown_or_empty_ids_do_nothing() {
        let mut todos = TodoList::open(backend(), "todos");
        todos.add("one");
        assert!(!todos.toggle("zzzz"));
        assert!(!todos.toggle(""));
        assert!(!todos.items()[0].done);
    }
}
