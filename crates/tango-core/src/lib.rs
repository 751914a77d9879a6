pub mod entry;
pub mod error;
pub mod id;
pub mod language;
pub mod preprocess;
pub mod storage;
pub mod store;

pub use entry::NewEntry;
pub use error::{EntryError, StorageError};
pub use id::MonotonicIds;
pub use language::{LineParser, ParsedLine};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::VocabularyStore;
