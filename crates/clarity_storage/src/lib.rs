use std::path::PathBuf;
use std::sync::Arc;

use clarity_core::{Error, RecordStore, Result};

pub mod backends;

pub use backends::file::FileStorage;
pub use backends::memory::MemoryStorage;

/// Build a store by backend name: `memory` or `file`. The file backend
/// keeps one JSON file per record under `data_dir`.
pub async fn create_store(kind: &str, data_dir: Option<PathBuf>) -> Result<Arc<dyn RecordStore>> {
    match kind {
        "memory" => Ok(Arc::new(MemoryStorage::new())),
        "file" => {
            let dir = data_dir.unwrap_or_else(|| PathBuf::from(".clarity"));
            Ok(Arc::new(FileStorage::new_with_path(&dir)?))
        }
        other => Err(Error::Storage(format!("unknown storage backend: {}", other))),
    }
}

pub mod prelude {
    pub use super::{create_store, FileStorage, MemoryStorage};
    pub use clarity_core::{FeedCacheStore, ProfileStore, RecordStore};
}
