use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use clarity_core::{FeedCacheStore, FeedSnapshot, ProfileStore, Result, UserProfile};

const PROFILE_FILE: &str = "profile.json";
const FEED_CACHE_FILE: &str = "feed_cache.json";

/// File-backed store: one JSON file per record under a data directory.
/// The durable analog of the browser build's two localStorage keys.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new_with_path(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.dir
    }

    /// Read one record. A missing file is an absent record; an unreadable
    /// or unparsable file is discarded and also reads as absent.
    fn read_record<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.dir.join(name);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Discarding corrupted record {}: {}", name, e);
                let _ = std::fs::remove_file(&path);
                Ok(None)
            }
        }
    }

    fn write_record<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let raw = serde_json::to_string(value)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    fn remove_record(&self, name: &str) -> Result<()> {
        match std::fs::remove_file(self.dir.join(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ProfileStore for FileStorage {
    async fn load_profile(&self) -> Result<Option<UserProfile>> {
        self.read_record(PROFILE_FILE)
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.write_record(PROFILE_FILE, profile)
    }

    async fn clear_profile(&self) -> Result<()> {
        self.remove_record(PROFILE_FILE)
    }
}

#[async_trait]
impl FeedCacheStore for FileStorage {
    async fn load_snapshot(&self) -> Result<Option<FeedSnapshot>> {
        self.read_record(FEED_CACHE_FILE)
    }

    async fn save_snapshot(&self, snapshot: &FeedSnapshot) -> Result<()> {
        self.write_record(FEED_CACHE_FILE, snapshot)
    }

    async fn clear_snapshot(&self) -> Result<()> {
        self.remove_record(FEED_CACHE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use clarity_core::FilterState;
    use tempfile::tempdir;

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempdir().unwrap();

        let storage = FileStorage::new_with_path(dir.path()).unwrap();
        let profile = UserProfile::new("Asha", "India", vec!["Technology".to_string()]);
        storage.save_profile(&profile).await.unwrap();

        let snapshot = FeedSnapshot {
            articles: vec![],
            timestamp: Utc::now(),
            filter: FilterState::search("monsoon"),
        };
        storage.save_snapshot(&snapshot).await.unwrap();

        // A second handle over the same directory sees both records.
        let reopened = FileStorage::new_with_path(dir.path()).unwrap();
        assert_eq!(reopened.load_profile().await.unwrap().unwrap().name, "Asha");
        let loaded = reopened.load_snapshot().await.unwrap().unwrap();
        assert_eq!(loaded.filter.query, "monsoon");
    }

    #[tokio::test]
    async fn corrupted_record_reads_as_absent() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new_with_path(dir.path()).unwrap();

        std::fs::write(dir.path().join(PROFILE_FILE), "{not json").unwrap();
        assert!(storage.load_profile().await.unwrap().is_none());
        // The bad file is gone, so the next load is a clean miss.
        assert!(!dir.path().join(PROFILE_FILE).exists());
    }

    #[tokio::test]
    async fn clearing_missing_records_is_fine() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new_with_path(dir.path()).unwrap();
        storage.clear_profile().await.unwrap();
        storage.clear_snapshot().await.unwrap();
    }
}
