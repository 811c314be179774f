use async_trait::async_trait;
use tokio::sync::RwLock;

use clarity_core::{FeedCacheStore, FeedSnapshot, ProfileStore, Result, UserProfile};

#[derive(Debug, Default)]
struct Records {
    profile: Option<UserProfile>,
    snapshot: Option<FeedSnapshot>,
}

/// In-process store. Records live only as long as the process; mainly used
/// by tests and the dummy model path.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RwLock<Records>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryStorage {
    async fn load_profile(&self) -> Result<Option<UserProfile>> {
        Ok(self.records.read().await.profile.clone())
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.records.write().await.profile = Some(profile.clone());
        Ok(())
    }

    async fn clear_profile(&self) -> Result<()> {
        self.records.write().await.profile = None;
        Ok(())
    }
}

#[async_trait]
impl FeedCacheStore for MemoryStorage {
    async fn load_snapshot(&self) -> Result<Option<FeedSnapshot>> {
        Ok(self.records.read().await.snapshot.clone())
    }

    async fn save_snapshot(&self, snapshot: &FeedSnapshot) -> Result<()> {
        self.records.write().await.snapshot = Some(snapshot.clone());
        Ok(())
    }

    async fn clear_snapshot(&self) -> Result<()> {
        self.records.write().await.snapshot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use clarity_core::FilterState;

    #[tokio::test]
    async fn profile_round_trip() {
        let storage = MemoryStorage::new();
        assert!(storage.load_profile().await.unwrap().is_none());

        let profile = UserProfile::new("Asha", "India", vec!["Technology".to_string()]);
        storage.save_profile(&profile).await.unwrap();
        let loaded = storage.load_profile().await.unwrap().unwrap();
        assert_eq!(loaded.name, "Asha");

        storage.clear_profile().await.unwrap();
        assert!(storage.load_profile().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn snapshot_is_replaced_whole() {
        let storage = MemoryStorage::new();
        let first = FeedSnapshot {
            articles: vec![],
            timestamp: Utc::now(),
            filter: FilterState::top10(),
        };
        storage.save_snapshot(&first).await.unwrap();

        let second = FeedSnapshot {
            articles: vec![],
            timestamp: Utc::now(),
            filter: FilterState::world_region("Germany"),
        };
        storage.save_snapshot(&second).await.unwrap();

        let loaded = storage.load_snapshot().await.unwrap().unwrap();
        assert_eq!(loaded.filter, second.filter);
    }
}
