use async_trait::async_trait;

use crate::types::{FeedSnapshot, UserProfile};
use crate::Result;

/// A backend that holds both persisted records.
pub trait RecordStore: ProfileStore + FeedCacheStore {}

impl<T: ProfileStore + FeedCacheStore> RecordStore for T {}

/// The persisted `profile` record: written on every profile mutation, read
/// once at startup, deleted on logout.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load the saved profile. A corrupted record reads as `None`.
    async fn load_profile(&self) -> Result<Option<UserProfile>>;

    /// Replace the saved profile.
    async fn save_profile(&self, profile: &UserProfile) -> Result<()>;

    /// Delete the saved profile.
    async fn clear_profile(&self) -> Result<()>;
}

/// The persisted `feed-cache` record: written after every successful
/// non-empty fetch, read once at startup, deleted on logout. Whole-snapshot
/// replace only, no partial updates.
#[async_trait]
pub trait FeedCacheStore: Send + Sync {
    /// Load the saved snapshot. A corrupted record reads as `None`.
    async fn load_snapshot(&self) -> Result<Option<FeedSnapshot>>;

    /// Replace the saved snapshot.
    async fn save_snapshot(&self, snapshot: &FeedSnapshot) -> Result<()>;

    /// Delete the saved snapshot.
    async fn clear_snapshot(&self) -> Result<()>;
}
