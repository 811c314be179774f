pub mod error;
pub mod filter;
pub mod storage;
pub mod types;

pub use error::Error;
pub use filter::{FilterScope, FilterState};
pub use storage::{FeedCacheStore, ProfileStore, RecordStore};
pub use types::{
    Bias, DetoxLevel, DetoxStats, FeedSnapshot, NewsArticle, TimelineEvent, UserProfile,
    INDIAN_STATES, MAJOR_COUNTRIES,
};

pub type Result<T> = std::result::Result<T, Error>;
