use std::sync::Arc;

use async_trait::async_trait;

use clarity_core::{Error, FilterState, NewsArticle, Result, UserProfile};

use crate::Config;

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

/// A (URI, title) pair returned by the search-grounded call, used as a
/// candidate source link for the structuring step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundingCitation {
    pub uri: String,
    pub title: String,
}

/// Everything a curation fetch depends on: who is asking, what the feed
/// currently represents, and which titles to avoid repeating.
#[derive(Debug, Clone)]
pub struct CurationRequest {
    pub profile: UserProfile,
    pub filter: FilterState,
    pub exclude_titles: Vec<String>,
}

impl CurationRequest {
    pub fn new(profile: UserProfile, filter: FilterState) -> Self {
        Self {
            profile,
            filter,
            exclude_titles: Vec::new(),
        }
    }
}

#[async_trait]
pub trait NewsModel: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    /// Run the two-step remote protocol and return validated articles.
    async fn curate(&self, request: &CurationRequest) -> Result<Vec<NewsArticle>>;

    /// One short free-text call for an encouragement message.
    async fn detox_tip(&self, read_count: u32, user_name: &str) -> Result<String>;
}

/// Build a model by name: `gemini` (default) or `dummy`.
pub async fn create_model(config: Option<Config>) -> Result<Arc<dyn NewsModel>> {
    let config = config.unwrap_or_default();
    match config.model_name.as_deref() {
        Some("dummy") => Ok(Arc::new(DummyModel::new())),
        Some("gemini") | None => {
            let api_key = match config.api_key {
                Some(key) => key,
                None => std::env::var("GEMINI_API_KEY").map_err(|_| {
                    Error::Config(
                        "GEMINI_API_KEY is not set; pass --model dummy to run offline".to_string(),
                    )
                })?,
            };
            let mut model = GeminiModel::new(api_key);
            if let Some(base_url) = config.base_url {
                model = model.with_base_url(base_url);
            }
            Ok(Arc::new(model))
        }
        Some(other) => Err(Error::Config(format!("unknown model: {}", other))),
    }
}
