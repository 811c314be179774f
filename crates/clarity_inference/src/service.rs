use std::sync::Arc;

use tracing::warn;

use clarity_core::NewsArticle;

use crate::models::{CurationRequest, NewsModel};

const TIP_FALLBACK_EMPTY: &str = "Stay mindful.";
const TIP_FALLBACK_ERROR: &str = "Balance is key.";

/// Failure boundary around a model: callers always get a sequence
/// (possibly empty) or a tip string, never an error.
#[derive(Debug, Clone)]
pub struct NewsService {
    model: Arc<dyn NewsModel>,
}

impl NewsService {
    pub fn new(model: Arc<dyn NewsModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Fetch curated articles. Any remote failure degrades to an empty
    /// batch: "no new data this refresh", not an error state.
    pub async fn fetch_curated(&self, request: &CurationRequest) -> Vec<NewsArticle> {
        match self.model.curate(request).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!("Curation fetch failed: {}", e);
                Vec::new()
            }
        }
    }

    /// One-line coach message; fixed fallbacks, no retry.
    pub async fn detox_tip(&self, read_count: u32, user_name: &str) -> String {
        match self.model.detox_tip(read_count, user_name).await {
            Ok(tip) if !tip.trim().is_empty() => tip.trim().to_string(),
            Ok(_) => TIP_FALLBACK_EMPTY.to_string(),
            Err(e) => {
                warn!("Detox tip failed: {}", e);
                TIP_FALLBACK_ERROR.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clarity_core::{Error, FilterState, Result, UserProfile};

    #[derive(Debug)]
    struct FailingModel;

    #[async_trait]
    impl NewsModel for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }

        async fn curate(&self, _request: &CurationRequest) -> Result<Vec<NewsArticle>> {
            Err(Error::Inference("boom".to_string()))
        }

        async fn detox_tip(&self, _read_count: u32, _user_name: &str) -> Result<String> {
            Err(Error::Inference("boom".to_string()))
        }
    }

    #[derive(Debug)]
    struct SilentModel;

    #[async_trait]
    impl NewsModel for SilentModel {
        fn name(&self) -> &str {
            "silent"
        }

        async fn curate(&self, _request: &CurationRequest) -> Result<Vec<NewsArticle>> {
            Ok(Vec::new())
        }

        async fn detox_tip(&self, _read_count: u32, _user_name: &str) -> Result<String> {
            Ok("  ".to_string())
        }
    }

    fn request() -> CurationRequest {
        CurationRequest::new(UserProfile::new("Asha", "India", vec![]), FilterState::top10())
    }

    #[tokio::test]
    async fn curation_errors_become_empty_batches() {
        let service = NewsService::new(Arc::new(FailingModel));
        assert!(service.fetch_curated(&request()).await.is_empty());
    }

    #[tokio::test]
    async fn tip_falls_back_on_error_and_on_empty() {
        let service = NewsService::new(Arc::new(FailingModel));
        assert_eq!(service.detox_tip(3, "Asha").await, TIP_FALLBACK_ERROR);

        let service = NewsService::new(Arc::new(SilentModel));
        assert_eq!(service.detox_tip(3, "Asha").await, TIP_FALLBACK_EMPTY);
    }
}
