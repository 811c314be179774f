use async_trait::async_trait;
use chrono::Utc;

use clarity_core::{FilterScope, NewsArticle, Result};

use super::{CurationRequest, NewsModel};
use crate::normalize::{self, RawArticle};

/// Offline model: fabricates a small deterministic batch shaped like a real
/// response, run through the same normalization as the live path. Used by
/// tests and `--model dummy`.
#[derive(Debug, Default)]
pub struct DummyModel;

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NewsModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn curate(&self, request: &CurationRequest) -> Result<Vec<NewsArticle>> {
        let focus = match request.filter.scope {
            FilterScope::Search => request.filter.query.clone(),
            FilterScope::State | FilterScope::World if !request.filter.region.is_empty() => {
                request.filter.region.clone()
            }
            _ => request.profile.country.clone(),
        };

        let raw = (0..5)
            .map(|i| RawArticle {
                title: format!("Placeholder story {} about {}", i + 1, focus),
                summary: format!("Offline stand-in story {} for {}.", i + 1, focus),
                key_points: vec![
                    format!("Key fact {} one", i + 1),
                    format!("Key fact {} two", i + 1),
                ],
                source: "Clarity Offline".to_string(),
                source_url: None,
                image_url: None,
                category: "General".to_string(),
                country: request.profile.country.clone(),
                news_type: "Placeholder".to_string(),
                bias: None,
                bias_score: Some(50.0),
                importance_score: Some(5.0),
                timeline: vec![],
            })
            .collect();

        Ok(normalize::hydrate_all(raw, Utc::now()))
    }

    async fn detox_tip(&self, _read_count: u32, user_name: &str) -> Result<String> {
        Ok(format!("Nice pace, {}. One story at a time.", user_name))
    }
}
