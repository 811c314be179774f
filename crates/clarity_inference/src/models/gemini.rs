use std::fmt;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use clarity_core::{NewsArticle, Result};

use super::{CurationRequest, GroundingCitation, NewsModel};
use crate::normalize::{self, RawArticle};
use crate::prompt;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const TIP_MAX_TOKENS: u32 = 30;

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct Tool {
    #[serde(rename = "google_search")]
    google_search: Value,
}

#[derive(Serialize, Default)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Deserialize)]
struct WebSource {
    uri: String,
    #[serde(default)]
    title: String,
}

impl GenerateContentResponse {
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }

    fn citations(&self) -> Vec<GroundingCitation> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .map(|web| GroundingCitation {
                        uri: web.uri.clone(),
                        title: web.title.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// The strict schema the structuring call must fill, one object per story.
fn article_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": {"type": "STRING"},
                "summary": {"type": "STRING"},
                "keyPoints": {"type": "ARRAY", "items": {"type": "STRING"}},
                "source": {"type": "STRING"},
                "sourceUrl": {"type": "STRING"},
                "imageUrl": {"type": "STRING"},
                "category": {"type": "STRING"},
                "country": {"type": "STRING"},
                "newsType": {"type": "STRING"},
                "bias": {"type": "STRING", "enum": ["Left", "Center", "Right"]},
                "biasScore": {"type": "NUMBER"},
                "importanceScore": {"type": "NUMBER"},
                "timeline": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "date": {"type": "STRING"},
                            "event": {"type": "STRING"}
                        }
                    }
                }
            },
            "required": ["title", "summary", "source", "bias", "importanceScore",
                         "keyPoints", "timeline", "category", "country", "newsType"]
        }
    })
}

pub struct GeminiModel {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiModel {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn generate(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateContentResponse>()
            .await?;
        Ok(response)
    }

    fn user_content(prompt: &str) -> Vec<Content> {
        vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }]
    }

    /// Step 1: search-grounded generation. Returns the free-text answer and
    /// the grounding citations that came with it.
    async fn grounded_search(&self, prompt: &str) -> Result<(String, Vec<GroundingCitation>)> {
        let request = GenerateContentRequest {
            contents: Self::user_content(prompt),
            tools: Some(vec![Tool {
                google_search: json!({}),
            }]),
            generation_config: None,
        };
        let response = self.generate(&request).await?;
        Ok((response.text(), response.citations()))
    }

    /// Step 2: convert the step-1 text into the strict article array.
    async fn structure(&self, prompt: &str) -> Result<Vec<RawArticle>> {
        let request = GenerateContentRequest {
            contents: Self::user_content(prompt),
            tools: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(article_schema()),
                max_output_tokens: None,
            }),
        };
        let response = self.generate(&request).await?;
        let text = response.text();
        let payload = if text.trim().is_empty() { "[]" } else { text.as_str() };
        let raw: Vec<RawArticle> = serde_json::from_str(payload)?;
        Ok(raw)
    }
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl NewsModel for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn curate(&self, request: &CurationRequest) -> Result<Vec<NewsArticle>> {
        let search = prompt::search_prompt(request);
        let (raw_news, citations) = self.grounded_search(&search).await?;
        debug!(
            "Grounded search returned {} chars, {} citations",
            raw_news.len(),
            citations.len()
        );

        let structuring =
            prompt::structuring_prompt(&raw_news, &citations, &request.profile.country);
        let raw = self.structure(&structuring).await?;
        debug!("Structuring returned {} stories", raw.len());

        Ok(normalize::hydrate_all(raw, Utc::now()))
    }

    async fn detox_tip(&self, read_count: u32, user_name: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: Self::user_content(&prompt::detox_tip_prompt(read_count, user_name)),
            tools: None,
            generation_config: Some(GenerationConfig {
                max_output_tokens: Some(TIP_MAX_TOKENS),
                ..GenerationConfig::default()
            }),
        };
        let response = self.generate(&request).await?;
        Ok(response.text())
    }
}
