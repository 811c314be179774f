pub mod models;
pub mod normalize;
pub mod prompt;
pub mod service;

pub use models::{create_model, CurationRequest, GroundingCitation, NewsModel};
pub use service::NewsService;

/// Model selection and credentials. The API key falls back to the
/// `GEMINI_API_KEY` environment variable when not set explicitly.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub base_url: Option<String>,
}

pub mod prelude {
    pub use super::models::{create_model, CurationRequest, NewsModel};
    pub use super::service::NewsService;
    pub use super::Config;
    pub use clarity_core::{Error, NewsArticle, Result, UserProfile};
}
