use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::FilterState;

/// Political lean of a story, derived from the 0-100 bias score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bias {
    Left,
    Center,
    Right,
}

impl Bias {
    /// 0..=33 reads Left, 34..=66 Center, 67..=100 Right.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=33 => Bias::Left,
            34..=66 => Bias::Center,
            _ => Bias::Right,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub date: String,
    pub event: String,
}

/// One curated story. Ids are assigned client-side at ingestion and are not
/// stable across refreshes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub key_points: Vec<String>,
    pub source: String,
    pub source_url: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub image_url: String,
    pub related_images: Vec<String>,
    pub bias: Bias,
    /// 0 = Left, 50 = Center, 100 = Right.
    pub bias_score: u8,
    /// 1 (low) to 10 (high impact), normalized at ingestion.
    pub importance_score: u8,
    pub verified: bool,
    pub timeline: Vec<TimelineEvent>,
    pub category: String,
    pub country: String,
    pub news_type: String,
}

/// How aggressively the reader wants its usage tempered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetoxLevel {
    Low,
    #[default]
    Medium,
    Strict,
}

impl std::str::FromStr for DetoxLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "low" => Ok(DetoxLevel::Low),
            "medium" => Ok(DetoxLevel::Medium),
            "strict" => Ok(DetoxLevel::Strict),
            other => Err(format!("unknown detox level: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub country: String,
    pub topics: Vec<String>,
    pub prioritize_local: bool,
    pub detox_level: DetoxLevel,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, country: impl Into<String>, topics: Vec<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            country: country.into(),
            topics,
            prioritize_local: true,
            detox_level: DetoxLevel::default(),
        }
    }
}

/// The persisted bundle of last-fetched articles, its capture time, and the
/// filter state that produced it. Whole-record replace only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSnapshot {
    pub articles: Vec<NewsArticle>,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub filter: FilterState,
}

/// Dashboard numbers for the detox view. Not persisted; the seed values
/// below are what a fresh install shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetoxStats {
    pub daily_time_spent: u32,
    pub stories_read: u32,
    pub anxiety_score: u8,
    pub topics_avoided: Vec<String>,
    pub mood_trend: Vec<MoodPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodPoint {
    pub day: String,
    pub mood: u8,
}

impl Default for DetoxStats {
    fn default() -> Self {
        Self {
            daily_time_spent: 45,
            stories_read: 12,
            anxiety_score: 2,
            topics_avoided: vec![
                "Celebrity Gossip".to_string(),
                "Violent Crime".to_string(),
                "Partisan Outrage".to_string(),
            ],
            mood_trend: ["M", "T", "W", "T", "F"]
                .iter()
                .zip([6, 7, 6, 8, 9])
                .map(|(day, mood)| MoodPoint {
                    day: day.to_string(),
                    mood,
                })
                .collect(),
        }
    }
}

/// Region choices offered for scope=state when the profile country is India.
pub const INDIAN_STATES: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
    "Jammu and Kashmir",
];

/// Region choices offered for scope=world.
pub const MAJOR_COUNTRIES: &[&str] = &[
    "United States",
    "United Kingdom",
    "Canada",
    "Australia",
    "Germany",
    "France",
    "Japan",
    "China",
    "Russia",
    "Ukraine",
    "Israel",
    "Palestine",
];
