use chrono::{DateTime, Utc};
use serde::Deserialize;

use clarity_core::{Bias, NewsArticle, TimelineEvent};

/// One item of the structuring call's JSON array, before repair. Fields the
/// upstream occasionally drops are optional here; repair fills them in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    pub source: String,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub news_type: String,
    #[serde(default)]
    pub bias: Option<Bias>,
    #[serde(default)]
    pub bias_score: Option<f64>,
    #[serde(default)]
    pub importance_score: Option<f64>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
}

const IMAGE_WIDTH: u32 = 800;
const IMAGE_HEIGHT: u32 = 450;
const RELATED_WIDTH: u32 = 500;
const RELATED_HEIGHT: u32 = 300;
const MAX_RELATED_IMAGES: usize = 3;

fn url_encode(text: &str) -> String {
    url::form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

/// A source link is unusable if it is empty, the literal "undefined", too
/// short to carry a host, or one of the known placeholder redirects the
/// grounding layer emits.
pub fn is_invalid_source_url(url: Option<&str>) -> bool {
    match url {
        None => true,
        Some(url) => {
            url.is_empty()
                || url == "undefined"
                || url.split('/').count() < 3
                || url.contains("vertexaisearch")
                || url.contains("google.com/search")
        }
    }
}

/// Fallback link: a web search for the story instead of a dead URL.
pub fn repair_source_url(title: &str, source: &str) -> String {
    format!(
        "https://www.google.com/search?q={}",
        url_encode(&format!("{} {} news", title, source))
    )
}

pub fn is_invalid_image_url(url: Option<&str>) -> bool {
    match url {
        None => true,
        Some(url) => url.len() < 10 || url.contains("pollinations"),
    }
}

/// Strip punctuation, keep the first `max_words` words.
fn sanitize_query(text: &str, max_words: usize) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect();
    cleaned
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Image-search URL for a real photo matching the query, at a fixed size.
fn image_search_url(query: &str, width: u32, height: u32) -> String {
    format!(
        "https://tse2.mm.bing.net/th?q={}&w={}&h={}&c=7&rs=1&p=0",
        url_encode(query),
        width,
        height
    )
}

pub fn repair_image_url(title: &str) -> String {
    let query = format!("{} news", sanitize_query(title, 8));
    image_search_url(&query, IMAGE_WIDTH, IMAGE_HEIGHT)
}

/// Up to 3 gallery entries derived from the first key points.
pub fn related_images(key_points: &[String]) -> Vec<String> {
    key_points
        .iter()
        .take(MAX_RELATED_IMAGES)
        .map(|point| {
            let query = format!("{} context", sanitize_query(point, 6));
            image_search_url(&query, RELATED_WIDTH, RELATED_HEIGHT)
        })
        .collect()
}

/// Clamp the importance score into 1..=10. Upstream sometimes scores on a
/// 0-100 scale; anything above 10 is read as such and scaled down.
pub fn normalize_importance(score: Option<f64>) -> u8 {
    let score = score.unwrap_or(5.0);
    let score = if score > 10.0 {
        (score / 10.0).round()
    } else {
        score.round()
    };
    score.clamp(1.0, 10.0) as u8
}

pub fn normalize_bias_score(score: Option<f64>) -> u8 {
    score.unwrap_or(50.0).clamp(0.0, 100.0).round() as u8
}

/// Turn one raw item into a validated article: repair links and scores,
/// synthesize media, and stamp client-side identity.
pub fn hydrate(raw: RawArticle, index: usize, now: DateTime<Utc>) -> NewsArticle {
    let source_url = if is_invalid_source_url(raw.source_url.as_deref()) {
        repair_source_url(&raw.title, &raw.source)
    } else {
        raw.source_url.clone().unwrap_or_default()
    };

    let image_url = if is_invalid_image_url(raw.image_url.as_deref()) {
        repair_image_url(&raw.title)
    } else {
        raw.image_url.clone().unwrap_or_default()
    };

    let bias_score = normalize_bias_score(raw.bias_score);
    let bias = raw.bias.unwrap_or_else(|| Bias::from_score(bias_score));

    NewsArticle {
        id: format!("news-{}-{}", index, now.timestamp_millis()),
        title: raw.title,
        summary: raw.summary,
        related_images: related_images(&raw.key_points),
        key_points: raw.key_points,
        source: raw.source,
        source_url: Some(source_url),
        timestamp: now,
        image_url,
        bias,
        bias_score,
        importance_score: normalize_importance(raw.importance_score),
        verified: true,
        timeline: raw.timeline,
        category: raw.category,
        country: raw.country,
        news_type: raw.news_type,
    }
}

pub fn hydrate_all(raw: Vec<RawArticle>, now: DateTime<Utc>) -> Vec<NewsArticle> {
    raw.into_iter()
        .enumerate()
        .map(|(index, item)| hydrate(item, index, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str) -> RawArticle {
        RawArticle {
            title: title.to_string(),
            summary: "A summary.".to_string(),
            key_points: vec![
                "First point about the event".to_string(),
                "Second point, with details!".to_string(),
            ],
            source: "The Hindu".to_string(),
            source_url: Some("https://www.thehindu.com/news/some-story".to_string()),
            image_url: Some("https://www.thehindu.com/img/story.jpg".to_string()),
            category: "Politics".to_string(),
            country: "India".to_string(),
            news_type: "Breaking".to_string(),
            bias: Some(Bias::Center),
            bias_score: Some(50.0),
            importance_score: Some(7.0),
            timeline: vec![],
        }
    }

    #[test]
    fn importance_stays_in_range_for_all_inputs() {
        for v in [-5.0, 0.0, 0.4, 1.0, 5.0, 9.6, 10.0, 11.0, 42.0, 90.0, 100.0, 960.0] {
            let n = normalize_importance(Some(v));
            assert!((1..=10).contains(&n), "normalize({}) = {}", v, n);
        }
        assert_eq!(normalize_importance(None), 5);
    }

    #[test]
    fn importance_over_ten_is_scaled_down() {
        // The 90-out-of-100 bug: upstream scored on the wrong scale.
        assert_eq!(normalize_importance(Some(90.0)), 9);
        assert_eq!(normalize_importance(Some(12.0)), 1);
        assert_eq!(normalize_importance(Some(45.0)), 5);
        assert_eq!(normalize_importance(Some(7.0)), 7);
    }

    #[test]
    fn invalid_source_urls_are_detected() {
        assert!(is_invalid_source_url(None));
        assert!(is_invalid_source_url(Some("")));
        assert!(is_invalid_source_url(Some("undefined")));
        assert!(is_invalid_source_url(Some("no-slashes-here")));
        assert!(is_invalid_source_url(Some(
            "https://vertexaisearch.cloud.google.com/grounding-api-redirect/xyz"
        )));
        assert!(is_invalid_source_url(Some(
            "https://www.google.com/search?q=already+a+search"
        )));
        assert!(!is_invalid_source_url(Some(
            "https://www.thehindu.com/news/some-story"
        )));
    }

    #[test]
    fn repaired_source_url_is_a_search_for_title_and_source() {
        let url = repair_source_url("Monsoon floods recede", "NDTV");
        assert!(url.starts_with("https://www.google.com/search?q="));
        assert!(url.contains("Monsoon"));
        assert!(url.contains("NDTV"));
        assert!(url.contains("news"));
    }

    #[test]
    fn image_repair_sanitizes_and_sizes() {
        let url = repair_image_url("Rally: markets surge 4% — what's next?");
        assert!(url.starts_with("https://tse2.mm.bing.net/th?q="));
        assert!(url.contains("w=800"));
        assert!(url.contains("h=450"));
        // Punctuation is stripped before encoding.
        assert!(!url.contains("%3A"));
        assert!(!url.contains("%25"));
    }

    #[test]
    fn related_images_cap_at_three() {
        let points: Vec<String> = (0..5).map(|i| format!("point number {}", i)).collect();
        let images = related_images(&points);
        assert_eq!(images.len(), 3);
        for url in &images {
            assert!(url.contains("w=500"));
            assert!(url.contains("h=300"));
            assert!(url.contains("context"));
        }
        assert!(related_images(&[]).is_empty());
    }

    #[test]
    fn hydrate_keeps_valid_fields_and_stamps_identity() {
        let now = Utc::now();
        let article = hydrate(raw("Story"), 2, now);
        assert_eq!(
            article.id,
            format!("news-2-{}", now.timestamp_millis())
        );
        assert_eq!(article.timestamp, now);
        assert!(article.verified);
        assert_eq!(
            article.source_url.as_deref(),
            Some("https://www.thehindu.com/news/some-story")
        );
        assert_eq!(article.related_images.len(), 2);
    }

    #[test]
    fn hydrate_repairs_bad_urls() {
        let mut item = raw("Story");
        item.source_url = Some("undefined".to_string());
        item.image_url = Some("https://image.pollinations.ai/prompt/story".to_string());
        let article = hydrate(item, 0, Utc::now());
        assert!(article
            .source_url
            .as_deref()
            .unwrap()
            .starts_with("https://www.google.com/search?q="));
        assert!(article.image_url.starts_with("https://tse2.mm.bing.net/th?q="));
    }

    #[test]
    fn missing_bias_is_derived_from_score() {
        let mut item = raw("Story");
        item.bias = None;
        item.bias_score = Some(12.0);
        let article = hydrate(item, 0, Utc::now());
        assert_eq!(article.bias, Bias::Left);
        assert_eq!(article.bias_score, 12);
    }

    #[test]
    fn raw_article_parses_the_wire_shape() {
        let json = r#"{
            "title": "T", "summary": "S",
            "keyPoints": ["a", "b"],
            "source": "NDTV", "sourceUrl": "https://ndtv.com/x",
            "imageUrl": "https://ndtv.com/x.jpg",
            "category": "Politics", "country": "India", "newsType": "Analysis",
            "bias": "Left", "biasScore": 20, "importanceScore": 8,
            "timeline": [{"date": "2026-08-01", "event": "it began"}]
        }"#;
        let item: RawArticle = serde_json::from_str(json).unwrap();
        assert_eq!(item.key_points.len(), 2);
        assert_eq!(item.bias, Some(Bias::Left));
        assert_eq!(item.timeline[0].date, "2026-08-01");
    }
}
