use clarity_core::FilterScope;

use crate::models::{CurationRequest, GroundingCitation};

/// Outlets pinned for Indian domestic coverage; anywhere else the model is
/// told to stick to verified outlets in the profile country.
const TRUSTED_INDIAN_SOURCES: &str = "'The Hindu', 'The Indian Express', 'NDTV', 'Hindustan Times', 'News18', 'Scroll.in', 'India Today', 'The Wire', 'Press Trust of India (PTI)', 'Deccan Herald', 'Livemint', 'Firstpost'";

const MAX_EXCLUDED_TITLES: usize = 10;
const MAX_TOPIC_HINTS: usize = 3;

/// Step-1 instruction: grounded search for a small batch of stories.
pub fn search_prompt(request: &CurationRequest) -> String {
    let profile = &request.profile;
    let filter = &request.filter;
    let is_india = profile.country.eq_ignore_ascii_case("india");

    let mut count_instruction = "Find exactly 5 top news stories.".to_string();

    let scope_instruction = match filter.scope {
        FilterScope::Domestic => format!("Focus on major national news in {}.", profile.country),
        FilterScope::World => "Focus on major global events.".to_string(),
        FilterScope::State => {
            count_instruction = "Find 4-5 significant stories.".to_string();
            format!(
                "Focus on news from \"{}\" in {}.",
                filter.region, profile.country
            )
        }
        FilterScope::Search => {
            count_instruction = "Find 5 relevant stories.".to_string();
            format!("Search for: \"{}\".", filter.query)
        }
        FilterScope::Top10 => format!(
            "Find the 5 most critical news stories for {}.",
            profile.country
        ),
    };

    let source_instruction = if is_india
        && matches!(
            filter.scope,
            FilterScope::Domestic | FilterScope::State | FilterScope::Top10
        ) {
        format!("Use these trusted sources: {}.", TRUSTED_INDIAN_SOURCES)
    } else {
        format!("Use verified news outlets in {}.", profile.country)
    };

    let topic_instruction = if filter.scope == FilterScope::Top10 && !profile.topics.is_empty() {
        let topics: Vec<&str> = profile
            .topics
            .iter()
            .take(MAX_TOPIC_HINTS)
            .map(String::as_str)
            .collect();
        format!("Prioritize: {}.", topics.join(", "))
    } else {
        String::new()
    };

    let exclude_instruction = if request.exclude_titles.is_empty() {
        String::new()
    } else {
        let start = request.exclude_titles.len().saturating_sub(MAX_EXCLUDED_TITLES);
        let recent = &request.exclude_titles[start..];
        format!(
            "DO NOT include these stories: {}. Find different/newer ones.",
            serde_json::to_string(recent).unwrap_or_else(|_| "[]".to_string())
        )
    };

    format!(
        "Task: {count}\nScope: {scope}\nSources: {sources}\n{topics}\n{exclude}\n\nRequirement: Get original article links. Find the main article image URL from metadata if possible.",
        count = count_instruction,
        scope = scope_instruction,
        sources = source_instruction,
        topics = topic_instruction,
        exclude = exclude_instruction,
    )
}

/// Step-2 instruction: convert the step-1 text into the strict article
/// schema, picking source links from the grounding citations.
pub fn structuring_prompt(
    raw_news: &str,
    citations: &[GroundingCitation],
    country: &str,
) -> String {
    let verified_links = if citations.is_empty() {
        "NO VERIFIED LINKS FOUND".to_string()
    } else {
        citations
            .iter()
            .enumerate()
            .map(|(i, c)| format!("[{}] URL: {} (Title: \"{}\")", i, c.uri, c.title))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"Convert this news data into JSON.

INPUT: {raw}

VERIFIED LINKS:
{links}

RULES:
1. 'sourceUrl': Pick the BEST MATCH from "VERIFIED LINKS" based on content/topic. Do NOT just match title text.
2. 'keyPoints': 4-6 comprehensive, standalone bullet points covering all key facts.
3. 'timeline': Max 2 major events.
4. 'biasScore': 0=Left, 50=Center, 100=Right.
5. 'importanceScore': 1 (Low) to 10 (High Impact).
6. 'imageUrl': Extract the actual main image URL if found in the search results/metadata.

User Context: {country}."#,
        raw = raw_news,
        links = verified_links,
        country = country,
    )
}

pub fn detox_tip_prompt(read_count: u32, user_name: &str) -> String {
    format!(
        "User {} read {} articles. Give 1 short encouraging detox tip.",
        user_name, read_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarity_core::{FilterState, UserProfile};

    fn india_profile() -> UserProfile {
        UserProfile::new(
            "Asha",
            "India",
            vec![
                "Technology".to_string(),
                "Science".to_string(),
                "Climate".to_string(),
                "Cricket".to_string(),
            ],
        )
    }

    #[test]
    fn top10_india_pins_trusted_sources_and_topics() {
        let request = CurationRequest::new(india_profile(), FilterState::top10());
        let prompt = search_prompt(&request);
        assert!(prompt.contains("Find exactly 5 top news stories."));
        assert!(prompt.contains("most critical news stories for India"));
        assert!(prompt.contains("The Hindu"));
        // Only the first three topics make it into the hint.
        assert!(prompt.contains("Prioritize: Technology, Science, Climate."));
        assert!(!prompt.contains("Cricket"));
    }

    #[test]
    fn world_scope_uses_generic_sources() {
        let request = CurationRequest::new(india_profile(), FilterState::world());
        let prompt = search_prompt(&request);
        assert!(prompt.contains("major global events"));
        assert!(prompt.contains("Use verified news outlets in India."));
        assert!(!prompt.contains("The Hindu"));
        assert!(!prompt.contains("Prioritize:"));
    }

    #[test]
    fn state_scope_names_region_and_relaxes_count() {
        let request = CurationRequest::new(india_profile(), FilterState::state("Kerala"));
        let prompt = search_prompt(&request);
        assert!(prompt.contains("Find 4-5 significant stories."));
        assert!(prompt.contains("news from \"Kerala\" in India"));
        assert!(prompt.contains("The Hindu"));
    }

    #[test]
    fn search_scope_quotes_the_query() {
        let profile = UserProfile::new("Lena", "Germany", vec!["Energy".to_string()]);
        let request = CurationRequest::new(profile, FilterState::search("wind power"));
        let prompt = search_prompt(&request);
        assert!(prompt.contains("Search for: \"wind power\"."));
        assert!(prompt.contains("Find 5 relevant stories."));
        assert!(prompt.contains("verified news outlets in Germany"));
    }

    #[test]
    fn exclusions_keep_only_the_last_ten() {
        let mut request = CurationRequest::new(india_profile(), FilterState::top10());
        request.exclude_titles = (0..12).map(|i| format!("story {}", i)).collect();
        let prompt = search_prompt(&request);
        assert!(!prompt.contains("story 0"));
        assert!(!prompt.contains("\"story 1\""));
        assert!(prompt.contains("story 2"));
        assert!(prompt.contains("story 11"));
        assert!(prompt.contains("Find different/newer ones."));
    }

    #[test]
    fn no_exclusion_line_without_titles() {
        let request = CurationRequest::new(india_profile(), FilterState::top10());
        assert!(!search_prompt(&request).contains("DO NOT include"));
    }

    #[test]
    fn structuring_prompt_numbers_citations() {
        let citations = vec![
            GroundingCitation {
                uri: "https://example.com/a".to_string(),
                title: "Story A".to_string(),
            },
            GroundingCitation {
                uri: "https://example.com/b".to_string(),
                title: "Story B".to_string(),
            },
        ];
        let prompt = structuring_prompt("raw text", &citations, "India");
        assert!(prompt.contains("[0] URL: https://example.com/a (Title: \"Story A\")"));
        assert!(prompt.contains("[1] URL: https://example.com/b (Title: \"Story B\")"));
        assert!(prompt.contains("User Context: India."));
    }

    #[test]
    fn structuring_prompt_marks_missing_citations() {
        let prompt = structuring_prompt("raw text", &[], "India");
        assert!(prompt.contains("NO VERIFIED LINKS FOUND"));
    }
}
