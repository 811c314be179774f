use serde::{Deserialize, Serialize};

/// The current feed-selection mode. Scopes are mutually exclusive; `state`
/// and `search` carry companion data (region, query).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterScope {
    #[default]
    Top10,
    Domestic,
    World,
    State,
    Search,
}

impl FilterScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterScope::Top10 => "top10",
            FilterScope::Domestic => "domestic",
            FilterScope::World => "world",
            FilterScope::State => "state",
            FilterScope::Search => "search",
        }
    }
}

impl std::str::FromStr for FilterScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "top10" => Ok(FilterScope::Top10),
            "domestic" => Ok(FilterScope::Domestic),
            "world" => Ok(FilterScope::World),
            "state" => Ok(FilterScope::State),
            "search" => Ok(FilterScope::Search),
            other => Err(format!("unknown scope: {}", other)),
        }
    }
}

/// What the current feed represents. `query` is meaningful only for
/// scope=search, `region` only for scope=state/world.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub scope: FilterScope,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub region: String,
}

impl FilterState {
    pub fn top10() -> Self {
        Self::default()
    }

    pub fn domestic() -> Self {
        Self {
            scope: FilterScope::Domestic,
            ..Self::default()
        }
    }

    pub fn world() -> Self {
        Self {
            scope: FilterScope::World,
            ..Self::default()
        }
    }

    pub fn world_region(region: impl Into<String>) -> Self {
        Self {
            scope: FilterScope::World,
            query: String::new(),
            region: region.into(),
        }
    }

    pub fn state(region: impl Into<String>) -> Self {
        Self {
            scope: FilterScope::State,
            query: String::new(),
            region: region.into(),
        }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self {
            scope: FilterScope::Search,
            query: query.into(),
            region: String::new(),
        }
    }

    /// A state-scoped filter needs a region and a search needs a query
    /// before any fetch may be issued.
    pub fn ready_to_fetch(&self) -> bool {
        match self.scope {
            FilterScope::State => !self.region.trim().is_empty(),
            FilterScope::Search => !self.query.trim().is_empty(),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_without_region_is_not_fetchable() {
        let filter = FilterState {
            scope: FilterScope::State,
            query: String::new(),
            region: String::new(),
        };
        assert!(!filter.ready_to_fetch());
        assert!(FilterState::state("Kerala").ready_to_fetch());
    }

    #[test]
    fn search_without_query_is_not_fetchable() {
        let filter = FilterState {
            scope: FilterScope::Search,
            query: "  ".to_string(),
            region: String::new(),
        };
        assert!(!filter.ready_to_fetch());
        assert!(FilterState::search("monsoon").ready_to_fetch());
    }

    #[test]
    fn scope_round_trips_lowercase() {
        let json = serde_json::to_string(&FilterScope::Top10).unwrap();
        assert_eq!(json, "\"top10\"");
        let back: FilterScope = serde_json::from_str("\"state\"").unwrap();
        assert_eq!(back, FilterScope::State);
    }

    #[test]
    fn missing_fields_default_on_deserialize() {
        // Older cache records may lack region/query entirely.
        let state: FilterState = serde_json::from_str(r#"{"scope":"world"}"#).unwrap();
        assert_eq!(state.scope, FilterScope::World);
        assert!(state.region.is_empty());
        assert!(state.query.is_empty());
    }
}
