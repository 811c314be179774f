use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use clarity_core::{
    FeedSnapshot, FilterState, NewsArticle, RecordStore, Result, UserProfile,
};
use clarity_inference::{CurationRequest, NewsService};

use crate::transitions::{plan, FetchMode, FilterAction, Transition};
use crate::STALENESS_WINDOW_MINUTES;

/// Where the application lands after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// No profile on disk: run onboarding before anything else.
    Onboarding,
    Ready {
        /// Articles surfaced instantly from the snapshot, before any fetch.
        restored: usize,
        /// Set when the snapshot was stale/missing/empty and a refresh ran.
        refreshed: Option<FetchOutcome>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A non-empty batch replaced the feed and the snapshot.
    Updated(usize),
    /// The fetch errored or came back empty; the feed was left untouched.
    NoNewData,
}

/// Owns the feed lifecycle: decides when cached articles are served, when a
/// fetch runs, and when the snapshot is rewritten.
pub struct FeedController {
    store: Arc<dyn RecordStore>,
    service: NewsService,
    profile: Option<UserProfile>,
    articles: Vec<NewsArticle>,
    last_updated: Option<DateTime<Utc>>,
    filter: FilterState,
}

/// True once the snapshot has outlived the staleness window. The boundary
/// itself still counts as fresh.
pub fn is_stale(captured_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - captured_at > Duration::minutes(STALENESS_WINDOW_MINUTES)
}

impl FeedController {
    pub fn new(store: Arc<dyn RecordStore>, service: NewsService) -> Self {
        Self {
            store,
            service,
            profile: None,
            articles: Vec::new(),
            last_updated: None,
            filter: FilterState::top10(),
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn articles(&self) -> &[NewsArticle] {
        &self.articles
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Startup: restore the profile, surface the cached articles
    /// immediately whatever their age, then refresh only if the snapshot is
    /// stale, missing, or empty. The refresh never clears what is already
    /// on screen.
    pub async fn initialize(&mut self) -> Result<InitOutcome> {
        let profile = match self.store.load_profile().await? {
            Some(profile) => profile,
            None => return Ok(InitOutcome::Onboarding),
        };
        self.profile = Some(profile);

        let snapshot = self.store.load_snapshot().await?;
        let (restored, needs_fetch, fetch_filter) = match snapshot {
            Some(snapshot) => {
                let empty = snapshot.articles.is_empty();
                let stale = is_stale(snapshot.timestamp, Utc::now());
                // Instant load: stale data beats a blank screen.
                self.articles = snapshot.articles;
                self.last_updated = Some(snapshot.timestamp);
                self.filter = snapshot.filter.clone();
                debug!(
                    "Restored snapshot: {} articles, stale={}, scope={}",
                    self.articles.len(),
                    stale,
                    self.filter.scope.as_str()
                );
                (self.articles.len(), stale || empty, snapshot.filter)
            }
            None => (0, true, FilterState::top10()),
        };

        let refreshed = if needs_fetch {
            Some(self.run_fetch(fetch_filter, Vec::new()).await?)
        } else {
            None
        };

        Ok(InitOutcome::Ready { restored, refreshed })
    }

    /// Finish onboarding: persist the new profile and pull the first feed.
    pub async fn complete_onboarding(&mut self, profile: UserProfile) -> Result<FetchOutcome> {
        self.store.save_profile(&profile).await?;
        self.profile = Some(profile);
        self.filter = FilterState::top10();
        self.run_fetch(FilterState::top10(), Vec::new()).await
    }

    /// Persist a profile edit. The next refresh picks up any country or
    /// topic change; nothing is refetched here.
    pub async fn update_profile(&mut self, profile: UserProfile) -> Result<()> {
        self.store.save_profile(&profile).await?;
        self.profile = Some(profile);
        Ok(())
    }

    /// Run one user action through the transition table.
    pub async fn apply(&mut self, action: FilterAction) -> Result<Option<FetchOutcome>> {
        let Transition {
            clear_articles,
            fetch,
            mode,
        } = plan(&self.filter, action);

        let Some(target) = fetch else {
            return Ok(None);
        };

        if clear_articles {
            self.articles.clear();
        }

        // A background refresh tells the model which stories it already
        // has, so repeats across refreshes are avoided.
        let exclude = if mode == FetchMode::Background && target == self.filter {
            self.articles.iter().map(|a| a.title.clone()).collect()
        } else {
            Vec::new()
        };

        Ok(Some(self.run_fetch(target, exclude).await?))
    }

    pub async fn manual_refresh(&mut self) -> Result<Option<FetchOutcome>> {
        self.apply(FilterAction::Refresh).await
    }

    /// Drop both persisted records and reset to a blank slate.
    pub async fn logout(&mut self) -> Result<()> {
        self.store.clear_profile().await?;
        self.store.clear_snapshot().await?;
        self.profile = None;
        self.articles.clear();
        self.last_updated = None;
        self.filter = FilterState::top10();
        info!("Logged out; persisted profile and feed cache removed");
        Ok(())
    }

    /// Fetch with `filter` and persist on success. An empty batch leaves
    /// both the screen and the snapshot exactly as they were.
    async fn run_fetch(
        &mut self,
        filter: FilterState,
        exclude_titles: Vec<String>,
    ) -> Result<FetchOutcome> {
        let Some(profile) = self.profile.clone() else {
            return Ok(FetchOutcome::NoNewData);
        };

        self.filter = filter.clone();

        let mut request = CurationRequest::new(profile, filter.clone());
        request.exclude_titles = exclude_titles;

        let articles = self.service.fetch_curated(&request).await;
        if articles.is_empty() {
            debug!("Fetch returned no articles; keeping current feed");
            return Ok(FetchOutcome::NoNewData);
        }

        let timestamp = Utc::now();
        let snapshot = FeedSnapshot {
            articles: articles.clone(),
            timestamp,
            filter,
        };
        self.store.save_snapshot(&snapshot).await?;

        let count = articles.len();
        self.articles = articles;
        self.last_updated = Some(timestamp);
        info!("Feed updated: {} articles", count);
        Ok(FetchOutcome::Updated(count))
    }
}
