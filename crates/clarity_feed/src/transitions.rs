use clarity_core::{FilterScope, FilterState};

/// A user action against the current filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    /// Switch to top10, domestic, world, or state via the scope buttons.
    SetScope(FilterScope),
    /// Pick a region from the state/world sub-selector.
    SelectRegion(String),
    /// Submit the search box.
    Search(String),
    /// Re-run whatever the feed currently shows.
    Refresh,
}

/// Whether a fetch may blank the list while it runs. Foreground fetches
/// clear first so the loading state is unambiguous; background fetches keep
/// the current articles on screen and overlay an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Foreground,
    Background,
}

/// What a single action does: whether the displayed articles are cleared,
/// and which filter state (if any) to fetch with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub clear_articles: bool,
    pub fetch: Option<FilterState>,
    pub mode: FetchMode,
}

impl Transition {
    fn noop() -> Self {
        Self {
            clear_articles: false,
            fetch: None,
            mode: FetchMode::Background,
        }
    }

    fn foreground(filter: FilterState) -> Self {
        Self {
            clear_articles: true,
            fetch: Some(filter),
            mode: FetchMode::Foreground,
        }
    }

    fn background(filter: FilterState) -> Self {
        Self {
            clear_articles: false,
            fetch: Some(filter),
            mode: FetchMode::Background,
        }
    }
}

/// The scope transition table. Every row keeps the two invariants: a state
/// fetch always carries a region, a search fetch always carries a query.
pub fn plan(current: &FilterState, action: FilterAction) -> Transition {
    match action {
        FilterAction::SetScope(FilterScope::Top10) => Transition::foreground(FilterState::top10()),
        FilterAction::SetScope(FilterScope::Domestic) => {
            Transition::foreground(FilterState::domestic())
        }
        FilterAction::SetScope(FilterScope::World) => Transition::foreground(FilterState::world()),
        FilterAction::SetScope(FilterScope::State) => {
            // Until a region is chosen there is nothing to fetch.
            if current.scope == FilterScope::State || current.region.trim().is_empty() {
                Transition::noop()
            } else {
                Transition::foreground(FilterState::state(current.region.clone()))
            }
        }
        // `search` is only entered through Search, never as a bare scope.
        FilterAction::SetScope(FilterScope::Search) => Transition::noop(),
        FilterAction::SelectRegion(region) => {
            if region.trim().is_empty() {
                return Transition::noop();
            }
            match current.scope {
                // Region picks refine the feed in place, so the old
                // articles stay up while the new batch loads.
                FilterScope::Domestic | FilterScope::State => {
                    Transition::background(FilterState::state(region))
                }
                FilterScope::World => Transition::background(FilterState::world_region(region)),
                _ => Transition::noop(),
            }
        }
        FilterAction::Search(query) => {
            if query.trim().is_empty() {
                Transition::noop()
            } else {
                Transition::foreground(FilterState::search(query))
            }
        }
        FilterAction::Refresh => {
            if current.ready_to_fetch() {
                Transition::background(current.clone())
            } else {
                Transition::noop()
            }
        }
    }
}
