// crates/storefront-core/src/search/state.rs
use crate::error::SearchFailure;
use crate::model::SearchResult;

/// Published state of the search box. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    /// Nothing to show: the query is empty or too short.
    #[default]
    Idle,
    /// Waiting for the user to stop typing.
    Debouncing { query: String },
    /// Exactly one request, tagged `seq`, is outstanding for `query`.
    Loading { query: String, seq: u64 },
    Success(Vec<SearchResult>),
    Failed(SearchFailure),
}

impl SearchState {
    /// Results of the last successful search, empty in every other state.
    pub fn results(&self) -> &[SearchResult] {
        match self {
            SearchState::Success(results) => results,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading { .. })
    }

    /// Debouncing or loading: a result is on its way.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            SearchState::Debouncing { .. } | SearchState::Loading { .. }
        )
    }

    pub fn error(&self) -> Option<&SearchFailure> {
        match self {
            SearchState::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// What the dropdown under the search box should display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchView<'a> {
    /// The dropdown is closed.
    Hidden,
    /// Placeholder rows while a search is pending.
    Skeleton { rows: usize },
    Results(&'a [SearchResult]),
    /// Idle, or the catalog answered with an empty list.
    NoResults,
    Error(&'a SearchFailure),
}

impl SearchView<'_> {
    pub fn is_visible(&self) -> bool {
        !matches!(self, SearchView::Hidden)
    }
}
