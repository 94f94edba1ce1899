//! Navigation state snapshots and the intents the engine produces back to
//! the navigation layer

use crate::models::filters::{FilterState, QueryParams};
use crate::models::tab::Tab;
use serde::{Deserialize, Serialize};

/// Path-segment parameters as delivered by the router
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathParams {
    /// Raw tab segment; may be missing or unknown
    pub tab: Option<String>,

    /// Free-text search term
    pub input: Option<String>,

    /// Raw page number segment
    pub page: Option<String>,
}

/// The authoritative snapshot of one navigation transition
///
/// Created fresh on every merged parameter event and never mutated in place;
/// deltas are computed by comparing against the previous snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub tab: Tab,
    pub search_term: String,
    pub page: u32,
    /// Requested sort key in its reversible URL encoding, if any
    pub sort: Option<String>,
    pub filters: FilterState,
}

impl NavigationState {
    /// Derive a snapshot from raw path and query parameters
    pub fn derive(tab: Tab, path: &PathParams, query: &QueryParams) -> Self {
        let search_term = path.input.clone().unwrap_or_default();
        let page = path
            .page
            .clone()
            .or_else(|| query.scalar("page"))
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let sort = query.scalar("sort");
        let filters = FilterState::from_params(query);

        Self {
            tab,
            search_term,
            page,
            sort,
            filters,
        }
    }

    /// Compare against the previous snapshot
    pub fn delta_from(&self, previous: Option<&NavigationState>) -> StateDelta {
        match previous {
            None => StateDelta {
                tab_changed: true,
                search_term_changed: true,
                page_changed: true,
            },
            Some(prev) => StateDelta {
                tab_changed: self.tab != prev.tab,
                search_term_changed: self.search_term != prev.search_term,
                page_changed: self.page != prev.page,
            },
        }
    }
}

/// What changed between two consecutive snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateDelta {
    pub tab_changed: bool,
    pub search_term_changed: bool,
    pub page_changed: bool,
}

/// A navigation the engine asks the router to perform.
///
/// The engine never mutates its own state directly for these; the router
/// applies the navigation and the resulting parameter event flows back in,
/// keeping the address bar canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationIntent {
    /// Navigate to a different page of the current result set
    Paginate { page: u32 },

    /// Merge a new sort key into the query parameters
    SetSort { key: String },

    /// Replace an unknown tab segment with a known one
    RedirectToTab { tab: Tab },
}
