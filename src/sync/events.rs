//! Event types flowing in and out of the synchronizer

use crate::error::Result;
use crate::models::{NavigationIntent, NavigationState, PathParams, QueryParams, Tab};
use crate::transport::SearchResponse;
use tokio::sync::mpsc;

/// One merged parameter event: the path and query parameters as delivered
/// by the navigation layer for a single URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamEvent {
    pub path: PathParams,
    pub query: QueryParams,
}

/// Which fetch a spawned request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// One page of hits
    Results,
    /// Zero-hit facet counts
    Facets,
}

/// Completion of a spawned fetch, stamped with the transition generation
/// that requested it
#[derive(Debug)]
pub(crate) struct FetchOutcome {
    pub generation: u64,
    pub kind: FetchKind,
    pub tab: Tab,
    pub result: Result<SearchResponse>,
}

/// Effects the synchronizer produces for its collaborators
#[derive(Debug, Clone)]
pub enum SyncEffect {
    /// The URL carried an unknown tab; the router should perform this
    /// navigation
    Redirect { intent: NavigationIntent },

    /// The active tab changed
    TabChanged { tab: Tab },

    /// The free-text search term changed
    SearchTermChanged { term: String },

    /// A full transition was applied. `filters_toggle` flips on every
    /// transition; consumers refresh on flip detection, not on value, so
    /// repeated identical transitions still trigger exactly one refresh.
    StateApplied {
        state: NavigationState,
        filters_toggle: bool,
    },

    /// Page title and its accessible short form
    TitleUpdated { full: String, short: String },

    /// A page of hits arrived
    ResultsUpdated { tab: Tab, total: u64 },

    /// Facet counts arrived
    FacetsUpdated { tab: Tab },

    /// A fetch failed; previously rendered data stays visible
    FetchFailed { message: String },
}

/// Channel ends handed to the embedding component
pub struct SyncHandle {
    /// Merged parameter events in
    pub params: mpsc::Sender<ParamEvent>,

    /// Render acknowledgements from the list collaborator, consumed when
    /// cached data is reused after a redirect
    pub render_ack: mpsc::Sender<()>,

    /// Effects out
    pub effects: mpsc::Receiver<SyncEffect>,
}
