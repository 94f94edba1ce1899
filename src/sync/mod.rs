//! Navigation state synchronization
//!
//! The orchestrator of the engine: merges path-parameter and query-parameter
//! change events into one coherent, de-duplicated state transition, decides
//! which downstream fetches are necessary and drives title and facet
//! updates. Collaborators talk to it exclusively through channels - the
//! parameter stream in, the effect stream out - so the debounce and ordering
//! contract stays auditable.

mod events;
mod synchronizer;
mod title;

pub use events::{FetchKind, ParamEvent, SyncEffect, SyncHandle};
pub use synchronizer::{should_refetch_facets, NavigationStateSynchronizer, SyncPhase};
pub use title::{format_count, page_title, short_heading};
