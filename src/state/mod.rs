//! Durable navigation state
//!
//! One piece of state survives navigations: the last-used page number,
//! stored under a single global key with last-writer-wins semantics.
//! Concurrent sessions sharing the slot clobber each other's page position;
//! that is a known limitation of the single-slot design, not a bug.

mod sled_store;
mod store;

pub use sled_store::SledPageStore;
pub use store::{InMemoryPageStore, PageStore, PAGE_NUMBER_KEY};
