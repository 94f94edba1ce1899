//! Query-construction and navigation-state synchronization engine for a
//! research publication and funding search portal.
//!
//! The browser address bar is the single source of truth for navigable state:
//! path parameters carry the content tab, search term and page, query
//! parameters carry filters and sort. This crate owns everything between the
//! raw parameter events and the search engine:
//!
//! - **Clause building**: per-dimension filter selections become boolean
//!   query fragments ([`query::clauses`]).
//! - **Query assembly**: fragments plus the free-text term become one boolean
//!   query document per tab ([`query::assembler`]).
//! - **Payloads**: paged result requests and zero-hit facet-count requests
//!   ([`query::payload`]).
//! - **Sort & pagination**: reversible sort-key encoding and 1-based page to
//!   offset conversion with a durable page slot ([`query::sort`],
//!   [`pagination`], [`state`]).
//! - **Synchronization**: a single merged parameter stream, debounced and
//!   de-duplicated, drives fetch decisions and title updates
//!   ([`sync::NavigationStateSynchronizer`]).
//!
//! Rendering, routing tables and chart layout stay outside; they talk to the
//! engine through the effect channel and the [`transport::SearchTransport`]
//! seam.

pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod query;
pub mod state;
pub mod sync;
pub mod transport;

pub use config::EngineConfig;
pub use error::{AppError, Result};
pub use models::{FilterDimension, FilterState, NavigationState, PathParams, QueryParams, Tab};
pub use pagination::{PageWindow, PaginationController, PAGE_SIZE};
pub use sync::{NavigationStateSynchronizer, ParamEvent, SyncEffect, SyncHandle};
pub use transport::{SearchResponse, SearchTransport};
