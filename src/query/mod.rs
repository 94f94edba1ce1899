//! Boolean query construction for the search transport
//!
//! Everything in this module is synchronous and side-effect free: filter
//! selections in, JSON query documents out.
//!
//! - [`clauses`]: one pure function per filter dimension mapping selected
//!   values to boolean-query fragments
//! - [`assembler`]: combines the index scope, the free-text clause and the
//!   per-dimension clause groups into one `bool.must` conjunction
//! - [`payload`]: wraps a query into a paged result request or a zero-hit
//!   aggregation request for facet counts
//! - [`sort`]: maps a tab plus requested sort key to a concrete field and
//!   direction

pub mod assembler;
pub mod clauses;
pub mod payload;
pub mod sort;

pub use assembler::build_query;
pub use clauses::{clauses_for, QueryClause, FUNDING_STATUS_CUTOFF};
pub use payload::{aggregation_payload, result_payload, visualisation_payload};
pub use sort::{resolve_sort, ResolvedSort, SortDirection, SortSelection};
