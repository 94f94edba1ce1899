//! Search transport seam
//!
//! The engine only builds request bodies and reads three things out of the
//! response: `hits.total`, `hits.hits[*]._source` and
//! `aggregations.*.buckets`. Everything else passes through untouched.

mod http;

pub use http::HttpSearchTransport;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Executes a search request against one index
#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse>;
}

/// A single hit; the record itself stays opaque JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_source", default)]
    pub source: Value,
}

/// The hits section of a response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHits {
    #[serde(default)]
    pub total: u64,

    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// One bucket of a terms aggregation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationBucket {
    pub key: Value,

    #[serde(default)]
    pub doc_count: u64,
}

/// One named aggregation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Aggregation {
    #[serde(default)]
    pub buckets: Vec<AggregationBucket>,
}

/// Parsed search response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: SearchHits,

    #[serde(default)]
    pub aggregations: HashMap<String, Aggregation>,
}

impl SearchResponse {
    /// Total hit count before pagination
    pub fn total(&self) -> u64 {
        self.hits.total
    }

    /// The `_source` records of the current page
    pub fn sources(&self) -> impl Iterator<Item = &Value> {
        self.hits.hits.iter().map(|hit| &hit.source)
    }

    /// Buckets of a named aggregation; empty when absent
    pub fn buckets(&self, name: &str) -> &[AggregationBucket] {
        self.aggregations
            .get(name)
            .map(|agg| agg.buckets.as_slice())
            .unwrap_or(&[])
    }
}
