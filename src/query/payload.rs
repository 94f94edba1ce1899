//! Full search request payloads
//!
//! Two shapes: the paged result payload fetching one page of hits, and the
//! zero-hit aggregation payload computing facet counts. Facet bucket
//! ordering is deterministic - year buckets descend by key, classification
//! buckets follow a per-facet key order - so option lists render stably.

use crate::models::{FilterState, Tab};
use crate::pagination::PageWindow;
use crate::query::assembler::build_query;
use crate::query::sort::ResolvedSort;
use serde_json::{json, Map, Value};

/// Request body for one page of hits
pub fn result_payload(
    tab: Tab,
    search_term: &str,
    filters: &FilterState,
    window: &PageWindow,
    sort: &ResolvedSort,
) -> Value {
    json!({
        "query": build_query(tab, search_term, filters),
        "size": window.size,
        "from": window.offset,
        "sort": [sort.to_clause()]
    })
}

/// Request body for facet counts: zero hits, aggregations only.
///
/// The query is attached only when the tab has an active search term or
/// filter; an unconstrained tab counts facets over the whole index. Facets
/// are computed over the text/tab-scoped candidate set, so the user's own
/// filter selections never shrink their option counts - callers pass an
/// empty `FilterState` here when that behavior is wanted.
pub fn aggregation_payload(tab: Tab, search_term: &str, filters: &FilterState) -> Value {
    let mut payload = Map::new();
    payload.insert("size".to_string(), json!(0));
    payload.insert("aggs".to_string(), facet_definitions(tab));

    if !search_term.is_empty() || filters.has_any() {
        payload.insert(
            "query".to_string(),
            build_query(tab, search_term, filters),
        );
    }

    Value::Object(payload)
}

/// Aggregation-only payload for the year / field-of-science drill-down
/// visualisation
pub fn visualisation_payload(tab: Tab, search_term: &str, filters: &FilterState) -> Value {
    let mut payload = Map::new();
    payload.insert("size".to_string(), json!(0));

    if let Some(year_field) = tab.year_field() {
        payload.insert(
            "aggs".to_string(),
            json!({
                "year": {
                    "terms": { "field": year_field },
                    "aggs": {
                        "fieldOfScience": {
                            "terms": {
                                "field": "fields_of_science.nameFiScience.keyword",
                                "size": 100
                            }
                        }
                    }
                }
            }),
        );
    }

    if !search_term.is_empty() || filters.has_any() {
        payload.insert(
            "query".to_string(),
            build_query(tab, search_term, filters),
        );
    }

    Value::Object(payload)
}

fn facet_definitions(tab: Tab) -> Value {
    let mut aggs = Map::new();

    if let Some(year_field) = tab.year_field() {
        aggs.insert(
            "year".to_string(),
            json!({
                "terms": { "field": year_field, "size": 50, "order": { "_key": "desc" } }
            }),
        );
    }
    aggs.insert(
        "languageCode".to_string(),
        json!({ "terms": { "field": "languageCode.keyword" } }),
    );
    aggs.insert(
        "juFo".to_string(),
        json!({
            "terms": { "field": "jufoClassCode.keyword", "order": { "_key": "desc" } }
        }),
    );
    aggs.insert(
        "openAccess".to_string(),
        json!({ "terms": { "field": "openAccessCode" } }),
    );
    aggs.insert(
        "internationalCollaboration".to_string(),
        json!({ "terms": { "field": "internationalCollaboration", "size": 2 } }),
    );

    match tab {
        Tab::Publications => {
            aggs.insert(
                "fieldsOfScience".to_string(),
                json!({
                    "terms": {
                        "field": "fields_of_science.nameFiScience.keyword",
                        "size": 250,
                        "order": { "_key": "asc" }
                    },
                    "aggs": {
                        "fieldId": {
                            "terms": { "field": "fields_of_science.fieldIdScience" }
                        }
                    }
                }),
            );
        }
        Tab::Fundings => {
            aggs.insert(
                "scheme".to_string(),
                json!({ "terms": { "field": "keywords.scheme.keyword" } }),
            );
            aggs.insert(
                "keywords".to_string(),
                json!({ "terms": { "field": "keywords.keyword" } }),
            );
        }
        Tab::Persons => {}
    }

    Value::Object(aggs)
}
