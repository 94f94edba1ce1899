//! Combines clause fragments and the free-text term into one boolean query
//! document per tab

use crate::models::{FilterState, Tab};
use crate::query::clauses::{clauses_for, QueryClause};
use serde_json::{json, Value};

/// Build the boolean query document for one tab.
///
/// The `must` conjunction holds the index-scope clause, the fuzzy multi-field
/// match when a search term is present, and one entry per constrained filter
/// dimension. A dimension with several clauses is wrapped in a `should`
/// disjunction; a dimension with exactly one clause is inserted directly; an
/// unconstrained dimension contributes nothing.
pub fn build_query(tab: Tab, search_term: &str, filters: &FilterState) -> Value {
    let mut must: Vec<Value> = vec![json!({ "term": { "_index": tab.index_name() } })];

    if !search_term.is_empty() {
        must.push(free_text_clause(tab, search_term));
    }

    for dimension in tab.applicable_dimensions() {
        let group = clauses_for(*dimension, filters.get(*dimension), tab);
        match group.len() {
            0 => {}
            1 => {
                let clause = group.into_iter().next().map(QueryClause::into_value);
                if let Some(clause) = clause {
                    must.push(clause);
                }
            }
            _ => {
                let should: Vec<Value> =
                    group.into_iter().map(QueryClause::into_value).collect();
                must.push(json!({ "bool": { "should": should } }));
            }
        }
    }

    json!({ "bool": { "must": must } })
}

fn free_text_clause(tab: Tab, search_term: &str) -> Value {
    json!({
        "multi_match": {
            "query": search_term,
            "fields": tab.search_fields(),
            "fuzziness": "AUTO"
        }
    })
}
