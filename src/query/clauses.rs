//! Per-dimension filter clause builders
//!
//! Each builder maps one dimension's selected values to zero or more boolean
//! query fragments. An empty selection produces zero clauses for every
//! dimension, and malformed or unknown symbolic codes are silently skipped;
//! the filter bar must never be able to construct a query that matches
//! nothing.

use crate::models::{FilterDimension, Tab};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Cutoff date separating ongoing from ended funding decisions
pub static FUNDING_STATUS_CUTOFF: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(2017, 1, 1).unwrap_or(NaiveDate::MIN));

fn cutoff_string() -> String {
    FUNDING_STATUS_CUTOFF.format("%Y-%m-%d").to_string()
}

/// An opaque boolean-query fragment understood by the search transport.
/// Produced here, consumed only by the query assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryClause(Value);

impl QueryClause {
    fn term(field: &str, value: Value) -> Self {
        Self(json!({ "term": { (field): value } }))
    }

    fn exists(field: &str) -> Self {
        Self(json!({ "exists": { "field": field } }))
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Dispatch to the builder for one dimension
pub fn clauses_for(dimension: FilterDimension, values: &[String], tab: Tab) -> Vec<QueryClause> {
    match dimension {
        FilterDimension::Year => year_clauses(values, tab),
        FilterDimension::Status => status_clauses(values),
        FilterDimension::Field => field_clauses(values),
        FilterDimension::JuFo => jufo_clauses(values),
        FilterDimension::OpenAccess => open_access_clauses(values),
        FilterDimension::InternationalCollaboration => {
            international_collaboration_clauses(values)
        }
        FilterDimension::PublicationType => publication_type_clauses(values),
        FilterDimension::CountryCode => country_code_clauses(values),
        FilterDimension::Lang => lang_clauses(values),
        FilterDimension::FundingAmount => funding_amount_clauses(values),
    }
}

/// Year equality clauses against the tab's year field
pub fn year_clauses(values: &[String], tab: Tab) -> Vec<QueryClause> {
    let Some(field) = tab.year_field() else {
        return Vec::new();
    };
    values
        .iter()
        .map(|v| QueryClause::term(field, numeric_or_string(v)))
        .collect()
}

/// Field-of-science equality clauses
pub fn field_clauses(values: &[String]) -> Vec<QueryClause> {
    values
        .iter()
        .map(|v| QueryClause::term("fields_of_science.nameFiScience.keyword", json!(v)))
        .collect()
}

/// Publication forum level clauses
///
/// The symbolic codes are buckets over the numeric `jufoClassCode` levels;
/// `noVal` selects records carrying the sentinel blank level. Multiple codes
/// OR together downstream.
pub fn jufo_clauses(values: &[String]) -> Vec<QueryClause> {
    values
        .iter()
        .filter_map(|code| {
            let level = match code.as_str() {
                "top" => json!(3),
                "leading" => json!(2),
                "basic" => json!(1),
                "others" => json!(0),
                "noVal" => json!(" "),
                _ => return None,
            };
            Some(QueryClause::term("jufoClassCode.keyword", level))
        })
        .collect()
}

/// Open access code clauses; `noAccessInfo` covers the three codes that all
/// mean "no information recorded"
pub fn open_access_clauses(values: &[String]) -> Vec<QueryClause> {
    let mut clauses = Vec::new();
    for code in values {
        match code.as_str() {
            "noAccessInfo" => {
                for level in [0, -1, 9] {
                    clauses.push(QueryClause::term("openAccessCode", json!(level)));
                }
            }
            "openAccess" => clauses.push(QueryClause::term("openAccessCode", json!(1))),
            "hybridAccess" => clauses.push(QueryClause::term("openAccessCode", json!(2))),
            _ => {}
        }
    }
    clauses
}

/// International collaboration flag clause
///
/// The parameter is a JSON-stringified boolean. A truthy parse yields an
/// equality clause; anything else yields an `exists` clause, i.e. "the field
/// was recorded at all" - this is not the logical negation of the flag.
pub fn international_collaboration_clauses(values: &[String]) -> Vec<QueryClause> {
    let Some(raw) = values.first() else {
        return Vec::new();
    };
    match serde_json::from_str::<bool>(raw) {
        Ok(true) => vec![QueryClause::term("internationalCollaboration", json!(true))],
        _ => vec![QueryClause::exists("internationalCollaboration")],
    }
}

/// Funding lifecycle status clause against the fixed cutoff date.
/// Both range boundaries are inclusive, so a funding ending exactly on the
/// cutoff matches either status.
pub fn status_clauses(values: &[String]) -> Vec<QueryClause> {
    let Some(status) = values.first() else {
        return Vec::new();
    };
    match status.as_str() {
        "onGoing" => vec![QueryClause(json!({
            "range": { "fundingEndDate": { "gte": cutoff_string() } }
        }))],
        "ended" => vec![QueryClause(json!({
            "range": { "fundingEndDate": { "lte": cutoff_string() } }
        }))],
        _ => Vec::new(),
    }
}

/// Funding amount bucket clauses
pub fn funding_amount_clauses(values: &[String]) -> Vec<QueryClause> {
    values
        .iter()
        .filter_map(|bucket| match bucket.as_str() {
            "over100k" => Some(QueryClause(json!({
                "range": { "amount": { "gt": 100_000 } }
            }))),
            "under100k" => Some(QueryClause(json!({
                "range": { "amount": { "lte": 100_000 } }
            }))),
            _ => None,
        })
        .collect()
}

/// Publication type code equality clauses
pub fn publication_type_clauses(values: &[String]) -> Vec<QueryClause> {
    values
        .iter()
        .map(|v| QueryClause::term("publicationTypeCode.keyword", json!(v)))
        .collect()
}

/// Country code equality clauses
pub fn country_code_clauses(values: &[String]) -> Vec<QueryClause> {
    values
        .iter()
        .map(|v| QueryClause::term("countryCode.keyword", json!(v)))
        .collect()
}

/// Language code equality clauses
pub fn lang_clauses(values: &[String]) -> Vec<QueryClause> {
    values
        .iter()
        .map(|v| QueryClause::term("languageCode.keyword", json!(v)))
        .collect()
}

fn numeric_or_string(raw: &str) -> Value {
    raw.parse::<i64>().map(Value::from).unwrap_or_else(|_| json!(raw))
}
