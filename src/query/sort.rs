//! Sort key resolution
//!
//! Sort keys travel in the URL with a reversible encoding: a bare column
//! name means ascending, the same name with a `Desc` suffix means
//! descending. The resolver maps the column name to the concrete index field
//! per tab, falling back to the tab's year field descending when no key is
//! supplied.

use crate::models::{NavigationIntent, Tab};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const DESC_MARKER: &str = "Desc";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn order(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// A sort selection as it appears in navigation query parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSelection {
    /// Column key, e.g. `year` or `name`
    pub key: String,
    pub direction: SortDirection,
}

impl SortSelection {
    /// Parse the URL encoding; `yearDesc` splits into `year` descending
    pub fn decode(raw: &str) -> Self {
        match raw.strip_suffix(DESC_MARKER) {
            Some(key) if !key.is_empty() => Self {
                key: key.to_string(),
                direction: SortDirection::Descending,
            },
            _ => Self {
                key: raw.to_string(),
                direction: SortDirection::Ascending,
            },
        }
    }

    /// Re-serialize into the URL encoding. Round-trips exactly with
    /// [`SortSelection::decode`].
    pub fn encode(&self) -> String {
        match self.direction {
            SortDirection::Ascending => self.key.clone(),
            SortDirection::Descending => format!("{}{}", self.key, DESC_MARKER),
        }
    }

    /// The navigation asking the router to merge this selection into the
    /// query parameters. The sort never changes in place; the router applies
    /// the intent and the resulting parameter event flows back in.
    pub fn to_intent(&self) -> NavigationIntent {
        NavigationIntent::SetSort { key: self.encode() }
    }
}

/// A concrete field plus direction ready for the request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSort {
    pub field: String,
    pub direction: SortDirection,
}

impl ResolvedSort {
    /// The sort entry for the search request body
    pub fn to_clause(&self) -> Value {
        json!({ (self.field.as_str()): { "order": self.order() } })
    }

    fn order(&self) -> &'static str {
        self.direction.order()
    }
}

/// Resolve a requested sort key for a tab, defaulting to the tab's year
/// field descending
pub fn resolve_sort(tab: Tab, requested: Option<&str>) -> ResolvedSort {
    let Some(raw) = requested else {
        return ResolvedSort {
            field: tab.default_sort_field().to_string(),
            direction: SortDirection::Descending,
        };
    };

    let selection = SortSelection::decode(raw);
    ResolvedSort {
        field: sort_field(tab, &selection.key).to_string(),
        direction: selection.direction,
    }
}

fn sort_field(tab: Tab, key: &str) -> &'static str {
    match (tab, key) {
        (Tab::Publications, "year") => "publicationYear",
        (Tab::Publications, "name") => "publicationName.keyword",
        (Tab::Publications, "author") => "authorsText.keyword",
        (Tab::Publications, "journal") => "journalName.keyword",
        (Tab::Fundings, "year") => "fundingStartYear",
        (Tab::Fundings, "name") => "projectNameFi.keyword",
        (Tab::Fundings, "funder") => "funderNameFi.keyword",
        (Tab::Persons, "name") => "lastName.keyword",
        // Unknown keys fall back to the tab default rather than erroring
        _ => tab.default_sort_field(),
    }
}
