//! Content tab configuration
//!
//! Tabs are static configuration, not runtime objects: each one carries the
//! search index it scopes to, the year field used for sorting and faceting,
//! the filter dimensions that apply to it and the field set used for
//! free-text matching.

use crate::models::filters::FilterDimension;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// Top-level content category with its own index, sort defaults and filter
/// dimensions
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Publications,
    Fundings,
    Persons,
}

impl Tab {
    /// The tab every unknown route redirects to
    pub const DEFAULT: Tab = Tab::Publications;

    /// Resolve a raw path segment into a tab, `None` for unknown segments
    pub fn from_route(segment: &str) -> Option<Tab> {
        Tab::from_str(segment).ok()
    }

    /// The path segment this tab lives under
    pub fn route(&self) -> &'static str {
        match self {
            Tab::Publications => "publications",
            Tab::Fundings => "fundings",
            Tab::Persons => "persons",
        }
    }

    /// Human-readable label used in page titles
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Publications => "Publications",
            Tab::Fundings => "Fundings",
            Tab::Persons => "Persons",
        }
    }

    /// Search index name: the route segment minus its trailing plural marker
    pub fn index_name(&self) -> &'static str {
        match self {
            Tab::Publications => "publication",
            Tab::Fundings => "funding",
            Tab::Persons => "person",
        }
    }

    /// Field holding the record's year, where the tab has one
    pub fn year_field(&self) -> Option<&'static str> {
        match self {
            Tab::Publications => Some("publicationYear"),
            Tab::Fundings => Some("fundingStartYear"),
            Tab::Persons => None,
        }
    }

    /// Field the default sort falls back to
    pub fn default_sort_field(&self) -> &'static str {
        match self {
            Tab::Publications => "publicationYear",
            Tab::Fundings => "fundingStartYear",
            Tab::Persons => "lastName.keyword",
        }
    }

    /// Filter dimensions that produce clauses on this tab
    pub fn applicable_dimensions(&self) -> &'static [FilterDimension] {
        match self {
            Tab::Publications => &[
                FilterDimension::Year,
                FilterDimension::Field,
                FilterDimension::JuFo,
                FilterDimension::OpenAccess,
                FilterDimension::InternationalCollaboration,
                FilterDimension::PublicationType,
                FilterDimension::CountryCode,
                FilterDimension::Lang,
            ],
            Tab::Fundings => &[
                FilterDimension::Year,
                FilterDimension::Field,
                FilterDimension::Status,
                FilterDimension::FundingAmount,
            ],
            Tab::Persons => &[],
        }
    }

    /// Field set used for fuzzy free-text matching on this tab's index
    pub fn search_fields(&self) -> &'static [&'static str] {
        match self {
            Tab::Publications => &[
                "publicationName",
                "authorsText",
                "journalName",
                "publisherName",
                "keywords.keyword",
            ],
            Tab::Fundings => &[
                "projectNameFi",
                "projectDescriptionFi",
                "funderNameFi",
                "fundedNameFi",
                "callProgrammeNameFi",
            ],
            Tab::Persons => &["firstName", "lastName", "orcid"],
        }
    }
}
