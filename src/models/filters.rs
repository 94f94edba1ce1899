//! Filter dimensions and the selected-values state behind them
//!
//! Query parameters may arrive as a scalar or a sequence depending on how
//! many times the key repeats in the URL; everything is normalized into a
//! `Vec<String>` with empty entries dropped. An empty sequence always means
//! "dimension unconstrained", never "exclude everything".

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// One filterable dimension of the result set
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum FilterDimension {
    Year,
    Status,
    Field,
    JuFo,
    OpenAccess,
    InternationalCollaboration,
    PublicationType,
    CountryCode,
    Lang,
    FundingAmount,
}

/// A query parameter value as produced by the navigation layer: either a
/// single scalar or a repeated sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    One(String),
    Many(Vec<String>),
}

impl ParamValue {
    /// Normalize into a sequence, dropping empty entries
    pub fn into_values(self) -> Vec<String> {
        match self {
            ParamValue::One(v) => {
                if v.is_empty() {
                    Vec::new()
                } else {
                    vec![v]
                }
            }
            ParamValue::Many(vs) => vs.into_iter().filter(|v| !v.is_empty()).collect(),
        }
    }

    fn values(&self) -> Vec<String> {
        self.clone().into_values()
    }
}

/// Raw query-string parameters keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams(pub BTreeMap<String, ParamValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from flat key/value pairs, collapsing repeated keys into
    /// sequences. This is the inverse of [`FilterState::encode`].
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params: BTreeMap<String, ParamValue> = BTreeMap::new();
        for (key, value) in pairs {
            match params.remove(&key) {
                None => {
                    params.insert(key, ParamValue::One(value));
                }
                Some(ParamValue::One(existing)) => {
                    params.insert(key, ParamValue::Many(vec![existing, value]));
                }
                Some(ParamValue::Many(mut existing)) => {
                    existing.push(value);
                    params.insert(key, ParamValue::Many(existing));
                }
            }
        }
        Self(params)
    }

    /// All normalized values under `key`; empty when absent
    pub fn values(&self, key: &str) -> Vec<String> {
        self.0.get(key).map(ParamValue::values).unwrap_or_default()
    }

    /// First normalized value under `key`
    pub fn scalar(&self, key: &str) -> Option<String> {
        self.values(key).into_iter().next()
    }
}

/// Selected values per filter dimension
///
/// Keys are kept in a fixed dimension order so encoding is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    selections: BTreeMap<FilterDimension, Vec<String>>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read raw query parameters into a normalized filter state
    pub fn from_params(params: &QueryParams) -> Self {
        let mut state = Self::new();
        for (key, value) in &params.0 {
            if let Ok(dimension) = FilterDimension::from_str(key) {
                state.set(dimension, value.values());
            }
        }
        state
    }

    /// Replace a dimension's selection, dropping empty entries
    pub fn set(&mut self, dimension: FilterDimension, values: Vec<String>) {
        let values: Vec<String> = values.into_iter().filter(|v| !v.is_empty()).collect();
        if values.is_empty() {
            self.selections.remove(&dimension);
        } else {
            self.selections.insert(dimension, values);
        }
    }

    /// Selected values for a dimension; empty slice when unconstrained
    pub fn get(&self, dimension: FilterDimension) -> &[String] {
        self.selections
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any dimension is constrained
    pub fn has_any(&self) -> bool {
        !self.selections.is_empty()
    }

    /// Serialize into flat query-parameter pairs, one pair per value.
    /// Decoding the pairs back through [`QueryParams::from_pairs`] and
    /// [`FilterState::from_params`] yields an equal state.
    pub fn encode(&self) -> Vec<(String, String)> {
        self.selections
            .iter()
            .flat_map(|(dimension, values)| {
                values
                    .iter()
                    .map(move |v| (dimension.to_string(), v.clone()))
            })
            .collect()
    }
}
