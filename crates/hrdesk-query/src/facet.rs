//! Categorical facet filters and the filter state the UI layer owns.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::record::Record;
use crate::schema::Schema;
use crate::value::Value;

/// Sentinel a facet selector uses for "no constraint".
pub const ALL: &str = "all";

/// Selected value of a single facet.
///
/// Converts from strings with `"all"` mapping to [`FacetValue::All`], so a
/// dropdown's raw value can be stored directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FacetValue {
    /// The facet imposes no constraint.
    #[default]
    All,
    /// Records must carry exactly this value.
    Only(String),
}

impl FacetValue {
    /// Returns `true` if the facet imposes no constraint.
    pub fn is_all(&self) -> bool {
        matches!(self, FacetValue::All)
    }

    /// The selector's raw value, `"all"` for [`FacetValue::All`].
    pub fn as_str(&self) -> &str {
        match self {
            FacetValue::All => ALL,
            FacetValue::Only(v) => v,
        }
    }
}

impl From<String> for FacetValue {
    fn from(s: String) -> Self {
        if s == ALL {
            FacetValue::All
        } else {
            FacetValue::Only(s)
        }
    }
}

impl From<&str> for FacetValue {
    fn from(s: &str) -> Self {
        FacetValue::from(s.to_string())
    }
}

impl From<FacetValue> for String {
    fn from(v: FacetValue) -> Self {
        match v {
            FacetValue::All => ALL.to_string(),
            FacetValue::Only(s) => s,
        }
    }
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search term and facet selections for one list screen.
///
/// ```
/// use hrdesk_query::{FacetValue, FilterState};
///
/// let filter = FilterState::new()
///     .search("sick")
///     .facet("status", "approved")
///     .facet("department", "all");
///
/// assert_eq!(filter.facets["department"], FacetValue::All);
/// assert_eq!(filter.active_facets().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub search_term: String,
    pub facets: BTreeMap<String, FacetValue>,
}

impl FilterState {
    /// An empty search with no facet selections.
    pub fn new() -> Self {
        FilterState::default()
    }

    /// Sets the free-text search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Selects `value` for the facet `name`.
    pub fn facet(mut self, name: impl Into<String>, value: impl Into<FacetValue>) -> Self {
        self.facets.insert(name.into(), value.into());
        self
    }

    /// Facets that actually constrain, as `(field, value)` pairs.
    pub fn active_facets(&self) -> impl Iterator<Item = (&str, &str)> {
        self.facets
            .iter()
            .filter(|(_, value)| !value.is_all())
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Validated set of facet constraints, AND-combined.
///
/// Equality is exact and case-sensitive against the field's stringified
/// value, unlike search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FacetFilter {
    constraints: Vec<(String, String)>,
}

impl FacetFilter {
    /// Builds the filter, failing on any facet the schema does not declare.
    pub fn new(schema: &Schema, facets: &BTreeMap<String, FacetValue>) -> Result<Self> {
        schema.validate_facets(facets)?;
        let constraints = facets
            .iter()
            .filter(|(_, value)| !value.is_all())
            .map(|(name, value)| (name.clone(), value.as_str().to_string()))
            .collect();
        Ok(FacetFilter { constraints })
    }

    /// Number of facets that constrain.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` when no facet constrains and every record matches.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Returns `true` if `record` carries every selected value.
    pub fn matches<T: Record + ?Sized>(&self, record: &T) -> bool {
        self.matches_by(record, |r, field| r.field_value(field))
    }

    /// Like [`matches`](Self::matches) but reads fields through `accessor`.
    pub fn matches_by<T, F>(&self, record: &T, accessor: F) -> bool
    where
        T: ?Sized,
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.constraints
            .iter()
            .all(|(field, expected)| facet_equals(&accessor(record, field), expected))
    }
}

fn facet_equals(value: &Value<'_>, expected: &str) -> bool {
    match value {
        Value::None => false,
        other => other.to_text() == expected,
    }
}

/// One-shot form of [`FacetFilter::matches`].
pub fn matches_facets<T: Record + ?Sized>(
    record: &T,
    schema: &Schema,
    facets: &BTreeMap<String, FacetValue>,
) -> Result<bool> {
    Ok(FacetFilter::new(schema, facets)?.matches(record))
}
