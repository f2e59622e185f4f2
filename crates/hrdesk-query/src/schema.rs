//! Field schema: what each record field is and whether search looks at it.
//!
//! A [`Schema`] is the static configuration every other component reads.
//! It is validated once, when built, and every facet key or sort field used
//! later must name one of its descriptors.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::{QueryError, Result};
use crate::facet::{FacetValue, FilterState};
use crate::sort::SortState;

/// Domain-specific ordering for an enum field, e.g. ticket priority.
///
/// Built from an ordered list where position is the rank, or from explicit
/// `(value, rank)` pairs. Lookup is exact and case-sensitive.
///
/// ```
/// use hrdesk_query::RankOrder;
///
/// let priority = RankOrder::from_ordered(["low", "medium", "high", "urgent"]);
/// assert_eq!(priority.rank("high"), Some(2));
/// assert_eq!(priority.rank("High"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RankOrder {
    ranks: HashMap<String, i64>,
}

impl RankOrder {
    /// Ranks values by their position in `values`. A repeated value keeps
    /// its first position.
    pub fn from_ordered<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ranks = HashMap::new();
        for (position, value) in values.into_iter().enumerate() {
            ranks.entry(value.into()).or_insert(position as i64);
        }
        RankOrder { ranks }
    }

    /// Ranks values with explicit numbers.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        RankOrder {
            ranks: pairs.into_iter().map(|(v, r)| (v.into(), r)).collect(),
        }
    }

    /// Returns the rank of `value`, if it is ranked.
    pub fn rank(&self, value: &str) -> Option<i64> {
        self.ranks.get(value).copied()
    }

    /// Number of ranked values.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns `true` if no value is ranked.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Semantic type of a field. Drives comparator dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, compared case-insensitively.
    String,
    /// Numeric quantity.
    Number,
    /// Calendar date or instant.
    Date,
    /// Categorical value, optionally with a domain rank order.
    Enum { rank: Option<RankOrder> },
}

impl FieldKind {
    /// Returns the configuration name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Enum { .. } => "enum",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one record field.
///
/// ```
/// use hrdesk_query::{FieldDescriptor, FieldKind};
///
/// let title = FieldDescriptor::string("title").searchable();
/// assert!(title.searchable);
///
/// let priority = FieldDescriptor::enumeration("priority").ranked(["low", "high"]);
/// assert!(matches!(priority.kind, FieldKind::Enum { rank: Some(_) }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub searchable: bool,
}

impl FieldDescriptor {
    /// Creates a non-searchable descriptor of the given kind.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        FieldDescriptor {
            name: name.into(),
            kind,
            searchable: false,
        }
    }

    /// Creates a free-text descriptor.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    /// Creates a numeric descriptor.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    /// Creates a date descriptor.
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    /// Creates an unranked enum descriptor.
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Enum { rank: None })
    }

    /// Marks the field as part of free-text search.
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Turns the field into an enum ranked by the order of `values`.
    pub fn ranked<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_rank(RankOrder::from_ordered(values))
    }

    /// Turns the field into an enum ranked by `rank`.
    pub fn with_rank(mut self, rank: RankOrder) -> Self {
        self.kind = FieldKind::Enum { rank: Some(rank) };
        self
    }
}

/// Ordered, validated list of field descriptors for one screen.
///
/// # Example
///
/// ```
/// use hrdesk_query::{FieldDescriptor, Schema};
///
/// let schema = Schema::new(vec![
///     FieldDescriptor::string("title").searchable(),
///     FieldDescriptor::enumeration("status"),
///     FieldDescriptor::date("created_at"),
/// ])
/// .unwrap();
///
/// assert_eq!(schema.len(), 3);
/// assert!(schema.field("status").is_some());
/// assert!(Schema::new(vec![FieldDescriptor::string("a"), FieldDescriptor::date("a")]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
    default_sort: Option<SortState>,
}

impl Schema {
    /// Builds a schema, rejecting empty or duplicate field names.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self> {
        for (i, field) in fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(QueryError::EmptyFieldName);
            }
            if fields[..i].iter().any(|f| f.name == field.name) {
                return Err(QueryError::DuplicateField {
                    field: field.name.clone(),
                });
            }
        }
        Ok(Schema {
            fields,
            default_sort: None,
        })
    }

    /// Sets the sort a screen opens with. The field must be declared.
    pub fn with_default_sort(mut self, sort: SortState) -> Result<Self> {
        self.validate_sort(&sort)?;
        self.default_sort = Some(sort);
        Ok(self)
    }

    /// Looks up a descriptor by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns `true` if `name` is a declared field.
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// All descriptors, in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Descriptors that take part in free-text search, in declaration order.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.searchable)
    }

    /// The sort a screen opens with, if configured.
    pub fn default_sort(&self) -> Option<&SortState> {
        self.default_sort.as_ref()
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Checks that every facet key of `filter` names a declared field.
    pub fn validate_filter(&self, filter: &FilterState) -> Result<()> {
        self.validate_facets(&filter.facets)
    }

    /// Checks that every facet key names a declared field.
    pub fn validate_facets(&self, facets: &BTreeMap<String, FacetValue>) -> Result<()> {
        match facets.keys().find(|name| !self.contains(name)) {
            Some(facet) => Err(QueryError::UnknownFacet {
                facet: facet.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Checks that the sort field names a declared field and returns it.
    pub fn validate_sort(&self, sort: &SortState) -> Result<&FieldDescriptor> {
        self.field(&sort.field)
            .ok_or_else(|| QueryError::UnknownSortField {
                field: sort.field.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::Direction;

    fn leave_schema() -> Schema {
        Schema::new(vec![
            FieldDescriptor::string("employee").searchable(),
            FieldDescriptor::enumeration("leave_type").searchable(),
            FieldDescriptor::enumeration("status"),
            FieldDescriptor::date("start_date"),
            FieldDescriptor::number("total_days"),
        ])
        .unwrap()
    }

    #[test]
    fn rank_order_from_explicit_pairs() {
        let severity = RankOrder::from_pairs([
            ("blocker", -10),
            ("major", 0),
            ("minor", 0),
            ("cosmetic", 100),
        ]);

        assert_eq!(severity.len(), 4);
        assert_eq!(severity.rank("blocker"), Some(-10));
        assert_eq!(severity.rank("major"), severity.rank("minor"));
        assert_eq!(severity.rank("cosmetic"), Some(100));
        assert_eq!(severity.rank("Cosmetic"), None);
        assert!(RankOrder::from_pairs(Vec::<(String, i64)>::new()).is_empty());

        let field = FieldDescriptor::enumeration("severity").with_rank(severity.clone());
        assert_eq!(field.kind, FieldKind::Enum { rank: Some(severity) });
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = Schema::new(vec![
            FieldDescriptor::string("status"),
            FieldDescriptor::enumeration("status"),
        ])
        .unwrap_err();
        assert!(matches!(err, QueryError::DuplicateField { field } if field == "status"));
    }

    #[test]
    fn rejects_empty_names() {
        let err = Schema::new(vec![FieldDescriptor::string("")]).unwrap_err();
        assert!(matches!(err, QueryError::EmptyFieldName));
    }

    #[test]
    fn searchable_fields_keep_declaration_order() {
        let schema = leave_schema();
        let names: Vec<_> = schema.searchable_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["employee", "leave_type"]);
    }

    #[test]
    fn validate_filter_rejects_unknown_facet() {
        let schema = leave_schema();
        let ok = FilterState::new().facet("status", "approved");
        assert!(schema.validate_filter(&ok).is_ok());

        let bad = FilterState::new().facet("department", "all");
        let err = schema.validate_filter(&bad).unwrap_err();
        assert!(matches!(err, QueryError::UnknownFacet { facet } if facet == "department"));
    }

    #[test]
    fn validate_sort_rejects_unknown_field() {
        let schema = leave_schema();
        let field = schema.validate_sort(&SortState::asc("total_days")).unwrap();
        assert_eq!(field.kind, FieldKind::Number);

        let err = schema.validate_sort(&SortState::desc("salary")).unwrap_err();
        assert!(matches!(err, QueryError::UnknownSortField { field } if field == "salary"));
    }

    #[test]
    fn default_sort_must_be_declared() {
        let schema = leave_schema()
            .with_default_sort(SortState::new("start_date", Direction::Desc))
            .unwrap();
        assert_eq!(schema.default_sort(), Some(&SortState::desc("start_date")));

        assert!(leave_schema()
            .with_default_sort(SortState::asc("created_at"))
            .is_err());
    }

    #[test]
    fn rank_order_first_position_wins() {
        let rank = RankOrder::from_ordered(["low", "high", "low"]);
        assert_eq!(rank.rank("low"), Some(0));
        assert_eq!(rank.rank("high"), Some(1));
        assert_eq!(rank.len(), 2);
    }

    #[test]
    fn ranked_turns_field_into_enum() {
        let field = FieldDescriptor::string("priority").ranked(["low", "high"]);
        assert_eq!(field.kind.as_str(), "enum");
    }
}
