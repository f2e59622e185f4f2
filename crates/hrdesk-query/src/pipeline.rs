//! Query pipeline: filter, then stable sort.
//!
//! A [`Pipeline`] is built from immutable snapshots of the screen's
//! [`FilterState`] and [`SortState`] and validated against the [`Schema`]
//! once. Running it never mutates the source collection and holds no state
//! between calls, so identical inputs always produce the same order.

use tracing::{debug, trace};

use crate::comparator::{comparator_for, Comparator, SortKey};
use crate::error::Result;
use crate::facet::{FacetFilter, FilterState};
use crate::record::Record;
use crate::schema::Schema;
use crate::search::SearchMatcher;
use crate::sort::{Direction, SortState};
use crate::value::Value;

/// Validated search + facet + sort plan for one render.
///
/// # Example
///
/// ```
/// use hrdesk_query::{FieldDescriptor, FilterState, Pipeline, Schema, SortState};
/// use serde_json::json;
///
/// let schema = Schema::new(vec![
///     FieldDescriptor::string("employee").searchable(),
///     FieldDescriptor::enumeration("status"),
///     FieldDescriptor::number("total_days"),
/// ])
/// .unwrap();
///
/// let requests = vec![
///     json!({ "employee": "Ana", "status": "approved", "total_days": 3 }),
///     json!({ "employee": "Ben", "status": "pending", "total_days": 1 }),
///     json!({ "employee": "Cleo", "status": "approved", "total_days": 2 }),
/// ];
///
/// let filter = FilterState::new().facet("status", "approved");
/// let pipeline = Pipeline::new(&schema, &filter, &SortState::asc("total_days")).unwrap();
///
/// let view = pipeline.run(&requests);
/// assert_eq!(view.len(), 2);
/// assert_eq!(view[0]["employee"], "Cleo");
/// assert_eq!(view[1]["employee"], "Ana");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    search: SearchMatcher,
    facets: FacetFilter,
    comparator: Comparator,
    direction: Direction,
}

impl Pipeline {
    /// Validates `filter` and `sort` against `schema` and compiles the plan.
    ///
    /// Fails if a facet or the sort field is not declared in the schema.
    pub fn new(schema: &Schema, filter: &FilterState, sort: &SortState) -> Result<Self> {
        let facets = FacetFilter::new(schema, &filter.facets)?;
        let descriptor = schema.validate_sort(sort)?;
        let pipeline = Pipeline {
            search: SearchMatcher::new(schema, &filter.search_term),
            facets,
            comparator: comparator_for(descriptor),
            direction: sort.direction,
        };
        debug!(
            search = pipeline.search.needle(),
            facets = pipeline.facets.len(),
            sort_field = %sort.field,
            direction = %sort.direction,
            "built query pipeline"
        );
        Ok(pipeline)
    }

    /// Returns `true` if `record` passes both search and facets.
    pub fn matches<T: Record + ?Sized>(&self, record: &T) -> bool {
        self.matches_by(record, |r, field| r.field_value(field))
    }

    /// Like [`matches`](Self::matches) but reads fields through `accessor`.
    pub fn matches_by<T, F>(&self, record: &T, accessor: F) -> bool
    where
        T: ?Sized,
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.search.matches_by(record, &accessor) && self.facets.matches_by(record, &accessor)
    }

    /// Filters and sorts `source`, returning references in display order.
    pub fn run<'a, T: Record>(&self, source: &'a [T]) -> Vec<&'a T> {
        self.run_by(source, T::accessor)
    }

    /// Like [`run`](Self::run) but reads fields through `accessor`.
    pub fn run_by<'a, T, F>(&self, source: &'a [T], accessor: F) -> Vec<&'a T>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        // Keys are computed once per surviving record; Vec::sort_by is stable.
        let mut keyed: Vec<(SortKey, &'a T)> = source
            .iter()
            .filter(|item| self.matches_by(*item, &accessor))
            .map(|item| (self.comparator.record_key_by(item, &accessor), item))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| self.direction.apply(a.cmp(b)));

        trace!(
            source = source.len(),
            matched = keyed.len(),
            "ran query pipeline"
        );
        keyed.into_iter().map(|(_, item)| item).collect()
    }

    /// Filters and sorts `source`, cloning the matching records.
    pub fn run_cloned<T: Record + Clone>(&self, source: &[T]) -> Vec<T> {
        self.run(source).into_iter().cloned().collect()
    }

    /// Number of records in `source` that pass the filters.
    pub fn count<T: Record>(&self, source: &[T]) -> usize {
        source.iter().filter(|item| self.matches(*item)).count()
    }

    /// Comparator for the sort field.
    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    /// Direction the comparator is applied in.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// One-shot pipeline: validate, filter, and stable-sort `source`.
pub fn run<'a, T: Record>(
    source: &'a [T],
    schema: &Schema,
    filter: &FilterState,
    sort: &SortState,
) -> Result<Vec<&'a T>> {
    Ok(Pipeline::new(schema, filter, sort)?.run(source))
}
