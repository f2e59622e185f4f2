//! Sort state and the click-to-toggle sort controller.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QueryError, Result};
use crate::schema::Schema;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (smallest first).
    #[default]
    #[serde(alias = "ascending")]
    Asc,
    /// Descending order (largest first).
    #[serde(alias = "descending")]
    Desc,
}

impl Direction {
    /// Applies this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Serialized name, `"asc"` or `"desc"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single active sort of a list screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    pub field: String,
    #[serde(default)]
    pub direction: Direction,
}

impl SortState {
    /// Sorts `field` in `direction`.
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        SortState {
            field: field.into(),
            direction,
        }
    }

    /// Sorts `field` ascending.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Asc)
    }

    /// Sorts `field` descending.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Desc)
    }
}

/// Column header affordance derived from the current sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Active column, ascending.
    Asc,
    /// Active column, descending.
    Desc,
    /// Not the active column.
    None,
}

impl Indicator {
    /// Name a UI layer can map to an arrow glyph or CSS class.
    pub fn as_str(self) -> &'static str {
        match self {
            Indicator::Asc => "asc",
            Indicator::Desc => "desc",
            Indicator::None => "none",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Click-to-toggle sort state machine over a schema's fields.
///
/// Selecting the active field flips its direction; selecting another field
/// makes it active in ascending order.
///
/// ```
/// use hrdesk_query::{FieldDescriptor, Indicator, Schema, SortController, SortState};
///
/// let schema = Schema::new(vec![
///     FieldDescriptor::enumeration("leave_type"),
///     FieldDescriptor::date("start_date"),
/// ])
/// .unwrap();
/// let mut sort = SortController::new(&schema, SortState::asc("leave_type")).unwrap();
///
/// sort.select("leave_type").unwrap();
/// assert_eq!(sort.indicator_for("leave_type"), Indicator::Desc);
///
/// sort.select("start_date").unwrap();
/// assert_eq!(sort.state(), &SortState::asc("start_date"));
/// assert_eq!(sort.indicator_for("leave_type"), Indicator::None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortController {
    fields: Vec<String>,
    state: SortState,
}

impl SortController {
    /// Creates a controller starting at `initial`, which must name a
    /// declared field.
    pub fn new(schema: &Schema, initial: SortState) -> Result<Self> {
        schema.validate_sort(&initial)?;
        Ok(SortController {
            fields: schema.fields().iter().map(|f| f.name.clone()).collect(),
            state: initial,
        })
    }

    /// Creates a controller starting at the schema's default sort, or at
    /// its first field ascending when none is configured.
    pub fn from_schema_default(schema: &Schema) -> Result<Self> {
        let initial = match schema.default_sort() {
            Some(sort) => sort.clone(),
            None => {
                let first = schema.fields().first().ok_or_else(|| {
                    QueryError::UnknownSortField {
                        field: String::new(),
                    }
                })?;
                SortState::asc(first.name.clone())
            }
        };
        Self::new(schema, initial)
    }

    /// Current sort snapshot.
    pub fn state(&self) -> &SortState {
        &self.state
    }

    /// Handles a header click on `field`.
    ///
    /// Unknown fields are rejected and leave the state unchanged.
    pub fn select(&mut self, field: &str) -> Result<&SortState> {
        if !self.fields.iter().any(|f| f == field) {
            return Err(QueryError::UnknownSortField {
                field: field.to_string(),
            });
        }
        if self.state.field == field {
            self.state.direction = self.state.direction.toggled();
        } else {
            self.state = SortState::asc(field);
        }
        debug!(
            field = %self.state.field,
            direction = %self.state.direction,
            "sort selection changed"
        );
        Ok(&self.state)
    }

    /// Header indicator for `field`.
    pub fn indicator_for(&self, field: &str) -> Indicator {
        if self.state.field != field {
            return Indicator::None;
        }
        match self.state.direction {
            Direction::Asc => Indicator::Asc,
            Direction::Desc => Indicator::Desc,
        }
    }
}
