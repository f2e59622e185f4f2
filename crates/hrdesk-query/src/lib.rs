//! hrdesk-query - schema-driven list queries for HR console screens.
//!
//! Every list screen (announcements, attendance, leave, payroll, tickets, ...)
//! needs the same three things from its record collection: free-text search,
//! categorical facet filters and click-to-sort columns. This crate does all
//! three from one declarative [`Schema`]:
//!
//! - [`SearchMatcher`] - case-insensitive substring search over searchable fields
//! - [`FacetFilter`] - exact-match facet filters, AND-combined, `"all"` = no constraint
//! - [`comparator_for`] - type-aware ordering for string, number, date and enum fields
//! - [`SortController`] - click-to-toggle sort state with header indicators
//! - [`Pipeline`] - filter then stable sort, returning a new view
//!
//! # Quick Start
//!
//! ```rust
//! use hrdesk_query::{FieldDescriptor, FilterState, Schema, SortController, SortState};
//! use serde_json::json;
//!
//! let schema = Schema::new(vec![
//!     FieldDescriptor::string("title").searchable(),
//!     FieldDescriptor::enumeration("priority").ranked(["low", "medium", "high"]),
//!     FieldDescriptor::date("created_at"),
//! ])
//! .unwrap()
//! .with_default_sort(SortState::desc("created_at"))
//! .unwrap();
//!
//! let tickets = vec![
//!     json!({ "title": "VPN down", "priority": "high", "created_at": "2024-05-02" }),
//!     json!({ "title": "New laptop", "priority": "low", "created_at": "2024-05-03" }),
//!     json!({ "title": "VPN slow", "priority": "medium", "created_at": "2024-05-01" }),
//! ];
//!
//! let mut sort = SortController::from_schema_default(&schema).unwrap();
//! let filter = FilterState::new().search("vpn");
//!
//! let view = hrdesk_query::run(&tickets, &schema, &filter, sort.state()).unwrap();
//! assert_eq!(view[0]["title"], "VPN down");
//!
//! sort.select("priority").unwrap();
//! let view = hrdesk_query::run(&tickets, &schema, &filter, sort.state()).unwrap();
//! assert_eq!(view[0]["title"], "VPN slow");
//! ```
//!
//! # Query Semantics
//!
//! ```text
//! view = stable_sort(
//!     [r in source | search(r, term) ∧ ∀ active facet f: text(r[f]) == selected(f)],
//!     comparator_for(schema[sort.field]) applied in sort.direction
//! )
//! ```
//!
//! Configuration mistakes (a facet or sort field missing from the schema) are
//! reported when the pipeline is built. Malformed field values never fail:
//! they are normalized as documented in [`comparator`](comparator_for).
//!
//! The core keeps no state between runs. Callers that want to skip
//! recomputation memoize on `(source, FilterState, SortState)` themselves.

mod comparator;
mod config;
mod error;
pub mod facet;
pub mod pipeline;
mod record;
mod schema;
pub mod search;
mod sort;
mod value;

// Re-export public API
pub use comparator::{comparator_for, Comparator, SortKey};
pub use config::{FieldConfig, SchemaConfig};
pub use error::{QueryError, Result};
pub use facet::{matches_facets, FacetFilter, FacetValue, FilterState, ALL};
pub use pipeline::{run, Pipeline};
pub use record::{AsValue, Record};
pub use schema::{FieldDescriptor, FieldKind, RankOrder, Schema};
pub use search::SearchMatcher;
pub use sort::{Direction, Indicator, SortController, SortState};
pub use value::{Number, Timestamp, Value};

#[cfg(feature = "derive")]
pub use hrdesk_macros::Record;
