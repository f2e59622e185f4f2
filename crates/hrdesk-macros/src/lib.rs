//! Proc macros for hrdesk-query.
//!
//! - [`Record`] - Generate a record accessor and field schema from struct annotations
//!
//! Usually reached through `hrdesk-query` with the `derive` feature enabled.
//! For working examples, see `hrdesk-query/tests/derive.rs`.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `hrdesk_query::Record` and a matching field schema.
///
/// # Example
///
/// ```ignore
/// use hrdesk_query::{FilterState, Record, SortState};
///
/// #[derive(Record)]
/// struct Ticket {
///     #[field(string, searchable)]
///     subject: String,
///
///     #[field(enumeration, rank = ["low", "medium", "high", "urgent"])]
///     priority: String,
///
///     #[field(date, rename = "opened")]
///     opened_at: chrono::NaiveDate,
///
///     // not queryable
///     internal_id: u64,
/// }
///
/// let schema = Ticket::schema()?;
/// let view = hrdesk_query::run(&tickets, &schema, &FilterState::new(), &SortState::desc(Ticket::PRIORITY))?;
/// ```
///
/// Field types must implement `hrdesk_query::AsValue`. Categorical enums
/// usually implement it by returning their label as `Value::String`.
#[proc_macro_derive(Record, attributes(field))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
