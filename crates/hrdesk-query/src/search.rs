//! Free-text search across a schema's searchable fields.

use crate::record::Record;
use crate::schema::Schema;

/// Case-folds text for search and string ordering.
pub(crate) fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Free-text matcher compiled from a schema and a search term.
///
/// The term is trimmed and case-folded once. A record matches when any
/// searchable field's stringified, case-folded value contains it. An empty
/// term matches everything.
///
/// ```
/// use hrdesk_query::{FieldDescriptor, Schema, SearchMatcher};
/// use serde_json::json;
///
/// let schema = Schema::new(vec![FieldDescriptor::string("title").searchable()]).unwrap();
/// let matcher = SearchMatcher::new(&schema, "  MEETING ");
///
/// assert!(matcher.matches(&json!({ "title": "Strategy Meeting" })));
/// assert!(!matcher.matches(&json!({ "title": "Payroll will be processed on Friday" })));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatcher {
    needle: String,
    fields: Vec<String>,
}

impl SearchMatcher {
    /// Compiles `term` against the schema's searchable fields.
    pub fn new(schema: &Schema, term: &str) -> Self {
        SearchMatcher {
            needle: fold(term.trim()),
            fields: schema.searchable_fields().map(|f| f.name.clone()).collect(),
        }
    }

    /// Returns `true` when the term is blank and every record matches.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// The trimmed, case-folded term.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Returns `true` if any searchable field contains the term.
    pub fn matches<T: Record + ?Sized>(&self, record: &T) -> bool {
        self.matches_by(record, |r, field| r.field_value(field))
    }

    /// Like [`matches`](Self::matches) but reads fields through `accessor`.
    pub fn matches_by<T, F>(&self, record: &T, accessor: F) -> bool
    where
        T: ?Sized,
        for<'a> F: Fn(&'a T, &str) -> crate::Value<'a>,
    {
        if self.is_empty() {
            return true;
        }
        self.fields
            .iter()
            .any(|field| fold(&accessor(record, field).to_text()).contains(&self.needle))
    }
}

/// One-shot form of [`SearchMatcher::matches`].
pub fn matches<T: Record + ?Sized>(record: &T, schema: &Schema, term: &str) -> bool {
    SearchMatcher::new(schema, term).matches(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDescriptor;
    use serde_json::json;

    fn ticket_schema() -> Schema {
        Schema::new(vec![
            FieldDescriptor::string("subject").searchable(),
            FieldDescriptor::string("requester").searchable(),
            FieldDescriptor::number("ticket_no").searchable(),
            FieldDescriptor::string("internal_note"),
        ])
        .unwrap()
    }

    #[test]
    fn empty_term_matches_everything() {
        let schema = ticket_schema();
        assert!(matches(&json!({}), &schema, ""));
        assert!(matches(&json!({}), &schema, "   "));
    }

    #[test]
    fn matches_any_searchable_field() {
        let schema = ticket_schema();
        let record = json!({ "subject": "Laptop broken", "requester": "Dana Whitfield" });
        assert!(matches(&record, &schema, "laptop"));
        assert!(matches(&record, &schema, "WHITFIELD"));
        assert!(!matches(&record, &schema, "payroll"));
    }

    #[test]
    fn ignores_fields_not_marked_searchable() {
        let schema = ticket_schema();
        let record = json!({ "subject": "VPN", "internal_note": "escalate to payroll" });
        assert!(!matches(&record, &schema, "payroll"));
    }

    #[test]
    fn numbers_are_searched_in_display_form() {
        let schema = ticket_schema();
        assert!(matches(&json!({ "ticket_no": 40213 }), &schema, "021"));
    }

    #[test]
    fn missing_and_null_fields_never_panic() {
        let schema = ticket_schema();
        let record = json!({ "subject": null });
        assert!(!matches(&record, &schema, "x"));
        assert!(!matches(&json!("not an object"), &schema, "x"));
    }

    #[test]
    fn unicode_case_folding() {
        let schema = ticket_schema();
        let record = json!({ "requester": "ÉMILE Ångström" });
        assert!(matches(&record, &schema, "émile"));
        assert!(matches(&record, &schema, "ångström"));
    }

    #[test]
    fn needle_is_trimmed_and_folded() {
        let matcher = SearchMatcher::new(&ticket_schema(), "  Leave ");
        assert_eq!(matcher.needle(), "leave");
        assert!(!matcher.is_empty());
    }
}
