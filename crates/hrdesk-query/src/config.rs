//! Declarative screen schemas in YAML or JSON.
//!
//! ```yaml
//! fields:
//!   - { name: title, kind: string, searchable: true }
//!   - { name: priority, kind: enum, rank: [low, medium, high, urgent] }
//!   - { name: created_at, kind: date }
//! default_sort: { field: created_at, direction: desc }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};
use crate::schema::{FieldDescriptor, FieldKind, RankOrder, Schema};
use crate::sort::SortState;

/// Raw serde shape of one field entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<Vec<String>>,
}

/// Raw serde shape of a screen schema.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    pub fields: Vec<FieldConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<SortState>,
}

impl FieldConfig {
    fn into_descriptor(self) -> Result<FieldDescriptor> {
        let kind = match self.kind.as_str() {
            "string" => FieldKind::String,
            "number" => FieldKind::Number,
            "date" => FieldKind::Date,
            "enum" => FieldKind::Enum { rank: None },
            other => {
                return Err(QueryError::UnknownKind {
                    field: self.name,
                    kind: other.to_string(),
                })
            }
        };
        let kind = match (kind, self.rank) {
            (FieldKind::Enum { .. }, rank) => FieldKind::Enum {
                rank: rank.map(RankOrder::from_ordered),
            },
            (kind, None) => kind,
            (kind, Some(_)) => {
                return Err(QueryError::RankOnNonEnum {
                    field: self.name,
                    kind: kind.as_str(),
                })
            }
        };
        let mut descriptor = FieldDescriptor::new(self.name, kind);
        descriptor.searchable = self.searchable;
        Ok(descriptor)
    }
}

impl SchemaConfig {
    /// Validates the configuration and builds the schema.
    pub fn into_schema(self) -> Result<Schema> {
        let fields = self
            .fields
            .into_iter()
            .map(FieldConfig::into_descriptor)
            .collect::<Result<Vec<_>>>()?;
        let schema = Schema::new(fields)?;
        match self.default_sort {
            Some(sort) => schema.with_default_sort(sort),
            None => Ok(schema),
        }
    }
}

impl Schema {
    /// Parses and validates a YAML schema.
    pub fn from_yaml_str(yaml: &str) -> Result<Schema> {
        serde_yaml::from_str::<SchemaConfig>(yaml)?.into_schema()
    }

    /// Parses and validates a JSON schema.
    pub fn from_json_str(json: &str) -> Result<Schema> {
        serde_json::from_str::<SchemaConfig>(json)?.into_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::Direction;

    #[test]
    fn yaml_schema_with_rank_and_default_sort() {
        let schema = Schema::from_yaml_str(
            r#"
fields:
  - { name: subject, kind: string, searchable: true }
  - { name: priority, kind: enum, rank: [low, medium, high, urgent] }
  - { name: opened_at, kind: date }
default_sort: { field: opened_at, direction: desc }
"#,
        )
        .unwrap();

        assert_eq!(schema.len(), 3);
        assert!(schema.field("subject").unwrap().searchable);
        assert!(!schema.field("opened_at").unwrap().searchable);
        match &schema.field("priority").unwrap().kind {
            FieldKind::Enum { rank: Some(rank) } => assert_eq!(rank.rank("urgent"), Some(3)),
            other => panic!("unexpected kind {other:?}"),
        }
        assert_eq!(
            schema.default_sort(),
            Some(&SortState::new("opened_at", Direction::Desc))
        );
    }

    #[test]
    fn json_schema() {
        let schema = Schema::from_json_str(
            r#"{ "fields": [ { "name": "total_days", "kind": "number" } ] }"#,
        )
        .unwrap();
        assert_eq!(schema.fields()[0].kind, FieldKind::Number);
        assert_eq!(schema.default_sort(), None);
    }

    #[test]
    fn rank_on_non_enum_is_rejected() {
        let err = Schema::from_yaml_str(
            "fields:\n  - { name: title, kind: string, rank: [a, b] }\n",
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::RankOnNonEnum { field, kind: "string" } if field == "title"));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = Schema::from_yaml_str("fields:\n  - { name: salary, kind: money }\n").unwrap_err();
        assert!(matches!(err, QueryError::UnknownKind { kind, .. } if kind == "money"));
    }

    #[test]
    fn default_sort_must_name_a_field() {
        let err = Schema::from_yaml_str(
            "fields:\n  - { name: title, kind: string }\ndefault_sort: { field: created_at }\n",
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::UnknownSortField { field } if field == "created_at"));
    }

    #[test]
    fn misspelled_keys_are_rejected() {
        let err = Schema::from_yaml_str(
            "fields:\n  - { name: title, kind: string, searchabel: true }\n",
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::InvalidYaml(_)));
        assert!(err.to_string().contains("searchabel"));

        let err = Schema::from_json_str(
            r#"{ "fields": [], "default_srot": { "field": "title" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::InvalidJson(_)));
    }

    #[test]
    fn malformed_input_surfaces_parser_errors() {
        assert!(matches!(
            Schema::from_yaml_str("fields: [").unwrap_err(),
            QueryError::InvalidYaml(_)
        ));
        assert!(matches!(
            Schema::from_json_str("{").unwrap_err(),
            QueryError::InvalidJson(_)
        ));
    }
}
