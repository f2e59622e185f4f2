//! Record access traits.
//!
//! The core never assumes a record shape. A record only has to answer
//! "what is the value of field `x`?" through [`Record`]. Typed structs usually
//! get that from `#[derive(Record)]`; JSON payloads from screen loaders work
//! out of the box through the `serde_json` impls below.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

use crate::value::{Number, Timestamp, Value};

/// A record the query pipeline can read fields from.
///
/// # Manual Implementation
///
/// ```
/// use hrdesk_query::{Number, Record, Value};
///
/// struct LeaveRequest {
///     employee: String,
///     total_days: u32,
/// }
///
/// impl Record for LeaveRequest {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "employee" => Value::String(&self.employee),
///             "total_days" => Value::Number(Number::U64(self.total_days as u64)),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of `field`, or [`Value::None`] when the record has
    /// no such field or it is null.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Returns a static accessor function suitable for accessor-taking APIs
    /// such as [`Pipeline::run_by`](crate::Pipeline::run_by).
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.field_value(field)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field_value(&self, field: &str) -> Value<'_> {
        (**self).field_value(field)
    }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field_value(&self, field: &str) -> Value<'_> {
        self.get(field).map(json_value).unwrap_or(Value::None)
    }
}

impl Record for serde_json::Value {
    fn field_value(&self, field: &str) -> Value<'_> {
        match self {
            serde_json::Value::Object(map) => map.field_value(field),
            _ => Value::None,
        }
    }
}

fn json_value(value: &serde_json::Value) -> Value<'_> {
    match value {
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Number(n) => Value::Number(Number::from(n)),
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            Value::None
        }
    }
}

/// Conversion from a struct field's type to a [`Value`].
///
/// Used by `#[derive(Record)]`. Implement it for your own categorical types,
/// typically by returning their label:
///
/// ```
/// use hrdesk_query::{AsValue, Value};
///
/// enum LeaveType { Annual, Sick }
///
/// impl AsValue for LeaveType {
///     fn as_value(&self) -> Value<'_> {
///         Value::String(match self {
///             LeaveType::Annual => "annual",
///             LeaveType::Sick => "sick",
///         })
///     }
/// }
/// ```
pub trait AsValue {
    /// Returns the field value for query comparison.
    fn as_value(&self) -> Value<'_>;
}

impl AsValue for str {
    fn as_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl AsValue for String {
    fn as_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl AsValue for bool {
    fn as_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl AsValue for Timestamp {
    fn as_value(&self) -> Value<'_> {
        Value::Timestamp(*self)
    }
}

impl AsValue for Number {
    fn as_value(&self) -> Value<'_> {
        Value::Number(*self)
    }
}

impl AsValue for NaiveDate {
    fn as_value(&self) -> Value<'_> {
        Value::Timestamp(Timestamp::from(*self))
    }
}

impl AsValue for NaiveDateTime {
    fn as_value(&self) -> Value<'_> {
        Value::Timestamp(Timestamp::from(*self))
    }
}

impl<Tz: TimeZone> AsValue for DateTime<Tz> {
    fn as_value(&self) -> Value<'_> {
        Value::Timestamp(Timestamp(self.timestamp_millis()))
    }
}

impl AsValue for serde_json::Value {
    fn as_value(&self) -> Value<'_> {
        json_value(self)
    }
}

impl<T: AsValue + ?Sized> AsValue for &T {
    fn as_value(&self) -> Value<'_> {
        (**self).as_value()
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.as_value(),
            None => Value::None,
        }
    }
}

impl<T: AsValue + ?Sized> AsValue for Box<T> {
    fn as_value(&self) -> Value<'_> {
        (**self).as_value()
    }
}

macro_rules! number_as_value {
    ($($t:ty),*) => {
        $(
            impl AsValue for $t {
                fn as_value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )*
    };
}

number_as_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_object_fields() {
        let record = json!({
            "title": "Strategy Meeting",
            "attendees": 12,
            "pinned": true,
            "archived_at": null,
            "tags": ["q3"],
        });

        assert_eq!(record.field_value("title"), Value::String("Strategy Meeting"));
        assert_eq!(
            record.field_value("attendees"),
            Value::Number(Number::I64(12))
        );
        assert_eq!(record.field_value("pinned"), Value::Bool(true));
        assert_eq!(record.field_value("archived_at"), Value::None);
        assert_eq!(record.field_value("tags"), Value::None);
        assert_eq!(record.field_value("missing"), Value::None);
    }

    #[test]
    fn non_object_json_has_no_fields() {
        assert_eq!(json!([1, 2]).field_value("0"), Value::None);
        assert_eq!(json!("text").field_value("title"), Value::None);
    }

    #[test]
    fn option_and_reference_values() {
        let present: Option<String> = Some("hr".to_string());
        let absent: Option<u8> = None;
        assert_eq!(present.as_value(), Value::String("hr"));
        assert_eq!(absent.as_value(), Value::None);
        assert_eq!((&7u8).as_value(), Value::Number(Number::U64(7)));
    }

    #[test]
    fn accessor_delegates_to_field_value() {
        let record = json!({ "status": "approved" });
        assert_eq!(
            serde_json::Value::accessor(&record, "status"),
            Value::String("approved")
        );
    }
}
