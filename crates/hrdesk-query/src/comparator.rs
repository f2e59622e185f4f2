//! Comparator dispatch by field kind.
//!
//! [`comparator_for`] picks the ordering strategy from a descriptor's
//! [`FieldKind`]. Every strategy first normalizes a raw [`Value`] into a
//! [`SortKey`], so malformed data never fails a comparison:
//!
//! | Kind | Key | Missing / malformed |
//! |------|-----|---------------------|
//! | `string` | case-folded text | `""` (sorts first ascending) |
//! | `number` | exact number (strings are parsed) | `0` |
//! | `date` | epoch millis (strings are parsed) | undated, sorts last ascending |
//! | `enum` | rank, then case-folded text | unranked values after ranked ones |
//!
//! Keys are totally ordered, so every comparator is reflexive,
//! antisymmetric and transitive.

use std::cmp::Ordering;

use tracing::trace;

use crate::record::Record;
use crate::schema::{FieldDescriptor, FieldKind, RankOrder};
use crate::search::fold;
use crate::value::{Number, Timestamp, Value};

/// Normalized, totally ordered sort key for one field value.
#[derive(Debug, Clone)]
pub enum SortKey {
    /// Case-folded text.
    Text(String),
    /// Exactly ordered number; never NaN.
    Number(Number),
    /// `None` is an undated value and orders after every date.
    Date(Option<Timestamp>),
    /// Rank (`None` orders after every rank), then case-folded text.
    Ranked(Option<i64>, String),
}

impl SortKey {
    fn variant_index(&self) -> u8 {
        match self {
            SortKey::Text(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::Date(_) => 2,
            SortKey::Ranked(..) => 3,
        }
    }
}

/// Orders `Some` before `None`.
fn present_first<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(*b),
            (SortKey::Date(a), SortKey::Date(b)) => present_first(a, b),
            (SortKey::Ranked(ra, ta), SortKey::Ranked(rb, tb)) => {
                present_first(ra, rb).then_with(|| ta.cmp(tb))
            }
            // Keys from one comparator always share a variant.
            _ => self.variant_index().cmp(&other.variant_index()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Ordering strategy for one field, chosen by its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparator {
    field: String,
    kind: FieldKind,
}

/// Returns the comparator for `descriptor`'s kind.
///
/// ```
/// use std::cmp::Ordering;
/// use hrdesk_query::{comparator_for, FieldDescriptor, Value};
///
/// let priority = comparator_for(&FieldDescriptor::enumeration("priority").ranked(["low", "high"]));
/// assert_eq!(
///     priority.compare(&Value::String("low"), &Value::String("high")),
///     Ordering::Less
/// );
/// ```
pub fn comparator_for(descriptor: &FieldDescriptor) -> Comparator {
    Comparator {
        field: descriptor.name.clone(),
        kind: descriptor.kind.clone(),
    }
}

impl Comparator {
    /// The field this comparator reads.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Normalizes a raw value into its sort key.
    pub fn key(&self, value: &Value<'_>) -> SortKey {
        match &self.kind {
            FieldKind::String => SortKey::Text(fold(&value.to_text())),
            FieldKind::Number => SortKey::Number(self.number_key(value)),
            FieldKind::Date => SortKey::Date(self.date_key(value)),
            FieldKind::Enum { rank } => enum_key(rank.as_ref(), value),
        }
    }

    /// Compares two raw values in ascending order.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Ordering {
        self.key(a).cmp(&self.key(b))
    }

    /// Compares two records by this comparator's field, ascending.
    pub fn compare_records<T: Record + ?Sized>(&self, a: &T, b: &T) -> Ordering {
        self.compare(&a.field_value(&self.field), &b.field_value(&self.field))
    }

    /// Sort key of `record`'s field, read through `accessor`.
    pub fn record_key_by<T, F>(&self, record: &T, accessor: F) -> SortKey
    where
        T: ?Sized,
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.key(&accessor(record, &self.field))
    }

    fn number_key(&self, value: &Value<'_>) -> Number {
        let raw = match value {
            Value::Number(n) => *n,
            Value::String(s) => match parse_number(s) {
                Some(n) => n,
                None => {
                    trace!(field = %self.field, value = %s, "unparseable number sorted as 0");
                    Number::I64(0)
                }
            },
            Value::Bool(b) => Number::I64(i64::from(*b)),
            Value::Timestamp(t) => Number::I64(t.as_millis()),
            Value::None => Number::I64(0),
        };
        match raw {
            Number::F64(f) if f.is_nan() => Number::I64(0),
            n => n,
        }
    }

    fn date_key(&self, value: &Value<'_>) -> Option<Timestamp> {
        match value {
            Value::Timestamp(t) => Some(*t),
            Value::Number(n) => {
                let millis = n.to_f64();
                (millis.is_finite()).then(|| Timestamp(millis as i64))
            }
            Value::String(s) => {
                let parsed = Timestamp::parse(s);
                if parsed.is_none() && !s.trim().is_empty() {
                    trace!(field = %self.field, value = %s, "unparseable date sorted last");
                }
                parsed
            }
            Value::Bool(_) | Value::None => None,
        }
    }
}

/// Integers keep full precision; anything else goes through `f64`.
fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Some(Number::I64(n));
    }
    if let Ok(n) = text.parse::<u64>() {
        return Some(Number::U64(n));
    }
    text.parse::<f64>().ok().map(Number::F64)
}

fn enum_key(rank: Option<&RankOrder>, value: &Value<'_>) -> SortKey {
    let raw = value.to_text();
    let position = rank.and_then(|r| r.rank(&raw));
    SortKey::Ranked(position, fold(&raw))
}
