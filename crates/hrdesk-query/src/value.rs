//! Runtime value types for record fields.
//!
//! The [`Value`] enum is what a record hands to the query core for one named
//! field. It borrows from the record wherever it can, so filtering a large
//! list does not copy field text.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Runtime value of a record field, borrowed from the source record.
///
/// # Example
///
/// ```
/// use hrdesk_query::{Number, Value};
///
/// struct Announcement {
///     title: String,
///     views: u32,
/// }
///
/// fn accessor<'a>(a: &'a Announcement, field: &str) -> Value<'a> {
///     match field {
///         "title" => Value::String(&a.title),
///         "views" => Value::Number(Number::U64(a.views as u64)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Timestamp value (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Boolean value.
    Bool(bool),
    /// Field not present, null, or not representable.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the timestamp value, if present.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Stringified form used by free-text search and facet equality.
    ///
    /// Strings are returned as-is, numbers use their `Display` form,
    /// timestamps render as RFC 3339 UTC and `None` becomes the empty string.
    pub fn to_text(&self) -> Cow<'a, str> {
        match self {
            Value::String(s) => Cow::Borrowed(s),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Timestamp(t) => Cow::Owned(t.to_string()),
            Value::Bool(true) => Cow::Borrowed("true"),
            Value::Bool(false) => Cow::Borrowed("false"),
            Value::None => Cow::Borrowed(""),
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// [`compare`](Number::compare) goes through `f64` across variants;
/// [`total_cmp`](Number::total_cmp) is exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` only when a NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    /// Total order across variants, exact for integers of any size.
    ///
    /// Unlike [`compare`](Self::compare) this never gives up: `-0.0` equals
    /// `0` and NaN sorts after every other number.
    pub fn total_cmp(self, other: Number) -> Ordering {
        match (self.as_i128(), other.as_i128()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(a), None) => int_float_cmp(a, other.to_f64()),
            (None, Some(b)) => int_float_cmp(b, self.to_f64()).reverse(),
            (None, None) => float_cmp(self.to_f64(), other.to_f64()),
        }
    }

    fn as_i128(self) -> Option<i128> {
        match self {
            Number::I64(n) => Some(i128::from(n)),
            Number::U64(n) => Some(i128::from(n)),
            Number::F64(_) => None,
        }
    }
}

/// 2^127, the first float past the `i128` range.
const I128_LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

fn float_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Exact comparison of an integer with a float.
fn int_float_cmp(int: i128, float: f64) -> Ordering {
    if float.is_nan() || float >= I128_LIMIT {
        return Ordering::Less;
    }
    if float < -I128_LIMIT {
        return Ordering::Greater;
    }
    let whole = float.trunc();
    int.cmp(&(whole as i128))
        .then_with(|| whole.partial_cmp(&float).unwrap_or(Ordering::Equal))
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $wide:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::$variant(n as $wide)
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::I64(i)
        } else if let Some(u) = n.as_u64() {
            Number::U64(u)
        } else {
            Number::F64(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

/// Timestamp value represented as milliseconds since Unix epoch.
///
/// # Example
///
/// ```
/// use hrdesk_query::Timestamp;
///
/// let start = Timestamp::parse("2024-03-01").unwrap();
/// let end = Timestamp::parse("2024-03-01T09:30:00Z").unwrap();
/// assert!(start < end);
/// assert_eq!(Timestamp::parse("next tuesday"), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

/// Naive layouts accepted by [`Timestamp::parse`]; all are read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

impl Timestamp {
    /// Creates a new timestamp from seconds since Unix epoch.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs * 1000)
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Parses the date layouts found in HR record payloads.
    ///
    /// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS[.fff]]`,
    /// `YYYY-MM-DD HH:MM[:SS[.fff]]` and `YYYY-MM-DD`. Returns `None` for
    /// anything else, including blank input.
    pub fn parse(input: &str) -> Option<Timestamp> {
        let s = input.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Timestamp(dt.timestamp_millis()));
        }
        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Some(naive.into());
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Timestamp::from)
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(naive: NaiveDateTime) -> Self {
        Timestamp(naive.and_utc().timestamp_millis())
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Timestamp(
            date.and_hms_opt(0, 0, 0)
                .map(|naive| naive.and_utc().timestamp_millis())
                .unwrap_or_default(),
        )
    }
}

impl<Tz: chrono::TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Timestamp(dt.timestamp_millis())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp_millis(self.0) {
            Some(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => write!(f, "{}", self.0),
        }
    }
}
