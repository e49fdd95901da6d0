//! Typed values and the codec that carries them across the storage boundary.
//!
//! Attributes are stored as a `(raw_value, value_type)` string pair so that a
//! host can persist them in two plain nullable text columns. This module
//! provides the [`Value`] enum that represents every kind an attribute can
//! hold, plus [`Value::encode`] and [`Value::decode`] to move between the
//! in-memory and stored forms. The tag is carried explicitly so a round trip
//! through storage reconstructs the exact original kind, not merely a
//! compatible one.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use num_bigint::BigInt;

mod errors;
pub use errors::ValueError;


/// Canonical type tags written to the `value_type` column.
pub mod tag {
    pub const TEXT: &str = "Text";
    pub const INTEGER: &str = "Integer";
    pub const FLOAT: &str = "Float";
    pub const BOOLEAN: &str = "Boolean";
    pub const SYMBOL: &str = "Symbol";
    pub const TIME: &str = "Time";
    pub const DATE: &str = "Date";
    pub const DATETIME: &str = "DateTime";
}

/// Textual form for [`Value::Date`], RFC-822 style: `04 Aug 2026`.
const DATE_FORMAT: &str = "%d %b %Y";

/// Textual form for [`Value::Time`], RFC-822 style without a zone:
/// `04 Aug 2026 09:30:00`.
const TIME_FORMAT: &str = "%d %b %Y %H:%M:%S";

/// A dynamically typed attribute value.
///
/// `Value` is the caller-facing datum for every attribute read and write.
/// Integers are arbitrary precision, so numeric attributes survive a round
/// trip through storage regardless of magnitude. The three calendar kinds
/// are distinct: a date, a date-time without a zone, and a date-time with a
/// fixed zone offset each decode back to the kind they were written as.
///
/// # Direct Comparisons
///
/// `Value` implements `PartialEq` with primitive types for ergonomic
/// comparisons:
///
/// ```
/// # use heredity::Value;
/// let text = Value::Text("hello".to_string());
/// let number = Value::from(42i64);
/// let flag = Value::Bool(true);
///
/// assert!(text == "hello");
/// assert!(number == 42i64);
/// assert!(flag == true);
///
/// // Type mismatches return false
/// assert!(!(text == 42i64));
/// ```
///
/// # Round Trips
///
/// For every supported kind, decoding an encoded value yields the original:
///
/// ```
/// # use heredity::Value;
/// let v = Value::from(42i64);
/// let (raw, tag) = v.encode();
/// assert_eq!(Value::decode(raw.as_deref(), tag).unwrap(), v);
/// ```
///
/// The calendar kinds are stored at second precision: sub-second components
/// do not survive the round trip and callers must not assume they do.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The nullish value. Writing it removes the local record, so it is
    /// never stored with content.
    Null,
    /// UTF-8 text
    Text(String),
    /// Arbitrary-precision integer
    Int(BigInt),
    /// 64-bit floating point
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Symbol/atom, carried by its textual name
    Symbol(String),
    /// Calendar date
    Date(NaiveDate),
    /// Date and time of day, no zone
    Time(NaiveDateTime),
    /// Date and time with a fixed zone offset
    DateTime(DateTime<FixedOffset>),
}

impl Value {
    /// Constructs a symbol value from its textual name.
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    /// Returns true if this is the nullish value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Boolean coercion: `Null` and `Bool(false)` are falsey, everything
    /// else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            _ => true,
        }
    }

    /// Returns the canonical type tag for this value, or `None` for `Null`.
    pub fn type_tag(&self) -> Option<&'static str> {
        match self {
            Value::Null => None,
            Value::Text(_) => Some(tag::TEXT),
            Value::Int(_) => Some(tag::INTEGER),
            Value::Float(_) => Some(tag::FLOAT),
            Value::Bool(_) => Some(tag::BOOLEAN),
            Value::Symbol(_) => Some(tag::SYMBOL),
            Value::Date(_) => Some(tag::DATE),
            Value::Time(_) => Some(tag::TIME),
            Value::DateTime(_) => Some(tag::DATETIME),
        }
    }

    /// Attempts to view this value as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to view this value as an integer
    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    /// Attempts to view this value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Serializes this value into its stored `(raw_value, value_type)` form.
    ///
    /// `Null` encodes to `(None, None)`; every other kind encodes to its
    /// canonical textual form plus its tag. The calendar kinds use fixed,
    /// locale-independent formats from the RFC-822 family.
    pub fn encode(&self) -> (Option<String>, Option<&'static str>) {
        let raw = match self {
            Value::Null => return (None, None),
            Value::Text(s) => s.clone(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Symbol(s) => s.clone(),
            Value::Date(d) => d.format(DATE_FORMAT).to_string(),
            Value::Time(t) => t.format(TIME_FORMAT).to_string(),
            Value::DateTime(dt) => dt.to_rfc2822(),
        };
        (Some(raw), self.type_tag())
    }

    /// Deserializes a stored `(raw_value, value_type)` pair back into a value.
    ///
    /// A missing raw value decodes to `Null` regardless of the tag. An
    /// unrecognized tag is treated as opaque text so that records written
    /// before a type tag existed degrade gracefully rather than erroring;
    /// the fallback is logged.
    ///
    /// # Errors
    /// Returns [`ValueError::Malformed`] when the raw text does not parse
    /// under its recorded tag: a non-numeric integer or float, a boolean
    /// that is not exactly `true` or `false`, or a timestamp that does not
    /// match its calendar grammar.
    pub fn decode(raw: Option<&str>, value_type: Option<&str>) -> crate::Result<Self> {
        let Some(raw) = raw else {
            return Ok(Value::Null);
        };
        let Some(value_type) = value_type else {
            // Untagged content is treated as opaque text, same as an
            // unrecognized tag.
            return Ok(Value::Text(raw.to_string()));
        };

        let value = match value_type {
            tag::TEXT => Value::Text(raw.to_string()),
            tag::INTEGER => Value::Int(
                raw.parse::<BigInt>()
                    .map_err(|e| malformed(value_type, raw, e))?,
            ),
            tag::FLOAT => Value::Float(
                raw.parse::<f64>()
                    .map_err(|e| malformed(value_type, raw, e))?,
            ),
            tag::BOOLEAN => match raw {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => {
                    return Err(malformed(value_type, raw, "expected 'true' or 'false'").into());
                }
            },
            tag::SYMBOL => Value::Symbol(raw.to_string()),
            tag::DATE => Value::Date(
                NaiveDate::parse_from_str(raw, DATE_FORMAT)
                    .map_err(|e| malformed(value_type, raw, e))?,
            ),
            tag::TIME => Value::Time(
                NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
                    .map_err(|e| malformed(value_type, raw, e))?,
            ),
            tag::DATETIME => Value::DateTime(
                DateTime::parse_from_rfc2822(raw).map_err(|e| malformed(value_type, raw, e))?,
            ),
            other => {
                tracing::warn!(value_type = other, "unrecognized value type, decoding as text");
                Value::Text(raw.to_string())
            }
        };
        Ok(value)
    }
}

fn malformed(value_type: &str, raw: &str, reason: impl fmt::Display) -> ValueError {
    ValueError::Malformed {
        value_type: value_type.to_string(),
        raw: raw.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Symbol(s) => write!(f, ":{s}"),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Value::Time(t) => write!(f, "{}", t.format(TIME_FORMAT)),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc2822()),
        }
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(BigInt::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(BigInt::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Int(BigInt::from(value))
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Time(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::DateTime(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// Conversion from dynamically typed host input.
///
/// This is the boundary where a host hands the engine data it did not
/// construct through the typed API, e.g. a JSON request body. Scalars map to
/// their natural kinds; arrays and objects have no codec mapping and fail
/// fast with [`ValueError::UnsupportedKind`] before anything is written.
impl TryFrom<serde_json::Value> for Value {
    type Error = ValueError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(BigInt::from(i)))
                } else if let Some(u) = n.as_u64() {
                    Ok(Value::Int(BigInt::from(u)))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Float(f))
                } else {
                    Err(ValueError::UnsupportedKind {
                        kind: "number".to_string(),
                    })
                }
            }
            serde_json::Value::String(s) => Ok(Value::Text(s)),
            serde_json::Value::Array(_) => Err(ValueError::UnsupportedKind {
                kind: "array".to_string(),
            }),
            serde_json::Value::Object(_) => Err(ValueError::UnsupportedKind {
                kind: "object".to_string(),
            }),
        }
    }
}

// TryFrom implementations for typed extraction
impl TryFrom<&Value> for String {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) | Value::Symbol(s) => Ok(s.clone()),
            _ => Err(mismatch("Text", value)),
        }
    }
}

impl TryFrom<&Value> for BigInt {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(n) => Ok(n.clone()),
            _ => Err(mismatch("Integer", value)),
        }
    }
}

impl TryFrom<&Value> for i64 {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(n) => i64::try_from(n).map_err(|_| ValueError::TypeMismatch {
                expected: "i64".to_string(),
                actual: format!("Integer({n}) out of range"),
            }),
            _ => Err(mismatch("Integer", value)),
        }
    }
}

impl TryFrom<&Value> for f64 {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(x) => Ok(*x),
            _ => Err(mismatch("Float", value)),
        }
    }
}

impl TryFrom<&Value> for bool {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(mismatch("Boolean", value)),
        }
    }
}

impl TryFrom<&Value> for NaiveDate {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Date(d) => Ok(*d),
            _ => Err(mismatch("Date", value)),
        }
    }
}

impl TryFrom<&Value> for NaiveDateTime {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Time(t) => Ok(*t),
            _ => Err(mismatch("Time", value)),
        }
    }
}

impl TryFrom<&Value> for DateTime<FixedOffset> {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::DateTime(dt) => Ok(*dt),
            _ => Err(mismatch("DateTime", value)),
        }
    }
}

fn mismatch(expected: &str, actual: &Value) -> ValueError {
    ValueError::TypeMismatch {
        expected: expected.to_string(),
        actual: actual
            .type_tag()
            .unwrap_or("Null")
            .to_string(),
    }
}

// PartialEq implementations for comparing Value with other types
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        match self {
            Value::Text(s) => s == other,
            _ => false,
        }
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        match self {
            Value::Text(s) => s == other,
            _ => false,
        }
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        match self {
            Value::Int(n) => *n == BigInt::from(*other),
            _ => false,
        }
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        match self {
            Value::Bool(b) => b == other,
            _ => false,
        }
    }
}

// Reverse implementations for symmetry
impl PartialEq<Value> for str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == *self
    }
}

impl PartialEq<Value> for String {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}
