use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Timestamps are written with a space separator and only as many
/// fractional digits as they need.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const TIMESTAMP_FORMAT_ISO: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A single cell of a [`super::Table`].
///
/// Equality is type-sensitive: `Value::Integer(1)` is not equal to
/// `Value::Text("1")`. Two NaN floats compare equal so that a NaN cell can
/// be found again and survives a reload.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(NaiveDateTime),
    Text(String),
}

/// The type of a cell, and the summary type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DataType {
    Integer,
    Float,
    Boolean,
    Timestamp,
    Text,
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let datatype = match self {
            DataType::Integer => "INT",
            DataType::Float => "FLT",
            DataType::Boolean => "BOOL",
            DataType::Timestamp => "TS",
            DataType::Text => "TXT",
        };
        write!(f, "{}", datatype)
    }
}

impl DataType {
    /// Types an unquoted field is tried as, narrowest first. Anything none
    /// of them accepts is text.
    const UNQUOTED_ORDER: [DataType; 4] = [
        DataType::Integer,
        DataType::Float,
        DataType::Boolean,
        DataType::Timestamp,
    ];

    pub fn common<'a, I>(values: I) -> Option<DataType>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        //! Summarise the non-null values of a column as one type.
        //!
        //! Integers mixed with floats are reported as floats, any other mix
        //! as text. Returns [`None`] when every value is null.

        values
            .into_iter()
            .filter_map(Value::data_type)
            .reduce(|left, right| match (left, right) {
                (left, right) if left == right => left,
                (DataType::Integer, DataType::Float) | (DataType::Float, DataType::Integer) => {
                    DataType::Float
                }
                _ => DataType::Text,
            })
    }

    pub fn parse(&self, field: &str) -> Option<Value> {
        //! Read a non-empty text field as this type.

        match self {
            DataType::Integer => field.parse::<i64>().ok().map(Value::Integer),
            DataType::Float => parse_float(field).map(Value::Float),
            DataType::Boolean => match field.to_ascii_lowercase().as_str() {
                "true" => Some(Value::Boolean(true)),
                "false" => Some(Value::Boolean(false)),
                _ => None,
            },
            DataType::Timestamp => NaiveDateTime::parse_from_str(field, TIMESTAMP_FORMAT)
                .or_else(|_| NaiveDateTime::parse_from_str(field, TIMESTAMP_FORMAT_ISO))
                .ok()
                .map(Value::Timestamp),
            DataType::Text => Some(Value::Text(field.to_string())),
        }
    }
}

fn parse_float(field: &str) -> Option<f64> {
    // `f64::from_str` also takes words like "infinity"; only accept the
    // spellings the writer itself produces for non-finite values.
    let numeric = field.chars().any(|c| c.is_ascii_digit());
    if numeric || matches!(field, "inf" | "-inf" | "NaN") {
        field.parse::<f64>().ok()
    } else {
        None
    }
}

impl Value {
    pub fn to_field(&self) -> String {
        //! The raw text written to the backing file for this value, before
        //! any quoting.

        match self {
            Value::Null => String::new(),
            Value::Integer(value) => value.to_string(),
            Value::Float(value) => {
                let mut text = value.to_string();
                if value.is_finite() && !text.contains(['.', 'e', 'E']) {
                    text.push_str(".0");
                }
                text
            }
            Value::Boolean(value) => value.to_string(),
            Value::Timestamp(value) => value.format(TIMESTAMP_FORMAT).to_string(),
            Value::Text(value) => value.clone(),
        }
    }

    pub fn from_field(field: &str, quoted: bool) -> Value {
        //! Read one field of the backing file.
        //!
        //! A quoted field is always text. An unquoted empty field is null,
        //! any other unquoted field takes the narrowest type that accepts it.

        if quoted {
            return Value::Text(field.to_string());
        }
        if field.is_empty() {
            return Value::Null;
        }

        DataType::UNQUOTED_ORDER
            .iter()
            .find_map(|datatype| datatype.parse(field))
            .unwrap_or_else(|| Value::Text(field.to_string()))
    }

    pub(crate) fn needs_quotes(&self) -> bool {
        //! Whether the raw field must be quoted to read back as this value.

        match self {
            Value::Text(text) => !matches!(Value::from_field(text, false), Value::Text(_)),
            _ => false,
        }
    }

    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Integer(_) => Some(DataType::Integer),
            Value::Float(_) => Some(DataType::Float),
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::Timestamp(_) => Some(DataType::Timestamp),
            Value::Text(_) => Some(DataType::Text),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NIL"),
            other => write!(f, "{}", other.to_field()),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Timestamp(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
