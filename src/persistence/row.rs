use std::fmt::Display;
use std::ops::Index;

use indexmap::IndexMap;
use serde::Serialize;

use super::value::Value;

/// A single record of a [`super::Table`]: column names mapped to values,
/// kept in the table's column order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row(IndexMap<String, Value>);

impl Row {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(column, value)| (column.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn set(&mut self, column: &str, value: Value) -> Option<Value> {
        //! Replace the value of an existing column in place.
        //!
        //! Returns the previous value, or [`None`] if the column is not
        //! part of this row (in which case nothing changes).

        self.0
            .get_mut(column)
            .map(|cell| std::mem::replace(cell, value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row(iter
            .into_iter()
            .map(|(column, value)| (column.into(), value.into()))
            .collect())
    }
}

impl Index<&str> for Row {
    type Output = Value;

    fn index(&self, column: &str) -> &Value {
        &self.0[column]
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row: Vec<String> = self.0.values().map(|value| value.to_string()).collect();
        write!(f, "{}", row.join(" | "))
    }
}
