use std::collections::HashSet;
use std::fmt::Display;

use serde::Serialize;

use super::error::{TableError, TableResult};
use super::value::DataType;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnInformation {
    pub(super) datatype: Option<DataType>,
}

impl ColumnInformation {
    pub fn datatype(&self) -> Option<DataType> {
        self.datatype
    }
}

/// The fixed, ordered column set of a table.
///
/// Names are unique and non-empty. The [`ColumnInformation`] of each
/// column carries the type inferred from its current contents, which may
/// change after a mutation; the names never do.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Schema(Vec<(String, ColumnInformation)>);

impl Schema {
    pub fn new<I, S>(columns: I) -> TableResult<Schema>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        //! Create an untyped schema from column names.
        //!
        //! Fails with [`TableError::SchemaMismatch`] when there are no columns
        //! at all, or when a name is empty or repeated; the offending names
        //! are reported as unexpected.

        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        let mut seen = HashSet::new();
        let unexpected: Vec<String> = columns
            .iter()
            .filter(|name| name.is_empty() || !seen.insert(name.as_str()))
            .cloned()
            .collect();
        drop(seen);

        if columns.is_empty() || !unexpected.is_empty() {
            return Err(TableError::SchemaMismatch {
                missing: vec![],
                unexpected,
            });
        }

        Ok(Schema(
            columns
                .into_iter()
                .map(|name| (name, ColumnInformation { datatype: None }))
                .collect(),
        ))
    }

    pub fn get(&self, index: usize) -> Option<&(String, ColumnInformation)> {
        //! Get schema column name and its information at the `index`.

        self.0.get(index)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.0.iter().position(|(name, _)| name == column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    pub fn datatype(&self, column: &str) -> Option<DataType> {
        self.0
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, info)| info.datatype)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn set_datatype(&mut self, index: usize, datatype: Option<DataType>) {
        if let Some((_, info)) = self.0.get_mut(index) {
            info.datatype = datatype;
        }
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let schema: Vec<String> = self
            .0
            .iter()
            .map(|(col, info)| match info.datatype {
                Some(datatype) => format!("{} ({})", col, datatype),
                None => format!("{} (NIL)", col),
            })
            .collect();
        write!(f, "{}", schema.join(" | "))
    }
}
