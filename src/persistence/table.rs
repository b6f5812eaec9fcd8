use std::fmt::Display;

use serde::Serialize;

use super::row::Row;
use super::schema::Schema;
use super::value::DataType;

/// An ordered sequence of [`Row`]s sharing one [`Schema`].
///
/// The position of a row is its identifier. Every [`Table`] handed out by
/// [`super::TableStore`] is an owned copy, so changing it never reaches the
/// store or the backing file.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Table {
    schema: Schema,
    rows: Vec<Row>,
}

impl Table {
    pub(crate) fn empty(schema: Schema) -> Table {
        Table {
            schema,
            rows: vec![],
        }
    }

    pub(crate) fn from_rows(schema: Schema, rows: Vec<Row>) -> Table {
        let mut table = Table { schema, rows };
        table.refresh_types();
        table
    }

    pub(crate) fn refresh_types(&mut self) {
        //! Recompute the summary type of every column from its cells.
        //!
        //! Only the schema changes; the cells keep the values they were
        //! given.

        for index in 0..self.schema.len() {
            let datatype = self.schema.get(index).and_then(|(name, _)| {
                DataType::common(self.rows.iter().filter_map(|row| row.get(name)))
            });
            self.schema.set_datatype(index, datatype);
        }
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn columns(&self) -> Vec<String> {
        self.schema.names().map(String::from).collect()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn filter<F>(&self, filter: F) -> Table
    where
        F: Fn(&Row) -> bool,
    {
        //! Runs a filter over the rows and clones the ones matching the
        //! filter criteria.
        //!
        //! Returns a new [`Table`] with the same schema; matching rows are
        //! renumbered from 0 in their original order.

        Table {
            schema: self.schema.clone(),
            rows: self.rows.iter().filter(|row| filter(row)).cloned().collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        //! Export the rows as a JSON array of objects keyed by column.

        serde_json::to_string(&self.rows)
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows: Vec<String> = self.rows.iter().map(|row| format!("{}", row)).collect();

        writeln!(f, "{}\n{}", self.schema, rows.join("\n"))
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
