use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, info, warn};

use super::codec;
use super::error::{TableError, TableResult};
use super::row::Row;
use super::schema::Schema;
use super::table::Table;
use super::value::Value;

/// Owns one backing file and mirrors all of it in memory.
///
/// Every mutating call validates first, applies the change to a working
/// copy, rewrites the whole file and only then swaps the copy in. A call
/// that fails therefore leaves both the in-memory [`Table`] and the file
/// as they were.
///
/// The store does not hold the file open between calls, and it assumes it
/// is the only writer of that file for as long as it lives.
pub struct TableStore {
    path: PathBuf,
    table: Table,
}

impl TableStore {
    pub fn open<P, I, S>(path: P, initial_columns: I) -> TableResult<TableStore>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        //! Load the table stored at `path`.
        //!
        //! When the file does not exist, a new one holding only a header of
        //! `initial_columns` is created first. With no initial columns a
        //! missing file is a [`TableError::NotFound`]. The columns are
        //! ignored for a file that already exists.

        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            let columns: Vec<String> = initial_columns.into_iter().map(Into::into).collect();
            if columns.is_empty() {
                return Err(TableError::NotFound { path });
            }
            return TableStore::create(path, columns);
        }

        let table = codec::read_table(&path)?;
        debug!("loaded {} row(s) from {}", table.len(), path.display());

        Ok(TableStore { path, table })
    }

    pub fn open_existing<P: AsRef<Path>>(path: P) -> TableResult<TableStore> {
        //! Load the table at `path`, failing if there is no such file.

        TableStore::open(path, std::iter::empty::<String>())
    }

    pub fn create<P, I, S>(path: P, columns: I) -> TableResult<TableStore>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        //! Write a fresh header-only file at `path`, replacing anything
        //! already there, and load it.

        let path = path.as_ref().to_path_buf();
        let schema = Schema::new(columns)?;

        codec::write_table(&path, &Table::empty(schema))?;
        info!("created table file {}", path.display());

        let table = codec::read_table(&path)?;
        Ok(TableStore { path, table })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> &Schema {
        self.table.schema()
    }

    pub fn columns(&self) -> Vec<String> {
        self.table.columns()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn read(&self) -> Table {
        //! Returns a copy of the whole table.

        self.table.clone()
    }

    pub fn filter<V: Into<Value>>(&self, column: &str, value: V) -> TableResult<Table> {
        //! Returns a copy holding only the rows whose `column` equals
        //! `value`. Comparison is type-sensitive.

        if !self.table.schema().contains(column) {
            return Err(TableError::key_not_found(column));
        }

        let value = value.into();
        Ok(self.table.filter(|row| row.get(column) == Some(&value)))
    }

    pub fn insert<I, K, V>(&mut self, fields: I) -> TableResult<Table>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        //! Append a row built from `fields`, which must name every column
        //! exactly once and nothing else.
        //!
        //! Returns a copy of the updated table.

        let mut fields: IndexMap<String, Value> = fields
            .into_iter()
            .map(|(column, value)| (column.into(), value.into()))
            .collect();

        let schema = self.table.schema();
        let missing: Vec<String> = schema
            .names()
            .filter(|column| !fields.contains_key(*column))
            .map(String::from)
            .collect();
        let unexpected: Vec<String> = fields
            .keys()
            .filter(|column| !schema.contains(column))
            .cloned()
            .collect();

        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(TableError::SchemaMismatch {
                missing,
                unexpected,
            });
        }

        let row: Row = schema
            .names()
            .map(|column| {
                let value = fields.swap_remove(column).unwrap_or(Value::Null);
                (column.to_string(), value)
            })
            .collect();

        self.commit(|table| table.rows_mut().push(row))
    }

    pub fn delete<I>(&mut self, indices: I) -> TableResult<Table>
    where
        I: IntoIterator<Item = usize>,
    {
        //! Remove the rows at `indices` and renumber the rest from 0.
        //!
        //! All indices refer to positions before the call and are checked
        //! before anything is removed, so one bad index leaves the table
        //! untouched. Repeated indices remove their row once.

        let indices: Vec<usize> = indices.into_iter().collect();
        if indices.is_empty() {
            return Ok(self.read());
        }

        let n_rows = self.table.len();
        if let Some(&index) = indices.iter().find(|&&index| index >= n_rows) {
            return Err(TableError::IndexOutOfRange { index });
        }

        let doomed: BTreeSet<usize> = indices.into_iter().collect();
        self.commit(|table| {
            let mut position = 0;
            table.rows_mut().retain(|_| {
                let keep = !doomed.contains(&position);
                position += 1;
                keep
            });
        })
    }

    pub fn update<V: Into<Value>>(
        &mut self,
        row_index: usize,
        column: &str,
        value: V,
    ) -> TableResult<Table> {
        //! Replace the value at (`row_index`, `column`).
        //!
        //! Returns a copy of the updated table.

        if self.table.is_empty() {
            return Err(TableError::EmptyTable);
        }
        if row_index >= self.table.len() {
            return Err(TableError::IndexOutOfRange { index: row_index });
        }
        if !self.table.schema().contains(column) {
            return Err(TableError::key_not_found(column));
        }

        let value = value.into();
        self.commit(|table| {
            if let Some(row) = table.rows_mut().get_mut(row_index) {
                row.set(column, value);
            }
        })
    }

    fn commit<F>(&mut self, mutate: F) -> TableResult<Table>
    where
        F: FnOnce(&mut Table),
    {
        //! Apply `mutate` to a working copy, persist it with a full rewrite
        //! and make it current.

        let mut next = self.table.clone();
        mutate(&mut next);
        next.refresh_types();

        if let Err(error) = codec::write_table(&self.path, &next) {
            warn!(
                "rewrite of {} failed, keeping previous state: {}",
                self.path.display(),
                error
            );
            return Err(error);
        }
        debug!("wrote {} row(s) to {}", next.len(), self.path.display());

        self.table = next;
        Ok(self.read())
    }
}
