//! Persistence as a single file-backed table needs the following components
//! - Value (a typed cell, written to and read from text)
//! - Schema (ordered column names with their inferred types, fixed per table)
//! - Row (a mapping of column names to values, in schema order)
//! - Table (made of many Rows, handed out as owned copies)
//! - TableStore (owns the backing file and rewrites it after every change)
//!

//  All modules of this lib
mod codec;
mod error;
mod row;
mod schema;
mod store;
mod table;
mod value;

//  External API
pub use error::{TableError, TableResult};
pub use row::Row;
pub use schema::{ColumnInformation, Schema};
pub use store::TableStore;
pub use table::Table;
pub use value::{DataType, Value};
