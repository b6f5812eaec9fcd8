//! General message formatting functions for the demo output.
//!
//! - Highlight Text (make the text ferrum red but not bold)
//! - System message formatting that keeps every line in one format.
//! - Error and table summaries built on top of those.

use colored::Colorize;

use crate::console::colors::{FERRUM_RED, RUST_AMBER};
use crate::persistence::{Table, TableError};

pub fn highlight_argument(argument: &str) -> String {
    //! Highlight a piece of text in the ferrum red
    //! color to make it obvious.

    format!("{}", argument.color(FERRUM_RED))
}

pub fn system_message(source_name: &str, message: String) -> String {
    //! Format a status line as `[source] message`, with the source name
    //! padded and colored.

    let source_formatted = format!("{:6}", source_name.color(FERRUM_RED).bold());

    format!("[{}] {}", source_formatted, message)
}

pub fn error_message(source_name: &str, error: &TableError) -> String {
    let source_formatted = format!("{:6}", source_name.color(RUST_AMBER).bold());

    format!("[{}] {}", source_formatted, error)
}

pub fn table_summary(table: &Table) -> String {
    //! One line describing the shape of a table, e.g. `2 row(s) x 3 column(s)`.

    format!(
        "{} row(s) x {} column(s)",
        highlight_argument(&table.len().to_string()),
        highlight_argument(&table.schema().len().to_string()),
    )
}
