//! Console output helpers for the demo binary.
//!
//! The library itself never prints; everything here only formats strings.

mod colors;
mod messages;

pub use messages::{error_message, highlight_argument, system_message, table_summary};
