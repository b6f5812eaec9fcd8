//! A tiny table store that mirrors a delimited text file in memory and
//! writes the whole file back after every change.

pub mod console;
pub mod config;
pub mod persistence;
