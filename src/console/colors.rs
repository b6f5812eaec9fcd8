//! To maintain a theme of colors, I will add colors here as constants so
//! the output does not look bad at any point.
//!
//! - FERRUM_RED: Main Color
//! - RUST_AMBER: Warnings and failures

use colored::Color;

pub(crate) const FERRUM_RED: Color = Color::TrueColor {
    r: 255,
    g: 87,
    b: 87,
};

pub(crate) const RUST_AMBER: Color = Color::TrueColor {
    r: 255,
    g: 176,
    b: 59,
};
