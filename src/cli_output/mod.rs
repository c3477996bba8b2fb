//! Terminal output for the CLI: headers, notices and resource tables.

mod boxes;
mod tables;

pub use boxes::*;
pub use tables::*;
