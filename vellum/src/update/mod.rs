//! Partial-update operators (`$set` / `$unset`) and their merge into stored
//! documents.

mod field_operator;
mod field_path;
mod merge;
mod raw_document;

pub use field_operator::*;
pub use field_path::*;
