//! Client query options handled by the document layer.

mod sort;

pub use sort::*;
