mod json_utils;
mod type_utils;

pub use json_utils::*;
pub use type_utils::*;
