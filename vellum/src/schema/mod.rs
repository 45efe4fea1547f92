//! Collection schemas: the builder that resolves JSON-schema definitions into
//! a typed field tree, the derived path indexes, compatibility checking and
//! the versioned schema store.

mod builder;
mod collection;
mod create_options;
mod evolution;
mod field;
mod int64_index;
mod search;
mod store;

pub use builder::*;
pub use collection::*;
pub use create_options::*;
pub use evolution::*;
pub use field::*;
pub use int64_index::*;
pub use search::*;
pub use store::*;
