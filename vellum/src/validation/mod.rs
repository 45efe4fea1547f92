//! Document validation against a [crate::schema::CollectionSchema].

mod validator;
mod violation;

pub use validator::*;
pub use violation::*;
