//! # Vellum - document data layer
//!
//! Vellum is the document-oriented core of a multi-tenant database service.
//! It turns JSON-schema collection definitions into a typed, versioned
//! schema model and runs the per-request work that depends on it.
//!
//! ## Key Features
//!
//! - **Schema model**: typed field tree with primary key, 64-bit integer paths
//!   and the flattened search-field list
//! - **Schema evolution**: additive changes only, checked before a new version
//!   is published
//! - **Validation**: exact integer bounds on arbitrary-precision literals,
//!   format checks and additional-properties rejection at every object level
//! - **Partial updates**: `$set` / `$unset` with dotted paths, merged into
//!   stored documents all-or-nothing
//! - **Sort orders**: parsing of client sort requests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vellum::schema::{CreateOptions, SchemaStore};
//! use vellum::update::build_field_operators;
//!
//! let store = SchemaStore::default();
//! let schema = store.create_or_update("orders", br#"{
//!     "title": "orders",
//!     "properties": {
//!         "id": {"type": "integer"},
//!         "total": {"type": "number"}
//!     },
//!     "primary_key": ["id"]
//! }"#, &CreateOptions::default())?;
//!
//! schema.validate_slice(br#"{"id": 1, "total": 9.5}"#)?;
//!
//! let operators = build_field_operators(br#"{"$set": {"total": 12}}"#)?;
//! let merged = operators.merge_and_get(br#"{"id": 1, "total": 9.5}"#)?;
//! ```
//!
//! ## Concurrency
//!
//! Everything on the request path (validation, operator parsing and merge,
//! sort parsing) is a pure function over immutable inputs. The only mutation
//! point is [schema::SchemaStore], which serializes writers per collection
//! and publishes each version atomically.
//!
//! ## Module Organization
//!
//! - [`common`] - Constants, locks and JSON helpers
//! - [`config`] - Tunables shared by the components
//! - [`errors`] - Error types and result definitions
//! - [`query`] - Sort-order parsing
//! - [`schema`] - Schema builder, model, compatibility and store
//! - [`update`] - Field operators and document merge
//! - [`validation`] - Document validator

pub mod common;
pub mod config;
pub mod errors;
pub mod query;
pub mod schema;
pub mod update;
pub mod validation;
