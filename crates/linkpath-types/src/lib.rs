//! Foundation types for linkpath.
//!
//! This crate provides the document and shape types shared by every other
//! linkpath crate. It performs no I/O.
//!
//! # Key Types
//!
//! - [`ObjectRecord`] - A fetched `@id`/`@type` document
//! - [`Schema`] - The declared shape of one object type
//! - [`FieldSchema`] - Per-field shape: scalar, array, nested object or link
//! - [`FieldPath`] - A validated dotted path such as `owner.name`
//! - [`Memo`] - Keyed async memo with single-flight initialisation

pub mod error;
pub mod memo;
pub mod path;
pub mod record;
pub mod schema;

pub use error::{PathError, RecordError};
pub use memo::Memo;
pub use path::{validate_id, FieldPath};
pub use record::{ObjectRecord, ID_KEY, TYPE_KEY};
pub use schema::{FieldKind, FieldSchema, Properties, Schema};
