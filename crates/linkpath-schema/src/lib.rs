//! Schema sources and the schema registry.
//!
//! A [`SchemaSource`] fetches raw schema documents by type name. The
//! [`SchemaRegistry`] sits in front of a source, parses documents into the
//! [`Schema`](linkpath_types::Schema) model and memoizes them for its whole
//! lifetime.
//!
//! # Sources
//!
//! - [`InMemorySchemaSource`] -- `HashMap`-based source for tests and embedding
//! - [`DirectorySchemaSource`] -- reads `<root>/<TypeName>.json` on demand
//! - [`HttpSchemaSource`] -- `GET <base>/<TypeName>.json`
//!
//! # Design Rules
//!
//! 1. One underlying fetch per distinct type name, ever (failures excepted).
//! 2. Concurrent first requests for a type name share one fetch.
//! 3. A missing schema is a hard error, never an empty schema.

pub mod directory;
pub mod error;
pub mod http;
pub mod memory;
pub mod parse;
pub mod registry;
pub mod traits;

pub use directory::DirectorySchemaSource;
pub use error::{SchemaError, SchemaResult};
pub use http::HttpSchemaSource;
pub use memory::InMemorySchemaSource;
pub use parse::parse_schema;
pub use registry::SchemaRegistry;
pub use traits::SchemaSource;
