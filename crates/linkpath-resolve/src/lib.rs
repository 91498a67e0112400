//! Dotted-path resolution across linked, schema-typed objects.
//!
//! Given a starting `@id` and a path such as `owner.lab.members.name`, the
//! [`PathResolver`] walks the starting object's fields as described by its
//! schema, fans out over arrays, and fetches linked objects whenever the
//! path crosses a `linkTo` field, until the path is exhausted.
//!
//! ```text
//! {"@id":"/x/1","@type":"Item","owner":"/u/9"}   Item: { owner: link(User) }
//! {"@id":"/u/9","@type":"User","name":"Ada"}     User: { name: scalar }
//!
//! resolve("/x/1", "owner.name") == ["Ada"]
//! ```
//!
//! # Guarantees
//!
//! 1. Results follow path order, then array/link element order, regardless
//!    of which fan-out branch finishes first.
//! 2. Each distinct object is fetched at most once per [`ResolveSession`];
//!    each schema at most once per registry.
//! 3. Any failure aborts the whole call. There are no partial results.

pub mod config;
pub mod error;
pub mod resolver;

pub use config::ResolverConfig;
pub use error::{ResolveError, ResolveResult};
pub use resolver::{PathResolver, ResolveSession};
