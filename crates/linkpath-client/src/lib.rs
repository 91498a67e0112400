//! Object sources and the object client.
//!
//! An [`ObjectSource`] fetches raw documents by `@id`. The [`ObjectClient`]
//! wraps a source with a per-fetch timeout and validates each document into
//! an [`ObjectRecord`](linkpath_types::ObjectRecord). Nothing here caches:
//! objects may change between calls.
//!
//! - [`InMemoryObjectSource`] -- `HashMap`-based source for tests and embedding
//! - [`HttpObjectSource`] -- `GET <base><id>`

pub mod client;
pub mod error;
pub mod http;
pub mod memory;
pub mod traits;

pub use client::{ObjectClient, DEFAULT_FETCH_TIMEOUT};
pub use error::{ClientError, ClientResult};
pub use http::HttpObjectSource;
pub use memory::InMemoryObjectSource;
pub use traits::ObjectSource;
