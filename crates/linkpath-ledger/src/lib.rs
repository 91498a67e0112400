//! Append-only ledger of arithmetic records.
//!
//! This crate provides:
//! - `Operator`, `Answer` and `ArithmeticRecord` with recompute-on-validate
//! - `RecordWriter` / `RecordReader` trait boundaries
//! - `InMemoryLedger` for tests and embedding
//! - `CsvLedger` backed by a `operator,int1,int2,answer` file
//! - `BufferedAppender` for batched writes

pub mod buffer;
pub mod csv_ledger;
pub mod error;
pub mod memory;
pub mod record;
pub mod table;
pub mod traits;

pub use buffer::{BufferedAppender, DEFAULT_BUFFER_CAPACITY};
pub use csv_ledger::{CsvLedger, OpenMode};
pub use error::{LedgerError, LedgerResult};
pub use memory::InMemoryLedger;
pub use record::{Answer, ArithmeticRecord, Operator, HEADERS};
pub use table::{multiplication_table, write_multiplication_table};
pub use traits::{RecordReader, RecordWriter};
