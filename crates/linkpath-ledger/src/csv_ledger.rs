use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::{LedgerError, LedgerResult};
use crate::record::{ArithmeticRecord, HEADERS};
use crate::traits::{validate_all, RecordReader, RecordWriter};

/// How [`CsvLedger::open`] treats an existing file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenMode {
    /// Fail with [`LedgerError::AlreadyExists`] if the file exists.
    CreateNew,
    /// Reuse an existing file or create it if absent.
    UseExisting,
}

/// Ledger stored as a CSV file with the header `operator,int1,int2,answer`.
///
/// Each append opens the file, writes, and closes it again, so several
/// ledgers (or processes) may share one path. Appends through one instance
/// are serialized.
#[derive(Debug)]
pub struct CsvLedger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvLedger {
    /// Open the ledger at `path`, writing the header if the file is new.
    pub fn open(path: impl Into<PathBuf>, mode: OpenMode) -> LedgerResult<Self> {
        let path = path.into();
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => {
                let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
                writer.write_record(HEADERS)?;
                writer.flush()?;
                tracing::debug!(path = %path.display(), "created ledger file");
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if mode == OpenMode::CreateNew {
                    return Err(LedgerError::AlreadyExists(path));
                }
                tracing::debug!(path = %path.display(), "reusing ledger file");
            }
            Err(e) => return Err(e.into()),
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordWriter for CsvLedger {
    fn append(&self, record: &ArithmeticRecord) -> LedgerResult<()> {
        self.append_all(std::slice::from_ref(record))
    }

    fn append_all(&self, records: &[ArithmeticRecord]) -> LedgerResult<()> {
        validate_all(records)?;
        if records.is_empty() {
            return Ok(());
        }

        let _guard = self.write_lock.lock().expect("lock poisoned");
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        for record in records {
            writer.write_record(record.to_fields())?;
        }
        writer.flush()?;
        tracing::debug!(path = %self.path.display(), rows = records.len(), "appended rows");
        Ok(())
    }
}

impl RecordReader for CsvLedger {
    fn read_all(&self) -> LedgerResult<Vec<ArithmeticRecord>> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_path(&self.path)?;
        let headers = reader.headers()?;
        if headers.iter().ne(HEADERS) {
            return Err(LedgerError::Corrupt {
                line: 1,
                reason: format!("unexpected header `{}`", headers.iter().collect::<Vec<_>>().join(",")),
            });
        }

        let mut rows = Vec::new();
        for result in reader.records() {
            let row = result?;
            rows.push(parse_row(&row)?);
        }
        Ok(rows)
    }
}

fn parse_row(row: &StringRecord) -> LedgerResult<ArithmeticRecord> {
    let fields: Vec<&str> = row.iter().collect();
    ArithmeticRecord::parse_fields(&fields).map_err(|reason| LedgerError::Corrupt {
        line: row.position().map_or(0, |p| p.line()),
        reason,
    })
}
