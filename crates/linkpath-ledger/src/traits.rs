use crate::error::{LedgerError, LedgerResult};
use crate::record::ArithmeticRecord;

/// Write boundary for ledger append operations.
///
/// Implementations validate every record before anything is written.
pub trait RecordWriter: Send + Sync {
    fn append(&self, record: &ArithmeticRecord) -> LedgerResult<()>;

    /// Append a batch. Either every record is valid and all are written, or
    /// nothing is written.
    fn append_all(&self, records: &[ArithmeticRecord]) -> LedgerResult<()>;
}

/// Read boundary for ledger queries.
pub trait RecordReader: Send + Sync {
    /// Every data row in append order.
    fn read_all(&self) -> LedgerResult<Vec<ArithmeticRecord>>;

    fn len(&self) -> LedgerResult<usize> {
        Ok(self.read_all()?.len())
    }

    fn is_empty(&self) -> LedgerResult<bool> {
        Ok(self.len()? == 0)
    }

    /// The row at `index`; index 0 is the first data row.
    fn read_by_index(&self, index: usize) -> LedgerResult<ArithmeticRecord> {
        let rows = self.read_all()?;
        let len = rows.len();
        rows.into_iter()
            .nth(index)
            .ok_or(LedgerError::IndexOutOfRange { index, len })
    }

    /// The rows at `indices`, in the order requested.
    fn read_by_indices(&self, indices: &[usize]) -> LedgerResult<Vec<ArithmeticRecord>> {
        let rows = self.read_all()?;
        indices
            .iter()
            .map(|&index| {
                rows.get(index)
                    .cloned()
                    .ok_or(LedgerError::IndexOutOfRange {
                        index,
                        len: rows.len(),
                    })
            })
            .collect()
    }
}

/// Validate a batch up front so a bad record leaves the ledger untouched.
pub(crate) fn validate_all(records: &[ArithmeticRecord]) -> LedgerResult<()> {
    records.iter().try_for_each(ArithmeticRecord::validate)
}
