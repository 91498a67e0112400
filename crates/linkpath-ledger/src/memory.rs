use std::sync::RwLock;

use crate::error::LedgerResult;
use crate::record::ArithmeticRecord;
use crate::traits::{validate_all, RecordReader, RecordWriter};

/// In-memory ledger for tests, local demos, and embedding.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    rows: RwLock<Vec<ArithmeticRecord>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordWriter for InMemoryLedger {
    fn append(&self, record: &ArithmeticRecord) -> LedgerResult<()> {
        self.append_all(std::slice::from_ref(record))
    }

    fn append_all(&self, records: &[ArithmeticRecord]) -> LedgerResult<()> {
        validate_all(records)?;
        self.rows
            .write()
            .expect("lock poisoned")
            .extend_from_slice(records);
        Ok(())
    }
}

impl RecordReader for InMemoryLedger {
    fn read_all(&self) -> LedgerResult<Vec<ArithmeticRecord>> {
        Ok(self.rows.read().expect("lock poisoned").clone())
    }

    fn len(&self) -> LedgerResult<usize> {
        Ok(self.rows.read().expect("lock poisoned").len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::record::{Answer, Operator};

    fn record(op: Operator, a: i64, b: i64) -> ArithmeticRecord {
        ArithmeticRecord::compute(op, a, b).unwrap()
    }

    #[test]
    fn append_and_read_preserve_order() {
        let ledger = InMemoryLedger::new();
        ledger.append(&record(Operator::Add, 1, 2)).unwrap();
        ledger.append(&record(Operator::Divide, 7, 2)).unwrap();

        let rows = ledger.read_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].answer, Answer::Integer(3));
        assert_eq!(rows[1].answer, Answer::Fraction(3.5));
        assert_eq!(ledger.len().unwrap(), 2);
    }

    #[test]
    fn invalid_record_is_rejected() {
        let ledger = InMemoryLedger::new();
        let bad = ArithmeticRecord::new(Operator::Multiply, 3, 3, Answer::Integer(10));
        assert!(matches!(ledger.append(&bad), Err(LedgerError::Validation(_))));
        assert!(ledger.is_empty().unwrap());
    }

    #[test]
    fn batch_with_bad_record_writes_nothing() {
        let ledger = InMemoryLedger::new();
        let batch = vec![
            record(Operator::Add, 1, 1),
            ArithmeticRecord::new(Operator::Add, 1, 1, Answer::Integer(3)),
        ];
        assert!(ledger.append_all(&batch).is_err());
        assert!(ledger.is_empty().unwrap());
    }

    #[test]
    fn read_by_index() {
        let ledger = InMemoryLedger::new();
        for b in 1..=3 {
            ledger.append(&record(Operator::Multiply, 2, b)).unwrap();
        }
        assert_eq!(ledger.read_by_index(0).unwrap().int2, 1);
        assert_eq!(ledger.read_by_index(2).unwrap().int2, 3);
        assert!(matches!(
            ledger.read_by_index(3),
            Err(LedgerError::IndexOutOfRange { index: 3, len: 3 })
        ));

        let picked = ledger.read_by_indices(&[2, 0]).unwrap();
        assert_eq!(picked.iter().map(|r| r.int2).collect::<Vec<_>>(), [3, 1]);
        assert!(ledger.read_by_indices(&[0, 9]).is_err());
    }
}
