use crate::buffer::BufferedAppender;
use crate::error::LedgerResult;
use crate::record::{ArithmeticRecord, Operator};
use crate::traits::RecordWriter;

/// Products `a * b` for `a` and `b` in `1..=max`, row-major.
pub fn multiplication_table(max: i64) -> impl Iterator<Item = LedgerResult<ArithmeticRecord>> {
    (1..=max).flat_map(move |a| {
        (1..=max).map(move |b| ArithmeticRecord::compute(Operator::Multiply, a, b))
    })
}

/// Write the multiplication table for `1..=max` through a buffered
/// appender holding `capacity` rows. Returns the number of rows written.
pub fn write_multiplication_table<W: RecordWriter + ?Sized>(
    writer: &W,
    max: i64,
    capacity: usize,
) -> LedgerResult<u64> {
    let mut appender = BufferedAppender::with_capacity(writer, capacity);
    for record in multiplication_table(max) {
        appender.push(record?)?;
    }
    appender.flush()?;
    tracing::debug!(max, rows = appender.written(), "wrote multiplication table");
    Ok(appender.written())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_ledger::{CsvLedger, OpenMode};
    use crate::memory::InMemoryLedger;
    use crate::record::Answer;
    use crate::traits::RecordReader;

    #[test]
    fn table_has_max_squared_rows() {
        let rows: Vec<_> = multiplication_table(3).collect::<LedgerResult<_>>().unwrap();
        assert_eq!(rows.len(), 9);
        assert_eq!((rows[0].int1, rows[0].int2), (1, 1));
        assert_eq!(rows[5].answer, Answer::Integer(6));
        assert!(rows.iter().all(|r| r.validate().is_ok()));
    }

    #[test]
    fn empty_table() {
        assert_eq!(multiplication_table(0).count(), 0);
        let ledger = InMemoryLedger::new();
        assert_eq!(write_multiplication_table(&ledger, 0, 4).unwrap(), 0);
    }

    #[test]
    fn write_table_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = CsvLedger::open(dir.path().join("t.csv"), OpenMode::UseExisting).unwrap();
        let written = write_multiplication_table(&ledger, 12, 7).unwrap();
        assert_eq!(written, 144);
        let rows = ledger.read_all().unwrap();
        assert_eq!(rows.len(), 144);
        assert_eq!(rows[143].answer, Answer::Integer(144));
    }
}
