use crate::error::LedgerResult;
use crate::record::ArithmeticRecord;
use crate::traits::RecordWriter;

/// Rows held before a [`BufferedAppender`] writes a batch.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// Batches records in memory and writes them with one `append_all` call
/// whenever `capacity` rows are pending.
///
/// Records are validated on [`push`](Self::push), so a batch never fails
/// validation at flush time. Call [`flush`](Self::flush) to write the tail;
/// dropping the appender flushes too but can only log a failure.
pub struct BufferedAppender<'w, W: RecordWriter + ?Sized> {
    writer: &'w W,
    buffer: Vec<ArithmeticRecord>,
    capacity: usize,
    written: u64,
}

impl<'w, W: RecordWriter + ?Sized> BufferedAppender<'w, W> {
    pub fn new(writer: &'w W) -> Self {
        Self::with_capacity(writer, DEFAULT_BUFFER_CAPACITY)
    }

    /// Capacity is clamped to at least one row.
    pub fn with_capacity(writer: &'w W, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            writer,
            buffer: Vec::with_capacity(capacity),
            capacity,
            written: 0,
        }
    }

    /// Queue `record`, writing the batch once the buffer is full.
    pub fn push(&mut self, record: ArithmeticRecord) -> LedgerResult<()> {
        record.validate()?;
        self.buffer.push(record);
        if self.buffer.len() >= self.capacity {
            self.flush()?;
        }
        Ok(())
    }

    /// Write every pending record.
    pub fn flush(&mut self) -> LedgerResult<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        self.writer.append_all(&self.buffer)?;
        self.written += self.buffer.len() as u64;
        self.buffer.clear();
        Ok(())
    }

    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Rows written through this appender so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<W: RecordWriter + ?Sized> Drop for BufferedAppender<'_, W> {
    fn drop(&mut self) {
        let pending = self.buffer.len();
        if let Err(e) = self.flush() {
            tracing::warn!(pending, error = %e, "dropping unflushed ledger rows");
        }
    }
}
