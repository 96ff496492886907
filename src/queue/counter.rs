//! Capability traits shared by the queue backends.
//!
//! Two capability sets:
//! - [`Counter`]: admission control and accounting. Every backend has it.
//! - [`RecordQueue`]: adds payload access to the oldest record. Only backends
//!   that actually store bytes implement it.
//!
//! # Accounting contract
//!
//! With `LEN_LINES` slots and a `LEN_BYTES` budget, every backend keeps
//! `size() + free_lines() == LEN_LINES` and `bytes() + free_bytes() == LEN_BYTES`.
//! A buffered record of length `len` holds `len + overhead` bytes of the
//! budget from the push that admitted it to the pop that released it.
//!
//! # Protocol
//!
//! ```ignore
//! if queue.can_push(line.len()) {
//!     queue.push(line)?;
//! }
//!
//! // Consumer (polling loop)
//! if let Some(line) = queue.peek() {
//!     if link_idle {
//!         uart.write(line);
//!         queue.pop();
//!     }
//! }
//! ```

use super::error::QueueError;

/// Admission control and accounting for a bounded FIFO of records.
pub trait Counter {
    /// Drop every record and restore both budgets.
    fn clear(&mut self);

    /// Check whether a record of `len` bytes would be admitted. No side effect.
    fn can_push(&self, len: usize) -> bool;

    /// Admit one record.
    ///
    /// Returns the number of payload bytes accounted, which is less than
    /// `record.len()` when the backend truncates. On error nothing changed.
    fn push(&mut self, record: &[u8]) -> Result<usize, QueueError>;

    /// Number of buffered records.
    fn size(&self) -> usize;

    /// Remaining record slots.
    fn free_lines(&self) -> usize;

    /// Budget bytes in use, overhead included.
    fn bytes(&self) -> usize;

    /// Remaining budget bytes.
    fn free_bytes(&self) -> usize;

    /// Length of the oldest record, `None` when empty.
    fn peek_len(&mut self) -> Option<usize>;

    /// Consume the oldest record and release its budget.
    ///
    /// Returns `false` (and does nothing) when empty.
    fn pop(&mut self) -> bool;

    /// Check if no record is buffered.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

/// A [`Counter`] that also stores payload bytes.
pub trait RecordQueue: Counter {
    /// View the oldest record without consuming it.
    ///
    /// Repeated calls without an intervening pop return the same bytes.
    fn peek(&mut self) -> Option<&[u8]>;
}
