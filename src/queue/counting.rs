//! Module: counting
//!
//! Purpose: Counting-only queue. Tracks record lengths and the byte budget
//! for admission control while the payload lives somewhere else (for example
//! already on the wire, inside the peer's receive buffer).
//!
//! Implements [`Counter`] but not [`RecordQueue`](super::RecordQueue): it can
//! report the oldest record's length, never its bytes.
//!
//! Safety: Safe. Single writer, single reader; callers serialize access.

use heapless::Deque;

use super::counter::Counter;
use super::error::QueueError;

/// Bounded FIFO of record lengths with a byte budget.
///
/// Each record charges `len + SUFFIX_LEN` bytes, where `SUFFIX_LEN` accounts
/// for a terminator the payload travels with (a `'\n'` on a serial line).
/// Records are never truncated.
pub struct CountingQueue<
    const LEN_LINES: usize = 16,
    const LEN_BYTES: usize = 128,
    const SUFFIX_LEN: usize = 1,
> {
    lengths: Deque<usize, LEN_LINES>,
    free_bytes: usize,
}

impl<const LEN_LINES: usize, const LEN_BYTES: usize, const SUFFIX_LEN: usize>
    CountingQueue<LEN_LINES, LEN_BYTES, SUFFIX_LEN>
{
    /// Create an empty queue with both budgets at maximum.
    pub const fn new() -> Self {
        Self {
            lengths: Deque::new(),
            free_bytes: LEN_BYTES,
        }
    }

    /// Admit a record known only by its length.
    pub fn push_len(&mut self, len: usize) -> Result<usize, QueueError> {
        if !self.can_push(len) {
            return Err(QueueError::Full);
        }

        self.lengths.push_back(len).map_err(|_| QueueError::Full)?;
        self.free_bytes -= len + SUFFIX_LEN;
        Ok(len)
    }
}

impl<const LEN_LINES: usize, const LEN_BYTES: usize, const SUFFIX_LEN: usize> Counter
    for CountingQueue<LEN_LINES, LEN_BYTES, SUFFIX_LEN>
{
    fn clear(&mut self) {
        self.lengths.clear();
        self.free_bytes = LEN_BYTES;
    }

    fn can_push(&self, len: usize) -> bool {
        !self.lengths.is_full() && len.checked_add(SUFFIX_LEN).is_some_and(|charged| self.free_bytes > charged)
    }

    fn push(&mut self, record: &[u8]) -> Result<usize, QueueError> {
        self.push_len(record.len())
    }

    #[inline]
    fn size(&self) -> usize {
        self.lengths.len()
    }

    #[inline]
    fn free_lines(&self) -> usize {
        LEN_LINES - self.lengths.len()
    }

    #[inline]
    fn bytes(&self) -> usize {
        LEN_BYTES - self.free_bytes
    }

    #[inline]
    fn free_bytes(&self) -> usize {
        self.free_bytes
    }

    fn peek_len(&mut self) -> Option<usize> {
        self.lengths.front().copied()
    }

    fn pop(&mut self) -> bool {
        match self.lengths.pop_front() {
            Some(len) => {
                self.free_bytes += len + SUFFIX_LEN;
                true
            }
            None => false,
        }
    }
}

impl<const LEN_LINES: usize, const LEN_BYTES: usize, const SUFFIX_LEN: usize> Default
    for CountingQueue<LEN_LINES, LEN_BYTES, SUFFIX_LEN>
{
    fn default() -> Self {
        Self::new()
    }
}
