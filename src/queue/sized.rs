//! Module: sized
//!
//! Purpose: Byte-backed command queue. Stores record payloads in a
//! [`MessageBuffer`] and enforces a line budget and a byte budget at once.
//!
//! Architecture:
//! ```text
//!  push ──▶ [ MessageBuffer<LEN_BYTES> ] ──▶ peek cache ──▶ pop
//!            oldest ... newest            (one record)
//!
//!  free_lines : LEN_LINES - records held (store + cache)
//!  free_bytes : LEN_BYTES - Σ(len + RECORD_OVERHEAD)
//! ```
//! - A peeked record moves from the store into the cache; it keeps its
//!   line slot and byte charge until popped.
//! - Pop without peek drops the oldest record straight from the store.
//! - Counters change only after the store has accepted or released a record.
//!
//! Safety: Safe. Single writer, single reader; callers serialize access.

use super::counter::{Counter, RecordQueue};
use super::error::QueueError;
use super::message_buffer::{MessageBuffer, MAX_RECORD_LEN};
use super::RECORD_OVERHEAD;

/// Bounded FIFO of byte records with a line budget and a byte budget.
///
/// Records longer than `MAX_LINE_LEN` are truncated to `MAX_LINE_LEN` bytes
/// before they are stored; `push` reports the stored length.
///
/// # Example
///
/// ```ignore
/// let mut queue: SizedQueue<16, 128, 100> = SizedQueue::new();
///
/// queue.push(b"$J=G91 F100 X0.1")?;
///
/// if let Some(cmd) = queue.peek() {
///     uart.write(cmd);
///     queue.pop();
/// }
/// ```
pub struct SizedQueue<
    const LEN_LINES: usize = 16,
    const LEN_BYTES: usize = 128,
    const MAX_LINE_LEN: usize = 100,
> {
    store: MessageBuffer<LEN_BYTES>,
    free_lines: usize,
    free_bytes: usize,
    peeked: [u8; MAX_LINE_LEN],
    /// Length of the cached record; `None` when nothing is cached.
    peeked_len: Option<usize>,
}

impl<const LEN_LINES: usize, const LEN_BYTES: usize, const MAX_LINE_LEN: usize>
    SizedQueue<LEN_LINES, LEN_BYTES, MAX_LINE_LEN>
{
    /// Create an empty queue with both budgets at maximum.
    pub const fn new() -> Self {
        const {
            assert!(LEN_LINES > 0, "Queue needs at least one line slot");
            assert!(MAX_LINE_LEN <= MAX_RECORD_LEN, "Line bound exceeds frame limit");
        };

        Self {
            store: MessageBuffer::new(),
            free_lines: LEN_LINES,
            free_bytes: LEN_BYTES,
            peeked: [0u8; MAX_LINE_LEN],
            peeked_len: None,
        }
    }

    /// Check if the oldest record has been loaded into the peek cache.
    #[inline]
    pub fn has_peeked(&self) -> bool {
        self.peeked_len.is_some()
    }

    /// Load the oldest record into the cache if it is not there yet.
    fn load(&mut self) -> Option<usize> {
        if self.peeked_len.is_none() {
            // An empty store leaves the cache empty
            self.peeked_len = self.store.receive(&mut self.peeked).ok();
        }
        self.peeked_len
    }
}

impl<const LEN_LINES: usize, const LEN_BYTES: usize, const MAX_LINE_LEN: usize> Counter
    for SizedQueue<LEN_LINES, LEN_BYTES, MAX_LINE_LEN>
{
    fn clear(&mut self) {
        self.store.reset();
        self.peeked_len = None;
        self.free_lines = LEN_LINES;
        self.free_bytes = LEN_BYTES;
    }

    fn can_push(&self, len: usize) -> bool {
        let len = len.min(MAX_LINE_LEN);
        self.free_bytes > len + RECORD_OVERHEAD && self.free_lines > 0
    }

    fn push(&mut self, record: &[u8]) -> Result<usize, QueueError> {
        if !self.can_push(record.len()) {
            return Err(QueueError::Full);
        }

        let len = record.len().min(MAX_LINE_LEN);
        self.store.send(&record[..len])?;

        self.free_lines -= 1;
        self.free_bytes -= len + RECORD_OVERHEAD;
        Ok(len)
    }

    #[inline]
    fn size(&self) -> usize {
        LEN_LINES - self.free_lines
    }

    #[inline]
    fn free_lines(&self) -> usize {
        self.free_lines
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
        if self.size() == 0 {
            return None;
        }
        self.load()
    }

    fn pop(&mut self) -> bool {
        if self.size() == 0 {
            return false;
        }

        let released = match self.peeked_len.take() {
            Some(len) => Some(len),
            None => self.store.discard(),
        };

        debug_assert!(released.is_some(), "counters claim a record the store does not have");
        match released {
            Some(len) => {
                self.free_lines += 1;
                self.free_bytes += len + RECORD_OVERHEAD;
                true
            }
            None => {
                // Counters claim a record the store does not have: the store is the truth
                self.clear();
                false
            }
        }
    }
}

impl<const LEN_LINES: usize, const LEN_BYTES: usize, const MAX_LINE_LEN: usize> RecordQueue
    for SizedQueue<LEN_LINES, LEN_BYTES, MAX_LINE_LEN>
{
    fn peek(&mut self) -> Option<&[u8]> {
        let len = self.peek_len()?;
        Some(&self.peeked[..len])
    }
}

impl<const LEN_LINES: usize, const LEN_BYTES: usize, const MAX_LINE_LEN: usize> Default
    for SizedQueue<LEN_LINES, LEN_BYTES, MAX_LINE_LEN>
{
    fn default() -> Self {
        Self::new()
    }
}
