//! Module: tagged
//!
//! Purpose: Record queue whose entries carry a tag naming their originator, so
//! an acknowledgment arriving later can be matched back to whoever queued the
//! record.
//!
//! Architecture:
//! ```text
//!            ┌──────────────────────────────┐
//!  push ───▶ │ MessageBuffer<SIZE>  (bytes)  │ ──▶ peek cache ──┐
//!            │ Deque<&'a T, TAGS>   (tags)   │ ─────────────────┴──▶ pop → &'a T
//!            └──────────────────────────────┘
//! ```
//! - One tag per record, in lockstep: a push enqueues both or neither.
//! - Byte usage is read from the store (plus the cached record), never
//!   shadowed in a separate counter.
//!
//! Tags are shared borrows: the referent must outlive every queue entry that
//! carries it. The queue never owns or drops an originator.
//!
//! Safety: Safe. Single writer, single reader; callers serialize access.

use heapless::Deque;

use super::error::{QueueError, StoreError};
use super::message_buffer::{MessageBuffer, MAX_RECORD_LEN};
use super::RECORD_OVERHEAD;

/// Default number of tag slots.
pub const TAG_QUEUE_SIZE: usize = 50;

/// A record together with its originator tag.
#[derive(Debug)]
pub struct Message<'m, 'a, T> {
    pub data: &'m [u8],
    pub tag: &'a T,
}

impl<'m, 'a, T> Message<'m, 'a, T> {
    /// Create a message.
    pub const fn new(data: &'m [u8], tag: &'a T) -> Self {
        Self { data, tag }
    }

    /// Payload length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the payload is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Clone for Message<'_, '_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Message<'_, '_, T> {}

/// Bounded FIFO of tagged byte records.
///
/// `SIZE` bounds the bytes held (each record costs `len + RECORD_OVERHEAD`),
/// `TAGS` bounds the number of records.
pub struct TaggedQueue<
    'a,
    T,
    const SIZE: usize,
    const MAX_LINE_LEN: usize = 100,
    const TAGS: usize = { TAG_QUEUE_SIZE },
> {
    store: MessageBuffer<SIZE>,
    tags: Deque<&'a T, TAGS>,
    peeked: [u8; MAX_LINE_LEN],
    peeked_len: Option<usize>,
}

impl<'a, T, const SIZE: usize, const MAX_LINE_LEN: usize, const TAGS: usize>
    TaggedQueue<'a, T, SIZE, MAX_LINE_LEN, TAGS>
{
    /// Create an empty queue.
    pub const fn new() -> Self {
        const { assert!(MAX_LINE_LEN <= MAX_RECORD_LEN, "Line bound exceeds frame limit") };

        Self {
            store: MessageBuffer::new(),
            tags: Deque::new(),
            peeked: [0u8; MAX_LINE_LEN],
            peeked_len: None,
        }
    }

    /// Drop every record and tag.
    pub fn clear(&mut self) {
        self.store.reset();
        self.tags.clear();
        self.peeked_len = None;
    }

    /// Check whether a record of `len` bytes would be admitted.
    pub fn can_push(&self, len: usize) -> bool {
        let len = len.min(MAX_LINE_LEN);
        len + RECORD_OVERHEAD < self.available() && !self.tags.is_full()
    }

    /// Check whether `msg` would be admitted.
    pub fn can_push_message(&self, msg: &Message<'_, 'a, T>) -> bool {
        self.can_push(msg.len())
    }

    /// Queue a record with its tag.
    ///
    /// Payloads longer than `MAX_LINE_LEN` are truncated; returns the stored
    /// length. Fails with [`QueueError::Full`] when either the tag slots or
    /// the store are exhausted, leaving the queue unchanged.
    pub fn push(&mut self, msg: Message<'_, 'a, T>) -> Result<usize, QueueError> {
        let len = msg.len().min(MAX_LINE_LEN);
        // The store does not see the peek cache, the byte bound does
        if len + RECORD_OVERHEAD > self.available() {
            return Err(QueueError::Full);
        }

        self.tags.push_back(msg.tag).map_err(|_| QueueError::Full)?;
        if let Err(e) = self.store.send(&msg.data[..len]) {
            // Keep tags and records in lockstep
            self.tags.pop_back();
            return Err(match e {
                StoreError::Full => QueueError::Full,
                other => QueueError::StoreRejected(other),
            });
        }

        Ok(len)
    }

    /// Number of queued records.
    #[inline]
    pub fn count(&self) -> usize {
        self.tags.len()
    }

    /// Bytes in use, framing included.
    #[inline]
    pub fn size(&self) -> usize {
        let cached = self.peeked_len.map_or(0, |len| len + RECORD_OVERHEAD);
        self.store.used() + cached
    }

    /// Bytes still free.
    #[inline]
    pub fn available(&self) -> usize {
        SIZE.saturating_sub(self.size())
    }

    /// Check if no record is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// View the oldest record and its tag without consuming them.
    pub fn peek(&mut self) -> Option<Message<'_, 'a, T>> {
        let tag = *self.tags.front()?;
        let len = self.load()?;
        Some(Message {
            data: &self.peeked[..len],
            tag,
        })
    }

    /// Consume the oldest record, returning its tag.
    pub fn pop(&mut self) -> Option<&'a T> {
        if self.tags.is_empty() {
            return None;
        }

        let released = match self.peeked_len.take() {
            Some(len) => Some(len),
            None => self.store.discard(),
        };

        debug_assert!(released.is_some(), "tags queued without a stored record");
        match released {
            Some(_) => self.tags.pop_front(),
            None => {
                // Tags claim a record the store does not have
                self.clear();
                None
            }
        }
    }

    fn load(&mut self) -> Option<usize> {
        if self.peeked_len.is_none() {
            self.peeked_len = self.store.receive(&mut self.peeked).ok();
        }
        self.peeked_len
    }
}

impl<'a, T, const SIZE: usize, const MAX_LINE_LEN: usize, const TAGS: usize> Default
    for TaggedQueue<'a, T, SIZE, MAX_LINE_LEN, TAGS>
{
    fn default() -> Self {
        Self::new()
    }
}
