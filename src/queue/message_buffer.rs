//! Module: message_buffer
//!
//! Purpose: Length-framed byte ring that stores whole variable-length records.
//!
//! Architecture:
//! ```text
//!  read_pos                         write_pos
//!     │                                 │
//!     ▼                                 ▼
//!   [len][payload....][len][payload.][ free ........ ]
//!    1B    len bytes    1B
//! ```
//! - Each record costs `len + FRAME_HEADER_LEN` bytes of the ring.
//! - Send is all-or-nothing: a record either fits whole or is refused.
//! - Receive hands back exactly one record, in FIFO order.
//! - Nothing blocks: every call completes immediately or reports failure.
//!
//! Safety: Safe. No unsafe blocks. Exclusive access through `&mut self`.

use super::error::StoreError;

/// Bytes of framing in front of every record.
pub const FRAME_HEADER_LEN: usize = 1;

/// Longest record a one-byte frame header can describe.
pub const MAX_RECORD_LEN: usize = u8::MAX as usize;

/// Non-blocking record store over a fixed `N`-byte ring.
pub struct MessageBuffer<const N: usize> {
    data: [u8; N],
    /// Offset of the oldest frame header.
    read_pos: usize,
    /// Bytes occupied by frames (headers + payloads).
    used: usize,
    /// Number of buffered records.
    records: usize,
}

impl<const N: usize> MessageBuffer<N> {
    /// Create an empty store.
    pub const fn new() -> Self {
        const { assert!(N > FRAME_HEADER_LEN, "Store must hold at least one frame") };

        Self {
            data: [0u8; N],
            read_pos: 0,
            used: 0,
            records: 0,
        }
    }

    /// Append one whole record.
    ///
    /// Fails without writing anything if the frame does not fit.
    pub fn send(&mut self, record: &[u8]) -> Result<(), StoreError> {
        if record.len() > MAX_RECORD_LEN {
            return Err(StoreError::TooLong);
        }
        if record.len() + FRAME_HEADER_LEN > self.free() {
            return Err(StoreError::Full);
        }

        let header = self.write_pos();
        self.data[header] = record.len() as u8;
        self.copy_in((header + FRAME_HEADER_LEN) % N, record);

        self.used += record.len() + FRAME_HEADER_LEN;
        self.records += 1;
        Ok(())
    }

    /// Copy the oldest record into `out` and remove it.
    ///
    /// If `out` is too short the record stays buffered.
    pub fn receive(&mut self, out: &mut [u8]) -> Result<usize, StoreError> {
        let len = self.next_len().ok_or(StoreError::Empty)?;
        if out.len() < len {
            return Err(StoreError::BufferTooSmall);
        }

        let start = (self.read_pos + FRAME_HEADER_LEN) % N;
        let first = len.min(N - start);
        out[..first].copy_from_slice(&self.data[start..start + first]);
        out[first..len].copy_from_slice(&self.data[..len - first]);

        self.release(len);
        Ok(len)
    }

    /// Drop the oldest record without copying it out.
    ///
    /// Returns its payload length, or `None` if the store is empty.
    pub fn discard(&mut self) -> Option<usize> {
        let len = self.next_len()?;
        self.release(len);
        Some(len)
    }

    /// Payload length of the oldest record.
    #[inline]
    pub fn next_len(&self) -> Option<usize> {
        if self.records == 0 {
            None
        } else {
            Some(self.data[self.read_pos] as usize)
        }
    }

    /// Discard every buffered record.
    pub fn reset(&mut self) {
        self.read_pos = 0;
        self.used = 0;
        self.records = 0;
    }

    /// Number of buffered records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records
    }

    /// Check if no record is buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Bytes occupied, framing included.
    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    /// Bytes still free, framing included.
    #[inline]
    pub fn free(&self) -> usize {
        N - self.used
    }

    /// Total ring size in bytes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    fn write_pos(&self) -> usize {
        (self.read_pos + self.used) % N
    }

    fn copy_in(&mut self, pos: usize, bytes: &[u8]) {
        let first = bytes.len().min(N - pos);
        self.data[pos..pos + first].copy_from_slice(&bytes[..first]);
        self.data[..bytes.len() - first].copy_from_slice(&bytes[first..]);
    }

    fn release(&mut self, len: usize) {
        self.read_pos = (self.read_pos + len + FRAME_HEADER_LEN) % N;
        self.used -= len + FRAME_HEADER_LEN;
        self.records -= 1;

        if self.records == 0 {
            // Rewind so the next records are laid out contiguously
            self.read_pos = 0;
        }
    }
}

impl<const N: usize> Default for MessageBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_receive_fifo() {
        let mut store = MessageBuffer::<32>::new();

        store.send(b"G0 X1").unwrap();
        store.send(b"G0 Y2").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.used(), 12);

        let mut out = [0u8; 16];
        let n = store.receive(&mut out).unwrap();
        assert_eq!(&out[..n], b"G0 X1");
        let n = store.receive(&mut out).unwrap();
        assert_eq!(&out[..n], b"G0 Y2");

        assert_eq!(store.receive(&mut out), Err(StoreError::Empty));
        assert_eq!(store.used(), 0);
    }

    #[test]
    fn test_send_refuses_when_frame_does_not_fit() {
        let mut store = MessageBuffer::<8>::new();

        store.send(b"abcd").unwrap(); // 5 bytes used
        assert_eq!(store.send(b"xyz"), Err(StoreError::Full)); // needs 4, 3 free
        assert_eq!(store.len(), 1);
        assert_eq!(store.used(), 5);

        store.send(b"xy").unwrap(); // exactly fills
        assert_eq!(store.free(), 0);
    }

    #[test]
    fn test_wrap_around_keeps_records_intact() {
        let mut store = MessageBuffer::<10>::new();
        let mut out = [0u8; 10];

        store.send(b"1234").unwrap();
        store.send(b"ab").unwrap();
        assert_eq!(store.receive(&mut out), Ok(4));

        // Header lands at offset 8, payload wraps to the start
        store.send(b"WXYZ").unwrap();
        assert_eq!(store.receive(&mut out), Ok(2));
        assert_eq!(&out[..2], b"ab");
        assert_eq!(store.receive(&mut out), Ok(4));
        assert_eq!(&out[..4], b"WXYZ");
        assert!(store.is_empty());
    }

    #[test]
    fn test_zero_length_record_is_not_empty() {
        let mut store = MessageBuffer::<4>::new();

        store.send(b"").unwrap();
        assert!(!store.is_empty());
        assert_eq!(store.next_len(), Some(0));

        let mut out = [0u8; 4];
        assert_eq!(store.receive(&mut out), Ok(0));
        assert!(store.is_empty());
    }

    #[test]
    fn test_too_long_record_rejected() {
        let mut store = MessageBuffer::<512>::new();
        let big = [b'x'; MAX_RECORD_LEN + 1];

        assert_eq!(store.send(&big), Err(StoreError::TooLong));
        assert!(store.send(&big[..MAX_RECORD_LEN]).is_ok());
    }

    #[test]
    fn test_short_output_buffer_leaves_record() {
        let mut store = MessageBuffer::<16>::new();
        store.send(b"hello").unwrap();

        let mut small = [0u8; 3];
        assert_eq!(store.receive(&mut small), Err(StoreError::BufferTooSmall));
        assert_eq!(store.len(), 1);

        let mut out = [0u8; 5];
        assert_eq!(store.receive(&mut out), Ok(5));
    }

    #[test]
    fn test_discard_and_reset() {
        let mut store = MessageBuffer::<16>::new();
        store.send(b"one").unwrap();
        store.send(b"three").unwrap();

        assert_eq!(store.discard(), Some(3));
        assert_eq!(store.next_len(), Some(5));

        store.reset();
        assert!(store.is_empty());
        assert_eq!(store.free(), 16);
        assert_eq!(store.discard(), None);
    }
}
