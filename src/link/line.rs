//! Line assembly for serial input

/// Accumulates bytes into one newline-terminated line
///
/// `'\r'` is dropped, bytes past `N` are discarded (the line is marked
/// truncated) until the terminating `'\n'`.
pub struct LineBuffer<const N: usize> {
    buf: [u8; N],
    len: usize,
    truncated: bool,
}

impl<const N: usize> LineBuffer<N> {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            len: 0,
            truncated: false,
        }
    }

    /// Feed one byte
    ///
    /// Returns true when `byte` completed a line. The line stays available
    /// through [`as_bytes`](Self::as_bytes) until [`clear`](Self::clear).
    pub fn feed(&mut self, byte: u8) -> bool {
        match byte {
            b'\n' => true,
            b'\r' => false,
            _ => {
                self.push(byte);
                false
            }
        }
    }

    /// Append a byte, dropping it if the buffer is full
    pub fn push(&mut self, c: u8) {
        if self.len < N {
            self.buf[self.len] = c;
            self.len += 1;
        } else {
            self.truncated = true;
        }
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Get buffer as string slice (empty if not UTF-8)
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if bytes were dropped since the last clear
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
