//! Queue and record store error types

/// Record store failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// S01: Not enough free bytes for the whole record
    Full,
    /// S02: Record longer than a frame can describe
    TooLong,
    /// S03: No record buffered
    Empty,
    /// S04: Output buffer shorter than the next record
    BufferTooSmall,
}

impl StoreError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Full => "S01",
            Self::TooLong => "S02",
            Self::Empty => "S03",
            Self::BufferTooSmall => "S04",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::Full => "store full",
            Self::TooLong => "record too long",
            Self::Empty => "store empty",
            Self::BufferTooSmall => "buffer too small",
        }
    }
}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// Queue push failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// Q01: No free line slot, tag slot or byte budget (retry later or drop)
    Full,
    /// Q02: Store refused a record the accounting had admitted.
    ///
    /// The accounting and the store disagree; the queue state is unchanged.
    StoreRejected(StoreError),
}

impl QueueError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Full => "Q01",
            Self::StoreRejected(_) => "Q02",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::Full => "queue full",
            Self::StoreRejected(_) => "store rejected admitted record",
        }
    }

    /// True for the recoverable admission rejection
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full)
    }
}

impl core::fmt::Display for QueueError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => write!(f, "{}: {}", self.code(), self.message()),
            Self::StoreRejected(e) => write!(f, "{}: {} ({})", self.code(), self.message(), e),
        }
    }
}

impl From<StoreError> for QueueError {
    fn from(e: StoreError) -> Self {
        QueueError::StoreRejected(e)
    }
}
