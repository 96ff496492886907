//! Flow-controlled command queues.
//!
//! Bounded FIFOs of variable-length byte records that enforce a line budget
//! and a byte budget at the same time, with non-destructive peek separated
//! from pop. Everything here is non-blocking and allocation-free.
//!
//! - [`MessageBuffer`]: length-framed record store
//! - [`SizedQueue`]: byte-backed [`RecordQueue`]
//! - [`CountingQueue`]: accounting-only [`Counter`]
//! - [`TaggedQueue`]: records paired with originator tags for ack matching
//!
//! None of these types synchronize internally. One writer and one reader,
//! serialized by the caller.

pub mod counter;
pub mod counting;
pub mod error;
pub mod message_buffer;
pub mod sized;
pub mod tagged;

pub use counter::{Counter, RecordQueue};
pub use counting::CountingQueue;
pub use error::{QueueError, StoreError};
pub use message_buffer::MessageBuffer;
pub use sized::SizedQueue;
pub use tagged::{Message, TaggedQueue, TAG_QUEUE_SIZE};

/// Budget bytes charged per record on top of its payload.
///
/// Matches the store's frame header, so the byte budget equals the store's
/// physical occupancy.
pub const RECORD_OVERHEAD: usize = message_buffer::FRAME_HEADER_LEN;
