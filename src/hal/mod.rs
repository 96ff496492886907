//! Hardware Abstraction Layer for the jog pendant.
//!
//! Thin wrappers around ESP-IDF peripherals.
//! Jog logic and queues stay in core modules, HAL is just I/O.

pub mod encoder;
pub mod serial;

pub use encoder::EncoderIsr;
pub use serial::{read_available, timestamp_us};
