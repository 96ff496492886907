//! # JogPendant
//!
//! Handheld jog pendant for a GRBL-style motion controller.
//!
//! ## Architecture
//!
//! Every command reaches the controller through one [`CommandLink`]:
//! - Jog wheel moves and forwarded host lines are queued with an origin tag
//! - A flow-control window limits what is on the wire unacknowledged
//! - Each `ok` / `error` is matched back to the command's origin
//!
//! The queues in [`queue`] are allocation-free and non-blocking.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod input;
pub mod jog;
pub mod link;
pub mod log_globals;
pub mod logging;
pub mod pendant;
pub mod queue;
pub mod uart_logger;

#[cfg(target_os = "espidf")]
pub mod hal;

pub use jog::{jog_command, Direction, JogAxis, JogStep};
pub use link::{CommandLink, LinkEvent, LinkTx};
pub use pendant::{HostBridge, Origin, Pendant, PendantInputs};
pub use queue::{Counter, CountingQueue, QueueError, RecordQueue, SizedQueue, TaggedQueue};
