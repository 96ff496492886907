//! Global log stream instance.
//!
//! The pendant runs a single polling loop, so one stream serves every
//! subsystem; [`LogSource`](crate::logging::LogSource) tells them apart.

use crate::logging::LogStream;

/// Log stream written by the link and pendant glue, drained by the main loop.
pub static LOG_STREAM: LogStream = LogStream::new();
