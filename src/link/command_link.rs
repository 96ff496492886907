//! Module: command_link
//!
//! Purpose: Stream command lines to the controller with flow control and
//! match every acknowledgment back to the originator of the command.
//!
//! Architecture:
//! ```text
//!  submit(cmd, tag)                poll_send()                 on_rx_byte()
//!        │                              │                            │
//!        ▼                              ▼                            ▼
//!  ┌──────────────┐   oldest    ┌──────────────────┐  "ok"   ┌──────────────┐
//!  │ outbox       │ ──────────▶ │ window (Counter)  │ ◀────── │ LineBuffer   │
//!  │ TaggedQueue  │  if window  │ inflight tags     │ "error" │ + classify   │
//!  └──────────────┘   admits    └──────────────────┘         └──────────────┘
//!                          │                              │
//!                          ▼                              ▼
//!                     LinkTx write                 LinkEvent::Ack { tag }
//! ```
//! - The window accounts `len + terminator` for every line on the wire. With
//!   one line it enforces a single outstanding, unacknowledged command.
//! - Acknowledgments arrive in command order, so the oldest in-flight tag
//!   belongs to each `ok` / `error`.
//! - No retries: a failed write leaves the command at the head of the outbox.
//!
//! Safety: Safe. Driven from the single polling loop.

use heapless::Deque;

use crate::config::{LINE_TERMINATOR, RESPONSE_LINE_LEN};
use crate::log_globals::LOG_STREAM;
use crate::logging::LogSource;
use crate::queue::{Counter, Message, QueueError, TaggedQueue};
use crate::{rt_debug, rt_error, rt_trace, rt_warn};

use super::line::LineBuffer;
use super::response::{classify, AckOutcome, Response};

/// Byte sink towards the controller.
///
/// Implementations should not block for long; a UART driver with a TX FIFO
/// is the expected backend.
pub trait LinkTx {
    /// Transport failure.
    type Error;

    /// Write all of `bytes`.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// Something the controller told us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent<'a, T> {
    /// The oldest in-flight command was acknowledged.
    Ack {
        tag: &'a T,
        outcome: AckOutcome,
        /// Length of the acknowledged command.
        len: usize,
    },
    /// An acknowledgment arrived with nothing in flight.
    Spurious(AckOutcome),
    /// A non-empty line that is not an acknowledgment.
    Unsolicited,
}

/// A command on the wire awaiting its acknowledgment.
struct InFlight<'a, T> {
    tag: &'a T,
    len: usize,
    /// The window accounted for this command and must release it.
    windowed: bool,
}

/// Link counters since start (or the last [`CommandLink::reset_stats`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Commands admitted to the outbox.
    pub submitted: u32,
    /// Commands refused by the outbox.
    pub rejected: u32,
    /// Commands written to the controller.
    pub sent: u32,
    /// `ok` acknowledgments matched.
    pub acked_ok: u32,
    /// `error` acknowledgments matched.
    pub acked_error: u32,
    /// Acknowledgments with nothing in flight.
    pub spurious: u32,
    /// Transport write failures.
    pub tx_errors: u32,
}

/// Flow-controlled, acknowledgment-correlating command link.
///
/// - `T`: originator type; tags are `&'a T` and must outlive their commands
/// - `W`: window accounting for lines on the wire
/// - `OUTBOX_BYTES`: outbox store size
/// - `MAX_LINE_LEN`: command truncation bound
/// - `INFLIGHT`: tag slots for commands on the wire
pub struct CommandLink<
    'a,
    T,
    W: Counter,
    const OUTBOX_BYTES: usize,
    const MAX_LINE_LEN: usize,
    const INFLIGHT: usize,
> {
    outbox: TaggedQueue<'a, T, OUTBOX_BYTES, MAX_LINE_LEN>,
    window: W,
    inflight: Deque<InFlight<'a, T>, INFLIGHT>,
    rx_line: LineBuffer<RESPONSE_LINE_LEN>,
    stats: LinkStats,
}

impl<'a, T, W, const OUTBOX_BYTES: usize, const MAX_LINE_LEN: usize, const INFLIGHT: usize>
    CommandLink<'a, T, W, OUTBOX_BYTES, MAX_LINE_LEN, INFLIGHT>
where
    W: Counter,
{
    /// Create an idle link around an empty window.
    pub fn new(window: W) -> Self {
        Self {
            outbox: TaggedQueue::new(),
            window,
            inflight: Deque::new(),
            rx_line: LineBuffer::new(),
            stats: LinkStats::default(),
        }
    }

    /// Check whether a command of `len` bytes would be admitted.
    pub fn can_submit(&self, len: usize) -> bool {
        self.outbox.can_push(len)
    }

    /// Queue a command for sending.
    ///
    /// Returns the stored length (commands over `MAX_LINE_LEN` are cut).
    pub fn submit(&mut self, now_us: i64, cmd: &[u8], tag: &'a T) -> Result<usize, QueueError> {
        let pushed = if self.outbox.can_push(cmd.len()) {
            self.outbox.push(Message::new(cmd, tag))
        } else {
            Err(QueueError::Full)
        };

        match pushed {
            Ok(len) => {
                self.stats.submitted += 1;
                if len < cmd.len() {
                    rt_warn!(LOG_STREAM, LogSource::Link, now_us, "cmd cut {} -> {}", cmd.len(), len);
                }
                Ok(len)
            }
            Err(e) => {
                self.stats.rejected += 1;
                rt_debug!(LOG_STREAM, LogSource::Link, now_us, "submit refused: {}", e);
                Err(e)
            }
        }
    }

    /// Send queued commands while the window admits them.
    ///
    /// Returns the number of commands written. On a transport error the
    /// failed command stays first in the outbox.
    pub fn poll_send<X: LinkTx>(&mut self, now_us: i64, tx: &mut X) -> Result<usize, X::Error> {
        let mut sent = 0;

        while let Some(msg) = self.outbox.peek() {
            if self.inflight.is_full() || !self.window.can_push(msg.len()) {
                break;
            }

            let written = tx.write_all(msg.data).and_then(|()| tx.write_all(LINE_TERMINATOR));
            if let Err(e) = written {
                self.stats.tx_errors += 1;
                rt_error!(LOG_STREAM, LogSource::Link, now_us, "tx failed, {} queued", self.outbox.count());
                return Err(e);
            }

            // The line is on the wire: track it even if the window refuses it
            let windowed = match self.window.push(msg.data) {
                Ok(_) => true,
                Err(e) => {
                    rt_error!(LOG_STREAM, LogSource::Link, now_us, "window out of sync: {}", e);
                    false
                }
            };
            let entry = InFlight {
                tag: msg.tag,
                len: msg.len(),
                windowed,
            };
            // Cannot fail, checked before writing
            let _ = self.inflight.push_back(entry);

            rt_trace!(
                LOG_STREAM,
                LogSource::Link,
                now_us,
                "tx {}",
                core::str::from_utf8(msg.data).unwrap_or("<binary>")
            );

            self.outbox.pop();
            self.stats.sent += 1;
            sent += 1;

            if !windowed {
                break;
            }
        }

        Ok(sent)
    }

    /// Feed one byte received from the controller.
    ///
    /// Returns an event when the byte completed a line.
    pub fn on_rx_byte(&mut self, now_us: i64, byte: u8) -> Option<LinkEvent<'a, T>> {
        if !self.rx_line.feed(byte) {
            return None;
        }

        let response = classify(self.rx_line.as_bytes());
        let empty = self.rx_line.is_empty();
        if let Response::Other = response {
            if !empty {
                rt_trace!(LOG_STREAM, LogSource::Link, now_us, "rx {}", self.rx_line.as_str());
            }
        }
        self.rx_line.clear();

        match response {
            Response::Ack(outcome) => Some(self.acknowledge(now_us, outcome)),
            Response::Other if empty => None,
            Response::Other => Some(LinkEvent::Unsolicited),
        }
    }

    /// Feed a chunk of received bytes, handing every event to `on_event`.
    pub fn on_rx<F>(&mut self, now_us: i64, bytes: &[u8], mut on_event: F)
    where
        F: FnMut(LinkEvent<'a, T>),
    {
        for &byte in bytes {
            if let Some(event) = self.on_rx_byte(now_us, byte) {
                on_event(event);
            }
        }
    }

    fn acknowledge(&mut self, now_us: i64, outcome: AckOutcome) -> LinkEvent<'a, T> {
        let Some(entry) = self.inflight.pop_front() else {
            self.stats.spurious += 1;
            rt_warn!(LOG_STREAM, LogSource::Link, now_us, "ack with nothing in flight: {:?}", outcome);
            return LinkEvent::Spurious(outcome);
        };

        if entry.windowed {
            self.window.pop();
        }

        match outcome {
            AckOutcome::Ok => self.stats.acked_ok += 1,
            AckOutcome::Error(code) => {
                self.stats.acked_error += 1;
                rt_warn!(LOG_STREAM, LogSource::Link, now_us, "controller error {:?}", code);
            }
        }

        LinkEvent::Ack {
            tag: entry.tag,
            outcome,
            len: entry.len,
        }
    }

    /// Forget every queued and in-flight command (after a controller reset).
    pub fn clear(&mut self) {
        self.outbox.clear();
        self.window.clear();
        self.inflight.clear();
        self.rx_line.clear();
    }

    /// Commands waiting to be sent.
    #[inline]
    pub fn pending(&self) -> usize {
        self.outbox.count()
    }

    /// Commands on the wire awaiting acknowledgment.
    #[inline]
    pub fn in_flight(&self) -> usize {
        self.inflight.len()
    }

    /// Check if nothing is queued or awaiting acknowledgment.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.outbox.is_empty() && self.inflight.is_empty()
    }

    /// Window accounting.
    #[inline]
    pub fn window(&self) -> &W {
        &self.window
    }

    /// Counters.
    #[inline]
    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    /// Zero the counters.
    pub fn reset_stats(&mut self) {
        self.stats = LinkStats::default();
    }
}
