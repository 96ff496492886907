//! Module: encoder
//!
//! Purpose: Quadrature decoding of the jog wheel.
//!
//! Architecture:
//! ```text
//! A edge ISR ──▶ on_change ──▶ QuadratureDecoder (AtomicI32 count)
//!                                        │
//!                                        ▼ count()
//! main loop ──────────────────▶ EncoderTracker ──▶ Direction per change
//! ```
//! Counts on both edges of channel A. Direction comes from B at that edge:
//! rising A with B high or falling A with B low is positive.
//!
//! Safety: Lock-free. `on_change` may run in interrupt context while the
//! main loop reads `count`.

use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use crate::jog::Direction;

/// Edge counter shared between the pin handler and the main loop.
pub struct QuadratureDecoder {
    count: AtomicI32,
    last_a: AtomicBool,
}

impl QuadratureDecoder {
    /// Decoder at count zero with channel A low.
    pub const fn new() -> Self {
        Self {
            count: AtomicI32::new(0),
            last_a: AtomicBool::new(false),
        }
    }

    /// Record the current channel levels.
    ///
    /// Calls without an A transition are ignored, so this can be driven
    /// either from a pin interrupt or by polling.
    pub fn on_change(&self, a: bool, b: bool) {
        let last = self.last_a.swap(a, Ordering::Relaxed);
        if a == last {
            return;
        }

        let positive = a == b;
        let delta = if positive { 1 } else { -1 };
        self.count.fetch_add(delta, Ordering::Relaxed);
    }

    /// Take `a` as the current channel A level without counting.
    pub fn sync_level(&self, a: bool) {
        self.last_a.store(a, Ordering::Relaxed);
    }

    /// Net edge count.
    #[inline]
    pub fn count(&self) -> i32 {
        self.count.load(Ordering::Relaxed)
    }
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns count changes into single jog steps.
///
/// Any change since the last poll is one step in the direction of the
/// change, regardless of its magnitude.
#[derive(Debug, Default)]
pub struct EncoderTracker {
    last: i32,
}

impl EncoderTracker {
    /// Tracker starting from `count`.
    pub const fn new(count: i32) -> Self {
        Self { last: count }
    }

    /// Compare against the last seen count.
    pub fn poll(&mut self, count: i32) -> Option<Direction> {
        let delta = count.wrapping_sub(self.last);
        self.last = count;

        match delta {
            0 => None,
            d if d > 0 => Some(Direction::Positive),
            _ => Some(Direction::Negative),
        }
    }
}
