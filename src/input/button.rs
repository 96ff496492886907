//! Debounced push buttons.

/// One debounced button.
///
/// The raw level must hold for the debounce time before it is accepted.
/// A press is reported once, on the accepted released-to-pressed edge.
#[derive(Debug)]
pub struct Button {
    debounce_us: i64,
    pressed: bool,
    candidate: bool,
    since_us: i64,
}

impl Button {
    /// Released button with the given debounce time.
    pub const fn new(debounce_us: i64) -> Self {
        Self {
            debounce_us,
            pressed: false,
            candidate: false,
            since_us: 0,
        }
    }

    /// Sample the raw state. Returns true on an accepted press.
    pub fn update(&mut self, now_us: i64, raw_pressed: bool) -> bool {
        if raw_pressed != self.candidate {
            self.candidate = raw_pressed;
            self.since_us = now_us;
            return false;
        }

        if self.candidate == self.pressed || now_us - self.since_us < self.debounce_us {
            return false;
        }

        self.pressed = self.candidate;
        self.pressed
    }

    /// Debounced state.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

/// Pressed state of an active-low input.
#[inline]
pub fn active_low(level_high: bool) -> bool {
    !level_high
}
