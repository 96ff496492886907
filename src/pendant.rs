//! Module: pendant
//!
//! Purpose: Turn pendant inputs into jog commands and forward host lines,
//! both through the same command link.
//!
//! Architecture:
//! ```text
//!  pot ─────▶ AxisSelector ─┐
//!  buttons ─▶ Button ×3 ────┼─▶ Pendant::tick ──▶ submit(jog, &JOG_ORIGIN) ─┐
//!  encoder ─▶ EncoderTracker┘                                              ├─▶ CommandLink
//!  host UART ─▶ HostBridge::feed ─────────────▶ submit(line, &HOST_ORIGIN) ─┘
//! ```
//! Jogs refused by a full link are dropped and counted; the wheel keeps
//! producing new ones. Acknowledgments carry the origin tag back so host
//! responses can be routed to the host only.
//!
//! Safety: Safe. Single polling loop.

use crate::config::{BUTTON_DEBOUNCE_US, JOG_FEED, MAX_LINE_LEN};
use crate::input::{AxisSelector, Button, EncoderTracker};
use crate::jog::{jog_command, JogAxis, JogCommand, JogStep};
use crate::link::{CommandLink, LineBuffer};
use crate::log_globals::LOG_STREAM;
use crate::logging::LogSource;
use crate::queue::{Counter, CountingQueue};
use crate::{config, rt_debug, rt_info, rt_warn};

/// Who submitted a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Generated from the jog wheel.
    Jog,
    /// Forwarded from the host serial port.
    Host,
}

/// Tag for jog commands.
pub static JOG_ORIGIN: Origin = Origin::Jog;

/// Tag for forwarded host lines.
pub static HOST_ORIGIN: Origin = Origin::Host;

/// Window accounting sized to the controller receive buffer.
pub type PendantWindow = CountingQueue<
    { config::WINDOW_LINES },
    { config::WINDOW_BYTES },
    { config::LINE_TERMINATOR.len() },
>;

/// The link as configured on the pendant.
pub type PendantLink = CommandLink<
    'static,
    Origin,
    PendantWindow,
    { config::OUTBOX_BYTES },
    { config::MAX_LINE_LEN },
    { config::WINDOW_LINES },
>;

/// Create the pendant link.
pub fn pendant_link() -> PendantLink {
    CommandLink::new(PendantWindow::new())
}

/// Raw input snapshot for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendantInputs {
    /// Axis pot ADC reading.
    pub pot_raw: u16,
    /// Encoder edge count.
    pub encoder_count: i32,
    /// Step buttons pressed (already converted from active low).
    pub buttons: [bool; 3],
}

/// Jog state machine.
pub struct Pendant {
    axis: AxisSelector,
    step: JogStep,
    encoder: EncoderTracker,
    buttons: [Button; 3],
    feed: u32,
    dropped: u32,
}

impl Pendant {
    /// Pendant at 0.1 mm on X with the encoder at `encoder_count`.
    pub fn new(encoder_count: i32) -> Self {
        Self {
            axis: AxisSelector::new(),
            step: JogStep::default(),
            encoder: EncoderTracker::new(encoder_count),
            buttons: [
                Button::new(BUTTON_DEBOUNCE_US),
                Button::new(BUTTON_DEBOUNCE_US),
                Button::new(BUTTON_DEBOUNCE_US),
            ],
            feed: JOG_FEED,
            dropped: 0,
        }
    }

    /// Override the jog feed rate.
    pub fn with_feed(mut self, feed: u32) -> Self {
        self.feed = feed;
        self
    }

    /// Process one input snapshot.
    ///
    /// Returns the jog that was queued, if any.
    pub fn tick<'a, W, const OB: usize, const ML: usize, const IF: usize>(
        &mut self,
        now_us: i64,
        inputs: &PendantInputs,
        link: &mut CommandLink<'a, Origin, W, OB, ML, IF>,
    ) -> Option<JogCommand>
    where
        W: Counter,
    {
        let axis = self.axis.axis();
        if self.axis.update(inputs.pot_raw) != axis {
            rt_info!(LOG_STREAM, LogSource::Pendant, now_us, "axis {}", self.axis.axis().as_str());
        }

        for ((button, &pressed), step) in self.buttons.iter_mut().zip(&inputs.buttons).zip(JogStep::ALL) {
            if button.update(now_us, pressed) && self.step != step {
                self.step = step;
                rt_info!(LOG_STREAM, LogSource::Pendant, now_us, "step {}", step.as_str());
            }
        }

        let dir = self.encoder.poll(inputs.encoder_count)?;
        let cmd = jog_command(self.axis.axis(), self.step, dir, self.feed);

        match link.submit(now_us, cmd.as_bytes(), &JOG_ORIGIN) {
            Ok(_) => Some(cmd),
            Err(e) => {
                self.dropped += 1;
                rt_debug!(LOG_STREAM, LogSource::Pendant, now_us, "jog dropped: {}", e);
                None
            }
        }
    }

    /// Selected axis.
    #[inline]
    pub fn axis(&self) -> JogAxis {
        self.axis.axis()
    }

    /// Selected step.
    #[inline]
    pub fn step(&self) -> JogStep {
        self.step
    }

    /// Jogs refused by the link.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

/// GRBL real-time commands: acted on immediately, never acknowledged.
pub fn is_realtime(byte: u8) -> bool {
    matches!(byte, b'?' | b'!' | b'~' | 0x18) || byte >= 0x80
}

/// Host serial passthrough.
///
/// Complete lines are queued with the host origin. Real-time bytes bypass
/// the queue and are handed back for immediate transmission.
#[derive(Default)]
pub struct HostBridge {
    line: LineBuffer<MAX_LINE_LEN>,
    dropped: u32,
}

impl HostBridge {
    /// Empty bridge.
    pub const fn new() -> Self {
        Self {
            line: LineBuffer::new(),
            dropped: 0,
        }
    }

    /// Feed one host byte.
    ///
    /// Returns `Some(byte)` for a real-time command that must be written to
    /// the controller right away.
    pub fn feed<'a, W, const OB: usize, const ML: usize, const IF: usize>(
        &mut self,
        now_us: i64,
        byte: u8,
        link: &mut CommandLink<'a, Origin, W, OB, ML, IF>,
    ) -> Option<u8>
    where
        W: Counter,
    {
        if is_realtime(byte) {
            return Some(byte);
        }
        if !self.line.feed(byte) {
            return None;
        }

        if self.line.is_truncated() {
            rt_warn!(LOG_STREAM, LogSource::Host, now_us, "host line cut at {}", self.line.len());
        }
        if !self.line.is_empty() && link.submit(now_us, self.line.as_bytes(), &HOST_ORIGIN).is_err() {
            self.dropped += 1;
            rt_warn!(LOG_STREAM, LogSource::Host, now_us, "host line dropped, link full");
        }
        self.line.clear();
        None
    }

    /// Host lines refused by the link.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(pot_raw: u16, encoder_count: i32) -> PendantInputs {
        PendantInputs { pot_raw, encoder_count, buttons: [false; 3] }
    }

    #[test]
    fn test_no_motion_no_jog() {
        let mut link = pendant_link();
        let mut p = Pendant::new(0);
        assert!(p.tick(0, &inputs(0, 0), &mut link).is_none());
        assert_eq!(link.pending(), 0);
    }

    #[test]
    fn test_jog_on_encoder_change() {
        let mut link = pendant_link();
        let mut p = Pendant::new(0);
        let cmd = p.tick(0, &inputs(0, -2), &mut link);
        assert_eq!(cmd.as_deref(), Some("$J=G91 F100 X-0.1"));
        assert_eq!(link.pending(), 1);
    }

    #[test]
    fn test_step_button_selects_step() {
        let mut link = pendant_link();
        let mut p = Pendant::new(0);
        let mut inp = inputs(4000, 0);
        inp.buttons = [false, false, true];
        p.tick(0, &inp, &mut link);
        p.tick(BUTTON_DEBOUNCE_US, &inp, &mut link);
        assert_eq!(p.step(), JogStep::One);
        assert_eq!(p.axis(), JogAxis::Z);

        inp.encoder_count = 1;
        let cmd = p.tick(BUTTON_DEBOUNCE_US + 1, &inp, &mut link);
        assert_eq!(cmd.as_deref(), Some("$J=G91 F100 Z1"));
    }

    #[test]
    fn test_full_link_drops_jog() {
        let mut link = pendant_link();
        let mut p = Pendant::new(0);
        let mut count = 0;
        while link.can_submit(16) {
            count += 1;
            assert!(p.tick(0, &inputs(0, count), &mut link).is_some());
        }
        count += 1;
        assert!(p.tick(0, &inputs(0, count), &mut link).is_none());
        assert_eq!(p.dropped(), 1);
    }

    #[test]
    fn test_host_line_forwarded() {
        let mut link = pendant_link();
        let mut host = HostBridge::new();
        for &b in b"G0 X1\r\n" {
            assert_eq!(host.feed(0, b, &mut link), None);
        }
        assert_eq!(link.pending(), 1);
    }

    #[test]
    fn test_host_realtime_bypasses() {
        let mut link = pendant_link();
        let mut host = HostBridge::new();
        assert_eq!(host.feed(0, b'?', &mut link), Some(b'?'));
        assert_eq!(host.feed(0, 0x18, &mut link), Some(0x18));
        assert_eq!(host.feed(0, b'\n', &mut link), None);
        assert_eq!(link.pending(), 0);
    }
}
