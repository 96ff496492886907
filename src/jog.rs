//! Jog moves and their command text.
//!
//! One encoder detent becomes one incremental jog:
//!
//! ```text
//! $J=G91 F100 X-0.1
//! │      │    │└┬─┘
//! │      │    │ └── step (signed)
//! │      │    └──── axis
//! │      └───────── feed (mm/min)
//! └──────────────── jog, relative coordinates
//! ```

use core::fmt::Write;

/// Capacity of a formatted jog command.
pub const JOG_CMD_LEN: usize = 32;

/// Formatted jog command, no allocation.
pub type JogCommand = heapless::String<JOG_CMD_LEN>;

/// Axis moved by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JogAxis {
    #[default]
    X,
    Y,
    Z,
}

impl JogAxis {
    /// Axis letter.
    pub fn as_str(self) -> &'static str {
        match self {
            JogAxis::X => "X",
            JogAxis::Y => "Y",
            JogAxis::Z => "Z",
        }
    }
}

/// Distance moved per encoder detent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JogStep {
    /// 0.01 mm
    Hundredth,
    /// 0.1 mm
    #[default]
    Tenth,
    /// 1 mm
    One,
}

impl JogStep {
    /// All steps, in button order.
    pub const ALL: [JogStep; 3] = [JogStep::Hundredth, JogStep::Tenth, JogStep::One];

    /// Distance text as sent to the controller.
    pub fn as_str(self) -> &'static str {
        match self {
            JogStep::Hundredth => "0.01",
            JogStep::Tenth => "0.1",
            JogStep::One => "1",
        }
    }
}

/// Jog direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    /// Sign prefix for the distance.
    pub fn sign(self) -> &'static str {
        match self {
            Direction::Positive => "",
            Direction::Negative => "-",
        }
    }
}

/// Format one incremental jog.
pub fn jog_command(axis: JogAxis, step: JogStep, dir: Direction, feed: u32) -> JogCommand {
    let mut cmd = JogCommand::new();
    // Longest possible text is 25 bytes, it always fits
    let _ = write!(cmd, "$J=G91 F{} {}{}{}", feed, axis.as_str(), dir.sign(), step.as_str());
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jog_command_text() {
        let cmd = jog_command(JogAxis::X, JogStep::Tenth, Direction::Negative, 100);
        assert_eq!(cmd.as_str(), "$J=G91 F100 X-0.1");

        let cmd = jog_command(JogAxis::Z, JogStep::Hundredth, Direction::Positive, 100);
        assert_eq!(cmd.as_str(), "$J=G91 F100 Z0.01");

        let cmd = jog_command(JogAxis::Y, JogStep::One, Direction::Positive, 2500);
        assert_eq!(cmd.as_str(), "$J=G91 F2500 Y1");
    }

    #[test]
    fn test_longest_command_fits() {
        let cmd = jog_command(JogAxis::Z, JogStep::Hundredth, Direction::Negative, u32::MAX);
        assert_eq!(cmd.as_str(), "$J=G91 F4294967295 Z-0.01");
    }

    #[test]
    fn test_display_text() {
        assert_eq!(JogAxis::Y.as_str(), "Y");
        assert_eq!(JogStep::ALL.map(JogStep::as_str), ["0.01", "0.1", "1"]);
    }
}
