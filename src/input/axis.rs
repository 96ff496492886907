//! Axis selection from the potentiometer.

use crate::config::{AXIS_BORDER_XY, AXIS_BORDER_YZ, AXIS_HYSTERESIS};
use crate::jog::JogAxis;

/// Maps raw pot readings to an axis with hysteresis around each border.
///
/// ```text
///      X        │      Y       │      Z
///  ─────────────┼──────────────┼──────────────▶ raw
///          2900 │ 3100    3600 │ 3800
///               3000           3700
/// ```
/// A border is crossed only once the reading is `AXIS_HYSTERESIS` past it.
#[derive(Debug, Default)]
pub struct AxisSelector {
    axis: JogAxis,
}

impl AxisSelector {
    /// Selector starting on X.
    pub const fn new() -> Self {
        Self { axis: JogAxis::X }
    }

    /// Apply a reading and return the selected axis.
    ///
    /// A single reading may move across both borders (X straight to Z).
    pub fn update(&mut self, raw: u16) -> JogAxis {
        while let Some(next) = Self::step(self.axis, raw) {
            self.axis = next;
        }
        self.axis
    }

    /// Currently selected axis.
    #[inline]
    pub fn axis(&self) -> JogAxis {
        self.axis
    }

    fn step(axis: JogAxis, raw: u16) -> Option<JogAxis> {
        let up = |border: u16| raw > border.saturating_add(AXIS_HYSTERESIS);
        let down = |border: u16| raw < border.saturating_sub(AXIS_HYSTERESIS);

        match axis {
            JogAxis::X if up(AXIS_BORDER_XY) => Some(JogAxis::Y),
            JogAxis::Y if up(AXIS_BORDER_YZ) => Some(JogAxis::Z),
            JogAxis::Y if down(AXIS_BORDER_XY) => Some(JogAxis::X),
            JogAxis::Z if down(AXIS_BORDER_YZ) => Some(JogAxis::Y),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hysteresis_band_holds() {
        let mut sel = AxisSelector::new();
        assert_eq!(sel.update(3050), JogAxis::X);
        assert_eq!(sel.update(3101), JogAxis::Y);
        assert_eq!(sel.update(2950), JogAxis::Y);
        assert_eq!(sel.update(2899), JogAxis::X);
    }

    #[test]
    fn test_jumps_across_both_borders() {
        let mut sel = AxisSelector::new();
        assert_eq!(sel.update(4095), JogAxis::Z);
        assert_eq!(sel.update(3650), JogAxis::Z);
        assert_eq!(sel.update(0), JogAxis::X);
    }

    #[test]
    fn test_z_band() {
        let mut sel = AxisSelector::new();
        sel.update(3500);
        assert_eq!(sel.axis(), JogAxis::Y);
        assert_eq!(sel.update(3800), JogAxis::Y);
        assert_eq!(sel.update(3801), JogAxis::Z);
        assert_eq!(sel.update(3599), JogAxis::Y);
    }
}
