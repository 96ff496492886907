//! Pendant inputs: jog wheel, axis pot and step buttons.

pub mod axis;
pub mod button;
pub mod encoder;

pub use axis::AxisSelector;
pub use button::{active_low, Button};
pub use encoder::{EncoderTracker, QuadratureDecoder};
