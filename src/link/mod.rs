//! Command link to the motion controller
//!
//! Commands go out one line at a time through a flow-control window;
//! `ok` / `error` lines coming back are matched to the command they answer.

pub mod command_link;
pub mod line;
pub mod response;

pub use command_link::{CommandLink, LinkEvent, LinkStats, LinkTx};
pub use line::LineBuffer;
pub use response::{classify, AckOutcome, Response};
