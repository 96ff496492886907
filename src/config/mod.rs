//! Module: config
//!
//! Purpose: Compile-time configuration for the jog pendant.
//!
//! Architecture:
//! - Queue sizing feeds the const generics of the command link
//! - Serial settings for the controller and console ports
//! - Jog and input tuning constants
//!
//! Safety: Safe. Constants only.

// --- Command queues ---

/// Longest command line kept; longer lines are truncated.
pub const MAX_LINE_LEN: usize = 100;

/// Bytes of the outbox holding commands not yet sent.
pub const OUTBOX_BYTES: usize = 256;

/// Commands allowed on the wire without an acknowledgment.
pub const WINDOW_LINES: usize = 1;

/// Controller receive buffer size (GRBL: 128 bytes).
pub const WINDOW_BYTES: usize = 128;

/// Terminator sent after every command line.
pub const LINE_TERMINATOR: &[u8] = b"\n";

/// Longest response line kept from the controller.
pub const RESPONSE_LINE_LEN: usize = 128;

// --- Serial ---

/// Controller UART baud rate.
pub const PRINTER_BAUD: u32 = 115_200;

/// USB console UART baud rate.
pub const CONSOLE_BAUD: u32 = 115_200;

/// Interval between dropped-log reports on the console.
pub const LOG_DROP_REPORT_INTERVAL_US: i64 = 10_000_000;

// --- Jog ---

/// Feed rate for jog moves (mm/min).
pub const JOG_FEED: u32 = 100;

// --- Inputs ---

/// Encoder channel A GPIO (interrupt on both edges).
pub const PIN_ENC_A: i32 = 26;

/// Encoder channel B GPIO.
pub const PIN_ENC_B: i32 = 27;

/// Pot reading between X and Y.
pub const AXIS_BORDER_XY: u16 = 3000;

/// Pot reading between Y and Z.
pub const AXIS_BORDER_YZ: u16 = 3700;

/// Hysteresis around each border.
pub const AXIS_HYSTERESIS: u16 = 100;

/// Time a button level must hold before it is accepted.
pub const BUTTON_DEBOUNCE_US: i64 = 20_000;
