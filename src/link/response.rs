//! Peer response classification
//!
//! The peer answers every command line with `ok` or `error[:<code>]`.
//! Anything else (status reports, `[MSG:...]`, `ALARM:n`) is unsolicited.

/// Outcome carried by an acknowledgment line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckOutcome {
    /// Command processed
    Ok,
    /// Command refused, with the peer's numeric code when it sent one
    Error(Option<u16>),
}

impl AckOutcome {
    /// Check if the command was accepted
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl core::fmt::Display for AckOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::Error(Some(code)) => write!(f, "error:{}", code),
            Self::Error(None) => f.write_str("error"),
        }
    }
}

/// Classified response line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Acknowledges the oldest outstanding command
    Ack(AckOutcome),
    /// Not an acknowledgment
    Other,
}

/// Classify one response line (terminator already stripped)
pub fn classify(line: &[u8]) -> Response {
    if line.starts_with(b"ok") {
        Response::Ack(AckOutcome::Ok)
    } else if let Some(rest) = line.strip_prefix(b"error") {
        Response::Ack(AckOutcome::Error(parse_code(rest)))
    } else {
        Response::Other
    }
}

/// Parse `:<digits>` following `error`
fn parse_code(rest: &[u8]) -> Option<u16> {
    let digits = rest.strip_prefix(b":")?;
    if digits.is_empty() {
        return None;
    }

    let mut code: u16 = 0;
    for &d in digits {
        if !d.is_ascii_digit() {
            return None;
        }
        code = code.checked_mul(10)?.checked_add((d - b'0') as u16)?;
    }
    Some(code)
}
