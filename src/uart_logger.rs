//! Console UART log output.
//!
//! Drains the [`LogStream`] into whatever writes bytes to the USB console
//! UART. The caller supplies the writer, so the formatting and drop
//! reporting run on the host as well as on the pendant.
//!
//! # Output format
//!
//! ```text
//! [   1234567] INFO link: tx $J=G91 F100 X0.1
//! [WARN] Dropped: 3
//! ```

use core::fmt::Write;

use crate::logging::{BufWriter, LogEntry, LogStream, MAX_MSG_LEN};

/// Formatted line capacity: prefix, source tag and message.
pub const LINE_BUF_SIZE: usize = MAX_MSG_LEN + 40;

/// Format log entry as `[timestamp_us] LEVEL source: message\r\n`.
///
/// Returns the number of bytes written.
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    let mut writer = BufWriter { buf, pos: 0 };

    let _ = write!(
        writer,
        "[{:10}] {} {}: {}\r\n",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.source.as_str(),
        entry.text()
    );

    writer.pos
}

/// Periodic log drain with dropped-message reporting.
pub struct LogDrain {
    report_interval_us: i64,
    last_dropped_report_us: i64,
}

impl LogDrain {
    /// Create a drain reporting drops at most once per `report_interval_us`.
    pub const fn new(report_interval_us: i64) -> Self {
        Self {
            report_interval_us,
            last_dropped_report_us: 0,
        }
    }

    /// Write every pending entry through `write`.
    ///
    /// Returns the number of entries written.
    pub fn drain<const N: usize, F>(&mut self, stream: &LogStream<N>, now_us: i64, mut write: F) -> usize
    where
        F: FnMut(&[u8]),
    {
        let mut line = [0u8; LINE_BUF_SIZE];
        let mut count = 0;

        while let Some(entry) = stream.drain() {
            let len = format_log_entry(&entry, &mut line);
            write(&line[..len]);
            count += 1;
        }

        if now_us - self.last_dropped_report_us >= self.report_interval_us {
            let dropped = stream.dropped();
            if dropped > 0 {
                let mut writer = BufWriter { buf: &mut line, pos: 0 };
                let _ = write!(writer, "[WARN] Dropped: {}\r\n", dropped);
                let len = writer.pos;
                write(&line[..len]);
                stream.reset_dropped();
            }
            self.last_dropped_report_us = now_us;
        }

        count
    }
}
