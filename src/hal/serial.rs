//! UART plumbing for the controller and console ports.

use esp_idf_svc::hal::delay::NON_BLOCK;
use esp_idf_svc::hal::uart::UartDriver;
use esp_idf_svc::sys::{esp_timer_get_time, EspError};

use crate::link::LinkTx;

impl LinkTx for UartDriver<'_> {
    type Error = EspError;

    fn write_all(&mut self, mut bytes: &[u8]) -> Result<(), EspError> {
        while !bytes.is_empty() {
            let n = self.write(bytes)?;
            bytes = &bytes[n..];
        }
        Ok(())
    }
}

/// Read whatever is buffered without waiting.
pub fn read_available(uart: &UartDriver<'_>, buf: &mut [u8]) -> Result<usize, EspError> {
    uart.read(buf, NON_BLOCK)
}

/// Microseconds since boot.
pub fn timestamp_us() -> i64 {
    // SAFETY: reads a monotonic hardware timer, no preconditions
    unsafe { esp_timer_get_time() }
}
