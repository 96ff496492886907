//! JogPendant - Main entry point
//!
//! The jog wheel is counted by a pin interrupt on encoder channel A.
//!
//! Single polling loop:
//! 1. Sample inputs (encoder count, axis pot, step buttons)
//! 2. Queue jogs and forwarded host lines on the command link
//! 3. Send what the flow-control window admits
//! 4. Match controller responses back to their origin
//! 5. Drain the log stream to the console

#[cfg(target_os = "espidf")]
fn main() -> Result<(), esp_idf_svc::sys::EspError> {
    firmware::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("jog-pendant firmware only runs on ESP-IDF targets");
}

#[cfg(target_os = "espidf")]
mod firmware {
    use esp_idf_svc::hal::adc::attenuation::DB_11;
    use esp_idf_svc::hal::adc::oneshot::config::AdcChannelConfig;
    use esp_idf_svc::hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
    use esp_idf_svc::hal::gpio::{AnyIOPin, PinDriver, Pull};
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::uart::config::Config as UartConfig;
    use esp_idf_svc::hal::uart::UartDriver;
    use esp_idf_svc::hal::units::Hertz;
    use esp_idf_svc::sys::{self as esp_idf_sys, EspError};

    use jog_pendant::config::{CONSOLE_BAUD, LOG_DROP_REPORT_INTERVAL_US, PIN_ENC_A, PIN_ENC_B, PRINTER_BAUD};
    use jog_pendant::hal::{encoder, read_available, timestamp_us, EncoderIsr};
    use jog_pendant::input::{active_low, QuadratureDecoder};
    use jog_pendant::log_globals::LOG_STREAM;
    use jog_pendant::logging::LogSource;
    use jog_pendant::pendant::{pendant_link, HostBridge, Pendant, PendantInputs};
    use jog_pendant::uart_logger::LogDrain;
    use jog_pendant::{rt_error, rt_info, LinkEvent, LinkTx, Origin};

    static DECODER: QuadratureDecoder = QuadratureDecoder::new();
    static ENCODER: EncoderIsr = EncoderIsr::new(&DECODER, PIN_ENC_A, PIN_ENC_B);

    pub fn run() -> Result<(), EspError> {
        esp_idf_sys::link_patches();

        let peripherals = Peripherals::take()?;
        let pins = peripherals.pins;

        // Controller on UART2: TX 17, RX 16
        let mut printer = UartDriver::new(
            peripherals.uart2,
            pins.gpio17,
            pins.gpio16,
            Option::<AnyIOPin>::None,
            Option::<AnyIOPin>::None,
            &UartConfig::new().baudrate(Hertz(PRINTER_BAUD)),
        )?;

        // Host and log console on UART0
        let mut console = UartDriver::new(
            peripherals.uart0,
            pins.gpio1,
            pins.gpio3,
            Option::<AnyIOPin>::None,
            Option::<AnyIOPin>::None,
            &UartConfig::new().baudrate(Hertz(CONSOLE_BAUD)),
        )?;

        // Encoder A/B (PIN_ENC_A / PIN_ENC_B), counted from the A edge interrupt
        let mut enc_a = PinDriver::input(pins.gpio26)?;
        enc_a.set_pull(Pull::Up)?;
        let mut enc_b = PinDriver::input(pins.gpio27)?;
        enc_b.set_pull(Pull::Up)?;
        DECODER.sync_level(enc_a.is_high());
        encoder::attach(&ENCODER)?;

        // Step buttons 0.01 / 0.1 / 1, active low
        let mut btn_fine = PinDriver::input(pins.gpio14)?;
        btn_fine.set_pull(Pull::Up)?;
        let mut btn_mid = PinDriver::input(pins.gpio12)?;
        btn_mid.set_pull(Pull::Up)?;
        let mut btn_coarse = PinDriver::input(pins.gpio13)?;
        btn_coarse.set_pull(Pull::Up)?;

        // Axis pot on ADC1
        let adc = AdcDriver::new(peripherals.adc1)?;
        let pot_config = AdcChannelConfig {
            attenuation: DB_11,
            ..Default::default()
        };
        let mut pot = AdcChannelDriver::new(&adc, pins.gpio33, &pot_config)?;

        let mut link = pendant_link();
        let mut pendant = Pendant::new(DECODER.count());
        let mut host = HostBridge::new();
        let mut drain = LogDrain::new(LOG_DROP_REPORT_INTERVAL_US);
        let mut rx = [0u8; 64];

        rt_info!(LOG_STREAM, LogSource::System, timestamp_us(), "{}", env!("VERSION_STRING"));

        loop {
            let now_us = timestamp_us();

            let inputs = PendantInputs {
                pot_raw: adc.read_raw(&mut pot)?,
                encoder_count: DECODER.count(),
                buttons: [
                    active_low(btn_fine.is_high()),
                    active_low(btn_mid.is_high()),
                    active_low(btn_coarse.is_high()),
                ],
            };
            pendant.tick(now_us, &inputs, &mut link);

            let n = read_available(&console, &mut rx)?;
            for &byte in &rx[..n] {
                if let Some(realtime) = host.feed(now_us, byte, &mut link) {
                    printer.write_all(&[realtime])?;
                }
            }

            if link.poll_send(now_us, &mut printer).is_err() {
                rt_error!(LOG_STREAM, LogSource::System, now_us, "controller write failed");
            }

            let n = read_available(&printer, &mut rx)?;
            let mut replies: heapless::Vec<jog_pendant::link::AckOutcome, 8> = heapless::Vec::new();
            link.on_rx(now_us, &rx[..n], |event| {
                if let LinkEvent::Ack { tag: &Origin::Host, outcome, .. } = event {
                    let _ = replies.push(outcome);
                }
            });
            for outcome in replies {
                let mut line: heapless::String<16> = heapless::String::new();
                let _ = core::fmt::write(&mut line, format_args!("{}\r\n", outcome));
                console.write_all(line.as_bytes())?;
            }

            drain.drain(&LOG_STREAM, now_us, |bytes| {
                let _ = console.write_all(bytes);
            });

            // SAFETY: yields to the idle task, no preconditions
            unsafe {
                esp_idf_sys::vTaskDelay(1);
            }
        }
    }
}
