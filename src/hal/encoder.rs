//! Jog wheel pin interrupt.
//!
//! Channel A raises an interrupt on both edges. The handler samples both
//! channels and feeds the shared `QuadratureDecoder`, so no edge depends on
//! how often the main loop runs.

use core::ffi::c_void;

use esp_idf_svc::sys::{
    esp, esp_err_t, gpio_get_level, gpio_install_isr_service, gpio_int_type_t_GPIO_INTR_ANYEDGE,
    gpio_intr_enable, gpio_isr_handler_add, gpio_num_t, gpio_set_intr_type, EspError,
    ESP_ERR_INVALID_STATE,
};

use crate::input::QuadratureDecoder;

/// Decoder wired to its A/B pins.
pub struct EncoderIsr {
    decoder: &'static QuadratureDecoder,
    pin_a: gpio_num_t,
    pin_b: gpio_num_t,
}

impl EncoderIsr {
    pub const fn new(decoder: &'static QuadratureDecoder, pin_a: gpio_num_t, pin_b: gpio_num_t) -> Self {
        Self { decoder, pin_a, pin_b }
    }
}

unsafe extern "C" fn encoder_isr(arg: *mut c_void) {
    // SAFETY: `arg` is the `&'static EncoderIsr` registered in `attach`
    let isr = unsafe { &*(arg as *const EncoderIsr) };
    // SAFETY: level reads are ISR-safe register accesses
    let (a, b) = unsafe { (gpio_get_level(isr.pin_a) != 0, gpio_get_level(isr.pin_b) != 0) };
    isr.decoder.on_change(a, b);
}

/// Start decoding on every channel A edge.
///
/// The pins must already be configured as inputs. The decoder should be
/// seeded with `sync_level` first so the first edge is not lost.
pub fn attach(isr: &'static EncoderIsr) -> Result<(), EspError> {
    // SAFETY: plain driver calls; the handler argument lives for 'static
    unsafe {
        // Already installed by another driver is fine
        let err = gpio_install_isr_service(0);
        if err != ESP_ERR_INVALID_STATE as esp_err_t {
            esp!(err)?;
        }
        esp!(gpio_set_intr_type(isr.pin_a, gpio_int_type_t_GPIO_INTR_ANYEDGE))?;
        esp!(gpio_isr_handler_add(
            isr.pin_a,
            Some(encoder_isr),
            isr as *const EncoderIsr as *mut c_void
        ))?;
        esp!(gpio_intr_enable(isr.pin_a))?;
    }
    Ok(())
}
