//! Pendant end-to-end tests: inputs to controller lines

use jog_pendant::config::BUTTON_DEBOUNCE_US;
use jog_pendant::input::QuadratureDecoder;
use jog_pendant::link::{LinkEvent, LinkTx};
use jog_pendant::pendant::{pendant_link, HostBridge, Origin, Pendant, PendantInputs};
use jog_pendant::{JogAxis, JogStep};

#[derive(Default)]
struct Controller {
    rx: Vec<u8>,
}

impl LinkTx for Controller {
    type Error = ();

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), ()> {
        self.rx.extend_from_slice(bytes);
        Ok(())
    }
}

/// Turn the wheel one detent clockwise: A rises with B high.
fn detent(dec: &QuadratureDecoder) {
    dec.on_change(true, true);
}

#[test]
fn test_wheel_to_controller() {
    let dec = QuadratureDecoder::new();
    let mut link = pendant_link();
    let mut pendant = Pendant::new(dec.count());
    let mut ctrl = Controller::default();

    detent(&dec);
    let inputs = PendantInputs { pot_raw: 3300, encoder_count: dec.count(), buttons: [false; 3] };
    pendant.tick(0, &inputs, &mut link);
    assert_eq!(pendant.axis(), JogAxis::Y);

    link.poll_send(0, &mut ctrl).unwrap();
    assert_eq!(ctrl.rx, b"$J=G91 F100 Y0.1\n");
}

#[test]
fn test_jogs_wait_for_ack() {
    let dec = QuadratureDecoder::new();
    let mut link = pendant_link();
    let mut pendant = Pendant::new(0);
    let mut ctrl = Controller::default();

    // three detents, polled one at a time
    let mut now = 0;
    for level in [true, false, true] {
        dec.on_change(level, level);
        let inputs = PendantInputs { encoder_count: dec.count(), ..Default::default() };
        assert!(pendant.tick(now, &inputs, &mut link).is_some());
        now += 1_000;
    }
    assert_eq!(link.pending(), 3);

    assert_eq!(link.poll_send(now, &mut ctrl), Ok(1));
    assert_eq!(link.poll_send(now, &mut ctrl), Ok(0));

    let mut acked = 0;
    while !link.is_idle() {
        link.on_rx(now, b"ok\n", |e| {
            assert!(matches!(e, LinkEvent::Ack { tag: &Origin::Jog, .. }));
            acked += 1;
        });
        link.poll_send(now, &mut ctrl).unwrap();
    }
    assert_eq!(acked, 3);
    assert_eq!(String::from_utf8_lossy(&ctrl.rx).lines().count(), 3);
}

#[test]
fn test_step_buttons_debounced() {
    let mut link = pendant_link();
    let mut pendant = Pendant::new(0);
    let pressed = PendantInputs { buttons: [true, false, false], ..Default::default() };

    pendant.tick(0, &pressed, &mut link);
    pendant.tick(BUTTON_DEBOUNCE_US / 2, &pressed, &mut link);
    assert_eq!(pendant.step(), JogStep::Tenth);

    pendant.tick(BUTTON_DEBOUNCE_US, &pressed, &mut link);
    assert_eq!(pendant.step(), JogStep::Hundredth);
}

#[test]
fn test_host_and_jog_share_link() {
    let mut link = pendant_link();
    let mut pendant = Pendant::new(0);
    let mut host = HostBridge::new();
    let mut ctrl = Controller::default();

    for &b in b"G21\n" {
        host.feed(0, b, &mut link);
    }
    let inputs = PendantInputs { encoder_count: -1, ..Default::default() };
    pendant.tick(0, &inputs, &mut link);

    let mut origins = Vec::new();
    for _ in 0..2 {
        link.poll_send(0, &mut ctrl).unwrap();
        link.on_rx(0, b"ok\n", |e| {
            if let LinkEvent::Ack { tag, .. } = e {
                origins.push(*tag);
            }
        });
    }

    assert_eq!(origins, [Origin::Host, Origin::Jog]);
    assert_eq!(ctrl.rx, b"G21\n$J=G91 F100 X-0.1\n");
}
