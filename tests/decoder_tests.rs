use padsim::midi::{decode, MidiEvent};
use padsim::translate::{dispatch_packet, SurfaceEvent};
use padsim::{Application, EventType, Hal};

/// Application that only records what it was given.
#[derive(Default)]
struct EventLog {
    events: Vec<SurfaceEvent>,
}

impl Application for EventLog {
    fn init(&mut self, _hal: &mut dyn Hal) {}

    fn surface_event(&mut self, _hal: &mut dyn Hal, kind: EventType, index: u8, value: u8) {
        self.events.push(SurfaceEvent::Surface { kind, index, value });
    }

    fn aftertouch_event(&mut self, _hal: &mut dyn Hal, index: u8, value: u8) {
        self.events.push(SurfaceEvent::Aftertouch { index, value });
    }

    fn timer_event(&mut self, _hal: &mut dyn Hal) {}
}

fn surface_events(packet: &[u8]) -> Vec<SurfaceEvent> {
    let mut app = EventLog::default();
    let mut hal = padsim::hal::RecordingHal::new();
    dispatch_packet(packet, &mut app, &mut hal);
    app.events
}

fn pad(index: u8, value: u8) -> SurfaceEvent {
    SurfaceEvent::Surface {
        kind: EventType::Pad,
        index,
        value,
    }
}

#[test]
fn test_pad_statuses_on_every_channel() {
    for high in [0x90u8, 0x80, 0xB0] {
        for channel in 0..16u8 {
            let events = surface_events(&[high | channel, 0x21, 0x42]);
            assert_eq!(
                events,
                vec![pad(0x21, 0x42)],
                "status {:02X}",
                high | channel
            );
        }
    }
}

#[test]
fn test_aftertouch_on_every_channel() {
    for channel in 0..16u8 {
        let events = surface_events(&[0xA0 | channel, 0x07, 0x33]);
        assert_eq!(
            events,
            vec![SurfaceEvent::Aftertouch {
                index: 0x07,
                value: 0x33
            }]
        );
    }
}

#[test]
fn test_other_statuses_consume_three_bytes() {
    for high in [0xC0u8, 0xD0, 0xE0, 0xF0] {
        // The unsupported message is skipped and the next one still lines up.
        let packet = [high, 0x01, 0x02, 0x90, 0x3C, 0x7F];
        assert_eq!(surface_events(&packet), vec![pad(0x3C, 0x7F)]);
        assert_eq!(decode(&packet[..3]).count(), 0);
    }
}

#[test]
fn test_short_remainders_dropped() {
    assert!(surface_events(&[]).is_empty());
    assert!(surface_events(&[0x90]).is_empty());
    assert!(surface_events(&[0x90, 0x3C]).is_empty());
    assert_eq!(
        surface_events(&[0x90, 0x3C, 0x7F, 0x90, 0x3D]),
        vec![pad(0x3C, 0x7F)]
    );
}

#[test]
fn test_scenario_note_on() {
    assert_eq!(surface_events(&[0x90, 0x3C, 0x7F]), vec![pad(0x3C, 0x7F)]);
}

#[test]
fn test_scenario_aftertouch_channel_one() {
    assert_eq!(
        surface_events(&[0xA1, 0x05, 0x40]),
        vec![SurfaceEvent::Aftertouch {
            index: 0x05,
            value: 0x40
        }]
    );
}

#[test]
fn test_scenario_mixed_packet_with_trailing_byte() {
    let packet = [0x90, 0x3C, 0x7F, 0xA0, 0x05, 0x40, 0xB0];
    assert_eq!(
        surface_events(&packet),
        vec![
            pad(0x3C, 0x7F),
            SurfaceEvent::Aftertouch {
                index: 0x05,
                value: 0x40
            }
        ]
    );

    let decoded: Vec<MidiEvent> = decode(&packet).collect();
    assert_eq!(
        decoded,
        vec![
            MidiEvent::NoteOn {
                note: 0x3C,
                velocity: 0x7F
            },
            MidiEvent::PolyAftertouch {
                note: 0x05,
                pressure: 0x40
            }
        ]
    );
}

#[test]
fn test_one_byte_message_desyncs_the_stream() {
    // Realtime bytes are not supported: the clock byte swallows the next two
    // bytes and the note on is misread.
    let packet = [0xF8, 0x90, 0x3C, 0x7F];
    assert!(surface_events(&packet).is_empty());
}
