//! Turns decoded MIDI into application calls.

use crate::app::Application;
use crate::hal::{EventType, Hal};
use crate::midi::{decode, MidiEvent};
use log::trace;

/// What the application sees of one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Surface { kind: EventType, index: u8, value: u8 },
    Aftertouch { index: u8, value: u8 },
}

impl SurfaceEvent {
    /// Note on, note off and control change all become pad events; the
    /// application cannot tell them apart.
    pub fn from_midi(event: &MidiEvent) -> Option<Self> {
        match *event {
            MidiEvent::NoteOn { note, velocity } | MidiEvent::NoteOff { note, velocity } => {
                Some(SurfaceEvent::Surface {
                    kind: EventType::Pad,
                    index: note,
                    value: velocity,
                })
            }
            MidiEvent::ControlChange { controller, value } => Some(SurfaceEvent::Surface {
                kind: EventType::Pad,
                index: controller,
                value,
            }),
            MidiEvent::PolyAftertouch { note, pressure } => Some(SurfaceEvent::Aftertouch {
                index: note,
                value: pressure,
            }),
            MidiEvent::Unrecognized { .. } => None,
        }
    }

    pub fn deliver<A: Application + ?Sized>(self, app: &mut A, hal: &mut dyn Hal) {
        trace!("Delivering {:?}", self);
        match self {
            SurfaceEvent::Surface { kind, index, value } => {
                app.surface_event(hal, kind, index, value)
            }
            SurfaceEvent::Aftertouch { index, value } => app.aftertouch_event(hal, index, value),
        }
    }
}

/// Decodes `packet` and delivers every event in it, in order.
/// Returns how many events reached the application.
pub fn dispatch_packet<A: Application + ?Sized>(
    packet: &[u8],
    app: &mut A,
    hal: &mut dyn Hal,
) -> usize {
    let mut delivered = 0;
    for event in decode(packet).filter_map(|event| SurfaceEvent::from_midi(&event)) {
        event.deliver(&mut *app, &mut *hal);
        delivered += 1;
    }
    delivered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::RecordingHal;

    #[derive(Default)]
    struct Collector {
        events: Vec<SurfaceEvent>,
    }

    impl Application for Collector {
        fn init(&mut self, _hal: &mut dyn Hal) {}

        fn surface_event(&mut self, _hal: &mut dyn Hal, kind: EventType, index: u8, value: u8) {
            self.events
                .push(SurfaceEvent::Surface { kind, index, value });
        }

        fn aftertouch_event(&mut self, _hal: &mut dyn Hal, index: u8, value: u8) {
            self.events.push(SurfaceEvent::Aftertouch { index, value });
        }

        fn timer_event(&mut self, _hal: &mut dyn Hal) {}
    }

    #[test]
    fn test_note_and_cc_collapse_to_pad() {
        let mut app = Collector::default();
        let mut hal = RecordingHal::new();
        let delivered = dispatch_packet(
            &[0x90, 11, 100, 0x80, 11, 0, 0xB0, 91, 127],
            &mut app,
            &mut hal,
        );

        assert_eq!(delivered, 3);
        let pad = |index, value| SurfaceEvent::Surface {
            kind: EventType::Pad,
            index,
            value,
        };
        assert_eq!(app.events, vec![pad(11, 100), pad(11, 0), pad(91, 127)]);
        assert!(hal.calls.is_empty());
    }

    #[test]
    fn test_unrecognized_never_delivered() {
        let event = MidiEvent::Unrecognized {
            status: 0xE0,
            data1: 0,
            data2: 0,
        };
        assert_eq!(SurfaceEvent::from_midi(&event), None);
    }

    #[test]
    fn test_aftertouch_mapping() {
        let event = MidiEvent::PolyAftertouch {
            note: 5,
            pressure: 64,
        };
        assert_eq!(
            SurfaceEvent::from_midi(&event),
            Some(SurfaceEvent::Aftertouch {
                index: 5,
                value: 64
            })
        );
    }
}
