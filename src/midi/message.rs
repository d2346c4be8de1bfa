//! Decoding of inbound pad traffic.
//!
//! The controller only ever talks in 3-byte channel messages, so the decoder
//! walks a packet in fixed 3-byte strides. Anything shorter at the tail of a
//! packet is dropped; there is no buffering across packets.

use log::trace;

pub const NOTE_OFF: u8 = 0x80;
pub const NOTE_ON: u8 = 0x90;
pub const POLY_AFTERTOUCH: u8 = 0xA0;
pub const CONTROL_CHANGE: u8 = 0xB0;

/// Length of every message the decoder understands.
pub const MESSAGE_LEN: usize = 3;

/// A 3-byte channel message with the channel stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
    ControlChange { controller: u8, value: u8 },
    PolyAftertouch { note: u8, pressure: u8 },
    /// Any other status. Consumed and never delivered.
    Unrecognized { status: u8, data1: u8, data2: u8 },
}

impl MidiEvent {
    pub fn from_bytes(bytes: &[u8; MESSAGE_LEN]) -> Self {
        let [status, data1, data2] = *bytes;
        match status & 0xF0 {
            NOTE_ON => MidiEvent::NoteOn {
                note: data1,
                velocity: data2,
            },
            NOTE_OFF => MidiEvent::NoteOff {
                note: data1,
                velocity: data2,
            },
            CONTROL_CHANGE => MidiEvent::ControlChange {
                controller: data1,
                value: data2,
            },
            POLY_AFTERTOUCH => MidiEvent::PolyAftertouch {
                note: data1,
                pressure: data2,
            },
            other => MidiEvent::Unrecognized {
                status: other,
                data1,
                data2,
            },
        }
    }

    /// The message-type code, i.e. the status byte with its channel cleared.
    pub fn status(&self) -> u8 {
        match self {
            MidiEvent::NoteOn { .. } => NOTE_ON,
            MidiEvent::NoteOff { .. } => NOTE_OFF,
            MidiEvent::ControlChange { .. } => CONTROL_CHANGE,
            MidiEvent::PolyAftertouch { .. } => POLY_AFTERTOUCH,
            MidiEvent::Unrecognized { status, .. } => *status,
        }
    }

    /// The two data bytes, in wire order.
    pub fn data(&self) -> (u8, u8) {
        match *self {
            MidiEvent::NoteOn { note, velocity } | MidiEvent::NoteOff { note, velocity } => {
                (note, velocity)
            }
            MidiEvent::ControlChange { controller, value } => (controller, value),
            MidiEvent::PolyAftertouch { note, pressure } => (note, pressure),
            MidiEvent::Unrecognized { data1, data2, .. } => (data1, data2),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, MidiEvent::Unrecognized { .. })
    }
}

/// Lazy iterator over the recognized messages of one packet.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    remaining: &'a [u8],
}

pub fn decode(packet: &[u8]) -> Decoder<'_> {
    Decoder { remaining: packet }
}

impl<'a> Decoder<'a> {
    /// Bytes not yet consumed.
    pub fn remainder(&self) -> &'a [u8] {
        self.remaining
    }
}

impl Iterator for Decoder<'_> {
    type Item = MidiEvent;

    fn next(&mut self) -> Option<MidiEvent> {
        loop {
            let remaining = self.remaining;
            let (message, rest) = match remaining {
                [status, data1, data2, rest @ ..] => ([*status, *data1, *data2], rest),
                short => {
                    if !short.is_empty() {
                        trace!("Dropping {} trailing byte(s) {:02X?}", short.len(), short);
                    }
                    self.remaining = &[];
                    return None;
                }
            };
            self.remaining = rest;

            match MidiEvent::from_bytes(&message) {
                MidiEvent::Unrecognized { status, .. } => {
                    trace!("Skipping unsupported status {:02X}", status);
                }
                event => return Some(event),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining.len() / MESSAGE_LEN))
    }
}

impl std::iter::FusedIterator for Decoder<'_> {}
