//! The hardware abstraction the firmware application is written against.

use std::fmt;

/// Cell type of a surface event or LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventType {
    /// One of the 8x8 pads or the round buttons around them.
    Pad = 0,
    /// The dedicated setup button.
    Setup = 1,
}

/// MIDI port selector for the raw send paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Port {
    Standalone = 0,
    Usb = 1,
    Din = 2,
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Standalone => f.write_str("standalone"),
            Port::Usb => f.write_str("usb"),
            Port::Din => f.write_str("din"),
        }
    }
}

/// Commands the application may issue.
///
/// None of them report failure: on the device they write to hardware, and
/// here they are fire-and-forget sends.
pub trait Hal {
    /// Sets one LED's colour.
    fn plot_led(&mut self, kind: EventType, index: u8, red: u8, green: u8, blue: u8);

    /// Sends a 3-byte channel message. Not supported by the simulator; does nothing.
    fn send_midi(&mut self, port: Port, status: u8, data1: u8, data2: u8);

    /// Sends an arbitrary SysEx buffer. Not supported by the simulator; does nothing.
    fn send_sysex(&mut self, port: Port, data: &[u8]);
}

/// A call made through [`RecordingHal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HalCall {
    PlotLed {
        kind: EventType,
        index: u8,
        red: u8,
        green: u8,
        blue: u8,
    },
    SendMidi {
        port: Port,
        status: u8,
        data1: u8,
        data2: u8,
    },
    SendSysex {
        port: Port,
        data: Vec<u8>,
    },
}

/// HAL that only remembers what it was asked to do. Used to exercise
/// applications without any transport.
#[derive(Debug, Default)]
pub struct RecordingHal {
    pub calls: Vec<HalCall>,
}

impl RecordingHal {
    pub fn new() -> Self {
        Self::default()
    }

    /// The LED calls only, as `(kind, index, red, green, blue)`.
    pub fn leds(&self) -> Vec<(EventType, u8, u8, u8, u8)> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                HalCall::PlotLed {
                    kind,
                    index,
                    red,
                    green,
                    blue,
                } => Some((kind, index, red, green, blue)),
                _ => None,
            })
            .collect()
    }
}

impl Hal for RecordingHal {
    fn plot_led(&mut self, kind: EventType, index: u8, red: u8, green: u8, blue: u8) {
        self.calls.push(HalCall::PlotLed {
            kind,
            index,
            red,
            green,
            blue,
        });
    }

    fn send_midi(&mut self, port: Port, status: u8, data1: u8, data2: u8) {
        self.calls.push(HalCall::SendMidi {
            port,
            status,
            data1,
            data2,
        });
    }

    fn send_sysex(&mut self, port: Port, data: &[u8]) {
        self.calls.push(HalCall::SendSysex {
            port,
            data: data.to_vec(),
        });
    }
}
