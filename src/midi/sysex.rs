//! LED frames in the Launchpad Pro SysEx dialect.

use crate::hal::EventType;

pub const SYSEX_START: u8 = 0xF0;
pub const SYSEX_END: u8 = 0xF7;

/// Novation manufacturer id, Launchpad Pro product id and the RGB LED command.
pub const LED_PREFIX: [u8; 7] = [SYSEX_START, 0x00, 0x20, 0x29, 0x02, 0x10, 0x0B];

pub const FRAME_LEN: usize = LED_PREFIX.len() + 4 + 1;

pub type SysExFrame = [u8; FRAME_LEN];

/// Request to set one LED's colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedCommand {
    pub kind: EventType,
    pub index: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl LedCommand {
    pub fn new(kind: EventType, index: u8, red: u8, green: u8, blue: u8) -> Self {
        LedCommand {
            kind,
            index,
            red,
            green,
            blue,
        }
    }

    pub fn encode(&self) -> SysExFrame {
        encode_led(self)
    }

    /// Recovers the command from a frame produced by [`encode_led`].
    ///
    /// The cell type is not part of the frame, so it always comes back as
    /// [`EventType::Pad`].
    pub fn from_frame(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [prefix @ .., index, red, green, blue, SYSEX_END] if prefix == &LED_PREFIX[..] => {
                Some(LedCommand::new(EventType::Pad, *index, *red, *green, *blue))
            }
            _ => None,
        }
    }
}

/// Builds the 12-byte frame for `command`. Colour values go out as given;
/// keeping them in the 0..=127 data range is up to the caller.
pub fn encode_led(command: &LedCommand) -> SysExFrame {
    let [p0, p1, p2, p3, p4, p5, p6] = LED_PREFIX;
    [
        p0,
        p1,
        p2,
        p3,
        p4,
        p5,
        p6,
        command.index,
        command.red,
        command.green,
        command.blue,
        SYSEX_END,
    ]
}
