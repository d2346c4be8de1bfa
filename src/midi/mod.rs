//! MIDI plumbing for the simulator
//!
//! This module provides:
//! - decoding of the controller's 3-byte pad messages ([`decode`], [`MidiEvent`])
//! - encoding of RGB LED commands into SysEx frames ([`encode_led`], [`LedCommand`])
//! - the [`MidiBackend`] trait the transport adapter binds through
//! - [`MidirBackend`] for real MIDI devices and [`MockBackend`] for testing
//!
mod engine;
pub mod message;
pub mod midir_engine;
pub mod mock_engine;
pub mod sysex;

pub use engine::{Direction, MidiBackend, MidiError, PacketSender, RawPacket, Result};

pub use message::{decode, Decoder, MidiEvent};
pub use sysex::{encode_led, LedCommand, SysExFrame};

pub use midir_engine::MidirBackend;
pub use mock_engine::{MockBackend, MockHandle};

// Set default backend type
pub type DefaultMidiBackend = MidirBackend;
