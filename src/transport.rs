//! Transport adapter: the bound endpoint pair of the simulated device.
//!
//! Inbound packets are handed from the transport's own callback thread to
//! the event loop through a channel; nothing is decoded on the callback
//! thread. Outbound, the adapter is the [`Hal`] the application talks to.

use crate::hal::{EventType, Hal, Port};
use crate::midi::{Direction, LedCommand, MidiBackend, MidiError, PacketSender, RawPacket, Result};
use crossbeam::channel::{self, Receiver};
use log::{debug, info, trace, warn};

/// Source and destination names as reported by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointList {
    pub sources: Vec<String>,
    pub destinations: Vec<String>,
}

pub fn list_endpoints<B: MidiBackend>(backend: &B) -> Result<EndpointList> {
    Ok(EndpointList {
        sources: backend.source_names()?,
        destinations: backend.destination_names()?,
    })
}

/// Position of the last endpoint whose name equals `device_name`, ignoring ASCII case.
fn find_endpoint(names: &[String], device_name: &str) -> Option<usize> {
    names
        .iter()
        .rposition(|name| name.eq_ignore_ascii_case(device_name))
}

pub struct TransportAdapter<B: MidiBackend> {
    // Held only to keep the input connection open.
    _input: B::Input,
    output: B::Output,
    packets: Receiver<RawPacket>,
    frames_sent: u64,
}

impl<B: MidiBackend> TransportAdapter<B> {
    /// Binds the input source and output destination called `device_name`.
    ///
    /// Fails if either side is missing or any transport call errors. When
    /// several endpoints share the name, the last one enumerated is used.
    pub fn bind(mut backend: B, device_name: &str) -> Result<Self> {
        let sources = backend.source_names()?;
        debug!("MIDI sources: {:?}", sources);
        let source = find_endpoint(&sources, device_name).ok_or_else(|| MidiError::NotFound {
            direction: Direction::Input,
            name: device_name.to_string(),
        })?;

        let (tx, packets) = channel::unbounded();
        let input = backend.connect_source(source, &sources[source], tx)?;
        info!("Bound MIDI input '{}' (#{})", sources[source], source);

        let destinations = backend.destination_names()?;
        debug!("MIDI destinations: {:?}", destinations);
        let destination =
            find_endpoint(&destinations, device_name).ok_or_else(|| MidiError::NotFound {
                direction: Direction::Output,
                name: device_name.to_string(),
            })?;

        let output = backend.connect_destination(destination, &destinations[destination])?;
        info!(
            "Bound MIDI output '{}' (#{})",
            destinations[destination], destination
        );

        Ok(TransportAdapter {
            _input: input,
            output,
            packets,
            frames_sent: 0,
        })
    }

    /// Inbound packets, in arrival order. The channel disconnects only when
    /// the input side goes away.
    pub fn packets(&self) -> Receiver<RawPacket> {
        self.packets.clone()
    }

    /// Number of LED frames handed to the transport so far.
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    pub fn send_led(&mut self, command: &LedCommand) {
        let frame = command.encode();
        trace!("Sending LED frame {:02X?}", frame);
        match self.output.send_packet(&frame) {
            Ok(()) => self.frames_sent += 1,
            Err(e) => warn!("Dropped LED update for index {}: {}", command.index, e),
        }
    }
}

impl<B: MidiBackend> Hal for TransportAdapter<B> {
    fn plot_led(&mut self, kind: EventType, index: u8, red: u8, green: u8, blue: u8) {
        self.send_led(&LedCommand::new(kind, index, red, green, blue));
    }

    fn send_midi(&mut self, port: Port, status: u8, data1: u8, data2: u8) {
        trace!(
            "Ignoring send_midi on {} port: {:02X} {:02X} {:02X}",
            port,
            status,
            data1,
            data2
        );
    }

    fn send_sysex(&mut self, port: Port, data: &[u8]) {
        trace!("Ignoring {} byte send_sysex on {} port", data.len(), port);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::MockBackend;

    #[test]
    fn test_find_endpoint_is_case_insensitive_and_exact() {
        let names = vec![
            "Launchpad Pro Live Port".to_string(),
            "STANDALONE PORT".to_string(),
            "Standalone Port 2".to_string(),
        ];
        assert_eq!(find_endpoint(&names, "Standalone Port"), Some(1));
        assert_eq!(find_endpoint(&names, "Standalone"), None);
    }

    #[test]
    fn test_last_match_wins() {
        let backend = MockBackend::new(
            ["Standalone Port", "Other", "standalone port"],
            ["Standalone Port", "Standalone Port"],
        );
        let handle = backend.handle();
        let _adapter = TransportAdapter::bind(backend, "Standalone Port").unwrap();
        assert_eq!(handle.connected_source(), Some(2));
        assert_eq!(handle.connected_destination(), Some(1));
    }

    #[test]
    fn test_missing_output_fails() {
        let backend = MockBackend::new(["Standalone Port"], ["Something Else"]);
        match TransportAdapter::bind(backend, "Standalone Port") {
            Err(MidiError::NotFound { direction, .. }) => assert_eq!(direction, Direction::Output),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("binding should fail"),
        }
    }

    #[test]
    fn test_unsupported_sends_are_silent() {
        let backend = MockBackend::with_device("Standalone Port");
        let handle = backend.handle();
        let mut adapter = TransportAdapter::bind(backend, "Standalone Port").unwrap();

        adapter.send_midi(Port::Din, 0x90, 60, 127);
        adapter.send_sysex(Port::Usb, &[0xF0, 0x01, 0xF7]);

        assert!(handle.sent_packets().is_empty());
        assert_eq!(adapter.frames_sent(), 0);
    }
}
