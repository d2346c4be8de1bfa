use crate::midi::{Direction, MidiBackend, MidiError, PacketSender, RawPacket, Result};
use crossbeam::channel::Sender;
use log::{debug, trace};
use midir::{Ignore, MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};

/// Device name CoreMIDI puts in front of the endpoint name in a display name.
const DEVICE_PREFIX: &str = "Launchpad Pro ";

/// The endpoint's own name, recovered from the name `midir` reports for a port.
///
/// - ALSA reports `"<client>:<port> <client id>:<port id>"`; this yields `<port>`.
/// - CoreMIDI reports the display name `"<device> <endpoint>"`; for a
///   Launchpad Pro this yields `<endpoint>`, e.g. `"Standalone Port"`.
///
/// Names of any other shape are returned trimmed but otherwise unchanged.
pub fn endpoint_name(port_name: &str) -> &str {
    let mut name = port_name.trim();

    if let Some((head, ids)) = name.rsplit_once(' ') {
        if is_alsa_address(ids) {
            name = head;
            if let Some((_client, port)) = name.split_once(':') {
                name = port;
            }
        }
    }

    match name.get(..DEVICE_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(DEVICE_PREFIX) => {
            let rest = name[DEVICE_PREFIX.len()..].trim_start();
            if rest.is_empty() {
                name
            } else {
                rest
            }
        }
        _ => name,
    }
}

/// `"<digits>:<digits>"`
fn is_alsa_address(ids: &str) -> bool {
    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    matches!(ids.split_once(':'), Some((client, port)) if numeric(client) && numeric(port))
}

/// The port at `index`, provided it still carries the name found at discovery.
///
/// Ports can come and go between enumeration and connection, which shifts
/// positions in the list.
fn port_at<'a, P, F>(
    ports: &'a [P],
    index: usize,
    expected: &str,
    direction: Direction,
    name_of: F,
) -> Result<&'a P>
where
    F: Fn(&P) -> Result<String>,
{
    let port = ports.get(index).ok_or_else(|| {
        MidiError::Connect(format!("{} #{} vanished before connecting", direction, index))
    })?;
    let name = name_of(port)?;
    if name != expected {
        return Err(MidiError::Connect(format!(
            "{} #{} changed from '{}' to '{}' before connecting",
            direction, index, expected, name
        )));
    }
    Ok(port)
}

/// Platform MIDI transport through `midir`.
///
/// Both halves of the client are created up front so that a missing MIDI
/// subsystem is reported before any endpoint is looked at. Each half can be
/// connected once; `midir` consumes the client on connect. Endpoint names are
/// reported through [`endpoint_name`].
pub struct MidirBackend {
    client_name: String,
    input: Option<MidiInput>,
    output: Option<MidiOutput>,
}

impl MidirBackend {
    pub fn new(client_name: &str) -> Result<Self> {
        let mut input = MidiInput::new(&format!("{}-in", client_name))?;
        // SysEx, timing and active sensing are all passed through; the decoder
        // decides what it understands.
        input.ignore(Ignore::None);
        let output = MidiOutput::new(&format!("{}-out", client_name))?;
        debug!("Created MIDI client '{}'", client_name);

        Ok(MidirBackend {
            client_name: client_name.to_string(),
            input: Some(input),
            output: Some(output),
        })
    }

    fn input(&self) -> Result<&MidiInput> {
        self.input
            .as_ref()
            .ok_or_else(|| MidiError::Disconnected("input client already connected".into()))
    }

    fn output(&self) -> Result<&MidiOutput> {
        self.output
            .as_ref()
            .ok_or_else(|| MidiError::Disconnected("output client already connected".into()))
    }

    fn input_name(midi_in: &MidiInput, port: &midir::MidiInputPort) -> Result<String> {
        let reported = midi_in.port_name(port)?;
        trace!("MIDI source reported as '{}'", reported);
        Ok(endpoint_name(&reported).to_string())
    }

    fn output_name(midi_out: &MidiOutput, port: &midir::MidiOutputPort) -> Result<String> {
        let reported = midi_out.port_name(port)?;
        trace!("MIDI destination reported as '{}'", reported);
        Ok(endpoint_name(&reported).to_string())
    }
}

impl MidiBackend for MidirBackend {
    type Input = MidiInputConnection<()>;
    type Output = MidirSender;

    fn source_names(&self) -> Result<Vec<String>> {
        let midi_in = self.input()?;
        midi_in
            .ports()
            .iter()
            .map(|p| Self::input_name(midi_in, p))
            .collect()
    }

    fn destination_names(&self) -> Result<Vec<String>> {
        let midi_out = self.output()?;
        midi_out
            .ports()
            .iter()
            .map(|p| Self::output_name(midi_out, p))
            .collect()
    }

    fn connect_source(
        &mut self,
        index: usize,
        name: &str,
        sink: Sender<RawPacket>,
    ) -> Result<Self::Input> {
        let port = {
            let midi_in = self.input()?;
            let ports = midi_in.ports();
            port_at(&ports, index, name, Direction::Input, |p| {
                Self::input_name(midi_in, p)
            })?
            .clone()
        };
        let midi_in = self
            .input
            .take()
            .ok_or_else(|| MidiError::Disconnected("input client already connected".into()))?;

        let connection = midi_in.connect(
            &port,
            &format!("{}-input", self.client_name),
            move |_stamp, message, _| {
                trace!("Received packet {:02X?}", message);
                // The loop owns the receiver for the whole process; a failed
                // send only happens during shutdown.
                let _ = sink.send(message.to_vec());
            },
            (),
        )?;
        Ok(connection)
    }

    fn connect_destination(&mut self, index: usize, name: &str) -> Result<Self::Output> {
        let port = {
            let midi_out = self.output()?;
            let ports = midi_out.ports();
            port_at(&ports, index, name, Direction::Output, |p| {
                Self::output_name(midi_out, p)
            })?
            .clone()
        };
        let midi_out = self
            .output
            .take()
            .ok_or_else(|| MidiError::Disconnected("output client already connected".into()))?;

        let connection = midi_out.connect(&port, &format!("{}-output", self.client_name))?;
        Ok(MidirSender { connection })
    }
}

pub struct MidirSender {
    connection: MidiOutputConnection,
}

impl PacketSender for MidirSender {
    fn send_packet(&mut self, bytes: &[u8]) -> Result<()> {
        self.connection.send(bytes)?;
        Ok(())
    }
}
