use crossbeam::channel::Sender;
use std::error::Error;
use std::fmt;

/// Custom error type for MIDI transport operations
#[derive(Debug)]
pub enum MidiError {
    /// The transport client could not be created
    Init(String),
    /// An endpoint name could not be read during discovery
    PortInfo(String),
    /// Connecting to an endpoint failed
    Connect(String),
    /// Error when sending bytes to the output endpoint
    Send(String),
    /// No endpoint with the requested name exists
    NotFound { direction: Direction, name: String },
    /// The backend was asked for a connection it can no longer hand out
    Disconnected(String),
}

/// Which side of the endpoint pair an operation concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => f.write_str("input source"),
            Direction::Output => f.write_str("output destination"),
        }
    }
}

impl fmt::Display for MidiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MidiError::Init(msg) => write!(f, "MIDI client error: {}", msg),
            MidiError::PortInfo(msg) => write!(f, "MIDI port info error: {}", msg),
            MidiError::Connect(msg) => write!(f, "MIDI connection error: {}", msg),
            MidiError::Send(msg) => write!(f, "MIDI send error: {}", msg),
            MidiError::NotFound { direction, name } => {
                write!(f, "no MIDI {} named '{}'", direction, name)
            }
            MidiError::Disconnected(msg) => write!(f, "MIDI backend disconnected: {}", msg),
        }
    }
}

impl Error for MidiError {}

impl From<midir::InitError> for MidiError {
    fn from(e: midir::InitError) -> Self {
        MidiError::Init(e.to_string())
    }
}

impl From<midir::PortInfoError> for MidiError {
    fn from(e: midir::PortInfoError) -> Self {
        MidiError::PortInfo(e.to_string())
    }
}

impl<T> From<midir::ConnectError<T>> for MidiError {
    fn from(e: midir::ConnectError<T>) -> Self {
        MidiError::Connect(e.kind().to_string())
    }
}

impl From<midir::SendError> for MidiError {
    fn from(e: midir::SendError) -> Self {
        MidiError::Send(e.to_string())
    }
}

/// Result type for MIDI operations
pub type Result<T> = std::result::Result<T, MidiError>;

/// One transport delivery: one or more concatenated MIDI messages.
pub type RawPacket = Vec<u8>;

/// The sending half of a bound output destination.
pub trait PacketSender {
    /// Submits one packet for sending. Does not wait for delivery.
    fn send_packet(&mut self, bytes: &[u8]) -> Result<()>;
}

/// Trait defining the platform MIDI transport the simulator binds to.
///
/// Endpoints are addressed by their position in the enumeration returned
/// by [`source_names`](MidiBackend::source_names) and
/// [`destination_names`](MidiBackend::destination_names), together with the
/// name found there. Connecting fails if the endpoint at that position no
/// longer carries that name.
pub trait MidiBackend {
    /// Guard keeping an input connection open. Dropping it disconnects.
    type Input;
    type Output: PacketSender;

    fn source_names(&self) -> Result<Vec<String>>;

    fn destination_names(&self) -> Result<Vec<String>>;

    /// Opens the source at `index`; every packet it delivers is pushed into `sink`.
    fn connect_source(
        &mut self,
        index: usize,
        name: &str,
        sink: Sender<RawPacket>,
    ) -> Result<Self::Input>;

    fn connect_destination(&mut self, index: usize, name: &str) -> Result<Self::Output>;
}
