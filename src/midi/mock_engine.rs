use crate::midi::{MidiBackend, MidiError, PacketSender, RawPacket, Result};
use crossbeam::channel::Sender;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory transport with fixed endpoint names.
///
/// Packets are injected and outbound traffic is inspected through a
/// [`MockHandle`], which stays usable after the backend has been moved into
/// a transport adapter.
pub struct MockBackend {
    sources: Vec<String>,
    destinations: Vec<String>,
    fail_discovery: bool,
    shared: Arc<Mutex<MockShared>>,
}

#[derive(Default)]
struct MockShared {
    sink: Option<Sender<RawPacket>>,
    connected_source: Option<usize>,
    connected_destination: Option<usize>,
    sent: Vec<RawPacket>,
}

fn lock(shared: &Mutex<MockShared>) -> MutexGuard<'_, MockShared> {
    // A panicking test thread must not hide the recorded traffic from the others.
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockBackend {
    pub fn new<S: Into<String>>(
        sources: impl IntoIterator<Item = S>,
        destinations: impl IntoIterator<Item = S>,
    ) -> Self {
        MockBackend {
            sources: sources.into_iter().map(Into::into).collect(),
            destinations: destinations.into_iter().map(Into::into).collect(),
            fail_discovery: false,
            shared: Arc::new(Mutex::new(MockShared::default())),
        }
    }

    /// A transport exposing one source and one destination called `name`.
    pub fn with_device(name: &str) -> Self {
        Self::new([name], [name])
    }

    /// Every name lookup fails, as when the platform service goes away mid-discovery.
    pub fn failing_discovery(mut self) -> Self {
        self.fail_discovery = true;
        self
    }

    pub fn handle(&self) -> MockHandle {
        MockHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    fn check_discovery(&self) -> Result<()> {
        if self.fail_discovery {
            Err(MidiError::PortInfo("mock endpoint name unavailable".into()))
        } else {
            Ok(())
        }
    }
}

impl MidiBackend for MockBackend {
    type Input = MockInput;
    type Output = MockSender;

    fn source_names(&self) -> Result<Vec<String>> {
        self.check_discovery()?;
        Ok(self.sources.clone())
    }

    fn destination_names(&self) -> Result<Vec<String>> {
        self.check_discovery()?;
        Ok(self.destinations.clone())
    }

    fn connect_source(
        &mut self,
        index: usize,
        name: &str,
        sink: Sender<RawPacket>,
    ) -> Result<Self::Input> {
        if self.sources.get(index).map(String::as_str) != Some(name) {
            return Err(MidiError::Connect(format!(
                "no mock source {} named '{}'",
                index, name
            )));
        }
        let mut shared = lock(&self.shared);
        shared.sink = Some(sink);
        shared.connected_source = Some(index);
        Ok(MockInput { index })
    }

    fn connect_destination(&mut self, index: usize, name: &str) -> Result<Self::Output> {
        if self.destinations.get(index).map(String::as_str) != Some(name) {
            return Err(MidiError::Connect(format!(
                "no mock destination {} named '{}'",
                index, name
            )));
        }
        lock(&self.shared).connected_destination = Some(index);
        Ok(MockSender {
            shared: Arc::clone(&self.shared),
        })
    }
}

#[derive(Debug)]
pub struct MockInput {
    pub index: usize,
}

pub struct MockSender {
    shared: Arc<Mutex<MockShared>>,
}

impl PacketSender for MockSender {
    fn send_packet(&mut self, bytes: &[u8]) -> Result<()> {
        lock(&self.shared).sent.push(bytes.to_vec());
        Ok(())
    }
}

/// Test-side view of a [`MockBackend`].
#[derive(Clone)]
pub struct MockHandle {
    shared: Arc<Mutex<MockShared>>,
}

impl MockHandle {
    /// Delivers `bytes` as one packet from the connected source.
    /// Returns `false` when no source is connected.
    pub fn inject(&self, bytes: &[u8]) -> bool {
        match &lock(&self.shared).sink {
            Some(sink) => sink.send(bytes.to_vec()).is_ok(),
            None => false,
        }
    }

    /// Drops the packet sink, as if the source went away.
    pub fn disconnect(&self) {
        lock(&self.shared).sink = None;
    }

    pub fn sent_packets(&self) -> Vec<RawPacket> {
        lock(&self.shared).sent.clone()
    }

    pub fn connected_source(&self) -> Option<usize> {
        lock(&self.shared).connected_source
    }

    pub fn connected_destination(&self) -> Option<usize> {
        lock(&self.shared).connected_destination
    }
}
