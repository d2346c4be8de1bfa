//! Startup: create the transport client, bind the device, start the application.

use crate::app::Application;
use crate::clock::{ClockSource, TimerClock};
use crate::config::Settings;
use crate::event_loop::{EventLoop, LoopStats};
use crate::midi::{MidiBackend, MidiError};
use crate::transport::TransportAdapter;
use log::{error, info};
use std::error::Error;
use std::fmt;
use std::time::Instant;

#[derive(Debug)]
pub enum BootstrapError {
    /// The MIDI client could not be created.
    Client(MidiError),
    /// The device endpoints could not be found or connected.
    Binding(MidiError),
}

impl BootstrapError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            BootstrapError::Client(_) => 1,
            BootstrapError::Binding(_) => 2,
        }
    }
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::Client(e) => write!(f, "failed to open MIDI client: {}", e),
            BootstrapError::Binding(e) => write!(f, "failed to bind device: {}", e),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BootstrapError::Client(e) | BootstrapError::Binding(e) => Some(e),
        }
    }
}

/// A bound device, its application and the tick source, ready to run.
pub struct Simulator<B: MidiBackend, A: Application> {
    adapter: TransportAdapter<B>,
    app: A,
    clock: TimerClock,
}

impl<B: MidiBackend, A: Application> Simulator<B, A> {
    /// Creates the client with `connect`, binds `settings.device_name`, then
    /// initialises `app`. The application is never touched if binding fails.
    pub fn start<F>(connect: F, settings: &Settings, mut app: A) -> Result<Self, BootstrapError>
    where
        F: FnOnce() -> Result<B, MidiError>,
    {
        let backend = connect().map_err(|e| {
            error!("MIDI client creation failed: {}", e);
            BootstrapError::Client(e)
        })?;

        let mut adapter =
            TransportAdapter::bind(backend, &settings.device_name).map_err(|e| {
                error!("Could not bind '{}': {}", settings.device_name, e);
                BootstrapError::Binding(e)
            })?;
        info!("Device '{}' bound", settings.device_name);

        app.init(&mut adapter);

        Ok(Simulator {
            adapter,
            app,
            clock: TimerClock::new(settings.tick_interval),
        })
    }

    pub fn adapter(&self) -> &TransportAdapter<B> {
        &self.adapter
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    /// Runs the event loop with the wall-clock ticker. Returns only when the
    /// device input goes away, which a live transport never does.
    pub fn run(&mut self) -> LoopStats {
        let ticks = self.clock.ticks();
        self.run_with_ticks(ticks)
    }

    /// Runs the event loop with ticks from `ticks` instead of the wall clock.
    pub fn run_with_ticks(&mut self, ticks: crossbeam::channel::Receiver<Instant>) -> LoopStats {
        let mut event_loop = EventLoop::new(self.adapter.packets(), ticks);
        event_loop.run(&mut self.app, &mut self.adapter)
    }
}
