pub mod app;
pub mod bootstrap;
pub mod cli;
pub mod clock;
pub mod config;
pub mod event_loop;
pub mod hal;
pub mod logging;
pub mod midi;
pub mod translate;
pub mod transport;

pub use app::{Application, DemoApp};
pub use bootstrap::{BootstrapError, Simulator};
pub use cli::Args;
pub use config::Settings;
pub use hal::{EventType, Hal, Port};
pub use transport::TransportAdapter;
