use clap::{error::ErrorKind, CommandFactory, Parser};
use padsim::{
    cli::{format_endpoint_list, usage_exit_code},
    midi::{DefaultMidiBackend, MidiError},
    transport::list_endpoints,
    Args, DemoApp, Settings, Simulator,
};

fn main() {
    let args = Args::try_parse().unwrap_or_else(|e| exit_with_usage(e));
    let settings = Settings::from_args(&args).unwrap_or_else(|e| {
        exit_with_usage(Args::command().error(ErrorKind::ValueValidation, e))
    });

    initialize_logging(&settings);

    if args.list_devices {
        list_available_devices(&settings);
        return;
    }

    let connect = || DefaultMidiBackend::new(&settings.client_name);
    let mut simulator = match Simulator::start(connect, &settings, DemoApp::new()) {
        Ok(simulator) => simulator,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    };

    log::info!("Simulator running. Press Ctrl+C to exit...");
    println!(
        "Bound to '{}'. Press Ctrl+C to exit...",
        settings.device_name
    );
    let stats = simulator.run();
    log::info!("Run loop ended: {:?}", stats);
}

/// Like `clap::Error::exit`, but never with a status the bootstrap uses.
fn exit_with_usage(err: clap::Error) -> ! {
    let _ = err.print();
    std::process::exit(usage_exit_code(&err));
}

fn initialize_logging(settings: &Settings) {
    // Logging is a debugging aid; the simulator runs without it.
    if let Err(e) = padsim::logging::init_logger(settings.log_level) {
        eprintln!("{}", e);
    }
    log::info!("padsim starting");
}

fn list_available_devices(settings: &Settings) {
    let endpoints = DefaultMidiBackend::new(&settings.client_name)
        .and_then(|backend| list_endpoints(&backend));
    match endpoints {
        Ok(endpoints) => print!("{}", format_endpoint_list(&endpoints)),
        Err(e) => {
            let code = match e {
                MidiError::Init(_) => 1,
                _ => 2,
            };
            log::error!("Could not list MIDI endpoints: {}", e);
            eprintln!("{}", e);
            std::process::exit(code);
        }
    }
}
