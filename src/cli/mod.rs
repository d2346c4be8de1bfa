use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Name of the MIDI endpoint pair to bind (matched case-insensitively)
    #[arg(long, value_name = "NAME")]
    pub device: Option<String>,

    /// Name the simulator registers with the MIDI subsystem
    #[arg(long, value_name = "NAME")]
    pub client_name: Option<String>,

    /// Scheduler tick period in microseconds
    #[arg(long, value_name = "MICROS", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_interval_us: Option<u64>,

    /// List available MIDI endpoints and exit
    #[arg(long)]
    pub list_devices: bool,

    /// Log more to the terminal (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Exit status for an unusable command line (sysexits `EX_USAGE`). Kept apart
/// from the bootstrap statuses 1 and 2.
pub const USAGE_EXIT_CODE: i32 = 64;

/// Exit status for a command line error: 0 for `--help`/`--version`
/// output, [`USAGE_EXIT_CODE`] for everything else.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        USAGE_EXIT_CODE
    } else {
        0
    }
}

pub fn format_endpoint_list(endpoints: &crate::transport::EndpointList) -> String {
    let mut out = String::from("MIDI sources:\n");
    for name in &endpoints.sources {
        out.push_str(&format!("  - {}\n", name));
    }
    out.push_str("MIDI destinations:\n");
    for name in &endpoints.destinations {
        out.push_str(&format!("  - {}\n", name));
    }
    out
}
