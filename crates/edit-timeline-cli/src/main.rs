//! edit-timeline binary
//!
//! ```bash
//! edit-timeline --state session.json push r1 --root --file file:///a.rs='fn main() {}'
//! edit-timeline --state session.json push r1 --post-edit --file file:///a.rs='fn main() { run() }'
//! edit-timeline --state session.json undo
//! edit-timeline --state session.json show
//! edit-timeline --state session.json restore r1 --post-edit
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG=debug` for cursor and truncation detail.

use std::process::ExitCode;

use clap::Parser;
use edit_timeline_cli::Cli;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match edit_timeline_cli::run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
