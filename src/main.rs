mod cli;
mod core;
mod util;

use std::process;

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse();

    if let Err(e) = cli::commands::dispatch(args) {
        eprintln!("dupecheck: {e:#}");
        process::exit(1);
    }
}
