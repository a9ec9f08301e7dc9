// src/main.rs

use clap::Parser;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use pid_performance_report::constants::DEFAULT_INPUT_FILE;
use pid_performance_report::crate_version;
use pid_performance_report::pipeline::run;

/// Performance summary and diagnostic plot for one logged PID trial.
#[derive(Parser, Debug)]
#[command(name = "pid_performance_report", version = crate_version(), about)]
struct Cli {
    /// Trial CSV with Time, Error, LeftSpeed, RightSpeed, IAE, ISE and optional baseSpeed columns.
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,
}

fn init_logging() {
    // Diagnostics go to stderr so the report on stdout stays byte-exact.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let cli = Cli::parse();
    // A missing input is reported on stdout and still exits normally.
    run(&cli.input, Path::new(""))?;
    Ok(())
}
