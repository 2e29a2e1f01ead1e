//! `tree-trace`: run a tree operation script and print the step trace.
//!
//! Usage:
//!   echo '{"policy":"avl","build":[3,1,2]}' | tree-trace
//!
//! The script is read from stdin; the JSON array of per-operation reports is
//! written to stdout. Logs go to stderr, filtered by `RUST_LOG`.

use std::io::{self, Read, Write};

use step_forest::script::{run_json, ScriptError};
use tracing_subscriber::EnvFilter;

fn run() -> Result<(), ScriptError> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    let out = run_json(buf.trim())?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(out.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
