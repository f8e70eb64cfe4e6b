use std::env;
use std::io;

use stratum::{FilterPolicy, StratumError};

/// A small CLI: one document path in, one JSON tree out on stdout.
fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        let program = args.first().map(String::as_str).unwrap_or("stratum");
        eprintln!("Extracts the layer structure of a Photoshop document as JSON.");
        eprintln!();
        eprintln!("Usage: {program} <path/to/document.psd>");
        std::process::exit(1);
    }

    if let Err(error) = run(&args[1]) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(path: &str) -> Result<(), StratumError> {
    let outline = stratum::outline_file(path, &FilterPolicy::default())?;
    stratum::write_outline(&outline, io::stdout().lock())
}
