//! They Know entry point
//!
//! Sets up logging and reports anything that escapes the frame loop.

use std::process::ExitCode;

const HINT: &str = "Run they-know in an interactive terminal with mouse reporting enabled.";

fn main() -> ExitCode {
    // Quiet by default: log lines would land on the game screen
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    log::info!("They Know starting...");

    match they_know::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The terminal is already restored here
            eprintln!("An error occurred: {e}");
            eprintln!("{HINT}");
            ExitCode::FAILURE
        }
    }
}
