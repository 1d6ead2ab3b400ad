// ABOUTME: Subcommand handlers of the shoc binary
// ABOUTME: Shared output helpers: JSON printing and progress spinners

pub mod clusters;
pub mod jobs;

use anyhow::Result;
use indicatif::ProgressBar;
use serde::Serialize;
use std::time::Duration;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Spinner on stderr while a request is in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
