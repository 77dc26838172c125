#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use anyhow::Result;

mod app;
mod cli;
mod logging;
pub mod providers;
pub mod results;
pub mod steps;
mod user_config;

/// Runs the main application logic.
///
/// This function parses command-line arguments, resolves the API key and
/// base URL, fetches the businesses around every requested location and
/// prints the results.
///
/// # Errors
///
/// Returns an error if no API key can be found, if the HTTP client cannot be
/// built, if any location fetch fails, or if printing the results in JSON
/// format fails.
pub async fn run() -> Result<()> {
  let app = app::App::new()?;
  app.run().await
}
