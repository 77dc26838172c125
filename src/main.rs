#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use console::style;
use miam::run;

#[tokio::main]
async fn main() {
  if let Err(e) = run().await {
    eprintln!("{}", style(format!("{e:#}")).red());
    std::process::exit(1);
  }
}
