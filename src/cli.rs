use clap::Parser;

/// Address searched when no location is given on the command line.
pub const DEFAULT_LOCATION: &str = "4 rue de la Pierre Levée, 75011 Paris";

/// Search radius in meters when none is given on the command line.
pub const DEFAULT_RADIUS: u32 = 1000;

/// Separator between addresses in the `LOCATIONS` argument.
pub const LOCATION_SEPARATOR: &str = "&&";

#[derive(Parser, Debug, Clone)]
#[command(name = "miam", version)]
#[command(
  about = "Find restaurants around one or more addresses, colour-coded by distance and price.",
  long_about = "A command-line utility that searches the Yelp Fusion API for restaurants within a radius of each given address, and prints how far and how expensive each one is."
)]
pub struct Cli {
  /// Addresses to search around, separated by `&&`.
  /// Example: "10 Downing St, London && 1 Rue de Rivoli, Paris"
  #[arg(value_name = "LOCATIONS")]
  pub locations: Option<String>,

  /// Search radius in meters.
  #[arg(value_name = "RADIUS", default_value_t = DEFAULT_RADIUS)]
  pub radius: u32,

  /// Yelp Fusion API key.
  /// Overrides the `YELP_API_KEY` environment variable and the config file.
  #[arg(long = "api-key", value_name = "API_KEY")]
  pub api_key_flag: Option<String>,

  /// Base URL of the search API (overrides `YELP_API_URL`).
  #[arg(long = "base-url", value_name = "URL")]
  pub base_url_flag: Option<String>,

  /// Number of locations fetched at the same time. Results keep the input
  /// order and the first failure aborts the run.
  #[arg(
    short,
    long,
    value_name = "N",
    default_value_t = 1,
    value_parser = clap::value_parser!(u16).range(1..)
  )]
  pub concurrency: u16,

  /// Output results in JSON format instead of human-readable text.
  #[arg(long)]
  pub json: bool,

  /// Log every request to stderr.
  #[arg(short, long)]
  pub verbose: bool,

  /// Persist the `--api-key` value into the user config file.
  #[arg(long, requires = "api_key_flag")]
  pub save_key: bool,

  /// Print the current merged configuration and exit.
  #[arg(long)]
  pub config_show: bool,
}

impl Cli {
  /// The addresses to search around, in the order they were given.
  pub fn locations(&self) -> Vec<String> {
    split_locations(self.locations.as_deref())
  }
}

/// Splits the raw `LOCATIONS` argument on `&&` and trims every piece.
///
/// Empty pieces are kept; the API decides whether it accepts them.
pub fn split_locations(raw: Option<&str>) -> Vec<String> {
  raw.map_or_else(
    || vec![DEFAULT_LOCATION.to_string()],
    |raw| {
      raw
        .split(LOCATION_SEPARATOR)
        .map(|piece| piece.trim().to_string())
        .collect()
    },
  )
}
