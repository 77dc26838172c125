use tracing_subscriber::{
  layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Installs the stderr logger. `RUST_LOG` wins over `--verbose`.
pub fn init(verbose: bool) {
  let fallback = if verbose { "miam=debug" } else { "miam=warn" };
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(fallback));

  // A second call (tests, embedding) must not panic.
  let _ = tracing_subscriber::registry()
    .with(filter)
    .with(
      tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact(),
    )
    .try_init();
}
