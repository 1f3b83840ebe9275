use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the stderr logger used by the binary. `RUST_LOG` takes precedence
/// over `verbose`.
pub fn init_logger(verbose: bool) {
  let default_filter = if verbose {
    "kernel_header=debug"
  } else {
    "kernel_header=info"
  };

  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

  tracing_subscriber::registry()
    .with(filter)
    .with(
      tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact(),
    )
    .init();
}
