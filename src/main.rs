use anyhow::Context;
use clap::Parser;
use kernel_header::{Config, compose, logging};

fn main() -> anyhow::Result<()> {
  let config = Config::parse();
  logging::init_logger(config.verbose);

  tracing::debug!(?config, "starting");

  let sources = compose(&config).with_context(|| {
    format!(
      "Failed to compose {} from {}",
      config.output.display(),
      config.scan_root.display()
    )
  })?;

  tracing::info!(
    output = %config.output.display(),
    kernels = sources.len(),
    "header written"
  );

  Ok(())
}
