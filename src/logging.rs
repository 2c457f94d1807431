//! Logging setup for the binaries.

use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Send log events to stderr, keeping stdout free for command output.
///
/// The `RUST_LOG` environment variable overrides `default_level`, e.g.
/// `RUST_LOG=trip_ledger=debug`. Calling this more than once has no effect.
pub fn init_logging(default_level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(stderr_log)
        .try_init()
        .is_err()
    {
        tracing::debug!("Logging was already initialized");
    }
}
