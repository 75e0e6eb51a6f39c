use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global `tracing` subscriber.
///
/// Logs go to stderr so CSV output on stdout stays machine-readable.
/// `RUST_LOG` takes precedence over the `verbose` default.
pub fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "payment_initiation=debug"
    } else {
        "payment_initiation=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .init();
}
