use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logs go to stderr so stdout stays clean for results and JSON events.
pub fn init_tracing(level: &str) {
    // Prefer RUST_LOG from env, otherwise use the provided level string.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
