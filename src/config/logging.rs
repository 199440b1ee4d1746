use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber. RUST_LOG controls the filter, with a
/// sensible default for the crate itself.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,devforum_backend=debug"));
    fmt().with_env_filter(filter).init();
}
