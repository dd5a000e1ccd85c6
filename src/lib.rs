pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod server;

/// `RUST_LOG`-driven subscriber shared by both binaries. Logs go to stderr
/// so `schoolctl --json` output stays parseable.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
