//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Sets up logging of the events reported during a walk.
///
/// Nothing is logged by default. Use the RUST_LOG environment variable to
/// change that.
///
/// E.g. to see every step of every walk:
///   RUST_LOG=domain_walk=DEBUG
///
/// Or to also see each query sent:
///   RUST_LOG=domain_walk=TRACE
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_thread_ids(true)
        .without_time()
        .try_init()
        .ok();
}
