//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable, e.g. `RUST_LOG=vigil=debug`
/// to see per-frame LOD statistics.
///
/// # Example
/// ```
/// vigil::core::logging::init();
/// log::info!("Pipeline started");
/// ```
pub fn init() {
    init_with_default("info");
}

/// Initialize logging with an explicit fallback filter.
///
/// Safe to call more than once; later calls are ignored, which keeps the
/// headless runner and tests from panicking on double initialization.
pub fn init_with_default(filter: &str) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(filter)
    ).try_init();
}
