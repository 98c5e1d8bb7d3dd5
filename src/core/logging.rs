//! Logging initialization and utilities

fn builder() -> env_logger::Builder {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
}

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable.
///
/// # Example
/// ```
/// voxeldesk::core::logging::init();
/// log::info!("Editor started");
/// ```
pub fn init() {
    builder().init();
}
