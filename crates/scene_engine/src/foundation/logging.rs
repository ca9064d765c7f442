//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    // A host may already have installed a logger; keep theirs.
    let _ = env_logger::try_init();
}

/// Initialize the logging system with a filter string such as `"info"` or `"scene_engine=debug"`
///
/// `RUST_LOG` still takes precedence when set.
pub fn init_with_filter(filter: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter);
    if let Ok(env_filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&env_filter);
    }
    let _ = builder.try_init();
}
