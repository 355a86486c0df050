//! Process-wide tracing setup shared by the binaries.

/// Initialize tracing with the default settings (JSON, `info`, `RUST_LOG` override).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&tracing::LogSettings::default());
}

/// Subscriber configuration (filter, output format).
pub mod tracing;

pub use self::tracing::{LogFormat, LogSettings};
