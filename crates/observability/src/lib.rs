//! Tracing/logging setup shared by every gridstore binary and test harness.

pub mod tracing;

pub use crate::tracing::LogConfig;

/// Initialize process-wide tracing from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&LogConfig::from_env());
}
