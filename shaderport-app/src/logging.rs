//! Logging setup for the application.

use crate::config::LogLevel;
use env_logger::{Builder, Env};

/// Initializes the logger at the configured level.
///
/// `RUST_LOG` is respected when set and replaces the configured level, so
/// individual crates can still be turned up (e.g. `RUST_LOG=shaderport_xc=debug`).
///
/// # Arguments
///
/// * `level` - The level used when `RUST_LOG` is not set
pub fn init_logger(level: LogLevel) {
    let env = Env::default().filter_or("RUST_LOG", level.as_str());

    let mut builder = Builder::from_env(env);
    builder.format_timestamp(None);

    // A logger may already be installed when embedded in a larger tool
    if builder.try_init().is_err() {
        log::debug!("Logger already initialized, keeping the existing one");
        return;
    }

    log::debug!("Logger initialized with level: {:?}", level);
}
