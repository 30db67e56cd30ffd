//! `tracing` initialization for `classy` binaries.
//!
//! Library crates only ever emit `tracing` events; only the CLI binary
//! installs a subscriber, and it does so through this single function so
//! every entry point configures verbosity the same way.

use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber.
///
/// `verbosity` follows the CLI's repeated `-v` flag count: `0` is
/// warnings and above, `1` is info, `2` is debug, `3+` is trace. Set
/// `RUST_LOG` to override this mapping entirely.
pub fn init(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
