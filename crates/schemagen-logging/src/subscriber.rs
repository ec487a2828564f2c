//! Global subscriber installation

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

use crate::level::LogLevel;

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Filter for `level`, unless `RUST_LOG` holds a valid directive set.
pub fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.level_filter().into()))
}

/// Install a `fmt` subscriber writing to stderr.
///
/// Only the first call has an effect; later calls (and calls made after
/// another global subscriber was set) are ignored.
pub fn init_logging(level: LogLevel) {
    INITIALIZED.get_or_init(|| {
        let result = tracing_subscriber::fmt()
            .with_env_filter(build_filter(level))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
        // Ignore error if a subscriber is already installed
        let _ = result;
    });
}
