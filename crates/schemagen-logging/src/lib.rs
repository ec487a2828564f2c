//! schemagen-logging - Tracing setup for the schemagen CLI
//!
//! This crate provides:
//! - [`LogLevel`], the configurable verbosity
//! - [`init_logging`], which installs a stderr `fmt` subscriber once per process

mod level;
mod subscriber;

pub use level::{LogLevel, ParseLogLevelError};
pub use subscriber::{build_filter, init_logging};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, init_logging};
}
