//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for the dashboard: a compact
//! console layer, an optional rolling file (plain or JSON lines), and an
//! [`EnvFilter`](tracing_subscriber::EnvFilter) built from a default level plus
//! optional per-target directives.
//!
//! ## Example
//!
//! ```rust
//! use dash_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder()
//!     .name("dashboard")
//!     .level(LevelFilter::DEBUG)
//!     .directives("dash_event_bus=trace")
//!     .init()
//!     .unwrap();
//!
//! tracing::info!("ready");
//! ```

mod builder;
mod error;
mod filter;

pub use crate::builder::{ConsoleOnly, LoggerBuilder, Named, Unnamed, WithFile};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use crate::filter::parse_level;
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use tracing_appender::non_blocking::WorkerGuard;

/// Handle to the installed subscriber.
///
/// Holds the file writer's worker guard when file output is enabled; dropping
/// the handle flushes pending lines.
#[must_use = "Dropping the logger stops the background file writer"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    #[must_use = "The builder does nothing until `init()` is called"]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub(crate) const fn new(guard: Option<WorkerGuard>) -> Self {
        Self { guard }
    }

    /// `true` when log lines are also written to a file.
    #[must_use]
    pub const fn writes_file(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Flushing log file before shutdown");
        }
    }
}
