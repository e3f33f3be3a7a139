//! Optional diagnostics for table operations.
//!
//! A table built with a sink reports method entry, growth events and
//! failures to it. The sink only observes: nothing it does can change what
//! an operation returns.

use std::fmt;

pub use tracing::Level;

/// Source position of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
    pub module: &'static str,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.file, self.line, self.module)
    }
}

/// Receiver for diagnostic messages emitted by a table.
///
/// Any `Fn(Level, &Location, fmt::Arguments)` closure that is `Send + Sync`
/// is a sink.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, level: Level, location: &Location, message: fmt::Arguments<'_>);
}

impl<F> DiagnosticSink for F
where
    F: Fn(Level, &Location, fmt::Arguments<'_>) + Send + Sync,
{
    #[inline]
    fn record(&self, level: Level, location: &Location, message: fmt::Arguments<'_>) {
        self(level, location, message)
    }
}

/// Pin a closure's signature to the one [`DiagnosticSink`] expects.
#[inline]
pub fn from_fn<F>(f: F) -> F
where
    F: Fn(Level, &Location, fmt::Arguments<'_>) + Send + Sync,
{
    f
}

/// Sink that forwards every record to a `tracing` event of the same level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, level: Level, location: &Location, message: fmt::Arguments<'_>) {
        let (file, line, module) = (location.file, location.line, location.module);
        match level {
            Level::ERROR => tracing::error!(file, line, module, "{}", message),
            Level::WARN => tracing::warn!(file, line, module, "{}", message),
            Level::INFO => tracing::info!(file, line, module, "{}", message),
            Level::DEBUG => tracing::debug!(file, line, module, "{}", message),
            _ => tracing::trace!(file, line, module, "{}", message),
        }
    }
}

/// Emit a diagnostic through an `Option<&dyn DiagnosticSink>`.
macro_rules! diag {
    ($sink:expr, $level:expr, $($arg:tt)+) => {
        if let Some(sink) = $sink {
            sink.record(
                $level,
                &$crate::diagnostics::Location {
                    file: file!(),
                    line: line!(),
                    module: module_path!(),
                },
                format_args!($($arg)+),
            );
        }
    };
}
