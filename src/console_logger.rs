use std::io::Write;

use crate::call_stack::{BacktraceResolver, CallStackResolver};
use crate::format::{DefaultFormatter, MessageFormatter};
use crate::logger::{Logger, Severity};

/// Prints every message, its severity and its origin to standard output.
///
/// Each `record` call writes one complete line while holding the stdout lock,
/// so concurrent callers never interleave partial lines. Write errors are
/// discarded.
pub struct ConsoleLogger {
    formatter: Box<dyn MessageFormatter>,
    resolver: Box<dyn CallStackResolver>,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self {
            formatter: Box::new(DefaultFormatter),
            resolver: Box::new(BacktraceResolver),
        }
    }

    /// Replaces the line formatter.
    pub fn with_formatter(mut self, formatter: impl MessageFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Replaces the caller-location resolver.
    pub fn with_resolver(mut self, resolver: impl CallStackResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for ConsoleLogger {
    fn record(&self, message: &str, severity: Severity) {
        let frames = self.resolver.capture(1);
        let line = self.formatter.format_message(message, severity, &frames);
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{line}");
    }
}
