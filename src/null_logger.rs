use crate::logger::{Logger, Severity};

/// Discards every log statement.
///
/// Use [`NullLogger::instance`] wherever a logger is required but none was
/// configured; handing out the shared instance avoids a "no logger" special
/// case at call sites.
#[derive(Debug, Default)]
pub struct NullLogger;

static INSTANCE: NullLogger = NullLogger;

impl NullLogger {
    /// The shared process-wide instance. Stateless and safe for concurrent
    /// use without synchronization.
    pub fn instance() -> &'static NullLogger {
        &INSTANCE
    }
}

impl Logger for NullLogger {
    #[inline]
    fn record(&self, _message: &str, _severity: Severity) {}
}
