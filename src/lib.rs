//! # Buffered Logger
//!
//! A minimal structured-logging library: one `Logger` capability, three
//! interchangeable sinks, and a shared message-formatting base.
//!
//! * **Non-blocking file logging**: lines are buffered in memory and flushed
//!   to disk in batches on a worker thread
//! * **Single-flight flushes**: at most one flush runs at a time per sink,
//!   and shutdown drains everything still buffered
//! * **Caller attribution**: each line carries the location that logged it,
//!   with a full call-chain dump for `Critical` messages
//! * **Pluggable formatting**: line layout, caller rendering and clock are
//!   independently overridable strategies
//!
//! ## Main Components
//!
//! * `Logger` / `Severity`: the capability every sink implements
//! * `FileLogger`: buffered asynchronous file sink (the interesting one)
//! * `ConsoleLogger`: synchronous stdout sink
//! * `NullLogger`: shared no-op sink for callers that need a harmless default
//! * `MessageFormatter` / `CallStackResolver`: the formatting and
//!   caller-location strategies
//!
//! ## Quick Start
//!
//! ```
//! use buffered_logger::{FileLogger, Logger, NullLogger, Severity};
//!
//! let path = std::env::temp_dir().join("buffered_logger_quickstart.log");
//! let sink = FileLogger::new(&path).with_buffer_size(100);
//!
//! sink.record("service starting", Severity::Message);
//! sink.record("config file missing, using defaults", Severity::Warning);
//!
//! // Sinks are used polymorphically; the null sink stands in when no
//! // logger was configured.
//! let fallback: &dyn Logger = NullLogger::instance();
//! fallback.record("discarded", Severity::Message);
//!
//! // Persist whatever is still buffered (also runs on drop).
//! sink.shutdown();
//! # let _ = std::fs::remove_file(&path);
//! ```

pub mod call_stack;
pub mod console_logger;
pub mod file_logger;
pub mod format;
pub mod logger;
pub mod null_logger;

pub use call_stack::{BacktraceResolver, CallFrame, CallStackResolver};
pub use console_logger::ConsoleLogger;
pub use file_logger::{FileLogger, DEFAULT_BUFFER_SIZE};
pub use format::{DefaultFormatter, MessageFormatter, UNKNOWN_FUNCTION};
pub use logger::{Logger, Severity};
pub use null_logger::NullLogger;
