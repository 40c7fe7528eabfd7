use crate::call_stack::CallFrame;
use crate::logger::Severity;

/// Rendered in place of a frame that could not be resolved.
pub const UNKNOWN_FUNCTION: &str = "{Unknown Function}";

/// Turns a message, its severity and the captured caller chain into a
/// printable line.
///
/// All three operations have default implementations and are independently
/// overridable, so a custom formatter can change the line layout, the
/// caller-location rendering, or the clock without touching the others.
/// Overriding `render_frame` alone affects both the single-caller prefix of
/// Message/Warning lines and every line of a Critical chain dump.
///
/// # Line format
///
/// * `Message` / `Warning`:
///   `[HH:MM:SS][Severity] <caller-location> - <message>`, where the caller
///   location comes from the first captured frame (the immediate caller of
///   `record()`).
/// * `Critical`:
///   `[HH:MM:SS][Severity] <message>` followed by one tab-indented
///   caller-location line per captured frame, innermost caller first.
///
/// # Examples
///
/// ```
/// use buffered_logger::{CallFrame, DefaultFormatter, MessageFormatter, Severity};
///
/// let formatter = DefaultFormatter;
/// let frames = [CallFrame::new("app::startup::init", 42)];
/// let line = formatter.format_message("cache warmed", Severity::Message, &frames);
/// assert!(line.ends_with("app::startup::init:42 - cache warmed"));
/// ```
pub trait MessageFormatter: Send + Sync {
    /// Formats one log record into its final line.
    fn format_message(&self, message: &str, severity: Severity, frames: &[CallFrame]) -> String {
        let time = self.timestamp();
        match severity {
            Severity::Message | Severity::Warning => {
                let caller = self.render_frame(frames.first());
                format!("[{time}][{severity}] {caller} - {message}")
            }
            Severity::Critical => {
                let mut line = format!("[{time}][{severity}] {message}");
                for frame in frames {
                    line.push_str("\n\t");
                    line.push_str(&self.render_frame(Some(frame)));
                }
                line
            }
        }
    }

    /// Renders one stack frame as `<fully-qualified-function>:<line>`.
    ///
    /// Yields [`UNKNOWN_FUNCTION`] when the frame or its function is
    /// unavailable; an unavailable line number renders as `0`.
    fn render_frame(&self, frame: Option<&CallFrame>) -> String {
        match frame.and_then(|f| f.function.as_deref()) {
            Some(function) => {
                let line = frame.and_then(|f| f.line).unwrap_or(0);
                format!("{function}:{line}")
            }
            None => UNKNOWN_FUNCTION.to_string(),
        }
    }

    /// Current wall-clock time as 24-hour `HH:MM:SS`, local timezone, whole
    /// seconds. Overridable so tests can pin the clock.
    fn timestamp(&self) -> String {
        chrono::Local::now().format("%H:%M:%S").to_string()
    }
}

/// The stock formatter: every `MessageFormatter` default, no state.
#[derive(Debug, Default)]
pub struct DefaultFormatter;

impl MessageFormatter for DefaultFormatter {}
