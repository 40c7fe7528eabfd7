use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_queue::SegQueue;
use parking_lot::Mutex;

use crate::call_stack::{BacktraceResolver, CallStackResolver};
use crate::format::{DefaultFormatter, MessageFormatter};
use crate::logger::{Logger, Severity};

/// Number of buffered lines that triggers an asynchronous flush.
pub const DEFAULT_BUFFER_SIZE: usize = 100;

/// Flush flag and the handle of the most recently scheduled flush worker.
///
/// `flushing` is the at-most-one-flush invariant: it is set inside the same
/// critical section as the threshold check (or by an inline flush claiming it
/// for itself) and cleared when the drain finishes, success or failure alike.
struct WriterState {
    flushing: bool,
    task: Option<JoinHandle<()>>,
}

/// State shared between the sink and its flush workers.
struct Shared {
    path: PathBuf,
    queue: SegQueue<String>,
    writer: Mutex<WriterState>,
}

/// Prints every message, its severity and its origin to a file.
///
/// Lines are buffered in an in-memory FIFO queue and appended to the file in
/// batches: once the queue reaches the configured size, a flush is scheduled
/// on a worker thread, so `record` never blocks on file I/O. At most one
/// flush runs at a time per sink instance, and the drain continues until the
/// queue is empty, including lines enqueued while the flush is underway.
///
/// I/O failures during a flush are swallowed; undrained lines stay queued for
/// the next threshold crossing or for shutdown. Call [`shutdown`] before the
/// process terminates (or just drop the sink) to persist whatever is still
/// buffered; losing lines on abnormal termination is accepted.
///
/// [`shutdown`]: FileLogger::shutdown
///
/// # Examples
///
/// ```
/// use buffered_logger::{FileLogger, Logger, Severity};
///
/// let path = std::env::temp_dir().join("buffered_logger_doc.log");
/// let sink = FileLogger::new(&path).with_buffer_size(3);
///
/// sink.record("a", Severity::Message);
/// sink.record("b", Severity::Message);
/// sink.record("c", Severity::Message); // third line crosses the threshold
///
/// sink.shutdown(); // drains anything still pending
/// # let _ = std::fs::remove_file(&path);
/// ```
pub struct FileLogger {
    shared: Arc<Shared>,
    buffer_size: usize,
    formatter: Box<dyn MessageFormatter>,
    resolver: Box<dyn CallStackResolver>,
}

impl FileLogger {
    /// Creates a new file sink appending to `path`.
    ///
    /// The file is created on the first flush if absent. The buffer threshold
    /// defaults to [`DEFAULT_BUFFER_SIZE`].
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            shared: Arc::new(Shared {
                path: path.as_ref().to_path_buf(),
                queue: SegQueue::new(),
                writer: Mutex::new(WriterState {
                    flushing: false,
                    task: None,
                }),
            }),
            buffer_size: DEFAULT_BUFFER_SIZE,
            formatter: Box::new(DefaultFormatter),
            resolver: Box::new(BacktraceResolver),
        }
    }

    /// Sets the number of buffered lines that triggers a flush (min 1).
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
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

    /// The output path lines are appended to.
    pub fn path(&self) -> &Path {
        &self.shared.path
    }

    /// The configured buffer threshold.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Number of lines currently buffered and awaiting a flush.
    pub fn pending(&self) -> usize {
        self.shared.queue.len()
    }

    /// Persists all buffered lines, blocking until done.
    ///
    /// If a flush is in flight, waits for it to complete, then runs one
    /// synchronous drain for anything enqueued since. Idempotent: once the
    /// queue is empty this opens the file, finds nothing to write, and
    /// returns. Invoked automatically when the sink is dropped.
    pub fn shutdown(&self) {
        let task = self.shared.writer.lock().task.take();
        if let Some(task) = task {
            let _ = task.join();
        }
        flush_pending(&self.shared);
    }
}

impl Logger for FileLogger {
    fn record(&self, message: &str, severity: Severity) {
        let frames = self.resolver.capture(1);
        let line = self.formatter.format_message(message, severity, &frames);
        self.shared.queue.push(line);

        // Threshold check and flush claim share one critical section, so
        // concurrent callers schedule at most one flush per crossing.
        let mut writer = self.shared.writer.lock();
        if self.shared.queue.len() >= self.buffer_size && !writer.flushing {
            writer.flushing = true;
            let shared = Arc::clone(&self.shared);
            let spawned = thread::Builder::new()
                .name("file-logger-flush".into())
                .spawn(move || {
                    let _ = drain_to_file(&shared);
                    shared.writer.lock().flushing = false;
                });
            match spawned {
                Ok(task) => writer.task = Some(task),
                // Spawn failure: release the claim, lines stay queued.
                Err(_) => writer.flushing = false,
            }
        }
    }
}

impl Drop for FileLogger {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Synchronous flush: claims the flag, drains, releases. No-op if a flush is
/// already in progress.
fn flush_pending(shared: &Shared) {
    {
        let mut writer = shared.writer.lock();
        if writer.flushing {
            return;
        }
        writer.flushing = true;
    }

    let _ = drain_to_file(shared);

    shared.writer.lock().flushing = false;
}

/// Appends queued lines to the output file in dequeue order until the queue
/// is empty. The file handle lives only for this call. Any error aborts the
/// drain; remaining lines stay queued.
fn drain_to_file(shared: &Shared) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&shared.path)?;
    let mut out = BufWriter::new(file);

    while let Some(line) = shared.queue.pop() {
        writeln!(out, "{line}")?;
    }

    out.flush()
}
