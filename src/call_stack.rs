use backtrace::Backtrace;

/// Call-stack introspection used to attribute log messages to their origin.
///
/// Resolution is best-effort: on optimized or stripped builds, symbol names
/// and line numbers may be unavailable, in which case the affected fields are
/// `None` and the formatter falls back to a fixed placeholder.

/// A single resolved stack frame.
///
/// `function` holds the fully-qualified symbol path (module path plus function
/// name), with the compiler's trailing `::h<hash>` disambiguator removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFrame {
    /// Fully-qualified function path, if the symbol resolved.
    pub function: Option<String>,
    /// Source line number, if debug info was available.
    pub line: Option<u32>,
}

impl CallFrame {
    pub fn new(function: impl Into<String>, line: u32) -> Self {
        Self {
            function: Some(function.into()),
            line: Some(line),
        }
    }
}

/// Supplies the chain of callers leading to a `record()` call.
///
/// `capture` returns frames ordered innermost-caller-first, starting at the
/// resolver's caller after discarding `skip` additional frames. Sinks pass
/// `skip = 1` so their own `record()` frame is dropped and the first returned
/// frame is the code that invoked the sink.
///
/// Injected into each sink as a boxed strategy, so tests can substitute a
/// fixed frame source.
pub trait CallStackResolver: Send + Sync {
    fn capture(&self, skip: usize) -> Vec<CallFrame>;
}

/// Default resolver backed by platform stack unwinding.
#[derive(Debug, Default)]
pub struct BacktraceResolver;

impl CallStackResolver for BacktraceResolver {
    fn capture(&self, skip: usize) -> Vec<CallFrame> {
        let trace = Backtrace::new();
        let mut frames = Vec::new();
        // None until our own capture frame has been seen; Some(n) while n
        // caller frames remain to be discarded.
        let mut remaining: Option<usize> = None;

        for frame in trace.frames() {
            let symbol = frame.symbols().first();
            let name = symbol.and_then(|s| s.name()).map(|n| n.to_string());

            match remaining {
                None => {
                    let is_self = name
                        .as_deref()
                        .map(|n| n.contains("BacktraceResolver"))
                        .unwrap_or(false);
                    if is_self {
                        remaining = Some(skip);
                    }
                }
                Some(0) => {
                    frames.push(CallFrame {
                        function: name.map(|n| trim_symbol_hash(&n).to_string()),
                        line: symbol.and_then(|s| s.lineno()),
                    });
                }
                Some(n) => remaining = Some(n - 1),
            }
        }

        frames
    }
}

/// Removes the trailing `::h<16 hex digits>` the compiler appends to symbol
/// names, leaving the readable module path.
fn trim_symbol_hash(name: &str) -> &str {
    if let Some(pos) = name.rfind("::h") {
        let tail = &name[pos + 3..];
        if tail.len() == 16 && tail.bytes().all(|b| b.is_ascii_hexdigit()) {
            return &name[..pos];
        }
    }
    name
}
