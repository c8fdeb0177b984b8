use std::{
    fs::OpenOptions,
    io::Write,
    sync::{
        Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::trace::trace::TraceEvent;

type Sink = Box<dyn Write + Send>;

/// Writes tracker trace events as JSON lines.
///
/// A sink that cannot be opened or written to only produces a warning on
/// stderr; tracing then carries on as a no-op.
pub struct TraceLogger {
    sink: Option<Mutex<Sink>>,
    steps: AtomicU64,
}

impl TraceLogger {
    /// Append to the file at `path`, creating it when missing.
    pub fn new(path: &str) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => Self::to_writer(f),
            Err(e) => {
                eprintln!("Warning: could not open trace file '{}': {}", path, e);
                Self::disabled()
            }
        }
    }

    pub fn to_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Some(Mutex::new(Box::new(writer))),
            steps: AtomicU64::new(0),
        }
    }

    pub fn disabled() -> Self {
        Self {
            sink: None,
            steps: AtomicU64::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Step number for the next event; increases even while disabled.
    pub fn next_step(&self) -> u64 {
        self.steps.fetch_add(1, Ordering::Relaxed)
    }

    pub fn log(&self, event: &TraceEvent) {
        let Some(sink) = &self.sink else {
            return;
        };

        let json = match serde_json::to_string(event) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Warning: failed to serialize trace event: {}", e);
                return;
            }
        };

        let mut writer = match sink.lock() {
            Ok(w) => w,
            Err(e) => {
                eprintln!("Warning: trace logger lock poisoned: {}", e);
                return;
            }
        };

        if let Err(e) = writeln!(writer, "{}", json).and_then(|_| writer.flush()) {
            eprintln!("Warning: failed to write trace event: {}", e);
        }
    }
}
