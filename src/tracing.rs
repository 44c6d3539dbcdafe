use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};

/// Log destination shared by every writer the subscriber creates. Holds the
/// optional log file; stderr is always written.
#[derive(Clone)]
struct LogSink {
    file: Arc<RwLock<Option<File>>>,
}

struct TeeWriter {
    file: Arc<RwLock<Option<File>>>,
}

impl LogSink {
    fn new() -> Self {
        Self {
            file: Arc::new(RwLock::new(None)),
        }
    }

    fn set_file(&self, log_file: Option<&Path>) {
        // Opened before taking the lock: a failure is logged through this sink.
        let file = log_file.and_then(open_log_file);
        if let Ok(mut guard) = self.file.write() {
            *guard = file;
        }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogSink {
    type Writer = TeeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        TeeWriter {
            file: self.file.clone(),
        }
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = io::stderr().write(buf)?;
        if let Ok(mut guard) = self.file.write() {
            if let Some(file) = guard.as_mut() {
                let _ = file.write_all(&buf[..written]);
            }
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if let Ok(mut guard) = self.file.write() {
            if let Some(file) = guard.as_mut() {
                let _ = file.flush();
            }
        }
        Ok(())
    }
}

static SINK: OnceLock<LogSink> = OnceLock::new();

/// Installs the global subscriber. `RUST_LOG` overrides the `info` default;
/// `log` records are bridged in. Safe to call more than once.
pub fn init() {
    let _ = tracing_log::LogTracer::init();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let sink = SINK.get_or_init(LogSink::new).clone();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(sink)
        .try_init();
}

/// Starts (or stops, with `None`) teeing log output into `log_file`.
pub fn set_log_file(log_file: Option<&Path>) {
    if let Some(sink) = SINK.get() {
        sink.set_file(log_file);
    }
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let _ = std::fs::create_dir_all(parent);
    }
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(err) => {
            log::warn!("Cannot open log file {}: {}", path.display(), err);
            None
        }
    }
}
