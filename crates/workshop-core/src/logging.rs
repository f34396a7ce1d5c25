//! Tracing setup: a daily log file plus a small in-memory tail for the HUD.
use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Lines kept for the HUD log column. Older entries only live in the file.
pub const HUD_LOG_CAPACITY: usize = 50;

const LOG_FILE_PREFIX: &str = "workshop";
const LOG_FILE_SUFFIX: &str = "log";
const LOG_RETENTION_FILES: usize = 7;

/// One captured tracing event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    /// `"INFO joke fetched ticket=1"`
    pub fn hud_line(&self) -> String {
        format!("{} {}", self.level, self.message)
    }
}

/// Bounded, shared tail of recent log entries.
///
/// The tracing layer pushes from whichever thread logged; the app loop reads
/// a snapshot each frame without consuming it.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    fn push(&self, entry: LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            if entries.len() >= self.capacity {
                entries.pop_front();
            }
            entries.push_back(entry);
        }
    }

    /// Copy of the buffered entries, oldest first.
    pub fn recent(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Return the log directory path.
///
/// Precedence: `WORKSHOP_LOG_DIR` > `<data_local_dir>/workshop/logs` > `./logs`.
pub fn log_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("WORKSHOP_LOG_DIR").filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    match dirs::data_local_dir() {
        Some(data) => data.join("workshop").join("logs"),
        None => PathBuf::from("logs"),
    }
}

/// Daily-rotated `workshop.<date>.log` files; the appender prunes all but the
/// newest `LOG_RETENTION_FILES`.
fn file_appender(dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(LOG_RETENTION_FILES)
        .build(dir)
}

/// Feeds the HUD tail.
struct HudLayer {
    buffer: LogBuffer,
}

impl<S: tracing::Subscriber> Layer<S> for HudLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.buffer.push(LogEntry {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.finish(),
        });
    }
}

/// Flattens an event into `"<message> key=value ..."`.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        let mut parts: Vec<String> = self.message.into_iter().collect();
        parts.extend(self.fields);
        parts.join(" ")
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }
}

/// Install the global subscriber and return the HUD tail.
///
/// Filter: `WORKSHOP_LOG`, then `RUST_LOG`, then `default_filter` (the
/// configured `log.level`). If the log directory cannot be used the app keeps
/// running with only the HUD tail.
pub fn init(default_filter: &str) -> LogBuffer {
    let buffer = LogBuffer::new(HUD_LOG_CAPACITY);

    let filter = EnvFilter::try_from_env("WORKSHOP_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let log_path = log_dir();
    let file_layer = match file_appender(&log_path) {
        Ok(appender) => Some(
            tracing_subscriber::fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true),
        ),
        Err(err) => {
            eprintln!(
                "warning: file logging disabled ({}): {}",
                log_path.display(),
                err
            );
            None
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(HudLayer {
            buffer: buffer.clone(),
        })
        .init();

    buffer
}
