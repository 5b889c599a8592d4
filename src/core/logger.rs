//! Main logger implementation

use super::{
    caller::{self, CallSite},
    config::{LoggerSettings, DEFAULT_DRAIN_WARMUP, DEFAULT_QUEUE_CAPACITY},
    consumer::{self, Dispatcher, FatalHandler, LevelSink, Shared},
    error::{LoggerError, Result},
    formatter::LevelFormat,
    log_level::{should_emit, LogLevel},
    log_record::{format_body, line_body, LogRecord},
    metrics::LoggerMetrics,
};
use crate::sinks::{DirectorySinkProvider, SinkProvider};
use crossbeam_channel::{bounded, Sender, TrySendError};
use std::fmt;
use std::panic::Location;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// How long dropping a logger waits for its consumer to drain (5 seconds)
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Asynchronous leveled logger.
///
/// Producers render their message, pass the level gate and push a record onto
/// a bounded queue; one background thread writes records in queue order. When
/// the queue is full producers block, so nothing is ever dropped.
///
/// # Example
///
/// ```
/// use log4u::sinks::{FnSinkProvider, MemorySink};
/// use log4u::{Log4u, LogLevel};
/// use std::time::Duration;
///
/// let buffer = MemorySink::new();
/// let sink = buffer.clone();
/// let logger = Log4u::builder()
///     .level(LogLevel::Warn)
///     .colors(false)
///     .drain_warmup(Duration::ZERO)
///     .sink_provider(FnSinkProvider::new(move |_| Ok(Box::new(sink.clone()))))
///     .build()
///     .unwrap();
///
/// logger.info(&[&"not shown"]);
/// logger.warnf(format_args!("disk {}% full", 91));
/// logger.wait();
///
/// assert!(buffer.contents().ends_with("WARN disk 91% full\n"));
/// ```
pub struct Log4u {
    shared: Arc<Shared>,
    sender: Option<Sender<LogRecord>>,
    worker: Option<thread::JoinHandle<()>>,
    capacity: usize,
    drain_warmup: Duration,
}

impl Log4u {
    /// Create a builder for Log4u
    #[must_use]
    pub fn builder() -> Log4uBuilder {
        Log4uBuilder::new()
    }

    /// Logger writing to `./log/log4u.log` and stdout
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn from_settings(settings: LoggerSettings) -> Result<Self> {
        Self::builder().settings(settings).build()
    }

    /// Set the verbosity threshold
    pub fn set_level(&self, level: LogLevel) {
        self.shared.set_threshold(level);
    }

    /// Set the threshold from a raw value; anything out of range means `OUT`
    pub fn set_level_raw(&self, raw: u8) {
        self.set_level(LogLevel::from_raw(raw));
    }

    pub fn level(&self) -> LogLevel {
        self.shared.threshold()
    }

    /// Whether a call at `level` would currently be queued
    pub fn enabled(&self, level: LogLevel) -> bool {
        should_emit(level, self.level())
    }

    /// Queue a line made of `args` joined by spaces
    #[track_caller]
    pub fn log_line(&self, level: LogLevel, args: &[&dyn fmt::Display]) {
        self.log_at(level, Location::caller(), || line_body(args));
    }

    /// Queue a line rendered from a format string
    #[track_caller]
    pub fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.log_at(level, Location::caller(), || format_body(args));
    }

    /// Gate, render and enqueue; `location` is where the public call was made
    pub fn log_at(&self, level: LogLevel, location: &Location<'_>, body: impl FnOnce() -> String) {
        if !should_emit(level, self.shared.threshold()) {
            self.shared.metrics.record_suppressed();
            return;
        }

        let body = body();
        let site = if level.tracks_location() {
            caller::resolve(Some(location))
        } else {
            CallSite::none()
        };
        self.enqueue(LogRecord::new(level, site, body));
    }

    fn enqueue(&self, record: LogRecord) {
        let Some(ref sender) = self.sender else {
            return;
        };

        self.shared.metrics.record_enqueued();
        match sender.try_send(record) {
            Ok(()) => {}
            Err(TrySendError::Full(record)) => {
                // backpressure: wait for the consumer rather than drop
                self.shared.metrics.record_block();
                let _ = sender.send(record);
            }
            Err(TrySendError::Disconnected(_)) => {
                // consumer has stopped after a fatal sink failure
            }
        }
    }

    #[inline]
    #[track_caller]
    pub fn out(&self, args: &[&dyn fmt::Display]) {
        self.log_line(LogLevel::Out, args);
    }

    #[inline]
    #[track_caller]
    pub fn outf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Out, args);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, args: &[&dyn fmt::Display]) {
        self.log_line(LogLevel::Info, args);
    }

    #[inline]
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Info, args);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, args: &[&dyn fmt::Display]) {
        self.log_line(LogLevel::Warn, args);
    }

    #[inline]
    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Warn, args);
    }

    /// Error lines are queued whatever the threshold
    #[inline]
    #[track_caller]
    pub fn error(&self, args: &[&dyn fmt::Display]) {
        self.log_line(LogLevel::Error, args);
    }

    #[inline]
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Error, args);
    }

    /// Block until every queued record has been written.
    ///
    /// Sleeps the drain warm-up first, then polls. This is a best-effort
    /// flush for shutdown and tests: records queued concurrently by other
    /// threads after the check are not waited for. Returns early if the
    /// consumer has stopped.
    pub fn wait(&self) {
        thread::sleep(self.drain_warmup);
        while self.shared.metrics.pending() > 0 && !self.shared.is_stopped() {
            thread::sleep(DRAIN_POLL_INTERVAL);
        }
    }

    /// Records currently sitting in the queue
    pub fn queue_len(&self) -> usize {
        self.sender.as_ref().map_or(0, Sender::len)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn drain_warmup(&self) -> Duration {
        self.drain_warmup
    }

    /// Whether the consumer is gone, after a fatal sink failure
    pub fn is_stopped(&self) -> bool {
        self.shared.is_stopped()
    }

    /// Get the logger metrics
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }
}

impl Drop for Log4u {
    fn drop(&mut self) {
        // Closing the queue lets the consumer drain what is left and exit
        drop(self.sender.take());

        if let Some(handle) = self.worker.take() {
            let start = Instant::now();
            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        eprintln!(
                            "[LOG4U ERROR] Consumer thread panicked during shutdown: {:?}",
                            e
                        );
                    }
                    break;
                }

                if start.elapsed() >= DEFAULT_SHUTDOWN_TIMEOUT {
                    eprintln!(
                        "[LOG4U WARNING] Consumer thread did not finish within {:?}, \
                         {} records may be lost.",
                        DEFAULT_SHUTDOWN_TIMEOUT,
                        self.shared.metrics.pending()
                    );
                    break;
                }

                thread::sleep(Duration::from_millis(10));
            }
        }
    }
}

impl fmt::Debug for Log4u {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Log4u")
            .field("level", &self.level())
            .field("capacity", &self.capacity)
            .field("queued", &self.queue_len())
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

/// Builder for constructing Log4u with a fluent API
///
/// # Example
/// ```no_run
/// use log4u::{Flags, LevelFormat, Log4u, LogLevel};
///
/// let logger = Log4u::builder()
///     .level(LogLevel::Info)
///     .queue_capacity(500)
///     .format(LogLevel::Error, LevelFormat::new("E ", Flags::STD | Flags::LONG_FILE))
///     .log_dir("/var/log/myapp")
///     .build()
///     .expect("log directory is writable");
/// ```
pub struct Log4uBuilder {
    level: LogLevel,
    capacity: usize,
    drain_warmup: Duration,
    use_colors: bool,
    formats: [Option<LevelFormat>; 4],
    log_dir: PathBuf,
    file_name: String,
    console: bool,
    provider: Option<Box<dyn SinkProvider>>,
    on_fatal: Option<FatalHandler>,
}

impl Log4uBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        let defaults = LoggerSettings::default();
        Self {
            level: defaults.level,
            capacity: DEFAULT_QUEUE_CAPACITY,
            drain_warmup: DEFAULT_DRAIN_WARMUP,
            use_colors: defaults.colored_prefixes,
            formats: [None, None, None, None],
            log_dir: defaults.log_dir,
            file_name: defaults.file_name,
            console: defaults.console,
            provider: None,
            on_fatal: None,
        }
    }

    /// Apply loaded settings
    #[must_use = "builder methods return a new value"]
    pub fn settings(mut self, settings: LoggerSettings) -> Self {
        self.level = settings.level;
        self.capacity = settings.queue_capacity;
        self.drain_warmup = settings.drain_warmup();
        self.use_colors = settings.colored_prefixes;
        self.log_dir = settings.log_dir;
        self.file_name = settings.file_name;
        self.console = settings.console;
        self
    }

    /// Set the initial verbosity threshold
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the queue capacity; producers block once it is reached
    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Pause before [`Log4u::wait`] starts polling
    #[must_use = "builder methods return a new value"]
    pub fn drain_warmup(mut self, warmup: Duration) -> Self {
        self.drain_warmup = warmup;
        self
    }

    /// Use ANSI colors in the stock level tags
    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Replace the stock prefix and flags of one level
    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, level: LogLevel, format: LevelFormat) -> Self {
        self.formats[level.index()] = Some(format);
        self
    }

    /// Directory of the stock file sink
    #[must_use = "builder methods return a new value"]
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// File name of the stock file sink
    #[must_use = "builder methods return a new value"]
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Whether the stock sink also writes to stdout
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Use a custom provider instead of the stock file + console sink
    #[must_use = "builder methods return a new value"]
    pub fn sink_provider<P: SinkProvider + 'static>(mut self, provider: P) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Replace the action run when a sink fails.
    ///
    /// The default reports the failure and exits the process. A replacement
    /// that returns leaves the logger stopped: nothing is written afterwards.
    #[must_use = "builder methods return a new value"]
    pub fn on_fatal(mut self, handler: FatalHandler) -> Self {
        self.on_fatal = Some(handler);
        self
    }

    /// Open the sinks, register the panic-site hook and start the consumer thread
    pub fn build(self) -> Result<Log4u> {
        if self.capacity == 0 {
            return Err(LoggerError::config("Log4uBuilder", "queue capacity must be at least 1"));
        }

        let provider: Box<dyn SinkProvider> = match self.provider {
            Some(provider) => provider,
            None => {
                let provider = DirectorySinkProvider::new(&self.log_dir, &self.file_name)?;
                Box::new(provider.with_console(self.console))
            }
        };

        let mut sinks = Vec::with_capacity(LogLevel::ALL.len());
        for (level, format) in LogLevel::ALL.into_iter().zip(self.formats) {
            let format = format.unwrap_or_else(|| LevelFormat::default_for(level, self.use_colors));
            sinks.push(LevelSink::new(level, format, provider.open(level)?));
        }
        let sinks: [LevelSink; 4] = match sinks.try_into() {
            Ok(sinks) => sinks,
            Err(_) => return Err(LoggerError::other("expected one sink per level")),
        };

        caller::install_panic_hook();
        let shared = Arc::new(Shared::new(self.level));
        let (sender, receiver) = bounded(self.capacity);
        let on_fatal = self
            .on_fatal
            .unwrap_or_else(|| Arc::new(consumer::exit_process) as FatalHandler);

        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("log4u-consumer".to_string())
            .spawn(move || {
                consumer::run(receiver, Dispatcher::new(sinks), worker_shared, on_fatal);
            })
            .map_err(|e| {
                LoggerError::io_operation("spawning consumer thread", "thread spawn failed", e)
            })?;

        Ok(Log4u {
            shared,
            sender: Some(sender),
            worker: Some(worker),
            capacity: self.capacity,
            drain_warmup: self.drain_warmup,
        })
    }
}

impl Default for Log4uBuilder {
    fn default() -> Self {
        Self::new()
    }
}
