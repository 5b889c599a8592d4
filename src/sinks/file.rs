//! Log directory and file setup

use super::{ConsoleSink, FanOut, Sink, SinkProvider};
use crate::core::{LogLevel, LoggerError, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// Default directory, relative to the working directory
pub const DEFAULT_LOG_DIR: &str = "log";

/// Default file name inside the log directory
pub const DEFAULT_LOG_FILE: &str = "log4u.log";

/// Opens one append-only file shared by every level, each level fanned out
/// with the console.
///
/// # Example
///
/// ```no_run
/// use log4u::sinks::DirectorySinkProvider;
/// use log4u::Log4u;
///
/// let provider = DirectorySinkProvider::new("/var/log/myapp", "myapp.log")
///     .expect("log directory is writable");
/// let logger = Log4u::builder().sink_provider(provider).build().unwrap();
/// ```
#[derive(Debug)]
pub struct DirectorySinkProvider {
    path: PathBuf,
    file: File,
    console: bool,
}

impl DirectorySinkProvider {
    /// Create `dir` if missing and open `dir/file_name` for appending
    pub fn new(dir: impl AsRef<Path>, file_name: &str) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            fs::create_dir_all(dir).map_err(|e| {
                LoggerError::io_operation(
                    "creating log directory",
                    format!("cannot create '{}'", dir.display()),
                    e,
                )
            })?;
        }

        let path = dir.join(file_name);
        let file = open_append(&path)?;
        Ok(Self {
            path,
            file,
            console: true,
        })
    }

    /// Whether lines are also copied to stdout
    #[must_use]
    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SinkProvider for DirectorySinkProvider {
    fn open(&self, _level: LogLevel) -> Result<Sink> {
        let file = self.file.try_clone().map_err(|e| {
            LoggerError::io_operation(
                "sharing log file handle",
                format!("cannot duplicate handle of '{}'", self.path.display()),
                e,
            )
        })?;

        let fan = FanOut::new(Vec::new()).with(file);
        let fan = if self.console {
            fan.with(ConsoleSink::new())
        } else {
            fan
        };
        Ok(Box::new(fan))
    }
}

/// Open `path` for appending, creating it if needed
pub fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            LoggerError::io_operation(
                "opening log file",
                format!("cannot open '{}'", path.display()),
                e,
            )
        })
}
