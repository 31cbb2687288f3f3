//! JSON-lines log output for profiler records.
//!
//! One JSON object per line with `timestamp`, `level`, `target` and a
//! `fields` object holding the message and the record's fields. Records
//! sent through the `log` facade are picked up as well.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::util::{SubscriberInitExt as _, TryInitError};

pub const DEFAULT_LOG_FILE: &str = "profiler.log";

/// Where [`init`] ended up sending the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

/// Appends to `path`, creating the file if needed.
pub fn file_writer(path: &Path) -> io::Result<BoxMakeWriter> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BoxMakeWriter::new(Mutex::new(file)))
}

/// Opens `path`, falling back to stderr when the file cannot be opened.
/// The failure is reported once on stdout and is not an error.
pub fn file_or_stderr(path: &Path) -> (BoxMakeWriter, LogTarget) {
    match file_writer(path) {
        Ok(writer) => (writer, LogTarget::File(path.to_path_buf())),
        Err(err) => {
            println!("Failed to log to file, using default stderr: {err}");
            (BoxMakeWriter::new(io::stderr), LogTarget::Stderr)
        }
    }
}

pub fn subscriber(
    writer: BoxMakeWriter,
    level: LevelFilter,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .json()
        .with_timer(ChronoLocal::rfc_3339())
        .with_ansi(false)
        .with_target(true)
        .with_max_level(level)
        .with_writer(writer)
        .finish()
}

/// Installs the JSON subscriber as the process-wide default, writing to
/// `path` or to stderr if `path` cannot be opened.
///
/// Fails only if a subscriber or logger was already installed.
pub fn init(path: &Path, level: LevelFilter) -> Result<LogTarget, TryInitError> {
    let (writer, target) = file_or_stderr(path);
    subscriber(writer, level).try_init()?;
    Ok(target)
}
