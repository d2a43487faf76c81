//! Tracing subscriber setup: stderr output plus an optional append-only log file

use crate::io::error::{Result, file_system};
use crate::io::progress::ProgressManager;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter directive used when `RUST_LOG` is not set
pub const fn default_directive(quiet: bool, verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    }
}

/// Stderr sink that clears the progress bars while a record is printed
///
/// Each formatted record arrives as one buffer and is written in a single
/// suspended section, so bars and log lines never share a terminal row.
#[derive(Clone)]
pub struct ProgressAwareStderr {
    progress: ProgressManager,
}

impl ProgressAwareStderr {
    /// Write through the bars of `progress`
    pub fn new(progress: &ProgressManager) -> Self {
        Self {
            progress: progress.clone(),
        }
    }
}

impl Write for ProgressAwareStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.progress.suspend(|| io::stderr().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for ProgressAwareStderr {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Install the global tracing subscriber
///
/// Records go to stderr through `progress`, so live bars are cleared and
/// redrawn around each record. When `log_file` is given they are also
/// appended to that file (created if missing) with timestamps and without
/// ANSI colors. A subscriber installed earlier in the process is left in place.
///
/// # Errors
///
/// Returns `FileSystem` if the log file cannot be opened for appending.
pub fn init_logging(
    directive: &str,
    log_file: Option<&Path>,
    progress: &ProgressManager,
) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(file_system(path, "open log file"))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(ProgressAwareStderr::new(progress));

    if tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }

    Ok(())
}
