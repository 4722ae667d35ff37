//! Terminal logger for the `log` facade.
//!
//! Info lines go to stdout untouched, so command output reads like plain
//! `println!`. Warnings and errors go to stderr. With `--logfile` every line
//! that is shown is also appended to the file with ANSI codes removed.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter, Metadata, Record};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use crate::error::CliError;

/// Targets that may log below `Warn`. Dependencies are held to warnings.
const OWN_TARGET_PREFIX: &str = "romshelf";

pub(crate) struct CliLogger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
}

impl CliLogger {
    pub(crate) fn new(quiet: bool, verbose: bool, file: Option<File>) -> Self {
        Self {
            level: max_level(quiet, verbose),
            file: file.map(Mutex::new),
        }
    }

    fn mirror(&self, line: &str) {
        let Some(file) = &self.file else { return };
        let Ok(mut file) = file.lock() else { return };
        let _ = writeln!(file, "{}", strip_ansi_escapes::strip_str(line));
    }
}

/// `--quiet` wins over `--verbose`.
pub(crate) fn max_level(quiet: bool, verbose: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Render one record the way it is shown on the terminal.
pub(crate) fn format_line(level: Level, message: &str) -> String {
    match level {
        Level::Error => format!(
            "{} {message}",
            "error:".if_supports_color(Stderr, |t| t.red())
        ),
        Level::Warn => format!(
            "{} {message}",
            "warning:".if_supports_color(Stderr, |t| t.yellow())
        ),
        Level::Info => message.to_string(),
        Level::Debug | Level::Trace => format!(
            "{}",
            format!("[{}] {message}", level.as_str().to_lowercase())
                .if_supports_color(Stderr, |t| t.dimmed())
        ),
    }
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
            && (metadata.level() <= Level::Warn
                || metadata.target().starts_with(OWN_TARGET_PREFIX))
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), &record.args().to_string());
        match record.level() {
            Level::Info => println!("{line}"),
            _ => eprintln!("{line}"),
        }
        self.mirror(&line);
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// Install the logger for the rest of the process.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let file = match logfile {
        Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
        None => None,
    };
    let logger = CliLogger::new(quiet, verbose, file);
    let level = logger.level;
    log::set_boxed_logger(Box::new(logger))
        .map(|()| log::set_max_level(level))
        .map_err(|e| CliError::other(format!("could not install logger: {e}")))
}
