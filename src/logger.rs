// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::Error;
use crate::LogLevel;
use crate::clock::Clock;
use crate::console::Console;
use crate::console::Stdout;
use crate::file::OpenFile;
use crate::file::TimestampedFile;
use crate::file::ensure_directory;
use crate::filter::SeverityFilter;
use crate::options::Config;
use crate::options::LoggerOptions;
use crate::options::Resolved;
use crate::sink::Drain;
use crate::sink::FileSink;
use crate::sink::FileState;
use crate::sink::PendingLine;

/// Error details appended to a log message.
///
/// Rendered below the message as the error text, followed by the trace text if any.
///
/// # Examples
///
/// ```
/// use twinlog::ErrorDetail;
///
/// let err = std::io::Error::other("disk full");
/// let detail = ErrorDetail::from(&err).with_trace("at save_settings");
/// assert_eq!(detail.to_string(), "disk full\nat save_settings");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    message: String,
    trace: Option<String>,
}

impl ErrorDetail {
    /// Creates a detail with the given error text.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trace: None,
        }
    }

    /// Creates a detail from an error, using its chain of sources as trace.
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        let mut causes = vec![];
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(format!("caused by: {cause}"));
            source = cause.source();
        }

        Self {
            message: err.to_string(),
            trace: (!causes.is_empty()).then(|| causes.join("\n")),
        }
    }

    /// Sets the trace text, such as a captured backtrace.
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }
}

impl<E: std::error::Error> From<&E> for ErrorDetail {
    fn from(err: &E) -> Self {
        ErrorDetail::from_error(err)
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(trace) = &self.trace {
            write!(f, "\n{trace}")?;
        }
        Ok(())
    }
}

/// A builder for configuring a [`Logger`].
///
/// # Examples
///
/// ```
/// use twinlog::LogLevel;
/// use twinlog::LoggerBuilder;
/// use twinlog::LoggerOptions;
/// use twinlog::console::Stdout;
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut logger = LoggerBuilder::new()
///     .options(
///         LoggerOptions::new()
///             .console_level(LogLevel::Warn)
///             .file_level(LogLevel::Debug)
///             .log_directory(dir.path())
///             .buffer_limit(20),
///     )
///     .console(Stdout::default().no_color())
///     .build();
///
/// logger.warn("disk almost full");
/// ```
#[must_use = "call `build` to create the logger"]
#[derive(Debug)]
pub struct LoggerBuilder {
    options: Option<LoggerOptions>,
    console: Box<dyn Console>,
    opener: Option<Box<dyn OpenFile>>,
    clock: Clock,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Create a new builder with no options, printing to stdout and logging to a timestamped
    /// file under the log directory.
    pub fn new() -> Self {
        Self {
            options: None,
            console: Box::new(Stdout::default()),
            opener: None,
            clock: Clock::System,
        }
    }

    /// Sets the options to resolve. Without options, every default is adopted silently.
    pub fn options(mut self, options: LoggerOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Sets the console lines are printed to.
    pub fn console(mut self, console: impl Console) -> Self {
        self.console = Box::new(console);
        self
    }

    /// Replaces the default timestamped file with a custom opener.
    ///
    /// A custom opener owns its storage: the logger does not create the log directory for it.
    pub fn file_opener(mut self, opener: impl OpenFile) -> Self {
        self.opener = Some(Box::new(opener));
        self
    }

    #[cfg(test)]
    pub(crate) fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the logger.
    ///
    /// Never fails: invalid options fall back to defaults and file problems turn file logging
    /// off. Both are reported through the logger itself once it is able to log.
    pub fn build(self) -> Logger {
        let LoggerBuilder {
            options,
            console,
            opener,
            clock,
        } = self;
        let Resolved {
            config,
            substitutions,
            directory_error,
        } = Config::resolve(options.as_ref());

        let mut logger = Logger {
            console_filter: SeverityFilter::new(config.console_level()),
            file_filter: SeverityFilter::new(config.file_level()),
            sink: FileSink::new(config.buffer_limit()),
            config,
            console,
            clock,
            log_file: None,
        };

        logger.info("Initializing logger");
        let dir = logger.config.log_directory().display().to_string();
        logger.debug(format_args!("Log directory set to {dir}"));

        let opener = if let Some(err) = directory_error {
            logger.error_with(
                "Failed to resolve the log directory, file logging disabled",
                &err,
            );
            None
        } else if logger.config.file_level() == LogLevel::Disabled {
            None
        } else if let Some(opener) = opener {
            Some(opener)
        } else {
            logger.default_opener()
        };

        match opener {
            Some(opener) => {
                let drain = logger.sink.open(opener);
                // nothing was created if the queue overflowed or the open failed
                if logger.sink.state() == FileState::Disabled {
                    logger.log_file = None;
                }
                logger.report(drain);
            }
            None => logger.sink.disable(),
        }

        // levels are resolved now, so warnings about the defaults cannot be lost
        for substitution in substitutions {
            logger.warn(substitution);
        }

        let (console_level, file_level) = (logger.console_level(), logger.file_level());
        logger.debug(format_args!(
            "Logger initialized with console level {console_level} and file level {file_level}"
        ));
        logger.info("Logger initialized");
        if logger.sink.state() == FileState::Disabled {
            logger.info("File logging is disabled");
        }
        if logger.config.console_level() == LogLevel::Disabled {
            logger.info("Console logging is disabled");
        }

        logger
    }
}

/// A logger writing leveled events to a console and a log file.
///
/// Each destination has its own threshold, so one event may be written to neither, either, or
/// both. Until the log file is writable, file-bound lines are buffered; if more lines than the
/// buffer limit pile up, they are discarded and file logging is turned off for good.
///
/// No method ever fails or panics because of a logging problem; problems are logged instead.
///
/// The logger is not synchronized. To log from several threads, put it behind a lock, for
/// example with [`SharedLogger`](crate::bridge::SharedLogger).
#[derive(Debug)]
pub struct Logger {
    config: Config,
    console_filter: SeverityFilter,
    file_filter: SeverityFilter,
    sink: FileSink,
    console: Box<dyn Console>,
    clock: Clock,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Creates a logger from the given options, printing to stdout.
    ///
    /// Shorthand for [`LoggerBuilder`] with only options set.
    pub fn new(options: Option<LoggerOptions>) -> Logger {
        let builder = LoggerBuilder::new();
        match options {
            Some(options) => builder.options(options).build(),
            None => builder.build(),
        }
    }

    /// Create a new [`LoggerBuilder`].
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Logs the message at the given level.
    ///
    /// Messages at `Disabled` or `All` are dropped.
    pub fn log(&mut self, level: LogLevel, message: impl fmt::Display) {
        if !level.is_emittable() {
            return;
        }
        self.dispatch(level, message.to_string());
    }

    /// Logs the message at the given level with error details appended.
    pub fn log_with(
        &mut self,
        level: LogLevel,
        message: impl fmt::Display,
        detail: impl Into<ErrorDetail>,
    ) {
        let detail = detail.into();
        self.log(level, format_args!("{message}\n{detail}"));
    }

    /// Logs the message at the TRACE level.
    pub fn trace(&mut self, message: impl fmt::Display) {
        self.log(LogLevel::Trace, message);
    }

    /// Logs the message together with error details at the TRACE level.
    pub fn trace_with(&mut self, message: impl fmt::Display, detail: impl Into<ErrorDetail>) {
        self.log_with(LogLevel::Trace, message, detail);
    }

    /// Logs the message at the DEBUG level.
    pub fn debug(&mut self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, message);
    }

    /// Logs the message together with error details at the DEBUG level.
    pub fn debug_with(&mut self, message: impl fmt::Display, detail: impl Into<ErrorDetail>) {
        self.log_with(LogLevel::Debug, message, detail);
    }

    /// Logs the message at the INFO level.
    pub fn info(&mut self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    /// Logs the message together with error details at the INFO level.
    pub fn info_with(&mut self, message: impl fmt::Display, detail: impl Into<ErrorDetail>) {
        self.log_with(LogLevel::Info, message, detail);
    }

    /// Logs the message at the NOTICE level.
    pub fn notice(&mut self, message: impl fmt::Display) {
        self.log(LogLevel::Notice, message);
    }

    /// Logs the message together with error details at the NOTICE level.
    pub fn notice_with(&mut self, message: impl fmt::Display, detail: impl Into<ErrorDetail>) {
        self.log_with(LogLevel::Notice, message, detail);
    }

    /// Logs the message at the WARN level.
    pub fn warn(&mut self, message: impl fmt::Display) {
        self.log(LogLevel::Warn, message);
    }

    /// Logs the message together with error details at the WARN level.
    pub fn warn_with(&mut self, message: impl fmt::Display, detail: impl Into<ErrorDetail>) {
        self.log_with(LogLevel::Warn, message, detail);
    }

    /// Logs the message at the ERROR level.
    pub fn error(&mut self, message: impl fmt::Display) {
        self.log(LogLevel::Error, message);
    }

    /// Logs the message together with error details at the ERROR level.
    pub fn error_with(&mut self, message: impl fmt::Display, detail: impl Into<ErrorDetail>) {
        self.log_with(LogLevel::Error, message, detail);
    }

    /// Logs the message at the CRITICAL level.
    pub fn critical(&mut self, message: impl fmt::Display) {
        self.log(LogLevel::Critical, message);
    }

    /// Logs the message together with error details at the CRITICAL level.
    pub fn critical_with(&mut self, message: impl fmt::Display, detail: impl Into<ErrorDetail>) {
        self.log_with(LogLevel::Critical, message, detail);
    }

    /// Logs the message at the FATAL level.
    pub fn fatal(&mut self, message: impl fmt::Display) {
        self.log(LogLevel::Fatal, message);
    }

    /// Logs the message together with error details at the FATAL level.
    pub fn fatal_with(&mut self, message: impl fmt::Display, detail: impl Into<ErrorDetail>) {
        self.log_with(LogLevel::Fatal, message, detail);
    }

    /// Flushes the log file and the console.
    pub fn flush(&mut self) {
        if let Err(err) = self.sink.flush() {
            self.error_with(
                "Failed to flush the log file, file logging disabled",
                &err,
            );
        }
        if let Err(err) = self.console.flush() {
            report_console_error("<flush>", err);
        }
    }

    /// Whether an event at `level` would be written to the console or the log file.
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.console_filter.passes(level) || self.file_filter.passes(level)
    }

    /// The effective configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Threshold for console output.
    pub fn console_level(&self) -> LogLevel {
        self.config.console_level()
    }

    /// Threshold for file output.
    pub fn file_level(&self) -> LogLevel {
        self.config.file_level()
    }

    /// Maximum number of lines held while the log file is not writable.
    pub fn buffer_limit(&self) -> usize {
        self.config.buffer_limit()
    }

    /// Directory where the log file is created.
    pub fn log_directory(&self) -> &Path {
        self.config.log_directory()
    }

    /// The log file opened by the default opener, if it was opened.
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// The current stage of the file sink.
    pub fn file_state(&self) -> FileState {
        self.sink.state()
    }

    /// Lines waiting for a writable log file, oldest first.
    pub fn pending_lines(&self) -> &[PendingLine] {
        self.sink.pending()
    }

    fn dispatch(&mut self, level: LogLevel, message: String) {
        let entry = self.clock.stamp(level, message);
        let line = entry.format();

        let mut write_error = None;
        if self.file_filter.passes(level) {
            write_error = self.sink.append(&entry, &line).err();
        }
        let drain = self.sink.drain();

        if self.console_filter.passes(level) {
            if let Err(err) = self.console.write_line(level, &line) {
                report_console_error(&line, err);
            }
        }

        // the sink has already left its previous state, so these cannot loop back into it
        if let Some(err) = write_error {
            self.error_with(
                "Failed to write to the log file, file logging disabled",
                &err,
            );
        }
        self.report(drain);
    }

    fn report(&mut self, drain: Drain) {
        match drain {
            Drain::Idle | Drain::Waiting | Drain::Flushed(0) => {}
            Drain::Flushed(written) => self.debug(format_args!(
                "Wrote {written} buffered lines to the log file"
            )),
            Drain::Overflow(dropped) => self.warn(format_args!(
                "Buffer limit exceeded, file logging disabled ({dropped} buffered lines dropped)"
            )),
            Drain::OpenFailed(err) => {
                self.error_with("Failed to open the log file, file logging disabled", &err)
            }
            Drain::WriteFailed(err) => self.error_with(
                "Failed to write buffered lines to the log file, file logging disabled",
                &err,
            ),
        }
    }

    fn default_opener(&mut self) -> Option<Box<dyn OpenFile>> {
        let dir = self.config.log_directory().to_path_buf();
        match ensure_directory(&dir) {
            Ok(true) => self.debug("Log directory did not exist, created it"),
            Ok(false) => {}
            Err(err) => {
                self.error_with(
                    "Failed to create the log directory, file logging disabled",
                    &err,
                );
                return None;
            }
        }

        let opener = TimestampedFile::new(&dir, &self.clock.now());
        self.debug(format_args!("Creating log file {}", opener.path().display()));
        self.log_file = Some(opener.path().to_path_buf());
        Some(Box::new(opener))
    }
}

fn report_console_error(line: &str, error: Error) {
    let _ = write!(
        std::io::stderr(),
        r###"
Error performing console logging.
    Attempted to log: {line}
    Error: {error}
"###,
    );
}
