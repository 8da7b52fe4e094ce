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

//! Bridge to the `log` crate.

use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::LogLevel;
use crate::Logger;

/// A [`Logger`] behind a mutex, usable as the `log` crate's global logger.
///
/// `log` levels map to the level of the same name. Records passing neither threshold are
/// filtered out before they reach the logger.
///
/// # Examples
///
/// ```
/// use twinlog::LogLevel;
/// use twinlog::Logger;
/// use twinlog::LoggerOptions;
///
/// let dir = tempfile::tempdir().unwrap();
/// let logger = Logger::new(Some(
///     LoggerOptions::new()
///         .console_level(LogLevel::Warn)
///         .file_level(LogLevel::Debug)
///         .log_directory(dir.path())
///         .buffer_limit(20),
/// ));
/// logger.into_shared().apply().unwrap();
///
/// log::warn!("disk almost full");
/// ```
#[derive(Debug)]
pub struct SharedLogger {
    inner: Mutex<Logger>,
}

impl SharedLogger {
    /// Wraps the logger.
    pub fn new(logger: Logger) -> Self {
        Self {
            inner: Mutex::new(logger),
        }
    }

    /// Locks the logger for direct use, such as logging at levels `log` does not have.
    pub fn lock(&self) -> MutexGuard<'_, Logger> {
        // a panic while logging leaves the logger in a consistent state
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The most verbose `log` level either threshold lets through.
    pub fn max_level(&self) -> log::LevelFilter {
        let logger = self.lock();
        let console = log::LevelFilter::from(logger.console_level());
        let file = log::LevelFilter::from(logger.file_level());
        console.max(file)
    }

    /// Installs this logger as the `log` crate's global logger and sets the max level.
    ///
    /// # Errors
    ///
    /// Return an error if the global logger has already been set.
    pub fn apply(self) -> Result<(), log::SetLoggerError> {
        let max_level = self.max_level();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl Logger {
    /// Wraps the logger in a [`SharedLogger`].
    pub fn into_shared(self) -> SharedLogger {
        SharedLogger::new(self)
    }
}

impl log::Log for SharedLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.lock().enabled(LogLevel::from(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.lock()
            .log(LogLevel::from(record.level()), record.args());
    }

    fn flush(&self) {
        self.lock().flush();
    }
}

#[cfg(test)]
mod tests {
    use log::Log;

    use super::*;
    use crate::LoggerOptions;
    use crate::console::Capture;
    use crate::sink::tests::DeferredOpen;
    use crate::sink::tests::SharedFile;

    fn shared(console: LogLevel, file: LogLevel) -> (SharedLogger, Capture, SharedFile) {
        let capture = Capture::default();
        let opener = DeferredOpen::ready(SharedFile::default());
        let logger = Logger::builder()
            .options(
                LoggerOptions::new()
                    .console_level(console)
                    .file_level(file)
                    .log_directory("unused")
                    .buffer_limit(20),
            )
            .console(capture.clone())
            .file_opener(opener.clone())
            .build();
        capture.clear();
        (logger.into_shared(), capture, opener.file)
    }

    #[test]
    fn test_max_level_is_most_verbose_threshold() {
        let (logger, _, _) = shared(LogLevel::Warn, LogLevel::Debug);
        assert_eq!(logger.max_level(), log::LevelFilter::Debug);

        let (logger, _, _) = shared(LogLevel::Disabled, LogLevel::Disabled);
        assert_eq!(logger.max_level(), log::LevelFilter::Off);
    }

    #[test]
    fn test_records_are_forwarded() {
        let (logger, capture, file) = shared(LogLevel::Warn, LogLevel::Info);

        logger.log(
            &log::Record::builder()
                .level(log::Level::Error)
                .args(format_args!("broken {}", 42))
                .build(),
        );
        logger.log(
            &log::Record::builder()
                .level(log::Level::Info)
                .args(format_args!("file only"))
                .build(),
        );
        logger.log(
            &log::Record::builder()
                .level(log::Level::Trace)
                .args(format_args!("dropped"))
                .build(),
        );

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].line.ends_with("[ERROR] broken 42"));

        let content = file.content();
        assert!(content.contains("[ERROR] broken 42\n"));
        assert!(content.contains("[INFO] file only\n"));
        assert!(!content.contains("dropped"));
    }

    #[test]
    fn test_enabled_checks_both_thresholds() {
        let (logger, _, _) = shared(LogLevel::Error, LogLevel::Debug);
        let metadata = |level| log::Metadata::builder().level(level).build();

        assert!(logger.enabled(&metadata(log::Level::Error)));
        assert!(logger.enabled(&metadata(log::Level::Debug)));
        assert!(!logger.enabled(&metadata(log::Level::Trace)));
    }
}
