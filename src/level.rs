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

//! Log levels.

use std::fmt;
use std::str::FromStr;

/// An enum representing the available levels of the logger.
///
/// Lower values are more severe. A threshold of `Info` lets `Fatal` through `Info` pass and
/// drops `Debug` and `Trace`.
///
/// `Disabled` and `All` are bounds for thresholds only; an event logged at either of them is
/// dropped unconditionally.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum LogLevel {
    /// Nothing is logged, not even fatal events.
    Disabled = 0,
    /// An unrecoverable error that leaves the program unusable.
    Fatal = 1,
    /// A recoverable error that may lead to data loss or corruption if left unfixed.
    Critical = 2,
    /// A recoverable error the program could not correct.
    Error = 3,
    /// A recoverable error the program was able to correct.
    Warn = 4,
    /// Something out of the ordinary that may be worth looking into.
    Notice = 5,
    /// Ordinary operation of the application.
    Info = 6,
    /// Verbose information, mainly useful for debugging.
    Debug = 7,
    /// The most fine-grained level.
    Trace = 8,
    /// Every level is logged.
    All = 9,
}

impl LogLevel {
    /// Every level, from `Disabled` to `All`.
    pub const ALL_LEVELS: [LogLevel; 10] = [
        LogLevel::Disabled,
        LogLevel::Fatal,
        LogLevel::Critical,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Notice,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
        LogLevel::All,
    ];

    /// Return the canonical name of the `LogLevel`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Disabled => "DISABLED",
            LogLevel::Fatal => "FATAL",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Notice => "NOTICE",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
            LogLevel::All => "ALL",
        }
    }

    /// Whether an event may be emitted at this level.
    ///
    /// Returns `false` for the `Disabled` and `All` bounds.
    pub fn is_emittable(&self) -> bool {
        *self > LogLevel::Disabled && *self < LogLevel::All
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug => LogLevel::Debug,
            log::Level::Trace => LogLevel::Trace,
        }
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Disabled => log::LevelFilter::Off,
            LogLevel::Fatal | LogLevel::Critical | LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn | LogLevel::Notice => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace | LogLevel::All => log::LevelFilter::Trace,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The type returned when a value doesn't match any of the log levels.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ParseLevelError {}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str("malformed log level")
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for LogLevel {
    type Err = ParseLevelError;
    fn from_str(s: &str) -> Result<LogLevel, Self::Err> {
        let s = s.trim();
        LogLevel::ALL_LEVELS
            .into_iter()
            .find(|level| s.eq_ignore_ascii_case(level.as_str()))
            .ok_or(ParseLevelError {})
    }
}

impl TryFrom<i64> for LogLevel {
    type Error = ParseLevelError;
    fn try_from(value: i64) -> Result<LogLevel, ParseLevelError> {
        usize::try_from(value)
            .ok()
            .and_then(|index| LogLevel::ALL_LEVELS.get(index).copied())
            .ok_or(ParseLevelError {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(LogLevel::Disabled < LogLevel::Fatal);
        assert!(LogLevel::Fatal < LogLevel::Critical);
        assert!(LogLevel::Warn < LogLevel::Notice);
        assert!(LogLevel::Trace < LogLevel::All);
        for (i, level) in LogLevel::ALL_LEVELS.iter().enumerate() {
            assert_eq!(*level as usize, i);
        }
    }

    #[test]
    fn test_sentinels_are_not_emittable() {
        assert!(!LogLevel::Disabled.is_emittable());
        assert!(!LogLevel::All.is_emittable());
        assert!(LogLevel::Fatal.is_emittable());
        assert!(LogLevel::Trace.is_emittable());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("CRITICAL".parse::<LogLevel>(), Ok(LogLevel::Critical));
        assert_eq!(" Notice ".parse::<LogLevel>(), Ok(LogLevel::Notice));
        assert_eq!("verbose".parse::<LogLevel>(), Err(ParseLevelError {}));
    }

    #[test]
    fn test_try_from_number() {
        assert_eq!(LogLevel::try_from(0), Ok(LogLevel::Disabled));
        assert_eq!(LogLevel::try_from(4), Ok(LogLevel::Warn));
        assert_eq!(LogLevel::try_from(9), Ok(LogLevel::All));
        assert!(LogLevel::try_from(10).is_err());
        assert!(LogLevel::try_from(99).is_err());
        assert!(LogLevel::try_from(-1).is_err());
    }

    #[test]
    fn test_try_from_out_of_range_error() {
        let err: ParseLevelError = LogLevel::try_from(42).unwrap_err();
        assert_eq!(err.to_string(), "malformed log level");
        assert_eq!(LogLevel::try_from(7), "debug".parse());
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(format!("{:>5}", LogLevel::Warn), " WARN");
        assert_eq!(LogLevel::Fatal.to_string(), "FATAL");
    }

    #[test]
    fn test_log_crate_mapping() {
        assert_eq!(LogLevel::from(log::Level::Warn), LogLevel::Warn);
        assert_eq!(LogLevel::from(log::Level::Trace), LogLevel::Trace);
        assert_eq!(
            log::LevelFilter::from(LogLevel::Critical),
            log::LevelFilter::Error
        );
        assert_eq!(log::LevelFilter::from(LogLevel::Disabled), log::LevelFilter::Off);
        assert_eq!(log::LevelFilter::from(LogLevel::All), log::LevelFilter::Trace);
    }
}
