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

//! Logger options and their resolution into an effective [`Config`].

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use crate::Error;
use crate::LogLevel;

/// The level used for any missing or invalid level option.
pub const DEFAULT_LEVEL: LogLevel = LogLevel::Info;

/// The buffer limit used for any missing or non-positive limit.
pub const DEFAULT_BUFFER_LIMIT: usize = 20;

/// A level as supplied by the caller, before validation.
///
/// Accepts either the numeric value of a [`LogLevel`] (`0` for `Disabled` up to `9` for `All`)
/// or its case-insensitive name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(untagged))]
pub enum LevelSetting {
    /// A numeric level.
    Number(i64),
    /// A level name such as `"warn"`.
    Name(String),
}

impl LevelSetting {
    /// The level this setting denotes, if it is in range.
    pub fn to_level(&self) -> Option<LogLevel> {
        match self {
            LevelSetting::Number(n) => LogLevel::try_from(*n).ok(),
            LevelSetting::Name(name) => name.parse().ok(),
        }
    }
}

impl From<LogLevel> for LevelSetting {
    fn from(level: LogLevel) -> Self {
        LevelSetting::Number(level as i64)
    }
}

impl From<i64> for LevelSetting {
    fn from(n: i64) -> Self {
        LevelSetting::Number(n)
    }
}

impl From<&str> for LevelSetting {
    fn from(name: &str) -> Self {
        LevelSetting::Name(name.to_string())
    }
}

impl From<String> for LevelSetting {
    fn from(name: String) -> Self {
        LevelSetting::Name(name)
    }
}

/// Options to create a [`Logger`](crate::Logger) with.
///
/// Every field is optional. A missing or invalid field is replaced with its default when the
/// logger is built, and a `WARN` diagnostic is logged for each replaced field.
///
/// # Examples
///
/// ```
/// use twinlog::LogLevel;
/// use twinlog::LoggerOptions;
///
/// let options = LoggerOptions::new()
///     .console_level(LogLevel::Warn)
///     .file_level("debug")
///     .log_directory("/var/log/my_app")
///     .buffer_limit(50);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct LoggerOptions {
    /// Threshold for console output.
    pub console_level: Option<LevelSetting>,
    /// Threshold for file output.
    pub file_level: Option<LevelSetting>,
    /// Directory where the log file is created.
    pub log_directory: Option<PathBuf>,
    /// Maximum number of lines held while the log file is not writable.
    pub buffer_limit: Option<i64>,
}

impl LoggerOptions {
    /// Creates options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the console threshold.
    pub fn console_level(mut self, level: impl Into<LevelSetting>) -> Self {
        self.console_level = Some(level.into());
        self
    }

    /// Sets the file threshold.
    pub fn file_level(mut self, level: impl Into<LevelSetting>) -> Self {
        self.file_level = Some(level.into());
        self
    }

    /// Sets the log directory.
    pub fn log_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_directory = Some(dir.into());
        self
    }

    /// Sets the buffer limit.
    pub fn buffer_limit(mut self, limit: i64) -> Self {
        self.buffer_limit = Some(limit);
        self
    }
}

/// An option field that was missing or invalid and replaced with its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substitution {
    /// The console level fell back to [`DEFAULT_LEVEL`].
    ConsoleLevel,
    /// The file level fell back to [`DEFAULT_LEVEL`].
    FileLevel,
    /// The log directory fell back to `<cwd>/logs`.
    LogDirectory,
    /// The buffer limit fell back to [`DEFAULT_BUFFER_LIMIT`].
    BufferLimit,
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Substitution::ConsoleLevel => write!(
                f,
                "console level is missing or invalid, using the {DEFAULT_LEVEL} level"
            ),
            Substitution::FileLevel => write!(
                f,
                "file level is missing or invalid, using the {DEFAULT_LEVEL} level"
            ),
            Substitution::LogDirectory => {
                f.write_str("log directory not specified, using the default log directory")
            }
            Substitution::BufferLimit => write!(
                f,
                "buffer limit is missing or not positive, using {DEFAULT_BUFFER_LIMIT} as the default"
            ),
        }
    }
}

/// The effective configuration of a logger. Every field holds a valid value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    console_level: LogLevel,
    file_level: LogLevel,
    log_directory: PathBuf,
    buffer_limit: usize,
}

/// The outcome of [`Config::resolve`].
#[derive(Debug)]
pub struct Resolved {
    /// The effective configuration.
    pub config: Config,
    /// Fields replaced with their defaults, in field order.
    pub substitutions: Vec<Substitution>,
    /// Set when the default log directory could not be determined; file logging must be off.
    pub directory_error: Option<Error>,
}

impl Config {
    /// Resolves caller options into an effective configuration.
    ///
    /// With no options at all, the defaults are adopted silently. Otherwise each field is
    /// checked on its own and every replaced field is listed in
    /// [`substitutions`](Resolved::substitutions).
    pub fn resolve(options: Option<&LoggerOptions>) -> Resolved {
        let Some(options) = options else {
            let (log_directory, directory_error) = match default_log_directory() {
                Ok(dir) => (dir, None),
                Err(err) => (PathBuf::from("logs"), Some(err)),
            };
            return Resolved {
                config: Config {
                    console_level: DEFAULT_LEVEL,
                    file_level: DEFAULT_LEVEL,
                    log_directory,
                    buffer_limit: DEFAULT_BUFFER_LIMIT,
                },
                substitutions: vec![],
                directory_error,
            };
        };

        let mut substitutions = vec![];

        let console_level = resolve_level(options.console_level.as_ref()).unwrap_or_else(|| {
            substitutions.push(Substitution::ConsoleLevel);
            DEFAULT_LEVEL
        });

        let file_level = resolve_level(options.file_level.as_ref()).unwrap_or_else(|| {
            substitutions.push(Substitution::FileLevel);
            DEFAULT_LEVEL
        });

        let mut directory_error = None;
        let log_directory = match &options.log_directory {
            Some(dir) => dir.clone(),
            None => {
                substitutions.push(Substitution::LogDirectory);
                default_log_directory().unwrap_or_else(|err| {
                    directory_error = Some(err);
                    PathBuf::from("logs")
                })
            }
        };

        let buffer_limit = match options.buffer_limit {
            Some(limit) if limit > 0 => usize::try_from(limit).unwrap_or(usize::MAX),
            _ => {
                substitutions.push(Substitution::BufferLimit);
                DEFAULT_BUFFER_LIMIT
            }
        };

        Resolved {
            config: Config {
                console_level,
                file_level,
                log_directory,
                buffer_limit,
            },
            substitutions,
            directory_error,
        }
    }

    /// Threshold for console output.
    pub fn console_level(&self) -> LogLevel {
        self.console_level
    }

    /// Threshold for file output.
    pub fn file_level(&self) -> LogLevel {
        self.file_level
    }

    /// Directory where the log file is created.
    pub fn log_directory(&self) -> &Path {
        &self.log_directory
    }

    /// Maximum number of lines held while the log file is not writable.
    pub fn buffer_limit(&self) -> usize {
        self.buffer_limit
    }
}

fn resolve_level(setting: Option<&LevelSetting>) -> Option<LogLevel> {
    setting.and_then(LevelSetting::to_level)
}

/// The default log directory, `<cwd>/logs`.
pub fn default_log_directory() -> Result<PathBuf, Error> {
    let cwd = std::env::current_dir()
        .map_err(|err| Error::new("failed to get the working directory").with_source(err))?;
    Ok(cwd.join("logs"))
}
