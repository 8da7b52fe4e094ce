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

//! Twinlog is a small leveled logger that writes each event to a colored console and a
//! timestamped log file, with a separate threshold for each.
//!
//! # Overview
//!
//! Events are formatted as `[HH:MM:SS] [LEVEL] message`. Until the log file is writable, lines
//! bound for it are held in a bounded buffer; if the buffer overflows, file logging is turned off
//! and the console keeps working. Logging never fails: problems are reported through the logger
//! itself.
//!
//! # Examples
//!
//! Simple setup with default options:
//!
//! ```
//! # let dir = tempfile::tempdir().unwrap();
//! # std::env::set_current_dir(dir.path()).unwrap();
//! let mut logger = twinlog::Logger::new(None);
//!
//! logger.info("This is an info message.");
//! ```
//!
//! Separate thresholds for the console and the file:
//!
//! ```
//! use twinlog::LogLevel;
//! use twinlog::Logger;
//! use twinlog::LoggerOptions;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut logger = Logger::new(Some(
//!     LoggerOptions::new()
//!         .console_level(LogLevel::Error)
//!         .file_level(LogLevel::Debug)
//!         .log_directory(dir.path())
//!         .buffer_limit(20),
//! ));
//!
//! logger.error("Error message.");
//! logger.debug("Debug message, only in the file.");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod bridge;
pub mod console;
pub mod file;
pub mod filter;
pub mod layout;
pub mod options;

mod clock;
mod error;
mod level;
mod logger;
mod sink;

pub use self::bridge::SharedLogger;
pub use self::error::Error;
pub use self::filter::SeverityFilter;
pub use self::level::LogLevel;
pub use self::level::ParseLevelError;
pub use self::logger::ErrorDetail;
pub use self::logger::Logger;
pub use self::logger::LoggerBuilder;
pub use self::options::Config;
pub use self::options::LevelSetting;
pub use self::options::LoggerOptions;
pub use self::sink::FileState;
pub use self::sink::PendingLine;
