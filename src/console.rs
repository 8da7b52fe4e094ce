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

//! Console output.

use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use colored::Color;
use colored::ColoredString;
use colored::Colorize;

use crate::Error;
use crate::LogLevel;

/// Colors for different log levels.
///
/// The defaults grow more alarming with severity: dim for `Trace`, neutral for `Debug` and `Info`,
/// then blue, yellow, red, magenta and bright red up to `Fatal`.
#[derive(Debug, Clone)]
pub struct LevelColor {
    /// Color for fatal level logs.
    pub fatal: Color,
    /// Color for critical level logs.
    pub critical: Color,
    /// Color for error level logs.
    pub error: Color,
    /// Color for warning level logs.
    pub warn: Color,
    /// Color for notice level logs.
    pub notice: Color,
    /// Color for info level logs.
    pub info: Color,
    /// Color for debug level logs.
    pub debug: Color,
    /// Color for trace level logs.
    pub trace: Color,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            fatal: Color::BrightRed,
            critical: Color::Magenta,
            error: Color::Red,
            warn: Color::Yellow,
            notice: Color::Blue,
            info: Color::BrightWhite,
            debug: Color::White,
            trace: Color::BrightBlack,
        }
    }
}

impl LevelColor {
    /// The color of the given level.
    pub fn color(&self, level: LogLevel) -> Color {
        match level {
            LogLevel::Fatal => self.fatal,
            LogLevel::Critical => self.critical,
            LogLevel::Error => self.error,
            LogLevel::Warn => self.warn,
            LogLevel::Notice => self.notice,
            LogLevel::Debug => self.debug,
            LogLevel::Trace => self.trace,
            // sentinels never reach a console
            LogLevel::Info | LogLevel::Disabled | LogLevel::All => self.info,
        }
    }

    /// Colorize a whole line with the color of its level.
    pub fn colorize_line(&self, no_color: bool, level: LogLevel, line: &str) -> ColoredString {
        if no_color {
            ColoredString::from(line)
        } else {
            line.color(self.color(level))
        }
    }
}

/// A console the logger prints accepted lines to.
///
/// Implementations must scope any color change to the single line they write, so that no color
/// state leaks into unrelated output.
pub trait Console: fmt::Debug + Send + 'static {
    /// Writes one line, without its trailing newline, in the color of `level`.
    fn write_line(&mut self, level: LogLevel, line: &str) -> Result<(), Error>;

    /// Flushes any buffered output.
    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// A console that prints colored lines to stdout.
///
/// Each line is wrapped in its level color and followed by a reset, which restores whatever the
/// terminal showed before.
///
/// # Examples
///
/// ```
/// use twinlog::console::Stdout;
///
/// let console = Stdout::default().no_color();
/// ```
#[derive(Debug, Default, Clone)]
pub struct Stdout {
    colors: LevelColor,
    no_color: bool,
}

impl Stdout {
    /// Customize the color of each level.
    pub fn colors(mut self, colors: LevelColor) -> Self {
        self.colors = colors;
        self
    }

    /// Print lines without color.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }
}

impl Console for Stdout {
    fn write_line(&mut self, level: LogLevel, line: &str) -> Result<(), Error> {
        let line = self.colors.colorize_line(self.no_color, level, line);
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}").map_err(Error::from_io_error)
    }

    fn flush(&mut self) -> Result<(), Error> {
        std::io::stdout().flush().map_err(Error::from_io_error)
    }
}

/// A line recorded by [`Capture`].
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedLine {
    /// The level the line was logged at.
    pub level: LogLevel,
    /// The color the line would be printed in.
    pub color: Color,
    /// The formatted line.
    pub line: String,
}

/// A console that records lines in memory instead of printing them.
///
/// Clones share the same record, so a clone can be handed to the logger and the original kept
/// for inspection.
///
/// # Examples
///
/// ```
/// use twinlog::console::Capture;
///
/// let console = Capture::default();
/// let inspect = console.clone();
/// assert!(inspect.lines().is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct Capture {
    colors: LevelColor,
    lines: Arc<Mutex<Vec<CapturedLine>>>,
}

impl Capture {
    /// Customize the color of each level.
    pub fn colors(mut self, colors: LevelColor) -> Self {
        self.colors = colors;
        self
    }

    /// All lines recorded so far, oldest first.
    pub fn lines(&self) -> Vec<CapturedLine> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drops all recorded lines.
    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Console for Capture {
    fn write_line(&mut self, level: LogLevel, line: &str) -> Result<(), Error> {
        let captured = CapturedLine {
            level,
            color: self.colors.color(level),
            line: line.to_string(),
        };
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(captured);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_colors() {
        let colors = LevelColor::default();
        assert_eq!(colors.color(LogLevel::Error), Color::Red);
        assert_eq!(colors.color(LogLevel::Warn), Color::Yellow);
        assert_eq!(colors.color(LogLevel::Fatal), Color::BrightRed);
        assert_eq!(colors.color(LogLevel::Trace), Color::BrightBlack);
    }

    #[test]
    fn test_colorize_line_resets_after_line() {
        colored::control::set_override(true);
        let colored = LevelColor::default().colorize_line(false, LogLevel::Error, "boom");
        let rendered = colored.to_string();
        assert!(rendered.contains("boom"));
        assert!(rendered.ends_with("\x1b[0m"));

        let plain = LevelColor::default().colorize_line(true, LogLevel::Error, "boom");
        assert_eq!(plain.to_string(), "boom");
        colored::control::unset_override();
    }

    #[test]
    fn test_capture_shares_lines_between_clones() {
        let mut console = Capture::default();
        let inspect = console.clone();

        console.write_line(LogLevel::Warn, "[00:00:00] [WARN] careful").unwrap();
        let lines = inspect.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].level, LogLevel::Warn);
        assert_eq!(lines[0].color, Color::Yellow);
        assert_eq!(lines[0].line, "[00:00:00] [WARN] careful");

        inspect.clear();
        assert!(console.lines().is_empty());
    }
}
