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

//! Severity filtering.

use crate::LogLevel;

/// Whether an event at `level` passes a destination configured with `threshold`.
///
/// Sentinel levels never pass, whatever the threshold.
pub fn passes(level: LogLevel, threshold: LogLevel) -> bool {
    level.is_emittable() && level <= threshold
}

/// A filter that checks if the log level is at least as severe as the threshold.
///
/// From most to least severe, the levels are:
///
/// - `Fatal`
/// - `Critical`
/// - `Error`
/// - `Warn`
/// - `Notice`
/// - `Info`
/// - `Debug`
/// - `Trace`
///
/// If the threshold is `Warn`, it will allow `Fatal`, `Critical`, `Error`, and `Warn` logs.
///
/// If the threshold is `Disabled`, it will reject all logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityFilter(LogLevel);

impl SeverityFilter {
    /// Creates a filter with the given threshold.
    pub fn new(threshold: LogLevel) -> Self {
        SeverityFilter(threshold)
    }

    /// The configured threshold.
    pub fn threshold(&self) -> LogLevel {
        self.0
    }

    /// Whether an event at `level` passes.
    pub fn passes(&self, level: LogLevel) -> bool {
        passes(level, self.0)
    }
}

impl From<LogLevel> for SeverityFilter {
    fn from(threshold: LogLevel) -> Self {
        SeverityFilter(threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let filter = SeverityFilter::new(LogLevel::Warn);
        assert!(filter.passes(LogLevel::Fatal));
        assert!(filter.passes(LogLevel::Error));
        assert!(filter.passes(LogLevel::Warn));
        assert!(!filter.passes(LogLevel::Notice));
        assert!(!filter.passes(LogLevel::Trace));
    }

    #[test]
    fn test_sentinels_never_pass() {
        for threshold in LogLevel::ALL_LEVELS {
            assert!(!passes(LogLevel::Disabled, threshold));
            assert!(!passes(LogLevel::All, threshold));
        }
    }

    #[test]
    fn test_disabled_threshold_rejects_everything() {
        let filter = SeverityFilter::from(LogLevel::Disabled);
        assert!(LogLevel::ALL_LEVELS.iter().all(|level| !filter.passes(*level)));
    }

    #[test]
    fn test_all_threshold_accepts_every_emittable_level() {
        let filter = SeverityFilter::from(LogLevel::All);
        for level in LogLevel::ALL_LEVELS {
            assert_eq!(filter.passes(level), level.is_emittable());
        }
    }
}
