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

//! The time source for line timestamps and log file names.

use jiff::Zoned;

use crate::LogLevel;
use crate::sink::PendingLine;

#[derive(Debug)]
pub(crate) enum Clock {
    /// The system clock in the system time zone.
    System,
    /// A time that only moves when told to.
    #[cfg(test)]
    Fixed(Zoned),
}

impl Clock {
    pub fn now(&self) -> Zoned {
        match self {
            Clock::System => Zoned::now(),
            #[cfg(test)]
            Clock::Fixed(now) => now.clone(),
        }
    }

    /// Stamps an event with the current time.
    pub fn stamp(&self, level: LogLevel, message: String) -> PendingLine {
        PendingLine::new(self.now(), level, message)
    }
}

#[cfg(test)]
impl Clock {
    pub fn fixed(time: &str) -> Clock {
        Clock::Fixed(time.parse().expect("valid zoned datetime"))
    }

    pub fn advance(&mut self, span: jiff::Span) {
        if let Clock::Fixed(now) = self {
            *now = now.checked_add(span).expect("time within range");
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;

    use super::*;
    use crate::layout::log_file_name;

    #[test]
    fn test_fixed_clock_stamps_lines() {
        let mut clock = Clock::fixed("2024-08-10T23:59:58+08[+08]");
        let first = clock.stamp(LogLevel::Info, "first".to_string());

        clock.advance(3.seconds());
        let second = clock.stamp(LogLevel::Warn, "second".to_string());

        assert_eq!(first.format(), "[23:59:58] [INFO] first");
        assert_eq!(second.format(), "[00:00:01] [WARN] second");
        assert_eq!(log_file_name(&clock.now()), "2024_08_11_00_00_01.log");
    }

    #[test]
    fn test_system_clock_uses_the_system_time_zone() {
        let now = Clock::System.now();
        let offset = jiff::tz::TimeZone::system().to_offset(now.timestamp());
        assert_eq!(now.offset(), offset);
    }
}
