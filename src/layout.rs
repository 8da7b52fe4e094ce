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

//! Line and file name formatting.
//!
//! Output format:
//!
//! ```text
//! [22:44:57] [ERROR] Hello error!
//! [22:44:57] [WARN] Hello warn!
//! [22:44:57] [INFO] Hello info!
//! ```

use jiff::Zoned;

use crate::LogLevel;

/// Formats a log line as `[HH:MM:SS] [LEVELNAME] message`, without the trailing newline.
pub fn format_line(time: &Zoned, level: LogLevel, message: &str) -> String {
    let time = time.strftime("%H:%M:%S");
    format!("[{time}] [{level}] {message}")
}

/// Derives a log file name from the date and time, separated by underscores.
pub fn log_file_name(time: &Zoned) -> String {
    time.strftime("%Y_%m_%d_%H_%M_%S.log").to_string()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_format_line_pads_time() {
        let time = Zoned::from_str("2024-01-01T08:05:09+08[+08]").unwrap();
        assert_eq!(
            format_line(&time, LogLevel::Error, "boom"),
            "[08:05:09] [ERROR] boom"
        );
    }

    #[test]
    fn test_format_line_24_hours() {
        let time = Zoned::from_str("2024-08-10T17:12:52+08[+08]").unwrap();
        assert_eq!(
            format_line(&time, LogLevel::Notice, "multi\nline"),
            "[17:12:52] [NOTICE] multi\nline"
        );
    }

    #[test]
    fn test_log_file_name() {
        let time = Zoned::from_str("2024-08-10T07:02:03+08[+08]").unwrap();
        assert_eq!(log_file_name(&time), "2024_08_10_07_02_03.log");
    }
}
