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

use log::Log;
use tempfile::TempDir;
use twinlog::LogLevel;
use twinlog::Logger;
use twinlog::LoggerOptions;
use twinlog::console::Capture;

// The global logger can be set once per process, so this file holds a single test.
#[test]
fn test_log_macros_reach_the_logger() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let console = Capture::default();
    let logger = Logger::builder()
        .options(
            LoggerOptions::new()
                .console_level(LogLevel::Warn)
                .file_level(LogLevel::Debug)
                .log_directory(temp_dir.path())
                .buffer_limit(20),
        )
        .console(console.clone())
        .build();
    let log_file = logger.log_file().unwrap().to_path_buf();
    console.clear();

    logger.into_shared().apply().unwrap();
    assert_eq!(log::max_level(), log::LevelFilter::Debug);

    log::warn!("careful");
    log::debug!("details");
    log::trace!("noise");
    log::logger().flush();

    let printed = console.lines();
    assert_eq!(printed.len(), 1);
    assert!(printed[0].line.ends_with("[WARN] careful"));

    let content = std::fs::read_to_string(log_file).unwrap();
    assert!(content.contains("[WARN] careful\n"));
    assert!(content.contains("[DEBUG] details\n"));
    assert!(!content.contains("noise"));
}
