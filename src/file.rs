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

//! Log file handles.

use std::fmt;
use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use jiff::Zoned;

use crate::Error;
use crate::layout::log_file_name;

/// A writable log file handle.
pub type FileHandle = Box<dyn Write + Send>;

/// Opens the handle the file sink writes to.
///
/// The logger calls [`open`](OpenFile::open) once at the end of construction and, as long as the
/// handle is not writable yet, again on every log call while lines are buffered.
pub trait OpenFile: fmt::Debug + Send + 'static {
    /// Attempts to open the handle.
    ///
    /// Returns `Ok(None)` if the handle is not writable yet and opening should be retried later.
    /// An error disables file logging for good.
    fn open(&mut self) -> Result<Option<FileHandle>, Error>;
}

/// Makes sure `dir` exists, creating it and its parents if missing.
///
/// Returns whether the directory had to be created.
pub fn ensure_directory(dir: &Path) -> Result<bool, Error> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(|err| {
        Error::new("failed to create log directory")
            .with_context("path", dir.display())
            .with_source(err)
    })?;
    Ok(true)
}

/// Opens `<dir>/<YYYY_MM_DD_HH_MM_SS>.log` for appending.
#[derive(Debug)]
pub struct TimestampedFile {
    path: PathBuf,
}

impl TimestampedFile {
    /// Creates an opener for a file in `dir` named after `time`.
    pub fn new(dir: impl AsRef<Path>, time: &Zoned) -> Self {
        Self {
            path: dir.as_ref().join(log_file_name(time)),
        }
    }

    /// The path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OpenFile for TimestampedFile {
    fn open(&mut self) -> Result<Option<FileHandle>, Error> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|err| {
                Error::new("failed to create log file")
                    .with_context("path", self.path.display())
                    .with_source(err)
            })?;
        Ok(Some(Box::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rand::Rng;
    use rand::distr::Alphanumeric;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_timestamped_file() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let now = Zoned::from_str("2024-08-10T17:12:52+08[+08]").unwrap();

        let mut opener = TimestampedFile::new(temp_dir.path(), &now);
        assert_eq!(
            opener.path(),
            temp_dir.path().join("2024_08_10_17_12_52.log")
        );

        let mut writer = opener.open().unwrap().expect("file should be writable");
        let rand_str = generate_random_string();
        writeln!(writer, "{rand_str}").unwrap();
        writer.flush().unwrap();

        let content = fs::read_to_string(opener.path()).unwrap();
        assert_eq!(content, format!("{rand_str}\n"));
    }

    #[test]
    fn test_timestamped_file_appends() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let now = Zoned::from_str("2024-08-10T17:12:52+08[+08]").unwrap();
        let mut opener = TimestampedFile::new(temp_dir.path(), &now);

        for line in ["first", "second"] {
            let mut writer = opener.open().unwrap().unwrap();
            writeln!(writer, "{line}").unwrap();
            writer.flush().unwrap();
        }

        let content = fs::read_to_string(opener.path()).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_timestamped_file_writes_through() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let now = Zoned::from_str("2024-08-10T17:12:52+08[+08]").unwrap();
        let mut opener = TimestampedFile::new(temp_dir.path(), &now);

        let mut writer = opener.open().unwrap().unwrap();
        writer.write_all(b"unflushed\n").unwrap();

        let content = fs::read_to_string(opener.path()).unwrap();
        assert_eq!(content, "unflushed\n");
    }

    #[test]
    fn test_missing_directory_fails_to_open() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let now = Zoned::now();
        let mut opener = TimestampedFile::new(temp_dir.path().join("absent"), &now);

        let err = opener.open().err().expect("open should fail");
        assert_eq!(err.message(), "failed to create log file");
    }

    #[test]
    fn test_ensure_directory() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let nested = temp_dir.path().join("a").join("b");

        assert!(ensure_directory(&nested).unwrap());
        assert!(nested.is_dir());
        assert!(!ensure_directory(&nested).unwrap());
    }

    #[test]
    fn test_ensure_directory_under_a_file() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = ensure_directory(&blocker.join("logs")).unwrap_err();
        assert_eq!(err.message(), "failed to create log directory");
    }

    fn generate_random_string() -> String {
        let mut rng = rand::rng();
        let len = rng.random_range(50..=100);
        std::iter::repeat(())
            .map(|()| rng.sample(Alphanumeric))
            .map(char::from)
            .take(len)
            .collect()
    }
}
