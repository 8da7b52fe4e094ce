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

//! The file sink and its buffering protocol.

use std::fmt;
use std::io::Write;
use std::mem;

use jiff::Zoned;

use crate::Error;
use crate::LogLevel;
use crate::file::FileHandle;
use crate::file::OpenFile;
use crate::layout::format_line;

/// A log event waiting for a writable file handle.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLine {
    time: Zoned,
    level: LogLevel,
    message: String,
}

impl PendingLine {
    pub(crate) fn new(time: Zoned, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            time,
            level,
            message: message.into(),
        }
    }

    /// The time the event was logged.
    pub fn time(&self) -> &Zoned {
        &self.time
    }

    /// The level of the event.
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// The message of the event.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The line as it is written out.
    pub fn format(&self) -> String {
        format_line(&self.time, self.level, &self.message)
    }
}

/// The lifecycle stage of the file sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    /// The logger is being constructed; lines are queued and no open was attempted yet.
    Unopened,
    /// No writable handle exists; lines are queued until one does or the limit is exceeded.
    Buffering,
    /// Every file-bound line is written and flushed immediately.
    Writing,
    /// File logging is off for the rest of the logger's life.
    Disabled,
}

/// What a drain attempt did.
#[derive(Debug)]
pub(crate) enum Drain {
    /// The sink was not buffering.
    Idle,
    /// No handle yet; the queue is kept.
    Waiting,
    /// The queue was written out and the sink is now writing.
    Flushed(usize),
    /// The queue held more lines than allowed and was discarded; the sink is disabled.
    Overflow(usize),
    /// Opening failed; the sink is disabled.
    OpenFailed(Error),
    /// Writing the queue failed; the sink is disabled.
    WriteFailed(Error),
}

struct Queue {
    pending: Vec<PendingLine>,
    opener: Box<dyn OpenFile>,
}

pub(crate) struct FileSink {
    state: State,
    limit: usize,
}

enum State {
    Unopened(Vec<PendingLine>),
    Buffering(Queue),
    Writing(FileHandle),
    Disabled,
}

impl fmt::Debug for FileSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut de = f.debug_struct("FileSink");
        de.field("state", &self.state());
        de.field("limit", &self.limit);
        de.field("pending", &self.pending().len());
        if let State::Buffering(queue) = &self.state {
            de.field("opener", &queue.opener);
        }
        de.finish()
    }
}

impl FileSink {
    /// A sink that queues lines until [`open`](FileSink::open) is called.
    pub fn new(limit: usize) -> Self {
        Self {
            state: State::Unopened(vec![]),
            limit,
        }
    }

    pub fn state(&self) -> FileState {
        match self.state {
            State::Unopened(_) => FileState::Unopened,
            State::Buffering(_) => FileState::Buffering,
            State::Writing(_) => FileState::Writing,
            State::Disabled => FileState::Disabled,
        }
    }

    pub fn pending(&self) -> &[PendingLine] {
        match &self.state {
            State::Unopened(pending) => pending,
            State::Buffering(queue) => &queue.pending,
            State::Writing(_) | State::Disabled => &[],
        }
    }

    /// Turns file logging off for good, dropping any queued lines.
    pub fn disable(&mut self) {
        self.state = State::Disabled;
    }

    /// Hands one file-bound event to the sink.
    ///
    /// Queues it while no handle exists, writes `line` while writing, and drops it once disabled.
    /// A failed write disables the sink.
    pub fn append(&mut self, entry: &PendingLine, line: &str) -> Result<(), Error> {
        match &mut self.state {
            State::Unopened(pending) => {
                pending.push(entry.clone());
                Ok(())
            }
            State::Buffering(queue) => {
                queue.pending.push(entry.clone());
                Ok(())
            }
            State::Writing(handle) => {
                let result = write_line(handle, line);
                if result.is_err() {
                    self.state = State::Disabled;
                }
                result
            }
            State::Disabled => Ok(()),
        }
    }

    /// Makes the open attempt that ends construction, then drains.
    ///
    /// Has no effect unless the sink is unopened.
    pub fn open(&mut self, opener: Box<dyn OpenFile>) -> Drain {
        self.state = match mem::replace(&mut self.state, State::Disabled) {
            State::Unopened(pending) => State::Buffering(Queue { pending, opener }),
            state => state,
        };
        self.drain()
    }

    /// Flushes the queue if possible.
    ///
    /// A queue longer than the limit is discarded and the sink disabled, even if a handle could
    /// be opened now. Otherwise, opening is retried; on success every queued line is written in
    /// insertion order and the sink starts writing.
    pub fn drain(&mut self) -> Drain {
        let State::Buffering(queue) = &mut self.state else {
            return Drain::Idle;
        };

        if queue.pending.len() > self.limit {
            let dropped = queue.pending.len();
            self.state = State::Disabled;
            return Drain::Overflow(dropped);
        }

        let mut handle = match queue.opener.open() {
            Ok(Some(handle)) => handle,
            Ok(None) => return Drain::Waiting,
            Err(err) => {
                self.state = State::Disabled;
                return Drain::OpenFailed(err);
            }
        };

        let pending = mem::take(&mut queue.pending);
        let flushed = pending.len();
        for entry in pending {
            if let Err(err) = write_line(&mut handle, &entry.format()) {
                self.state = State::Disabled;
                return Drain::WriteFailed(err);
            }
        }

        self.state = State::Writing(handle);
        Drain::Flushed(flushed)
    }

    /// Flushes the live handle. A failure disables the sink.
    pub fn flush(&mut self) -> Result<(), Error> {
        let State::Writing(handle) = &mut self.state else {
            return Ok(());
        };
        let result = handle.flush().map_err(Error::from_io_error);
        if result.is_err() {
            self.state = State::Disabled;
        }
        result
    }
}

fn write_line(handle: &mut FileHandle, line: &str) -> Result<(), Error> {
    let mut bytes = Vec::with_capacity(line.len() + 1);
    bytes.extend_from_slice(line.as_bytes());
    bytes.push(b'\n');
    handle.write_all(&bytes).map_err(Error::from_io_error)?;
    handle.flush().map_err(Error::from_io_error)
}
