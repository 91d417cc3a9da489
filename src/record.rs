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

//! Log records.

use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::time::SystemTime;

use crate::Level;

/// The payload of a log message.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    // the observed time
    now: SystemTime,

    level: Level,
    file: Option<&'a str>,
    line: Option<u32>,

    // the payload
    args: fmt::Arguments<'a>,

    // stack trace of the logging call, captured at `Error` and above
    trace: Option<&'a Backtrace>,
}

impl<'a> Record<'a> {
    /// Create a [`RecordBuilder`] with default values.
    pub fn builder() -> RecordBuilder<'a> {
        RecordBuilder::default()
    }

    /// The observed time.
    pub fn time(&self) -> SystemTime {
        self.now
    }

    /// The severity level of the message.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The source file containing the message.
    pub fn file(&self) -> Option<&'a str> {
        self.file
    }

    /// The line containing the message.
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// The message body.
    pub fn args(&self) -> &fmt::Arguments<'a> {
        &self.args
    }

    /// The stack trace of the logging call.
    ///
    /// [`AbsLog`](crate::AbsLog) captures one for records at [`Level::Error`] and above.
    pub fn trace(&self) -> Option<&'a Backtrace> {
        self.trace
    }

    /// The caller location, rendered short: the last two path components of the file and the line.
    pub fn caller(&self) -> Caller<'a> {
        Caller {
            file: self.file,
            line: self.line,
        }
    }
}

/// Builder for [`Record`].
#[derive(Debug)]
pub struct RecordBuilder<'a> {
    record: Record<'a>,
}

impl Default for RecordBuilder<'_> {
    fn default() -> Self {
        RecordBuilder {
            record: Record {
                now: SystemTime::now(),
                level: Level::Info,
                file: None,
                line: None,
                args: format_args!(""),
                trace: None,
            },
        }
    }
}

impl<'a> RecordBuilder<'a> {
    /// Set [`args`](Record::args).
    pub fn args(mut self, args: fmt::Arguments<'a>) -> Self {
        self.record.args = args;
        self
    }

    /// Set [`level`](Record::level).
    pub fn level(mut self, level: Level) -> Self {
        self.record.level = level;
        self
    }

    /// Set [`file`](Record::file).
    pub fn file(mut self, file: Option<&'a str>) -> Self {
        self.record.file = file;
        self
    }

    /// Set [`line`](Record::line).
    pub fn line(mut self, line: Option<u32>) -> Self {
        self.record.line = line;
        self
    }

    /// Set [`file`](Record::file) and [`line`](Record::line) from a caller location.
    pub fn location(self, location: &'static Location<'static>) -> Self {
        self.file(Some(location.file())).line(Some(location.line()))
    }

    /// Set [`trace`](Record::trace).
    pub fn trace(mut self, trace: Option<&'a Backtrace>) -> Self {
        self.record.trace = trace;
        self
    }

    /// Set [`time`](Record::time).
    pub fn time(mut self, now: SystemTime) -> Self {
        self.record.now = now;
        self
    }

    /// Invoke the builder and return a `Record`
    pub fn build(self) -> Record<'a> {
        self.record
    }
}

/// Capture a stack trace for a record at `level`, if it is [`Level::Error`] or above.
pub(crate) fn capture_trace(level: Level) -> Option<Backtrace> {
    (level >= Level::Error).then(Backtrace::force_capture)
}

/// The short caller of a [`Record`], such as `src/main.rs:12`.
///
/// Renders as an empty string when the record carries no file.
#[derive(Clone, Copy, Debug)]
pub struct Caller<'a> {
    file: Option<&'a str>,
    line: Option<u32>,
}

impl fmt::Display for Caller<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(file) = self.file else {
            return Ok(());
        };

        let file = short_path(file);
        match self.line {
            Some(line) => write!(f, "{file}:{line}"),
            None => f.write_str(file),
        }
    }
}

fn short_path(file: &str) -> &str {
    let mut separators = file.rmatch_indices(['/', '\\']);
    // skip the separator before the file name, cut at the one before its parent directory
    match (separators.next(), separators.next()) {
        (Some(_), Some((idx, _))) => &file[idx + 1..],
        _ => file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_keeps_two_components() {
        let record = Record::builder()
            .file(Some("/home/app/crates/server/src/main.rs"))
            .line(Some(42))
            .build();
        assert_eq!(record.caller().to_string(), "src/main.rs:42");

        let record = Record::builder().file(Some("main.rs")).line(Some(7)).build();
        assert_eq!(record.caller().to_string(), "main.rs:7");

        let record = Record::builder()
            .file(Some(r"C:\app\src\lib.rs"))
            .build();
        assert_eq!(record.caller().to_string(), r"src\lib.rs");
    }

    #[test]
    fn caller_without_file_is_empty() {
        let record = Record::builder().line(Some(3)).build();
        assert_eq!(record.caller().to_string(), "");
    }

    #[test]
    fn builder_records_location() {
        let location = Location::caller();
        let record = Record::builder()
            .level(Level::Warn)
            .location(location)
            .args(format_args!("disk 91% full"))
            .build();

        assert_eq!(record.level(), Level::Warn);
        assert_eq!(record.file(), Some(file!()));
        assert_eq!(record.line(), Some(location.line()));
        assert_eq!(record.args().to_string(), "disk 91% full");
    }

    #[test]
    fn traces_start_at_error() {
        assert!(capture_trace(Level::Warn).is_none());
        assert!(capture_trace(Level::Error).is_some());
        assert!(capture_trace(Level::Fatal).is_some());

        let trace = Backtrace::disabled();
        let record = Record::builder().trace(Some(&trace)).build();
        assert_eq!(record.trace().unwrap().to_string(), "disabled backtrace");
        assert!(Record::builder().build().trace().is_none());
    }
}
