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

use crate::Error;
use crate::Level;
use crate::append::Append;
use crate::append::Stderr;
use crate::append::Stdout;
use crate::backend::Backend;
use crate::backend::Encoder;
use crate::record::Record;

/// The crate's own backend, built from [`Append`]ers and [`Layout`](crate::layout::Layout)s.
///
/// Records from the minimum level up to `Warn` go to the low append (stdout by default), records
/// at `Error` and above go to the high append (stderr by default).
///
/// # Examples
///
/// ```
/// use abslog::Level;
/// use abslog::backend::BuiltinBackend;
/// use abslog::backend::Encoder;
///
/// let backend = BuiltinBackend::new(Level::Debug, Encoder::Json);
/// ```
#[derive(Debug)]
pub struct BuiltinBackend {
    level: Level,
    low: Box<dyn Append>,
    high: Box<dyn Append>,
}

impl BuiltinBackend {
    /// Create a backend writing to stdout and stderr with the layout of `encoder`.
    pub fn new(level: Level, encoder: Encoder) -> Self {
        Self::with_appends(
            level,
            Stdout::default().with_layout(encoder),
            Stderr::default().with_layout(encoder),
        )
    }

    /// Create a backend with custom appends for the records below `Error` and the rest.
    pub fn with_appends(
        level: Level,
        low: impl Into<Box<dyn Append>>,
        high: impl Into<Box<dyn Append>>,
    ) -> Self {
        Self {
            level,
            low: low.into(),
            high: high.into(),
        }
    }
}

impl Backend for BuiltinBackend {
    fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn log(&self, record: &Record) -> Result<(), Error> {
        if !self.enabled(record.level()) {
            return Ok(());
        }

        if record.level() >= Level::Error {
            self.high.append(record)
        } else {
            self.low.append(record)
        }
    }

    fn flush(&self) -> Result<(), Error> {
        self.low.flush()?;
        self.high.flush()
    }
}
