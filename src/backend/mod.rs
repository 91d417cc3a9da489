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

//! Logging backends an [`AbsLog`](crate::AbsLog) delegates to.

use std::fmt;
use std::str::FromStr;

use crate::Error;
use crate::Level;
use crate::record::Record;

mod builtin;
mod subscriber;

pub use self::builtin::BuiltinBackend;
pub use self::subscriber::TracingBackend;

/// The machinery that actually writes records.
///
/// Implement this trait to put any logging library behind an [`AbsLog`](crate::AbsLog).
pub trait Backend: fmt::Debug + Send + Sync + 'static {
    /// Whether records at `level` would be written.
    fn enabled(&self, level: Level) -> bool;

    /// Writes a log record.
    fn log(&self, record: &Record) -> Result<(), Error>;

    /// Flushes any buffered records.
    fn flush(&self) -> Result<(), Error>;
}

impl<T: Backend> From<T> for Box<dyn Backend> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// Creates a backend for a minimum level and an encoder.
pub type BackendGen = Box<dyn Fn(Level, Encoder) -> Result<Box<dyn Backend>, Error> + Send + Sync>;

/// The output rendering mode of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoder {
    /// Human-readable console lines.
    #[default]
    Console,
    /// One JSON object per line.
    Json,
}

impl FromStr for Encoder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Encoder, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "console" | "text" => Ok(Encoder::Console),
            "json" => Ok(Encoder::Json),
            _ => Err(Error::unsupported("encoder", s)),
        }
    }
}

/// The built-in backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackendType {
    /// [`BuiltinBackend`]: stdout for records below `Error`, stderr for the rest.
    #[default]
    Builtin,
    /// [`TracingBackend`]: a `tracing-subscriber` fmt subscriber.
    Tracing,
}

impl BackendType {
    /// Create the backend with the given minimum level and encoder.
    pub fn create(self, level: Level, encoder: Encoder) -> Box<dyn Backend> {
        match self {
            BackendType::Builtin => Box::new(BuiltinBackend::new(level, encoder)),
            BackendType::Tracing => Box::new(TracingBackend::new(level, encoder)),
        }
    }
}

impl FromStr for BackendType {
    type Err = Error;

    fn from_str(s: &str) -> Result<BackendType, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "builtin" => Ok(BackendType::Builtin),
            "tracing" => Ok(BackendType::Tracing),
            _ => Err(Error::unsupported("backend", s)),
        }
    }
}
