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

//! Layouts for formatting log records.

use std::fmt;
use std::time::SystemTime;

use jiff::Timestamp;

use crate::Error;
use crate::backend::Encoder;
use crate::record::Record;

mod json;
mod text;

pub use self::json::JsonLayout;
pub use self::text::TextLayout;

/// Timestamp format shared by every layout, always in UTC.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A layout for formatting log records.
pub trait Layout: fmt::Debug + Send + Sync + 'static {
    /// Formats a log record.
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error>;
}

impl<T: Layout> From<T> for Box<dyn Layout> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

impl From<Encoder> for Box<dyn Layout> {
    fn from(encoder: Encoder) -> Self {
        match encoder {
            Encoder::Console => Box::new(TextLayout::default()),
            Encoder::Json => Box::new(JsonLayout::default()),
        }
    }
}

pub(crate) fn format_time(time: SystemTime) -> Result<String, Error> {
    let timestamp = Timestamp::try_from(time)
        .map_err(|err| Error::new("failed to convert record time").with_source(err))?;
    Ok(timestamp.strftime(TIME_FORMAT).to_string())
}
