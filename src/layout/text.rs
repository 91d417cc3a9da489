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

use std::borrow::Cow;

#[cfg(feature = "colored")]
use colored::Color;
#[cfg(feature = "colored")]
use colored::Colorize;

use crate::Error;
use crate::Level;
use crate::layout::Layout;
use crate::layout::format_time;
use crate::record::Record;

/// A layout that formats log records as tab-separated console text.
///
/// Output format:
///
/// ```text
/// 2024-08-11T14:44:57Z	ERROR	src/main.rs:51	Hello error!
/// 2024-08-11T14:44:57Z	WARN	src/main.rs:52	Hello warn!
/// 2024-08-11T14:44:57Z	INFO	src/main.rs:53	Hello info!
/// ```
///
/// Records carrying a stack trace continue with it on the following lines.
///
/// With the `colored` feature enabled, levels are colored unless [`TextLayout::no_color`] is set.
///
/// # Examples
///
/// ```
/// use abslog::layout::TextLayout;
///
/// let text_layout = TextLayout::default().no_color();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    no_color: bool,
}

impl TextLayout {
    /// Disable level coloring.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    #[cfg(feature = "colored")]
    fn level(&self, level: Level) -> Cow<'static, str> {
        if self.no_color {
            return Cow::Borrowed(level.as_str());
        }

        let color = match level {
            Level::Fatal | Level::Panic => Color::Magenta,
            Level::Error => Color::Red,
            Level::Warn => Color::Yellow,
            Level::Info => Color::Green,
            Level::Debug => Color::Blue,
        };
        Cow::Owned(level.as_str().color(color).to_string())
    }

    #[cfg(not(feature = "colored"))]
    fn level(&self, level: Level) -> Cow<'static, str> {
        Cow::Borrowed(level.as_str())
    }
}

impl Layout for TextLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let time = format_time(record.time())?;
        let level = self.level(record.level());
        let caller = record.caller();
        let message = record.args();

        let mut line = format!("{time}\t{level}\t{caller}\t{message}");
        if let Some(trace) = record.trace() {
            line.push('\n');
            line.push_str(trace.to_string().trim_end());
        }

        Ok(line.into_bytes())
    }
}
