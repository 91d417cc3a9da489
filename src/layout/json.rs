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

use std::fmt::Arguments;

use serde::Serialize;

use crate::Error;
use crate::layout::Layout;
use crate::layout::format_time;
use crate::record::Caller;
use crate::record::Record;

/// A JSON layout for formatting log records.
///
/// Output format:
///
/// ```json
/// {"timestamp":"2024-08-11T14:44:57Z","severity":"ERROR","caller":"src/main.rs:51","message":"Hello error!","trace":"..."}
/// {"timestamp":"2024-08-11T14:44:57Z","severity":"WARN","caller":"src/main.rs:52","message":"Hello warn!"}
/// ```
///
/// Records carrying a stack trace add it under the `trace` key.
///
/// # Examples
///
/// ```
/// use abslog::layout::JsonLayout;
///
/// let json_layout = JsonLayout::default();
/// ```
#[derive(Default, Debug, Clone)]
#[non_exhaustive]
pub struct JsonLayout {}

#[derive(Debug, Clone, Serialize)]
struct RecordLine<'a> {
    timestamp: String,
    severity: &'static str,
    #[serde(serialize_with = "serialize_display")]
    caller: Caller<'a>,
    #[serde(serialize_with = "serialize_display")]
    message: &'a Arguments<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<String>,
}

fn serialize_display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: std::fmt::Display,
    S: serde::Serializer,
{
    serializer.collect_str(value)
}

impl Layout for JsonLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let record_line = RecordLine {
            timestamp: format_time(record.time())?,
            severity: record.level().as_str(),
            caller: record.caller(),
            message: record.args(),
            trace: record.trace().map(|trace| trace.to_string()),
        };

        serde_json::to_vec(&record_line)
            .map_err(|err| Error::new("failed to serialize record").with_source(err))
    }
}

#[cfg(test)]
mod tests {
    use std::backtrace::Backtrace;
    use std::time::Duration;
    use std::time::SystemTime;

    use super::*;
    use crate::Level;

    #[test]
    fn renders_one_object_per_record() {
        let record = Record::builder()
            .time(SystemTime::UNIX_EPOCH + Duration::from_secs(1_723_387_497))
            .level(Level::Fatal)
            .file(Some("src/main.rs"))
            .line(Some(7))
            .args(format_args!("[id: 1] -> \"quoted\" 1"))
            .build();

        let bytes = JsonLayout::default().format(&record).unwrap();
        insta::assert_snapshot!(
            String::from_utf8(bytes).unwrap(),
            @r#"{"timestamp":"2024-08-11T14:44:57Z","severity":"FATAL","caller":"src/main.rs:7","message":"[id: 1] -> \"quoted\" 1"}"#
        );
    }

    #[test]
    fn adds_trace_key() {
        let trace = Backtrace::disabled();
        let record = Record::builder()
            .time(SystemTime::UNIX_EPOCH + Duration::from_secs(1_723_387_497))
            .level(Level::Error)
            .file(Some("src/main.rs"))
            .line(Some(8))
            .args(format_args!("connection reset"))
            .trace(Some(&trace))
            .build();

        let bytes = JsonLayout::default().format(&record).unwrap();
        insta::assert_snapshot!(
            String::from_utf8(bytes).unwrap(),
            @r#"{"timestamp":"2024-08-11T14:44:57Z","severity":"ERROR","caller":"src/main.rs:8","message":"connection reset","trace":"disabled backtrace"}"#
        );
    }
}
