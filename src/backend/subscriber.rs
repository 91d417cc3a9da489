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

use std::fmt;
use std::io::IsTerminal;
use std::io::Write;

use jiff::Timestamp;
use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use crate::Error;
use crate::Level;
use crate::backend::Backend;
use crate::backend::Encoder;
use crate::layout::TIME_FORMAT;
use crate::record::Record;

/// A backend that hands records to a `tracing-subscriber` fmt subscriber.
///
/// The subscriber is kept in a private [`Dispatch`] and entered only while a record is emitted, so
/// it never competes with the application's global `tracing` subscriber.
///
/// tracing has no level above `ERROR`: `Panic` and `Fatal` records are emitted as `ERROR` events.
/// Every event carries a `severity` field with the real level name and a `caller` field, plus a
/// `trace` field when the record has a stack trace.
///
/// # Examples
///
/// ```
/// use abslog::Level;
/// use abslog::backend::Encoder;
/// use abslog::backend::TracingBackend;
///
/// let backend = TracingBackend::new(Level::Info, Encoder::Console);
/// ```
#[derive(Debug)]
pub struct TracingBackend {
    level: Level,
    dispatch: Dispatch,
}

impl TracingBackend {
    /// Create a backend writing `ERROR` events to stderr and everything else to stdout.
    pub fn new(level: Level, encoder: Encoder) -> Self {
        let make_writer = std::io::stderr
            .with_max_level(tracing::Level::ERROR)
            .or_else(std::io::stdout);
        let ansi = use_ansi(
            encoder,
            std::io::stdout().is_terminal(),
            std::io::stderr().is_terminal(),
        );
        Self::build(level, encoder, make_writer, ansi)
    }

    /// Create a backend writing every event through `make_writer`, without ANSI colors.
    pub fn with_writer<W>(level: Level, encoder: Encoder, make_writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        Self::build(level, encoder, make_writer, false)
    }

    fn build<W>(level: Level, encoder: Encoder, make_writer: W, ansi: bool) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let builder = tracing_subscriber::fmt()
            .with_writer(make_writer)
            .with_max_level(tracing::Level::from(level))
            .with_timer(UtcTime)
            .with_target(false)
            .with_ansi(ansi);

        let dispatch = match encoder {
            Encoder::Console => Dispatch::new(builder.compact().finish()),
            Encoder::Json => Dispatch::new(
                builder
                    .json()
                    .flatten_event(true)
                    .with_current_span(false)
                    .with_span_list(false)
                    .finish(),
            ),
        };

        Self { level, dispatch }
    }
}

impl Backend for TracingBackend {
    fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn log(&self, record: &Record) -> Result<(), Error> {
        if !self.enabled(record.level()) {
            return Ok(());
        }

        let severity = record.level().as_str();
        let caller = record.caller();
        let message = record.args();
        let trace = record.trace().map(tracing::field::display);

        // event levels must be constants
        macro_rules! emit {
            ($level:expr) => {
                tracing::event!(
                    target: "abslog",
                    $level,
                    severity,
                    caller = %caller,
                    trace,
                    "{}",
                    message
                )
            };
        }

        tracing::dispatcher::with_default(&self.dispatch, || match record.level() {
            Level::Debug => emit!(tracing::Level::DEBUG),
            Level::Info => emit!(tracing::Level::INFO),
            Level::Warn => emit!(tracing::Level::WARN),
            Level::Error | Level::Panic | Level::Fatal => emit!(tracing::Level::ERROR),
        });

        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        std::io::stdout().flush().map_err(Error::from_io_error)?;
        std::io::stderr().flush().map_err(Error::from_io_error)
    }
}

// one subscriber writes both streams, so colors need both to be terminals
fn use_ansi(encoder: Encoder, stdout_is_terminal: bool, stderr_is_terminal: bool) -> bool {
    encoder == Encoder::Console && stdout_is_terminal && stderr_is_terminal
}

/// Renders event timestamps like the layouts do.
struct UtcTime;

impl FormatTime for UtcTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", Timestamp::now().strftime(TIME_FORMAT))
    }
}
