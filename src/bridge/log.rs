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
use crate::global;
use crate::record::Record;
use crate::record::capture_trace;

/// The default environment variable for filtering bridged records.
pub const DEFAULT_FILTER_ENV: &str = "RUST_LOG";

/// A [`log::Log`] implementation forwarding records to the current global
/// [`AbsLog`](crate::AbsLog).
///
/// Records are first matched against [`env_filter`] directives (the `env_logger` syntax, such as
/// `info,hyper=warn`), then against the global logger's level. `log`'s `Trace` level is logged as
/// `Debug`.
///
/// # Examples
///
/// ```no_run
/// use abslog::bridge::LogBridge;
///
/// LogBridge::with_filter("info,hyper=warn").unwrap().apply().unwrap();
/// log::info!("routed through abslog");
/// ```
#[derive(Debug)]
pub struct LogBridge {
    filter: env_filter::Filter,
}

impl Default for LogBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl LogBridge {
    /// Create a bridge filtered by the directives in `RUST_LOG`, or `info` if it is unset or
    /// malformed.
    pub fn new() -> Self {
        std::env::var(DEFAULT_FILTER_ENV)
            .ok()
            .and_then(|directives| Self::with_filter(&directives).ok())
            .unwrap_or_else(|| Self::build(env_filter::Builder::new().parse("info")))
    }

    /// Create a bridge filtered by `directives`.
    ///
    /// # Errors
    ///
    /// Returns an error if `directives` is malformed.
    pub fn with_filter(directives: &str) -> Result<Self, Error> {
        let mut builder = env_filter::Builder::new();
        builder.try_parse(directives).map_err(|err| {
            Error::new("failed to parse filter directives")
                .with_context("directives", directives)
                .with_source(err)
        })?;
        Ok(Self::build(&mut builder))
    }

    fn build(builder: &mut env_filter::Builder) -> Self {
        Self {
            filter: builder.build(),
        }
    }

    /// The most verbose `log` level any directive enables.
    pub fn max_level(&self) -> log::LevelFilter {
        self.filter.filter()
    }

    /// Install the bridge as the `log` crate's global logger.
    ///
    /// # Errors
    ///
    /// Returns an error if a `log` logger has already been installed.
    pub fn apply(self) -> Result<(), Error> {
        let max_level = self.max_level();
        log::set_boxed_logger(Box::new(self))
            .map_err(|err| Error::new("failed to set up log bridge").with_source(err))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.filter.enabled(metadata) && global::logger().enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        if !self.filter.matches(record) {
            return;
        }

        let logger = global::logger();
        let level = Level::from(record.level());
        if !logger.enabled(level) {
            return;
        }

        let trace = capture_trace(level);
        logger.log(
            &Record::builder()
                .level(level)
                .file(record.file())
                .line(record.line())
                .args(*record.args())
                .trace(trace.as_ref())
                .build(),
        );
    }

    fn flush(&self) {
        global::flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_set_max_level() {
        let bridge = LogBridge::with_filter("warn,my_crate::db=debug").unwrap();
        assert_eq!(bridge.max_level(), log::LevelFilter::Debug);

        let bridge = LogBridge::with_filter("error").unwrap();
        assert_eq!(bridge.max_level(), log::LevelFilter::Error);
    }

    #[test]
    fn malformed_directives_are_rejected() {
        let err = LogBridge::with_filter("my_crate=loud").unwrap_err();
        assert_eq!(err.message(), "failed to parse filter directives");
        assert_eq!(err.context_value("directives"), Some("my_crate=loud"));
    }

    #[test]
    fn filter_checks_target() {
        let bridge = LogBridge::with_filter("warn,my_crate::db=debug").unwrap();

        let db = log::MetadataBuilder::new()
            .level(log::Level::Debug)
            .target("my_crate::db")
            .build();
        let http = log::MetadataBuilder::new()
            .level(log::Level::Info)
            .target("my_crate::http")
            .build();

        assert!(bridge.filter.enabled(&db));
        assert!(!bridge.filter.enabled(&http));
    }
}
