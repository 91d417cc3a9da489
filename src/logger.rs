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
use std::io::Write;
use std::panic::Location;
use std::sync::Arc;

use crate::Error;
use crate::Level;
use crate::backend::Backend;
use crate::context;
use crate::context::Context;
use crate::record::Record;
use crate::record::capture_trace;

/// The logging facade.
///
/// Every level comes in four forms: plain (`info`), formatted (`infof`), with a request
/// [`Context`] (`info_ctx`) and both (`info_ctxf`). The context forms prepend the prefix rendered
/// by the process-wide [`ContextFormat`](crate::context::ContextFormat); when the context holds no
/// value under the configured key the message is forwarded unchanged.
///
/// `fatal*` methods exit the process with status 1 after logging, `panic*` methods panic with the
/// logged message. Records at `Error` and above carry a stack trace of the logging call.
///
/// # Examples
///
/// ```
/// use abslog::AbsLog;
/// use abslog::Level;
/// use abslog::backend::BuiltinBackend;
/// use abslog::backend::Encoder;
/// use abslog::context::Context;
///
/// let logger = AbsLog::new(BuiltinBackend::new(Level::Info, Encoder::Console));
/// logger.info("server started");
/// logger.warnf(format_args!("{} connections dropped", 3));
///
/// let ctx = Context::new().with_value("abslog", "req-42");
/// logger.info_ctx(&ctx, "handled"); // [req-42] -> handled
/// ```
#[derive(Debug, Clone)]
pub struct AbsLog {
    backend: Arc<dyn Backend>,
}

macro_rules! level_methods {
    ($level:expr, $plain:ident, $formatted:ident, $ctx:ident, $ctxf:ident) => {
        #[doc = concat!("Logs a message at the `", stringify!($plain), "` level.")]
        #[track_caller]
        pub fn $plain(&self, msg: impl fmt::Display) {
            self.emit($level, "", format_args!("{msg}"));
        }

        #[doc = concat!("Logs a formatted message at the `", stringify!($plain), "` level.")]
        #[track_caller]
        pub fn $formatted(&self, args: fmt::Arguments<'_>) {
            self.emit($level, "", args);
        }

        #[doc = concat!(
            "Logs a message prefixed with the context value at the `",
            stringify!($plain),
            "` level."
        )]
        #[track_caller]
        pub fn $ctx(&self, ctx: &Context, msg: impl fmt::Display) {
            if self.enabled($level) {
                self.emit($level, &prefix(ctx), format_args!("{msg}"));
            }
        }

        #[doc = concat!(
            "Logs a formatted message prefixed with the context value at the `",
            stringify!($plain),
            "` level."
        )]
        #[track_caller]
        pub fn $ctxf(&self, ctx: &Context, args: fmt::Arguments<'_>) {
            if self.enabled($level) {
                self.emit($level, &prefix(ctx), args);
            }
        }
    };
}

impl AbsLog {
    /// Create a logger delegating to `backend`.
    pub fn new(backend: impl Into<Box<dyn Backend>>) -> Self {
        let backend: Box<dyn Backend> = backend.into();
        Self {
            backend: Arc::from(backend),
        }
    }

    /// Whether records at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        self.backend.enabled(level)
    }

    /// Hands a fully built record to the backend.
    ///
    /// A backend failure is reported on stderr; the record is never silently lost.
    pub fn log(&self, record: &Record) {
        if let Err(err) = self.backend.log(record) {
            handle_log_error(record, err);
        }
    }

    /// Flushes any buffered records.
    pub fn flush(&self) {
        if let Err(err) = self.backend.flush() {
            handle_flush_error(err);
        }
    }

    /// Logs `args` at `level`, prefixed with the context value when `ctx` is given.
    ///
    /// [`Level::Fatal`] exits and [`Level::Panic`] panics, like the `fatal*` and `panic*`
    /// methods.
    #[track_caller]
    pub fn log_args(&self, level: Level, ctx: Option<&Context>, args: fmt::Arguments<'_>) {
        match (level, ctx) {
            (Level::Fatal, Some(ctx)) => self.fatal_ctxf(ctx, args),
            (Level::Fatal, None) => self.fatalf(args),
            (Level::Panic, Some(ctx)) => self.panic_ctxf(ctx, args),
            (Level::Panic, None) => self.panicf(args),
            _ if !self.enabled(level) => {}
            (_, Some(ctx)) => self.emit(level, &prefix(ctx), args),
            (_, None) => self.emit(level, "", args),
        }
    }

    level_methods!(Level::Debug, debug, debugf, debug_ctx, debug_ctxf);
    level_methods!(Level::Info, info, infof, info_ctx, info_ctxf);
    level_methods!(Level::Warn, warn, warnf, warn_ctx, warn_ctxf);
    level_methods!(Level::Error, error, errorf, error_ctx, error_ctxf);

    /// Logs a message at the `fatal` level, then exits the process.
    #[track_caller]
    pub fn fatal(&self, msg: impl fmt::Display) -> ! {
        self.fatalf(format_args!("{msg}"))
    }

    /// Logs a formatted message at the `fatal` level, then exits the process.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit(Level::Fatal, "", args);
        self.exit()
    }

    /// Logs a message prefixed with the context value at the `fatal` level, then exits the
    /// process.
    #[track_caller]
    pub fn fatal_ctx(&self, ctx: &Context, msg: impl fmt::Display) -> ! {
        self.fatal_ctxf(ctx, format_args!("{msg}"))
    }

    /// Logs a formatted message prefixed with the context value at the `fatal` level, then exits
    /// the process.
    #[track_caller]
    pub fn fatal_ctxf(&self, ctx: &Context, args: fmt::Arguments<'_>) -> ! {
        self.emit(Level::Fatal, &prefix(ctx), args);
        self.exit()
    }

    /// Logs a message at the `panic` level, then panics with it.
    #[track_caller]
    pub fn panic(&self, msg: impl fmt::Display) -> ! {
        self.panicf(format_args!("{msg}"))
    }

    /// Logs a formatted message at the `panic` level, then panics with it.
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit(Level::Panic, "", args);
        panic!("{args}")
    }

    /// Logs a message prefixed with the context value at the `panic` level, then panics with it.
    #[track_caller]
    pub fn panic_ctx(&self, ctx: &Context, msg: impl fmt::Display) -> ! {
        self.panic_ctxf(ctx, format_args!("{msg}"))
    }

    /// Logs a formatted message prefixed with the context value at the `panic` level, then
    /// panics with it.
    #[track_caller]
    pub fn panic_ctxf(&self, ctx: &Context, args: fmt::Arguments<'_>) -> ! {
        let prefix = prefix(ctx);
        self.emit(Level::Panic, &prefix, args);
        panic!("{prefix}{args}")
    }

    #[track_caller]
    fn emit(&self, level: Level, prefix: &str, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }

        let trace = capture_trace(level);
        let builder = Record::builder()
            .level(level)
            .location(Location::caller())
            .trace(trace.as_ref());
        if prefix.is_empty() {
            self.log(&builder.args(args).build());
        } else {
            self.log(&builder.args(format_args!("{prefix}{args}")).build());
        }
    }

    fn exit(&self) -> ! {
        self.flush();
        std::process::exit(1)
    }
}

fn prefix(ctx: &Context) -> String {
    context::format().prefix(ctx)
}

fn handle_log_error(record: &Record, error: Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform logging.
    Attempted to log: {args}
    Record: {record:?}
    Error: {error:?}
"###,
        args = record.args(),
        record = record,
        error = error,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular logging.
    Attempted to log: {args}
    Record: {record:?}
    Error: {error:?}
    Fallback error: {fallback_error}
"###,
        args = record.args(),
        record = record,
        error = error,
        fallback_error = fallback_error,
    );
}

fn handle_flush_error(error: Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform flush.
    Error: {error:?}
"###,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular flush.
    Error: {error:?}
    Fallback error: {fallback_error}
"###,
    );
}

#[cfg(test)]
mod tests {
    use std::panic::AssertUnwindSafe;
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Default)]
    struct Collect {
        lines: Mutex<Vec<(Level, String, Option<u32>, bool)>>,
    }

    #[derive(Debug, Clone, Default)]
    struct Shared(Arc<Collect>);

    impl Shared {
        fn messages(&self) -> Vec<String> {
            let lines = self.0.lines.lock().unwrap();
            lines.iter().map(|(l, m, ..)| format!("{l} {m}")).collect()
        }

        fn last_line(&self) -> Option<u32> {
            self.0.lines.lock().unwrap().last().and_then(|(_, _, l, _)| *l)
        }

        fn traced(&self) -> Vec<bool> {
            let lines = self.0.lines.lock().unwrap();
            lines.iter().map(|(.., traced)| *traced).collect()
        }
    }

    impl Backend for Shared {
        fn enabled(&self, level: Level) -> bool {
            level >= Level::Info
        }

        fn log(&self, record: &Record) -> Result<(), Error> {
            let line = (
                record.level(),
                record.args().to_string(),
                record.line(),
                record.trace().is_some(),
            );
            self.0.lines.lock().unwrap().push(line);
            Ok(())
        }

        fn flush(&self) -> Result<(), Error> {
            Ok(())
        }
    }

    #[test]
    fn plain_and_formatted_forms() {
        let shared = Shared::default();
        let logger = AbsLog::new(shared.clone());

        logger.debug("hidden");
        logger.info("started");
        logger.warnf(format_args!("{} retries left", 2));
        logger.error(std::io::Error::other("connection reset"));

        assert_eq!(
            shared.messages(),
            ["INFO started", "WARN 2 retries left", "ERROR connection reset"]
        );
    }

    #[test]
    fn context_forms_prefix_messages() {
        let shared = Shared::default();
        let logger = AbsLog::new(shared.clone());
        let ctx = Context::new().with_value(
            context::DEFAULT_KEY,
            [("id", "1234567"), ("name", "John Doe")],
        );

        logger.info_ctx(&ctx, "Info with context");
        logger.error_ctxf(&ctx, format_args!("failed after {}ms", 30));
        logger.debug_ctx(&ctx, "hidden");

        assert_eq!(
            shared.messages(),
            [
                "INFO [id=1234567, name=John Doe] -> Info with context",
                "ERROR [id=1234567, name=John Doe] -> failed after 30ms",
            ]
        );
    }

    #[test]
    fn context_without_value_forwards_unchanged() {
        let shared = Shared::default();
        let logger = AbsLog::new(shared.clone());

        logger.warn_ctx(&Context::new(), "no prefix");
        logger.log_args(Level::Info, None, format_args!("plain"));

        assert_eq!(shared.messages(), ["WARN no prefix", "INFO plain"]);
    }

    #[test]
    fn records_caller_line() {
        let shared = Shared::default();
        let logger = AbsLog::new(shared.clone());

        let line = line!() + 1;
        logger.info("where am I");

        assert_eq!(shared.last_line(), Some(line));
    }

    #[test]
    #[should_panic(expected = "[req-7] -> invariant broken")]
    fn panic_ctx_panics_with_prefixed_message() {
        let logger = AbsLog::new(Shared::default());
        let ctx = Context::new().with_value(context::DEFAULT_KEY, "req-7");
        logger.panic_ctx(&ctx, "invariant broken");
    }

    #[test]
    fn panic_logs_before_unwinding() {
        let shared = Shared::default();
        let logger = AbsLog::new(shared.clone());

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            logger.panicf(format_args!("bad state {}", 9));
        }));

        assert!(result.is_err());
        assert_eq!(shared.messages(), ["PANIC bad state 9"]);
    }

    #[test]
    fn error_records_carry_trace() {
        let shared = Shared::default();
        let logger = AbsLog::new(shared.clone());

        logger.warn("slow");
        logger.error("failed");
        let _ = std::panic::catch_unwind(AssertUnwindSafe(|| logger.panic("broken")));

        assert_eq!(shared.traced(), [false, true, true]);
    }

    #[test]
    fn log_args_panic_level_panics() {
        let shared = Shared::default();
        let logger = AbsLog::new(shared.clone());
        let ctx = Context::new().with_value(context::DEFAULT_KEY, "req-3");

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            logger.log_args(Level::Panic, Some(&ctx), format_args!("lost {} rows", 2));
        }));

        let payload = result.unwrap_err();
        assert_eq!(
            payload.downcast_ref::<String>().unwrap(),
            "[req-3] -> lost 2 rows"
        );
        assert_eq!(shared.messages(), ["PANIC [req-3] -> lost 2 rows"]);
    }
}
