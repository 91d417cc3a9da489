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

//! The process-wide logger.
//!
//! Until [`set_logger`] or [`set_logger_type`] is called, the global logger is the
//! [`Builtin`](BackendType::Builtin) backend at [`Level::Info`] with the
//! [`Console`](Encoder::Console) encoder. Each call below loads the current logger once, so a
//! concurrent swap affects whole calls, never half of one.

use std::fmt;
use std::sync::Arc;
use std::sync::LazyLock;

use arc_swap::ArcSwap;

use crate::AbsLog;
use crate::Level;
use crate::backend::BackendType;
use crate::backend::Encoder;
use crate::context::Context;

static LOGGER: LazyLock<ArcSwap<AbsLog>> = LazyLock::new(|| {
    let backend = BackendType::default().create(Level::default(), Encoder::default());
    ArcSwap::from_pointee(AbsLog::new(backend))
});

/// Install `logger` as the global logger.
pub fn set_logger(logger: AbsLog) {
    LOGGER.store(Arc::new(logger));
}

/// Install a global logger of `backend_type` with the default level and encoder.
pub fn set_logger_type(backend_type: BackendType) {
    let backend = backend_type.create(Level::default(), Encoder::default());
    set_logger(AbsLog::new(backend));
}

/// The current global logger.
pub fn logger() -> AbsLog {
    AbsLog::clone(&LOGGER.load())
}

/// Logs `args` at `level` on the global logger, prefixed with the context value when `ctx` is
/// given. [`Level::Fatal`] exits and [`Level::Panic`] panics. This is what the logging macros
/// expand to.
#[track_caller]
pub fn log_args(level: Level, ctx: Option<&Context>, args: fmt::Arguments<'_>) {
    LOGGER.load().log_args(level, ctx, args);
}

/// Flushes the global logger.
pub fn flush() {
    LOGGER.load().flush();
}

macro_rules! level_functions {
    ($plain:ident, $formatted:ident, $ctx:ident, $ctxf:ident $(-> $ret:ty)?) => {
        #[doc = concat!("Logs a message at the `", stringify!($plain), "` level on the global logger.")]
        #[track_caller]
        pub fn $plain(msg: impl fmt::Display) $(-> $ret)? {
            LOGGER.load().$plain(msg)
        }

        #[doc = concat!(
            "Logs a formatted message at the `",
            stringify!($plain),
            "` level on the global logger."
        )]
        #[track_caller]
        pub fn $formatted(args: fmt::Arguments<'_>) $(-> $ret)? {
            LOGGER.load().$formatted(args)
        }

        #[doc = concat!(
            "Logs a message prefixed with the context value at the `",
            stringify!($plain),
            "` level on the global logger."
        )]
        #[track_caller]
        pub fn $ctx(ctx: &Context, msg: impl fmt::Display) $(-> $ret)? {
            LOGGER.load().$ctx(ctx, msg)
        }

        #[doc = concat!(
            "Logs a formatted message prefixed with the context value at the `",
            stringify!($plain),
            "` level on the global logger."
        )]
        #[track_caller]
        pub fn $ctxf(ctx: &Context, args: fmt::Arguments<'_>) $(-> $ret)? {
            LOGGER.load().$ctxf(ctx, args)
        }
    };
}

level_functions!(debug, debugf, debug_ctx, debug_ctxf);
level_functions!(info, infof, info_ctx, info_ctxf);
level_functions!(warn, warnf, warn_ctx, warn_ctxf);
level_functions!(error, errorf, error_ctx, error_ctxf);
level_functions!(fatal, fatalf, fatal_ctx, fatal_ctxf -> !);
level_functions!(panic, panicf, panic_ctx, panic_ctxf -> !);
