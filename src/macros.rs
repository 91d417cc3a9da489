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

// Every macro accepts an optional leading `ctx: <&Context>,` selecting the context form.

/// Logs a formatted message at the given level on the global logger.
///
/// ```
/// use abslog::Level;
///
/// abslog::log!(Level::Warn, "{} retries left", 2);
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr, ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::global::log_args($level, ::std::option::Option::Some($ctx), ::std::format_args!($($arg)+))
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::global::log_args($level, ::std::option::Option::None, ::std::format_args!($($arg)+))
    };
}

/// Logs a formatted message at the `debug` level on the global logger.
#[macro_export]
macro_rules! debug {
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::global::debug_ctxf($ctx, ::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::debugf(::std::format_args!($($arg)+))
    };
}

/// Logs a formatted message at the `info` level on the global logger.
///
/// ```
/// use abslog::context::Context;
///
/// abslog::info!("listening on {}", 8080);
///
/// let ctx = Context::new().with_value("abslog", "req-42");
/// abslog::info!(ctx: &ctx, "handled in {}ms", 12); // [req-42] -> handled in 12ms
/// ```
#[macro_export]
macro_rules! info {
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::global::info_ctxf($ctx, ::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::infof(::std::format_args!($($arg)+))
    };
}

/// Logs a formatted message at the `warn` level on the global logger.
#[macro_export]
macro_rules! warn {
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::global::warn_ctxf($ctx, ::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::warnf(::std::format_args!($($arg)+))
    };
}

/// Logs a formatted message at the `error` level on the global logger.
#[macro_export]
macro_rules! error {
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::global::error_ctxf($ctx, ::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::errorf(::std::format_args!($($arg)+))
    };
}

/// Logs a formatted message at the `fatal` level on the global logger, then exits the process.
#[macro_export]
macro_rules! fatal {
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::global::fatal_ctxf($ctx, ::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::fatalf(::std::format_args!($($arg)+))
    };
}

/// Logs a formatted message at the `panic` level on the global logger, then panics with it.
#[macro_export]
macro_rules! panic {
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::global::panic_ctxf($ctx, ::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::panicf(::std::format_args!($($arg)+))
    };
}
