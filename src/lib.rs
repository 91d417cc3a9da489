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

//! Abslog is a logging facade that keeps application code independent of the library that
//! actually writes the records.
//!
//! # Overview
//!
//! Every level (`debug`, `info`, `warn`, `error`, `fatal` and `panic`) can be logged in four
//! forms: plain, formatted, with a request [`Context`](context::Context) and both. The context
//! forms prepend the value stored under the configured key, e.g. `[req-42] -> handled`.
//!
//! Two interchangeable backends are provided: a [builtin](backend::BuiltinBackend) one writing
//! to stdout and stderr, and one on top of [`tracing`](backend::TracingBackend). Both render
//! console lines or JSON objects.
//!
//! # Examples
//!
//! Log through the global logger, which defaults to the builtin backend at `info`:
//!
//! ```
//! use abslog::context::Context;
//!
//! abslog::info("server started");
//! abslog::warn!("{} connections dropped", 3);
//!
//! let ctx = Context::new().with_value("abslog", [("id", "1234567"), ("name", "John Doe")]);
//! abslog::info_ctx(&ctx, "handled"); // [id=1234567, name=John Doe] -> handled
//! ```
//!
//! Replace the global logger:
//!
//! ```
//! use abslog::Level;
//! use abslog::backend::BackendType;
//! use abslog::backend::Encoder;
//!
//! abslog::builder()
//!     .backend_type(BackendType::Tracing)
//!     .level(Level::Debug)
//!     .encoder(Encoder::Json)
//!     .build_and_set_global()
//!     .unwrap();
//!
//! abslog::debug!("cache warmed in {}ms", 42);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod backend;
pub mod bridge;
pub mod context;
pub mod global;
pub mod layout;
pub mod record;

mod builder;
mod config;
mod error;
mod level;
mod logger;

pub use self::builder::Builder;
pub use self::builder::builder;
pub use self::config::Config;
pub use self::context::ctx_key;
pub use self::context::ctx_separator;
pub use self::context::reset_ctx_key;
pub use self::context::reset_ctx_separator;
pub use self::context::set_ctx_key;
pub use self::context::set_ctx_separator;
pub use self::error::Error;
pub use self::global::*;
pub use self::level::Level;
pub use self::logger::AbsLog;

mod macros;
