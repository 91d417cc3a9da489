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

use crate::AbsLog;
use crate::Error;
use crate::Level;
use crate::backend::Backend;
use crate::backend::BackendGen;
use crate::backend::BackendType;
use crate::backend::Encoder;
use crate::global;

/// Create a new empty [`Builder`].
///
/// # Examples
///
/// ```
/// use abslog::Level;
/// use abslog::backend::BackendType;
/// use abslog::backend::Encoder;
///
/// let logger = abslog::builder()
///     .backend_type(BackendType::Tracing)
///     .level(Level::Debug)
///     .encoder(Encoder::Json)
///     .build()
///     .unwrap();
/// logger.debug("ready");
/// ```
pub fn builder() -> Builder {
    Builder::default()
}

/// A builder for configuring an [`AbsLog`]. See also [`builder`] for a fluent API.
///
/// Defaults to the [`Builtin`](BackendType::Builtin) backend at [`Level::Info`] with the
/// [`Console`](Encoder::Console) encoder.
#[must_use = "call `build` or `build_and_set_global` to create the logger"]
#[derive(Default)]
pub struct Builder {
    level: Level,
    backend_type: BackendType,
    encoder: Encoder,
    generator: Option<BackendGen>,
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("level", &self.level)
            .field("backend_type", &self.backend_type)
            .field("encoder", &self.encoder)
            .field("generator", &self.generator.as_ref().map(|_| ".."))
            .finish()
    }
}

impl Builder {
    /// Create a new [`Builder`] with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the backend to create.
    pub fn backend_type(mut self, backend_type: BackendType) -> Self {
        self.backend_type = backend_type;
        self
    }

    /// Set the output encoder.
    pub fn encoder(mut self, encoder: Encoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Create the backend with `generator` instead of the configured [`BackendType`].
    ///
    /// The generator receives the configured level and encoder.
    pub fn generator<F>(mut self, generator: F) -> Self
    where
        F: Fn(Level, Encoder) -> Result<Box<dyn Backend>, Error> + Send + Sync + 'static,
    {
        self.generator = Some(Box::new(generator));
        self
    }

    /// Build the [`AbsLog`].
    ///
    /// # Errors
    ///
    /// Returns the generator's error, with the requested level and encoder as context.
    pub fn build(self) -> Result<AbsLog, Error> {
        let backend = match self.generator {
            Some(generator) => generator(self.level, self.encoder).map_err(|err| {
                Error::new("failed to create backend")
                    .with_context("level", self.level)
                    .with_context("encoder", format!("{:?}", self.encoder))
                    .with_source(err)
            })?,
            None => self.backend_type.create(self.level, self.encoder),
        };

        Ok(AbsLog::new(backend))
    }

    /// Build the [`AbsLog`] and install it as the global logger.
    ///
    /// # Errors
    ///
    /// See [`Builder::build`]; the global logger is left untouched on error.
    pub fn build_and_set_global(self) -> Result<AbsLog, Error> {
        let logger = self.build()?;
        global::set_logger(logger.clone());
        Ok(logger)
    }
}
