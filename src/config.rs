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

use serde::Deserialize;

use crate::AbsLog;
use crate::Builder;
use crate::Error;
use crate::Level;
use crate::backend::BackendType;
use crate::backend::Encoder;
use crate::context;

/// Logger settings as they appear in configuration files or the environment.
///
/// Every field is optional; a missing field keeps the default. Empty context key or separator
/// resets it to the default.
///
/// # Examples
///
/// ```
/// let config: abslog::Config = serde_json::from_str(r#"{"level": "debug", "backend": "tracing"}"#)
///     .unwrap();
/// let logger = config.builder().unwrap().build().unwrap();
/// assert!(logger.enabled(abslog::Level::Debug));
/// ```
#[derive(Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The minimum level, e.g. `info`.
    pub level: Option<String>,
    /// `builtin` or `tracing`.
    pub backend: Option<String>,
    /// `console` or `json`.
    pub encoder: Option<String>,
    /// The context key whose value prefixes messages.
    pub ctx_key: Option<String>,
    /// The text between the context prefix and the message.
    pub ctx_separator: Option<String>,
}

impl Config {
    /// Read the settings from `ABSLOG_LEVEL`, `ABSLOG_BACKEND`, `ABSLOG_ENCODER`,
    /// `ABSLOG_CTX_KEY` and `ABSLOG_CTX_SEPARATOR`.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok();
        Self {
            level: var("ABSLOG_LEVEL"),
            backend: var("ABSLOG_BACKEND"),
            encoder: var("ABSLOG_ENCODER"),
            ctx_key: var("ABSLOG_CTX_KEY"),
            ctx_separator: var("ABSLOG_CTX_SEPARATOR"),
        }
    }

    /// A [`Builder`] with the level, backend and encoder of this config.
    ///
    /// # Errors
    ///
    /// Returns an error naming the field if a level, backend or encoder is not supported.
    pub fn builder(&self) -> Result<Builder, Error> {
        let mut builder = Builder::new();
        if let Some(level) = non_empty(&self.level) {
            builder = builder.level(level.parse::<Level>()?);
        }
        if let Some(backend) = non_empty(&self.backend) {
            builder = builder.backend_type(backend.parse::<BackendType>()?);
        }
        if let Some(encoder) = non_empty(&self.encoder) {
            builder = builder.encoder(encoder.parse::<Encoder>()?);
        }
        Ok(builder)
    }

    /// Build the logger, install it globally and apply the context settings.
    ///
    /// # Errors
    ///
    /// See [`Config::builder`]; nothing global is changed on error.
    pub fn apply(&self) -> Result<AbsLog, Error> {
        let logger = self.builder()?.build_and_set_global()?;

        if let Some(key) = &self.ctx_key {
            context::set_ctx_key(key.as_str());
        }
        if let Some(separator) = &self.ctx_separator {
            context::set_ctx_separator(separator.as_str());
        }

        Ok(logger)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_partial() {
        let config: Config = serde_json::from_str(r#"{"level": "warn", "ctx_key": "req"}"#).unwrap();
        assert_eq!(config.level.as_deref(), Some("warn"));
        assert_eq!(config.ctx_key.as_deref(), Some("req"));
        assert_eq!(config.backend, None);

        let logger = config.builder().unwrap().build().unwrap();
        assert!(!logger.enabled(Level::Info));
        assert!(logger.enabled(Level::Warn));
    }

    #[test]
    fn empty_values_keep_defaults() {
        let config = Config {
            level: Some(" ".to_string()),
            backend: Some(String::new()),
            ..Config::default()
        };

        let logger = config.builder().unwrap().build().unwrap();
        assert!(!logger.enabled(Level::Debug));
        assert!(logger.enabled(Level::Info));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = serde_json::from_str::<Config>(r#"{"levle": "info"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown field `levle`"));
    }

    #[test]
    fn unsupported_values_name_the_field() {
        let config = Config {
            backend: Some("zap".to_string()),
            ..Config::default()
        };
        let err = config.builder().unwrap_err();
        assert_eq!(err.context_value("field"), Some("backend"));
        assert_eq!(err.context_value("value"), Some("zap"));

        let config = Config {
            encoder: Some("yaml".to_string()),
            ..Config::default()
        };
        let err = config.builder().unwrap_err();
        assert_eq!(err.context_value("field"), Some("encoder"));

        let config = Config {
            level: Some("verbose".to_string()),
            ..Config::default()
        };
        let err = config.builder().unwrap_err();
        assert_eq!(err.context_value("field"), Some("level"));
    }
}
