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

//! Request-scoped context and the prefix rendered from it.
//!
//! A [`Context`] travels with a request and holds [`CtxValue`]s under string keys. When a message
//! is logged through one of the `*_ctx` methods, the value stored under the configured key (by
//! default `"abslog"`) is rendered as a bracketed prefix:
//!
//! ```
//! use abslog::context::Context;
//! use abslog::context::ContextFormat;
//!
//! let ctx = Context::new().with_value("abslog", ["id: 1234567", "name: John Doe"]);
//! let prefix = ContextFormat::default().prefix(&ctx);
//! assert_eq!(prefix, "[id: 1234567, name: John Doe] -> ");
//! ```

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::LazyLock;

use arc_swap::ArcSwap;

/// The key looked up in a [`Context`] unless configured otherwise.
pub const DEFAULT_KEY: &str = "abslog";

/// The string placed between the context prefix and the message unless configured otherwise.
pub const DEFAULT_SEPARATOR: &str = " -> ";

static FORMAT: LazyLock<ArcSwap<ContextFormat>> =
    LazyLock::new(|| ArcSwap::from_pointee(ContextFormat::default()));

/// A value stored in a [`Context`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtxValue {
    /// Key-value pairs, rendered as `key=value` joined by `, `.
    Map(BTreeMap<String, String>),
    /// A sequence of strings, joined by `, `.
    List(Vec<String>),
    /// A single string, rendered as-is.
    Plain(String),
}

impl CtxValue {
    /// Build a [`CtxValue::Map`] from pairs whose values are rendered with `Display`.
    pub fn map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> CtxValue
    where
        K: Into<String>,
        V: fmt::Display,
    {
        CtxValue::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }

    /// Build a [`CtxValue::List`].
    pub fn list<S: Into<String>>(items: impl IntoIterator<Item = S>) -> CtxValue {
        CtxValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for CtxValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CtxValue::Map(pairs) => {
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}={v}")?;
                }
                Ok(())
            }
            CtxValue::List(items) => f.write_str(&items.join(", ")),
            CtxValue::Plain(value) => f.write_str(value),
        }
    }
}

impl From<&str> for CtxValue {
    fn from(value: &str) -> Self {
        CtxValue::Plain(value.to_owned())
    }
}

impl From<String> for CtxValue {
    fn from(value: String) -> Self {
        CtxValue::Plain(value)
    }
}

impl From<Vec<String>> for CtxValue {
    fn from(items: Vec<String>) -> Self {
        CtxValue::List(items)
    }
}

impl From<Vec<&str>> for CtxValue {
    fn from(items: Vec<&str>) -> Self {
        CtxValue::list(items)
    }
}

impl<const N: usize> From<[&str; N]> for CtxValue {
    fn from(items: [&str; N]) -> Self {
        CtxValue::list(items)
    }
}

impl<V: fmt::Display> From<BTreeMap<String, V>> for CtxValue {
    fn from(pairs: BTreeMap<String, V>) -> Self {
        CtxValue::map(pairs)
    }
}

impl<V: fmt::Display, S> From<HashMap<String, V, S>> for CtxValue {
    fn from(pairs: HashMap<String, V, S>) -> Self {
        CtxValue::map(pairs)
    }
}

impl<K: Into<String>, V: fmt::Display, const N: usize> From<[(K, V); N]> for CtxValue {
    fn from(pairs: [(K, V); N]) -> Self {
        CtxValue::map(pairs)
    }
}

/// An immutable, request-scoped bag of [`CtxValue`]s.
///
/// Cloning is cheap; [`Context::with_value`] returns a new bag and leaves the original untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    values: Arc<BTreeMap<String, CtxValue>>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this context with `value` stored under `key`.
    #[must_use = "with_value returns a new context and leaves this one unchanged"]
    pub fn with_value(&self, key: impl Into<String>, value: impl Into<CtxValue>) -> Self {
        let mut values = BTreeMap::clone(&self.values);
        values.insert(key.into(), value.into());
        Self {
            values: Arc::new(values),
        }
    }

    /// The value stored under `key`.
    pub fn value(&self, key: &str) -> Option<&CtxValue> {
        self.values.get(key)
    }

    /// Whether the context holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// How a [`Context`] is turned into a message prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFormat {
    key: String,
    separator: String,
}

impl Default for ContextFormat {
    fn default() -> Self {
        Self {
            key: DEFAULT_KEY.to_owned(),
            separator: DEFAULT_SEPARATOR.to_owned(),
        }
    }
}

impl ContextFormat {
    /// Create a format; empty or whitespace-only arguments fall back to the defaults.
    pub fn new(key: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            key: or_default(key.into(), DEFAULT_KEY),
            separator: or_default(separator.into(), DEFAULT_SEPARATOR),
        }
    }

    /// The key looked up in a [`Context`].
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The string placed between the prefix and the message.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Return a copy with another key; empty or whitespace-only resets it to [`DEFAULT_KEY`].
    #[must_use]
    pub fn with_key(&self, key: impl Into<String>) -> Self {
        Self {
            key: or_default(key.into(), DEFAULT_KEY),
            separator: self.separator.clone(),
        }
    }

    /// Return a copy with another separator; empty or whitespace-only resets it to
    /// [`DEFAULT_SEPARATOR`].
    #[must_use]
    pub fn with_separator(&self, separator: impl Into<String>) -> Self {
        Self {
            key: self.key.clone(),
            separator: or_default(separator.into(), DEFAULT_SEPARATOR),
        }
    }

    /// Render the value stored under the key as `[<value>]<separator>`.
    ///
    /// Returns an empty string when the context holds nothing under the key.
    pub fn prefix(&self, ctx: &Context) -> String {
        match ctx.value(&self.key) {
            Some(value) => format!("[{value}]{}", self.separator),
            None => String::new(),
        }
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_owned()
    } else {
        value
    }
}

/// A snapshot of the process-wide [`ContextFormat`].
pub fn format() -> Arc<ContextFormat> {
    FORMAT.load_full()
}

/// Replace the process-wide [`ContextFormat`].
pub fn set_format(format: ContextFormat) {
    FORMAT.store(Arc::new(format));
}

/// Set the key used to look up context values; empty or whitespace-only resets it to the default.
pub fn set_ctx_key(key: impl Into<String>) {
    let key = key.into();
    FORMAT.rcu(|current| current.with_key(key.as_str()));
}

/// The key used to look up context values.
pub fn ctx_key() -> String {
    FORMAT.load().key.clone()
}

/// Restore the default context key.
pub fn reset_ctx_key() {
    set_ctx_key(DEFAULT_KEY);
}

/// Set the separator between the context prefix and the message; empty or whitespace-only resets
/// it to the default.
pub fn set_ctx_separator(separator: impl Into<String>) {
    let separator = separator.into();
    FORMAT.rcu(|current| current.with_separator(separator.as_str()));
}

/// The separator between the context prefix and the message.
pub fn ctx_separator() -> String {
    FORMAT.load().separator.clone()
}

/// Restore the default context separator.
pub fn reset_ctx_separator() {
    set_ctx_separator(DEFAULT_SEPARATOR);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_prefix() {
        let ctx = Context::new().with_value(
            DEFAULT_KEY,
            [("id", "1234567"), ("name", "John Doe")],
        );
        insta::assert_snapshot!(
            ContextFormat::default().prefix(&ctx),
            @"[id=1234567, name=John Doe] -> "
        );
    }

    #[test]
    fn map_values_use_display() {
        let mut pairs = HashMap::new();
        pairs.insert("age".to_owned(), 30);
        let ctx = Context::new().with_value(DEFAULT_KEY, pairs);
        assert_eq!(ContextFormat::default().prefix(&ctx), "[age=30] -> ");
    }

    #[test]
    fn list_prefix() {
        let ctx = Context::new().with_value(
            DEFAULT_KEY,
            vec!["id: 1234567".to_owned(), "name: John Doe".to_owned()],
        );
        insta::assert_snapshot!(
            ContextFormat::default().prefix(&ctx),
            @"[id: 1234567, name: John Doe] -> "
        );
    }

    #[test]
    fn plain_prefix() {
        let ctx = Context::new().with_value(DEFAULT_KEY, "id: 1234567");
        insta::assert_snapshot!(ContextFormat::default().prefix(&ctx), @"[id: 1234567] -> ");
    }

    #[test]
    fn every_shape_ends_with_separator() {
        let format = ContextFormat::new("req", " | ");
        for value in [
            CtxValue::map([("k", "v")]),
            CtxValue::list(["a", "b"]),
            CtxValue::from("plain"),
            CtxValue::List(vec![]),
        ] {
            let ctx = Context::new().with_value("req", value);
            let prefix = format.prefix(&ctx);
            assert!(prefix.starts_with('['), "{prefix}");
            assert!(prefix.ends_with("] | "), "{prefix}");
        }
    }

    #[test]
    fn missing_value_renders_nothing() {
        let format = ContextFormat::default();
        assert_eq!(format.prefix(&Context::new()), "");

        let ctx = Context::new().with_value("other", "ignored");
        assert_eq!(format.prefix(&ctx), "");
    }

    #[test]
    fn with_value_leaves_original_untouched() {
        let base = Context::new().with_value("a", "1");
        let derived = base.with_value("b", "2");
        assert!(base.value("b").is_none());
        assert_eq!(derived.value("a"), Some(&CtxValue::from("1")));
        assert_eq!(derived.value("b"), Some(&CtxValue::from("2")));
        assert!(Context::new().is_empty());
    }

    #[test]
    fn blank_settings_fall_back_to_defaults() {
        let format = ContextFormat::new("  ", "");
        assert_eq!(format, ContextFormat::default());

        let format = ContextFormat::default().with_key("trace").with_separator(" :: ");
        assert_eq!(format.key(), "trace");
        assert_eq!(format.separator(), " :: ");

        let format = format.with_key("\t").with_separator(" ");
        assert_eq!(format.key(), DEFAULT_KEY);
        assert_eq!(format.separator(), DEFAULT_SEPARATOR);
    }
}
