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

use abslog::Config;
use abslog::Level;

const VARS: [&str; 5] = [
    "ABSLOG_LEVEL",
    "ABSLOG_BACKEND",
    "ABSLOG_ENCODER",
    "ABSLOG_CTX_KEY",
    "ABSLOG_CTX_SEPARATOR",
];

// The environment is process-wide, so everything runs in one test.
#[test]
fn config_from_env() {
    // SAFETY: this binary runs a single test, nothing else reads the environment concurrently.
    unsafe {
        for var in VARS {
            std::env::remove_var(var);
        }
    }
    assert_eq!(Config::from_env(), Config::default());

    unsafe {
        std::env::set_var("ABSLOG_LEVEL", "Warning");
        std::env::set_var("ABSLOG_BACKEND", "tracing");
        std::env::set_var("ABSLOG_ENCODER", "json");
        std::env::set_var("ABSLOG_CTX_KEY", "request_id");
        std::env::set_var("ABSLOG_CTX_SEPARATOR", " :: ");
    }
    let config = Config::from_env();
    assert_eq!(config.level.as_deref(), Some("Warning"));
    assert_eq!(config.backend.as_deref(), Some("tracing"));
    assert_eq!(config.encoder.as_deref(), Some("json"));

    let logger = config.apply().unwrap();
    assert!(!logger.enabled(Level::Info));
    assert!(abslog::logger().enabled(Level::Warn));
    assert_eq!(abslog::ctx_key(), "request_id");
    assert_eq!(abslog::ctx_separator(), " :: ");

    unsafe {
        std::env::set_var("ABSLOG_BACKEND", "zap");
    }
    let err = Config::from_env().apply().unwrap_err();
    assert_eq!(err.context_value("field"), Some("backend"));
    assert_eq!(err.context_value("value"), Some("zap"));
}
