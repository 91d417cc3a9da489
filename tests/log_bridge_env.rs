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

use abslog::bridge::DEFAULT_FILTER_ENV;
use abslog::bridge::LogBridge;
use log::LevelFilter;

// The environment is process-wide, so everything runs in one test.
#[test]
fn filter_from_env() {
    // SAFETY: this binary runs a single test, nothing else reads the environment concurrently.
    unsafe {
        std::env::remove_var(DEFAULT_FILTER_ENV);
    }
    assert_eq!(LogBridge::new().max_level(), LevelFilter::Info);
    assert_eq!(LogBridge::default().max_level(), LevelFilter::Info);

    unsafe {
        std::env::set_var(DEFAULT_FILTER_ENV, "warn,my_crate::db=trace");
    }
    assert_eq!(LogBridge::new().max_level(), LevelFilter::Trace);

    unsafe {
        std::env::set_var(DEFAULT_FILTER_ENV, "my_crate=loud");
    }
    assert_eq!(LogBridge::new().max_level(), LevelFilter::Info);

    unsafe {
        std::env::set_var(DEFAULT_FILTER_ENV, "error");
    }
    assert_eq!(LogBridge::new().max_level(), LevelFilter::Error);
}
