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

use std::sync::Arc;
use std::sync::Mutex;

use abslog::AbsLog;
use abslog::Error;
use abslog::Level;
use abslog::backend::Backend;
use abslog::bridge::LogBridge;
use abslog::record::Record;

#[derive(Debug, Clone)]
struct Capture {
    level: Level,
    lines: Arc<Mutex<Vec<String>>>,
}

impl Backend for Capture {
    fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn log(&self, record: &Record) -> Result<(), Error> {
        let line = format!(
            "{} {} {}",
            record.level().as_str(),
            record.caller(),
            record.args()
        );
        self.lines.lock().unwrap().push(line);
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

#[test]
fn log_records_reach_global_logger() {
    let capture = Capture {
        level: Level::Warn,
        lines: Arc::default(),
    };
    abslog::set_logger(AbsLog::new(capture.clone()));

    LogBridge::with_filter("info").unwrap().apply().unwrap();
    assert_eq!(log::max_level(), log::LevelFilter::Info);

    log::debug!("filtered by directives");
    log::info!("filtered by the global logger");
    let line = line!() + 1;
    log::warn!("disk at {}%", 91);
    log::error!("out of disk");

    let lines = capture.lines.lock().unwrap().clone();
    assert_eq!(
        lines,
        [
            format!("WARN tests/log_bridge.rs:{line} disk at 91%"),
            format!("ERROR tests/log_bridge.rs:{} out of disk", line + 1),
        ]
    );

    let err = LogBridge::with_filter("debug").unwrap().apply().unwrap_err();
    assert_eq!(err.message(), "failed to set up log bridge");
}
