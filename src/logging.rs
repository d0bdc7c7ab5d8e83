// Copyright 2015 Axel Rasmussen
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::*;
use log::{self, LevelFilter, Log, Metadata, Record};
use std::collections::HashMap;

/// Parse a log level option value (e.g. the value of log-level-console)
/// into a LevelFilter. The recognized names are the ones the option
/// allow lists advertise; "detail" maps to Debug since the log crate has
/// no finer level between Info and Debug.
pub fn parse_log_level_filter(s: &str) -> Result<LevelFilter> {
    lazy_static! {
        static ref STRING_MAPPING: HashMap<&'static str, LevelFilter> = {
            let mut m = HashMap::new();
            m.insert("off", LevelFilter::Off);
            m.insert("error", LevelFilter::Error);
            m.insert("warn", LevelFilter::Warn);
            m.insert("info", LevelFilter::Info);
            m.insert("detail", LevelFilter::Debug);
            m.insert("debug", LevelFilter::Debug);
            m.insert("trace", LevelFilter::Trace);
            m
        };
    }

    let normalized = s.trim().to_lowercase();
    match STRING_MAPPING.get(normalized.as_str()) {
        None => Err(Error::Format(format_err!(
            "'{}' is not a valid log level",
            s
        ))),
        Some(f) => Ok(*f),
    }
}

/// Format a log record the way the command-line tool presents it: a
/// UTC timestamp, the level, and the message.
pub fn format_log_record(record: &Record) -> String {
    format!(
        "{} {}: {}",
        ::chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        record.level(),
        record.args()
    )
}

/// A Logger which writes formatted records to stderr. Output failures
/// are silently ignored; a tool whose stderr has gone away still has
/// work to finish.
pub struct Logger {
    max_level: LevelFilter,
}

impl Logger {
    pub fn new(max_level: LevelFilter) -> Self {
        Logger {
            max_level: max_level,
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if record.level() > self.max_level {
            return;
        }

        use std::io::Write;
        let _res = writeln!(::std::io::stderr(), "{}", format_log_record(record));
    }

    fn flush(&self) {}
}

/// Install a stderr Logger at the given level. Fails if a logger has
/// already been installed.
pub fn try_init(max_level: LevelFilter) -> Result<()> {
    log::set_max_level(max_level);
    log::set_boxed_logger(Box::new(Logger::new(max_level)))
        .map_err(|e| Error::Assert(format_err!("{}", e)))?;
    Ok(())
}

/// Bring logging up at WARN level so warnings emitted while parsing the
/// environment and configuration files reach the user. The caller (or a
/// test harness) may already have installed a logger; that is fine, the
/// existing sink is kept.
pub fn init_for_parse() {
    if try_init(LevelFilter::Warn).is_err() {
        log::set_max_level(LevelFilter::Warn);
    }
}
