//! Custom logging module.
//!
//! This module provides a logger implementation that formats log entries and
//! forwards them to a pluggable callback, so the binary can route store
//! diagnostics (such as subscriber failures) wherever it needs them.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

type LogCallback = Box<dyn Fn(String) + Send + Sync>;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Logger that forwards formatted entries to a callback
///
pub struct SessionLogger {
    level: LevelFilter,
    log_callback: Arc<Mutex<Option<LogCallback>>>,
}

impl SessionLogger {
    pub fn new(level: LevelFilter) -> Self {
        SessionLogger {
            level,
            log_callback: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_log_callback(&self, callback: LogCallback) {
        if let Ok(mut guard) = self.log_callback.lock() {
            *guard = Some(callback);
        }
    }

    /// Install this logger as the global `log` backend.
    ///
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for SessionLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(callback) = self.log_callback.lock() {
                if let Some(ref cb) = *callback {
                    cb(format_log(record));
                }
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured(logger: &SessionLogger) -> Arc<Mutex<Vec<String>>> {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lines);
        logger.set_log_callback(Box::new(move |line: String| sink.lock().unwrap().push(line)));
        lines
    }

    #[test]
    fn format_includes_level_and_message() {
        let line = format_log(
            &Record::builder()
                .args(format_args!("Subscriber {} failed", 3))
                .level(Level::Error)
                .build(),
        );
        assert!(line.contains("ERROR"));
        assert!(line.ends_with("Subscriber 3 failed"));
    }

    #[test]
    fn forwards_enabled_records() {
        let logger = SessionLogger::new(LevelFilter::Info);
        let lines = captured(&logger);
        logger.log(
            &Record::builder()
                .args(format_args!("kept"))
                .level(Level::Warn)
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("filtered"))
                .level(Level::Debug)
                .build(),
        );
        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("WARN kept"));
    }

    #[test]
    fn install_sets_global_logger_once() {
        SessionLogger::new(LevelFilter::Warn).install().unwrap();
        assert_eq!(log::max_level(), LevelFilter::Warn);
        assert!(SessionLogger::new(LevelFilter::Info).install().is_err());
    }

    #[test]
    fn no_callback_is_silent() {
        let logger = SessionLogger::new(LevelFilter::Trace);
        logger.log(
            &Record::builder()
                .args(format_args!("dropped"))
                .level(Level::Info)
                .build(),
        );
    }
}
