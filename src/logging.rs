// File: src/logging.rs
//! Console backend for the `log` facade, used by the CLI.

use std::sync::OnceLock;

use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// Environment variable that overrides the configured log level.
pub const LOG_ENV: &str = "HWRAND_LOG";

/// Writes `[LEVEL] target: message` lines to stderr, keeping stdout for
/// generated output.
pub struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Maps a level name to a filter. Unknown names fall back to `Info`.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Installs [`ConsoleLogger`] once and sets the maximum level.
///
/// Later calls only adjust the level. Fails, on every call, if another
/// logger was installed first.
pub fn init_logger(level_filter: LevelFilter) -> Result<(), SetLoggerError> {
    static INSTALLED: OnceLock<bool> = OnceLock::new();
    let installed = *INSTALLED.get_or_init(|| log::set_logger(&ConsoleLogger).is_ok());
    if !installed {
        // A foreign logger holds the slot, so this reports the same failure.
        return log::set_logger(&ConsoleLogger);
    }
    log::set_max_level(level_filter);
    Ok(())
}
