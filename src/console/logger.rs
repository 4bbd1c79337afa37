//! Logger implementation for the log crate.

use core::fmt::{self, Display};

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::HalResult;

pub struct SimpleLogger;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCode {
    Red = 31,
    Green = 32,
    Yellow = 33,
    Cyan = 36,
    BrightBlack = 90,
}

impl Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\u{1B}[{}m", *self as u8)
    }
}

impl Log for SimpleLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let file = record.file().unwrap_or("none");
        let line = record.line().unwrap_or(0);
        let args = record.args();
        let color_reset = "\u{1B}[0m";

        let args_color = match record.level() {
            Level::Error => ColorCode::Red,
            Level::Warn => ColorCode::Yellow,
            Level::Info => ColorCode::Green,
            Level::Debug => ColorCode::Cyan,
            Level::Trace => ColorCode::BrightBlack,
        };

        println!("[{file}:{line}] {args_color}{args}{color_reset}");
    }

    fn flush(&self) {
        crate::console::flush();
    }
}

fn level_from_env(level: Option<&str>) -> LevelFilter {
    match level {
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Off,
    }
}

/// Initialize the logger. The level comes from the `LOG` environment
/// variable at build time.
pub fn init() -> HalResult<()> {
    log::set_logger(&SimpleLogger).map_err(|_| anyhow::anyhow!("logger already installed"))?;
    log::set_max_level(level_from_env(option_env!("LOG")));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_selection_follows_the_env_value() {
        assert_eq!(level_from_env(Some("error")), LevelFilter::Error);
        assert_eq!(level_from_env(Some("trace")), LevelFilter::Trace);
        assert_eq!(level_from_env(Some("bogus")), LevelFilter::Off);
        assert_eq!(level_from_env(None), LevelFilter::Off);
    }
}
