//! 全局日志

use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// 日志级别从环境变量读取
pub const LOG_ENV: &str = "SECTORFS_LOG";

struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{:>5}][{}:{}] {}",
            record.level(),
            record.file().unwrap_or("?"),
            record.line().unwrap_or(0),
            record.args()
        );
        let line = match record.level() {
            Level::Error => line.red(),
            Level::Warn => line.bright_yellow(),
            Level::Info => line.blue(),
            Level::Debug => line.green(),
            Level::Trace => line.bright_black(),
        };
        eprintln!("{}", line);
    }

    fn flush(&self) {}
}

fn level_from(value: Option<&str>) -> LevelFilter {
    match value.map(str::to_ascii_uppercase).as_deref() {
        Some("ERROR") => LevelFilter::Error,
        Some("WARN") => LevelFilter::Warn,
        Some("INFO") => LevelFilter::Info,
        Some("DEBUG") => LevelFilter::Debug,
        Some("TRACE") => LevelFilter::Trace,
        Some("OFF") => LevelFilter::Off,
        _ => LevelFilter::Warn,
    }
}

/// 初始化日志，重复调用时保留第一次的设置
pub fn init() {
    static LOGGER: SimpleLogger = SimpleLogger;
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level_from(std::env::var(LOG_ENV).ok().as_deref()));
    }
}
