//! Глобальный pluggable logger
//!
//! Симуляция не знает кто печатает: консоль (headless), движок (через свой
//! LogPrinter) или тест. Timestamp добавляется здесь, не в LogPrinter.

use once_cell::sync::Lazy;
use std::sync::Mutex;

// Потокобезопасный глобальный logger (Arc не нужен для static)
static LOGGER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

/// Минимальный уровень, который доходит до LogPrinter
pub static LOGGER_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Info));

pub fn set_logger(logger: Box<dyn LogPrinter>) {
    *LOGGER.lock().unwrap() = Some(logger);
}

pub fn set_log_level(level: LogLevel) {
    *LOGGER_LEVEL.lock().unwrap() = level;
}

pub fn log_level() -> LogLevel {
    *LOGGER_LEVEL.lock().unwrap()
}

pub fn set_logger_if_needed(logger: Box<dyn LogPrinter>) {
    let mut slot = LOGGER.lock().unwrap();
    if slot.is_none() {
        *slot = Some(logger);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

/// Debug-уровень (per-tick болтовня FSM)
pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    if level < log_level() {
        return;
    }

    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        logger.log(level, &format!("[{}] {}", timestamp, message));
    }
}

pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}
