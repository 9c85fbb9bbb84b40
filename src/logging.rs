//! `log` backend for the firmware.
//!
//! Records are formatted into a fixed-size buffer that keeps the latest
//! message only, and a signal wakes the writer task. Logging never blocks,
//! so it is usable from the UART interrupt; messages are dropped if the
//! writer falls behind or the sink is not installed.

use core::cell::RefCell;
use core::fmt::Write;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use heapless::String;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::logging::MAX_MESSAGE_LEN;

/// One formatted log line
pub type LogMessage = String<MAX_MESSAGE_LEN>;

/// Signal raised whenever a message is buffered
pub static LOG_SIGNAL: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Latest pending message (`None` until the sink is installed)
static LOG_BUFFER: Mutex<CriticalSectionRawMutex, RefCell<Option<LogMessage>>> =
    Mutex::new(RefCell::new(None));

static LOGGER: BufferLogger = BufferLogger;

/// Logger writing into [`LOG_BUFFER`]
pub struct BufferLogger;

/// Install the buffer logger as the global `log` backend.
///
/// Must be called once during startup, before the tasks are spawned.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    install_buffer();
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

pub(crate) fn install_buffer() {
    LOG_BUFFER.lock(|cell| {
        cell.replace(Some(String::new()));
    });
}

/// Check if the sink is installed
pub fn is_init() -> bool {
    LOG_BUFFER.lock(|cell| cell.borrow().is_some())
}

/// Replace the pending message with `msg`, truncating it to the buffer size.
///
/// Returns false if the sink is not installed.
pub fn write_message(msg: &str) -> bool {
    LOG_BUFFER.lock(|cell| {
        let mut borrowed = cell.borrow_mut();
        if let Some(ref mut buffer) = *borrowed {
            buffer.clear();
            let _ = Truncate::new(buffer).write_str(msg);
            LOG_SIGNAL.signal(());
            true
        } else {
            false
        }
    })
}

/// Take the pending message, if any
pub fn take_message() -> Option<LogMessage> {
    LOG_BUFFER.lock(|cell| {
        let mut borrowed = cell.borrow_mut();
        match *borrowed {
            Some(ref mut buffer) if !buffer.is_empty() => {
                let msg = buffer.clone();
                buffer.clear();
                Some(msg)
            }
            _ => None,
        }
    })
}

/// Format a record as `LEVEL target: message`, truncated to the buffer size
pub fn format_record(record: &Record) -> LogMessage {
    let mut line = LogMessage::new();
    let _ = write!(
        Truncate::new(&mut line),
        "{} {}: {}",
        record.level(),
        record.target(),
        record.args()
    );
    line
}

/// `fmt::Write` adapter that keeps what fits and silently drops the rest.
///
/// Once a character is refused nothing more is appended, so the buffer
/// always holds a prefix of the formatted text.
struct Truncate<'a> {
    line: &'a mut LogMessage,
    full: bool,
}

impl<'a> Truncate<'a> {
    fn new(line: &'a mut LogMessage) -> Self {
        Self { line, full: false }
    }
}

impl Write for Truncate<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        if self.full {
            return Ok(());
        }
        if self.line.push_str(s).is_ok() {
            return Ok(());
        }
        for ch in s.chars() {
            if self.line.push(ch).is_err() {
                self.full = true;
                break;
            }
        }
        Ok(())
    }
}

impl Log for BufferLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            write_message(&format_record(record));
        }
    }

    fn flush(&self) {}
}

/// Serializes tests that share the global log buffer
#[cfg(test)]
pub(crate) fn lock_buffer() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
