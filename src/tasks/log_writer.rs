//! Log writer task
//!
//! Generic over any `embedded_io_async::Write`, so the log can go to a
//! spare UART, USB CDC port or RTT channel.

use embedded_io_async::Write;

use crate::logging::{take_message, LOG_SIGNAL};

/// Task that writes buffered log messages to `writer`.
pub async fn log_writer_task<W: Write>(mut writer: W) -> ! {
    loop {
        write_next(&mut writer).await;
    }
}

/// Wait for the next buffered message and write it as one line.
///
/// Returns false if the signal fired with nothing buffered.
pub async fn write_next<W: Write>(writer: &mut W) -> bool {
    LOG_SIGNAL.wait().await;

    match take_message() {
        Some(msg) => {
            // Nobody to report a failed log write to
            let _ = writer.write_all(msg.as_bytes()).await;
            let _ = writer.write_all(b"\r\n").await;
            true
        }
        None => false,
    }
}
