//! Embassy tasks module
//!
//! Async consumers of the interface layer. The board crate spawns them with
//! its own executor.

pub mod command_rx;
pub mod log_writer;

pub use command_rx::{command_rx_once, command_rx_task};
pub use log_writer::{log_writer_task, write_next};
