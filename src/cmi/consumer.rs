//! Command channel consumer
//!
//! The AT/data processor runs as a task woken by the ingress router. Each
//! wake drains the command channel in fixed-size chunks.

use super::Cmi;
use crate::config::consumer::CHUNK_SIZE;

/// Receiver of drained command-channel bytes (AT parser, data forwarder)
pub trait CommandSink {
    /// Handle one chunk, in arrival order
    fn handle(&mut self, bytes: &[u8]);
}

impl<const INTER: usize, const CMD: usize, const AIR: usize> Cmi<INTER, CMD, AIR> {
    /// Drain the command channel into `sink`.
    ///
    /// Bytes arriving while this runs are picked up in the same pass.
    /// Returns the total number of bytes handed over.
    pub fn pump_command<K: CommandSink + ?Sized>(&self, sink: &mut K) -> usize {
        let mut chunk = [0u8; CHUNK_SIZE];
        let mut total = 0;
        loop {
            let count = self.drain_command(&mut chunk);
            if count == 0 {
                break;
            }
            sink.handle(&chunk[..count]);
            total += count;
        }
        total
    }
}
