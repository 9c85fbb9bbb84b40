//! Bounded byte channel contract
//!
//! The routers only need capacity queries and bulk insertion; consumers
//! drain with [`ByteChannel::pop`]. Every method is one short critical
//! section, callable from both interrupt and task context.

use core::fmt;

/// The transmit channel cannot take the whole payload.
///
/// Nothing was written; the caller decides whether to retry, drop or throttle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelFull;

impl fmt::Display for ChannelFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("channel full")
    }
}

/// Result of a truncating push
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pushed {
    /// Bytes accepted from the front of the payload
    pub admitted: usize,
    /// Channel size right after the push, read under the same guard
    pub size: usize,
}

/// Fixed-capacity byte ring shared between interrupt and task context
pub trait ByteChannel {
    /// Total capacity in bytes
    fn capacity(&self) -> usize;

    /// Bytes that can still be pushed
    fn free_space(&self) -> usize;

    /// Bytes currently queued
    fn size(&self) -> usize;

    /// Push as much of `data` as fits and drop the rest
    fn push(&self, data: &[u8]) -> Pushed;

    /// Push all of `data` or nothing
    fn push_all(&self, data: &[u8]) -> Result<(), ChannelFull>;

    /// Pop up to `buf.len()` bytes in FIFO order, returning how many were copied
    fn pop(&self, buf: &mut [u8]) -> usize;

    /// Discard everything queued
    fn clear(&self);

    /// True when nothing is queued
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}
