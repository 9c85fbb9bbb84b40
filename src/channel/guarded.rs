//! Critical-section guarded byte ring

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::Deque;

use super::traits::{ByteChannel, ChannelFull, Pushed};

/// Byte ring of capacity `N` behind its own critical-section mutex.
///
/// The deque never leaves the lock closure, so no reference to queued bytes
/// can outlive the guard.
pub struct GuardedChannel<const N: usize> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Deque<u8, N>>>,
}

impl<const N: usize> GuardedChannel<N> {
    /// Create an empty channel (usable in a `static`)
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Deque<u8, N>) -> R) -> R {
        self.inner.lock(|cell| f(&mut *cell.borrow_mut()))
    }
}

impl<const N: usize> Default for GuardedChannel<N> {
    fn default() -> Self {
        Self::new()
    }
}

fn extend<const N: usize>(queue: &mut Deque<u8, N>, data: &[u8]) {
    for &byte in data {
        // Callers size `data` to the free space first
        let _ = queue.push_back(byte);
    }
}

impl<const N: usize> ByteChannel for GuardedChannel<N> {
    fn capacity(&self) -> usize {
        N
    }

    fn free_space(&self) -> usize {
        self.with(|queue| N - queue.len())
    }

    fn size(&self) -> usize {
        self.with(|queue| queue.len())
    }

    fn push(&self, data: &[u8]) -> Pushed {
        self.with(|queue| {
            let admitted = core::cmp::min(N - queue.len(), data.len());
            extend(queue, &data[..admitted]);
            Pushed {
                admitted,
                size: queue.len(),
            }
        })
    }

    fn push_all(&self, data: &[u8]) -> Result<(), ChannelFull> {
        self.with(|queue| {
            if N - queue.len() < data.len() {
                return Err(ChannelFull);
            }
            extend(queue, data);
            Ok(())
        })
    }

    fn pop(&self, buf: &mut [u8]) -> usize {
        self.with(|queue| {
            let mut count = 0;
            for slot in buf.iter_mut() {
                match queue.pop_front() {
                    Some(byte) => {
                        *slot = byte;
                        count += 1;
                    }
                    None => break,
                }
            }
            count
        })
    }

    fn clear(&self) {
        self.with(|queue| queue.clear());
    }
}
