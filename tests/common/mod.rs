//! Host mocks shared by the integration tests.
//!
//! Record every collaborator call so tests can assert on the full history
//! without real UART registers or an executor.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use embassy_time::Duration;
use meshbee_cmi::{CommandSink, InterruptCause, Scheduler, TaskHandle, TimerHandle, UartPort};

// ── Scheduler ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerCall {
    Activate(TaskHandle),
    Arm(TimerHandle, Duration),
}

#[derive(Default)]
pub struct RecordingScheduler {
    pub calls: RefCell<Vec<SchedulerCall>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activations(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, SchedulerCall::Activate(_)))
            .count()
    }

    pub fn arms(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, SchedulerCall::Arm(..)))
            .count()
    }
}

impl Scheduler for RecordingScheduler {
    fn activate_task(&self, task: TaskHandle) {
        self.calls.borrow_mut().push(SchedulerCall::Activate(task));
    }

    fn arm_timer(&self, timer: TimerHandle, delay: Duration) {
        self.calls.borrow_mut().push(SchedulerCall::Arm(timer, delay));
    }
}

// ── UART ──────────────────────────────────────────────────────

pub struct FakeUart {
    pub cause: InterruptCause,
    pub rx_fifo: VecDeque<u8>,
    pub transmitted: Vec<u8>,
    pub tx_triggers: usize,
}

impl FakeUart {
    pub fn new() -> Self {
        Self {
            cause: InterruptCause::Other,
            rx_fifo: VecDeque::new(),
            transmitted: Vec::new(),
            tx_triggers: 0,
        }
    }

    /// Queue bytes in the receive FIFO and raise an RX interrupt
    pub fn receive(&mut self, data: &[u8]) {
        self.rx_fifo.extend(data.iter().copied());
        self.cause = InterruptCause::RxData;
    }
}

impl UartPort for FakeUart {
    fn interrupt_cause(&mut self) -> InterruptCause {
        self.cause
    }

    fn rx_fifo_level(&mut self) -> usize {
        self.rx_fifo.len()
    }

    fn block_read(&mut self, buf: &mut [u8]) -> usize {
        let count = buf.len().min(self.rx_fifo.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx_fifo.drain(..count)) {
            *slot = byte;
        }
        count
    }

    fn transmit(&mut self, data: &[u8]) {
        self.transmitted.extend_from_slice(data);
    }

    fn trigger_tx(&mut self) {
        self.tx_triggers += 1;
    }
}

// ── Command sink ──────────────────────────────────────────────

#[derive(Default)]
pub struct CollectingSink {
    pub chunks: Vec<Vec<u8>>,
}

impl CollectingSink {
    pub fn bytes(&self) -> Vec<u8> {
        self.chunks.concat()
    }
}

impl CommandSink for CollectingSink {
    fn handle(&mut self, bytes: &[u8]) {
        self.chunks.push(bytes.to_vec());
    }
}
