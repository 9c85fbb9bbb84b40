//! Receive path (interrupt context)
//!
//! Bursts are routed by personality, admitted up to the free space of the
//! target channel and the rest is dropped: the UART interrupt has nobody to
//! report backpressure to and must never wait.

use super::{ChannelId, Cmi};
use crate::channel::ByteChannel;
use crate::mode::{Mode, Personality};
use crate::scheduler::Scheduler;

/// How the command consumer was signalled after a burst
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// Nothing signalled (inter-device target, or nothing admitted)
    None,
    /// Consumer activated, threshold reached
    Immediate,
    /// Coalescing timer (re)armed
    Deferred,
}

/// What happened to one inbound burst
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    /// Channel the burst was routed to
    pub target: ChannelId,
    /// Bytes queued on `target`
    pub admitted: usize,
    /// Bytes discarded for lack of space
    pub dropped: usize,
    /// Wake issued for the consumer
    pub wake: Wake,
}

/// Receive channel for a personality
pub fn inbound_target(personality: Personality) -> ChannelId {
    match personality {
        Personality::Master(Mode::Mcu) => ChannelId::InterDevice,
        Personality::Master(Mode::Data | Mode::Command) | Personality::SlaveOnly => {
            ChannelId::Command
        }
    }
}

impl<const INTER: usize, const CMD: usize, const AIR: usize> Cmi<INTER, CMD, AIR> {
    /// Route a received burst.
    ///
    /// Called from the UART interrupt only. Admits `min(free, len)` bytes into
    /// the target channel. For the command channel, wakes the consumer at once
    /// when the fill level reaches the read threshold, otherwise (re)arms the
    /// coalescing timer so small bursts are batched.
    pub fn route_inbound<S: Scheduler + ?Sized>(&self, bytes: &[u8], scheduler: &S) -> Admission {
        let target = inbound_target(self.personality());
        let mut admission = Admission {
            target,
            admitted: 0,
            dropped: 0,
            wake: Wake::None,
        };
        if bytes.is_empty() {
            return admission;
        }

        let pushed = match target {
            ChannelId::InterDevice => self.inter_device.push(bytes),
            // `inbound_target` never yields the transmit channel
            ChannelId::Command | ChannelId::AirOut => self.command.push(bytes),
        };
        admission.admitted = pushed.admitted;
        admission.dropped = bytes.len() - pushed.admitted;

        if admission.dropped > 0 {
            log::debug!(
                "rx_cnt: {}, admitted: {}, dropped on {:?}",
                bytes.len(),
                pushed.admitted,
                target
            );
        }
        if pushed.admitted == 0 {
            return admission;
        }

        if target == ChannelId::Command {
            admission.wake = if pushed.size >= self.config.threshold_read {
                scheduler.activate_task(self.consumer);
                Wake::Immediate
            } else {
                scheduler.arm_timer(self.coalesce_timer, self.config.coalesce_delay);
                Wake::Deferred
            };
        }

        log::trace!(
            "rx {} -> {:?} ({} queued, {:?})",
            pushed.admitted,
            target,
            pushed.size,
            admission.wake
        );
        admission
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CmiConfig;
    use crate::mode::Role;
    use crate::scheduler::traits::mock::{MockScheduler, SchedulerCall};
    use crate::scheduler::{TaskHandle, TimerHandle};
    use embassy_time::Duration;

    const TASK: TaskHandle = TaskHandle(3);
    const TIMER: TimerHandle = TimerHandle(4);

    fn cmi(role: Role, mode: Mode) -> Cmi<16, 16, 32> {
        Cmi::new(role, mode, CmiConfig::new().with_threshold_read(8), TASK, TIMER)
    }

    #[test]
    fn test_target_selection() {
        assert_eq!(
            inbound_target(Personality::Master(Mode::Mcu)),
            ChannelId::InterDevice
        );
        assert_eq!(
            inbound_target(Personality::Master(Mode::Data)),
            ChannelId::Command
        );
        assert_eq!(
            inbound_target(Personality::Master(Mode::Command)),
            ChannelId::Command
        );
        assert_eq!(inbound_target(Personality::SlaveOnly), ChannelId::Command);
    }

    #[test]
    fn test_inbound_never_targets_air_out() {
        let scheduler = MockScheduler::new();
        for (role, mode) in [
            (Role::Master, Mode::Mcu),
            (Role::Master, Mode::Data),
            (Role::Master, Mode::Command),
            (Role::SlaveOnly, Mode::Mcu),
        ] {
            let cmi = cmi(role, mode);
            let admission = cmi.route_inbound(&[1, 2, 3], &scheduler);

            assert_ne!(admission.target, ChannelId::AirOut);
            assert_eq!(cmi.air_out().size(), 0);
            assert_eq!(cmi.size_of(admission.target), 3);
        }
    }

    #[test]
    fn test_truncated_burst_wakes_immediately() {
        let cmi = cmi(Role::Master, Mode::Command);
        let scheduler = MockScheduler::new();
        cmi.command().push(&[0xAA; 6]);
        assert_eq!(cmi.command().free_space(), 10);

        let burst = [0x55u8; 20];
        let admission = cmi.route_inbound(&burst, &scheduler);

        assert_eq!(admission.admitted, 10);
        assert_eq!(admission.dropped, 10);
        assert_eq!(admission.wake, Wake::Immediate);
        assert_eq!(cmi.command().size(), 16);
        assert_eq!(scheduler.calls().as_slice(), &[SchedulerCall::Activate(TASK)]);
    }

    #[test]
    fn test_small_burst_arms_timer() {
        let cmi = cmi(Role::Master, Mode::Command);
        let scheduler = MockScheduler::new();

        let admission = cmi.route_inbound(&[1, 2, 3, 4], &scheduler);

        assert_eq!(admission.admitted, 4);
        assert_eq!(admission.wake, Wake::Deferred);
        assert_eq!(cmi.command().size(), 4);
        assert_eq!(
            scheduler.calls().as_slice(),
            &[SchedulerCall::Arm(TIMER, Duration::from_millis(5))]
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let cmi = cmi(Role::SlaveOnly, Mode::Mcu);
        let scheduler = MockScheduler::new();

        let admission = cmi.route_inbound(&[0; 8], &scheduler);

        assert_eq!(admission.wake, Wake::Immediate);
        assert_eq!(scheduler.last(), Some(SchedulerCall::Activate(TASK)));
    }

    #[test]
    fn test_mcu_mode_fills_inter_device_without_wake() {
        let cmi = cmi(Role::Master, Mode::Mcu);
        let scheduler = MockScheduler::new();

        let admission = cmi.route_inbound(&[7; 12], &scheduler);

        assert_eq!(admission.target, ChannelId::InterDevice);
        assert_eq!(admission.admitted, 12);
        assert_eq!(admission.wake, Wake::None);
        assert_eq!(cmi.inter_device().size(), 12);
        assert_eq!(cmi.command().size(), 0);
        assert!(scheduler.calls().is_empty());
    }

    #[test]
    fn test_full_channel_drops_silently() {
        let cmi = cmi(Role::Master, Mode::Data);
        let scheduler = MockScheduler::new();
        cmi.command().push(&[0; 16]);

        let admission = cmi.route_inbound(&[1, 2, 3], &scheduler);

        assert_eq!(admission.admitted, 0);
        assert_eq!(admission.dropped, 3);
        assert_eq!(admission.wake, Wake::None);
        assert!(scheduler.calls().is_empty());
    }

    #[test]
    fn test_empty_burst_is_noop() {
        let cmi = cmi(Role::Master, Mode::Command);
        let scheduler = MockScheduler::new();

        let admission = cmi.route_inbound(&[], &scheduler);

        assert_eq!(admission.admitted, 0);
        assert_eq!(admission.dropped, 0);
        assert!(scheduler.calls().is_empty());
    }

    #[test]
    fn test_mode_switch_reroutes_next_burst() {
        let cmi = cmi(Role::Master, Mode::Mcu);
        let scheduler = MockScheduler::new();

        cmi.route_inbound(&[1, 2], &scheduler);
        cmi.mode().set(Mode::Command);
        cmi.route_inbound(&[3, 4], &scheduler);

        assert_eq!(cmi.inter_device().size(), 2);
        assert_eq!(cmi.command().size(), 2);
    }
}
