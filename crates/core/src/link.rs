//! Peer-link gate around callback dispatch.
//!
//! Each frame does one or two dispatch rounds depending on which half of a
//! duplex key exchange is active:
//!
//! | outbound | inbound | rounds |
//! |----------|---------|--------|
//! | no       | no      | 1      |
//! | yes      | any     | 1 (flagged as transferring) |
//! | no       | yes     | 2 (second flagged, `new_keys` cleared first) |
//!
//! The second round lets the application see the peer's absorbed key state
//! exactly once, without this side's own press edges mixed in.

use log::trace;

use crate::frame::FrameState;
use crate::peripherals::PeerLink;

/// Transfer phases seen this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkPhase {
    /// We push our keys to the peer
    pub outbound: bool,
    /// The peer pushes its keys to us
    pub inbound: bool,
}

/// What the gate did this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GateReport {
    pub phase: LinkPhase,
    /// Dispatch rounds attempted
    pub rounds: u8,
    /// Rounds in which the callbacks actually ran
    pub dispatched: u8,
}

#[derive(Debug, Default)]
pub struct LinkGate {
    pub dbg_inbound_frames: u64,
}

impl LinkGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run this frame's dispatch rounds. `dispatch` runs the callback chain.
    pub fn run<F>(&mut self, state: &mut FrameState, link: &mut dyn PeerLink, mut dispatch: F) -> GateReport
    where
        F: FnMut(&mut FrameState),
    {
        let mut report = GateReport::default();

        if link.outbound_transfer_active() {
            report.phase.outbound = true;
            state.link_transferring = true;
            self.round(state, link, &mut dispatch, &mut report);
            state.link_transferring = false;
        } else {
            state.link_transferring = false;
            self.round(state, link, &mut dispatch, &mut report);

            if link.inbound_transfer_active() {
                report.phase.inbound = true;
                self.dbg_inbound_frames += 1;
                state.new_keys = 0;
                link.flush_pending_copy_requests();
                state.link_transferring = true;
                self.round(state, link, &mut dispatch, &mut report);
                state.link_transferring = false;
            }
        }

        trace!("link gate: {:?}", report);
        report
    }

    fn round<F>(&self, state: &mut FrameState, link: &mut dyn PeerLink, dispatch: &mut F, report: &mut GateReport)
    where
        F: FnMut(&mut FrameState),
    {
        report.rounds += 1;
        if link.handle_connection(state) {
            return;
        }
        dispatch(state);
        report.dispatched += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeLink {
        outbound: bool,
        inbound: bool,
        busy_rounds: u32,
        flushes: u32,
    }

    impl PeerLink for FakeLink {
        fn outbound_transfer_active(&mut self) -> bool { self.outbound }
        fn inbound_transfer_active(&mut self) -> bool { self.inbound }
        fn request_stop(&mut self) {}
        fn wait_stop_complete(&mut self) {}
        fn flush_pending_copy_requests(&mut self) { self.flushes += 1; }
        fn handle_connection(&mut self, _state: &mut FrameState) -> bool {
            if self.busy_rounds > 0 {
                self.busy_rounds -= 1;
                true
            } else {
                false
            }
        }
    }

    /// (new_keys, link_transferring) seen by each dispatch
    fn run_gate(link: &mut FakeLink) -> (GateReport, Vec<(u16, bool)>, FrameState) {
        let mut gate = LinkGate::new();
        let mut state = FrameState::new();
        state.new_keys = 0x0001;
        let mut seen = Vec::new();
        let report = gate.run(&mut state, link, |s| seen.push((s.new_keys, s.link_transferring)));
        (report, seen, state)
    }

    #[test]
    fn test_idle_single_round() {
        let mut link = FakeLink::default();
        let (report, seen, state) = run_gate(&mut link);
        assert_eq!(report.rounds, 1);
        assert_eq!(seen, vec![(0x0001, false)]);
        assert_eq!(link.flushes, 0);
        assert!(!state.link_transferring);
    }

    #[test]
    fn test_outbound_single_flagged_round() {
        let mut link = FakeLink { outbound: true, ..Default::default() };
        let (report, seen, state) = run_gate(&mut link);
        assert_eq!(report.phase, LinkPhase { outbound: true, inbound: false });
        assert_eq!(seen, vec![(0x0001, true)]);
        assert!(!state.link_transferring);
    }

    #[test]
    fn test_outbound_wins_over_inbound() {
        let mut link = FakeLink { outbound: true, inbound: true, ..Default::default() };
        let (report, seen, _) = run_gate(&mut link);
        assert_eq!(report.rounds, 1);
        assert_eq!(seen, vec![(0x0001, true)]);
        assert_eq!(link.flushes, 0);
    }

    #[test]
    fn test_inbound_two_rounds_clears_new_keys() {
        let mut link = FakeLink { inbound: true, ..Default::default() };
        let (report, seen, state) = run_gate(&mut link);
        assert_eq!(report.rounds, 2);
        assert_eq!(report.dispatched, 2);
        assert_eq!(seen, vec![(0x0001, false), (0x0000, true)]);
        assert_eq!(link.flushes, 1);
        assert!(!state.link_transferring);
    }

    #[test]
    fn test_busy_link_skips_dispatch() {
        let mut link = FakeLink { inbound: true, busy_rounds: 1, ..Default::default() };
        let (report, seen, _) = run_gate(&mut link);
        assert_eq!(report.rounds, 2);
        assert_eq!(report.dispatched, 1);
        assert_eq!(seen, vec![(0x0000, true)]);
    }
}
