//! Peer-link contract.
//!
//! Only the phase predicates and the stop handshake are consumed here; the
//! transport itself lives behind the implementation.

use crate::frame::FrameState;

pub trait PeerLink {
    /// We are sending our key state to the peer this frame.
    fn outbound_transfer_active(&mut self) -> bool;
    /// The peer is sending its key state to us this frame.
    fn inbound_transfer_active(&mut self) -> bool;
    /// Ask the link hardware to enter its stopped mode.
    fn request_stop(&mut self);
    /// Block until the stop request is acknowledged.
    fn wait_stop_complete(&mut self);
    /// Drop pending sprite/draw-list copy requests.
    fn flush_pending_copy_requests(&mut self);

    /// Link connection housekeeping before a dispatch round. Returning true
    /// means the link layer used this round and callbacks must wait.
    fn handle_connection(&mut self, _state: &mut FrameState) -> bool {
        false
    }
}

/// No peer attached.
#[derive(Debug, Default)]
pub struct OfflineLink;

impl PeerLink for OfflineLink {
    fn outbound_transfer_active(&mut self) -> bool { false }
    fn inbound_transfer_active(&mut self) -> bool { false }
    fn request_stop(&mut self) {}
    fn wait_stop_complete(&mut self) {}
    fn flush_pending_copy_requests(&mut self) {}
}
