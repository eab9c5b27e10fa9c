//! Modal overlays and frame tasks.

use crate::frame::FrameState;

/// A blocking full-screen layer (save failure, help) that takes over a
/// dispatch round while it is up.
pub trait ModalOverlay {
    /// Run the overlay's own frame if it is showing. Returning true replaces
    /// the pre hook and main routine for this round.
    fn is_active(&mut self, state: &mut FrameState) -> bool;
}

/// Bookkeeping run once per frame after dispatch, before the pulse wait.
pub trait FrameTask {
    fn run(&mut self, state: &FrameState);
}
