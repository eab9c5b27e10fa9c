//! Collaborator interfaces the core drives but does not implement.
//!
//! - [`InputPort`]: Active-low key input register
//! - [`PulseSource`]: Interrupt request lines, including the vblank pulse
//! - [`InterruptServices`]: Side effects the standard handlers trigger
//! - [`SystemReset`]: Irreversible soft reset
//! - [`SoundEngine`]: Audio item start/stop/status
//! - [`PeerLink`]: Peer-link transfer phases and stop handshake
//! - [`ModalOverlay`]: Full-screen layers that take over callback dispatch
//! - [`FrameTask`]: Per-frame accounting run after dispatch
//!
//! Boards implement the first four together; anything that does is a
//! [`Hardware`].

mod port;
mod sound;
mod peer;
mod overlay;

pub use port::{Hardware, InputPort, InterruptServices, PulseSource, ResetScope, SystemReset};
pub use sound::{ItemStatus, Silence, SoundEngine};
pub use peer::{OfflineLink, PeerLink};
pub use overlay::{FrameTask, ModalOverlay};
