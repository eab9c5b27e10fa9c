//! # framecore
//!
//! Real-time control core for a single-core handheld with no operating system.
//!
//! Every unit of application work is gated by the vertical-blank pulse: the
//! foreground loop samples the key port, runs the peer-link gate and the
//! callback chain exactly once per pulse, then busy-waits for the next one.
//! Interrupt handlers are bound through a fixed 14-entry dispatch table.
//!
//! ## Architecture
//!
//! - [`FrameScheduler`]: Outermost loop; owns [`FrameState`] and the callback chain
//! - [`InterruptDispatcher`]: Staged + published interrupt table, hook slots, IE/IME
//! - [`InputSampler`]: Edge detection, key repeat, L=A remap, watched-key latch
//! - [`watchdog`]: Soft-reset key combination check
//! - [`LinkGate`]: Outbound/inbound transfer phases around callback dispatch
//! - [`callback`]: Pre hook + main routine chain with modal overlays
//! - [`PlaybackHarness`]: Diagnostic routine that plays every audio item in turn
//! - [`peripherals`]: Collaborator traits: input port, pulse source, sound, peer link
//! - [`playtime`]: Play time accounting task
//! - [`recording`]: Raw key input recording and replay
//!
//! ## Timing
//!
//! The pulse nominally arrives at [`FRAME_RATE`] Hz. The sound engine keeps
//! its own 64 Hz-based clock; the harness reconciles the two with a periodic
//! +1 correction (see [`harness`]).

pub mod interrupt;
pub mod frame;
pub mod input;
pub mod watchdog;
pub mod link;
pub mod callback;
pub mod scheduler;
pub mod harness;
pub mod durations;
pub mod peripherals;
pub mod playtime;
pub mod recording;
pub mod config;

pub use callback::{Callback, ControlRoutine, FrameContext};
pub use config::CoreConfig;
pub use frame::FrameState;
pub use harness::{DurationEntry, PlaybackHarness};
pub use input::{InputSampler, RepeatTimingConfig};
pub use interrupt::{InterruptDispatcher, InterruptSource, IntrHandler};
pub use link::{GateReport, LinkGate, LinkPhase};
pub use scheduler::{FrameOutcome, FrameScheduler, SoftReset};

/// Nominal pulse (vertical blank) rate in Hz
pub const FRAME_RATE: u32 = 60;

/// Key port width: bits 0..9 carry buttons, the rest read as zero
pub const KEYS_MASK: u16 = 0x03FF;

// Key bits as they appear in the (inverted) key port
pub const A_BUTTON: u16 = 1 << 0;
pub const B_BUTTON: u16 = 1 << 1;
pub const SELECT_BUTTON: u16 = 1 << 2;
pub const START_BUTTON: u16 = 1 << 3;
pub const DPAD_RIGHT: u16 = 1 << 4;
pub const DPAD_LEFT: u16 = 1 << 5;
pub const DPAD_UP: u16 = 1 << 6;
pub const DPAD_DOWN: u16 = 1 << 7;
pub const R_BUTTON: u16 = 1 << 8;
pub const L_BUTTON: u16 = 1 << 9;

/// Button identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    Select,
    Start,
    Right,
    Left,
    Up,
    Down,
    R,
    L,
}

impl Button {
    pub const ALL: [Button; 10] = [
        Button::A, Button::B, Button::Select, Button::Start,
        Button::Right, Button::Left, Button::Up, Button::Down,
        Button::R, Button::L,
    ];

    /// Bit of this button in the key masks (active high)
    pub fn mask(self) -> u16 {
        match self {
            Button::A      => A_BUTTON,
            Button::B      => B_BUTTON,
            Button::Select => SELECT_BUTTON,
            Button::Start  => START_BUTTON,
            Button::Right  => DPAD_RIGHT,
            Button::Left   => DPAD_LEFT,
            Button::Up     => DPAD_UP,
            Button::Down   => DPAD_DOWN,
            Button::R      => R_BUTTON,
            Button::L      => L_BUTTON,
        }
    }
}

/// Build the raw (active-low) key port value for a set of pressed buttons.
pub fn key_port_value(pressed: &[Button]) -> u16 {
    let held = pressed.iter().fold(0u16, |acc, b| acc | b.mask());
    KEYS_MASK & !held
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_masks_are_distinct() {
        let all = Button::ALL.iter().fold(0u16, |acc, b| {
            assert_eq!(acc & b.mask(), 0, "{:?} overlaps", b);
            acc | b.mask()
        });
        assert_eq!(all, KEYS_MASK);
    }

    #[test]
    fn test_key_port_value_active_low() {
        assert_eq!(key_port_value(&[]), KEYS_MASK);
        assert_eq!(key_port_value(&[Button::A]), KEYS_MASK & !A_BUTTON);
        assert_eq!(key_port_value(&[Button::Start, Button::Select]), 0x03F3);
    }
}
