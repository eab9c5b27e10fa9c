//! Key sampling with edge detection and key repeat.
//!
//! Runs once per frame, after the port has settled and before any callback.
//! Produces three views of the buttons:
//!
//! - `new_keys`: went down this frame
//! - `held_keys`: currently down
//! - `new_and_repeated_keys`: went down this frame, or held long enough to
//!   fire a repeat tick
//!
//! Repeat compares the raw port value against the previous frame's
//! *remapped* held mask. With L=A mode on, holding L therefore never
//! repeats: the remapped mask carries A while the raw mask does not. The
//! remap also never reaches `new_and_repeated_keys`.

use serde::{Deserialize, Serialize};

use crate::config::ButtonMode;
use crate::frame::FrameState;
use crate::peripherals::InputPort;
use crate::{A_BUTTON, KEYS_MASK, L_BUTTON};

/// Key repeat cadence, in frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatTimingConfig {
    /// Frames a key must stay held before the first repeat
    pub start_delay: u16,
    /// Frames between subsequent repeats
    pub continue_delay: u16,
}

impl Default for RepeatTimingConfig {
    fn default() -> Self {
        RepeatTimingConfig { start_delay: 40, continue_delay: 5 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    pub repeat: RepeatTimingConfig,
}

impl InputSampler {
    pub fn new(repeat: RepeatTimingConfig) -> Self {
        InputSampler { repeat }
    }

    /// Zero every key mask.
    pub fn reset(&self, state: &mut FrameState) {
        state.held_keys = 0;
        state.new_keys = 0;
        state.new_and_repeated_keys = 0;
        state.held_keys_raw = 0;
        state.new_keys_raw = 0;
    }

    /// Read the port and update the key masks.
    pub fn sample(&self, state: &mut FrameState, port: &mut dyn InputPort) {
        let value = port.read_key_input();
        self.sample_raw(state, value);
    }

    /// Update the key masks from a raw (active-low) port value.
    pub fn sample_raw(&self, state: &mut FrameState, port_value: u16) {
        let key_input = (port_value ^ KEYS_MASK) & KEYS_MASK;

        state.new_keys_raw = key_input & !state.held_keys_raw;
        state.new_keys = state.new_keys_raw;
        state.new_and_repeated_keys = state.new_keys_raw;

        if key_input != 0 && state.held_keys == key_input {
            state.key_repeat_counter = state.key_repeat_counter.wrapping_sub(1);
            if state.key_repeat_counter == 0 {
                state.new_and_repeated_keys = key_input;
                state.key_repeat_counter = self.repeat.continue_delay;
            }
        } else {
            // Released or changed: restart the repeat delay
            state.key_repeat_counter = self.repeat.start_delay;
        }

        state.held_keys_raw = key_input;
        state.held_keys = key_input;

        if state.button_mode == ButtonMode::LEqualsA {
            if state.new_keys & L_BUTTON != 0 {
                state.new_keys |= A_BUTTON;
            }
            if state.held_keys & L_BUTTON != 0 {
                state.held_keys |= A_BUTTON;
            }
        }

        if state.new_keys & state.watched_keys_mask != 0 {
            state.watched_keys_pressed = true;
        }
    }
}
