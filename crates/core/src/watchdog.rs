//! Soft-reset key combination.
//!
//! Holding A+B+START+SELECT reboots the device. The check runs on the raw
//! held mask, so the L=A remap can never stand in for A.

use crate::frame::FrameState;
use crate::{A_BUTTON, B_BUTTON, SELECT_BUTTON, START_BUTTON};

/// Buttons that must accompany A
pub const RESET_COMBO: u16 = B_BUTTON | START_BUTTON | SELECT_BUTTON;

/// True when the reset combination is held and resets are allowed.
pub fn should_reset(state: &FrameState) -> bool {
    !state.soft_reset_disabled
        && state.held_keys_raw & A_BUTTON != 0
        && state.held_keys_raw & RESET_COMBO == RESET_COMBO
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ButtonMode;
    use crate::input::InputSampler;
    use crate::{key_port_value, Button, L_BUTTON};
    use proptest::prelude::*;

    fn held(mask: u16) -> FrameState {
        let mut state = FrameState::new();
        state.held_keys_raw = mask;
        state
    }

    #[test]
    fn test_full_combo_fires() {
        assert!(should_reset(&held(A_BUTTON | RESET_COMBO)));
        assert!(should_reset(&held(A_BUTTON | RESET_COMBO | L_BUTTON)));
    }

    #[test]
    fn test_two_of_three_never_fires() {
        assert!(!should_reset(&held(A_BUTTON | B_BUTTON | START_BUTTON)));
        assert!(!should_reset(&held(A_BUTTON | B_BUTTON | SELECT_BUTTON)));
        assert!(!should_reset(&held(A_BUTTON | START_BUTTON | SELECT_BUTTON)));
        assert!(!should_reset(&held(RESET_COMBO)));
    }

    #[test]
    fn test_disabled() {
        let mut state = held(A_BUTTON | RESET_COMBO);
        state.soft_reset_disabled = true;
        assert!(!should_reset(&state));
    }

    #[test]
    fn test_l_does_not_substitute_for_a() {
        let sampler = InputSampler::default();
        let mut state = FrameState::new();
        state.button_mode = ButtonMode::LEqualsA;
        sampler.sample_raw(
            &mut state,
            key_port_value(&[Button::L, Button::B, Button::Start, Button::Select]),
        );
        assert_ne!(state.held_keys & A_BUTTON, 0);
        assert!(!should_reset(&state));
    }

    proptest! {
        #[test]
        fn fires_iff_exact_condition(mask in 0u16..0x0400, disabled in any::<bool>()) {
            let mut state = held(mask);
            state.soft_reset_disabled = disabled;
            let want = !disabled
                && mask & A_BUTTON != 0
                && mask & B_BUTTON != 0
                && mask & START_BUTTON != 0
                && mask & SELECT_BUTTON != 0;
            prop_assert_eq!(should_reset(&state), want);
        }
    }
}
