//! Per-frame shared state.
//!
//! One [`FrameState`] exists per [`crate::FrameScheduler`]. Components touch
//! only their own fields: the input sampler writes the key masks, the link
//! gate writes `link_transferring`, interrupt handlers write the pulse
//! counters and `intr_check`, and the active main routine owns `cycle` and
//! `scratch`.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::config::ButtonMode;

/// Hook run from interrupt context (vblank, hblank, vcount, serial).
pub type IntrCallback = fn(&mut FrameState);

pub struct FrameState {
    /// Cycle counter of the active main routine; zeroed whenever it changes
    pub cycle: u32,
    /// Free-form scratch word for whichever routine is active
    pub scratch: u32,

    /// Keys held this frame, straight from the port
    pub held_keys_raw: u16,
    /// Keys that went down this frame, straight from the port
    pub new_keys_raw: u16,
    /// Keys held this frame, after remap
    pub held_keys: u16,
    /// Keys that went down this frame, after remap
    pub new_keys: u16,
    /// Like `new_keys_raw`, plus held keys on each repeat tick
    pub new_and_repeated_keys: u16,
    pub key_repeat_counter: u16,
    pub watched_keys_mask: u16,
    /// Sticky; set when any watched key appears in `new_keys`
    pub watched_keys_pressed: bool,
    pub button_mode: ButtonMode,

    /// Interrupt sources that fired since last cleared (IF bit layout)
    pub intr_check: u16,
    /// Optional observer of pulse counter 1
    vblank_counter1: Option<Arc<AtomicU32>>,
    pub vblank_counter2: u32,

    pub vblank_callback: Option<IntrCallback>,
    pub hblank_callback: Option<IntrCallback>,
    /// Line-compare hook, run after the sound resync
    pub vcount_callback: Option<IntrCallback>,
    pub serial_callback: Option<IntrCallback>,

    /// True while the link gate runs a dispatch round on behalf of a transfer
    pub link_transferring: bool,
    /// Suppresses the link layer's vblank work
    pub link_vsync_disabled: bool,
    pub soft_reset_disabled: bool,

    /// Frames completed since boot
    pub frame_count: u64,
}

impl FrameState {
    pub fn new() -> Self {
        FrameState {
            cycle: 0,
            scratch: 0,
            held_keys_raw: 0,
            new_keys_raw: 0,
            held_keys: 0,
            new_keys: 0,
            new_and_repeated_keys: 0,
            key_repeat_counter: 0,
            watched_keys_mask: 0,
            watched_keys_pressed: false,
            button_mode: ButtonMode::Normal,
            intr_check: 0,
            vblank_counter1: None,
            vblank_counter2: 0,
            vblank_callback: None,
            hblank_callback: None,
            vcount_callback: None,
            serial_callback: None,
            link_transferring: false,
            link_vsync_disabled: false,
            soft_reset_disabled: false,
            frame_count: 0,
        }
    }

    /// Redirect pulse counter 1 to an external observer.
    pub fn set_vblank_counter1(&mut self, counter: Arc<AtomicU32>) {
        self.vblank_counter1 = Some(counter);
    }

    pub fn disable_vblank_counter1(&mut self) {
        self.vblank_counter1 = None;
    }

    pub fn vblank_counter1(&self) -> Option<&Arc<AtomicU32>> {
        self.vblank_counter1.as_ref()
    }

    // Pulse counters are written from the vblank handler only.
    pub(crate) fn bump_counter1(&mut self) {
        if let Some(counter) = &self.vblank_counter1 {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn bump_counter2(&mut self) {
        self.vblank_counter2 = self.vblank_counter2.wrapping_add(1);
    }

    /// Clear the watched-key latch and arm a new mask.
    pub fn watch_keys(&mut self, mask: u16) {
        self.watched_keys_mask = mask;
        self.watched_keys_pressed = false;
    }

    pub fn new_pressed(&self, mask: u16) -> bool {
        self.new_keys & mask != 0
    }

    pub fn held(&self, mask: u16) -> bool {
        self.held_keys & mask != 0
    }

    pub fn repeated(&self, mask: u16) -> bool {
        self.new_and_repeated_keys & mask != 0
    }
}

impl Default for FrameState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameState")
            .field("cycle", &self.cycle)
            .field("held_keys", &format_args!("{:#05X}", self.held_keys))
            .field("new_keys", &format_args!("{:#05X}", self.new_keys))
            .field("intr_check", &format_args!("{:#06X}", self.intr_check))
            .field("vblank_counter2", &self.vblank_counter2)
            .field("link_transferring", &self.link_transferring)
            .field("frame_count", &self.frame_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter1_redirect_and_disable() {
        let mut state = FrameState::new();
        let observer = Arc::new(AtomicU32::new(10));
        state.bump_counter1();
        assert_eq!(observer.load(Ordering::Relaxed), 10);

        state.set_vblank_counter1(observer.clone());
        state.bump_counter1();
        state.bump_counter1();
        assert_eq!(observer.load(Ordering::Relaxed), 12);

        state.disable_vblank_counter1();
        state.bump_counter1();
        assert_eq!(observer.load(Ordering::Relaxed), 12);
        assert!(state.vblank_counter1().is_none());
    }

    #[test]
    fn test_counter2_wraps() {
        let mut state = FrameState::new();
        state.vblank_counter2 = u32::MAX;
        state.bump_counter2();
        assert_eq!(state.vblank_counter2, 0);
    }

    #[test]
    fn test_watch_keys_rearms_latch() {
        let mut state = FrameState::new();
        state.watched_keys_pressed = true;
        state.watch_keys(crate::A_BUTTON);
        assert!(!state.watched_keys_pressed);
        assert_eq!(state.watched_keys_mask, crate::A_BUTTON);
    }
}
