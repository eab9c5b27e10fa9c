//! Diagnostic main routine that plays every audio item in turn.
//!
//! The harness is a state machine keyed off [`FrameState::cycle`] with a
//! settle threshold `S`:
//!
//! - `cycle < S` settling: count up
//! - `cycle == S` starting: zero the accumulator and start the item
//! - `cycle == S + 1` timing: wait for the item to end
//! - `cycle == S + 2` finished: every item in range has played
//!
//! The frame clock runs at 60 Hz while item lengths are kept on the sound
//! engine's 64 Hz clock. Each timing call adds the item's tempo to the
//! accumulator and every 15th call adds it once more, so 60 calls add
//! `64 * tempo`.
//!
//! Looping items never end on their own: they are stopped two seconds after
//! their first pass. Everything else advances once the engine reports the
//! player paused.

use log::{debug, info};

use crate::callback::{ControlRoutine, FrameContext};
use crate::durations::DURATIONS;

/// Default settle time between items, in frames
pub const SETTLE_FRAMES: u32 = 120;

/// Largest settle time; the phase markers above it must stay representable
pub const MAX_SETTLE: u32 = u32::MAX - 2;

/// Timing calls between tempo corrections
const CORRECTION_PERIOD: u32 = 15;

/// Length metadata for one audio item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationEntry {
    pub name: &'static str,
    /// Accumulator units per frame
    pub tempo: u16,
    /// First pass length in tempo-scaled 1/64 s units
    pub length: u32,
    pub looping: bool,
}

impl DurationEntry {
    /// Accumulator value at which a looping item is stopped.
    pub fn stop_threshold(&self) -> u32 {
        self.length + 2 * 64 * self.tempo as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Settling,
    Starting,
    Timing,
    Finished,
}

pub struct PlaybackHarness {
    table: &'static [DurationEntry],
    first: u16,
    last: u16,
    current: u16,
    settle: u32,
    progress: u32,
    calls: u32,
    phase: PlaybackPhase,
}

impl PlaybackHarness {
    /// Walk the whole built-in table.
    pub fn new() -> Self {
        Self::with_table(DURATIONS)
    }

    pub fn with_table(table: &'static [DurationEntry]) -> Self {
        let last = table.len().saturating_sub(1) as u16;
        PlaybackHarness {
            table,
            first: 0,
            last,
            current: 0,
            settle: SETTLE_FRAMES,
            progress: 0,
            calls: 0,
            phase: if table.is_empty() { PlaybackPhase::Finished } else { PlaybackPhase::Settling },
        }
    }

    /// Restrict playback to items `first..=last` (clamped to the table).
    pub fn with_range(mut self, first: u16, last: u16) -> Self {
        let max = self.table.len().saturating_sub(1) as u16;
        self.last = last.min(max);
        self.first = first.min(self.last);
        self.current = self.first;
        self
    }

    /// Frames to wait before each item, clamped to [`MAX_SETTLE`].
    pub fn with_settle(mut self, settle: u32) -> Self {
        self.settle = settle.min(MAX_SETTLE);
        self
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn current_item(&self) -> u16 {
        self.current
    }

    pub fn current_entry(&self) -> Option<&'static DurationEntry> {
        self.table.get(self.current as usize)
    }

    /// Tempo-scaled accumulator of the item being timed
    pub fn progress(&self) -> u32 {
        self.progress
    }

    fn phase_for(&self, cycle: u32) -> PlaybackPhase {
        if cycle < self.settle {
            PlaybackPhase::Settling
        } else if cycle == self.settle {
            PlaybackPhase::Starting
        } else if cycle == self.settle + 1 {
            PlaybackPhase::Timing
        } else {
            PlaybackPhase::Finished
        }
    }

    /// True once the current item is done.
    fn time_item(&mut self, entry: &DurationEntry, ctx: &mut FrameContext<'_>) -> bool {
        let tempo = entry.tempo as u32;
        self.calls += 1;
        self.progress += tempo;
        if self.calls % CORRECTION_PERIOD == 0 {
            self.progress += tempo;
        }

        if entry.looping {
            if self.progress < entry.stop_threshold() {
                return false;
            }
            ctx.sound.stop_item(self.current);
            info!("stop {} ({}) after {} units", entry.name, self.current, self.progress);
            true
        } else {
            let done = ctx.sound.query_status(self.current).paused;
            if done {
                info!("{} ({}) ended after {} units", entry.name, self.current, self.progress);
            }
            done
        }
    }

    fn advance(&mut self, ctx: &mut FrameContext<'_>) {
        if self.current < self.last {
            self.current += 1;
            ctx.state.cycle = 0;
        } else {
            info!("playback finished");
            ctx.state.cycle = self.settle + 2;
        }
    }
}

impl Default for PlaybackHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlRoutine for PlaybackHarness {
    fn on_activate(&mut self, ctx: &mut FrameContext<'_>) {
        debug!("harness: items {}..={}, settle {}", self.first, self.last, self.settle);
        if self.table.is_empty() {
            ctx.state.cycle = self.settle + 2;
        }
    }

    fn on_tick(&mut self, ctx: &mut FrameContext<'_>) {
        let cycle = ctx.state.cycle;
        match self.phase_for(cycle) {
            PlaybackPhase::Settling => {
                ctx.state.cycle += 1;
            }
            PlaybackPhase::Starting => {
                if let Some(entry) = self.current_entry() {
                    self.progress = 0;
                    self.calls = 0;
                    ctx.sound.start_item(self.current);
                    info!("start {} ({})", entry.name, self.current);
                }
                ctx.state.cycle += 1;
            }
            PlaybackPhase::Timing => {
                if let Some(entry) = self.current_entry() {
                    if self.time_item(entry, ctx) {
                        self.advance(ctx);
                    }
                }
            }
            PlaybackPhase::Finished => {}
        }
        self.phase = self.phase_for(ctx.state.cycle);
    }

    fn name(&self) -> &'static str {
        "playback-harness"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::{Callback, CallbackChain};
    use crate::frame::FrameState;
    use crate::peripherals::{ItemStatus, SoundEngine};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Engine that reports an item paused after a fixed number of queries.
    #[derive(Default)]
    struct ScriptedEngine {
        pause_after: u32,
        queries: u32,
        log: Vec<String>,
    }

    impl SoundEngine for ScriptedEngine {
        fn start_item(&mut self, id: u16) {
            self.queries = 0;
            self.log.push(format!("start {}", id));
        }
        fn stop_item(&mut self, id: u16) {
            self.log.push(format!("stop {}", id));
        }
        fn query_status(&mut self, _id: u16) -> ItemStatus {
            self.queries += 1;
            ItemStatus { paused: self.queries >= self.pause_after }
        }
    }

    static ONE_SHOT: &[DurationEntry] = &[
        DurationEntry { name: "A", tempo: 1, length: 10, looping: false },
        DurationEntry { name: "B", tempo: 1, length: 10, looping: false },
    ];

    static LOOPING: &[DurationEntry] = &[
        DurationEntry { name: "L", tempo: 3, length: 100, looping: true },
    ];

    struct Rig {
        chain: CallbackChain,
        state: FrameState,
        sound: ScriptedEngine,
        phase: Rc<RefCell<Option<PlaybackPhase>>>,
    }

    /// Forwards to a shared harness so tests can inspect it between frames.
    struct Shared(Rc<RefCell<PlaybackHarness>>, Rc<RefCell<Option<PlaybackPhase>>>);

    impl ControlRoutine for Shared {
        fn on_activate(&mut self, ctx: &mut FrameContext<'_>) {
            self.0.borrow_mut().on_activate(ctx);
        }
        fn on_tick(&mut self, ctx: &mut FrameContext<'_>) {
            let mut h = self.0.borrow_mut();
            h.on_tick(ctx);
            *self.1.borrow_mut() = Some(h.phase());
        }
    }

    fn rig(harness: PlaybackHarness, sound: ScriptedEngine) -> (Rig, Rc<RefCell<PlaybackHarness>>) {
        let shared = Rc::new(RefCell::new(harness));
        let phase = Rc::new(RefCell::new(None));
        let mut state = FrameState::new();
        let mut chain = CallbackChain::new();
        chain.set_main_callback(&mut state, Some(Callback::routine(Shared(shared.clone(), phase.clone()))));
        (Rig { chain, state, sound, phase }, shared)
    }

    impl Rig {
        fn tick(&mut self) {
            self.chain.dispatch(&mut self.state, &mut self.sound);
        }
    }

    #[test]
    fn test_settles_then_starts() {
        let h = PlaybackHarness::with_table(ONE_SHOT).with_settle(5);
        let (mut rig, shared) = rig(h, ScriptedEngine { pause_after: 100, ..Default::default() });
        for _ in 0..4 {
            rig.tick();
            assert_eq!(*rig.phase.borrow(), Some(PlaybackPhase::Settling));
        }
        rig.tick();
        assert_eq!(*rig.phase.borrow(), Some(PlaybackPhase::Starting));
        assert!(rig.sound.log.is_empty());
        rig.tick();
        assert_eq!(rig.sound.log, vec!["start 0"]);
        assert_eq!(shared.borrow().phase(), PlaybackPhase::Timing);
        assert_eq!(rig.state.cycle, 6);
    }

    #[test]
    fn test_non_looping_advances_on_pause_call() {
        let h = PlaybackHarness::with_table(ONE_SHOT).with_settle(3);
        let (mut rig, shared) = rig(h, ScriptedEngine { pause_after: 7, ..Default::default() });
        // settle + start
        for _ in 0..4 {
            rig.tick();
        }
        for call in 1..7 {
            rig.tick();
            assert_eq!(shared.borrow().current_item(), 0, "call {}", call);
        }
        rig.tick();
        assert_eq!(shared.borrow().current_item(), 1);
        assert_eq!(rig.state.cycle, 0);
        // Never stopped explicitly
        assert_eq!(rig.sound.log, vec!["start 0"]);
    }

    #[test]
    fn test_accumulator_rate() {
        let h = PlaybackHarness::with_table(LOOPING).with_settle(0);
        let (mut rig, shared) = rig(h, ScriptedEngine::default());
        rig.tick();
        for _ in 0..60 {
            rig.tick();
        }
        assert_eq!(shared.borrow().progress(), 64 * 3);
    }

    #[test]
    fn test_looping_stops_at_threshold() {
        let h = PlaybackHarness::with_table(LOOPING).with_settle(0);
        let (mut rig, shared) = rig(h, ScriptedEngine::default());
        let threshold = LOOPING[0].stop_threshold();
        assert_eq!(threshold, 100 + 2 * 64 * 3);

        rig.tick();
        loop {
            rig.tick();
            let progress = shared.borrow().progress();
            if rig.sound.log.len() > 1 {
                assert!(progress >= threshold);
                break;
            }
            assert!(progress < threshold);
        }
        assert_eq!(rig.sound.log, vec!["start 0", "stop 0"]);
        assert_eq!(shared.borrow().phase(), PlaybackPhase::Finished);
    }

    #[test]
    fn test_finishes_and_freezes() {
        let h = PlaybackHarness::with_table(ONE_SHOT).with_settle(1);
        let (mut rig, shared) = rig(h, ScriptedEngine { pause_after: 1, ..Default::default() });
        for _ in 0..20 {
            rig.tick();
        }
        assert_eq!(shared.borrow().phase(), PlaybackPhase::Finished);
        assert_eq!(shared.borrow().current_item(), 1);
        assert_eq!(rig.state.cycle, 3);
        assert_eq!(rig.sound.log, vec!["start 0", "start 1"]);
    }

    #[test]
    fn test_range_is_clamped() {
        let h = PlaybackHarness::with_table(ONE_SHOT).with_range(5, 9);
        assert_eq!(h.current_item(), 1);
        let h = PlaybackHarness::new().with_range(3, 4);
        assert_eq!(h.current_item(), 3);
        assert_eq!(h.current_entry().map(|e| e.name), Some(DURATIONS[3].name));
    }

    #[test]
    fn test_huge_settle_is_clamped() {
        let h = PlaybackHarness::with_table(ONE_SHOT).with_settle(u32::MAX);
        let (mut rig, shared) = rig(h, ScriptedEngine { pause_after: 1, ..Default::default() });
        rig.state.cycle = MAX_SETTLE;
        rig.tick();
        assert_eq!(rig.sound.log, vec!["start 0"]);
        assert_eq!(shared.borrow().phase(), PlaybackPhase::Timing);
        rig.tick();
        rig.state.cycle = MAX_SETTLE;
        rig.tick();
        rig.tick();
        assert_eq!(rig.state.cycle, u32::MAX);
        assert_eq!(shared.borrow().phase(), PlaybackPhase::Finished);
    }

    #[test]
    fn test_shipped_table_shape() {
        assert!(DURATIONS.len() > crate::durations::FIRST_SOUND_EFFECT as usize);
        assert!(DURATIONS.iter().all(|e| e.tempo == 1));

        let looping_effects: Vec<&str> = DURATIONS[crate::durations::FIRST_SOUND_EFFECT as usize..]
            .iter()
            .filter(|e| e.looping)
            .map(|e| e.name)
            .collect();
        assert_eq!(
            looping_effects,
            vec![
                "SE_BERRY_BLENDER",
                "SE_DOWNPOUR",
                "SE_LOW_HEALTH",
                "SE_M_GUST",
                "SE_RAIN",
                "SE_TAILLOW_WING_FLAP",
                "SE_THUNDERSTORM",
                "SE_TRUCK_MOVE",
                "SE_M_BLIZZARD",
            ]
        );
        assert!(DURATIONS[..crate::durations::FIRST_SOUND_EFFECT as usize]
            .iter()
            .all(|e| e.name.starts_with("MUS_")));
    }
}
