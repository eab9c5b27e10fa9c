//! Play time accounting.
//!
//! Counts frames into seconds, minutes and hours. Once hours would pass 999
//! the clock pins at 999:59:59 (frame 59) and stays there.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::frame::FrameState;
use crate::peripherals::FrameTask;
use crate::FRAME_RATE;

pub const MAX_HOURS: u16 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayTimeState {
    #[default]
    Stopped,
    Running,
    /// Saturated; no longer counts
    Maxed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayTime {
    pub hours: u16,
    pub minutes: u8,
    pub seconds: u8,
    pub frames: u8,
    pub state: PlayTimeState,
}

impl PlayTime {
    fn set_to_max(&mut self) {
        self.hours = MAX_HOURS;
        self.minutes = 59;
        self.seconds = 59;
        self.frames = (FRAME_RATE - 1) as u8;
        self.state = PlayTimeState::Maxed;
    }

    fn tick(&mut self) {
        if self.state != PlayTimeState::Running {
            return;
        }
        self.frames += 1;
        if (self.frames as u32) < FRAME_RATE {
            return;
        }
        self.frames = 0;
        self.seconds += 1;
        if self.seconds < 60 {
            return;
        }
        self.seconds = 0;
        self.minutes += 1;
        if self.minutes < 60 {
            return;
        }
        self.minutes = 0;
        self.hours += 1;
        if self.hours > MAX_HOURS {
            self.set_to_max();
        }
    }
}

impl std::fmt::Display for PlayTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Frame task handle. Clones share one clock, so the scheduler can own one
/// copy while the application reads another.
#[derive(Debug, Clone, Default)]
pub struct PlayTimeCounter {
    time: Rc<Cell<PlayTime>>,
}

impl PlayTimeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero the clock and stop it.
    pub fn reset(&self) {
        self.time.set(PlayTime::default());
    }

    pub fn start(&self) {
        let mut t = self.time.get();
        t.state = PlayTimeState::Running;
        if t.hours > MAX_HOURS {
            t.set_to_max();
        }
        self.time.set(t);
    }

    pub fn stop(&self) {
        let mut t = self.time.get();
        t.state = PlayTimeState::Stopped;
        self.time.set(t);
    }

    pub fn get(&self) -> PlayTime {
        self.time.get()
    }

    /// Restore a previously saved clock.
    pub fn set(&self, time: PlayTime) {
        self.time.set(time);
    }
}

impl FrameTask for PlayTimeCounter {
    fn run(&mut self, _state: &FrameState) {
        let mut t = self.time.get();
        t.tick();
        self.time.set(t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(counter: &mut PlayTimeCounter, frames: u32) {
        let state = FrameState::new();
        for _ in 0..frames {
            counter.run(&state);
        }
    }

    #[test]
    fn test_stopped_does_not_count() {
        let mut c = PlayTimeCounter::new();
        run(&mut c, 500);
        assert_eq!(c.get(), PlayTime::default());
    }

    #[test]
    fn test_rollover() {
        let mut c = PlayTimeCounter::new();
        c.start();
        run(&mut c, 60 * 61 + 5);
        let t = c.get();
        assert_eq!((t.hours, t.minutes, t.seconds, t.frames), (0, 1, 1, 5));
        assert_eq!(t.to_string(), "0:01:01");
    }

    #[test]
    fn test_saturates_at_max() {
        let mut c = PlayTimeCounter::new();
        c.set(PlayTime {
            hours: 999,
            minutes: 59,
            seconds: 59,
            frames: 58,
            state: PlayTimeState::Running,
        });
        run(&mut c, 1);
        assert_eq!(c.get().state, PlayTimeState::Running);
        run(&mut c, 1);
        let t = c.get();
        assert_eq!(t.state, PlayTimeState::Maxed);
        assert_eq!((t.hours, t.minutes, t.seconds, t.frames), (999, 59, 59, 59));

        run(&mut c, 10_000);
        assert_eq!(c.get(), t);
    }

    #[test]
    fn test_clones_share_clock() {
        let c = PlayTimeCounter::new();
        let mut task = c.clone();
        c.start();
        run(&mut task, 120);
        assert_eq!(c.get().seconds, 2);
        c.stop();
        run(&mut task, 120);
        assert_eq!(c.get().seconds, 2);
    }
}
