//! Tone-based sound engine.
//!
//! Each audio item plays as a sine tone for its table length (looping items
//! hold until stopped). Without an output device the engine still keeps
//! time on the vblank-driven sound clock, so the harness behaves the same
//! muted and headless.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use framecore::durations::DURATIONS;
use framecore::peripherals::{ItemStatus, SoundEngine};
use log::{debug, warn};
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};

/// Tone amplitude (0.0-1.0)
const AUDIO_VOLUME: f32 = 0.15;

/// Vblank count shared between the board (writer) and the engine.
pub type SoundClock = Rc<Cell<u32>>;

struct Voice {
    sink: Option<Sink>,
    started_at: u32,
    length: u32,
    tempo: u16,
    looping: bool,
}

pub struct ToneSound {
    output: Option<(OutputStream, OutputStreamHandle)>,
    clock: SoundClock,
    voices: HashMap<u16, Voice>,
}

impl ToneSound {
    pub fn new(clock: SoundClock, muted: bool) -> Self {
        let output = if muted {
            None
        } else {
            match OutputStream::try_default() {
                Ok(pair) => Some(pair),
                Err(e) => {
                    warn!("audio device: {}", e);
                    None
                }
            }
        };
        ToneSound { output, clock, voices: HashMap::new() }
    }

    pub fn is_muted(&self) -> bool {
        self.output.is_none()
    }

    /// Silence everything (reset path).
    pub fn stop_all(&mut self) {
        for (_, voice) in self.voices.drain() {
            if let Some(sink) = voice.sink {
                sink.stop();
            }
        }
    }

    fn tone_for(id: u16) -> f32 {
        // Two octaves up from A3, one semitone per item
        220.0 * 2f32.powf((id % 24) as f32 / 12.0)
    }

    fn open_sink(&self, id: u16, length: u32, tempo: u16, looping: bool) -> Option<Sink> {
        let (_, handle) = self.output.as_ref()?;
        let sink = match Sink::try_new(handle) {
            Ok(sink) => sink,
            Err(e) => {
                warn!("audio sink: {}", e);
                return None;
            }
        };
        let tone = SineWave::new(Self::tone_for(id)).amplify(AUDIO_VOLUME);
        if looping {
            sink.append(tone);
        } else {
            let secs = length as f64 / (64.0 * tempo.max(1) as f64);
            sink.append(tone.take_duration(Duration::from_secs_f64(secs.max(0.05))));
        }
        Some(sink)
    }
}

impl SoundEngine for ToneSound {
    fn start_item(&mut self, id: u16) {
        let Some(entry) = DURATIONS.get(id as usize) else {
            warn!("unknown audio item {}", id);
            return;
        };
        self.stop_item(id);
        let sink = self.open_sink(id, entry.length, entry.tempo, entry.looping);
        debug!("tone {} for {}", Self::tone_for(id), entry.name);
        self.voices.insert(id, Voice {
            sink,
            started_at: self.clock.get(),
            length: entry.length,
            tempo: entry.tempo,
            looping: entry.looping,
        });
    }

    fn stop_item(&mut self, id: u16) {
        if let Some(voice) = self.voices.remove(&id) {
            if let Some(sink) = voice.sink {
                sink.stop();
            }
        }
    }

    fn query_status(&mut self, id: u16) -> ItemStatus {
        let Some(voice) = self.voices.get(&id) else {
            return ItemStatus { paused: true };
        };
        if voice.looping {
            return ItemStatus { paused: false };
        }
        let paused = match &voice.sink {
            Some(sink) => sink.empty(),
            None => {
                let frames = self.clock.get().wrapping_sub(voice.started_at) as u64;
                frames * 64 * voice.tempo as u64 / framecore::FRAME_RATE as u64 >= voice.length as u64
            }
        };
        ItemStatus { paused }
    }
}
