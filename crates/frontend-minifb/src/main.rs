//! framecore desktop board.
//!
//! Runs the frame scheduler with the audio playback harness as its main
//! routine.
//!
//! - **Window mode** (default): 60 Hz pulse paced by the window, keyboard and
//!   gamepad input, tone output, held-key display.
//! - **Headless mode** (`--headless`): unpaced pulse for automated runs;
//!   `--press N` taps A on frame N.
//!
//! Key input can be captured with `--record` and played back with
//! `--replay`; a replay also restores the configuration it was recorded
//! with. Holding A+B+START+SELECT soft-resets and reboots the core.

mod board;
mod sound;

use std::error::Error;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use framecore::config::ButtonMode;
use framecore::peripherals::{InputPort, OfflineLink};
use framecore::playtime::PlayTimeCounter;
use framecore::recording::{InputRecording, ReplayInput};
use framecore::{Callback, CoreConfig, FrameOutcome, FrameScheduler, PlaybackHarness, RepeatTimingConfig};
use log::{debug, info};

use board::{Display, HostBoard, LiveKeys, LivePort, PressScript};
use sound::{SoundClock, ToneSound};

const TITLE: &str = "framecore-sim";

/// Frames run in headless mode when `--frames` is not given
const DEFAULT_HEADLESS_FRAMES: u64 = 600;

/// Longest `--settle` accepted
const MAX_SETTLE_FRAMES: i64 = 60 * 60 * 60;

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ButtonModeArg {
    Normal,
    Lr,
    LEqualsA,
}

impl From<ButtonModeArg> for ButtonMode {
    fn from(arg: ButtonModeArg) -> Self {
        match arg {
            ButtonModeArg::Normal => ButtonMode::Normal,
            ButtonModeArg::Lr => ButtonMode::LR,
            ButtonModeArg::LEqualsA => ButtonMode::LEqualsA,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "framecore-sim", about = "Run the frame-loop core on a desktop board.")]
struct Args {
    /// Run without a window and without pacing.
    #[arg(long)]
    headless: bool,

    /// Stop after N frames (headless default 600, window default unlimited).
    #[arg(long)]
    frames: Option<u64>,

    /// Disable audio output.
    #[arg(long)]
    mute: bool,

    /// Debug-level logging.
    #[arg(long)]
    debug: bool,

    /// Tap A on frame N (headless, repeatable).
    #[arg(long)]
    press: Vec<u64>,

    /// First audio item to play.
    #[arg(long, default_value_t = 0)]
    first: u16,

    /// Last audio item to play (default: end of table).
    #[arg(long)]
    last: Option<u16>,

    /// Frames to wait before each item (at most one hour).
    #[arg(
        long,
        default_value_t = framecore::harness::SETTLE_FRAMES,
        value_parser = clap::value_parser!(u32).range(0..=MAX_SETTLE_FRAMES)
    )]
    settle: u32,

    #[arg(long, value_enum, default_value_t = ButtonModeArg::Normal)]
    button_mode: ButtonModeArg,

    /// Ignore the A+B+START+SELECT reset combination.
    #[arg(long)]
    no_soft_reset: bool,

    /// Frames before the first key repeat.
    #[arg(long, default_value_t = 40)]
    repeat_start: u16,

    /// Frames between key repeats.
    #[arg(long, default_value_t = 5)]
    repeat_continue: u16,

    /// Save the key input to this file on exit.
    #[arg(long, value_name = "PATH")]
    record: Option<PathBuf>,

    /// Play key input back from a recording.
    #[arg(long, value_name = "PATH")]
    replay: Option<PathBuf>,
}

impl Args {
    fn core_config(&self) -> CoreConfig {
        CoreConfig {
            repeat: RepeatTimingConfig {
                start_delay: self.repeat_start,
                continue_delay: self.repeat_continue,
            },
            button_mode: self.button_mode.into(),
            soft_reset_enabled: !self.no_soft_reset,
            ..CoreConfig::default()
        }
    }
}

type Sim = FrameScheduler<HostBoard, OfflineLink, ToneSound>;

/// Everything that survives a soft reset.
struct Session {
    config: CoreConfig,
    first: u16,
    last: u16,
    settle: u32,
    playtime: PlayTimeCounter,
    pulses: Arc<AtomicU32>,
}

impl Session {
    fn boot(&self, board: HostBoard, link: OfflineLink, sound: ToneSound) -> Sim {
        let mut sim = FrameScheduler::new(self.config, board, link, sound);
        self.playtime.reset();
        self.playtime.start();
        sim.add_frame_task(Box::new(self.playtime.clone()));
        sim.set_vblank_counter1(self.pulses.clone());

        let harness = PlaybackHarness::new()
            .with_range(self.first, self.last)
            .with_settle(self.settle);
        sim.set_main_callback(Some(Callback::routine(harness)));
        sim
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let replay = match &args.replay {
        Some(path) => Some(InputRecording::load_from_file(path)?),
        None => None,
    };
    let config = match &replay {
        Some(rec) => {
            info!("replaying {} frames, recorded config {:?}", rec.len(), rec.config);
            rec.config
        }
        None => args.core_config(),
    };

    let clock = SoundClock::default();
    let live = LiveKeys::default();
    let input: Box<dyn InputPort> = match replay {
        Some(rec) => Box::new(ReplayInput::new(rec)),
        None if args.headless => Box::new(PressScript::new(args.press.clone())),
        None => Box::new(LivePort::new(live.clone())),
    };
    let display = if args.headless { None } else { Some(Display::open(TITLE, live)?) };

    let board = HostBoard::new(input, config, display, clock.clone());
    let sound = ToneSound::new(clock, args.mute || args.headless);

    let session = Session {
        config,
        first: args.first,
        last: args.last.unwrap_or(u16::MAX),
        settle: args.settle,
        playtime: PlayTimeCounter::new(),
        pulses: Arc::new(AtomicU32::new(0)),
    };
    let sim = session.boot(board, OfflineLink, sound);

    let max_frames = args.frames.or(if args.headless { Some(DEFAULT_HEADLESS_FRAMES) } else { None });
    let sim = run(sim, &session, max_frames);

    if let Some(path) = &args.record {
        let recording = sim.hardware().recording();
        recording.save_to_file(path)?;
        info!("recorded {} frames to {}", recording.len(), path.display());
    }
    Ok(())
}

fn run(mut sim: Sim, session: &Session, max_frames: Option<u64>) -> Sim {
    let start = Instant::now();
    let mut last_title = Instant::now();
    let mut frames: u64 = 0;
    let mut title_frames: u64 = 0;

    loop {
        if let FrameOutcome::Reset(reset) = sim.run_frame() {
            info!("rebooting after soft reset at frame {}", reset.frame);
            let (board, link, mut sound) = sim.into_parts();
            sound.stop_all();
            sim = session.boot(board, link, sound);
        }
        frames += 1;
        title_frames += 1;

        let held = sim.state().held_keys;
        let pulses = session.pulses.load(Ordering::Relaxed);
        sim.hardware_mut().draw(held, pulses);

        if frames % 60 == 0 {
            debug!("frame {}: {:?} gate={:?}", frames, sim.state(), sim.last_gate());
        }

        if last_title.elapsed() >= Duration::from_secs(2) {
            let fps = title_frames as f64 / last_title.elapsed().as_secs_f64();
            let muted = if sim.sound().is_muted() { " [MUTE]" } else { "" };
            let title = format!("{} - {:.0} FPS - {}{}", TITLE, fps, session.playtime.get(), muted);
            sim.hardware_mut().set_title(&title);
            title_frames = 0;
            last_title = Instant::now();
        }

        if max_frames.map_or(false, |m| frames >= m) || !sim.hardware().is_open() {
            break;
        }
    }

    let elapsed = start.elapsed().as_secs_f64();
    info!(
        "{} frames in {:.1}s ({:.1} FPS), {} resets, play time {}, {} pulse polls",
        frames,
        elapsed,
        frames as f64 / elapsed.max(f64::EPSILON),
        sim.hardware().resets(),
        session.playtime.get(),
        sim.dbg_polls,
    );
    sim
}
