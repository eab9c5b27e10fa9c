//! Hosted board: key input, vblank pulse and reset line.
//!
//! In window mode the pulse is paced by the window's 60 FPS target: every
//! pulse presents the frame buffer, polls keyboard and gamepad, and raises
//! VCount followed by VBlank. Headless mode raises both on every poll.

use std::cell::Cell;
use std::rc::Rc;

use framecore::interrupt::flags;
use framecore::peripherals::{InputPort, InterruptServices, PulseSource, ResetScope, SystemReset};
use framecore::recording::{InputRecorder, InputRecording};
use framecore::{Button, CoreConfig, KEYS_MASK};
use gilrs::{Axis, Button as GilrsButton, Event as GilrsEvent, EventType, Gilrs};
use log::{debug, info, warn};
use minifb::{Key, Scale, ScaleMode, Window, WindowOptions};

use crate::sound::SoundClock;

pub const SCREEN_WIDTH: usize = 240;
pub const SCREEN_HEIGHT: usize = 160;

/// Analog stick deadzone
const STICK_DEADZONE: f32 = 0.3;
/// Analog trigger deadzone
const TRIGGER_DEADZONE: f32 = 0.2;

const COLOR_BG: u32 = 0x0010_1820;
const COLOR_KEY_UP: u32 = 0x0030_3840;
const COLOR_KEY_DOWN: u32 = 0x00F0_C040;
const COLOR_PULSE: u32 = 0x0040_A0F0;

// ─── Live input ─────────────────────────────────────────────────────────────

/// Held-key mask (active high) shared between the window poller and the
/// key port it feeds.
pub type LiveKeys = Rc<Cell<u16>>;

pub struct LivePort {
    keys: LiveKeys,
}

impl LivePort {
    pub fn new(keys: LiveKeys) -> Self {
        LivePort { keys }
    }
}

impl InputPort for LivePort {
    fn read_key_input(&mut self) -> u16 {
        KEYS_MASK & !self.keys.get()
    }
}

/// Headless input: taps A for a few frames at each requested frame.
pub struct PressScript {
    frame: u64,
    press_at: Vec<u64>,
}

impl PressScript {
    const HOLD_FRAMES: u64 = 5;

    pub fn new(press_at: Vec<u64>) -> Self {
        PressScript { frame: 0, press_at }
    }
}

impl InputPort for PressScript {
    fn read_key_input(&mut self) -> u16 {
        let f = self.frame;
        self.frame += 1;
        let pressed = self.press_at.iter().any(|&p| f >= p && f < p + Self::HOLD_FRAMES);
        if pressed {
            debug!("frame {}: A pressed", f);
            KEYS_MASK & !Button::A.mask()
        } else {
            KEYS_MASK
        }
    }
}

// ─── Gamepad ────────────────────────────────────────────────────────────────

#[derive(Default)]
struct GamepadState {
    up: bool, down: bool, left: bool, right: bool,
    a: bool, b: bool, start: bool, select: bool, l: bool, r: bool,
    left_stick_x: f32, left_stick_y: f32,
}

impl GamepadState {
    fn held_mask(&self) -> u16 {
        let pairs = [
            (self.up || self.left_stick_y < -STICK_DEADZONE, Button::Up),
            (self.down || self.left_stick_y > STICK_DEADZONE, Button::Down),
            (self.left || self.left_stick_x < -STICK_DEADZONE, Button::Left),
            (self.right || self.left_stick_x > STICK_DEADZONE, Button::Right),
            (self.a, Button::A),
            (self.b, Button::B),
            (self.start, Button::Start),
            (self.select, Button::Select),
            (self.l, Button::L),
            (self.r, Button::R),
        ];
        pairs.iter().filter(|(on, _)| *on).fold(0, |acc, (_, b)| acc | b.mask())
    }
}

fn init_gamepad() -> Option<Gilrs> {
    match Gilrs::new() {
        Ok(gilrs) => {
            let mut found = false;
            for (id, gp) in gilrs.gamepads() {
                info!("gamepad [{}] \"{}\" ({})", id, gp.name(), gp.os_name());
                found = true;
            }
            if !found {
                debug!("no gamepad (hot-plug supported)");
            }
            Some(gilrs)
        }
        Err(e) => {
            warn!("gamepad: {}", e);
            None
        }
    }
}

fn poll_gamepad(gilrs: &mut Gilrs, state: &mut GamepadState) {
    while let Some(GilrsEvent { event, .. }) = gilrs.next_event() {
        match event {
            EventType::ButtonPressed(b, _) => apply_button(state, b, true),
            EventType::ButtonReleased(b, _) => apply_button(state, b, false),
            EventType::AxisChanged(a, v, _) => apply_axis(state, a, v),
            EventType::Connected => debug!("gamepad connected"),
            EventType::Disconnected => {
                debug!("gamepad disconnected");
                *state = GamepadState::default();
            }
            _ => {}
        }
    }
}

fn apply_button(state: &mut GamepadState, btn: GilrsButton, pressed: bool) {
    match btn {
        GilrsButton::DPadUp    => state.up    = pressed,
        GilrsButton::DPadDown  => state.down  = pressed,
        GilrsButton::DPadLeft  => state.left  = pressed,
        GilrsButton::DPadRight => state.right = pressed,
        GilrsButton::South | GilrsButton::West => state.a = pressed,
        GilrsButton::East | GilrsButton::North => state.b = pressed,
        GilrsButton::Start     => state.start = pressed,
        GilrsButton::Select    => state.select = pressed,
        GilrsButton::LeftTrigger | GilrsButton::LeftTrigger2   => state.l = pressed,
        GilrsButton::RightTrigger | GilrsButton::RightTrigger2 => state.r = pressed,
        _ => {}
    }
}

fn apply_axis(state: &mut GamepadState, axis: Axis, value: f32) {
    match axis {
        Axis::LeftStickX => state.left_stick_x = value,
        Axis::LeftStickY => state.left_stick_y = value,
        Axis::DPadX => { state.left = value < -STICK_DEADZONE; state.right = value > STICK_DEADZONE; }
        Axis::DPadY => { state.up = value < -STICK_DEADZONE; state.down = value > STICK_DEADZONE; }
        Axis::LeftZ => {
            if value > TRIGGER_DEADZONE { state.l = true; } else if value < 0.05 { state.l = false; }
        }
        Axis::RightZ => {
            if value > TRIGGER_DEADZONE { state.r = true; } else if value < 0.05 { state.r = false; }
        }
        _ => {}
    }
}

// ─── Window ─────────────────────────────────────────────────────────────────

/// Arrows=D-pad Z=A X=B Enter=Start Backspace=Select A=L S=R
fn keyboard_mask(window: &Window) -> u16 {
    let map = [
        (Key::Up, Button::Up),
        (Key::Down, Button::Down),
        (Key::Left, Button::Left),
        (Key::Right, Button::Right),
        (Key::Z, Button::A),
        (Key::X, Button::B),
        (Key::Enter, Button::Start),
        (Key::Backspace, Button::Select),
        (Key::A, Button::L),
        (Key::S, Button::R),
    ];
    map.iter()
        .filter(|(k, _)| window.is_key_down(*k))
        .fold(0, |acc, (_, b)| acc | b.mask())
}

pub struct Display {
    window: Window,
    gilrs: Option<Gilrs>,
    gamepad: GamepadState,
    buffer: Vec<u32>,
    live: LiveKeys,
}

impl Display {
    pub fn open(title: &str, live: LiveKeys) -> Result<Self, String> {
        let mut window = Window::new(
            title, SCREEN_WIDTH, SCREEN_HEIGHT,
            WindowOptions {
                scale: Scale::X2,
                scale_mode: ScaleMode::AspectRatioStretch,
                resize: true,
                ..Default::default()
            },
        ).map_err(|e| format!("window: {}", e))?;
        window.set_target_fps(framecore::FRAME_RATE as usize);
        Ok(Display {
            window,
            gilrs: init_gamepad(),
            gamepad: GamepadState::default(),
            buffer: vec![COLOR_BG; SCREEN_WIDTH * SCREEN_HEIGHT],
            live,
        })
    }

    fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    /// Present the buffer (blocks until the next 60 Hz slot) and latch input.
    fn present(&mut self) {
        if let Err(e) = self.window.update_with_buffer(&self.buffer, SCREEN_WIDTH, SCREEN_HEIGHT) {
            warn!("window update: {}", e);
        }
        if let Some(g) = self.gilrs.as_mut() {
            poll_gamepad(g, &mut self.gamepad);
        }
        self.live.set(keyboard_mask(&self.window) | self.gamepad.held_mask());
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(SCREEN_HEIGHT) {
            let start = row * SCREEN_WIDTH + x.min(SCREEN_WIDTH);
            let end = row * SCREEN_WIDTH + (x + w).min(SCREEN_WIDTH);
            self.buffer[start..end].fill(color);
        }
    }

    /// One box per button, lit while held, and a strip that blinks with the
    /// pulse counter.
    fn draw(&mut self, held: u16, pulses: u32) {
        self.buffer.fill(COLOR_BG);
        for (i, b) in Button::ALL.iter().enumerate() {
            let color = if held & b.mask() != 0 { COLOR_KEY_DOWN } else { COLOR_KEY_UP };
            self.fill_rect(12 + i * 22, 60, 18, 18, color);
        }
        let pulse_w = (pulses % 60) as usize * SCREEN_WIDTH / 60;
        self.fill_rect(0, SCREEN_HEIGHT - 6, pulse_w, 6, COLOR_PULSE);
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }
}

// ─── Board ──────────────────────────────────────────────────────────────────

pub struct HostBoard {
    input: InputRecorder<Box<dyn InputPort>>,
    display: Option<Display>,
    clock: SoundClock,
    resets: u32,
}

impl HostBoard {
    pub fn new(input: Box<dyn InputPort>, config: CoreConfig, display: Option<Display>, clock: SoundClock) -> Self {
        HostBoard {
            input: InputRecorder::new(input, config),
            display,
            clock,
            resets: 0,
        }
    }

    /// False once the window has been closed.
    pub fn is_open(&self) -> bool {
        self.display.as_ref().map_or(true, |d| d.is_open())
    }

    pub fn draw(&mut self, held: u16, pulses: u32) {
        if let Some(d) = self.display.as_mut() {
            d.draw(held, pulses);
        }
    }

    pub fn set_title(&mut self, title: &str) {
        if let Some(d) = self.display.as_mut() {
            d.set_title(title);
        }
    }

    pub fn resets(&self) -> u32 {
        self.resets
    }

    pub fn recording(&self) -> &InputRecording {
        self.input.recording()
    }
}

impl InputPort for HostBoard {
    fn read_key_input(&mut self) -> u16 {
        self.input.read_key_input()
    }
}

impl PulseSource for HostBoard {
    fn take_interrupt_requests(&mut self) -> u16 {
        if let Some(d) = self.display.as_mut() {
            if d.is_open() {
                d.present();
            }
        }
        flags::VCOUNT | flags::VBLANK
    }
}

impl InterruptServices for HostBoard {
    fn sound_main(&mut self) {
        self.clock.set(self.clock.get().wrapping_add(1));
    }
}

impl SystemReset for HostBoard {
    fn stop_background_activity(&mut self) {
        debug!("board: background activity stopped");
    }

    fn soft_reset(&mut self, scope: ResetScope) {
        self.resets += 1;
        info!("board: soft reset #{} (scope {:#04X})", self.resets, scope.bits());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_script_taps_a() {
        let mut port = PressScript::new(vec![2]);
        let values: Vec<u16> = (0..8).map(|_| port.read_key_input()).collect();
        let a = Button::A.mask();
        assert_eq!(values[1], KEYS_MASK);
        assert!((2..7).all(|i| values[i] == KEYS_MASK & !a));
        assert_eq!(values[7], KEYS_MASK);
    }

    #[test]
    fn test_gamepad_mask() {
        let mut gp = GamepadState::default();
        apply_button(&mut gp, GilrsButton::South, true);
        apply_button(&mut gp, GilrsButton::Start, true);
        apply_axis(&mut gp, Axis::LeftStickX, -0.9);
        assert_eq!(gp.held_mask(), Button::A.mask() | Button::Start.mask() | Button::Left.mask());
    }

    #[test]
    fn test_headless_board_records_and_pulses() {
        let clock = SoundClock::default();
        let mut board = HostBoard::new(Box::new(PressScript::new(vec![0])), CoreConfig::default(), None, clock.clone());
        board.read_key_input();
        assert_eq!(board.take_interrupt_requests(), flags::VCOUNT | flags::VBLANK);
        board.sound_main();
        assert_eq!(clock.get(), 1);
        assert_eq!(board.recording().frames, vec![KEYS_MASK & !Button::A.mask()]);
        assert!(board.is_open());
    }
}
