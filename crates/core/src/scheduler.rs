//! The outermost frame loop.
//!
//! One [`FrameScheduler::run_frame`] call is one frame:
//!
//! 1. Sample the key port
//! 2. Check the soft-reset combination (terminal)
//! 3. Link gate: one or two callback dispatch rounds
//! 4. Frame tasks (play time etc.)
//! 5. Wait for the vblank pulse, servicing interrupts meanwhile
//!
//! Interrupt handlers only ever run inside step 5.

use log::{debug, info};

use crate::callback::{Callback, CallbackChain};
use crate::config::CoreConfig;
use crate::frame::FrameState;
use crate::input::InputSampler;
use crate::interrupt::{flags, InterruptDispatcher};
use crate::link::{GateReport, LinkGate};
use crate::peripherals::{FrameTask, Hardware, ModalOverlay, PeerLink, ResetScope, SoundEngine};
use crate::watchdog;

/// Record of a soft reset taken by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftReset {
    /// Frame during which the combination was seen
    pub frame: u64,
    pub scope: ResetScope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// The board has been asked to reboot; the loop must not continue
    Reset(SoftReset),
}

pub struct FrameScheduler<H: Hardware, L: PeerLink, S: SoundEngine> {
    state: FrameState,
    dispatcher: InterruptDispatcher,
    sampler: InputSampler,
    gate: LinkGate,
    chain: CallbackChain,
    tasks: Vec<Box<dyn FrameTask>>,
    config: CoreConfig,
    hw: H,
    link: L,
    sound: S,
    last_gate: GateReport,
    /// Pulse-source polls since boot
    pub dbg_polls: u64,
}

impl<H: Hardware, L: PeerLink, S: SoundEngine> FrameScheduler<H, L, S> {
    /// Boot: reset keys and counters, bring up the interrupt table and apply
    /// the configuration.
    pub fn new(config: CoreConfig, hw: H, link: L, sound: S) -> Self {
        let mut state = FrameState::new();
        let sampler = InputSampler::new(config.repeat);
        sampler.reset(&mut state);

        let mut dispatcher = InterruptDispatcher::new();
        dispatcher.initialize(&mut state);
        dispatcher.enable_vcount_at_line(config.vcount_line);

        state.vblank_counter2 = 0;
        state.disable_vblank_counter1();
        state.soft_reset_disabled = !config.soft_reset_enabled;
        state.button_mode = config.button_mode;
        state.link_transferring = false;

        debug!("boot: {:?}", config);

        FrameScheduler {
            state,
            dispatcher,
            sampler,
            gate: LinkGate::new(),
            chain: CallbackChain::new(),
            tasks: Vec::new(),
            config,
            hw,
            link,
            sound,
            last_gate: GateReport::default(),
            dbg_polls: 0,
        }
    }

    /// Run one frame.
    pub fn run_frame(&mut self) -> FrameOutcome {
        self.sampler.sample(&mut self.state, &mut self.hw);

        if watchdog::should_reset(&self.state) {
            return FrameOutcome::Reset(self.soft_reset());
        }

        let chain = &mut self.chain;
        let sound = &mut self.sound;
        self.last_gate = self.gate.run(&mut self.state, &mut self.link, |state| {
            chain.dispatch(state, &mut *sound);
        });

        for task in self.tasks.iter_mut() {
            task.run(&self.state);
        }

        self.wait_for_pulse();
        self.state.frame_count += 1;
        FrameOutcome::Continue
    }

    /// Run frames until the soft-reset path is taken.
    pub fn run_forever(&mut self) -> SoftReset {
        loop {
            if let FrameOutcome::Reset(reset) = self.run_frame() {
                return reset;
            }
        }
    }

    /// Busy-wait for the next vblank pulse. Any interrupt raised meanwhile is
    /// serviced in table order; the vblank handler ends the wait by setting
    /// its bit in `intr_check`.
    pub fn wait_for_pulse(&mut self) {
        self.state.intr_check &= !flags::VBLANK;
        while self.state.intr_check & flags::VBLANK == 0 {
            self.dbg_polls += 1;
            let requests = self.hw.take_interrupt_requests();
            if requests != 0 {
                self.dispatcher.service(requests, &mut self.state, &mut self.hw);
            }
        }
    }

    fn soft_reset(&mut self) -> SoftReset {
        info!("soft reset requested at frame {}", self.state.frame_count);
        self.link.request_stop();
        self.link.wait_stop_complete();
        self.dispatcher.set_master_enable(false);
        self.hw.stop_background_activity();

        let scope = ResetScope::ALL.without(ResetScope::SIO_REGS);
        self.hw.soft_reset(scope);
        SoftReset { frame: self.state.frame_count, scope }
    }

    /// Replace the main routine and zero the cycle counter.
    pub fn set_main_callback(&mut self, cb: Option<Callback>) {
        self.chain.set_main_callback(&mut self.state, cb);
    }

    pub fn set_pre_hook(&mut self, cb: Option<Callback>) {
        self.chain.set_pre_hook(cb);
    }

    pub fn add_overlay(&mut self, overlay: Box<dyn ModalOverlay>) {
        self.chain.add_overlay(overlay);
    }

    pub fn add_frame_task(&mut self, task: Box<dyn FrameTask>) {
        self.tasks.push(task);
    }

    pub fn set_vblank_counter1(&mut self, counter: std::sync::Arc<std::sync::atomic::AtomicU32>) {
        self.state.set_vblank_counter1(counter);
    }

    pub fn disable_vblank_counter1(&mut self) {
        self.state.disable_vblank_counter1();
    }

    // ---- Accessors ----

    pub fn state(&self) -> &FrameState { &self.state }
    pub fn state_mut(&mut self) -> &mut FrameState { &mut self.state }
    pub fn config(&self) -> &CoreConfig { &self.config }
    pub fn dispatcher(&self) -> &InterruptDispatcher { &self.dispatcher }
    pub fn dispatcher_mut(&mut self) -> &mut InterruptDispatcher { &mut self.dispatcher }
    pub fn chain(&self) -> &CallbackChain { &self.chain }
    pub fn last_gate(&self) -> GateReport { self.last_gate }
    pub fn hardware(&self) -> &H { &self.hw }
    pub fn hardware_mut(&mut self) -> &mut H { &mut self.hw }
    pub fn link_mut(&mut self) -> &mut L { &mut self.link }
    pub fn sound(&self) -> &S { &self.sound }
    pub fn sound_mut(&mut self) -> &mut S { &mut self.sound }

    /// Tear down and hand the collaborators back (hosted reboot).
    pub fn into_parts(self) -> (H, L, S) {
        (self.hw, self.link, self.sound)
    }
}
