//! Interrupt dispatch table.
//!
//! The table has one slot per hardware source, in the priority order the
//! low-level dispatcher scans them. Mutation happens on a staged copy;
//! [`InterruptDispatcher::publish`] copies it to the table the hardware
//! actually vectors through, so a half-edited table is never live.
//!
//! Interrupt sources (IF/IE bit layout):
//! - Bit 0: VBlank (the frame pulse)
//! - Bit 1: HBlank
//! - Bit 2: VCount (line compare)
//! - Bits 3-6: Timer 0-3
//! - Bit 7: Serial (peer link)
//! - Bits 8-11: DMA 0-3
//! - Bit 12: Keypad
//! - Bit 13: Game Pak

use log::debug;

use crate::frame::FrameState;
use crate::peripherals::InterruptServices;

/// Interrupt flag bit masks
pub mod flags {
    pub const VBLANK: u16 = 1 << 0;
    pub const HBLANK: u16 = 1 << 1;
    pub const VCOUNT: u16 = 1 << 2;
    pub const TIMER0: u16 = 1 << 3;
    pub const TIMER1: u16 = 1 << 4;
    pub const TIMER2: u16 = 1 << 5;
    pub const TIMER3: u16 = 1 << 6;
    pub const SERIAL: u16 = 1 << 7;
    pub const DMA0: u16 = 1 << 8;
    pub const DMA1: u16 = 1 << 9;
    pub const DMA2: u16 = 1 << 10;
    pub const DMA3: u16 = 1 << 11;
    pub const KEYPAD: u16 = 1 << 12;
    pub const GAMEPAK: u16 = 1 << 13;
}

/// Number of table slots
pub const INTR_COUNT: usize = 14;

/// Table slot, in dispatch priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InterruptSource {
    VCount = 0,
    Serial = 1,
    Timer3 = 2,
    HBlank = 3,
    VBlank = 4,
    Timer0 = 5,
    Timer1 = 6,
    Timer2 = 7,
    Dma0 = 8,
    Dma1 = 9,
    Dma2 = 10,
    Dma3 = 11,
    Keypad = 12,
    GamePak = 13,
}

impl InterruptSource {
    pub const ALL: [InterruptSource; INTR_COUNT] = [
        InterruptSource::VCount, InterruptSource::Serial, InterruptSource::Timer3,
        InterruptSource::HBlank, InterruptSource::VBlank, InterruptSource::Timer0,
        InterruptSource::Timer1, InterruptSource::Timer2, InterruptSource::Dma0,
        InterruptSource::Dma1, InterruptSource::Dma2, InterruptSource::Dma3,
        InterruptSource::Keypad, InterruptSource::GamePak,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// IF/IE bit for this source
    pub fn flag(self) -> u16 {
        match self {
            InterruptSource::VBlank  => flags::VBLANK,
            InterruptSource::HBlank  => flags::HBLANK,
            InterruptSource::VCount  => flags::VCOUNT,
            InterruptSource::Timer0  => flags::TIMER0,
            InterruptSource::Timer1  => flags::TIMER1,
            InterruptSource::Timer2  => flags::TIMER2,
            InterruptSource::Timer3  => flags::TIMER3,
            InterruptSource::Serial  => flags::SERIAL,
            InterruptSource::Dma0    => flags::DMA0,
            InterruptSource::Dma1    => flags::DMA1,
            InterruptSource::Dma2    => flags::DMA2,
            InterruptSource::Dma3    => flags::DMA3,
            InterruptSource::Keypad  => flags::KEYPAD,
            InterruptSource::GamePak => flags::GAMEPAK,
        }
    }
}

/// Handler installed by code outside the core (flash timer, link timing).
pub type ForeignHandler = fn(&mut FrameState, &mut dyn InterruptServices);

/// What a table slot runs when its source fires.
#[derive(Debug, Clone, Copy)]
pub enum IntrHandler {
    VBlank,
    HBlank,
    VCount,
    Serial,
    Timer3,
    /// Inert slot
    Dummy,
    Foreign(ForeignHandler),
}

impl IntrHandler {
    pub fn name(&self) -> &'static str {
        match self {
            IntrHandler::VBlank     => "vblank",
            IntrHandler::HBlank     => "hblank",
            IntrHandler::VCount     => "vcount",
            IntrHandler::Serial     => "serial",
            IntrHandler::Timer3     => "timer3",
            IntrHandler::Dummy      => "dummy",
            IntrHandler::Foreign(_) => "foreign",
        }
    }

    fn run(self, state: &mut FrameState, services: &mut dyn InterruptServices) {
        match self {
            IntrHandler::VBlank => vblank_intr(state, services),
            IntrHandler::HBlank => hblank_intr(state),
            IntrHandler::VCount => vcount_intr(state, services),
            IntrHandler::Serial => serial_intr(state),
            IntrHandler::Timer3 => services.timer3(),
            IntrHandler::Dummy => {}
            IntrHandler::Foreign(f) => f(state, services),
        }
    }
}

/// Boot-time bindings; sources without a handler get the inert slot.
pub const TEMPLATE: [IntrHandler; INTR_COUNT] = [
    IntrHandler::VCount,
    IntrHandler::Serial,
    IntrHandler::Timer3,
    IntrHandler::HBlank,
    IntrHandler::VBlank,
    IntrHandler::Dummy, // Timer 0
    IntrHandler::Dummy, // Timer 1
    IntrHandler::Dummy, // Timer 2
    IntrHandler::Dummy, // DMA 0
    IntrHandler::Dummy, // DMA 1
    IntrHandler::Dummy, // DMA 2
    IntrHandler::Dummy, // DMA 3
    IntrHandler::Dummy, // Keypad
    IntrHandler::Dummy, // Game Pak
];

fn vblank_intr(state: &mut FrameState, services: &mut dyn InterruptServices) {
    if !state.link_vsync_disabled {
        services.link_vsync();
    }
    state.bump_counter1();
    if let Some(cb) = state.vblank_callback {
        cb(state);
    }
    state.bump_counter2();

    services.copy_buffered_gpu_regs();
    services.process_dma_requests();
    services.sound_main();
    services.after_vblank();

    state.intr_check |= flags::VBLANK;
}

fn hblank_intr(state: &mut FrameState) {
    if let Some(cb) = state.hblank_callback {
        cb(state);
    }
    state.intr_check |= flags::HBLANK;
}

fn vcount_intr(state: &mut FrameState, services: &mut dyn InterruptServices) {
    services.sound_vsync();
    if let Some(cb) = state.vcount_callback {
        cb(state);
    }
    state.intr_check |= flags::VCOUNT;
}

fn serial_intr(state: &mut FrameState) {
    if let Some(cb) = state.serial_callback {
        cb(state);
    }
    state.intr_check |= flags::SERIAL;
}

/// Interrupt table plus the IE mask and master enable.
pub struct InterruptDispatcher {
    /// Staged table, edited by install/restore
    table: [IntrHandler; INTR_COUNT],
    /// Table the hardware vectors through
    published: [IntrHandler; INTR_COUNT],
    master_enable: bool,
    enabled: u16,
    vcount_line: Option<u8>,
    /// Handlers run since boot
    pub dbg_serviced: u64,
}

impl InterruptDispatcher {
    pub fn new() -> Self {
        InterruptDispatcher {
            table: TEMPLATE,
            published: [IntrHandler::Dummy; INTR_COUNT],
            master_enable: false,
            enabled: 0,
            vcount_line: None,
            dbg_serviced: 0,
        }
    }

    /// Load the template, publish it, clear the hook slots and turn on vblank
    /// delivery.
    pub fn initialize(&mut self, state: &mut FrameState) {
        self.table = TEMPLATE;
        self.publish();

        state.vblank_callback = None;
        state.hblank_callback = None;
        state.vcount_callback = None;
        state.serial_callback = None;

        self.master_enable = true;
        self.enable(flags::VBLANK);
    }

    /// Overwrite one staged slot. Takes effect at the next [`publish`](Self::publish).
    pub fn install(&mut self, source: InterruptSource, handler: IntrHandler) {
        debug!("intr: {:?} <- {}", source, handler.name());
        self.table[source.index()] = handler;
    }

    /// Make the staged table the one the hardware dispatches through.
    pub fn publish(&mut self) {
        self.published = self.table;
    }

    /// Rebind one slot to its boot-time handler and publish.
    pub fn restore_default(&mut self, source: InterruptSource) {
        self.install(source, TEMPLATE[source.index()]);
        self.publish();
    }

    /// Give the serial and timer 3 slots back to the link layer after the
    /// flash timing code borrowed them.
    pub fn restore_link_handlers(&mut self) {
        self.install(InterruptSource::Serial, IntrHandler::Serial);
        self.install(InterruptSource::Timer3, IntrHandler::Timer3);
        self.publish();
    }

    /// Hand the timer 2 slot to the flash write-timeout routine.
    pub fn install_flash_timer(&mut self, handler: ForeignHandler) {
        self.install(InterruptSource::Timer2, IntrHandler::Foreign(handler));
        self.publish();
    }

    pub fn enable(&mut self, mask: u16) {
        self.enabled |= mask;
    }

    pub fn disable(&mut self, mask: u16) {
        self.enabled &= !mask;
    }

    pub fn set_master_enable(&mut self, on: bool) {
        self.master_enable = on;
    }

    pub fn master_enable(&self) -> bool {
        self.master_enable
    }

    pub fn enabled(&self) -> u16 {
        self.enabled
    }

    /// Raise VCount on the given scanline (sound DMA resync point).
    pub fn enable_vcount_at_line(&mut self, line: u8) {
        self.vcount_line = Some(line);
        self.enable(flags::VCOUNT);
    }

    pub fn vcount_line(&self) -> Option<u8> {
        self.vcount_line
    }

    /// Staged handler for a slot
    pub fn handler(&self, source: InterruptSource) -> IntrHandler {
        self.table[source.index()]
    }

    /// Handler the hardware would run right now
    pub fn published(&self, source: InterruptSource) -> IntrHandler {
        self.published[source.index()]
    }

    /// Run the published handler of every raised, enabled source in table
    /// order. Returns the mask of sources actually serviced.
    pub fn service(
        &mut self,
        requests: u16,
        state: &mut FrameState,
        services: &mut dyn InterruptServices,
    ) -> u16 {
        if !self.master_enable {
            return 0;
        }
        let pending = requests & self.enabled;
        let mut serviced = 0;
        for source in InterruptSource::ALL {
            if pending & source.flag() == 0 {
                continue;
            }
            let handler = self.published[source.index()];
            handler.run(state, services);
            serviced |= source.flag();
            self.dbg_serviced += 1;
        }
        serviced
    }
}

impl Default for InterruptDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
