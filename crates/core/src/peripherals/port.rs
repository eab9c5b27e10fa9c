//! Board-level hardware: key port, interrupt lines, reset.

/// Key input register.
pub trait InputPort {
    /// Raw register value: a cleared bit means the button is pressed.
    fn read_key_input(&mut self) -> u16;
}

impl<P: InputPort + ?Sized> InputPort for Box<P> {
    fn read_key_input(&mut self) -> u16 {
        (**self).read_key_input()
    }
}

/// Source of interrupt requests, including the periodic vblank pulse.
///
/// The scheduler polls this from its wait loop only, so handlers never
/// preempt foreground code. A board that never raises vblank hangs the
/// scheduler; there is no timeout.
pub trait PulseSource {
    /// Interrupt request bits (IF layout) raised since the previous call.
    fn take_interrupt_requests(&mut self) -> u16;
}

/// Work the standard interrupt handlers hand off to other subsystems.
///
/// Every method defaults to doing nothing so boards only wire what they have.
pub trait InterruptServices {
    /// Link layer vblank bookkeeping
    fn link_vsync(&mut self) {}
    /// Copy buffered graphics register writes
    fn copy_buffered_gpu_regs(&mut self) {}
    /// Run queued DMA copy requests
    fn process_dma_requests(&mut self) {}
    /// Sound mixer main pass
    fn sound_main(&mut self) {}
    /// Sound DMA resync, from the VCount handler
    fn sound_vsync(&mut self) {}
    /// Link layer timer 3 tick
    fn timer3(&mut self) {}
    /// Tail of the vblank handler: link data receive, RNG advance
    fn after_vblank(&mut self) {}
}

/// Which hardware blocks a soft reset clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetScope(u8);

impl ResetScope {
    pub const EWRAM: ResetScope = ResetScope(1 << 0);
    pub const IWRAM: ResetScope = ResetScope(1 << 1);
    pub const PALETTE: ResetScope = ResetScope(1 << 2);
    pub const VRAM: ResetScope = ResetScope(1 << 3);
    pub const OAM: ResetScope = ResetScope(1 << 4);
    pub const SIO_REGS: ResetScope = ResetScope(1 << 5);
    pub const SOUND_REGS: ResetScope = ResetScope(1 << 6);
    pub const REGS: ResetScope = ResetScope(1 << 7);
    pub const ALL: ResetScope = ResetScope(0xFF);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: ResetScope) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn without(self, other: ResetScope) -> ResetScope {
        ResetScope(self.0 & !other.0)
    }
}

/// Reset line of the device.
pub trait SystemReset {
    /// Halt sound DMA, scanline effects and DMA channels ahead of a reset.
    fn stop_background_activity(&mut self) {}

    /// Reboot. On a real device this never returns; hosted boards return and
    /// let the caller rebuild the scheduler.
    fn soft_reset(&mut self, scope: ResetScope);
}

/// Everything the scheduler needs from the board itself.
pub trait Hardware: InputPort + PulseSource + InterruptServices + SystemReset {}

impl<T: InputPort + PulseSource + InterruptServices + SystemReset> Hardware for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_scope_without_sio() {
        let scope = ResetScope::ALL.without(ResetScope::SIO_REGS);
        assert!(!scope.contains(ResetScope::SIO_REGS));
        assert!(scope.contains(ResetScope::VRAM));
        assert!(scope.contains(ResetScope::IWRAM));
        assert_eq!(scope.bits(), 0xDF);
    }
}
