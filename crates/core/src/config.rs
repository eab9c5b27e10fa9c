//! Startup configuration.
//!
//! Everything here is set once at boot and read every frame. The whole
//! struct is serde-serializable so input recordings can carry the settings
//! they were captured under.

use serde::{Deserialize, Serialize};

use crate::input::RepeatTimingConfig;

/// Operator button mode option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ButtonMode {
    #[default]
    Normal,
    /// L/R are left to the application (help, paging)
    LR,
    /// L also acts as A
    LEqualsA,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    pub repeat: RepeatTimingConfig,
    pub button_mode: ButtonMode,
    /// A+B+START+SELECT soft reset
    pub soft_reset_enabled: bool,
    /// Scanline that raises the VCount interrupt (sound vsync)
    pub vcount_line: u8,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            repeat: RepeatTimingConfig::default(),
            button_mode: ButtonMode::Normal,
            soft_reset_enabled: true,
            vcount_line: 150,
        }
    }
}
