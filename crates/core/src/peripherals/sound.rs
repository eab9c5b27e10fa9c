//! Audio engine contract.

/// Status of one audio item's player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemStatus {
    /// Player stopped: the item finished or was never started
    pub paused: bool,
}

pub trait SoundEngine {
    fn start_item(&mut self, id: u16);
    fn stop_item(&mut self, id: u16);
    fn query_status(&mut self, id: u16) -> ItemStatus;
}

/// Engine with no output; every item reports paused immediately.
#[derive(Debug, Default)]
pub struct Silence;

impl SoundEngine for Silence {
    fn start_item(&mut self, _id: u16) {}
    fn stop_item(&mut self, _id: u16) {}
    fn query_status(&mut self, _id: u16) -> ItemStatus {
        ItemStatus { paused: true }
    }
}
