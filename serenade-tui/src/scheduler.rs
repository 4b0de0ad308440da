//! Frame scheduler - at most one live render loop per visual subsystem
//!
//! Starting a loop for a slot first cancels the slot's previous loop, so two
//! loops never draw to the same surface. Loops end only by explicit
//! cancellation or by being superseded; there are no timeouts.

/// Visual subsystems owning a continuous render loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderSlot {
    Confetti,
    Spectrum,
}

/// Handle for a started loop; live only until its slot is restarted or canceled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopToken {
    slot: RenderSlot,
    generation: u64,
}

/// Per-slot loop registry
#[derive(Debug, Default)]
pub struct FrameScheduler {
    confetti: Option<u64>,
    spectrum: Option<u64>,
    next_generation: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, slot: RenderSlot) -> &mut Option<u64> {
        match slot {
            RenderSlot::Confetti => &mut self.confetti,
            RenderSlot::Spectrum => &mut self.spectrum,
        }
    }

    fn slot(&self, slot: RenderSlot) -> Option<u64> {
        match slot {
            RenderSlot::Confetti => self.confetti,
            RenderSlot::Spectrum => self.spectrum,
        }
    }

    /// Start a loop for the slot, superseding any live one
    pub fn start(&mut self, slot: RenderSlot) -> LoopToken {
        self.next_generation += 1;
        let generation = self.next_generation;
        *self.slot_mut(slot) = Some(generation);
        LoopToken { slot, generation }
    }

    /// Cancel the slot's live loop, if any
    pub fn cancel(&mut self, slot: RenderSlot) {
        *self.slot_mut(slot) = None;
    }

    /// Whether the slot has a live loop this frame
    pub fn is_active(&self, slot: RenderSlot) -> bool {
        self.slot(slot).is_some()
    }

    /// Whether this token still owns its slot
    pub fn is_live(&self, token: LoopToken) -> bool {
        self.slot(token.slot) == Some(token.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_activates_slot() {
        let mut scheduler = FrameScheduler::new();
        assert!(!scheduler.is_active(RenderSlot::Spectrum));

        let token = scheduler.start(RenderSlot::Spectrum);
        assert!(scheduler.is_active(RenderSlot::Spectrum));
        assert!(scheduler.is_live(token));
    }

    #[test]
    fn test_restart_supersedes_previous_loop() {
        let mut scheduler = FrameScheduler::new();
        let first = scheduler.start(RenderSlot::Confetti);
        let second = scheduler.start(RenderSlot::Confetti);

        assert!(!scheduler.is_live(first));
        assert!(scheduler.is_live(second));
        assert!(scheduler.is_active(RenderSlot::Confetti));
    }

    #[test]
    fn test_cancel_clears_slot() {
        let mut scheduler = FrameScheduler::new();
        let token = scheduler.start(RenderSlot::Spectrum);
        scheduler.cancel(RenderSlot::Spectrum);

        assert!(!scheduler.is_active(RenderSlot::Spectrum));
        assert!(!scheduler.is_live(token));
    }

    #[test]
    fn test_slots_are_independent() {
        let mut scheduler = FrameScheduler::new();
        let confetti = scheduler.start(RenderSlot::Confetti);
        let spectrum = scheduler.start(RenderSlot::Spectrum);

        scheduler.cancel(RenderSlot::Spectrum);
        assert!(scheduler.is_live(confetti));
        assert!(!scheduler.is_live(spectrum));
    }
}
