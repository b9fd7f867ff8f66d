use std::cell::Cell;

/// Shared stop flag between an instance and its frame loop. Starts in the
/// running state; `stop` is permanent, a stopped gate never permits
/// another tick.
#[derive(Debug)]
pub struct LoopGate {
    running: Cell<bool>,
}

impl LoopGate {
    pub fn new() -> Self {
        Self {
            running: Cell::new(true),
        }
    }

    pub fn permits_tick(&self) -> bool {
        self.running.get()
    }

    pub fn stop(&self) {
        self.running.set(false);
    }
}

impl Default for LoopGate {
    fn default() -> Self {
        Self::new()
    }
}
