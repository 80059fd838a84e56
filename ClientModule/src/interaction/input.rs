//! Per-tick input sampled for each interactor.

use holdsync_shared::constants::INTERACTOR_COUNT;
use holdsync_shared::interactor::InteractorId;

/// Buttons relevant to grabbing for one interactor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractorInput {
    /// Grab input is active (held down)
    pub grab: bool,

    /// Duplicate modifier is held: grabbing spawns a clone instead
    pub duplicate: bool,
}

/// Input for all four interactors in one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    inputs: [InteractorInput; INTERACTOR_COUNT],
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: InteractorId) -> InteractorInput {
        self.inputs[id.index()]
    }

    pub fn set(&mut self, id: InteractorId, input: InteractorInput) {
        self.inputs[id.index()] = input;
    }

    /// Builder: grab input active on `id`
    pub fn grab(mut self, id: InteractorId) -> Self {
        self.inputs[id.index()].grab = true;
        self
    }

    /// Builder: grab with the duplicate modifier on `id`
    pub fn duplicate(mut self, id: InteractorId) -> Self {
        self.inputs[id.index()] = InteractorInput { grab: true, duplicate: true };
        self
    }
}
