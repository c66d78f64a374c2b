/// SimulationState: everything the loop mutates between ticks.
///
/// Owned by exactly one `GameLoop`; the input listener thread never sees it,
/// so there is no locking around game state.
///
/// `objects` is kept in render order: later entries paint over earlier ones.

use crate::config::GameConfig;
use crate::domain::object::GameObject;

#[derive(Clone, Debug, Default)]
pub struct SimulationState {
    pub objects: Vec<GameObject>,
    pub paused: bool,
    pub debug_text: String,
    /// Unpaused updates applied so far.
    pub ticks: u64,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state with the objects listed in the config, in file order.
    pub fn from_config(config: &GameConfig) -> Self {
        let mut state = Self::new();
        for obj in &config.objects {
            state.push(obj.clone());
        }
        state
    }

    /// Append an object on top of the current render order.
    pub fn push(&mut self, obj: GameObject) {
        self.objects.push(obj);
    }

    /// Remove and return the object at `index`, preserving the order of the rest.
    #[allow(dead_code)]
    pub fn remove(&mut self, index: usize) -> Option<GameObject> {
        if index < self.objects.len() {
            Some(self.objects.remove(index))
        } else {
            None
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn set_debug_text(&mut self, text: impl Into<String>) {
        self.debug_text = text.into();
    }
}
