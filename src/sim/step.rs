/// Per-tick simulation rules: input handling and the update phase.
///
/// Both are pure functions over `SimulationState`, so the loop decides when
/// they run and tests can drive them without a terminal.

use log::debug;

use crate::config::KeyBindings;
use crate::domain::object::collides_with_wall;
use crate::sim::state::SimulationState;

/// What the loop should do after handling a tick's input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply at most one input event to the state.
///
/// `None` is the steady state (nothing queued) and does nothing. Keys other
/// than quit and pause are reserved for game rules and are ignored here.
pub fn handle_input(state: &mut SimulationState, key: Option<&str>, keys: &KeyBindings) -> Flow {
    let Some(key) = key else {
        return Flow::Continue;
    };

    if key == keys.quit {
        debug!("quit key {key} received");
        return Flow::Quit;
    }

    if key == keys.pause {
        state.toggle_pause();
        debug!("pause toggled: paused={}", state.paused);
    }

    Flow::Continue
}

/// Advance every object by its velocity, in render order. Frozen while paused.
pub fn update(state: &mut SimulationState) {
    if state.paused {
        return;
    }

    for obj in state.objects.iter_mut() {
        obj.advance();
    }
    state.ticks += 1;
}

/// Rewrite the debug line with tick/object counts and how many objects the
/// next update would push out of the surface vertically. Frozen while paused.
pub fn refresh_overlay(state: &mut SimulationState, surface_height: usize) {
    if state.paused {
        return;
    }

    let at_wall = state.objects.iter()
        .filter(|o| collides_with_wall(o, surface_height))
        .count();
    let text = format!(
        "tick:{} objects:{} wall-ahead:{}",
        state.ticks, state.objects.len(), at_wall,
    );
    state.set_debug_text(text);
}
