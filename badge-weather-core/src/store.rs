//! Centralized state store with reducer pattern

use tracing::debug;

use crate::action::Action;
use crate::effect::{DispatchResult, Effect};
use crate::reducer::Reducer;
use crate::state::AppState;

/// Holds the view state and the single point where it changes.
///
/// Every dispatch is logged at `debug` with the action summary, whether the
/// state changed and how many effects came back.
pub struct Store {
    state: AppState,
    reducer: Reducer,
}

impl Store {
    pub fn new(state: AppState, reducer: Reducer) -> Self {
        Self { state, reducer }
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult<Effect> {
        let summary = action.summary();
        let result = (self.reducer)(&mut self.state, action);
        debug!(
            action = %summary,
            state_changed = result.changed,
            effects = result.effects.len(),
            "action processed"
        );
        result
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Use sparingly - prefer dispatching actions. Needed for resetting the
    /// state on activation.
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }
}
