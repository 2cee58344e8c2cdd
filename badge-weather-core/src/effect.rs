//! Effects - side effects declared by the reducer
//!
//! The reducer never touches the network or the screen. It returns a
//! [`DispatchResult`] naming what should happen next, and the controller
//! carries it out after redrawing.

/// Work the controller performs on behalf of the reducer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Issue request A for the given cycle
    FetchSummary { cycle: u64, url: String },
    /// Issue request B for the given cycle
    FetchDetail { cycle: u64, url: String },
    /// Release the view and notify the owner
    ReleaseView,
}

/// Result of dispatching an action: whether the state changed (and needs a
/// redraw) plus the effects to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    pub changed: bool,
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// A single effect, no state change
    #[inline]
    pub fn effect(effect: E) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }

    /// State changed and a single effect
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_result_builders() {
        let r: DispatchResult<Effect> = DispatchResult::unchanged();
        assert!(!r.changed);
        assert!(!r.has_effects());

        let r: DispatchResult<Effect> = DispatchResult::changed();
        assert!(r.changed);
        assert!(r.effects.is_empty());

        let r = DispatchResult::effect(Effect::ReleaseView);
        assert!(!r.changed);
        assert_eq!(r.effects, vec![Effect::ReleaseView]);

        let r = DispatchResult::changed_with(Effect::ReleaseView);
        assert!(r.changed);
        assert!(r.has_effects());
    }
}
