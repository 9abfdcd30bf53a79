use dioxus::prelude::*;

/// Load state of a single image instance. `Loaded` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loaded,
}
impl LoadState {
    pub fn is_loaded(self) -> bool {
        matches!(self, Self::Loaded)
    }
}

/// Storage holding the [`LoadState`] of an instance.
///
/// Returning `None` from [`LoadStateStore::current`] means the owning
/// instance is gone; the pending transition is then dropped.
pub trait LoadStateStore {
    fn current(&self) -> Option<LoadState>;
    /// Returns `false` if the state could not be written
    fn commit(&mut self, state: LoadState) -> bool;
}

impl LoadStateStore for LoadState {
    fn current(&self) -> Option<LoadState> {
        Some(*self)
    }
    fn commit(&mut self, state: LoadState) -> bool {
        *self = state;
        true
    }
}

impl LoadStateStore for Signal<LoadState> {
    fn current(&self) -> Option<LoadState> {
        self.try_peek().ok().map(|state| *state)
    }
    fn commit(&mut self, state: LoadState) -> bool {
        match self.try_write() {
            Ok(mut current) => {
                *current = state;
                true
            }
            Err(_) => false,
        }
    }
}

/// Runs the `Unloaded -> Loaded` transition.
///
/// `after_load` runs before the transition, `exit_action` after it is
/// committed. Both run at most once per store; when the store is already
/// `Loaded` (or gone) nothing happens and `false` is returned.
pub fn complete_load<S: LoadStateStore>(
    store: &mut S,
    after_load: impl FnOnce(),
    exit_action: impl FnOnce(),
) -> bool {
    match store.current() {
        Some(LoadState::Unloaded) => (),
        Some(LoadState::Loaded) => {
            log::trace!("complete_load - already loaded, ignoring load signal");
            return false;
        }
        None => {
            log::debug!("complete_load - instance dropped, ignoring load signal");
            return false;
        }
    }
    after_load();
    if !store.commit(LoadState::Loaded) {
        log::debug!("complete_load - instance dropped during after_load");
        return false;
    }
    exit_action();
    true
}
