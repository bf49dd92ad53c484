//! Shared state store

use fluora_core::FluoraState;
use parking_lot::RwLock;

/// Holds the single most recent plant state record.
///
/// Readers take snapshots; the only writer is the telemetry receive loop,
/// which commits a fully decoded record in one step. A frame that fails to
/// decode never touches the store.
#[derive(Debug, Default)]
pub struct StateStore {
    inner: RwLock<FluoraState>,
}

impl StateStore {
    /// Create a store holding the zero-value default state
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current state
    pub fn snapshot(&self) -> FluoraState {
        self.inner.read().clone()
    }

    /// Replace the stored state with a fully decoded record
    pub(crate) fn commit(&self, state: FluoraState) {
        *self.inner.write() = state;
    }
}
