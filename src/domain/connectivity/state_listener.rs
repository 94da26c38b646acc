use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::domain::connectivity::connectivity_store::ConnectivityListener;
use crate::domain::connectivity::state::ConnectivityState;
use crate::domain::utils::id::ConnectivityId;

/// One accepted state change of a connectivity request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: ConnectivityState,
    pub to: ConnectivityState,
}

/// Listener keeping an append-only history of state changes per request.
#[derive(Debug, Default)]
pub struct StateHistoryListener {
    history: Mutex<HashMap<ConnectivityId, Vec<StateTransition>>>,
}

impl StateHistoryListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// All transitions recorded for `id`, oldest first.
    pub fn history(&self, id: &ConnectivityId) -> Vec<StateTransition> {
        let guard = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        guard.get(id).cloned().unwrap_or_default()
    }
}

impl ConnectivityListener for StateHistoryListener {
    fn on_state_change(&self, id: &ConnectivityId, from: ConnectivityState, to: ConnectivityState) {
        match to {
            ConnectivityState::Installed => log::info!("Connectivity {} installed.", id),
            ConnectivityState::Withdrawn => log::info!("Connectivity {} withdrawn.", id),
            ConnectivityState::Failed => log::warn!("Connectivity {} failed while {}.", id, from),
            _ => {}
        }

        let mut guard = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        guard.entry(id.clone()).or_default().push(StateTransition { from, to });
    }
}
