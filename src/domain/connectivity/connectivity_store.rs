use slotmap::{SlotMap, new_key_type};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::connectivity::connectivity_request::ConnectivityRequest;
use crate::domain::connectivity::state::ConnectivityState;
use crate::domain::network::connect_point::ConnectPoint;
use crate::domain::utils::id::ConnectivityId;
use crate::error::{Error, Result};

new_key_type! {
    pub struct ConnectivityKey;
}

/// A connectivity request behind its own lock. Every mutation and every aggregate
/// query of one request goes through this mutex.
pub type SharedConnectivityRequest = Arc<Mutex<ConnectivityRequest>>;

/// Gets told about every state change a request goes through while held by a [`ConnectivityStore`].
pub trait ConnectivityListener: std::fmt::Debug + Send + Sync {
    fn on_state_change(&self, id: &ConnectivityId, from: ConnectivityState, to: ConnectivityState);
}

#[derive(Debug)]
struct StoreInner {
    /// Request storage.
    slots: SlotMap<ConnectivityKey, SharedConnectivityRequest>,

    /// Index lookup internal key (ConnectivityKey) using the request id (ConnectivityId).
    id_index: HashMap<ConnectivityId, ConnectivityKey>,
}

/// Holds the connectivity requests an orchestrator tracks.
///
/// Requests are independent: each one has its own mutex, and the store lock is only
/// held long enough to find the request.
#[derive(Debug, Clone)]
pub struct ConnectivityStore {
    /// Both maps are protected with a single lock.
    inner: Arc<RwLock<StoreInner>>,

    listeners: Arc<RwLock<Vec<Arc<dyn ConnectivityListener>>>>,
}

impl Default for ConnectivityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivityStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner { slots: SlotMap::with_key(), id_index: HashMap::new() })),
            listeners: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn add_listener(&self, listener: Arc<dyn ConnectivityListener>) {
        write_lock(&self.listeners).push(listener);
    }

    /// Adds a request to the store.
    ///
    /// # Returns
    /// The internal key of the request, or `Error::DuplicateConnectivity` if a request
    /// with the same id is already tracked.
    pub fn register(&self, request: ConnectivityRequest) -> Result<ConnectivityKey> {
        let mut guard = write_lock(&self.inner);
        let id = request.id().clone();

        if guard.id_index.contains_key(&id) {
            return Err(Error::DuplicateConnectivity(id));
        }

        let key = guard.slots.insert(Arc::new(Mutex::new(request)));
        guard.id_index.insert(id.clone(), key);
        log::info!("Connectivity {} registered.", id);

        Ok(key)
    }

    /// Get request with internal key (ConnectivityKey).
    pub fn get(&self, key: ConnectivityKey) -> Option<SharedConnectivityRequest> {
        read_lock(&self.inner).slots.get(key).cloned()
    }

    /// Get request with its id (ConnectivityId).
    pub fn get_by_id(&self, id: &ConnectivityId) -> Option<SharedConnectivityRequest> {
        let guard = read_lock(&self.inner);
        let key = guard.id_index.get(id)?;
        guard.slots.get(*key).cloned()
    }

    /// Stops tracking a request. Handles obtained earlier stay usable.
    pub fn remove(&self, id: &ConnectivityId) -> Option<SharedConnectivityRequest> {
        let mut guard = write_lock(&self.inner);
        let key = guard.id_index.remove(id)?;
        let removed = guard.slots.remove(key);

        if removed.is_some() {
            log::info!("Connectivity {} removed from store.", id);
        }
        removed
    }

    pub fn contains(&self, id: &ConnectivityId) -> bool {
        read_lock(&self.inner).id_index.contains_key(id)
    }

    pub fn ids(&self) -> Vec<ConnectivityId> {
        let mut ids: Vec<ConnectivityId> = read_lock(&self.inner).id_index.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        read_lock(&self.inner).slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs `f` on the request while holding its lock, so `f` sees and leaves a consistent request.
    ///
    /// Every transition `f` makes is reported to the listeners, in order and before the
    /// lock is released. Listeners must not call back into the store for the same request.
    pub fn with_request<R>(&self, id: &ConnectivityId, f: impl FnOnce(&mut ConnectivityRequest) -> R) -> Result<R> {
        let shared = self.get_by_id(id).ok_or_else(|| Error::UnknownConnectivity(id.clone()))?;

        let mut request = lock(&shared);
        request.start_recording_transitions();
        let result = f(&mut *request);

        for (from, to) in request.take_recorded_transitions() {
            self.notify(id, from, to);
        }

        Ok(result)
    }

    /// Requests a state transition. `Ok(false)` means the transition table rejected it.
    pub fn transition(&self, id: &ConnectivityId, target: ConnectivityState) -> Result<bool> {
        self.with_request(id, |request| request.request_transition(target))
    }

    /// Records that the realizing link `src -> dst` came up and completes the installation
    /// once every realizing link is established.
    ///
    /// # Returns
    /// The state of the request after the signal was applied.
    pub fn link_established(&self, id: &ConnectivityId, src: &ConnectPoint, dst: &ConnectPoint) -> Result<ConnectivityState> {
        self.signal_link(id, src, dst, true).map(|(_, state)| state)
    }

    /// Records that the realizing link `src -> dst` went down and completes the withdrawal
    /// once no realizing link is established anymore.
    pub fn link_removed(&self, id: &ConnectivityId, src: &ConnectPoint, dst: &ConnectPoint) -> Result<ConnectivityState> {
        self.signal_link(id, src, dst, false).map(|(_, state)| state)
    }

    /// Applies an established (`true`) or removed (`false`) signal and reconciles, under one lock.
    ///
    /// # Returns
    /// Whether the signal matched a tracked realizing link, and the resulting state.
    pub fn signal_link(&self, id: &ConnectivityId, src: &ConnectPoint, dst: &ConnectPoint, established: bool) -> Result<(bool, ConnectivityState)> {
        self.with_request(id, |request| {
            let tracked = request.set_link_flag(src, dst, established);
            (tracked, reconcile(request))
        })
    }

    fn notify(&self, id: &ConnectivityId, from: ConnectivityState, to: ConnectivityState) {
        tracing::info!(ConnectivityId = %id, From = %from, To = %to, "Connectivity state changed");

        let listeners = read_lock(&self.listeners).clone();
        for listener in listeners {
            listener.on_state_change(id, from, to);
        }
    }
}

/// Advances an installing or withdrawing request whose realizing links all reached the target condition.
fn reconcile(request: &mut ConnectivityRequest) -> ConnectivityState {
    match request.state() {
        ConnectivityState::Installing if request.is_all_realizing_links_established() => {
            request.request_transition(ConnectivityState::Installed);
        }
        ConnectivityState::Withdrawing if request.is_no_realizing_link_established() => {
            request.request_transition(ConnectivityState::Withdrawn);
        }
        _ => {}
    }

    request.state()
}

// Poisoned locks are recovered, not propagated.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
