use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::Duration;

use crate::domain::connectivity::realizing_link::{LinkKey, RealizingLink};
use crate::domain::connectivity::state::ConnectivityState;
use crate::domain::network::bandwidth::Bandwidth;
use crate::domain::network::connect_point::ConnectPoint;
use crate::domain::network::link::{Link, Path};
use crate::domain::utils::id::{ConnectivityId, ReservationHandle};

/// A metro connectivity request: a packet-layer path that gets realized, hop by hop,
/// over the optical layer.
///
/// The request only records what it is told. It never decides on its own to move
/// to another state; an orchestrator asks the aggregate queries
/// ([`Self::is_all_realizing_links_established`], [`Self::is_no_realizing_link_established`])
/// and drives [`Self::request_transition`] from the answers.
///
/// This type is not synchronized. Share it through
/// [`ConnectivityStore`](crate::domain::connectivity::connectivity_store::ConnectivityStore),
/// which serializes access per request.
#[derive(Debug, Clone)]
pub struct ConnectivityRequest {
    id: ConnectivityId,
    links: Vec<Link>,
    request_bandwidth: Bandwidth,
    request_latency: Duration,

    /// Bandwidth capacity of the optical layer, set once the optical path is computed.
    optical_capacity: Option<Bandwidth>,

    realizing_links: HashMap<LinkKey, RealizingLink>,

    /// Handle of the bandwidth reservation made on behalf of this request.
    reservation_handle: Option<ReservationHandle>,

    state: ConnectivityState,

    /// Accepted transitions, collected only while a store holds the request lock.
    recorded_transitions: Option<Vec<(ConnectivityState, ConnectivityState)>>,
}

impl ConnectivityRequest {
    /// The links of `path` are copied; later changes to `path` do not reach this request.
    pub fn new(id: ConnectivityId, path: &Path, request_bandwidth: Bandwidth, request_latency: Duration) -> Self {
        Self {
            id,
            links: path.links().to_vec(),
            request_bandwidth,
            request_latency,
            optical_capacity: None,
            realizing_links: HashMap::new(),
            reservation_handle: None,
            state: ConnectivityState::Created,
            recorded_transitions: None,
        }
    }

    pub fn id(&self) -> &ConnectivityId {
        &self.id
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn bandwidth(&self) -> Bandwidth {
        self.request_bandwidth
    }

    pub fn latency(&self) -> Duration {
        self.request_latency
    }

    pub fn state(&self) -> ConnectivityState {
        self.state
    }

    /// Moves to `target` if the transition table allows it.
    ///
    /// Returns `false` and leaves the state untouched otherwise.
    pub fn request_transition(&mut self, target: ConnectivityState) -> bool {
        if !self.state.can_transition_to(target) {
            log::warn!("Connectivity {}: rejected state transition {} -> {}", self.id, self.state, target);
            return false;
        }

        log::debug!("Connectivity {}: state transition {} -> {}", self.id, self.state, target);
        if let Some(recorded) = self.recorded_transitions.as_mut() {
            recorded.push((self.state, target));
        }
        self.state = target;
        true
    }

    pub(crate) fn start_recording_transitions(&mut self) {
        self.recorded_transitions = Some(Vec::new());
    }

    /// Stops recording and returns the accepted transitions in the order they were made.
    pub(crate) fn take_recorded_transitions(&mut self) -> Vec<(ConnectivityState, ConnectivityState)> {
        self.recorded_transitions.take().unwrap_or_default()
    }

    pub fn optical_capacity(&self) -> Option<Bandwidth> {
        self.optical_capacity
    }

    pub fn set_optical_capacity(&mut self, optical_capacity: Bandwidth) {
        self.optical_capacity = Some(optical_capacity);
    }

    pub fn reservation_handle(&self) -> Option<&ReservationHandle> {
        self.reservation_handle.as_ref()
    }

    pub fn set_reservation_handle(&mut self, reservation_handle: ReservationHandle) {
        self.reservation_handle = Some(reservation_handle);
    }

    /// Adds a realizing link. Adding a link whose endpoint pair is already present
    /// keeps the present entry and returns `false`.
    pub fn add_realizing_link(&mut self, link: RealizingLink) -> bool {
        match self.realizing_links.entry(link.key().clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(link);
                true
            }
        }
    }

    /// Removes the realizing link with the same endpoint pair as `link`, if any,
    /// and hands the stored entry back unchanged.
    pub fn remove_realizing_link(&mut self, link: &RealizingLink) -> Option<RealizingLink> {
        self.realizing_links.remove(link.key())
    }

    /// A point-in-time copy of the realizing links, ordered by endpoint pair.
    pub fn realizing_links(&self) -> Vec<RealizingLink> {
        let mut links: Vec<RealizingLink> = self.realizing_links.values().cloned().collect();
        links.sort_by(|a, b| a.key().cmp(b.key()));
        links
    }

    pub fn realizing_link(&self, src: &ConnectPoint, dst: &ConnectPoint) -> Option<&RealizingLink> {
        self.realizing_links.get(&LinkKey::new(src.clone(), dst.clone()))
    }

    pub fn realizing_link_count(&self) -> usize {
        self.realizing_links.len()
    }

    pub fn established_link_count(&self) -> usize {
        self.realizing_links.values().filter(|l| l.is_established()).count()
    }

    /// Marks the realizing link `src -> dst` as established.
    ///
    /// A signal for an unknown endpoint pair is ignored; it may arrive before the
    /// link is registered. Returns whether a tracked link matched.
    pub fn set_link_established(&mut self, src: &ConnectPoint, dst: &ConnectPoint) -> bool {
        self.set_link_flag(src, dst, true)
    }

    /// Marks the realizing link `src -> dst` as no longer established. Unknown pairs are ignored.
    pub fn set_link_removed(&mut self, src: &ConnectPoint, dst: &ConnectPoint) -> bool {
        self.set_link_flag(src, dst, false)
    }

    pub(crate) fn set_link_flag(&mut self, src: &ConnectPoint, dst: &ConnectPoint, established: bool) -> bool {
        match self.realizing_links.get_mut(&LinkKey::new(src.clone(), dst.clone())) {
            Some(link) => {
                link.set_established(established);
                true
            }
            None => {
                log::debug!("Connectivity {}: ignoring signal for untracked link {} -> {}", self.id, src, dst);
                false
            }
        }
    }

    /// True if there is at least one realizing link and all of them are established.
    ///
    /// An empty set is never reported as fully established, so a request without
    /// realized segments can not be completed by accident.
    pub fn is_all_realizing_links_established(&self) -> bool {
        !self.realizing_links.is_empty() && self.realizing_links.values().all(RealizingLink::is_established)
    }

    /// True if no realizing link is established, including the empty set.
    pub fn is_no_realizing_link_established(&self) -> bool {
        !self.realizing_links.values().any(RealizingLink::is_established)
    }
}
