use std::time::Duration;

use crate::api::scenario_dto::{ConnectivityRequestDto, ConnectivityStateDto, EventDto, LinkDto, RealizingLinkDto, ScenarioDto};
use crate::domain::connectivity::connectivity_request::ConnectivityRequest;
use crate::domain::connectivity::connectivity_store::ConnectivityStore;
use crate::domain::connectivity::realizing_link::RealizingLink;
use crate::domain::connectivity::state::ConnectivityState;
use crate::domain::network::bandwidth::Bandwidth;
use crate::domain::network::connect_point::ConnectPoint;
use crate::domain::network::link::{Link, Path};
use crate::domain::utils::id::{ConnectivityId, ReservationHandle};
use crate::error::{Error, Result};

/// A signal or command concerning one connectivity request, as an orchestrator would issue it.
#[derive(Debug, Clone)]
pub enum ScenarioEvent {
    Transition { id: ConnectivityId, target: ConnectivityState },
    /// `None` stands for a link that was missing in the input; applying it fails.
    AddRealizingLink { id: ConnectivityId, link: Option<RealizingLink> },
    RemoveRealizingLink { id: ConnectivityId, link: Option<RealizingLink> },
    LinkEstablished { id: ConnectivityId, src: ConnectPoint, dst: ConnectPoint },
    LinkRemoved { id: ConnectivityId, src: ConnectPoint, dst: ConnectPoint },
    OpticalCapacity { id: ConnectivityId, capacity: Bandwidth },
    ReservationHandle { id: ConnectivityId, handle: ReservationHandle },
}

impl ScenarioEvent {
    pub fn connectivity(&self) -> &ConnectivityId {
        match self {
            ScenarioEvent::Transition { id, .. }
            | ScenarioEvent::AddRealizingLink { id, .. }
            | ScenarioEvent::RemoveRealizingLink { id, .. }
            | ScenarioEvent::LinkEstablished { id, .. }
            | ScenarioEvent::LinkRemoved { id, .. }
            | ScenarioEvent::OpticalCapacity { id, .. }
            | ScenarioEvent::ReservationHandle { id, .. } => id,
        }
    }
}

/// What happened when one event was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome {
    pub connectivity: ConnectivityId,
    pub description: String,

    /// Transition accepted, link inserted or removed, signal matched a tracked link.
    /// Always `true` for capacity and reservation handle assignments.
    pub accepted: bool,

    pub state: ConnectivityState,
}

/// A set of connectivity requests together with the events to replay against them.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub requests: Vec<ConnectivityRequest>,
    pub events: Vec<ScenarioEvent>,
}

// Helper to map DTO ConnectivityState to internal ConnectivityState
fn map_connectivity_state(dto_state: ConnectivityStateDto) -> ConnectivityState {
    match dto_state {
        ConnectivityStateDto::Created => ConnectivityState::Created,
        ConnectivityStateDto::Installing => ConnectivityState::Installing,
        ConnectivityStateDto::Installed => ConnectivityState::Installed,
        ConnectivityStateDto::Withdrawing => ConnectivityState::Withdrawing,
        ConnectivityStateDto::Withdrawn => ConnectivityState::Withdrawn,
        ConnectivityStateDto::Failed => ConnectivityState::Failed,
    }
}

fn map_link(dto: &LinkDto) -> Result<Link> {
    Ok(Link::new(dto.src.parse()?, dto.dst.parse()?))
}

fn map_realizing_link(dto: &RealizingLinkDto) -> Result<RealizingLink> {
    let bandwidth = dto.bandwidth_bps.map(Bandwidth::bps).unwrap_or(Bandwidth::ZERO);
    let link = RealizingLink::new(dto.src.parse()?, dto.dst.parse()?, bandwidth);

    Ok(match &dto.realizing_key {
        Some(key) => link.with_realizing_key(key.clone()),
        None => link,
    })
}

impl TryFrom<ConnectivityRequestDto> for ConnectivityRequest {
    type Error = Error;

    fn try_from(dto: ConnectivityRequestDto) -> Result<Self> {
        let id = match dto.id {
            Some(id) if !id.is_empty() => ConnectivityId::new(id),
            Some(_) => return Err(Error::ConversionError("connectivity id must not be empty".to_string())),
            None => ConnectivityId::generate(),
        };

        let links = dto.path.iter().map(map_link).collect::<Result<Vec<_>>>()?;
        let path = Path::new(links)?;

        Ok(ConnectivityRequest::new(id, &path, Bandwidth::bps(dto.bandwidth_bps), Duration::from_millis(dto.latency_ms)))
    }
}

impl TryFrom<EventDto> for ScenarioEvent {
    type Error = Error;

    fn try_from(dto: EventDto) -> Result<Self> {
        let event = match dto {
            EventDto::Transition { connectivity, target } => {
                ScenarioEvent::Transition { id: ConnectivityId::new(connectivity), target: map_connectivity_state(target) }
            }
            EventDto::AddRealizingLink { connectivity, link } => {
                ScenarioEvent::AddRealizingLink { id: ConnectivityId::new(connectivity), link: link.as_ref().map(map_realizing_link).transpose()? }
            }
            EventDto::RemoveRealizingLink { connectivity, link } => {
                ScenarioEvent::RemoveRealizingLink { id: ConnectivityId::new(connectivity), link: link.as_ref().map(map_realizing_link).transpose()? }
            }
            EventDto::LinkEstablished { connectivity, src, dst } => {
                ScenarioEvent::LinkEstablished { id: ConnectivityId::new(connectivity), src: src.parse()?, dst: dst.parse()? }
            }
            EventDto::LinkRemoved { connectivity, src, dst } => {
                ScenarioEvent::LinkRemoved { id: ConnectivityId::new(connectivity), src: src.parse()?, dst: dst.parse()? }
            }
            EventDto::OpticalCapacity { connectivity, bandwidth_bps } => {
                ScenarioEvent::OpticalCapacity { id: ConnectivityId::new(connectivity), capacity: Bandwidth::bps(bandwidth_bps) }
            }
            EventDto::ReservationHandle { connectivity, handle } => {
                ScenarioEvent::ReservationHandle { id: ConnectivityId::new(connectivity), handle: ReservationHandle::new(handle) }
            }
        };

        Ok(event)
    }
}

/// Constructs a complete Scenario from a ScenarioDto.
impl TryFrom<ScenarioDto> for Scenario {
    type Error = Error;

    fn try_from(dto: ScenarioDto) -> Result<Self> {
        let requests = dto.requests.into_iter().map(ConnectivityRequest::try_from).collect::<Result<Vec<_>>>()?;
        let events = dto.events.into_iter().map(ScenarioEvent::try_from).collect::<Result<Vec<_>>>()?;

        Ok(Scenario { requests, events })
    }
}

impl Scenario {
    /// Registers all requests in `store` and replays the events in order.
    ///
    /// Stops at the first event that fails (unknown request, missing link).
    pub fn apply(self, store: &ConnectivityStore) -> Result<Vec<EventOutcome>> {
        for request in self.requests {
            store.register(request)?;
        }

        let mut outcomes = Vec::with_capacity(self.events.len());
        for event in self.events {
            let outcome = apply_event(store, event)?;
            log::debug!("Connectivity {}: {} (accepted: {}, state: {})", outcome.connectivity, outcome.description, outcome.accepted, outcome.state);
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}

/// Applies a single event to the request it concerns.
pub fn apply_event(store: &ConnectivityStore, event: ScenarioEvent) -> Result<EventOutcome> {
    let id = event.connectivity().clone();

    let (description, accepted, state) = match event {
        ScenarioEvent::Transition { id, target } => {
            let (accepted, state) = store.with_request(&id, |request| (request.request_transition(target), request.state()))?;
            (format!("transition to {}", target), accepted, state)
        }
        ScenarioEvent::AddRealizingLink { id, link } => {
            let link = link.ok_or_else(|| Error::InvalidArgument(format!("add realizing link to {} without a link", id)))?;
            let description = format!("add realizing link {}", link.key());
            store.with_request(&id, |request| (description, request.add_realizing_link(link), request.state()))?
        }
        ScenarioEvent::RemoveRealizingLink { id, link } => {
            let link = link.ok_or_else(|| Error::InvalidArgument(format!("remove realizing link from {} without a link", id)))?;
            let description = format!("remove realizing link {}", link.key());
            store.with_request(&id, |request| (description, request.remove_realizing_link(&link).is_some(), request.state()))?
        }
        ScenarioEvent::LinkEstablished { id, src, dst } => {
            let (tracked, state) = store.signal_link(&id, &src, &dst, true)?;
            (format!("link {} -> {} established", src, dst), tracked, state)
        }
        ScenarioEvent::LinkRemoved { id, src, dst } => {
            let (tracked, state) = store.signal_link(&id, &src, &dst, false)?;
            (format!("link {} -> {} removed", src, dst), tracked, state)
        }
        ScenarioEvent::OpticalCapacity { id, capacity } => store.with_request(&id, |request| {
            request.set_optical_capacity(capacity);
            (format!("optical capacity {}", capacity), true, request.state())
        })?,
        ScenarioEvent::ReservationHandle { id, handle } => store.with_request(&id, |request| {
            let description = format!("reservation handle {}", handle);
            request.set_reservation_handle(handle);
            (description, true, request.state())
        })?,
    };

    Ok(EventOutcome { connectivity: id, description, accepted, state })
}
