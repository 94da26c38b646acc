use serde::Deserialize;

/// Root of a scenario file: the requests to track and the signals to replay against them.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDto {
    pub requests: Vec<ConnectivityRequestDto>,
    #[serde(default)]
    pub events: Vec<EventDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityRequestDto {
    /// Generated if missing.
    pub id: Option<String>,
    pub path: Vec<LinkDto>,
    pub bandwidth_bps: u64,
    pub latency_ms: u64,
}

/// Connect points are written as `device/port`.
#[derive(Debug, Deserialize, Clone)]
pub struct LinkDto {
    pub src: String,
    pub dst: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RealizingLinkDto {
    pub src: String,
    pub dst: String,
    pub bandwidth_bps: Option<u64>,
    pub realizing_key: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectivityStateDto {
    Created,
    Installing,
    Installed,
    Withdrawing,
    Withdrawn,
    Failed,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EventDto {
    Transition { connectivity: String, target: ConnectivityStateDto },
    AddRealizingLink { connectivity: String, link: Option<RealizingLinkDto> },
    RemoveRealizingLink { connectivity: String, link: Option<RealizingLinkDto> },
    LinkEstablished { connectivity: String, src: String, dst: String },
    LinkRemoved { connectivity: String, src: String, dst: String },
    OpticalCapacity { connectivity: String, bandwidth_bps: u64 },
    ReservationHandle { connectivity: String, handle: String },
}
