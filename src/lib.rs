use crate::api::scenario_dto::ScenarioDto;
use crate::domain::connectivity::connectivity_store::ConnectivityStore;
use crate::domain::connectivity::scenario::{EventOutcome, Scenario};
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Reads a scenario file and builds the domain scenario from it.
pub fn load_scenario(file_path: &str) -> Result<Scenario> {
    let root_dto: ScenarioDto = parse_json_file::<ScenarioDto>(file_path)?;
    log::info!("Scenario file '{}' parsed successfully.", file_path);

    let scenario = Scenario::try_from(root_dto)?;
    log::info!("Scenario with {} requests and {} events constructed.", scenario.requests.len(), scenario.events.len());

    Ok(scenario)
}

/// Loads a scenario file and replays it against a fresh store.
pub fn replay_scenario(file_path: &str) -> Result<(ConnectivityStore, Vec<EventOutcome>)> {
    let scenario = load_scenario(file_path)?;
    let store = ConnectivityStore::new();
    let outcomes = scenario.apply(&store)?;

    Ok((store, outcomes))
}
