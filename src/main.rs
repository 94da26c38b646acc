use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use metro_connectivity::domain::connectivity::connectivity_store::ConnectivityStore;
use metro_connectivity::domain::connectivity::state_listener::StateHistoryListener;
use metro_connectivity::{load_scenario, logger};

/// Replays a metro connectivity scenario and prints where every request ended up.
#[derive(Debug, Parser)]
#[command(name = "metro-connectivity", version)]
struct Args {
    /// Scenario JSON file with the requests and the events to replay.
    #[arg(short, long)]
    scenario: String,

    /// Also print every applied event.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init();

    let scenario = load_scenario(&args.scenario).with_context(|| format!("loading scenario '{}'", args.scenario))?;

    let store = ConnectivityStore::new();
    let history = Arc::new(StateHistoryListener::new());
    store.add_listener(history.clone());

    let outcomes = scenario.apply(&store).context("replaying scenario")?;

    if args.verbose {
        for (index, outcome) in outcomes.iter().enumerate() {
            println!("#{:<3} {:<38} {:<60} accepted={:<5} state={}", index, outcome.connectivity.as_str(), outcome.description, outcome.accepted, outcome.state);
        }
        println!();
    }

    for id in store.ids() {
        let summary = store.with_request(&id, |request| {
            format!(
                "{} state={} hops={} bandwidth={} latency={:?} optical_capacity_ok={:?} realizing={} established={} all_established={} none_established={}",
                request.id(),
                request.state(),
                request.links().len(),
                request.bandwidth(),
                request.latency(),
                request.optical_capacity().map(|capacity| capacity.covers(request.bandwidth())),
                request.realizing_link_count(),
                request.established_link_count(),
                request.is_all_realizing_links_established(),
                request.is_no_realizing_link_established(),
            )
        })?;
        println!("{}", summary);

        let transitions: Vec<String> = history.history(&id).iter().map(|t| format!("{}->{}", t.from, t.to)).collect();
        if !transitions.is_empty() {
            println!("    history: {}", transitions.join(", "));
        }
    }

    Ok(())
}
