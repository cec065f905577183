mod deadline;
mod distances;
mod error;
mod network;
mod search;
mod split;

use anyhow::Result;
use log::info;

use crate::Options;

pub use deadline::Deadline;
pub use distances::{DistanceMatrix, UNREACHABLE};
pub use error::{ParseError, SolveError};
pub use network::{Network, ValveId, LABEL_SPACE};
pub use search::{explore, FlowingValves, Progress, Pruning, StateTable, ValveSet};
pub use split::{best_split, MAX_SPLIT_VALVES};

const SOLO_MINUTES: u32 = 30;
const PAIR_MINUTES: u32 = 26;

pub fn solve(input: &str, options: &Options) -> Result<(u64, u64)> {
    let mut network = Network::parse(input)?;
    network.distances.relax();
    let valves = FlowingValves::new(network.rates())?;
    let deadline = Deadline::from_timeout(options.timeout);

    let part1 = most_pressure(&network, &valves, options.pruning, deadline)?;
    let part2 = most_pressure_in_pair(&network, &valves, options.pruning, deadline)?;
    Ok((part1, part2))
}

/// `network` must already be relaxed.
pub fn most_pressure(
    network: &Network,
    valves: &FlowingValves,
    pruning: Pruning,
    deadline: Deadline,
) -> Result<u64, SolveError> {
    let table = explore(
        &network.distances,
        valves,
        ValveId::START,
        SOLO_MINUTES,
        pruning,
        deadline,
    )?;
    let best = table.max_released();
    if let Some((set, _)) = table.iter().find(|(_, p)| p.released == best) {
        info!(
            "alone: {} released by opening {:?}",
            best,
            valves.members(set).map(|v| v.to_string()).collect::<Vec<_>>()
        );
    }
    Ok(best)
}

pub fn most_pressure_in_pair(
    network: &Network,
    valves: &FlowingValves,
    pruning: Pruning,
    deadline: Deadline,
) -> Result<u64, SolveError> {
    let table = explore(
        &network.distances,
        valves,
        ValveId::START,
        PAIR_MINUTES,
        pruning,
        deadline,
    )?;
    best_split(&table, valves, deadline)
}
