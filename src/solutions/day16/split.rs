use log::debug;
use rayon::prelude::*;

use super::deadline::Deadline;
use super::error::SolveError;
use super::search::{FlowingValves, StateTable, ValveSet};

pub const MAX_SPLIT_VALVES: usize = 20;

/// Pairs every subset of the flowing valves with every subset of its
/// complement. Sets the search never reached count as 0.
pub fn best_split(
    table: &StateTable,
    valves: &FlowingValves,
    deadline: Deadline,
) -> Result<u64, SolveError> {
    if valves.len() > MAX_SPLIT_VALVES {
        return Err(SolveError::TooManyValves {
            count: valves.len(),
            max: MAX_SPLIT_VALVES,
        });
    }

    let mut best = vec![0u64; 1 << valves.len()];
    for (set, progress) in table.iter() {
        best[set.bits() as usize] = progress.released;
    }

    let all = valves.all();
    let total = (0..=all.bits())
        .into_par_iter()
        .map(|bits| -> Result<u64, SolveError> {
            deadline.check()?;
            let mine = ValveSet::from_bits(bits);
            Ok(all
                .without(mine)
                .subsets()
                .map(|theirs| best[mine.bits() as usize] + best[theirs.bits() as usize])
                .max()
                .unwrap_or(0))
        })
        .try_reduce(|| 0, |a, b| Ok(a.max(b)))?;

    debug!(
        "best split over {} flowing valves releases {}",
        valves.len(),
        total
    );
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    use indexmap::IndexMap;

    use crate::solutions::day16::distances::DistanceMatrix;
    use crate::solutions::day16::network::ValveId;
    use crate::solutions::day16::search::{explore, Pruning};

    fn id(label: &str) -> ValveId {
        ValveId::from_label(label).unwrap()
    }

    /// Star around AA with one flowing valve at the end of each arm.
    fn star(arms: &[(&str, u32)], minutes: u32) -> (StateTable, FlowingValves) {
        let mut distances = DistanceMatrix::new();
        let mut rates = IndexMap::new();
        for &(label, rate) in arms {
            distances.link(ValveId::START, id(label));
            rates.insert(id(label), rate);
        }
        distances.relax();
        let valves = FlowingValves::new(&rates).unwrap();
        let table = explore(
            &distances,
            &valves,
            ValveId::START,
            minutes,
            Pruning::Exact,
            Deadline::never(),
        )
        .unwrap();
        (table, valves)
    }

    #[test]
    fn test_split_star() {
        // Alone: BB (24 * 10) then CC (21 * 10). Together each opens one.
        let (table, valves) = star(&[("BB", 10), ("CC", 10)], 26);
        assert_eq!(table.max_released(), 450);
        assert_eq!(best_split(&table, &valves, Deadline::never()), Ok(480));
    }

    #[test]
    fn test_split_is_at_least_any_side() {
        let (table, valves) = star(&[("BB", 3), ("CC", 7), ("DD", 11)], 10);
        let split = best_split(&table, &valves, Deadline::never()).unwrap();
        for (set, progress) in table.iter() {
            assert!(split >= progress.released);
            for theirs in valves.all().without(set).subsets() {
                assert!(set.is_disjoint(theirs));
                assert!(split >= progress.released + table.best(theirs));
            }
        }
    }

    #[test]
    fn test_split_without_valves() {
        let (table, valves) = star(&[], 26);
        assert_eq!(best_split(&table, &valves, Deadline::never()), Ok(0));
    }

    #[test]
    fn test_split_too_many_valves() {
        let rates: IndexMap<_, _> = (0..21u8)
            .map(|i| (id(&format!("B{}", (b'A' + i) as char)), 1))
            .collect();
        let valves = FlowingValves::new(&rates).unwrap();
        assert_eq!(
            best_split(&StateTable::default(), &valves, Deadline::never()),
            Err(SolveError::TooManyValves { count: 21, max: 20 })
        );
    }

    #[test]
    fn test_split_cancelled() {
        let (table, valves) = star(&[("BB", 10), ("CC", 10)], 26);
        let deadline = Deadline::after(std::time::Duration::ZERO);
        assert_eq!(
            best_split(&table, &valves, deadline),
            Err(SolveError::Cancelled)
        );
    }
}
