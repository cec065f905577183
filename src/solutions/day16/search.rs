use std::collections::hash_map::Entry;

use indexmap::IndexMap;
use log::debug;
use rustc_hash::FxHashMap;

use super::deadline::Deadline;
use super::distances::DistanceMatrix;
use super::error::SolveError;
use super::network::ValveId;

const DEADLINE_POLL: u64 = 4096;

/// Valves with a positive flow rate, each owning one bit of a [`ValveSet`].
#[derive(Debug, Clone)]
pub struct FlowingValves {
    valves: Vec<(ValveId, u32)>,
}

impl FlowingValves {
    pub const MAX: usize = u32::BITS as usize;

    pub fn new(rates: &IndexMap<ValveId, u32>) -> Result<Self, SolveError> {
        let mut valves: Vec<_> = rates
            .iter()
            .filter(|(_, &rate)| rate > 0)
            .map(|(&id, &rate)| (id, rate))
            .collect();
        if valves.len() > Self::MAX {
            return Err(SolveError::TooManyValves {
                count: valves.len(),
                max: Self::MAX,
            });
        }
        valves.sort_unstable();
        Ok(Self { valves })
    }

    pub fn len(&self) -> usize {
        self.valves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, ValveId, u32)> + '_ {
        self.valves
            .iter()
            .enumerate()
            .map(|(bit, &(id, rate))| (bit, id, rate))
    }

    pub fn all(&self) -> ValveSet {
        ValveSet::full(self.len())
    }

    pub fn members(&self, set: ValveSet) -> impl Iterator<Item = ValveId> + '_ {
        self.iter()
            .filter(move |&(bit, _, _)| set.contains(bit))
            .map(|(_, id, _)| id)
    }
}

/// Order-independent fingerprint of opened valves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValveSet(u32);

impl ValveSet {
    pub const EMPTY: ValveSet = ValveSet(0);

    pub fn full(n: usize) -> Self {
        debug_assert!(n <= FlowingValves::MAX);
        Self(u32::MAX.checked_shr(u32::BITS - n as u32).unwrap_or(0))
    }

    pub(super) fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, bit: usize) -> bool {
        self.0 & (1 << bit) != 0
    }

    #[must_use]
    pub fn with(self, bit: usize) -> Self {
        Self(self.0 | (1 << bit))
    }

    #[must_use]
    pub fn without(self, other: ValveSet) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn is_disjoint(self, other: ValveSet) -> bool {
        self.0 & other.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Every subset of `self`, from `self` itself down to the empty set.
    pub fn subsets(self) -> Subsets {
        Subsets {
            of: self.0,
            next: Some(self.0),
        }
    }
}

pub struct Subsets {
    of: u32,
    next: Option<u32>,
}

impl Iterator for Subsets {
    type Item = ValveSet;

    fn next(&mut self) -> Option<ValveSet> {
        let current = self.next?;
        self.next = current.checked_sub(1).map(|n| n & self.of);
        Some(ValveSet(current))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub minutes_left: u32,
    pub released: u64,
}

/// Best pressure release found for each exact set of opened valves.
#[derive(Debug, Default)]
pub struct StateTable {
    best: FxHashMap<ValveSet, Progress>,
}

impl StateTable {
    /// Stores `progress` unless `set` already has an equal or better value.
    fn record(&mut self, set: ValveSet, progress: Progress) -> bool {
        match self.best.entry(set) {
            Entry::Occupied(e) if e.get().released >= progress.released => false,
            Entry::Occupied(mut e) => {
                e.insert(progress);
                true
            }
            Entry::Vacant(e) => {
                e.insert(progress);
                true
            }
        }
    }

    pub fn get(&self, set: ValveSet) -> Option<&Progress> {
        self.best.get(&set)
    }

    /// 0 for sets no path opened exactly.
    pub fn best(&self, set: ValveSet) -> u64 {
        self.get(set).map_or(0, |p| p.released)
    }

    pub fn max_released(&self) -> u64 {
        self.best.values().map(|p| p.released).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ValveSet, &Progress)> + '_ {
        self.best.iter().map(|(&set, progress)| (set, progress))
    }
}

/// When a partial path stops being extended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pruning {
    /// Once an earlier path with the same opened set, ending at the same
    /// valve, had at least as much pressure and time left.
    #[default]
    Exact,
    /// Once its opened set already has an equal or better recorded value.
    ///
    /// Faster, but can under-report: a cheaper order that ends in a better
    /// position is dropped if it released less so far.
    VisitedSet,
}

struct Search<'a> {
    distances: &'a DistanceMatrix,
    valves: &'a FlowingValves,
    pruning: Pruning,
    deadline: Deadline,
    table: StateTable,
    seen: FxHashMap<(ValveSet, ValveId), Progress>,
    steps: u64,
}

/// Walks every order of opening flowing valves from `start` within `minutes`.
///
/// Moving to a valve costs its distance plus one minute to open it, after
/// which it releases its rate for every remaining minute. Valves that cannot
/// be opened with at least one minute to spare are never visited.
pub fn explore(
    distances: &DistanceMatrix,
    valves: &FlowingValves,
    start: ValveId,
    minutes: u32,
    pruning: Pruning,
    deadline: Deadline,
) -> Result<StateTable, SolveError> {
    let mut search = Search {
        distances,
        valves,
        pruning,
        deadline,
        table: StateTable::default(),
        seen: FxHashMap::default(),
        steps: 0,
    };
    search.visit(
        start,
        ValveSet::EMPTY,
        Progress {
            minutes_left: minutes,
            released: 0,
        },
    )?;
    debug!(
        "explored {} search nodes from {} in {} minutes, {} opened sets recorded",
        search.steps,
        start,
        minutes,
        search.table.len()
    );
    Ok(search.table)
}

impl Search<'_> {
    fn visit(
        &mut self,
        at: ValveId,
        opened: ValveSet,
        progress: Progress,
    ) -> Result<(), SolveError> {
        self.steps += 1;
        if self.steps % DEADLINE_POLL == 0 {
            self.deadline.check()?;
        }

        let valves = self.valves;
        for (bit, valve, rate) in valves.iter() {
            if valve == at || opened.contains(bit) {
                continue;
            }
            let Some(cost) = self.distances.get(at, valve).map(|d| d + 1) else {
                continue;
            };
            let minutes_left = match progress.minutes_left.checked_sub(cost) {
                Some(m) if m > 0 => m,
                _ => continue,
            };
            let next = Progress {
                minutes_left,
                released: progress.released + u64::from(minutes_left) * u64::from(rate),
            };
            let opened = opened.with(bit);

            let improved = self.table.record(opened, next);
            let extend = match self.pruning {
                Pruning::VisitedSet => improved,
                Pruning::Exact => !self.dominated(opened, valve, next),
            };
            if extend {
                self.visit(valve, opened, next)?;
            }
        }
        Ok(())
    }

    fn dominated(&mut self, opened: ValveSet, at: ValveId, progress: Progress) -> bool {
        match self.seen.entry((opened, at)) {
            Entry::Occupied(mut e) => {
                let seen = *e.get();
                if seen.released >= progress.released && seen.minutes_left >= progress.minutes_left
                {
                    return true;
                }
                if progress.released > seen.released {
                    e.insert(progress);
                }
                false
            }
            Entry::Vacant(e) => {
                e.insert(progress);
                false
            }
        }
    }
}
