use std::fmt;

use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use rustc_hash::FxHashMap;

use super::distances::DistanceMatrix;
use super::error::ParseError;

pub const LABEL_SPACE: usize = 26 * 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValveId(u16);

impl ValveId {
    /// `AA`, where every walk starts.
    pub const START: ValveId = ValveId(0);

    pub fn from_label(label: &str) -> Option<Self> {
        match *label.as_bytes() {
            [a @ b'A'..=b'Z', b @ b'A'..=b'Z'] => {
                Some(Self(26 * u16::from(a - b'A') + u16::from(b - b'A')))
            }
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ValveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first = (b'A' + (self.0 / 26) as u8) as char;
        let second = (b'A' + (self.0 % 26) as u8) as char;
        write!(f, "{}{}", first, second)
    }
}

#[derive(Debug)]
pub struct Network {
    pub distances: DistanceMatrix,
    rates: IndexMap<ValveId, u32>,
}

impl Network {
    /// Expects one line per valve such as
    /// `Valve BB has flow rate=13; tunnels lead to valves CC, AA`.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let valve_re = Regex::new("^Valve ([A-Z][A-Z]) ")?;
        let rate_re = Regex::new("rate=([0-9]+)")?;
        let tunnels_re = Regex::new("valves? ((?:[A-Z][A-Z], )*[A-Z][A-Z])$")?;

        let mut distances = DistanceMatrix::new();
        let mut rates = IndexMap::new();
        let mut described: FxHashMap<ValveId, usize> = FxHashMap::default();

        for (line, text) in input.lines().enumerate() {
            let line = line + 1;
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            let from = valve_re
                .captures(text)
                .and_then(|c| ValveId::from_label(&c[1]))
                .ok_or_else(|| ParseError::MissingValve {
                    line,
                    text: text.to_string(),
                })?;
            let rate = rate_re
                .captures(text)
                .ok_or_else(|| ParseError::MissingRate {
                    line,
                    text: text.to_string(),
                })?;
            let rate: u32 = rate[1].parse().map_err(|_| ParseError::InvalidRate {
                line,
                rate: rate[1].to_string(),
            })?;
            let tunnels = tunnels_re
                .captures(text)
                .ok_or_else(|| ParseError::MissingTunnels {
                    line,
                    text: text.to_string(),
                })?;

            if let Some(&first) = described.get(&from) {
                return Err(ParseError::DuplicateValve {
                    line,
                    first,
                    label: from.to_string(),
                });
            }
            described.insert(from, line);

            for to in tunnels[1].split(", ").filter_map(ValveId::from_label) {
                distances.link(from, to);
            }
            if rate > 0 {
                rates.insert(from, rate);
            }
        }

        debug!(
            "parsed {} valves, {} with a positive flow rate",
            described.len(),
            rates.len()
        );
        Ok(Self { distances, rates })
    }

    pub fn rates(&self) -> &IndexMap<ValveId, u32> {
        &self.rates
    }
}
