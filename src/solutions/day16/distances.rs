use std::fmt;

use super::network::{ValveId, LABEL_SPACE};

/// Sentinel for "no known path".
pub const UNREACHABLE: u32 = u32::MAX;

/// Hop distances between every pair of the two-letter label space.
///
/// Starts out as an adjacency matrix (`0` on the diagonal, `1` for tunnels,
/// [`UNREACHABLE`] elsewhere) and holds shortest distances after [`relax`].
///
/// [`relax`]: DistanceMatrix::relax
#[derive(Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    cells: Vec<u32>,
}

impl DistanceMatrix {
    pub fn new() -> Self {
        let cells = (0..LABEL_SPACE * LABEL_SPACE)
            .map(|i| {
                if i / LABEL_SPACE == i % LABEL_SPACE {
                    0
                } else {
                    UNREACHABLE
                }
            })
            .collect();
        Self { cells }
    }

    pub fn link(&mut self, a: ValveId, b: ValveId) {
        if a != b {
            self.cells[a.index() * LABEL_SPACE + b.index()] = 1;
            self.cells[b.index() * LABEL_SPACE + a.index()] = 1;
        }
    }

    pub fn get(&self, from: ValveId, to: ValveId) -> Option<u32> {
        match self.cells[from.index() * LABEL_SPACE + to.index()] {
            UNREACHABLE => None,
            d => Some(d),
        }
    }

    /// Returns whether any distance got shorter.
    pub fn relax(&mut self) -> bool {
        let n = LABEL_SPACE;
        let mut changed = false;
        for k in 0..n {
            for i in 0..n {
                let ik = self.cells[i * n + k];
                if ik == UNREACHABLE {
                    continue;
                }
                for j in 0..n {
                    let kj = self.cells[k * n + j];
                    if kj == UNREACHABLE {
                        continue;
                    }
                    // Both legs are bounded by the label space, no overflow.
                    let via = ik + kj;
                    let ij = &mut self.cells[i * n + j];
                    if via < *ij {
                        *ij = via;
                        changed = true;
                    }
                }
            }
        }
        changed
    }
}

impl Default for DistanceMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let links = self.cells.iter().filter(|&&d| d == 1).count();
        f.debug_struct("DistanceMatrix")
            .field("size", &LABEL_SPACE)
            .field("direct_links", &links)
            .finish()
    }
}
