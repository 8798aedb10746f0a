use std::collections::{BTreeSet, VecDeque};

use craftris_common::{Coord, CubeType};
use serde::Serialize;

use crate::element::GridElement;
use crate::grid::Grid;

/// A maximal group of same-type cubes connected through shared faces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Combo {
    pub kind: CubeType,
    coords: BTreeSet<Coord>,
}

impl Combo {
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.coords.contains(&coord)
    }

    /// Member coordinates in ascending order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords.iter().copied()
    }

    /// Resolve members against the grid they were detected in.
    pub fn elements<'g>(&self, grid: &'g Grid) -> Vec<(Coord, &'g GridElement)> {
        self.coords
            .iter()
            .filter_map(|c| grid.pull(*c).map(|e| (*c, e)))
            .collect()
    }
}

/// Result of a combo search seeded from a set of cells.
///
/// Each seed that is occupied and not already part of an earlier combo opens a
/// new combo, so seeds in the same region collapse into one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Combos {
    found: Vec<Combo>,
}

impl Combos {
    /// Flood-fill from every seed over same-type face neighbors.
    pub fn detect(grid: &Grid, seeds: impl IntoIterator<Item = Coord>) -> Self {
        let _span = tracing::info_span!("detect_combos").entered();
        let mut visited: BTreeSet<Coord> = BTreeSet::new();
        let mut found = Vec::new();

        for seed in seeds {
            if visited.contains(&seed) {
                continue;
            }
            let Some(start) = grid.pull(seed) else {
                tracing::trace!(%seed, "seed cell is empty, skipped");
                continue;
            };
            let kind = start.kind();
            visited.insert(seed);

            let mut coords = BTreeSet::from([seed]);
            let mut frontier = VecDeque::from([seed]);
            while let Some(current) = frontier.pop_front() {
                for (neighbor, element) in grid.find_neighbors(current) {
                    if element.kind() != kind || visited.contains(&neighbor) {
                        continue;
                    }
                    visited.insert(neighbor);
                    coords.insert(neighbor);
                    frontier.push_back(neighbor);
                }
            }

            tracing::trace!(%seed, %kind, size = coords.len(), "combo closed");
            found.push(Combo { kind, coords });
        }

        tracing::debug!(combos = found.len(), "combo detection complete");
        Self { found }
    }

    pub fn found(&self) -> &[Combo] {
        &self.found
    }

    pub fn len(&self) -> usize {
        self.found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }

    /// Combos with at least `size` members. What counts as scoring is up to the caller.
    pub fn at_least(&self, size: usize) -> impl Iterator<Item = &Combo> {
        self.found.iter().filter(move |c| c.len() >= size)
    }
}

impl IntoIterator for Combos {
    type Item = Combo;
    type IntoIter = std::vec::IntoIter<Combo>;

    fn into_iter(self) -> Self::IntoIter {
        self.found.into_iter()
    }
}
