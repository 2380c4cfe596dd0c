//! Bookkeeping for the numbered rare collectibles

use std::collections::BTreeSet;

use crate::consts::SPECIAL_COUNT;

/// Which special ids have appeared and which have been caught this round.
///
/// Both sets only ever grow until the round is reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialLedger {
    universe: Vec<u8>,
    caught: BTreeSet<u8>,
    spawned: BTreeSet<u8>,
}

impl Default for SpecialLedger {
    fn default() -> Self {
        Self::new((1..=SPECIAL_COUNT).collect())
    }
}

impl SpecialLedger {
    pub fn new(universe: Vec<u8>) -> Self {
        Self {
            universe,
            caught: BTreeSet::new(),
            spawned: BTreeSet::new(),
        }
    }

    pub fn universe(&self) -> &[u8] {
        &self.universe
    }

    pub fn caught(&self) -> &BTreeSet<u8> {
        &self.caught
    }

    pub fn spawned(&self) -> &BTreeSet<u8> {
        &self.spawned
    }

    /// Ids that have never appeared
    pub fn unspawned(&self) -> Vec<u8> {
        self.universe
            .iter()
            .copied()
            .filter(|id| !self.spawned.contains(id))
            .collect()
    }

    /// Ids that have not been caught
    pub fn uncaught(&self) -> Vec<u8> {
        self.universe
            .iter()
            .copied()
            .filter(|id| !self.caught.contains(id))
            .collect()
    }

    pub fn mark_spawned(&mut self, id: u8) {
        self.spawned.insert(id);
    }

    /// Record a catch. Returns false if the id was already caught.
    pub fn mark_caught(&mut self, id: u8) -> bool {
        self.caught.insert(id)
    }

    pub fn all_caught(&self) -> bool {
        self.universe.iter().all(|id| self.caught.contains(id))
    }

    pub fn clear(&mut self) {
        self.caught.clear();
        self.spawned.clear();
    }
}
