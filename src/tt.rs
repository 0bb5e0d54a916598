//! Transposition table for caching search results.
//!
//! A direct-mapped table indexed by `hash % capacity` with one entry per slot.
//! All access is serialized through a single table-wide lock. A table created
//! with zero capacity is disabled: `store` and `probe` return without touching
//! the backing storage.

use std::mem;

use parking_lot::Mutex;

use crate::board::Move;

/// Default transposition table size in MB
pub const DEFAULT_TT_MB: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

/// Terminal classification of a searched node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameResult {
    #[default]
    None,
    Stalemate,
    Checkmate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub hash: u64,
    pub depth: i32,
    pub best_move: Option<Move>,
    pub score: i32,
    pub bound_type: BoundType,
    pub result: GameResult,
}

/// Thread-safe direct-mapped transposition table.
pub struct TranspositionTable {
    slots: Mutex<Vec<Option<TTEntry>>>,
    capacity: usize,
}

impl TranspositionTable {
    /// Create a table of roughly `size_mb` megabytes. Zero gives a disabled table.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let capacity = Self::capacity_for(size_mb);
        TranspositionTable {
            slots: Mutex::new(vec![None; capacity]),
            capacity,
        }
    }

    /// A zero-capacity table that never stores anything
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(0)
    }

    fn capacity_for(size_mb: usize) -> usize {
        (size_mb * 1024 * 1024) / mem::size_of::<Option<TTEntry>>()
    }

    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash % self.capacity as u64) as usize
    }

    /// Look up `hash`. A hit requires the stored hash to equal the queried one.
    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TTEntry> {
        if !self.is_enabled() {
            return None;
        }
        let idx = self.index(hash);
        let slots = self.slots.lock();
        slots[idx].filter(|entry| entry.hash == hash)
    }

    /// Store a search result.
    ///
    /// A slot holding a different position is always overwritten. A slot holding
    /// the same position is only overwritten by a result of equal or greater depth.
    pub fn store(
        &self,
        hash: u64,
        depth: i32,
        best_move: Option<Move>,
        score: i32,
        bound_type: BoundType,
        result: GameResult,
    ) {
        if !self.is_enabled() {
            return;
        }
        let idx = self.index(hash);
        let mut slots = self.slots.lock();
        let slot = &mut slots[idx];
        if let Some(existing) = slot {
            if existing.hash == hash && depth < existing.depth {
                return;
            }
        }
        *slot = Some(TTEntry {
            hash,
            depth,
            best_move,
            score,
            bound_type,
            result,
        });
    }

    /// Returns hash table fullness in per mille (0-1000).
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        if !self.is_enabled() {
            return 0;
        }
        // Sample the first 1000 slots
        let slots = self.slots.lock();
        let sample = slots.len().min(1000);
        let used = slots.iter().take(sample).filter(|s| s.is_some()).count();
        ((used * 1000) / sample) as u32
    }

    /// Clear all entries from the table.
    pub fn clear(&self) {
        let mut slots = self.slots.lock();
        slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Reallocate the table at a new size, dropping every entry.
    pub fn resize(&mut self, size_mb: usize) {
        let capacity = Self::capacity_for(size_mb);
        *self.slots.get_mut() = vec![None; capacity];
        self.capacity = capacity;
    }
}
