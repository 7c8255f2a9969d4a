//! Fixed-size visited-edge bitset (`spec.md` §4.8).

use fixedbitset::FixedBitSet;

pub struct VisitedSet {
    bits: FixedBitSet,
}

impl VisitedSet {
    pub fn new(capacity: usize) -> Self {
        Self { bits: FixedBitSet::with_capacity(capacity) }
    }

    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Mark `edge` visited. Returns `true` the first time it is marked,
    /// `false` if it was already visited.
    pub fn mark_visited(&mut self, edge: u32) -> bool {
        let idx = edge as usize;
        if self.bits.contains(idx) {
            false
        } else {
            self.bits.insert(idx);
            true
        }
    }

    pub fn is_visited(&self, edge: u32) -> bool {
        self.bits.contains(edge as usize)
    }

    /// Reset every bit. O(capacity / 64).
    pub fn clear(&mut self) {
        self.bits.clear();
    }
}
