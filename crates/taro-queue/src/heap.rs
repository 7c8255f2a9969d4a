//! `SearchQueue` — indexed binary min-heap over a bounded state pool.
//!
//! Keyed by `(cost, arrival_tick, edge_id)` ascending — lower cost wins,
//! `arrival_tick` breaks ties so earlier arrivals are preferred, `edge_id`
//! breaks remaining ties for determinism (`spec.md` §4.8).
//!
//! States are drawn from a fixed-size slot arena sized at construction
//! (typically the planner's per-row frontier budget, not `edge_count` — the
//! frontier is expected to be far smaller than the full graph). An edge can
//! have at most one live entry at a time: a second `insert` for an edge
//! already present performs decrease-key instead of allocating a new slot.
//! `extract_min` hands ownership of a slot's data to the caller as
//! [`ExtractedState`]; the slot is not returned to the free list until the
//! caller calls [`SearchQueue::recycle`] — so a caller that drops an
//! `ExtractedState` without recycling it leaks that slot, eventually
//! exhausting the pool, exactly as `spec.md` describes.

use crate::error::{QueueError, QueueResult};

#[derive(Copy, Clone, Debug)]
struct Entry {
    edge_id: u32,
    arrival_tick: i64,
    cost: f64,
    pred: Option<u32>,
}

#[inline]
fn key_of(e: &Entry) -> (f64, i64, u32) {
    (e.cost, e.arrival_tick, e.edge_id)
}

#[inline]
fn better(a: &Entry, b: &Entry) -> bool {
    key_of(a) < key_of(b)
}

/// A state extracted from the queue. Must be passed to
/// [`SearchQueue::recycle`] once the caller is done with it (e.g. after
/// following `pred` to reconstruct a path segment).
pub struct ExtractedState {
    pub edge_id: u32,
    pub arrival_tick: i64,
    pub cost: f64,
    pub pred: Option<u32>,
    slot: u32,
}

pub struct SearchQueue {
    /// Exclusive upper bound on valid edge ids (`edge_count`).
    max_edge_id: u32,
    /// Number of simultaneously live (inserted but not yet recycled) states
    /// the pool holds — typically the planner's per-row frontier budget,
    /// much smaller than `max_edge_id`.
    capacity: usize,
    slots: Vec<Option<Entry>>,
    free_slots: Vec<u32>,
    /// edge_id -> pool slot currently holding it, if the edge has a live
    /// (not-yet-extracted) entry.
    slot_of_edge: std::collections::HashMap<u32, u32>,
    /// pool slot -> position within `heap`, if currently in the heap.
    heap_pos: Vec<Option<usize>>,
    heap: Vec<u32>,
}

impl SearchQueue {
    pub fn new(max_edge_id: u32, capacity: usize) -> Self {
        Self {
            max_edge_id,
            capacity,
            slots: vec![None; capacity],
            free_slots: (0..capacity as u32).rev().collect(),
            slot_of_edge: std::collections::HashMap::new(),
            heap_pos: vec![None; capacity],
            heap: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Insert `edge` with `(cost, arrival_tick, pred)`, or — if `edge`
    /// already has a live entry — decrease-key iff the new key is strictly
    /// better, otherwise ignore the call entirely.
    pub fn insert(&mut self, edge: u32, arrival_tick: i64, cost: f64, pred: Option<u32>) -> QueueResult<()> {
        if edge >= self.max_edge_id {
            return Err(QueueError::InvalidEdgeId { edge, capacity: self.max_edge_id as usize });
        }
        let candidate = Entry { edge_id: edge, arrival_tick, cost, pred };

        if let Some(&slot) = self.slot_of_edge.get(&edge) {
            let current = self.slots[slot as usize].expect("slot_of_edge points at a live slot");
            if better(&candidate, &current) {
                self.slots[slot as usize] = Some(candidate);
                self.sift_up(self.heap_pos[slot as usize].expect("live slot is in the heap"));
            }
            return Ok(());
        }

        let slot = self.free_slots.pop().ok_or(QueueError::PoolExhausted { capacity: self.capacity })?;
        self.slots[slot as usize] = Some(candidate);
        self.slot_of_edge.insert(edge, slot);
        let pos = self.heap.len();
        self.heap.push(slot);
        self.heap_pos[slot as usize] = Some(pos);
        self.sift_up(pos);
        Ok(())
    }

    /// Remove and return the minimum-key entry.
    pub fn extract_min(&mut self) -> QueueResult<ExtractedState> {
        if self.heap.is_empty() {
            return Err(QueueError::ExtractFromEmpty);
        }
        let min_slot = self.heap[0];
        let last = self.heap.pop().unwrap();
        if !self.heap.is_empty() {
            self.heap[0] = last;
            self.heap_pos[last as usize] = Some(0);
            self.sift_down(0);
        }
        self.heap_pos[min_slot as usize] = None;

        let entry = self.slots[min_slot as usize].take().expect("min slot held a live entry");
        self.slot_of_edge.remove(&entry.edge_id);

        Ok(ExtractedState {
            edge_id: entry.edge_id,
            arrival_tick: entry.arrival_tick,
            cost: entry.cost,
            pred: entry.pred,
            slot: min_slot,
        })
    }

    /// The priority-key cost of the next [`extract_min`](Self::extract_min)
    /// call, without removing it — used by the matrix planner to decide
    /// whether the pending frontier can still beat an already-resolved
    /// target.
    pub fn peek_min_cost(&self) -> Option<f64> {
        self.heap.first().map(|&slot| self.slots[slot as usize].as_ref().unwrap().cost)
    }

    /// Return an extracted state's slot to the free list.
    pub fn recycle(&mut self, state: ExtractedState) {
        self.free_slots.push(state.slot);
    }

    /// Reset to empty, recovering every slot even if some `ExtractedState`s
    /// were never recycled.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.slots.iter_mut().for_each(|s| *s = None);
        self.heap_pos.iter_mut().for_each(|p| *p = None);
        self.slot_of_edge.clear();
        self.free_slots = (0..self.capacity as u32).rev().collect();
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap_key_better(i, parent) {
                self.swap_heap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut smallest = i;
            if left < self.heap.len() && self.heap_key_better(left, smallest) {
                smallest = left;
            }
            if right < self.heap.len() && self.heap_key_better(right, smallest) {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.swap_heap(i, smallest);
            i = smallest;
        }
    }

    #[inline]
    fn heap_key_better(&self, a: usize, b: usize) -> bool {
        let ea = self.slots[self.heap[a] as usize].as_ref().unwrap();
        let eb = self.slots[self.heap[b] as usize].as_ref().unwrap();
        better(ea, eb)
    }

    #[inline]
    fn swap_heap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.heap_pos[self.heap[a] as usize] = Some(a);
        self.heap_pos[self.heap[b] as usize] = Some(b);
    }
}
