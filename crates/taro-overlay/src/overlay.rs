//! `LiveOverlay` — concurrent per-edge speed-factor overrides.
//!
//! Reads are lock-free (`dashmap::DashMap` sharded reads); writes (batch
//! ingest, scheduled sweep) are serialized by a single reentrant mutex so
//! that a sweep triggered from inside an ingest call (capacity eviction
//! policies both re-sweep mid-batch) never deadlocks against the same
//! writer thread re-entering.
//!
//! `spec.md` §4.6 edge state:
//!
//! | State    | Condition                          | Multiplier |
//! |----------|-------------------------------------|------------|
//! | EXPIRED  | `valid_until_ticks <= now_ticks`     | `1.0`      |
//! | BLOCKED  | `speed_factor == 0.0`                | `+inf`     |
//! | ACTIVE   | otherwise                           | `1 / speed_factor` |

use std::collections::HashSet;

use dashmap::DashMap;
use parking_lot::ReentrantMutex;
use tracing::debug;

/// Neutral multiplier for an edge with no live override.
pub const NEUTRAL_MULTIPLIER: f32 = 1.0;

#[derive(Copy, Clone, Debug, PartialEq)]
struct OverlayEntry {
    speed_factor: f32,
    valid_until_ticks: i64,
}

/// Classification of an edge's live-override state at a given instant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EdgeState {
    /// No override present (or it was just opportunistically expired).
    Neutral,
    Expired,
    Blocked,
    Active(f32),
}

/// One caller-supplied speed-factor override.
#[derive(Copy, Clone, Debug)]
pub struct BatchUpdate {
    pub edge_id: u32,
    pub speed_factor: f32,
    pub valid_until_ticks: i64,
}

impl BatchUpdate {
    /// Build from the relative wire form (`spec.md` §6): `valid_until_ticks
    /// = now_ticks + ttl_ticks`. `None` on overflow. A negative `ttl_ticks`
    /// is not rejected here — it simply produces a `valid_until_ticks` at or
    /// before `now_ticks`, which `ingest_batch` already counts as expired.
    pub fn from_relative(edge_id: u32, speed_factor: f32, now_ticks: i64, ttl_ticks: i64) -> Option<Self> {
        let valid_until_ticks = now_ticks.checked_add(ttl_ticks)?;
        Some(Self { edge_id, speed_factor, valid_until_ticks })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CapacityPolicy {
    RejectBatch,
    EvictExpiredThenReject,
    EvictOldestExpiry,
}

/// Caller-populated overlay sizing and cleanup configuration
/// (`spec.md` §6's "CLI/env boundary, consumed not defined here").
#[derive(Copy, Clone, Debug)]
pub struct OverlayConfig {
    /// Maximum number of distinct edge overrides held at once.
    pub capacity: usize,
    /// Upper bound on entries removed per sweep (ingest-triggered or
    /// scheduled), so a sweep never holds the write lock unboundedly long.
    pub cleanup_budget: usize,
    /// Whether a read that finds an expired entry may opportunistically
    /// remove it (at most one CAS-style removal per read).
    pub read_cleanup: bool,
    pub capacity_policy: CapacityPolicy,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            capacity: 1_000_000,
            cleanup_budget: 4_096,
            read_cleanup: true,
            capacity_policy: CapacityPolicy::EvictExpiredThenReject,
        }
    }
}

/// Summary of one `ingest_batch` call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub accepted: usize,
    pub rejected_expired: usize,
    pub rejected_capacity: usize,
    pub expired_removed: usize,
    pub oldest_evicted: usize,
}

pub struct LiveOverlay {
    entries: DashMap<u32, OverlayEntry>,
    write_lock: ReentrantMutex<()>,
    config: OverlayConfig,
}

impl LiveOverlay {
    pub fn new(config: OverlayConfig) -> Self {
        Self { entries: DashMap::new(), write_lock: ReentrantMutex::new(()), config }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lock-free read of `edge_id`'s state as of `now_ticks`. An expired
    /// entry is opportunistically removed (at most once per call) when
    /// `OverlayConfig::read_cleanup` is set.
    pub fn edge_state(&self, edge_id: u32, now_ticks: i64) -> EdgeState {
        let Some(entry) = self.entries.get(&edge_id) else {
            return EdgeState::Neutral;
        };
        let e = *entry;
        drop(entry);

        if e.valid_until_ticks <= now_ticks {
            if self.config.read_cleanup {
                self.entries.remove_if(&edge_id, |_, v| v.valid_until_ticks <= now_ticks);
            }
            return EdgeState::Expired;
        }
        if e.speed_factor == 0.0 {
            return EdgeState::Blocked;
        }
        EdgeState::Active(e.speed_factor)
    }

    /// The multiplier the cost engine applies to an edge's base traversal
    /// time: `1.0` for no override or an expired one, `+inf` for blocked,
    /// `1 / speed_factor` otherwise.
    pub fn live_penalty_multiplier(&self, edge_id: u32, now_ticks: i64) -> f32 {
        match self.edge_state(edge_id, now_ticks) {
            EdgeState::Neutral | EdgeState::Expired => NEUTRAL_MULTIPLIER,
            EdgeState::Blocked => f32::INFINITY,
            EdgeState::Active(speed_factor) => 1.0 / speed_factor,
        }
    }

    /// Remove up to `budget` expired entries. Returns the number removed.
    fn sweep_expired(&self, now_ticks: i64, budget: usize) -> usize {
        let victims: Vec<u32> = self
            .entries
            .iter()
            .filter(|e| e.valid_until_ticks <= now_ticks)
            .take(budget)
            .map(|e| *e.key())
            .collect();
        for id in &victims {
            self.entries.remove(id);
        }
        victims.len()
    }

    /// Remove all (or up to `budget`) expired entries under the write lock.
    /// The scheduled-sweep primitive from `spec.md` §4.6, independent of any
    /// ingest call.
    pub fn scheduled_sweep(&self, now_ticks: i64, budget: usize) -> usize {
        let _guard = self.write_lock.lock();
        self.sweep_expired(now_ticks, budget)
    }

    /// Ingest a batch of updates in list order under the write lock.
    /// See `spec.md` §4.6 for the exact step ordering this follows.
    pub fn ingest_batch(&self, updates: &[BatchUpdate], now_ticks: i64) -> IngestSummary {
        let _guard = self.write_lock.lock();
        let mut summary = IngestSummary::default();

        summary.expired_removed = self.sweep_expired(now_ticks, self.config.cleanup_budget);

        if self.config.capacity_policy == CapacityPolicy::RejectBatch {
            let mut new_ids: HashSet<u32> = HashSet::new();
            for u in updates {
                if u.valid_until_ticks <= now_ticks {
                    continue;
                }
                if !self.entries.contains_key(&u.edge_id) {
                    new_ids.insert(u.edge_id);
                }
            }
            let free_capacity = self.config.capacity.saturating_sub(self.entries.len());
            if new_ids.len() > free_capacity {
                for u in updates {
                    if u.valid_until_ticks <= now_ticks {
                        summary.rejected_expired += 1;
                    } else {
                        summary.rejected_capacity += 1;
                    }
                }
                debug!(
                    accepted = summary.accepted,
                    rejected_expired = summary.rejected_expired,
                    rejected_capacity = summary.rejected_capacity,
                    "live_overlay_batch_rejected_precount"
                );
                return summary;
            }
        }

        for u in updates {
            if u.valid_until_ticks <= now_ticks {
                summary.rejected_expired += 1;
                continue;
            }

            let entry = OverlayEntry { speed_factor: u.speed_factor, valid_until_ticks: u.valid_until_ticks };

            if self.entries.contains_key(&u.edge_id) {
                self.entries.insert(u.edge_id, entry);
                summary.accepted += 1;
                continue;
            }

            if self.entries.len() < self.config.capacity {
                self.entries.insert(u.edge_id, entry);
                summary.accepted += 1;
                continue;
            }

            match self.config.capacity_policy {
                CapacityPolicy::RejectBatch => {
                    summary.rejected_capacity += 1;
                }
                CapacityPolicy::EvictExpiredThenReject => {
                    summary.expired_removed += self.sweep_expired(now_ticks, usize::MAX);
                    if self.entries.len() < self.config.capacity {
                        self.entries.insert(u.edge_id, entry);
                        summary.accepted += 1;
                    } else {
                        summary.rejected_capacity += 1;
                    }
                }
                CapacityPolicy::EvictOldestExpiry => {
                    summary.expired_removed += self.sweep_expired(now_ticks, usize::MAX);
                    if self.entries.len() >= self.config.capacity {
                        if let Some(victim_id) =
                            self.entries.iter().min_by_key(|e| e.valid_until_ticks).map(|e| *e.key())
                        {
                            self.entries.remove(&victim_id);
                            summary.oldest_evicted += 1;
                        }
                    }
                    self.entries.insert(u.edge_id, entry);
                    summary.accepted += 1;
                }
            }
        }

        debug!(
            accepted = summary.accepted,
            rejected_expired = summary.rejected_expired,
            rejected_capacity = summary.rejected_capacity,
            expired_removed = summary.expired_removed,
            oldest_evicted = summary.oldest_evicted,
            "live_overlay_batch_ingested"
        );
        summary
    }
}
