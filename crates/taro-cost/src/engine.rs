//! `CostEngine` — `spec.md` §4.7.
//!
//! Given `(edge_id, entry_tick)` (and, for edge-based transitions, the edge
//! just arrived from), composes `base_weight × profile multiplier × live
//! multiplier + turn penalty` into a traversal time and exit tick. This is
//! the planner's innermost per-relaxation call, so every lookup here is
//! O(1) or O(log turn_costs) — no allocation.

use taro_model::{ModelStore, NO_PROFILE};
use taro_overlay::LiveOverlay;
use taro_profile::ProfileStore;
use taro_time::EngineTick;

use crate::error::{CostError, CostResult};

/// Result of costing one edge traversal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EdgeTraversal {
    /// The edge can be traversed; `exit_tick = entry_tick + ceil(traversal)`
    /// in engine-tick units.
    Traversable { traversal_seconds: f64, exit_tick: EngineTick },
    /// The live overlay reports the edge as blocked, or the incoming turn
    /// carries a negative (forbidden) penalty.
    Blocked,
}

pub struct CostEngine<'a> {
    model: &'a ModelStore,
    profiles: ProfileStore<'a>,
    overlay: &'a LiveOverlay,
    /// Seconds per profile bucket, shared across every profile in the model
    /// (`spec.md` §4.7 step 2/§8 example 4). A profile's own `buckets.len()`
    /// need not evenly divide a day — `ProfileStore::get_multiplier` wraps
    /// the raw bucket index modulo that profile's bucket count.
    bucket_size_sec: i64,
}

impl<'a> CostEngine<'a> {
    pub fn new(
        model: &'a ModelStore,
        overlay: &'a LiveOverlay,
        bucket_size_sec: i64,
    ) -> CostResult<Self> {
        if bucket_size_sec <= 0 {
            return Err(CostError::NonPositiveBucketSize(bucket_size_sec));
        }
        Ok(Self { model, profiles: ProfileStore::new(&model.profiles), overlay, bucket_size_sec })
    }

    /// Cost of traversing `edge_id`, entering at `entry_tick`, having just
    /// arrived via `incoming_edge` (`None` at the start of a search, where no
    /// turn penalty applies).
    pub fn edge_cost(
        &self,
        edge_id: u32,
        entry_tick: EngineTick,
        incoming_edge: Option<u32>,
    ) -> CostResult<EdgeTraversal> {
        let base = self.model.topology.base_weight[edge_id as usize] as f64;
        let profile_id = self.model.topology.edge_profile_id[edge_id as usize];

        let p_mult = if profile_id == NO_PROFILE {
            1.0
        } else {
            let epoch_sec = self.to_epoch_seconds(entry_tick);
            let dow = taro_time::day_of_week_in_tz(epoch_sec, self.model.metadata.profile_timezone);
            let bucket = taro_time::to_bucket(epoch_sec, self.bucket_size_sec)
                .expect("bucket_size_sec validated positive in CostEngine::new");
            self.profiles.get_multiplier_for_day(profile_id, dow, bucket) as f64
        };

        let live = self.overlay.live_penalty_multiplier(edge_id, entry_tick.0);
        if live.is_infinite() {
            return Ok(EdgeTraversal::Blocked);
        }

        let mut traversal = base * p_mult * live as f64;

        if let Some(from_edge) = incoming_edge {
            if let Some(turn) = self.model.turn_costs.lookup(from_edge, edge_id) {
                if turn.penalty_seconds < 0.0 {
                    return Ok(EdgeTraversal::Blocked);
                }
                traversal += turn.penalty_seconds as f64;
            }
        }

        if !traversal.is_finite() || traversal < 0.0 {
            return Err(CostError::NonFiniteOrNegativeTraversal { edge_id, value: traversal });
        }

        let delta_ticks = self.seconds_to_tick_delta(traversal);
        Ok(EdgeTraversal::Traversable { traversal_seconds: traversal, exit_tick: entry_tick + delta_ticks })
    }

    fn to_epoch_seconds(&self, tick: EngineTick) -> i64 {
        match self.model.metadata.time_unit {
            taro_time::EngineTimeUnit::Seconds => tick.0,
            taro_time::EngineTimeUnit::Milliseconds => tick.0.div_euclid(1_000),
        }
    }

    fn seconds_to_tick_delta(&self, seconds: f64) -> i64 {
        match self.model.metadata.time_unit {
            taro_time::EngineTimeUnit::Seconds => seconds.ceil() as i64,
            taro_time::EngineTimeUnit::Milliseconds => (seconds * 1_000.0).ceil() as i64,
        }
    }
}
