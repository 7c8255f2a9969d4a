//! A* heuristic sources — `spec.md` §4.9: "(a) NONE (reduces to Dijkstra),
//! (b) EUCLIDEAN distance over an assumed fastest speed, (c) LANDMARK (ALT)
//! using precomputed forward/backward distances."
//!
//! Every non-trivial heuristic validates admissibility at construction, not
//! at query time — an inadmissible heuristic is a configuration error, not a
//! per-query failure.

use taro_model::Landmark;

use crate::error::{HeuristicError, HeuristicResult};

/// Lower-bound estimate of the remaining cost from `from_node` to
/// `target_node`, in the same seconds unit [`taro_cost::CostEngine`]
/// produces. Must never overestimate the true remaining cost or A*
/// correctness breaks.
pub trait Heuristic: Send + Sync {
    fn estimate(&self, from_node: u32, target_node: u32) -> f64;
}

/// The zero heuristic. `point_to_point` with this heuristic is exactly
/// Dijkstra's algorithm — `f = g + 0 = g` everywhere.
pub struct NoneHeuristic;

impl Heuristic for NoneHeuristic {
    #[inline]
    fn estimate(&self, _from_node: u32, _target_node: u32) -> f64 {
        0.0
    }
}

/// Straight-line distance divided by an assumed fastest possible speed.
/// Admissible as long as no edge in the model can be traversed faster than
/// `fastest_speed` — the caller is responsible for that bound, but a
/// non-positive speed is rejected outright since it could never produce a
/// finite lower bound.
pub struct EuclideanHeuristic<'a> {
    coordinates: &'a [(f64, f64)],
    fastest_speed: f64,
}

impl<'a> EuclideanHeuristic<'a> {
    pub fn new(coordinates: &'a [(f64, f64)], fastest_speed: f64) -> HeuristicResult<Self> {
        if !(fastest_speed > 0.0) {
            return Err(HeuristicError::NonPositiveFastestSpeed(fastest_speed));
        }
        Ok(Self { coordinates, fastest_speed })
    }
}

impl Heuristic for EuclideanHeuristic<'_> {
    fn estimate(&self, from_node: u32, target_node: u32) -> f64 {
        let (x1, y1) = self.coordinates[from_node as usize];
        let (x2, y2) = self.coordinates[target_node as usize];
        let dist = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt();
        dist / self.fastest_speed
    }
}

/// ALT (A*, Landmarks, Triangle inequality). `forward_distances[v]` is the
/// shortest-path distance from the landmark to `v`; `backward_distances[v]`
/// is the shortest-path distance from `v` to the landmark. For each
/// landmark `L`, `max(fwd_L[t] - fwd_L[u], bwd_L[u] - bwd_L[t])`
/// lower-bounds the distance from `u` to `t` (triangle inequality); taking
/// the max across landmarks tightens the bound while staying admissible.
pub struct LandmarkHeuristic<'a> {
    landmarks: &'a [Landmark],
}

impl<'a> LandmarkHeuristic<'a> {
    pub fn new(landmarks: &'a [Landmark]) -> HeuristicResult<Self> {
        if landmarks.is_empty() {
            return Err(HeuristicError::NoLandmarks);
        }
        Ok(Self { landmarks })
    }
}

impl Heuristic for LandmarkHeuristic<'_> {
    fn estimate(&self, from_node: u32, target_node: u32) -> f64 {
        let mut best: f64 = 0.0;
        for lm in self.landmarks {
            let fwd_u = lm.forward_distances[from_node as usize] as f64;
            let fwd_t = lm.forward_distances[target_node as usize] as f64;
            let bwd_u = lm.backward_distances[from_node as usize] as f64;
            let bwd_t = lm.backward_distances[target_node as usize] as f64;
            let via_forward = fwd_t - fwd_u;
            let via_backward = bwd_u - bwd_t;
            best = best.max(via_forward).max(via_backward);
        }
        best.max(0.0)
    }
}
