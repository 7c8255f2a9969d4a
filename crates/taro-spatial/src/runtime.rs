//! Nearest-neighbor traversal over [`taro_model::SpatialIndex`].
//!
//! `taro-model` owns the implicit KD-tree's wire format and its load-time
//! invariants; this module only walks it. The search is iterative rather
//! than recursive — a plain `Vec` used as a stack, in the spirit of the
//! teacher's preference for allocation-free hot paths (`dt_spatial::router`'s
//! Dijkstra loop uses the same shape: push candidates, pop, never recurse).
//!
//! # Algorithm
//!
//! At each internal node, descend toward the side of the split plane that
//! contains the query point first — pushed last, so it pops first. The far
//! side is pushed as a *conditional* entry carrying the already-computed
//! squared distance to the split plane; by the time it is popped (after the
//! near side and everything beneath it has been fully explored), `best_dist`
//! reflects every closer candidate found so far, so the condition is checked
//! exactly once, at the right time, with no re-descent.

use taro_model::{SpatialIndex, NO_CHILD};

use crate::error::{SpatialError, SpatialResult};

/// Whether a runtime is permitted to serve spatial queries at all. A model
/// can carry a valid `SpatialIndex` and still have lookups disabled by the
/// caller's configured addressing strategy (`spec.md` §4.9) — in that case
/// queries fail the same way as a genuinely absent index.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Capability {
    Enabled,
    Disabled,
}

/// Borrowed view over a model's coordinates and spatial index, gated by
/// [`Capability`].
pub struct SpatialRuntime<'a> {
    coordinates: &'a [(f64, f64)],
    index: Option<&'a SpatialIndex>,
    capability: Capability,
}

enum StackEntry {
    Visit(u32),
    Conditional { node: u32, plane_dist_sq: f64 },
}

impl<'a> SpatialRuntime<'a> {
    pub fn new(
        coordinates: &'a [(f64, f64)],
        index: Option<&'a SpatialIndex>,
        capability: Capability,
    ) -> Self {
        Self { coordinates, index, capability }
    }

    fn index(&self) -> SpatialResult<&'a SpatialIndex> {
        if self.capability == Capability::Disabled {
            return Err(SpatialError::Unavailable("spatial lookups disabled by runtime configuration"));
        }
        self.index.ok_or(SpatialError::Unavailable("model has no spatial index"))
    }

    /// Return the id and squared distance of the node nearest `(x, y)`.
    ///
    /// Rejects non-finite query coordinates. Ties on equal squared distance
    /// are broken in favor of the numerically smaller node id.
    pub fn nearest(&self, x: f64, y: f64) -> SpatialResult<(u32, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return Err(SpatialError::NonFiniteQuery { x, y });
        }
        let index = self.index()?;
        if index.tree_nodes.is_empty() {
            return Err(SpatialError::EmptyIndex);
        }

        let mut best_node: Option<u32> = None;
        let mut best_dist = f64::INFINITY;
        let mut stack = vec![StackEntry::Visit(index.root_index)];

        while let Some(entry) = stack.pop() {
            let node_idx = match entry {
                StackEntry::Visit(idx) => idx,
                StackEntry::Conditional { node, plane_dist_sq } => {
                    if plane_dist_sq >= best_dist {
                        continue;
                    }
                    node
                }
            };

            let node = &index.tree_nodes[node_idx as usize];

            if node.is_leaf {
                let start = node.item_start as usize;
                let end = start + node.item_count as usize;
                for &item in &index.leaf_items[start..end] {
                    let (nx, ny) = self.coordinates[item as usize];
                    let dx = nx - x;
                    let dy = ny - y;
                    let dist = dx * dx + dy * dy;
                    let better = match best_node {
                        None => true,
                        Some(b) => dist < best_dist || (dist == best_dist && item < b),
                    };
                    if better {
                        best_dist = dist;
                        best_node = Some(item);
                    }
                }
                continue;
            }

            let query_on_axis = if node.split_axis == 0 { x } else { y };
            let diff = query_on_axis - node.split_value;
            let (near, far) = if diff <= 0.0 {
                (node.left_child, node.right_child)
            } else {
                (node.right_child, node.left_child)
            };

            if far != NO_CHILD {
                stack.push(StackEntry::Conditional { node: far, plane_dist_sq: diff * diff });
            }
            if near != NO_CHILD {
                stack.push(StackEntry::Visit(near));
            }
        }

        best_node.map(|n| (n, best_dist)).ok_or(SpatialError::EmptyIndex)
    }

    /// Convenience wrapper around [`nearest`](Self::nearest) returning only
    /// the node id.
    pub fn nearest_node_id(&self, x: f64, y: f64) -> SpatialResult<u32> {
        self.nearest(x, y).map(|(id, _)| id)
    }
}
