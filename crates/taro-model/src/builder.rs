//! `ModelBuilder` — incremental, in-memory model construction.
//!
//! The offline pipeline that turns CSV/OSM sources into a binary model
//! buffer is out of scope (`spec.md` §1). `ModelBuilder` is the in-memory
//! analogue of the teacher's `dt_spatial::RoadNetworkBuilder`: it lets a
//! caller (chiefly: this workspace's own tests, and small embedded
//! deployments that already have structured data in memory) assemble a
//! [`ModelStore`] directly, or serialize it to the exact wire bytes
//! [`crate::store::load`] parses, without round-tripping through CSV.

use taro_time::EngineTimeUnit;

use crate::error::ModelResult;
use crate::landmark::Landmark;
use crate::profile::RawProfile;
use crate::spatial_index::{KdNode, SpatialIndex, NO_CHILD};
use crate::store::{self, ModelStore};
use crate::turn::TurnCost;
use crate::writer::TableWriter;

struct RawEdge {
    from: u32,
    to: u32,
    base_weight: f32,
    profile_id: u32,
}

pub struct ModelBuilder {
    model_version: String,
    time_unit: EngineTimeUnit,
    profile_timezone_name: String,
    nodes: Vec<(f64, f64)>,
    edges: Vec<RawEdge>,
    profiles: Vec<RawProfile>,
    turn_costs: Vec<TurnCost>,
    landmarks: Vec<Landmark>,
    id_mapping: Option<Vec<u64>>,
}

impl ModelBuilder {
    pub fn new(time_unit: EngineTimeUnit) -> Self {
        Self {
            model_version: "dev".to_string(),
            time_unit,
            profile_timezone_name: "UTC".to_string(),
            nodes: Vec::new(),
            edges: Vec::new(),
            profiles: Vec::new(),
            turn_costs: Vec::new(),
            landmarks: Vec::new(),
            id_mapping: None,
        }
    }

    pub fn profile_timezone(mut self, name: &str) -> Self {
        self.profile_timezone_name = name.to_string();
        self
    }

    pub fn add_node(&mut self, x: f64, y: f64) -> u32 {
        let id = self.nodes.len() as u32;
        self.nodes.push((x, y));
        id
    }

    pub fn add_edge(&mut self, from: u32, to: u32, base_weight: f32, profile_id: u32) -> u32 {
        let id = self.edges.len() as u32;
        self.edges.push(RawEdge { from, to, base_weight, profile_id });
        id
    }

    pub fn add_profile(&mut self, profile_id: u32, day_mask: u32, buckets: Vec<f32>, global_multiplier: f32) {
        self.profiles.push(RawProfile { profile_id, day_mask, buckets, global_multiplier });
    }

    pub fn add_turn_cost(&mut self, from_edge: u32, to_edge: u32, penalty_seconds: f32) {
        self.turn_costs.push(TurnCost { from_edge, to_edge, penalty_seconds });
    }

    pub fn add_landmark(&mut self, node_idx: u32, forward_distances: Vec<f32>, backward_distances: Vec<f32>) {
        self.landmarks.push(Landmark { node_idx, forward_distances, backward_distances });
    }

    pub fn id_mapping(mut self, external_ids: Vec<u64>) -> Self {
        self.id_mapping = Some(external_ids);
        self
    }

    /// Build a balanced 2-D KD-tree over every node's coordinates (one item
    /// per leaf) and use it as the model's spatial index.
    pub fn with_auto_spatial_index(self) -> SpatialIndexBuilder {
        SpatialIndexBuilder { inner: self }
    }

    fn sorted_edges(&self) -> (Vec<u32>, Vec<u32>, Vec<u32>, Vec<f32>, Vec<u32>) {
        let mut order: Vec<usize> = (0..self.edges.len()).collect();
        order.sort_by_key(|&i| self.edges[i].from);

        let node_count = self.nodes.len() as u32;
        let mut first_edge = vec![0u32; node_count as usize + 1];
        for &i in &order {
            first_edge[self.edges[i].from as usize + 1] += 1;
        }
        for i in 1..=node_count as usize {
            first_edge[i] += first_edge[i - 1];
        }

        let edge_target: Vec<u32> = order.iter().map(|&i| self.edges[i].to).collect();
        let edge_origin: Vec<u32> = order.iter().map(|&i| self.edges[i].from).collect();
        let base_weight: Vec<f32> = order.iter().map(|&i| self.edges[i].base_weight).collect();
        let edge_profile_id: Vec<u32> = order.iter().map(|&i| self.edges[i].profile_id).collect();

        (first_edge, edge_target, edge_origin, base_weight, edge_profile_id)
    }

    /// Serialize to wire bytes, then parse and validate through the same
    /// [`store::load`] path real models go through — `ModelBuilder` never
    /// constructs a `ModelStore` by any route other than the one every
    /// other model (in-process or on disk) takes.
    fn build_with_spatial_index(self, spatial_index: Option<SpatialIndex>) -> ModelResult<ModelStore> {
        let bytes = self.to_bytes_inner(&spatial_index);
        store::load(&bytes)
    }

    /// Serialize to the exact wire format `spec.md` §6 describes.
    fn to_bytes_inner(&self, spatial_index: &Option<SpatialIndex>) -> Vec<u8> {
        let mut w = TableWriter::new();

        // Metadata
        w.write_u64(1);
        w.write_string(&self.model_version);
        w.write_u8(match self.time_unit {
            EngineTimeUnit::Seconds => 0,
            EngineTimeUnit::Milliseconds => 1,
        });
        w.write_u64(self.time_unit.tick_duration_ns());
        w.write_string(&self.profile_timezone_name);

        // GraphTopology
        let (first_edge, edge_target, edge_origin, base_weight, edge_profile_id) = self.sorted_edges();
        w.write_u32(self.nodes.len() as u32);
        w.write_u32(self.edges.len() as u32);
        w.write_u32_vec(&first_edge);
        w.write_u32_vec(&edge_target);
        w.write_u32_vec(&edge_origin);
        w.write_f32_vec(&base_weight);
        w.write_u32_vec(&edge_profile_id);
        for &(x, y) in &self.nodes {
            w.write_f64(x);
            w.write_f64(y);
        }

        // TemporalProfile[]
        w.write_u32(self.profiles.len() as u32);
        for p in &self.profiles {
            w.write_u32(p.profile_id);
            w.write_u32(p.day_mask);
            w.write_u32_prefixed_f32_vec(&p.buckets);
            w.write_f32(p.global_multiplier);
        }

        // TurnCost[]
        let mut turn_costs = self.turn_costs.clone();
        turn_costs.sort_by_key(|t| (t.from_edge, t.to_edge));
        w.write_u32(turn_costs.len() as u32);
        for t in &turn_costs {
            w.write_u32(t.from_edge);
            w.write_u32(t.to_edge);
            w.write_f32(t.penalty_seconds);
        }

        // SpatialIndex (optional)
        match spatial_index {
            None => w.write_u8(0),
            Some(idx) => {
                w.write_u8(1);
                w.write_u32(idx.tree_nodes.len() as u32);
                for n in &idx.tree_nodes {
                    w.write_f64(n.split_value);
                    w.write_u32(n.left_child);
                    w.write_u32(n.right_child);
                    w.write_u32(n.item_start);
                    w.write_u32(n.item_count);
                    w.write_u8(n.split_axis);
                    w.write_u8(n.is_leaf as u8);
                }
                w.write_u32(idx.leaf_items.len() as u32);
                w.write_u32_vec(&idx.leaf_items);
                w.write_u32(idx.root_index);
            }
        }

        // Landmark[]
        w.write_u32(self.landmarks.len() as u32);
        for l in &self.landmarks {
            w.write_u32(l.node_idx);
            w.write_f32_vec(&l.forward_distances);
            w.write_f32_vec(&l.backward_distances);
        }

        // IdMapping (optional)
        match &self.id_mapping {
            None => w.write_u8(0),
            Some(ids) => {
                w.write_u8(1);
                w.write_u32(ids.len() as u32);
                for &id in ids {
                    w.write_u64(id);
                }
            }
        }

        w.into_bytes()
    }

    /// Build without a spatial index.
    pub fn build(self) -> ModelResult<ModelStore> {
        self.build_with_spatial_index(None)
    }

    /// Serialize to wire bytes without a spatial index.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_bytes_inner(&None)
    }
}

/// Builder stage that constructs a balanced KD-tree over the nodes added so
/// far before finishing the build.
pub struct SpatialIndexBuilder {
    inner: ModelBuilder,
}

impl SpatialIndexBuilder {
    pub fn build(self) -> ModelResult<ModelStore> {
        let index = build_kdtree(&self.inner.nodes);
        self.inner.build_with_spatial_index(Some(index))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let index = build_kdtree(&self.inner.nodes);
        self.inner.to_bytes_inner(&Some(index))
    }
}

/// Build a balanced 2-D KD-tree (one node id per leaf) over `points`.
///
/// This is test/fixture tooling, not part of the serving runtime — real
/// deployments build the spatial index offline and ship it inside the model
/// buffer. The recursive median-split construction here is the simplest
/// correct implicit tree satisfying every invariant `taro-model` validates
/// (`spec.md` §3/§4.4): strict tree, non-overlapping in-bounds leaf spans,
/// every internal node has at least one child.
pub fn build_kdtree(points: &[(f64, f64)]) -> SpatialIndex {
    let mut tree_nodes = Vec::new();
    let mut leaf_items = Vec::new();

    if points.is_empty() {
        return SpatialIndex { tree_nodes, leaf_items, root_index: 0 };
    }

    let mut indices: Vec<u32> = (0..points.len() as u32).collect();
    let root_index = build_recursive(points, &mut indices, 0, &mut tree_nodes, &mut leaf_items);

    SpatialIndex { tree_nodes, leaf_items, root_index }
}

fn build_recursive(
    points: &[(f64, f64)],
    indices: &mut [u32],
    depth: usize,
    tree_nodes: &mut Vec<KdNode>,
    leaf_items: &mut Vec<u32>,
) -> u32 {
    if indices.len() == 1 {
        let item_start = leaf_items.len() as u32;
        leaf_items.push(indices[0]);
        tree_nodes.push(KdNode {
            split_value: 0.0,
            left_child: NO_CHILD,
            right_child: NO_CHILD,
            item_start,
            item_count: 1,
            split_axis: 0,
            is_leaf: true,
        });
        return tree_nodes.len() as u32 - 1;
    }

    let axis = (depth % 2) as u8;
    indices.sort_by(|&a, &b| {
        let pa = coord(points, a, axis);
        let pb = coord(points, b, axis);
        pa.partial_cmp(&pb).unwrap()
    });

    let mid = indices.len() / 2;
    let split_value = coord(points, indices[mid], axis);

    let (left_indices, right_indices) = indices.split_at_mut(mid);

    // Reserve this node's slot before recursing so child indices are known
    // at the time we push the parent.
    let self_index = tree_nodes.len() as u32;
    tree_nodes.push(KdNode {
        split_value,
        left_child: NO_CHILD,
        right_child: NO_CHILD,
        item_start: 0,
        item_count: 0,
        split_axis: axis,
        is_leaf: false,
    });

    let left_child = if left_indices.is_empty() {
        NO_CHILD
    } else {
        build_recursive(points, left_indices, depth + 1, tree_nodes, leaf_items)
    };
    let right_child = if right_indices.is_empty() {
        NO_CHILD
    } else {
        build_recursive(points, right_indices, depth + 1, tree_nodes, leaf_items)
    };

    tree_nodes[self_index as usize].left_child = left_child;
    tree_nodes[self_index as usize].right_child = right_child;

    self_index
}

#[inline]
fn coord(points: &[(f64, f64)], id: u32, axis: u8) -> f64 {
    let (x, y) = points[id as usize];
    if axis == 0 {
        x
    } else {
        y
    }
}
