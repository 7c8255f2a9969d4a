//! `GraphTopology` — CSR adjacency, per-node coordinates, per-edge weights.
//!
//! Mirrors the teacher's `dt_spatial::RoadNetwork` CSR layout
//! (`first_edge[n..n+1]` bounds node `n`'s outgoing edges in `edge_target`),
//! extended with the parallel arrays TARO's time-dependent cost engine needs:
//! `edge_origin` (tail node, for edge-based turn transitions), `base_weight`,
//! and `edge_profile_id`.

use crate::error::{ModelContractError, ModelResult};
use crate::reader::TableReader;

/// Sentinel `edge_profile_id` meaning "this edge has no profile" (neutral
/// multiplier 1.0 always). `spec.md` §9's Open Question: the source format
/// treats `edge_profile_id = 0` ambiguously as both a real id and "none".
/// TARO resolves this by requiring an explicit sentinel and rejecting a
/// plain `0` profile id on an edge unless profile id `0` genuinely exists in
/// the model's profile table (see [`crate::store::load`]).
pub const NO_PROFILE: u32 = u32::MAX;

#[derive(Clone, Debug)]
pub struct GraphTopology {
    pub node_count: u32,
    pub edge_count: u32,
    pub first_edge: Vec<u32>,
    pub edge_target: Vec<u32>,
    pub edge_origin: Vec<u32>,
    pub base_weight: Vec<f32>,
    pub edge_profile_id: Vec<u32>,
    pub coordinates: Vec<(f64, f64)>,
}

impl GraphTopology {
    #[inline]
    pub fn out_edges(&self, node: u32) -> std::ops::Range<u32> {
        self.first_edge[node as usize]..self.first_edge[node as usize + 1]
    }

    #[inline]
    pub fn out_degree(&self, node: u32) -> u32 {
        let r = self.out_edges(node);
        r.end - r.start
    }
}

pub(crate) fn parse(r: &mut TableReader<'_>) -> ModelResult<GraphTopology> {
    let node_count = r.read_u32()?;
    let edge_count = r.read_u32()?;

    let first_edge = r.read_u32_vec(node_count as usize + 1)?;
    let edge_target = r.read_u32_vec(edge_count as usize)?;
    let edge_origin = r.read_u32_vec(edge_count as usize)?;
    let base_weight = r.read_f32_vec(edge_count as usize)?;
    let edge_profile_id = r.read_u32_vec(edge_count as usize)?;

    let mut coordinates = Vec::with_capacity(node_count as usize);
    for _ in 0..node_count {
        let x = r.read_f64()?;
        let y = r.read_f64()?;
        coordinates.push((x, y));
    }

    validate(
        node_count,
        edge_count,
        &first_edge,
        &edge_target,
        &edge_origin,
        &base_weight,
    )?;

    Ok(GraphTopology {
        node_count,
        edge_count,
        first_edge,
        edge_target,
        edge_origin,
        base_weight,
        edge_profile_id,
        coordinates,
    })
}

fn validate(
    node_count: u32,
    edge_count: u32,
    first_edge: &[u32],
    edge_target: &[u32],
    edge_origin: &[u32],
    base_weight: &[f32],
) -> ModelResult<()> {
    if first_edge.len() != node_count as usize + 1 {
        return Err(ModelContractError::FirstEdgeLengthMismatch {
            expected: node_count as usize + 1,
            got: first_edge.len(),
        });
    }
    for (i, w) in first_edge.windows(2).enumerate() {
        if w[0] > w[1] {
            return Err(ModelContractError::FirstEdgeNotMonotone { index: i + 1 });
        }
    }
    if first_edge[node_count as usize] != edge_count {
        return Err(ModelContractError::FirstEdgeTailMismatch {
            expected: edge_count,
            got: first_edge[node_count as usize],
        });
    }
    for (e, &target) in edge_target.iter().enumerate() {
        if target >= node_count {
            return Err(ModelContractError::EdgeTargetOutOfRange { edge: e, target, node_count });
        }
    }
    for (e, &origin) in edge_origin.iter().enumerate() {
        if origin >= node_count {
            return Err(ModelContractError::EdgeOriginOutOfRange { edge: e, origin, node_count });
        }
    }
    for (e, &w) in base_weight.iter().enumerate() {
        if !w.is_finite() || w < 0.0 {
            return Err(ModelContractError::InvalidBaseWeight { edge: e, weight: w });
        }
    }
    Ok(())
}
