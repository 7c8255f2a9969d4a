//! `ModelStore` — the validated, read-only view over a loaded binary model.
//!
//! Mirrors the teacher's split between a builder (`dt_spatial::RoadNetworkBuilder`)
//! and an immutable, `pub`-field product type (`dt_spatial::RoadNetwork`): once
//! `load` returns, a `ModelStore` never changes for the remainder of the
//! process (`spec.md` §3 Lifecycle, §5).

use tracing::{error, info};

use crate::error::{ModelContractError, ModelResult};
use crate::id_map::IdMapper;
use crate::landmark::Landmark;
use crate::metadata::Metadata;
use crate::profile::RawProfile;
use crate::reader::TableReader;
use crate::spatial_index::SpatialIndex;
use crate::topology::{GraphTopology, NO_PROFILE};
use crate::turn::TurnCostTable;
use crate::{id_map, landmark, metadata, profile, spatial_index, topology, turn};

/// A fully loaded and validated TARO model.
///
/// All fields are `pub` for direct read access on hot paths, matching the
/// teacher's `RoadNetwork` convention — do not construct directly, use
/// [`load`].
pub struct ModelStore {
    pub metadata: Metadata,
    pub topology: GraphTopology,
    pub profiles: Vec<RawProfile>,
    pub turn_costs: TurnCostTable,
    pub spatial_index: Option<SpatialIndex>,
    pub landmarks: Vec<Landmark>,
    pub id_mapper: Option<IdMapper>,
}

impl ModelStore {
    pub fn node_count(&self) -> u32 {
        self.topology.node_count
    }

    pub fn edge_count(&self) -> u32 {
        self.topology.edge_count
    }

    /// Look up a profile by id, or `None` for the sentinel / dangling case
    /// (both are already rejected at load time for edges, so a `None` here
    /// can only come from a caller-supplied id outside the edge table).
    pub fn profile(&self, profile_id: u32) -> Option<&RawProfile> {
        if profile_id == NO_PROFILE {
            return None;
        }
        self.profiles.iter().find(|p| p.profile_id == profile_id)
    }
}

/// Load and validate a binary model buffer.
///
/// Parses tables in the order documented in `spec.md` §6: `Metadata`,
/// `GraphTopology`, `TemporalProfile[]`, `TurnCost[]`, `SpatialIndex`
/// (tolerating absence — §4.4's capability gate), `Landmark[]`, optional
/// `IdMapping`. Every violation is reported with a categorized,
/// variant-specific error and no partial `ModelStore` is ever returned.
pub fn load(buf: &[u8]) -> ModelResult<ModelStore> {
    let start = std::time::Instant::now();
    match load_inner(buf) {
        Ok(store) => {
            info!(
                node_count = store.node_count(),
                edge_count = store.edge_count(),
                profile_count = store.profiles.len(),
                elapsed_us = start.elapsed().as_micros() as u64,
                "model_load"
            );
            Ok(store)
        }
        Err(e) => {
            error!(error = %e, "model_load_failed");
            Err(e)
        }
    }
}

fn load_inner(buf: &[u8]) -> ModelResult<ModelStore> {
    let mut r = TableReader::new(buf);

    let meta = metadata::parse(&mut r)?;
    let topo = topology::parse(&mut r)?;
    let profiles = profile::parse(&mut r)?;
    let turn_costs = turn::parse(&mut r, topo.edge_count)?;

    let has_spatial_index = r.read_u8()? != 0;
    let spatial_index = if has_spatial_index {
        Some(spatial_index::parse(&mut r, topo.node_count)?)
    } else {
        None
    };

    let landmarks = landmark::parse(&mut r, topo.node_count)?;
    let id_mapper = id_map::parse(&mut r, topo.node_count)?;

    validate_edge_profile_references(&topo, &profiles)?;

    Ok(ModelStore {
        metadata: meta,
        topology: topo,
        profiles,
        turn_costs,
        spatial_index,
        landmarks,
        id_mapper,
    })
}

fn validate_edge_profile_references(
    topo: &GraphTopology,
    profiles: &[RawProfile],
) -> ModelResult<()> {
    let profile_zero_present = profiles.iter().any(|p| p.profile_id == 0);
    for (e, &pid) in topo.edge_profile_id.iter().enumerate() {
        if pid == NO_PROFILE {
            continue;
        }
        if pid == 0 && !profile_zero_present {
            return Err(ModelContractError::AmbiguousZeroProfileId { edge: e });
        }
        if !profiles.iter().any(|p| p.profile_id == pid) {
            return Err(ModelContractError::DanglingEdgeProfileId { edge: e, profile_id: pid });
        }
    }
    Ok(())
}
