//! `IdMapper` — bidirectional map between external node identifiers and
//! dense internal ids (`spec.md` §4.2).
//!
//! Mirrors the teacher's typed-id discipline (`dt_core::ids`): internal ids
//! are plain `u32` indices into the model's dense arrays; externally they
//! are opaque `u64`s (a string external id is hashed or pre-assigned an
//! integer by the model builder — out of scope here).

use crate::error::{ModelContractError, ModelResult};
use crate::reader::TableReader;

/// Bidirectional external-id <-> internal-id mapping.
///
/// Construction validates bijectivity: no internal id may be referenced by
/// two different external ids. Lookups are O(1) expected in both
/// directions — external -> internal via a hash map, internal -> external
/// via direct indexing.
#[derive(Clone, Debug, Default)]
pub struct IdMapper {
    /// `internal_to_external[internal_id as usize] == external_id`.
    internal_to_external: Vec<u64>,
    external_to_internal: std::collections::HashMap<u64, u32>,
}

impl IdMapper {
    /// Build from an explicit `external_ids` table where position `i` is
    /// the external id of internal node `i` (the wire `IdMapping` layout,
    /// §6 — though the table is stored sorted on disk for binary search,
    /// the in-memory mapper re-derives the hash index once here).
    pub fn from_external_ids(external_ids: Vec<u64>) -> ModelResult<Self> {
        let mut external_to_internal = std::collections::HashMap::with_capacity(external_ids.len());
        for (i, &ext) in external_ids.iter().enumerate() {
            if external_to_internal.insert(ext, i as u32).is_some() {
                return Err(ModelContractError::IdMappingDuplicateInternalId(i));
            }
        }
        Ok(Self { internal_to_external: external_ids, external_to_internal })
    }

    pub fn to_internal(&self, external: u64) -> Option<u32> {
        self.external_to_internal.get(&external).copied()
    }

    pub fn to_external(&self, internal: u32) -> Option<u64> {
        self.internal_to_external.get(internal as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.internal_to_external.len()
    }

    pub fn is_empty(&self) -> bool {
        self.internal_to_external.is_empty()
    }
}

/// Parse the optional `IdMapping` table. Returns `None` when the model
/// carries no id mapping (addressing must then be purely coordinate-based).
pub(crate) fn parse(r: &mut TableReader<'_>, node_count: u32) -> ModelResult<Option<IdMapper>> {
    let present = r.read_u8()? != 0;
    if !present {
        return Ok(None);
    }
    let count = r.read_u32()? as usize;
    if count != node_count as usize {
        return Err(ModelContractError::IdMappingLengthMismatch {
            expected: node_count as usize,
            got: count,
        });
    }
    let mut external_ids = Vec::with_capacity(count);
    for _ in 0..count {
        external_ids.push(r.read_u64()?);
    }
    Ok(Some(IdMapper::from_external_ids(external_ids)?))
}
