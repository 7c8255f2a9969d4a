//! Model-contract error type — `spec.md` §7 `ModelContractError`.
//!
//! Every violation here is fatal for the model being loaded: validation is
//! fail-closed and there is no partial construction. Once a `ModelStore` is
//! returned from [`crate::store::load`], it is guaranteed to satisfy every
//! invariant in `spec.md` §3/§4.3.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelContractError {
    #[error("buffer truncated: wanted {wanted} more bytes at offset {offset}, had {available}")]
    Truncated { offset: usize, wanted: usize, available: usize },

    #[error("unsupported schema_version {0}, expected 1")]
    UnsupportedSchemaVersion(u64),

    #[error("time error: {0}")]
    Time(#[from] taro_time::TimeError),

    #[error("invalid UTF-8 string at offset {0}")]
    InvalidUtf8(usize),

    #[error(
        "first_edge length {got} does not match node_count + 1 ({expected})"
    )]
    FirstEdgeLengthMismatch { expected: usize, got: usize },

    #[error("first_edge is not monotone non-decreasing at index {index}")]
    FirstEdgeNotMonotone { index: usize },

    #[error("first_edge[node_count] = {got} does not match edge_count {expected}")]
    FirstEdgeTailMismatch { expected: u32, got: u32 },

    #[error("edge {edge} target node {target} out of range [0, {node_count})")]
    EdgeTargetOutOfRange { edge: usize, target: u32, node_count: u32 },

    #[error("edge {edge} origin node {origin} out of range [0, {node_count})")]
    EdgeOriginOutOfRange { edge: usize, origin: u32, node_count: u32 },

    #[error("edge {edge} has non-finite or negative base weight {weight}")]
    InvalidBaseWeight { edge: usize, weight: f32 },

    #[error(
        "edge {edge} references profile id {profile_id} which is not present and is not the sentinel"
    )]
    DanglingEdgeProfileId { edge: usize, profile_id: u32 },

    #[error("edge {edge} declares sentinel-valued profile id 0 without profile 0 present in the model")]
    AmbiguousZeroProfileId { edge: usize },

    #[error("duplicate profile id {0}")]
    DuplicateProfileId(u32),

    #[error("profile {profile_id} has invalid day_mask {day_mask:#x}; must be in (0, 0x7F]")]
    InvalidDayMask { profile_id: u32, day_mask: u32 },

    #[error("profile {0} has an empty bucket vector")]
    EmptyBuckets(u32),

    #[error("profile {profile_id} bucket {bucket} is non-finite or negative: {value}")]
    InvalidBucketValue { profile_id: u32, bucket: usize, value: f32 },

    #[error("profile {0} has a non-finite global multiplier")]
    InvalidGlobalMultiplier(u32),

    #[error("turn-cost list is not sorted at index {0}")]
    TurnCostsNotSorted(usize),

    #[error("turn-cost list has duplicate (from_edge, to_edge) at index {0}")]
    TurnCostsDuplicated(usize),

    #[error("turn cost {index} references out-of-range edge id(s) (from={from}, to={to}, edge_count={edge_count})")]
    TurnCostEdgeOutOfRange { index: usize, from: u32, to: u32, edge_count: u32 },

    #[error("spatial index root_index {root} out of range [0, {node_count})")]
    SpatialRootOutOfRange { root: u32, node_count: usize },

    #[error("spatial index node {0} shares a child with another node")]
    SpatialSharedChild(usize),

    #[error("spatial index leaf item {index} references out-of-range node id {node_id} (node_count={node_count})")]
    SpatialLeafItemOutOfRange { index: usize, node_id: u32, node_count: u32 },

    #[error("spatial index leaf spans overlap or are out of bounds at node {0}")]
    SpatialLeafSpanInvalid(usize),

    #[error("spatial index internal node {0} has no valid child")]
    SpatialInternalNodeNoChild(usize),

    #[error("spatial index split_axis {axis} at node {node} must be 0 or 1")]
    SpatialInvalidSplitAxis { node: usize, axis: u8 },

    #[error("landmark {index} node_idx {node_idx} out of range [0, {node_count})")]
    LandmarkNodeOutOfRange { index: usize, node_idx: u32, node_count: u32 },

    #[error(
        "landmark {index} distance array length {got} does not match node_count {expected}"
    )]
    LandmarkDistanceLengthMismatch { index: usize, expected: usize, got: usize },

    #[error("id mapping has duplicate internal id at position {0}")]
    IdMappingDuplicateInternalId(usize),

    #[error("id mapping length {got} does not match node_count {expected}")]
    IdMappingLengthMismatch { expected: usize, got: usize },
}

pub type ModelResult<T> = Result<T, ModelContractError>;
