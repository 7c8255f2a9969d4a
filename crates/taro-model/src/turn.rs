//! `TurnCost` table — `spec.md` §3/§6.
//!
//! Stored sorted by `(from_edge_idx, to_edge_idx)` for binary-search lookup,
//! the same discipline the teacher applies to `dt-spatial`'s CSR edge arrays
//! (sorted by source node for contiguous-range access).

use crate::error::{ModelContractError, ModelResult};
use crate::reader::TableReader;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TurnCost {
    pub from_edge: u32,
    pub to_edge: u32,
    /// Negative means the turn is forbidden.
    pub penalty_seconds: f32,
}

#[derive(Clone, Debug, Default)]
pub struct TurnCostTable {
    entries: Vec<TurnCost>,
}

impl TurnCostTable {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up the turn penalty for `from_edge -> to_edge`, if any is
    /// declared. Returns `None` when no explicit turn cost exists (the
    /// caller then applies no penalty — not the same as "forbidden").
    pub fn lookup(&self, from_edge: u32, to_edge: u32) -> Option<TurnCost> {
        self.entries
            .binary_search_by(|t| (t.from_edge, t.to_edge).cmp(&(from_edge, to_edge)))
            .ok()
            .map(|i| self.entries[i])
    }
}

pub(crate) fn parse(r: &mut TableReader<'_>, edge_count: u32) -> ModelResult<TurnCostTable> {
    let count = r.read_u32()? as usize;
    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let from_edge = r.read_u32()?;
        let to_edge = r.read_u32()?;
        let penalty_seconds = r.read_f32()?;
        entries.push(TurnCost { from_edge, to_edge, penalty_seconds });
    }
    validate(&entries, edge_count)?;
    Ok(TurnCostTable { entries })
}

fn validate(entries: &[TurnCost], edge_count: u32) -> ModelResult<()> {
    for (i, t) in entries.iter().enumerate() {
        if t.from_edge >= edge_count || t.to_edge >= edge_count {
            return Err(ModelContractError::TurnCostEdgeOutOfRange {
                index: i,
                from: t.from_edge,
                to: t.to_edge,
                edge_count,
            });
        }
    }
    for (i, w) in entries.windows(2).enumerate() {
        let a = (w[0].from_edge, w[0].to_edge);
        let b = (w[1].from_edge, w[1].to_edge);
        if a > b {
            return Err(ModelContractError::TurnCostsNotSorted(i + 1));
        }
        if a == b {
            return Err(ModelContractError::TurnCostsDuplicated(i + 1));
        }
    }
    Ok(())
}
