//! `SpatialIndex` table — the raw implicit KD-tree (`spec.md` §3/§6).
//!
//! `taro-model` owns parsing and the load-time invariants; the traversal
//! algorithm (`nearest`, the stack-based descent, tie-breaking) lives in
//! `taro-spatial`, which borrows this table rather than copying it — the
//! same split the teacher uses between `dt-spatial::RoadNetwork` (owns the
//! R-tree) and `dt-spatial::router` (only queries it).

use crate::error::{ModelContractError, ModelResult};
use crate::reader::TableReader;

#[derive(Copy, Clone, Debug)]
pub struct KdNode {
    pub split_value: f64,
    pub left_child: u32,
    pub right_child: u32,
    pub item_start: u32,
    pub item_count: u32,
    pub split_axis: u8,
    pub is_leaf: bool,
}

/// Sentinel child index meaning "no child".
pub const NO_CHILD: u32 = u32::MAX;

#[derive(Clone, Debug)]
pub struct SpatialIndex {
    pub tree_nodes: Vec<KdNode>,
    pub leaf_items: Vec<u32>,
    pub root_index: u32,
}

pub(crate) fn parse(r: &mut TableReader<'_>, node_count: u32) -> ModelResult<SpatialIndex> {
    let tree_node_count = r.read_u32()? as usize;
    let mut tree_nodes = Vec::with_capacity(tree_node_count);
    for _ in 0..tree_node_count {
        let split_value = r.read_f64()?;
        let left_child = r.read_u32()?;
        let right_child = r.read_u32()?;
        let item_start = r.read_u32()?;
        let item_count = r.read_u32()?;
        let split_axis = r.read_u8()?;
        let is_leaf = r.read_u8()? != 0;
        tree_nodes.push(KdNode {
            split_value,
            left_child,
            right_child,
            item_start,
            item_count,
            split_axis,
            is_leaf,
        });
    }

    let leaf_item_count = r.read_u32()? as usize;
    let leaf_items = r.read_u32_vec(leaf_item_count)?;
    let root_index = r.read_u32()?;

    let index = SpatialIndex { tree_nodes, leaf_items, root_index };
    validate(&index, node_count)?;
    Ok(index)
}

fn validate(index: &SpatialIndex, node_count: u32) -> ModelResult<()> {
    if index.tree_nodes.is_empty() {
        return Ok(());
    }
    if index.root_index as usize >= index.tree_nodes.len() {
        return Err(ModelContractError::SpatialRootOutOfRange {
            root: index.root_index,
            node_count: index.tree_nodes.len(),
        });
    }

    // Strict-tree check: every non-sentinel child index appears at most once
    // across all nodes.
    let mut child_owner: std::collections::HashMap<u32, usize> = std::collections::HashMap::new();
    for (i, n) in index.tree_nodes.iter().enumerate() {
        if n.is_leaf {
            if n.item_start as usize + n.item_count as usize > index.leaf_items.len() {
                return Err(ModelContractError::SpatialLeafSpanInvalid(i));
            }
            for &item in &index.leaf_items[n.item_start as usize..(n.item_start + n.item_count) as usize]
            {
                if item >= node_count {
                    return Err(ModelContractError::SpatialLeafItemOutOfRange {
                        index: i,
                        node_id: item,
                        node_count,
                    });
                }
            }
            continue;
        }

        if n.split_axis > 1 {
            return Err(ModelContractError::SpatialInvalidSplitAxis { node: i, axis: n.split_axis });
        }

        let mut any_child = false;
        for child in [n.left_child, n.right_child] {
            if child == NO_CHILD {
                continue;
            }
            any_child = true;
            if let Some(&owner) = child_owner.get(&child) {
                if owner != i {
                    return Err(ModelContractError::SpatialSharedChild(i));
                }
            } else {
                child_owner.insert(child, i);
            }
        }
        if !any_child {
            return Err(ModelContractError::SpatialInternalNodeNoChild(i));
        }
    }

    // Non-overlapping, in-bounds leaf spans across the whole leaf_items array.
    let mut spans: Vec<(u32, u32)> = index
        .tree_nodes
        .iter()
        .filter(|n| n.is_leaf)
        .map(|n| (n.item_start, n.item_start + n.item_count))
        .collect();
    spans.sort_unstable();
    for w in spans.windows(2) {
        if w[0].1 > w[1].0 {
            return Err(ModelContractError::SpatialLeafSpanInvalid(0));
        }
    }

    Ok(())
}
