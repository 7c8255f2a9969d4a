//! `Landmark` table — forward/backward distance arrays for the ALT heuristic
//! (`spec.md` §4.9, §6).

use crate::error::{ModelContractError, ModelResult};
use crate::reader::TableReader;

#[derive(Clone, Debug)]
pub struct Landmark {
    pub node_idx: u32,
    pub forward_distances: Vec<f32>,
    pub backward_distances: Vec<f32>,
}

pub(crate) fn parse(r: &mut TableReader<'_>, node_count: u32) -> ModelResult<Vec<Landmark>> {
    let count = r.read_u32()? as usize;
    let mut landmarks = Vec::with_capacity(count);
    for i in 0..count {
        let node_idx = r.read_u32()?;
        if node_idx >= node_count {
            return Err(ModelContractError::LandmarkNodeOutOfRange { index: i, node_idx, node_count });
        }
        let forward_distances = r.read_f32_vec(node_count as usize)?;
        let backward_distances = r.read_f32_vec(node_count as usize)?;
        if forward_distances.len() != node_count as usize {
            return Err(ModelContractError::LandmarkDistanceLengthMismatch {
                index: i,
                expected: node_count as usize,
                got: forward_distances.len(),
            });
        }
        landmarks.push(Landmark { node_idx, forward_distances, backward_distances });
    }
    Ok(landmarks)
}
