//! `TemporalProfile` table — raw, validated wire representation.
//!
//! `taro-model` only parses and validates this table; cyclic interpolation
//! and day-mask selection (`spec.md` §4.5) live in `taro-profile`, which is
//! built from [`RawProfile`]s the same way `dt-schedule::ActivityPlan` is
//! built from a CSV-loaded `ScheduleRecord` in the teacher.

use crate::error::{ModelContractError, ModelResult};
use crate::reader::TableReader;

#[derive(Clone, Debug)]
pub struct RawProfile {
    pub profile_id: u32,
    pub day_mask: u32,
    pub buckets: Vec<f32>,
    pub global_multiplier: f32,
}

pub(crate) fn parse(r: &mut TableReader<'_>) -> ModelResult<Vec<RawProfile>> {
    let count = r.read_u32()? as usize;
    let mut profiles = Vec::with_capacity(count);
    for _ in 0..count {
        let profile_id = r.read_u32()?;
        let day_mask = r.read_u32()?;
        let buckets = r.read_u32_prefixed_f32_vec()?;
        let global_multiplier = r.read_f32()?;
        profiles.push(RawProfile { profile_id, day_mask, buckets, global_multiplier });
    }
    validate(&profiles)?;
    Ok(profiles)
}

fn validate(profiles: &[RawProfile]) -> ModelResult<()> {
    let mut seen_ids = std::collections::HashSet::with_capacity(profiles.len());
    for p in profiles {
        if !seen_ids.insert(p.profile_id) {
            return Err(ModelContractError::DuplicateProfileId(p.profile_id));
        }
        if p.day_mask == 0 || p.day_mask > 0x7F {
            return Err(ModelContractError::InvalidDayMask {
                profile_id: p.profile_id,
                day_mask: p.day_mask,
            });
        }
        if p.buckets.is_empty() {
            return Err(ModelContractError::EmptyBuckets(p.profile_id));
        }
        for (b, &v) in p.buckets.iter().enumerate() {
            if !v.is_finite() || v < 0.0 {
                return Err(ModelContractError::InvalidBucketValue {
                    profile_id: p.profile_id,
                    bucket: b,
                    value: v,
                });
            }
        }
        if !p.global_multiplier.is_finite() {
            return Err(ModelContractError::InvalidGlobalMultiplier(p.profile_id));
        }
    }
    Ok(())
}
