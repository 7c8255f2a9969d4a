//! `ProfileStore` — borrowed, indexed view over a model's `RawProfile` table.
//!
//! `spec.md` §4.5: a missing profile id or a day outside the profile's
//! `day_mask` both resolve to the neutral multiplier `1.0`, never an error —
//! callers on the cost-engine hot path (`taro-cost`) never need to branch on
//! "does this edge have a profile".

use std::collections::HashMap;

use taro_model::RawProfile;

use crate::error::{ProfileError, ProfileResult};

/// Neutral multiplier returned for a missing profile or an inactive day.
pub const NEUTRAL_MULTIPLIER: f32 = 1.0;

/// Precomputed avg/min/max over a profile's buckets, for planner heuristics
/// that want a cheap bound without re-scanning every bucket on each call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProfileMetadata {
    pub avg: f32,
    pub min: f32,
    pub max: f32,
}

fn compute_metadata(buckets: &[f32], global_multiplier: f32) -> ProfileMetadata {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    let mut sum = 0.0f64;
    for &b in buckets {
        let effective = b * global_multiplier;
        min = min.min(effective);
        max = max.max(effective);
        sum += effective as f64;
    }
    ProfileMetadata { avg: (sum / buckets.len() as f64) as f32, min, max }
}

/// Indexed, read-only view over `ModelStore::profiles`.
///
/// Built once per model load (not per query): the id→index map and the
/// per-profile avg/min/max are both precomputed so every lookup below is
/// O(1) plus, for `interpolate`, one cheap floating-point remainder.
pub struct ProfileStore<'a> {
    profiles: &'a [RawProfile],
    by_id: HashMap<u32, usize>,
    metadata: Vec<ProfileMetadata>,
}

impl<'a> ProfileStore<'a> {
    pub fn new(profiles: &'a [RawProfile]) -> Self {
        let by_id = profiles.iter().enumerate().map(|(i, p)| (p.profile_id, i)).collect();
        let metadata = profiles.iter().map(|p| compute_metadata(&p.buckets, p.global_multiplier)).collect();
        Self { profiles, by_id, metadata }
    }

    fn get(&self, id: u32) -> Option<&'a RawProfile> {
        self.by_id.get(&id).map(|&i| &self.profiles[i])
    }

    pub fn has_profile(&self, id: u32) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn bucket_count(&self, id: u32) -> Option<usize> {
        self.get(id).map(|p| p.buckets.len())
    }

    /// `true` iff `id` exists and its `day_mask` has bit `dow` set.
    /// `dow` follows `taro_time`'s Mon=0..Sun=6 convention.
    pub fn is_active_on_day(&self, id: u32, dow: u8) -> bool {
        match self.get(id) {
            Some(p) => (p.day_mask >> dow) & 1 != 0,
            None => false,
        }
    }

    /// The profile if it exists and is active on `dow`, else `None` (the
    /// caller should treat `None` as "use the neutral multiplier").
    pub fn select_profile_for_day(&self, id: u32, dow: u8) -> Option<&'a RawProfile> {
        self.get(id).filter(|_| self.is_active_on_day(id, dow))
    }

    /// Integer-bucket lookup, wrapping modulo `bucket_count` — callers that
    /// only ever pass a bucket from [`taro_time::to_bucket`] never wrap, but
    /// the wrap keeps this total rather than panicking on misuse. The
    /// returned value is `buckets[bucket] * global_multiplier`.
    pub fn get_multiplier(&self, id: u32, bucket: usize) -> f32 {
        match self.get(id) {
            Some(p) if !p.buckets.is_empty() => p.buckets[bucket % p.buckets.len()] * p.global_multiplier,
            _ => NEUTRAL_MULTIPLIER,
        }
    }

    /// [`get_multiplier`](Self::get_multiplier), neutral unless `id` is
    /// active on `dow`.
    pub fn get_multiplier_for_day(&self, id: u32, dow: u8, bucket: usize) -> f32 {
        if self.is_active_on_day(id, dow) {
            self.get_multiplier(id, bucket)
        } else {
            NEUTRAL_MULTIPLIER
        }
    }

    /// Cyclic linear interpolation between adjacent buckets.
    ///
    /// An exact integer `fractional_bucket` returns that bucket's value
    /// exactly (no interpolation error). Negative or overflowing values wrap
    /// modulo `bucket_count` in both directions. Missing profiles return the
    /// neutral multiplier. Rejects non-finite input.
    pub fn interpolate(&self, id: u32, fractional_bucket: f64) -> ProfileResult<f32> {
        if !fractional_bucket.is_finite() {
            return Err(ProfileError::NonFiniteFractionalBucket(fractional_bucket));
        }
        let p = match self.get(id) {
            Some(p) if !p.buckets.is_empty() => p,
            _ => return Ok(NEUTRAL_MULTIPLIER),
        };
        let n = p.buckets.len() as f64;
        let wrapped = fractional_bucket.rem_euclid(n);
        let lo = wrapped.floor();
        let frac = wrapped - lo;
        let lo_idx = lo as usize % p.buckets.len();
        let hi_idx = (lo_idx + 1) % p.buckets.len();
        let lo_val = p.buckets[lo_idx] as f64;
        let hi_val = p.buckets[hi_idx] as f64;
        Ok((lo_val + (hi_val - lo_val) * frac) as f32 * p.global_multiplier)
    }

    /// Precomputed avg/min/max over `id`'s buckets, or `None` if missing.
    pub fn metadata(&self, id: u32) -> Option<ProfileMetadata> {
        self.by_id.get(&id).map(|&i| self.metadata[i])
    }
}
