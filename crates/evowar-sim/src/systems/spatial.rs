//! Spatial bucket index over the lane.
//!
//! Rebuilt from scratch every tick. Entries are plain entity handles, so a
//! unit that dies or is reaped later in the same tick may still be listed;
//! every query re-checks liveness against the world.

use hecs::{Entity, World};

use evowar_core::constants::MAX_BUCKET;

use crate::lane;

/// Lane units grouped into fixed-width buckets along x.
#[derive(Debug, Clone)]
pub struct BucketIndex {
    buckets: Vec<Vec<Entity>>,
}

impl Default for BucketIndex {
    fn default() -> Self {
        Self {
            buckets: vec![Vec::new(); MAX_BUCKET as usize + 1],
        }
    }
}

/// Bucket a unit at `x` is stored in.
pub fn clamped_bucket(x: f64) -> i64 {
    lane::bucket_of(x).clamp(0, MAX_BUCKET)
}

impl BucketIndex {
    /// Replace the contents with the live, in-lane units of `units`, kept in
    /// iteration order within each bucket.
    pub fn rebuild(&mut self, world: &World, units: impl IntoIterator<Item = Entity>) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        for entity in units {
            if !lane::is_live_unit(world, entity) {
                continue;
            }
            let Some(x) = lane::x_of(world, entity) else {
                continue;
            };
            if lane::in_lane(x) {
                self.buckets[clamped_bucket(x) as usize].push(entity);
            }
        }
    }

    /// Units in bucket `b`; empty for ids outside the lane.
    pub fn bucket(&self, b: i64) -> &[Entity] {
        if (0..=MAX_BUCKET).contains(&b) {
            &self.buckets[b as usize]
        } else {
            &[]
        }
    }

    /// Units in buckets `first..=last`, in bucket order.
    pub fn range(&self, first: i64, last: i64) -> impl Iterator<Item = Entity> + '_ {
        (first..=last).flat_map(move |b| self.bucket(b).iter().copied())
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
