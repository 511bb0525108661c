//! @acp:module "LRU Cache"
//! @acp:summary "Fixed-capacity primality cache with least-recently-used eviction"
//! @acp:domain math
//! @acp:layer data

use std::collections::{BTreeMap, HashMap};

use super::{seed_entries, CacheStats, PrimeCache};
use crate::error::{PrimesError, Result};

#[derive(Debug, Clone, Copy)]
struct Slot {
    is_prime: bool,
    stamp: u64,
}

/// @acp:summary "Bounded primality cache"
///
/// Every access stamps the key with a monotonically increasing counter;
/// `order` maps stamps back to keys so the oldest entry is found in O(log n).
#[derive(Debug, Clone)]
pub struct LruMemoCache {
    capacity: usize,
    slots: HashMap<u64, Slot>,
    order: BTreeMap<u64, u64>,
    clock: u64,
    stats: CacheStats,
}

impl LruMemoCache {
    /// Empty cache holding at most `capacity` entries
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(PrimesError::InvalidConfig(
                "cache capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            capacity,
            slots: HashMap::with_capacity(capacity.min(1 << 16)),
            order: BTreeMap::new(),
            clock: 0,
            stats: CacheStats::default(),
        })
    }

    /// Bounded cache seeded with 0..=31. Seeds count toward capacity.
    pub fn seeded(capacity: usize) -> Result<Self> {
        let mut cache = Self::new(capacity)?;
        for (number, is_prime) in seed_entries() {
            cache.insert(number, is_prime);
        }
        cache.stats = CacheStats::default();
        Ok(cache)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, number: u64) -> bool {
        self.slots.contains_key(&number)
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn evict_oldest(&mut self) {
        if let Some((_, key)) = self.order.pop_first() {
            self.slots.remove(&key);
            self.stats.evictions += 1;
            tracing::trace!(evicted = key, "LRU cache eviction");
        }
    }
}

impl PrimeCache for LruMemoCache {
    fn get(&mut self, number: u64) -> Option<bool> {
        let stamp = self.tick();
        match self.slots.get_mut(&number) {
            Some(slot) => {
                self.order.remove(&slot.stamp);
                slot.stamp = stamp;
                self.order.insert(stamp, number);
                self.stats.hits += 1;
                Some(slot.is_prime)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    fn peek(&self, number: u64) -> Option<bool> {
        self.slots.get(&number).map(|slot| slot.is_prime)
    }

    fn insert(&mut self, number: u64, is_prime: bool) {
        if self.slots.contains_key(&number) {
            return;
        }
        if self.slots.len() >= self.capacity {
            self.evict_oldest();
        }
        let stamp = self.tick();
        self.slots.insert(number, Slot { is_prime, stamp });
        self.order.insert(stamp, number);
        self.stats.inserts += 1;
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.slots.len(),
            capacity: Some(self.capacity),
            ..self.stats
        }
    }

    fn entries(&self) -> Vec<(u64, bool)> {
        self.slots.iter().map(|(n, s)| (*n, s.is_prime)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            LruMemoCache::new(0),
            Err(PrimesError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = LruMemoCache::new(2).unwrap();
        cache.insert(37, true);
        cache.insert(39, false);
        // Touch 37 so 39 becomes the oldest
        assert_eq!(cache.get(37), Some(true));
        cache.insert(41, true);

        assert!(cache.contains(37));
        assert!(!cache.contains(39));
        assert!(cache.contains(41));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_reinsert_keeps_value() {
        let mut cache = LruMemoCache::new(4).unwrap();
        cache.insert(49, false);
        cache.insert(49, true);
        assert_eq!(cache.get(49), Some(false));
    }

    #[test]
    fn test_small_seeded_cache_stays_within_capacity() {
        let cache = LruMemoCache::seeded(8).unwrap();
        assert_eq!(cache.len(), 8);
        // Most recent seeds survive
        assert!(cache.contains(31));
        assert!(!cache.contains(0));
        assert_eq!(cache.stats().evictions, 0);
        assert_eq!(cache.stats().capacity, Some(8));
    }
}
