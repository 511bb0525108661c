//! @acp:module "Memo Cache"
//! @acp:summary "Unbounded insert-only primality cache"
//! @acp:domain math
//! @acp:layer data

use std::collections::HashMap;

use super::{seed_entries, CacheStats, PrimeCache};

/// @acp:summary "Unbounded map from integer to primality"
///
/// Grows by one entry per distinct integer tested and never evicts. Use
/// [`super::LruMemoCache`] when the set of inputs is unbounded.
#[derive(Debug, Clone, Default)]
pub struct MemoCache {
    entries: HashMap<u64, bool>,
    stats: CacheStats,
}

impl MemoCache {
    /// Cache seeded with the primality of 0..=31
    pub fn seeded() -> Self {
        let mut cache = Self::empty();
        cache.entries.extend(seed_entries());
        cache
    }

    /// Cache without any entries
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, number: u64) -> bool {
        self.entries.contains_key(&number)
    }
}

impl PrimeCache for MemoCache {
    fn get(&mut self, number: u64) -> Option<bool> {
        let found = self.entries.get(&number).copied();
        match found {
            Some(_) => self.stats.hits += 1,
            None => self.stats.misses += 1,
        }
        found
    }

    fn peek(&self, number: u64) -> Option<bool> {
        self.entries.get(&number).copied()
    }

    fn insert(&mut self, number: u64, is_prime: bool) {
        if let std::collections::hash_map::Entry::Vacant(slot) = self.entries.entry(number) {
            slot.insert(is_prime);
            self.stats.inserts += 1;
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            capacity: None,
            ..self.stats
        }
    }

    fn entries(&self) -> Vec<(u64, bool)> {
        self.entries.iter().map(|(n, p)| (*n, *p)).collect()
    }
}
