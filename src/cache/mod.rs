//! @acp:module "Cache"
//! @acp:summary "Memoization caches for primality results"
//! @acp:domain math
//! @acp:layer data
//! @acp:stability stable
//!
//! Primality is a pure function of its input, so every cache here is an
//! optimization only. Entries are insert-only: once a key is present its value
//! is never replaced.
//!
//! - [`MemoCache`]: unbounded map, seeded with 0..=31
//! - [`LruMemoCache`]: fixed capacity, least-recently-used eviction
//! - [`SharedCache`]: lock-wrapped handle for concurrent workers
//! - [`CacheSnapshot`]: JSON persistence

mod lru;
mod memo;
mod shared;
mod snapshot;

pub use lru::LruMemoCache;
pub use memo::MemoCache;
pub use shared::SharedCache;
pub use snapshot::CacheSnapshot;

use serde::{Deserialize, Serialize};

/// Primes up to and including the largest seeded key
pub const SMALL_PRIMES: [u64; 11] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31];

/// Largest key seeded into a fresh cache
pub const SEED_LIMIT: u64 = 31;

/// Known primality of every integer in `0..=SEED_LIMIT`
pub fn seed_entries() -> impl Iterator<Item = (u64, bool)> {
    (0..=SEED_LIMIT).map(|n| (n, SMALL_PRIMES.contains(&n)))
}

/// @acp:summary "Storage contract used by the primality oracle"
pub trait PrimeCache {
    /// Look up a known result. Counts as a hit or a miss.
    fn get(&mut self, number: u64) -> Option<bool>;

    /// Look up a known result without touching counters or recency
    fn peek(&self, number: u64) -> Option<bool>;

    /// Record a result. Existing entries are left untouched.
    fn insert(&mut self, number: u64, is_prime: bool);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> CacheStats;

    /// All current entries, in no particular order
    fn entries(&self) -> Vec<(u64, bool)>;
}

impl<C: PrimeCache + ?Sized> PrimeCache for Box<C> {
    fn get(&mut self, number: u64) -> Option<bool> {
        (**self).get(number)
    }

    fn peek(&self, number: u64) -> Option<bool> {
        (**self).peek(number)
    }

    fn insert(&mut self, number: u64, is_prime: bool) {
        (**self).insert(number, is_prime)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn stats(&self) -> CacheStats {
        (**self).stats()
    }

    fn entries(&self) -> Vec<(u64, bool)> {
        (**self).entries()
    }
}

/// @acp:summary "Cache usage counters"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
    /// Entries currently held
    pub entries: usize,
    /// Maximum entries, `None` when unbounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}
