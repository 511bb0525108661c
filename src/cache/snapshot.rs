//! @acp:module "Cache Snapshot"
//! @acp:summary "JSON persistence for primality caches"
//! @acp:domain math
//! @acp:layer data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::{CacheStats, PrimeCache};
use crate::error::Result;

/// @acp:summary "Serializable copy of a cache's entries"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// Crate version that wrote the snapshot
    pub version: String,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
    /// Counters at the time of export
    #[serde(default)]
    pub stats: CacheStats,
    /// Keys known to be prime, ascending
    #[serde(default)]
    pub primes: Vec<u64>,
    /// Keys known to be composite (or below 2), ascending
    #[serde(default)]
    pub composites: Vec<u64>,
}

impl CacheSnapshot {
    /// @acp:summary "Capture the entries of a cache"
    pub fn capture<C: PrimeCache + ?Sized>(cache: &C) -> Self {
        let (mut primes, mut composites): (Vec<_>, Vec<_>) =
            cache.entries().into_iter().partition(|(_, is_prime)| *is_prime);
        primes.sort_unstable();
        composites.sort_unstable();

        Self {
            version: crate::VERSION.to_string(),
            generated_at: Utc::now(),
            stats: cache.stats(),
            primes: primes.into_iter().map(|(n, _)| n).collect(),
            composites: composites.into_iter().map(|(n, _)| n).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.primes.len() + self.composites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// @acp:summary "Load snapshot from JSON file"
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let snapshot = serde_json::from_reader(reader)?;
        Ok(snapshot)
    }

    /// @acp:summary "Write snapshot to JSON file"
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// @acp:summary "Insert snapshot entries into a cache"
    ///
    /// Existing entries win. A snapshot entry that contradicts the cache is
    /// skipped and logged. Returns the number of new entries.
    pub fn load_into<C: PrimeCache + ?Sized>(&self, cache: &mut C) -> usize {
        let tagged = self
            .primes
            .iter()
            .map(|n| (*n, true))
            .chain(self.composites.iter().map(|n| (*n, false)));

        let mut loaded = 0;
        for (number, is_prime) in tagged {
            match cache.peek(number) {
                Some(known) if known != is_prime => {
                    tracing::warn!(
                        number,
                        cached = known,
                        snapshot = is_prime,
                        "Snapshot entry conflicts with cache, keeping cached value"
                    );
                }
                Some(_) => {}
                None => {
                    cache.insert(number, is_prime);
                    loaded += 1;
                }
            }
        }
        loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{LruMemoCache, MemoCache};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_capture_partitions_and_sorts() {
        let mut cache = MemoCache::empty();
        for (n, p) in [(49, false), (37, true), (35, false), (41, true)] {
            cache.insert(n, p);
        }
        let snapshot = CacheSnapshot::capture(&cache);
        assert_eq!(snapshot.primes, vec![37, 41]);
        assert_eq!(snapshot.composites, vec![35, 49]);
        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot.version, crate::VERSION);
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("primes.cache.json");

        let snapshot = CacheSnapshot::capture(&MemoCache::seeded());
        snapshot.write_json(&path).unwrap();
        let loaded = CacheSnapshot::from_json(&path).unwrap();

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_load_into_keeps_existing_entries() {
        let snapshot = CacheSnapshot {
            version: crate::VERSION.to_string(),
            generated_at: Utc::now(),
            stats: CacheStats::default(),
            // 4 is wrongly listed as prime
            primes: vec![4, 101],
            composites: vec![100],
        };
        let mut cache = MemoCache::seeded();
        let loaded = snapshot.load_into(&mut cache);

        assert_eq!(loaded, 2);
        assert_eq!(cache.peek(4), Some(false));
        assert_eq!(cache.peek(101), Some(true));
        assert_eq!(cache.peek(100), Some(false));
    }

    #[test]
    fn test_load_into_bounded_cache() {
        let snapshot = CacheSnapshot {
            version: crate::VERSION.to_string(),
            generated_at: Utc::now(),
            stats: CacheStats::default(),
            primes: vec![101, 103, 107],
            composites: vec![],
        };
        let mut cache = LruMemoCache::new(2).unwrap();
        snapshot.load_into(&mut cache);
        assert_eq!(cache.len(), 2);
    }
}
