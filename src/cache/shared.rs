//! @acp:module "Shared Cache"
//! @acp:summary "Thread-safe handle over any primality cache"
//! @acp:domain math
//! @acp:layer data

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{CacheStats, PrimeCache};

/// @acp:summary "Cloneable, lock-protected cache handle"
///
/// Each clone refers to the same underlying cache. Every read and insert takes
/// the lock once. Racing workers that miss on the same key compute the same
/// value, and inserts never overwrite, so the cache stays consistent without
/// holding the lock across the primality computation.
#[derive(Debug, Default)]
pub struct SharedCache<C> {
    inner: Arc<Mutex<C>>,
}

impl<C> Clone for SharedCache<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: PrimeCache> SharedCache<C> {
    pub fn new(cache: C) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    // A panic while holding the lock cannot leave a half-written entry, so
    // poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, C> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: PrimeCache> PrimeCache for SharedCache<C> {
    fn get(&mut self, number: u64) -> Option<bool> {
        self.lock().get(number)
    }

    fn peek(&self, number: u64) -> Option<bool> {
        self.lock().peek(number)
    }

    fn insert(&mut self, number: u64, is_prime: bool) {
        self.lock().insert(number, is_prime)
    }

    fn len(&self) -> usize {
        self.lock().len()
    }

    fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    fn entries(&self) -> Vec<(u64, bool)> {
        self.lock().entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoCache;

    #[test]
    fn test_clones_share_entries() {
        let shared = SharedCache::new(MemoCache::empty());
        let mut a = shared.clone();
        let mut b = shared.clone();
        a.insert(101, true);
        assert_eq!(b.get(101), Some(true));
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn test_concurrent_inserts_are_idempotent() {
        let shared = SharedCache::new(MemoCache::empty());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let mut cache = shared.clone();
                std::thread::spawn(move || {
                    for n in 100..200 {
                        cache.insert(n, n % 2 == 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(shared.len(), 100);
        assert_eq!(shared.stats().inserts, 100);
    }
}
