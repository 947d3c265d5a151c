//! 地址缓存
//!
//! 以 (链, 用户) 为键的并发缓存，进程生命周期内不淘汰。
//!
//! 并发策略：查询未命中后在锁外计算，再以"不存在才插入"的方式写入并返回已存储的值。
//! 派生是纯函数，同一个键上并发计算的结果必然一致，先写入者胜出，
//! 所有调用方最终看到同一个值，不需要按键加锁。

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::domain::{chain_config::ChainId, seed::UserId};

type CacheKey = (ChainId, UserId);

/// 缓存统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub capacity: Option<usize>,
}

pub struct AddressCache {
    entries: DashMap<CacheKey, String>,
    /// 容量上限；写满后新地址直接返回而不缓存
    capacity: Option<usize>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl AddressCache {
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            entries: DashMap::new(),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, chain: ChainId, user: UserId) -> Option<String> {
        match self.entries.get(&(chain, user)) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value().clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// 写入地址，返回缓存中最终保存的值
    ///
    /// 键已存在时保留旧值（先写入者胜出）。
    pub fn put(&self, chain: ChainId, user: UserId, address: String) -> String {
        let key = (chain, user);
        if let Some(existing) = self.entries.get(&key) {
            return existing.value().clone();
        }

        if let Some(capacity) = self.capacity {
            if self.entries.len() >= capacity {
                tracing::debug!(capacity, "address cache full, returning uncached");
                return address;
            }
        }

        self.entries.entry(key).or_insert(address).value().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            capacity: self.capacity,
        }
    }
}

impl Default for AddressCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_put() {
        let cache = AddressCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.get(ChainId::Bitcoin, UserId(1)), None);

        let stored = cache.put(ChainId::Bitcoin, UserId(1), "bc1qfirst".to_string());
        assert_eq!(stored, "bc1qfirst");
        assert_eq!(
            cache.get(ChainId::Bitcoin, UserId(1)).as_deref(),
            Some("bc1qfirst")
        );
        assert_eq!(cache.get(ChainId::Litecoin, UserId(1)), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_first_writer_wins() {
        let cache = AddressCache::new();
        cache.put(ChainId::Ton, UserId(5), "first".to_string());
        let stored = cache.put(ChainId::Ton, UserId(5), "second".to_string());
        assert_eq!(stored, "first");
        assert_eq!(cache.get(ChainId::Ton, UserId(5)).as_deref(), Some("first"));
    }

    #[test]
    fn test_capacity_bound_without_eviction() {
        let cache = AddressCache::with_capacity(Some(2));
        cache.put(ChainId::Ethereum, UserId(1), "a".to_string());
        cache.put(ChainId::Ethereum, UserId(2), "b".to_string());
        let returned = cache.put(ChainId::Ethereum, UserId(3), "c".to_string());

        assert_eq!(returned, "c");
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(ChainId::Ethereum, UserId(3)), None);
        // 已有条目不受影响
        assert_eq!(cache.get(ChainId::Ethereum, UserId(1)).as_deref(), Some("a"));
    }

    #[test]
    fn test_concurrent_puts_agree() {
        let cache = AddressCache::new();
        let results: Vec<String> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let cache = &cache;
                    s.spawn(move || cache.put(ChainId::Solana, UserId(9), format!("v{}", i)))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let first = &results[0];
        assert!(results.iter().all(|r| r == first));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stats() {
        let cache = AddressCache::with_capacity(Some(10));
        cache.get(ChainId::Ripple, UserId(1));
        cache.put(ChainId::Ripple, UserId(1), "r1".to_string());
        cache.get(ChainId::Ripple, UserId(1));

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.capacity, Some(10));
    }
}
