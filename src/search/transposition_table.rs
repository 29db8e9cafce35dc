//! Bounded transposition table with least-recently-used eviction.

use std::num::NonZeroUsize;

use log::trace;
use lru::LruCache;

use super::window::SearchWindow;
use super::zobrist::HashKey;
use super::INFINITY;

pub const DEFAULT_TRANSPOSITION_TABLE_CAPACITY: usize = 100_000;

/// What a previous search learned about a position.
///
/// `lower_value <= upper_value` always holds; the two are equal when the
/// stored value is exact.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry<M> {
    pub best_move: Option<M>,
    pub depth: i32,
    pub lower_value: i32,
    pub upper_value: i32,
    pub verification: u64,
}

impl<M> Entry<M> {
    pub fn exact(best_move: Option<M>, depth: i32, value: i32, verification: u64) -> Self {
        Self {
            best_move,
            depth,
            lower_value: value,
            upper_value: value,
            verification,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.lower_value == self.upper_value
    }
}

#[derive(Debug, PartialEq)]
pub enum Probe<M> {
    /// The stored bounds decide the node without searching it.
    Cutoff { value: i32, best_move: Option<M> },
    /// The node must be searched, but within a tighter window.
    Narrowed { window: SearchWindow },
    Miss,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableStatistics {
    pub hits: usize,
    /// Entry found, but searched to a shallower depth than needed.
    pub near_hits: usize,
    pub misses: usize,
    /// Entry found under the same key for a different position.
    pub collisions: usize,
    pub stores: usize,
}

pub struct TranspositionTable<M> {
    cache: LruCache<HashKey, Entry<M>>,
    stats: TableStatistics,
}

impl<M: Clone> Default for TranspositionTable<M> {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSPOSITION_TABLE_CAPACITY)
    }
}

impl<M: Clone> TranspositionTable<M> {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            stats: TableStatistics::default(),
        }
    }

    /// Inserts or replaces an entry, evicting the least recently used one when full.
    /// Returns the evicted entry, if any.
    pub fn put(&mut self, key: HashKey, entry: Entry<M>) -> Option<(HashKey, Entry<M>)> {
        self.stats.stores += 1;
        self.cache
            .push(key, entry)
            .filter(|(evicted_key, _)| *evicted_key != key)
    }

    /// Looks up an entry and marks it as most recently used.
    pub fn get(&mut self, key: HashKey) -> Option<&Entry<M>> {
        self.cache.get(&key)
    }

    pub fn contains(&self, key: HashKey) -> bool {
        self.cache.contains(&key)
    }

    /// Checks whether a stored entry can decide a node searched to `depth`
    /// with `window`.
    pub fn probe(
        &mut self,
        key: HashKey,
        verification: u64,
        depth: i32,
        window: SearchWindow,
    ) -> Probe<M> {
        let Some(entry) = self.cache.get(&key) else {
            self.stats.misses += 1;
            return Probe::Miss;
        };

        if entry.verification != verification {
            trace!("transposition collision on key {}", key);
            self.stats.collisions += 1;
            return Probe::Miss;
        }

        if entry.depth < depth {
            self.stats.near_hits += 1;
            return Probe::Miss;
        }

        self.stats.hits += 1;

        if entry.lower_value >= window.beta {
            return Probe::Cutoff {
                value: entry.lower_value,
                best_move: entry.best_move.clone(),
            };
        }
        if entry.upper_value <= window.alpha || entry.is_exact() {
            return Probe::Cutoff {
                value: entry.upper_value,
                best_move: entry.best_move.clone(),
            };
        }

        Probe::Narrowed {
            window: SearchWindow::new(
                window.alpha.max(entry.lower_value),
                window.beta.min(entry.upper_value),
            ),
        }
    }

    /// Records the outcome of searching a node with `window`. A value at or
    /// below alpha is an upper bound, at or above beta a lower bound, and
    /// anything in between is exact.
    pub fn store(
        &mut self,
        key: HashKey,
        verification: u64,
        best_move: Option<M>,
        depth: i32,
        value: i32,
        window: SearchWindow,
    ) {
        let (lower_value, upper_value) = if value <= window.alpha {
            (-INFINITY, value)
        } else if value >= window.beta {
            (value, INFINITY)
        } else {
            (value, value)
        };

        self.put(
            key,
            Entry {
                best_move,
                depth,
                lower_value,
                upper_value,
                verification,
            },
        );
    }

    /// Records a value that holds regardless of the search window, such as a leaf's worth.
    pub fn store_exact(&mut self, key: HashKey, verification: u64, depth: i32, value: i32) {
        self.put(key, Entry::exact(None, depth, value, verification));
    }

    pub fn clear(&mut self) {
        self.cache.clear();
        self.stats = TableStatistics::default();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }

    pub fn statistics(&self) -> TableStatistics {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u64) -> HashKey {
        HashKey::new(n)
    }

    #[test]
    fn test_capacity_two_evicts_oldest() {
        let mut table = TranspositionTable::<u8>::new(2);
        let (a, b, c) = (key(1), key(2), key(3));

        assert!(table.put(a, Entry::exact(Some(1), 0, 10, 0)).is_none());
        assert!(table.put(b, Entry::exact(Some(2), 0, 20, 0)).is_none());
        let evicted = table.put(c, Entry::exact(Some(3), 0, 30, 0));

        assert_eq!(evicted.map(|(k, _)| k), Some(a));
        assert!(table.get(a).is_none());
        assert_eq!(table.get(b).map(|e| e.lower_value), Some(20));
        assert_eq!(table.get(c).map(|e| e.lower_value), Some(30));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_get_promotes_entry() {
        let mut table = TranspositionTable::<u8>::new(2);
        table.put(key(1), Entry::exact(None, 0, 1, 0));
        table.put(key(2), Entry::exact(None, 0, 2, 0));

        // touching 1 makes 2 the eviction candidate
        assert!(table.get(key(1)).is_some());
        table.put(key(3), Entry::exact(None, 0, 3, 0));

        assert!(table.contains(key(1)));
        assert!(!table.contains(key(2)));
        assert!(table.contains(key(3)));
    }

    #[test]
    fn test_replacing_entry_is_not_an_eviction() {
        let mut table = TranspositionTable::<u8>::new(2);
        table.put(key(1), Entry::exact(None, 0, 1, 0));
        assert!(table.put(key(1), Entry::exact(None, 1, 5, 0)).is_none());
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(key(1)).map(|e| e.depth), Some(1));
    }

    #[test]
    fn test_zero_capacity_holds_one_entry() {
        let table = TranspositionTable::<u8>::new(0);
        assert_eq!(table.capacity(), 1);
    }

    #[test]
    fn test_store_classifies_bounds() {
        let mut table = TranspositionTable::<u8>::new(8);
        let window = SearchWindow::new(-10, 10);

        table.store(key(1), 0, None, 2, -10, window);
        table.store(key(2), 0, None, 2, 10, window);
        table.store(key(3), 0, None, 2, 3, window);

        let upper = table.get(key(1)).cloned().unwrap();
        assert_eq!((upper.lower_value, upper.upper_value), (-INFINITY, -10));
        let lower = table.get(key(2)).cloned().unwrap();
        assert_eq!((lower.lower_value, lower.upper_value), (10, INFINITY));
        let exact = table.get(key(3)).cloned().unwrap();
        assert!(exact.is_exact());
        assert_eq!(exact.lower_value, 3);
    }

    #[test]
    fn test_probe_cutoffs_and_narrowing() {
        let mut table = TranspositionTable::<u8>::new(8);
        table.put(
            key(1),
            Entry {
                best_move: Some(7),
                depth: 3,
                lower_value: 5,
                upper_value: 50,
                verification: 0,
            },
        );

        assert_eq!(
            table.probe(key(1), 0, 3, SearchWindow::new(0, 4)),
            Probe::Cutoff {
                value: 5,
                best_move: Some(7)
            }
        );
        assert_eq!(
            table.probe(key(1), 0, 2, SearchWindow::new(60, 100)),
            Probe::Cutoff {
                value: 50,
                best_move: Some(7)
            }
        );
        assert_eq!(
            table.probe(key(1), 0, 3, SearchWindow::new(0, 100)),
            Probe::Narrowed {
                window: SearchWindow::new(5, 50)
            }
        );
        assert_eq!(table.statistics().hits, 3);
    }

    #[test]
    fn test_probe_exact_entry() {
        let mut table = TranspositionTable::<u8>::new(8);
        table.put(key(1), Entry::exact(Some(1), 0, 12, 0));
        assert_eq!(
            table.probe(key(1), 0, 0, SearchWindow::full()),
            Probe::Cutoff {
                value: 12,
                best_move: Some(1)
            }
        );
    }

    #[test]
    fn test_probe_misses() {
        let mut table = TranspositionTable::<u8>::new(8);
        table.put(key(1), Entry::exact(None, 2, 12, 99));

        assert_eq!(table.probe(key(2), 99, 0, SearchWindow::full()), Probe::Miss);
        assert_eq!(table.probe(key(1), 99, 3, SearchWindow::full()), Probe::Miss);
        assert_eq!(table.probe(key(1), 98, 0, SearchWindow::full()), Probe::Miss);

        let stats = table.statistics();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.near_hits, 1);
        assert_eq!(stats.collisions, 1);
        assert_eq!(stats.hits, 0);
    }

    #[test]
    fn test_clear() {
        let mut table = TranspositionTable::<u8>::new(8);
        table.put(key(1), Entry::exact(None, 0, 0, 0));
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.statistics(), TableStatistics::default());
    }
}
