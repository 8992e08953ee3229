//! Set-associative cache storage and LRU replacement.
//!
//! This module holds the cache state itself: the sets-by-ways array of lines
//! and the logical clock used as the recency stamp. It provides:
//! 1. **Lookup:** A tag scan of the indexed set; a match refreshes the line's
//!    recency and reports a hit.
//! 2. **Insertion:** Cold misses fill the first invalid way; no eviction.
//! 3. **Eviction:** When the set is full, the valid line with the smallest
//!    `last_used` stamp is overwritten in place (LRU).
//!
//! Way position carries no recency meaning; recency lives entirely in the
//! `last_used` timestamps.

/// One storage slot within a set.
///
/// An invalid line's `tag` and `last_used` are meaningless and are never
/// consulted for eviction decisions.
#[derive(Debug, Clone, Copy, Default)]
struct CacheLine {
    valid: bool,
    tag: u64,
    last_used: u64,
}

/// Result of a single cache access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The tag was resident in the indexed set.
    Hit,
    /// The tag was absent; a line was populated or replaced.
    Miss,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Hit`].
    pub fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

/// The set-associative cache array.
///
/// Owns every set and line exclusively for the lifetime of one simulation
/// run. The logical clock advances exactly once per access, hit or miss,
/// before the access is resolved; `last_used` stamps are only compared
/// within a single run.
#[derive(Debug)]
pub struct Cache {
    sets: Vec<Vec<CacheLine>>,
    ways: usize,
    clock: u64,
}

impl Cache {
    /// Allocates `num_sets` sets of `ways` invalid lines, clock at zero.
    pub fn new(num_sets: usize, ways: usize) -> Self {
        Self {
            sets: vec![vec![CacheLine::default(); ways]; num_sets],
            ways,
            clock: 0,
        }
    }

    /// Performs one access and returns whether it hit.
    ///
    /// Accesses must be issued in input order: reordering two accesses to the
    /// same set can change which line LRU evicts, and therefore the hit/miss
    /// outcome of later accesses.
    ///
    /// # Panics
    ///
    /// This function will not panic for any `index` produced by
    /// [`Geometry::decode`](crate::geometry::Geometry::decode) against the
    /// geometry this cache was sized from: the decoder masks the index to
    /// `num_sets - 1`.
    pub fn access(&mut self, index: usize, tag: u64) -> Outcome {
        self.clock += 1;
        let set = &mut self.sets[index];

        // Tags are unique within a valid set, so scan order cannot change
        // which line matches.
        if let Some(line) = set.iter_mut().find(|line| line.valid && line.tag == tag) {
            line.last_used = self.clock;
            return Outcome::Hit;
        }

        // Cold miss: claim the first invalid way.
        if let Some(line) = set.iter_mut().find(|line| !line.valid) {
            *line = CacheLine {
                valid: true,
                tag,
                last_used: self.clock,
            };
            return Outcome::Miss;
        }

        // Set full: evict the line with the strictly smallest stamp. Ties
        // resolve to the lowest way index.
        let mut victim = 0;
        let mut min_used = u64::MAX;
        for (way, line) in set.iter().enumerate() {
            if line.last_used < min_used {
                min_used = line.last_used;
                victim = way;
            }
        }
        set[victim] = CacheLine {
            valid: true,
            tag,
            last_used: self.clock,
        };
        Outcome::Miss
    }

    /// Number of sets in the cache.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Number of ways per set.
    pub fn ways(&self) -> usize {
        self.ways
    }

    /// Current logical clock value (accesses processed so far).
    pub fn clock(&self) -> u64 {
        self.clock
    }
}
