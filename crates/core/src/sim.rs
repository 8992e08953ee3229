//! Simulation driver: owns the geometry, the cache, and the counters
//! side-by-side.
//!
//! The driver defines the required traversal order: each record is decoded
//! and applied to the cache strictly in input order, because reordering two
//! accesses to the same set can change which line LRU evicts. Geometry is
//! derived and frozen before any cache state is allocated; an invalid
//! geometry fails the run outright with no cache touched.

use crate::cache::Cache;
use crate::config::CacheParams;
use crate::geometry::{Geometry, InvalidGeometry};
use crate::stats::SimStats;
use crate::trace::AccessRecord;

/// Top-level simulation run: frozen geometry + cache state + counters.
#[derive(Debug)]
pub struct Simulation {
    geometry: Geometry,
    cache: Cache,
    stats: SimStats,
}

impl Simulation {
    /// Derives the geometry and allocates the cache.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidGeometry`] when the parameters do not describe a
    /// realizable cache; no state is allocated in that case.
    pub fn new(params: &CacheParams) -> Result<Self, InvalidGeometry> {
        let geometry = Geometry::derive(
            params.cache_size_bytes(),
            params.block_size_bytes,
            params.associativity,
        )?;
        tracing::debug!(%geometry, "derived cache geometry");
        Ok(Self {
            cache: Cache::new(geometry.num_sets, params.associativity),
            geometry,
            stats: SimStats::default(),
        })
    }

    /// Processes one access record.
    ///
    /// The operation kind is ignored: reads and writes are identical for
    /// hit/miss purposes in this model.
    pub fn step(&mut self, record: &AccessRecord) {
        let decoded = self.geometry.decode(record.addr);
        let outcome = self.cache.access(decoded.index, decoded.tag);
        self.stats.record(outcome);
    }

    /// Processes an entire trace in input order.
    pub fn run<I>(&mut self, trace: I)
    where
        I: IntoIterator<Item = AccessRecord>,
    {
        for record in trace {
            self.step(&record);
        }
    }

    /// The frozen geometry for this run.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Consumes the run, returning its final counters.
    pub fn into_stats(self) -> SimStats {
        self.stats
    }
}
