//! Set-associative cache simulator library.
//!
//! This crate models the hit/miss behavior of a hardware set-associative cache
//! under a synthetic memory-access workload. It provides:
//! 1. **Geometry:** Derivation of set count and tag/index/offset bit widths, and
//!    address decomposition.
//! 2. **Cache:** The set-associative storage array with a logical clock and
//!    timestamp-based LRU eviction.
//! 3. **Trace:** A synthetic access-stream generator mixing spatial, temporal,
//!    and random locality, plus the text trace format (`R 0x1a000` lines).
//! 4. **Simulation:** The driver that decodes each access in order, feeds the
//!    cache, and accumulates hit/miss statistics.
//! 5. **Configuration:** Cache and trace parameters, deserializable from JSON
//!    or the `KEY: value` config format.

/// Set-associative cache storage and LRU replacement.
pub mod cache;
/// Simulator configuration (defaults, cache parameters, trace parameters).
pub mod config;
/// Cache geometry derivation and address decoding.
pub mod geometry;
/// Simulation driver feeding decoded accesses into the cache.
pub mod sim;
/// Hit/miss statistics collection and reporting.
pub mod stats;
/// Synthetic trace generation and the text trace format.
pub mod trace;

/// Root configuration type; use `Config::default()` or load from a file.
pub use crate::config::Config;
/// Frozen cache geometry; derive once with [`Geometry::derive`].
pub use crate::geometry::{Geometry, InvalidGeometry};
/// Top-level simulation run; construct with [`Simulation::new`].
pub use crate::sim::Simulation;
/// Hit/miss counters and derived hit rate.
pub use crate::stats::SimStats;
