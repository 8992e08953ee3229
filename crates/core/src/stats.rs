//! Hit/miss statistics collection and reporting.
//!
//! Tracks the two counters a run produces and derives the hit rate from
//! them. `hits + misses` always equals the number of accesses the driver
//! processed; skipped trace lines never reach these counters.

use crate::cache::Outcome;

/// Hit/miss counters for one simulation run.
///
/// Both counters are monotonically non-decreasing across the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Accesses that found their tag resident.
    pub hits: u64,
    /// Accesses that populated or replaced a line.
    pub misses: u64,
}

impl SimStats {
    /// Tallies one access outcome.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Hit => self.hits += 1,
            Outcome::Miss => self.misses += 1,
        }
    }

    /// Total accesses processed.
    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, in `[0.0, 1.0]`.
    ///
    /// Defined as `0.0` when no accesses were processed.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Prints the results banner to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("CACHE SIMULATION RESULTS");
        println!("==========================================================");
        println!("total_accesses           {}", self.accesses());
        println!("hits                     {}", self.hits);
        println!("misses                   {}", self.misses);
        println!("hit_rate                 {:.4} %", self.hit_rate() * 100.0);
        println!("==========================================================");
    }
}
