//! Synthetic trace generation and the text trace format.
//!
//! This module produces and (de)serializes the memory-access stream that
//! exercises the cache. It provides:
//! 1. **Records:** [`AccessRecord`], an `(R|W, address)` pair; the kind is
//!    kept for format fidelity but does not affect hit/miss outcome.
//! 2. **Generation:** [`TraceGenerator`], a weighted mix of spatial, temporal,
//!    and random locality over an injectable RNG.
//! 3. **Trace files:** One access per line (`R 0x1a000`); readers skip lines
//!    that do not parse rather than failing the run.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::TraceConfig;

/// Percent of accesses that follow the sequential read stream.
const SPATIAL_PCT: u32 = 50;
/// Percent of accesses that write the per-trace hot address.
const TEMPORAL_PCT: u32 = 30;
// The remaining 20% are uniformly random reads.

/// Whether an access is a read or a write.
///
/// Both are treated identically for hit/miss purposes; no dirty-bit or
/// write-back behavior is modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// A load from memory.
    Read,
    /// A store to memory.
    Write,
}

/// One memory access: operation kind and 64-bit byte address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRecord {
    /// Read or write.
    pub kind: AccessKind,
    /// Byte address of the access.
    pub addr: u64,
}

impl AccessRecord {
    /// Parses one trace line of the form `<op> <address>`.
    ///
    /// `op` is `R` or `W`; the address is a hexadecimal literal with a
    /// leading `0x`/`0X` prefix. Returns `None` for anything else, letting
    /// the caller skip the line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let kind = match fields.next()? {
            "R" => AccessKind::Read,
            "W" => AccessKind::Write,
            _ => return None,
        };
        let literal = fields.next()?;
        let digits = literal
            .strip_prefix("0x")
            .or_else(|| literal.strip_prefix("0X"))?;
        let addr = u64::from_str_radix(digits, 16).ok()?;
        Some(Self { kind, addr })
    }
}

impl fmt::Display for AccessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.kind {
            AccessKind::Read => 'R',
            AccessKind::Write => 'W',
        };
        write!(f, "{op} {:#x}", self.addr)
    }
}

/// Synthetic workload generator.
///
/// Each generated item is drawn independently from a fixed categorical
/// distribution: 50% sequential reads at `base + 4*i` (array traversal),
/// 30% writes to one hot address chosen when the generator is built
/// (reused working-set data), 20% uniformly random reads in a bounded range
/// (irregular, conflict-inducing accesses).
///
/// The RNG is injectable so tests can fix the sequence; production use
/// defaults to a time-based seed, so a fresh trace is drawn each run.
#[derive(Debug)]
pub struct TraceGenerator<R: Rng = StdRng> {
    rng: R,
    length: usize,
    base_address: u64,
    hot_address: u64,
    random_limit: u64,
}

impl TraceGenerator<StdRng> {
    /// Builds a generator seeded from the config, or from wall-clock time
    /// when no seed is configured.
    pub fn new(config: &TraceConfig) -> Self {
        let seed = config.seed.unwrap_or_else(time_seed);
        tracing::debug!(seed, "seeding trace generator");
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TraceGenerator<R> {
    /// Builds a generator over a caller-supplied RNG.
    ///
    /// The hot address is drawn from the RNG immediately, once per trace.
    pub fn with_rng(config: &TraceConfig, mut rng: R) -> Self {
        let slots = config.hot_region_slots.max(1);
        let hot_address = config.hot_region_base + rng.random_range(0..slots) * 4;
        Self {
            rng,
            length: config.length,
            base_address: config.base_address,
            hot_address,
            random_limit: config.random_address_limit.max(1),
        }
    }

    /// Draws a complete trace.
    ///
    /// Each call consumes fresh randomness: regenerating draws a new
    /// sequence, not a replay.
    pub fn generate(&mut self) -> Vec<AccessRecord> {
        (0..self.length).map(|i| self.draw(i)).collect()
    }

    /// Draws the record at output index `i`.
    fn draw(&mut self, i: usize) -> AccessRecord {
        let category = self.rng.random_range(0..100u32);
        if category < SPATIAL_PCT {
            AccessRecord {
                kind: AccessKind::Read,
                addr: self.base_address + 4 * i as u64,
            }
        } else if category < SPATIAL_PCT + TEMPORAL_PCT {
            AccessRecord {
                kind: AccessKind::Write,
                addr: self.hot_address,
            }
        } else {
            AccessRecord {
                kind: AccessKind::Read,
                addr: self.rng.random_range(0..self.random_limit) * 4,
            }
        }
    }
}

/// Wall-clock nanoseconds as a seed; zero if the clock is before the epoch.
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}

/// Writes a trace file, one record per line.
///
/// # Errors
///
/// Returns any I/O error from creating or writing the file.
pub fn write_trace(path: &Path, records: &[AccessRecord]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for record in records {
        writeln!(out, "{record}")?;
    }
    out.flush()
}

/// Reads a trace file, skipping lines that do not parse.
///
/// Skipped lines are dropped before they reach the simulation driver; they
/// are never counted as hits or misses.
///
/// # Errors
///
/// Returns any I/O error from opening or reading the file. Malformed lines
/// are not errors.
pub fn read_trace(path: &Path) -> io::Result<Vec<AccessRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    let mut skipped = 0usize;
    for line in reader.lines() {
        let line = line?;
        match AccessRecord::parse(&line) {
            Some(record) => records.push(record),
            None => {
                if !line.trim().is_empty() {
                    skipped += 1;
                }
            }
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "skipped malformed trace lines");
    }
    Ok(records)
}
