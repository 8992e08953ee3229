//! # Statistics Tests
//!
//! Verifies counter accounting and hit-rate derivation, including the
//! zero-access case.

use cachesim_core::cache::Outcome;
use cachesim_core::stats::SimStats;
use pretty_assertions::assert_eq;

#[test]
fn default_stats_are_empty() {
    let stats = SimStats::default();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.accesses(), 0);
}

#[test]
fn record_tallies_each_outcome() {
    let mut stats = SimStats::default();
    stats.record(Outcome::Miss);
    stats.record(Outcome::Hit);
    stats.record(Outcome::Hit);

    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.accesses(), 3);
}

#[test]
fn hit_rate_is_hits_over_total() {
    let stats = SimStats { hits: 3, misses: 1 };
    assert_eq!(stats.hit_rate(), 0.75);
}

#[test]
fn hit_rate_of_no_accesses_is_zero() {
    assert_eq!(SimStats::default().hit_rate(), 0.0);
}

#[test]
fn hit_rate_extremes() {
    assert_eq!(SimStats { hits: 5, misses: 0 }.hit_rate(), 1.0);
    assert_eq!(SimStats { hits: 0, misses: 5 }.hit_rate(), 0.0);
}
