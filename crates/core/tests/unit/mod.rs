//! # Unit Components
//!
//! This module organizes the unit tests by library module.




/// Unit tests for the simulation driver.
pub mod simulation;

/// Unit tests for hit/miss statistics.
pub mod stats;
