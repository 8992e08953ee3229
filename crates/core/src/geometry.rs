//! Cache geometry derivation and address decoding.
//!
//! This module computes the shape of the cache from its configured size,
//! block size, and associativity, and splits 64-bit addresses into the
//! tag/index/offset fields that shape implies. It provides:
//! 1. **Derivation:** `Geometry::derive` validates the parameters and computes
//!    set count and bit widths once, before any cache state is allocated.
//! 2. **Decoding:** `Geometry::decode`, a pure total function from any `u64`
//!    address to its `(tag, index)` pair.
//! 3. **Validation errors:** [`InvalidGeometry`], one variant per rejected
//!    parameter combination, so the CLI can map failures to an exit status.

use std::fmt;

use thiserror::Error;

/// Rejected cache parameter combinations.
///
/// All variants are fatal and raised before any cache state exists. Block
/// size and set count must be exact powers of two: a non-power-of-two size
/// has no whole-bit offset/index split, and truncating the log would silently
/// decode addresses against the wrong fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGeometry {
    /// Associativity of zero leaves no ways to hold any block.
    #[error("associativity must be non-zero")]
    ZeroAssociativity,

    /// Block size is zero or not a power of two.
    #[error("block size must be a power of two, got {0} bytes")]
    BlockSizeNotPowerOfTwo(usize),

    /// The cache is too small for even one set at this block size and
    /// associativity.
    #[error("geometry yields zero sets ({cache_bytes} byte cache, {block_bytes} byte blocks, {ways} ways)")]
    ZeroSets {
        /// Configured cache size in bytes.
        cache_bytes: usize,
        /// Configured block size in bytes.
        block_bytes: usize,
        /// Configured associativity.
        ways: usize,
    },

    /// The derived set count is not a power of two, so no whole number of
    /// index bits selects a set.
    #[error("derived set count must be a power of two, got {0}")]
    SetCountNotPowerOfTwo(usize),
}

/// A decoded 64-bit address: which set it maps to and the block identity
/// within that set. The byte offset within the block is discarded; it never
/// affects hit/miss outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedAddress {
    /// Block identity within the selected set.
    pub tag: u64,
    /// Set index; always `< num_sets` by construction.
    pub index: usize,
}

/// Frozen cache geometry.
///
/// Derived once from the configuration and never mutated afterward. The three
/// bit widths always partition a 64-bit address exactly:
/// `offset_bits + index_bits + tag_bits == 64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Number of sets in the cache.
    pub num_sets: usize,
    /// Bits selecting a byte within a block (`log2(block_size_bytes)`).
    pub offset_bits: u32,
    /// Bits selecting a set (`log2(num_sets)`).
    pub index_bits: u32,
    /// Remaining high bits identifying the block within its set.
    pub tag_bits: u32,
}

impl Geometry {
    /// Derives the cache geometry from validated size parameters.
    ///
    /// Computes `num_blocks = cache_size_bytes / block_size_bytes`,
    /// `num_sets = num_blocks / associativity`, and the three bit widths,
    /// assuming a 64-bit address space.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidGeometry`] when associativity is zero, when the block
    /// size or derived set count is not a power of two, or when the derived
    /// set count is zero.
    pub fn derive(
        cache_size_bytes: usize,
        block_size_bytes: usize,
        associativity: usize,
    ) -> Result<Self, InvalidGeometry> {
        if associativity == 0 {
            return Err(InvalidGeometry::ZeroAssociativity);
        }
        if !block_size_bytes.is_power_of_two() {
            return Err(InvalidGeometry::BlockSizeNotPowerOfTwo(block_size_bytes));
        }

        let num_blocks = cache_size_bytes / block_size_bytes;
        let num_sets = num_blocks / associativity;
        if num_sets == 0 {
            return Err(InvalidGeometry::ZeroSets {
                cache_bytes: cache_size_bytes,
                block_bytes: block_size_bytes,
                ways: associativity,
            });
        }
        if !num_sets.is_power_of_two() {
            return Err(InvalidGeometry::SetCountNotPowerOfTwo(num_sets));
        }

        let offset_bits = block_size_bytes.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        let tag_bits = 64 - index_bits - offset_bits;

        Ok(Self {
            num_sets,
            offset_bits,
            index_bits,
            tag_bits,
        })
    }

    /// Splits an address into its tag and set index.
    ///
    /// Pure and total over all `u64` inputs. Zero index or offset bits
    /// degenerate correctly: an empty mask selects set 0, a zero shift
    /// keeps every bit.
    pub fn decode(&self, addr: u64) -> DecodedAddress {
        let address_no_offset = addr >> self.offset_bits;
        let index_mask = (1u64 << self.index_bits) - 1;
        let index = (address_no_offset & index_mask) as usize;
        let tag = address_no_offset >> self.index_bits;
        DecodedAddress { tag, index }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sets, offset/index/tag = {}/{}/{} bits",
            self.num_sets, self.offset_bits, self.index_bits, self.tag_bits
        )
    }
}
