//! Partitioned Bloom filter
//!
//! The `size * 8` bit array is split into `k` partitions of
//! `section_size = (size * 8) / k` bits; hash `i` only ever addresses
//! partition `i`. When `size * 8` is not a multiple of `k` the trailing
//! `size * 8 - k * section_size` bits are never set.
//!
//! INVARIANTS:
//! - `k >= 1` and `section_size >= 1`
//! - No false negatives: after `feed(x)`, `matches(x)` is true until `reset()`

use std::fmt;
use std::sync::Arc;

use bitvec::prelude::*;
use tracing::{debug, trace};

use super::hash_functions::{DigestStrategy, HashStrategy};
use super::parameters::{estimate_fill_ratio, partitioned_fpr};
use crate::error::FilterError;

/// Bloom filter with one address partition per hash function
#[derive(Clone)]
pub struct Filter {
    /// Bit array, bit `n` lives in byte `n / 8` at position `n % 8`
    bits: BitVec<u8, Lsb0>,
    /// Size in bytes
    size: usize,
    /// Number of partitions / hash values (k)
    k: usize,
    /// Feed calls since construction or last reset
    inserted: u64,
    hasher: Arc<dyn HashStrategy>,
}

impl Filter {
    /// Create an empty filter of `size` bytes with `k` partitions
    ///
    /// Fails with [`FilterError::InvalidParameters`] when `size` or `k` is
    /// zero or a partition would be empty, and with [`FilterError::Capacity`]
    /// when no digest is wide enough to address every partition.
    pub fn new(size: usize, k: usize) -> Result<Self, FilterError> {
        Self::check_dimensions(size, k)?;
        let strategy = DigestStrategy::new(k, total_bits(size)?)?;
        trace!(
            size = size,
            k = k,
            digest = ?strategy.digest(),
            bytes_per_hash = strategy.bytes_per_hash(),
            "Created partitioned filter"
        );
        Self::with_strategy(size, k, Arc::new(strategy))
    }

    /// Create an empty filter using a caller-supplied hash strategy
    ///
    /// The strategy must produce exactly `k` values per element.
    pub fn with_strategy(
        size: usize,
        k: usize,
        hasher: Arc<dyn HashStrategy>,
    ) -> Result<Self, FilterError> {
        Self::check_dimensions(size, k)?;
        if hasher.hash_count() != k {
            return Err(FilterError::InvalidParameters(format!(
                "hash strategy yields {} values, filter needs {}",
                hasher.hash_count(),
                k
            )));
        }
        Ok(Self {
            bits: bitvec![u8, Lsb0; 0; size * 8],
            size,
            k,
            inserted: 0,
            hasher,
        })
    }

    fn check_dimensions(size: usize, k: usize) -> Result<(), FilterError> {
        if size == 0 {
            return Err(FilterError::InvalidParameters(
                "filter size must be at least 1 byte".to_string(),
            ));
        }
        if k == 0 {
            return Err(FilterError::InvalidParameters(
                "hash count must be at least 1".to_string(),
            ));
        }
        if (total_bits(size)?) < k as u64 {
            return Err(FilterError::InvalidParameters(format!(
                "{} bits cannot hold {} partitions",
                size * 8,
                k
            )));
        }
        Ok(())
    }

    /// Add an element
    ///
    /// Feeding the same element twice sets no new bits but still counts as an
    /// insertion for [`Filter::estimate_fill_ratio`].
    pub fn feed(&mut self, element: impl AsRef<[u8]>) -> &mut Self {
        let section = self.section_size();
        let hashes = self.hasher.hashes(element.as_ref());
        for (i, hash) in hashes.iter().take(self.k).enumerate() {
            self.set_bit(i * section + (*hash % section as u64) as usize);
        }
        self.inserted += 1;
        self
    }

    /// Test whether an element may have been fed
    ///
    /// Returns:
    /// - `true` if the element might be in the set (could be false positive)
    /// - `false` if the element was definitely never fed
    pub fn matches(&self, element: impl AsRef<[u8]>) -> bool {
        let section = self.section_size();
        let hashes = self.hasher.hashes(element.as_ref());
        hashes
            .iter()
            .take(self.k)
            .enumerate()
            .all(|(i, hash)| self.is_set(i * section + (*hash % section as u64) as usize))
    }

    /// OR `other` into this filter
    ///
    /// Both filters must have the same size and hash count; on mismatch
    /// nothing is modified. The `inserted` counter of `self` is left as is.
    pub fn merge(&mut self, other: &Filter) -> Result<(), FilterError> {
        if self.size != other.size {
            debug!(left = self.size, right = other.size, "Rejected merge: size mismatch");
            return Err(FilterError::SizeMismatch {
                left: self.size,
                right: other.size,
            });
        }
        if self.k != other.k {
            debug!(left = self.k, right = other.k, "Rejected merge: hash count mismatch");
            return Err(FilterError::HashCountMismatch {
                left: self.k,
                right: other.k,
            });
        }

        let self_raw = self.bits.as_raw_mut_slice();
        let other_raw = other.bits.as_raw_slice();
        for (s, o) in self_raw.iter_mut().zip(other_raw.iter()) {
            *s |= *o;
        }
        Ok(())
    }

    /// Replace the bit array with a fresh zeroed one and zero the counter
    pub fn reset(&mut self) -> &mut Self {
        self.bits = bitvec![u8, Lsb0; 0; self.size * 8];
        self.inserted = 0;
        self
    }

    /// Exact fraction of set bits, O(size)
    pub fn fill_ratio(&self) -> f64 {
        self.bits_set() as f64 / (self.size * 8) as f64
    }

    /// Closed-form fill estimate `1 - (1 - 1/section_size)^inserted`, O(1)
    ///
    /// Assumes uniform hashing; use [`Filter::fill_ratio`] when the error
    /// must stay well under 0.1.
    pub fn estimate_fill_ratio(&self) -> f64 {
        estimate_fill_ratio(self.section_size(), self.inserted)
    }

    /// Current false positive probability, from the exact fill ratio
    pub fn estimated_fpr(&self) -> f64 {
        partitioned_fpr(self.fill_ratio(), self.k)
    }

    /// Filter size in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of partitions / hash values
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Feed calls since construction or last reset
    pub fn inserted(&self) -> u64 {
        self.inserted
    }

    /// Bits per partition
    pub fn section_size(&self) -> usize {
        (self.size * 8) / self.k
    }

    /// Number of bits set
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Raw bit buffer, exactly `size` bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    /// Rebuild a filter from its raw parts
    ///
    /// `bytes` must be exactly `size` bytes long.
    pub(crate) fn from_parts(
        size: usize,
        k: usize,
        inserted: u64,
        bytes: Vec<u8>,
    ) -> Result<Self, FilterError> {
        if bytes.len() != size {
            return Err(FilterError::Serialization(format!(
                "bit buffer is {} bytes, declared size is {}",
                bytes.len(),
                size
            )));
        }
        let mut filter = Self::new(size, k)?;
        filter.bits = BitVec::from_vec(bytes);
        filter.inserted = inserted;
        Ok(filter)
    }

    fn set_bit(&mut self, n: usize) {
        self.bits.set(n, true);
    }

    fn is_set(&self, n: usize) -> bool {
        self.bits[n]
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("size", &self.size)
            .field("k", &self.k)
            .field("inserted", &self.inserted)
            .field("bits_set", &self.bits_set())
            .field("hasher", &self.hasher)
            .finish()
    }
}

fn total_bits(size: usize) -> Result<u64, FilterError> {
    (size as u64)
        .checked_mul(8)
        .ok_or_else(|| FilterError::InvalidParameters(format!("filter size {size} overflows")))
}
