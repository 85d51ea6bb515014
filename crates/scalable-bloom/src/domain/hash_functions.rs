//! Hash functions for the partitioned Bloom filter
//!
//! One cryptographic digest of the element is sliced into `k` big-endian
//! chunks, one per partition. The narrowest digest wide enough for
//! `k * bytes_per_hash` bytes is picked once, when the filter is built.
//!
//! Candidate digests, narrowest first: MD5 (16), SHA-1 (20), SHA-256 (32),
//! SHA-384 (48), SHA-512 (64).

use std::fmt;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::error::FilterError;

/// Widest digest available, in bytes
pub const MAX_DIGEST_BYTES: usize = 64;

/// A partition address is read into one `u64`
pub const MAX_BYTES_PER_HASH: usize = 8;

/// Maps an element to `k` unsigned integers, one per filter partition
///
/// Implementations must be deterministic and stateless between calls.
pub trait HashStrategy: Send + Sync + fmt::Debug {
    /// Number of values produced per element
    fn hash_count(&self) -> usize;

    /// Compute the `hash_count()` values for `element`
    fn hashes(&self, element: &[u8]) -> Vec<u64>;
}

/// Digest family used by [`DigestStrategy`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigestKind {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestKind {
    const ALL: [DigestKind; 5] = [
        DigestKind::Md5,
        DigestKind::Sha1,
        DigestKind::Sha256,
        DigestKind::Sha384,
        DigestKind::Sha512,
    ];

    /// Digest output length in bytes
    pub fn output_len(self) -> usize {
        match self {
            DigestKind::Md5 => 16,
            DigestKind::Sha1 => 20,
            DigestKind::Sha256 => 32,
            DigestKind::Sha384 => 48,
            DigestKind::Sha512 => 64,
        }
    }

    /// Narrowest digest producing at least `bytes` bytes
    pub fn narrowest_for(bytes: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.output_len() >= bytes)
    }
}

/// Digest-slicing [`HashStrategy`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DigestStrategy {
    k: usize,
    bytes_per_hash: usize,
    digest: DigestKind,
}

impl DigestStrategy {
    /// Build the strategy for `k` partitions over `total_bits` bits
    ///
    /// Each partition holds `total_bits / k` bits; any remainder is never
    /// addressed. Fails with [`FilterError::Capacity`] when one address would
    /// need more than 8 bytes or all `k` addresses more than 64 bytes.
    pub fn new(k: usize, total_bits: u64) -> Result<Self, FilterError> {
        if k == 0 {
            return Err(FilterError::InvalidParameters(
                "hash count must be at least 1".to_string(),
            ));
        }
        let section_bits = total_bits / k as u64;
        if section_bits == 0 {
            return Err(FilterError::InvalidParameters(format!(
                "{total_bits} bits cannot be split into {k} partitions"
            )));
        }

        let bytes_per_hash = hex_digits(section_bits);
        let capacity_error = || FilterError::Capacity {
            bytes_per_hash,
            hash_count: k,
            max_digest_bytes: MAX_DIGEST_BYTES,
        };
        if bytes_per_hash > MAX_BYTES_PER_HASH {
            return Err(capacity_error());
        }
        let needed = bytes_per_hash
            .checked_mul(k)
            .ok_or_else(capacity_error)?;
        let digest = DigestKind::narrowest_for(needed).ok_or_else(capacity_error)?;

        Ok(Self {
            k,
            bytes_per_hash,
            digest,
        })
    }

    /// Bytes of digest consumed per partition address
    pub fn bytes_per_hash(&self) -> usize {
        self.bytes_per_hash
    }

    /// Selected digest family
    pub fn digest(&self) -> DigestKind {
        self.digest
    }
}

impl HashStrategy for DigestStrategy {
    fn hash_count(&self) -> usize {
        self.k
    }

    fn hashes(&self, element: &[u8]) -> Vec<u64> {
        match self.digest {
            DigestKind::Md5 => split_digest(&Md5::digest(element), self.bytes_per_hash, self.k),
            DigestKind::Sha1 => split_digest(&Sha1::digest(element), self.bytes_per_hash, self.k),
            DigestKind::Sha256 => {
                split_digest(&Sha256::digest(element), self.bytes_per_hash, self.k)
            }
            DigestKind::Sha384 => {
                split_digest(&Sha384::digest(element), self.bytes_per_hash, self.k)
            }
            DigestKind::Sha512 => {
                split_digest(&Sha512::digest(element), self.bytes_per_hash, self.k)
            }
        }
    }
}

/// Number of hexadecimal digits needed to address `n` values: `ceil(log16(n))`
pub fn hex_digits(n: u64) -> usize {
    let mut digits = 0;
    let mut reach: u128 = 1;
    while reach < n as u128 {
        reach <<= 4;
        digits += 1;
    }
    digits
}

/// Slice `digest` into `k` chunks of `size` bytes, each read big-endian
///
/// Chunks shorter than 8 bytes are left-padded with zeros. The caller
/// guarantees `size <= 8` and `size * k <= digest.len()`.
pub fn split_digest(digest: &[u8], size: usize, k: usize) -> Vec<u64> {
    digest
        .chunks_exact(size.max(1))
        .take(k)
        .map(|chunk| {
            if size == 0 {
                return 0;
            }
            let mut word = [0u8; 8];
            word[8 - size..].copy_from_slice(chunk);
            u64::from_be_bytes(word)
        })
        .chain(std::iter::repeat(0))
        .take(k)
        .collect()
}
