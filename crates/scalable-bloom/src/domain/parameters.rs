//! Closed-form Bloom filter parameter calculations
//!
//! Formulas:
//! - k = ceil(log2(1/p))                    -- hash count for a target FPR
//! - fill ≈ 1 - (1 - 1/section)^n           -- per-partition fill estimate
//! - FPR ≈ fill^k                           -- partitioned filter FPR
//! - FPR(chain) = 1 - Π(1 - FPR_i)          -- union of sub-filters

/// Fill ratio above which a scalable filter opens a new sub-filter
pub const FILL_RATIO_THRESHOLD: f64 = 0.3;

/// Hash count needed for a false positive probability `fpr`
///
/// Returns at least 1 for any `fpr` in `(0, 1)`.
pub fn hash_count_for_fpr(fpr: f64) -> usize {
    (1.0 / fpr).log2().ceil() as usize
}

/// Estimated probability that a given bit of a partition of `section_bits`
/// bits is set after `inserted` uniform insertions
pub fn estimate_fill_ratio(section_bits: usize, inserted: u64) -> f64 {
    if section_bits == 0 {
        return 1.0;
    }
    let miss = 1.0 - 1.0 / section_bits as f64;
    1.0 - miss.powf(inserted as f64)
}

/// False positive probability of a partitioned filter with the given fill
/// ratio and hash count
pub fn partitioned_fpr(fill_ratio: f64, k: usize) -> f64 {
    fill_ratio.clamp(0.0, 1.0).powi(k as i32)
}

/// Probability that at least one of several independent filters reports a
/// false positive
pub fn compound_fpr<I>(rates: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    1.0 - rates
        .into_iter()
        .map(|p| 1.0 - p.clamp(0.0, 1.0))
        .product::<f64>()
}
