//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Hash strategies deriving k partition addresses from one digest
//! - Closed-form parameter calculations
//! - The partitioned Bloom filter
//! - The scalable Bloom filter and its configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod bloom_filter;
pub mod config;
pub mod hash_functions;
pub mod parameters;
pub mod scalable;

pub use bloom_filter::Filter;
pub use config::{ScalableConfig, ScalableConfigBuilder};
pub use hash_functions::{DigestKind, DigestStrategy, HashStrategy};
pub use parameters::{hash_count_for_fpr, FILL_RATIO_THRESHOLD};
pub use scalable::ScalableFilter;
