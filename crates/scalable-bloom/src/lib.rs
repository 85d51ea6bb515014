//! # Scalable Bloom
//!
//! Probabilistic set membership: a partitioned Bloom filter and a scalable
//! variant that keeps its false positive rate bounded while the number of
//! elements grows without a known limit.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `Filter`: Partitioned Bloom filter, one address range per hash
//!   - `ScalableFilter`: Chain of growing filters with tightening targets
//!   - `HashStrategy` / `DigestStrategy`: k addresses from one digest
//!   - `ScalableConfig` / `ScalableConfigBuilder`: Validated parameters
//!
//! - **Codec Layer** (`codec/`): Snapshots and their JSON / binary encodings
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MembershipFilter`: Driving port shared by both filter kinds
//!   - `SnapshotStore`: Driven port for persisted snapshots
//!
//! - **Adapters Layer** (`adapters/`): `FileSnapshotStore`
//!
//! ## Invariants
//!
//! - **No false negatives**: once fed, an element always matches
//! - **Bounded FPR**: a scalable filter tightens the target of every new
//!   sub-filter by the tightening ratio, bounding the compounded rate
//! - **Not thread safe for writers**: `feed`, `merge` and `reset` take
//!   `&mut self`; share a filter behind a lock when several threads write
//!
//! ## Usage Example
//!
//! ```
//! use scalable_bloom::{Filter, ScalableFilter};
//!
//! let mut filter = Filter::new(512, 5)?;
//! filter.feed("Bloom");
//! assert!(filter.matches("Bloom"));
//!
//! let mut scalable = ScalableFilter::new_default(0.01)?;
//! for i in 0..10_000 {
//!     scalable.feed(format!("element_{i}"))?;
//! }
//! assert!(scalable.matches("element_42"));
//! assert!(scalable.filter_count() > 1);
//! # Ok::<(), scalable_bloom::FilterError>(())
//! ```
//!
//! ## References
//!
//! - Almeida, Baquero, Preguiça, Hutchison, "Scalable Bloom Filters",
//!   Information Processing Letters 101(6), 2007

pub mod adapters;
pub mod codec;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;

// Re-exports for convenience
pub use adapters::FileSnapshotStore;
pub use codec::{FilterSnapshot, ScalableSnapshot};
pub use domain::{
    DigestKind, DigestStrategy, Filter, HashStrategy, ScalableConfig, ScalableConfigBuilder,
    ScalableFilter,
};
pub use error::{ErrorKind, FilterError};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{MembershipFilter, SnapshotStore};
