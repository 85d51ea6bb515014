//! Adapters Layer (Driven Adapters)
//!
//! Implementations of driven ports.
//!
//! ## Adapters
//!
//! - `FileSnapshotStore` - Persists encoded snapshots in a single file

pub mod file_store;

pub use file_store::FileSnapshotStore;
