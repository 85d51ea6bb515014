//! Outbound Ports (Driven Ports)
//!
//! Persistence of encoded snapshots. The filter encodes itself; the store
//! only moves bytes, so a store failure is always [`FilterError::Io`] and a
//! decoding failure always [`FilterError::Serialization`].

use crate::domain::{Filter, ScalableFilter};
use crate::error::FilterError;

/// Persisted snapshot location (Driven Port)
pub trait SnapshotStore {
    /// Replace the stored snapshot with `encoded`
    fn save(&self, encoded: &[u8]) -> Result<(), FilterError>;

    /// Read back the stored snapshot
    fn load(&self) -> Result<Vec<u8>, FilterError>;
}

impl Filter {
    /// Write the JSON snapshot of this filter to `store`
    pub fn save_to<S: SnapshotStore + ?Sized>(&self, store: &S) -> Result<(), FilterError> {
        store.save(&self.to_json()?)
    }

    /// Read a JSON snapshot from `store`
    pub fn load_from<S: SnapshotStore + ?Sized>(store: &S) -> Result<Self, FilterError> {
        Filter::from_json(&store.load()?)
    }
}

impl ScalableFilter {
    /// Write the JSON snapshot of the whole chain to `store`
    pub fn save_to<S: SnapshotStore + ?Sized>(&self, store: &S) -> Result<(), FilterError> {
        store.save(&self.to_json()?)
    }

    /// Read a JSON snapshot of a chain from `store`
    pub fn load_from<S: SnapshotStore + ?Sized>(store: &S) -> Result<Self, FilterError> {
        ScalableFilter::from_json(&store.load()?)
    }
}
