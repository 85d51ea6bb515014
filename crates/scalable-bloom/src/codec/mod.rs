//! Snapshot encoding
//!
//! - `snapshot` - typed, validated filter state
//! - `format` - JSON and binary encodings of that state

pub mod format;
pub mod snapshot;

pub use snapshot::{FilterSnapshot, ScalableSnapshot};
