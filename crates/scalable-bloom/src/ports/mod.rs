//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - membership API shared by every filter kind
//! - Driven Ports (outbound) - where encoded snapshots are persisted

pub mod inbound;
pub mod outbound;

pub use inbound::MembershipFilter;
pub use outbound::SnapshotStore;
