//! WasteWatch Participant Registry
//!
//! Records identity, role and verification status for the companies,
//! facilities, regulators and administrator of the waste-monitoring platform.
//! Sibling subsystems (compliance, incentives, reporting) consult it through
//! the read-only queries such as [`ParticipantRegistry::has_role`].
//!
//! The registry is a single synchronous state machine. Hosts supply the
//! caller identity and ledger height for each call and persist state through
//! a [`RegistryStore`].

pub mod call;
pub mod errors;
pub mod events;
pub mod registry;
pub mod shared;
pub mod storage;
pub mod types;

pub use call::{CallOutcome, CallReceipt, RegistryCall};
pub use errors::*;
pub use events::{RegistryEvent, RegistryEventKind};
pub use registry::ParticipantRegistry;
pub use shared::SharedRegistry;
pub use storage::{MemoryRegistryStore, RegistryStore, SledRegistryStore, StoredState};
pub use types::*;
pub use wastewatch_types::{CallContext, Identity, LedgerHeight, Role};

/// Registry crate version (for API introspection)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
