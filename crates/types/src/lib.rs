//! Shared primitives for the WasteWatch participant registry.
//!
//! Identities are opaque 32-byte principals supplied by the hosting layer;
//! roles form a fixed enumeration; ledger heights come from the external
//! sequencer.

pub mod identity;
pub mod role;

pub use identity::*;
pub use role::*;

/// Height of the hosting ledger at which a call executes.
pub type LedgerHeight = u64;

/// Per-call context supplied by the hosting layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CallContext {
    /// Authenticated principal issuing the call.
    pub caller: Identity,
    /// Ledger height the call executes at.
    pub height: LedgerHeight,
}

impl CallContext {
    pub fn new(caller: Identity, height: LedgerHeight) -> Self {
        Self { caller, height }
    }
}
