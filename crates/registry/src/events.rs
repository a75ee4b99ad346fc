//! Events emitted by successful registry mutations

use serde::{Deserialize, Serialize};
use wastewatch_types::{Identity, LedgerHeight, Role};

/// What happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegistryEventKind {
    Registered { user: Identity, role: Role },
    Verified { user: Identity, verifier: Identity },
    ProfileUpdated { user: Identity },
    Deactivated { user: Identity, by: Identity },
    RoleChanged { user: Identity, from: Role, to: Role },
    Paused,
    Unpaused,
    AdminChanged { previous: Identity, new: Identity },
    BulkVerified { attempted: usize, verified: usize },
}

/// Journal entry for one state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEvent {
    pub height: LedgerHeight,
    #[serde(flatten)]
    pub kind: RegistryEventKind,
}

/// Pending events not yet drained by the host.
#[derive(Debug, Default, Clone)]
pub struct EventJournal {
    pending: Vec<RegistryEvent>,
}

impl EventJournal {
    pub fn record(&mut self, height: LedgerHeight, kind: RegistryEventKind) {
        tracing::info!(height, event = ?kind, "registry event");
        self.pending.push(RegistryEvent { height, kind });
    }

    pub fn drain(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.pending)
    }
}
