//! Thread-safe handle over a registry

use crate::call::{CallOutcome, RegistryCall};
use crate::errors::Result;
use crate::events::RegistryEvent;
use crate::registry::ParticipantRegistry;
use parking_lot::RwLock;
use std::sync::Arc;
use wastewatch_types::CallContext;

/// Cloneable handle that serializes mutations.
///
/// A mutating call holds the write lock for its whole guard-then-apply
/// sequence; queries share the read lock.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    inner: Arc<RwLock<ParticipantRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: ParticipantRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Apply a call and return its result together with the events it produced.
    pub fn apply(&self, ctx: &CallContext, call: &RegistryCall) -> (Result<CallOutcome>, Vec<RegistryEvent>) {
        let mut registry = self.inner.write();
        let result = registry.apply(ctx, call);
        let events = registry.take_events();
        (result, events)
    }

    /// Run a read-only closure against the registry.
    pub fn read<R>(&self, f: impl FnOnce(&ParticipantRegistry) -> R) -> R {
        f(&self.inner.read())
    }
}
