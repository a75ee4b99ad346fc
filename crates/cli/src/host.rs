//! Command line hosting layer
//!
//! Plays the part of the sequencer: each submitted call occupies the next
//! ledger height, whether it is accepted or rejected. State, receipt and
//! events of each call are committed to the store together.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use wastewatch_registry::{
    CallContext, CallReceipt, Identity, LedgerHeight, ParticipantRegistry, RegistryCall,
    RegistryStore, StoredState,
};

/// One entry of a call script: the authenticated caller and its call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub caller: Identity,
    #[serde(flatten)]
    pub call: RegistryCall,
}

pub struct RegistryHost<S: RegistryStore> {
    store: S,
    registry: ParticipantRegistry,
    height: LedgerHeight,
}

impl<S: RegistryStore> RegistryHost<S> {
    /// Deploy a fresh registry administered by `deployer`.
    pub fn init(store: S, deployer: Identity) -> Result<Self> {
        if store.load()?.is_some() {
            anyhow::bail!("registry store is already initialised");
        }
        let host = Self {
            store,
            registry: ParticipantRegistry::new(deployer),
            height: 0,
        };
        host.store.save(&host.state())?;
        info!(admin = %deployer, "registry initialised");
        Ok(host)
    }

    /// Open an existing registry.
    pub fn open(store: S) -> Result<Self> {
        let state = store
            .load()?
            .context("registry store is not initialised; run `wastewatch init` first")?;
        Ok(Self {
            store,
            registry: ParticipantRegistry::from_snapshot(state.snapshot),
            height: state.height,
        })
    }

    /// Apply `call` from `caller` at the next ledger height.
    pub fn submit(&mut self, caller: Identity, call: RegistryCall) -> Result<CallReceipt> {
        self.height += 1;
        let ctx = CallContext::new(caller, self.height);
        let result = self.registry.apply(&ctx, &call);
        let events = self.registry.take_events();

        let receipt = CallReceipt::new(&ctx, call, &result);
        match &result {
            Ok(_) => info!(op = receipt.call.name(), height = self.height, "call applied"),
            Err(err) => warn!(
                op = receipt.call.name(),
                height = self.height,
                code = err.code(),
                "call rejected: {err}"
            ),
        }

        self.store.commit(&self.state(), &receipt, &events)?;
        Ok(receipt)
    }

    /// Apply script entries in order; rejected entries do not stop the run.
    pub fn run_script(&mut self, entries: Vec<ScriptEntry>) -> Result<Vec<CallReceipt>> {
        entries
            .into_iter()
            .map(|entry| self.submit(entry.caller, entry.call))
            .collect()
    }

    pub fn registry(&self) -> &ParticipantRegistry {
        &self.registry
    }

    pub fn height(&self) -> LedgerHeight {
        self.height
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn state(&self) -> StoredState {
        StoredState {
            height: self.height,
            snapshot: self.registry.snapshot(),
        }
    }
}
