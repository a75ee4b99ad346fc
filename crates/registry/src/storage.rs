//! Persistence backends for registry state
//!
//! The registry itself is an in-memory state machine; hosts persist it
//! between calls through a [`RegistryStore`].

use crate::call::CallReceipt;
use crate::errors::StoreError;
use crate::events::RegistryEvent;
use crate::types::{RegistrySnapshot, RoleCounts, UserRecord};
use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sled::transaction::{ConflictableTransactionError, TransactionError};
use sled::{Batch, Db, Transactional, Tree};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use wastewatch_types::{Identity, LedgerHeight, Role};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Registry snapshot plus the last ledger height the host applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredState {
    pub height: LedgerHeight,
    pub snapshot: RegistrySnapshot,
}

/// Abstract storage trait
pub trait RegistryStore {
    /// Load the persisted state, `None` for a store that was never initialised.
    fn load(&self) -> StoreResult<Option<StoredState>>;
    fn save(&self, state: &StoredState) -> StoreResult<()>;
    /// Persist the state after a call together with its receipt and events,
    /// all or nothing.
    fn commit(
        &self,
        state: &StoredState,
        receipt: &CallReceipt,
        events: &[RegistryEvent],
    ) -> StoreResult<()>;
    fn receipts(&self) -> StoreResult<Vec<CallReceipt>>;
    fn events(&self) -> StoreResult<Vec<RegistryEvent>>;
}

const META_ADMIN: &[u8] = b"admin";
const META_PAUSED: &[u8] = b"paused";
const META_HEIGHT: &[u8] = b"height";

/// Sled-backed store
///
/// Trees: `users` (identity → record), `role_counts` (role → count),
/// `metadata` (admin, paused, height), `receipts` and `events` (append-only,
/// keyed by a monotonic id).
pub struct SledRegistryStore {
    db: Db,
    users: Tree,
    role_counts: Tree,
    metadata: Tree,
    receipts: Tree,
    events: Tree,
}

impl SledRegistryStore {
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let db = sled::open(path)?;
        let users = db.open_tree("users")?;
        let role_counts = db.open_tree("role_counts")?;
        let metadata = db.open_tree("metadata")?;
        let receipts = db.open_tree("receipts")?;
        let events = db.open_tree("events")?;

        Ok(Self {
            db,
            users,
            role_counts,
            metadata,
            receipts,
            events,
        })
    }

    pub fn flush(&self) -> StoreResult<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Batch appending `values` under fresh monotonic ids.
    fn append_batch<T: Serialize>(&self, values: &[T]) -> StoreResult<Batch> {
        let mut batch = Batch::default();
        for value in values {
            let id = self.db.generate_id()?;
            batch.insert(id.to_be_bytes().to_vec(), serde_json::to_vec(value)?);
        }
        Ok(batch)
    }

    /// Apply state, receipt and event batches in one multi-tree transaction.
    fn write(&self, state: &StoredState, receipts: Batch, events: Batch) -> StoreResult<()> {
        let (users, counts, metadata) = state_batches(state)?;
        let trees = (
            &self.users,
            &self.role_counts,
            &self.metadata,
            &self.receipts,
            &self.events,
        );
        trees
            .transaction(|(tx_users, tx_counts, tx_metadata, tx_receipts, tx_events)| {
                tx_users.apply_batch(&users)?;
                tx_counts.apply_batch(&counts)?;
                tx_metadata.apply_batch(&metadata)?;
                tx_receipts.apply_batch(&receipts)?;
                tx_events.apply_batch(&events)?;
                Ok::<_, ConflictableTransactionError<()>>(())
            })
            .map_err(|err| match err {
                TransactionError::Storage(err) => StoreError::Database(err),
                TransactionError::Abort(()) => StoreError::Corrupt("write aborted".into()),
            })?;
        self.flush()
    }
}

fn state_batches(state: &StoredState) -> StoreResult<(Batch, Batch, Batch)> {
    let snapshot = &state.snapshot;

    // Records are never deleted, so overwriting every key is enough.
    let mut users = Batch::default();
    for (identity, record) in &snapshot.users {
        users.insert(identity.to_string().as_bytes(), serde_json::to_vec(record)?);
    }

    let mut counts = Batch::default();
    for (role, count) in snapshot.role_counts.iter() {
        counts.insert(role.as_str().as_bytes(), serde_json::to_vec(&count)?);
    }

    let mut metadata = Batch::default();
    metadata.insert(META_ADMIN, serde_json::to_vec(&snapshot.admin)?);
    metadata.insert(META_PAUSED, serde_json::to_vec(&snapshot.paused)?);
    metadata.insert(META_HEIGHT, serde_json::to_vec(&state.height)?);

    Ok((users, counts, metadata))
}

fn read_all<T: DeserializeOwned>(tree: &Tree) -> StoreResult<Vec<T>> {
    tree.iter()
        .values()
        .map(|value| -> StoreResult<T> { Ok(serde_json::from_slice(&value?)?) })
        .collect()
}

fn meta<T: DeserializeOwned>(tree: &Tree, key: &[u8]) -> StoreResult<Option<T>> {
    match tree.get(key)? {
        Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
        None => Ok(None),
    }
}

impl RegistryStore for SledRegistryStore {
    fn load(&self) -> StoreResult<Option<StoredState>> {
        let Some(admin) = meta::<Identity>(&self.metadata, META_ADMIN)? else {
            return Ok(None);
        };
        let paused = meta::<bool>(&self.metadata, META_PAUSED)?.unwrap_or(false);
        let height = meta::<LedgerHeight>(&self.metadata, META_HEIGHT)?.unwrap_or(0);

        let mut users = BTreeMap::new();
        for entry in self.users.iter() {
            let (key, value) = entry?;
            let key = std::str::from_utf8(&key)
                .map_err(|e| StoreError::Corrupt(format!("user key: {e}")))?;
            let identity: Identity = key
                .parse()
                .map_err(|e| StoreError::Corrupt(format!("user key {key}: {e}")))?;
            let record: UserRecord = serde_json::from_slice(&value)?;
            users.insert(identity, record);
        }

        let mut role_counts = RoleCounts::new();
        for role in Role::ALL {
            let count = meta::<u64>(&self.role_counts, role.as_str().as_bytes())?.unwrap_or(0);
            role_counts.set(role, count);
        }

        let snapshot = RegistrySnapshot {
            admin,
            paused,
            users,
            role_counts,
        };
        if !snapshot.role_counts_consistent() {
            return Err(StoreError::Corrupt(format!(
                "stored role counts {:?} disagree with active records {:?}",
                snapshot.role_counts,
                RoleCounts::tally(snapshot.users.values())
            )));
        }

        Ok(Some(StoredState { height, snapshot }))
    }

    fn save(&self, state: &StoredState) -> StoreResult<()> {
        self.write(state, Batch::default(), Batch::default())
    }

    fn commit(
        &self,
        state: &StoredState,
        receipt: &CallReceipt,
        events: &[RegistryEvent],
    ) -> StoreResult<()> {
        let receipts = self.append_batch(std::slice::from_ref(receipt))?;
        let events = self.append_batch(events)?;
        self.write(state, receipts, events)
    }

    fn receipts(&self) -> StoreResult<Vec<CallReceipt>> {
        read_all(&self.receipts)
    }

    fn events(&self) -> StoreResult<Vec<RegistryEvent>> {
        read_all(&self.events)
    }
}

/// In-memory store for tests and ephemeral hosts
#[derive(Default, Clone)]
pub struct MemoryRegistryStore {
    state: Arc<RwLock<Option<StoredState>>>,
    receipts: Arc<RwLock<Vec<CallReceipt>>>,
    events: Arc<RwLock<Vec<RegistryEvent>>>,
}

impl MemoryRegistryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RegistryStore for MemoryRegistryStore {
    fn load(&self) -> StoreResult<Option<StoredState>> {
        Ok(self.state.read().clone())
    }

    fn save(&self, state: &StoredState) -> StoreResult<()> {
        *self.state.write() = Some(state.clone());
        Ok(())
    }

    fn commit(
        &self,
        state: &StoredState,
        receipt: &CallReceipt,
        events: &[RegistryEvent],
    ) -> StoreResult<()> {
        let mut stored = self.state.write();
        let mut receipts = self.receipts.write();
        let mut stored_events = self.events.write();
        *stored = Some(state.clone());
        receipts.push(receipt.clone());
        stored_events.extend_from_slice(events);
        Ok(())
    }

    fn receipts(&self) -> StoreResult<Vec<CallReceipt>> {
        Ok(self.receipts.read().clone())
    }

    fn events(&self) -> StoreResult<Vec<RegistryEvent>> {
        Ok(self.events.read().clone())
    }
}
