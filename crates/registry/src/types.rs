//! Types for the participant registry

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wastewatch_types::{Identity, LedgerHeight, Role};

/// Maximum length of a participant name, in Unicode scalar values.
pub const MAX_NAME_CHARS: usize = 100;
/// Maximum length of a participant description, in Unicode scalar values.
pub const MAX_DESCRIPTION_CHARS: usize = 500;
/// Maximum number of targets accepted by a single bulk verification.
pub const MAX_BULK_TARGETS: usize = 10;

/// Registry entry for a single participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub role: Role,
    pub name: String,
    pub description: String,
    /// Ledger height at registration; never changes afterwards.
    pub registered_at: LedgerHeight,
    pub verified: bool,
    pub active: bool,
    /// Admin that verified this record, if any.
    pub verifier: Option<Identity>,
}

impl UserRecord {
    /// Create a fresh, unverified, active record
    pub fn new(role: Role, name: String, description: String, registered_at: LedgerHeight) -> Self {
        Self {
            role,
            name,
            description,
            registered_at,
            verified: false,
            active: true,
            verifier: None,
        }
    }

    /// True when the record can act under `role`.
    pub fn holds(&self, role: Role) -> bool {
        self.verified && self.active && self.role == role
    }
}

/// Number of active members per role, maintained incrementally.
///
/// Every role is always present so that encodings of equal counts are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCounts(BTreeMap<Role, u64>);

impl Default for RoleCounts {
    fn default() -> Self {
        Self(Role::ALL.into_iter().map(|role| (role, 0)).collect())
    }
}

impl RoleCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count active records per role from scratch.
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a UserRecord>) -> Self {
        let mut counts = Self::new();
        for record in records.into_iter().filter(|record| record.active) {
            counts.increment(record.role);
        }
        counts
    }

    pub(crate) fn set(&mut self, role: Role, count: u64) {
        self.0.insert(role, count);
    }

    pub fn get(&self, role: Role) -> u64 {
        self.0.get(&role).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, role: Role) {
        let count = self.0.entry(role).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Decrement, flooring at zero.
    pub fn decrement(&mut self, role: Role) {
        let count = self.0.entry(role).or_insert(0);
        *count = count.saturating_sub(1);
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, u64)> + '_ {
        Role::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}

/// Error raised when a bulk target list exceeds [`MAX_BULK_TARGETS`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BulkTargetsError {
    #[error("bulk verification accepts at most {max} targets, got {actual}")]
    TooMany { max: usize, actual: usize },
}

/// Bounded list of identities for bulk verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Identity>", into = "Vec<Identity>")]
pub struct BulkTargets(Vec<Identity>);

impl BulkTargets {
    pub fn as_slice(&self) -> &[Identity] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<Identity>> for BulkTargets {
    type Error = BulkTargetsError;

    fn try_from(value: Vec<Identity>) -> Result<Self, Self::Error> {
        if value.len() > MAX_BULK_TARGETS {
            return Err(BulkTargetsError::TooMany {
                max: MAX_BULK_TARGETS,
                actual: value.len(),
            });
        }
        Ok(Self(value))
    }
}

impl From<BulkTargets> for Vec<Identity> {
    fn from(value: BulkTargets) -> Self {
        value.0
    }
}

/// Complete registry state, as persisted and hashed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub admin: Identity,
    pub paused: bool,
    pub users: BTreeMap<Identity, UserRecord>,
    pub role_counts: RoleCounts,
}

impl RegistrySnapshot {
    /// Deterministic blake3 digest over the canonical JSON encoding.
    ///
    /// Ordered maps make the encoding independent of insertion order.
    pub fn state_root(&self) -> Result<[u8; 32], serde_json::Error> {
        let encoded = serde_json::to_vec(self)?;
        Ok(*blake3::hash(&encoded).as_bytes())
    }

    /// True when the stored counts agree with a recount of active records.
    pub fn role_counts_consistent(&self) -> bool {
        RoleCounts::tally(self.users.values()) == self.role_counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_counts_floor_at_zero() {
        let mut counts = RoleCounts::new();
        counts.decrement(Role::Company);
        assert_eq!(counts.get(Role::Company), 0);

        counts.increment(Role::Company);
        counts.increment(Role::Facility);
        assert_eq!(counts.total(), 2);
        counts.decrement(Role::Company);
        assert_eq!(counts.get(Role::Company), 0);
        assert_eq!(counts.get(Role::Facility), 1);
    }

    #[test]
    fn tally_skips_inactive_records() {
        let mut retired = UserRecord::new(Role::Company, "Old Co".into(), String::new(), 1);
        retired.active = false;
        let records = [
            UserRecord::new(Role::Company, "Co".into(), String::new(), 2),
            UserRecord::new(Role::Regulator, "EPA".into(), String::new(), 3),
            retired,
        ];

        let counts = RoleCounts::tally(&records);
        assert_eq!(counts.get(Role::Company), 1);
        assert_eq!(counts.get(Role::Regulator), 1);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn role_counts_iterate_every_role() {
        let counts = RoleCounts::new();
        let roles: Vec<Role> = counts.iter().map(|(role, _)| role).collect();
        assert_eq!(roles, Role::ALL.to_vec());
    }

    #[test]
    fn bulk_targets_are_bounded() {
        let ten: Vec<Identity> = (0..10u8).map(|i| Identity::new([i; 32])).collect();
        assert_eq!(BulkTargets::try_from(ten.clone()).unwrap().len(), 10);

        let mut eleven = ten;
        eleven.push(Identity::new([99; 32]));
        assert_eq!(
            BulkTargets::try_from(eleven).unwrap_err(),
            BulkTargetsError::TooMany { max: 10, actual: 11 }
        );
    }

    #[test]
    fn bulk_targets_reject_oversized_json() {
        let ids: Vec<String> = (0..11u8)
            .map(|i| Identity::new([i; 32]).to_string())
            .collect();
        let json = serde_json::to_string(&ids).unwrap();
        assert!(serde_json::from_str::<BulkTargets>(&json).is_err());
    }

    #[test]
    fn holds_requires_verified_active_and_matching_role() {
        let mut record = UserRecord::new(Role::Regulator, "EPA".into(), String::new(), 4);
        assert!(!record.holds(Role::Regulator));
        record.verified = true;
        assert!(record.holds(Role::Regulator));
        assert!(!record.holds(Role::Company));
        record.active = false;
        assert!(!record.holds(Role::Regulator));
    }
}
