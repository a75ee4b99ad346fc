//! Participant registry state machine
//!
//! Records identity, role and verification status for the actors of the
//! waste-monitoring platform. Every mutating entry point runs the same guard
//! sequence (paused → existence → authorization → input validation) and only
//! touches state once all of its checks have passed, so a rejected call has
//! no effect.

use crate::errors::*;
use crate::events::{EventJournal, RegistryEvent, RegistryEventKind};
use crate::types::*;
use std::collections::BTreeMap;
use tracing::debug;
use wastewatch_types::{CallContext, Identity, LedgerHeight, Role};

/// Participant registry
///
/// Owns the user-record table, the role-count table, the pause flag and the
/// administrator identity. Methods taking `&mut self` are the only writers.
#[derive(Debug, Clone)]
pub struct ParticipantRegistry {
    admin: Identity,
    paused: bool,
    users: BTreeMap<Identity, UserRecord>,
    role_counts: RoleCounts,
    events: EventJournal,
}

impl ParticipantRegistry {
    /// Create an empty, unpaused registry administered by `deployer`.
    pub fn new(deployer: Identity) -> Self {
        Self {
            admin: deployer,
            paused: false,
            users: BTreeMap::new(),
            role_counts: RoleCounts::new(),
            events: EventJournal::default(),
        }
    }

    /// Rebuild a registry from a persisted snapshot.
    pub fn from_snapshot(snapshot: RegistrySnapshot) -> Self {
        Self {
            admin: snapshot.admin,
            paused: snapshot.paused,
            users: snapshot.users,
            role_counts: snapshot.role_counts,
            events: EventJournal::default(),
        }
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            admin: self.admin,
            paused: self.paused,
            users: self.users.clone(),
            role_counts: self.role_counts.clone(),
        }
    }

    /// Drain events produced since the last call.
    pub fn take_events(&mut self) -> Vec<RegistryEvent> {
        self.events.drain()
    }

    // ---------------------------------------------------------------------
    // Mutating operations
    // ---------------------------------------------------------------------

    /// Self-register the caller under `role`.
    ///
    /// `role` is taken as a raw name so that an unknown role is reported only
    /// after the pause and duplicate checks.
    pub fn register(
        &mut self,
        ctx: &CallContext,
        role: &str,
        name: &str,
        description: &str,
    ) -> Result<()> {
        self.ensure_not_paused()?;
        if self.users.contains_key(&ctx.caller) {
            return Err(RegistryError::AlreadyRegistered);
        }
        let role = parse_role(role)?;
        validate_profile(name, description)?;

        self.users.insert(
            ctx.caller,
            UserRecord::new(role, name.to_owned(), description.to_owned(), ctx.height),
        );
        self.role_counts.increment(role);
        self.events.record(
            ctx.height,
            RegistryEventKind::Registered {
                user: ctx.caller,
                role,
            },
        );
        Ok(())
    }

    /// Mark `target` as verified. Only the administrator may verify,
    /// whatever role the target holds.
    pub fn verify(&mut self, ctx: &CallContext, target: &Identity) -> Result<()> {
        self.ensure_not_paused()?;
        let record = self.users.get(target).ok_or(RegistryError::NotRegistered)?;
        self.ensure_admin(&ctx.caller)?;
        if record.verified {
            return Err(RegistryError::AlreadyVerified);
        }

        self.mark_verified(ctx.caller, target, ctx.height);
        Ok(())
    }

    /// Replace the caller's own name and description.
    pub fn update_profile(&mut self, ctx: &CallContext, name: &str, description: &str) -> Result<()> {
        self.ensure_not_paused()?;
        if !self.users.contains_key(&ctx.caller) {
            return Err(RegistryError::NotRegistered);
        }
        validate_profile(name, description)?;

        if let Some(record) = self.users.get_mut(&ctx.caller) {
            record.name = name.to_owned();
            record.description = description.to_owned();
        }
        self.events
            .record(ctx.height, RegistryEventKind::ProfileUpdated { user: ctx.caller });
        Ok(())
    }

    /// Permanently deactivate `target`. Allowed for the target itself and for
    /// the administrator.
    ///
    /// An already inactive target is reported as [`RegistryError::NotRegistered`].
    pub fn deactivate(&mut self, ctx: &CallContext, target: &Identity) -> Result<()> {
        self.ensure_not_paused()?;
        let record = self.users.get(target).ok_or(RegistryError::NotRegistered)?;
        if ctx.caller != self.admin && ctx.caller != *target {
            return Err(RegistryError::Unauthorized);
        }
        if !record.active {
            return Err(RegistryError::NotRegistered);
        }
        let role = record.role;

        if let Some(record) = self.users.get_mut(target) {
            record.active = false;
        }
        self.role_counts.decrement(role);
        self.events.record(
            ctx.height,
            RegistryEventKind::Deactivated {
                user: *target,
                by: ctx.caller,
            },
        );
        Ok(())
    }

    /// Move an active `target` to `new_role`. Administrator only.
    pub fn change_role(&mut self, ctx: &CallContext, target: &Identity, new_role: &str) -> Result<()> {
        self.ensure_not_paused()?;
        let record = self
            .users
            .get(target)
            .filter(|record| record.active)
            .ok_or(RegistryError::NotRegistered)?;
        self.ensure_admin(&ctx.caller)?;
        let new_role = parse_role(new_role)?;
        let old_role = record.role;

        if let Some(record) = self.users.get_mut(target) {
            record.role = new_role;
        }
        self.role_counts.decrement(old_role);
        self.role_counts.increment(new_role);
        self.events.record(
            ctx.height,
            RegistryEventKind::RoleChanged {
                user: *target,
                from: old_role,
                to: new_role,
            },
        );
        Ok(())
    }

    /// Pause all gated operations. Administrator only; pausing a paused
    /// registry succeeds.
    pub fn pause(&mut self, ctx: &CallContext) -> Result<()> {
        self.ensure_admin(&ctx.caller)?;
        self.paused = true;
        self.events.record(ctx.height, RegistryEventKind::Paused);
        Ok(())
    }

    pub fn unpause(&mut self, ctx: &CallContext) -> Result<()> {
        self.ensure_admin(&ctx.caller)?;
        self.paused = false;
        self.events.record(ctx.height, RegistryEventKind::Unpaused);
        Ok(())
    }

    /// Hand administration to `new_admin`.
    ///
    /// `new_admin` does not need a record; an administrator may be appointed
    /// before it registers.
    pub fn set_admin(&mut self, ctx: &CallContext, new_admin: Identity) -> Result<()> {
        self.ensure_admin(&ctx.caller)?;
        let previous = std::mem::replace(&mut self.admin, new_admin);
        self.events.record(
            ctx.height,
            RegistryEventKind::AdminChanged {
                previous,
                new: new_admin,
            },
        );
        Ok(())
    }

    /// Verify up to [`MAX_BULK_TARGETS`] identities in one call.
    ///
    /// Only the pause and administrator checks can fail the whole call.
    /// Targets that are unknown or already verified are skipped; the returned
    /// count covers the targets that were actually verified.
    pub fn bulk_verify(&mut self, ctx: &CallContext, targets: &BulkTargets) -> Result<usize> {
        self.ensure_not_paused()?;
        self.ensure_admin(&ctx.caller)?;

        let verified = targets.as_slice().iter().fold(0usize, |count, target| {
            match self.users.get(target).map(|record| record.verified) {
                Some(false) => {
                    self.mark_verified(ctx.caller, target, ctx.height);
                    count + 1
                }
                Some(true) => {
                    debug!(user = %target, "bulk verify: already verified, skipping");
                    count
                }
                None => {
                    debug!(user = %target, "bulk verify: not registered, skipping");
                    count
                }
            }
        });

        self.events.record(
            ctx.height,
            RegistryEventKind::BulkVerified {
                attempted: targets.len(),
                verified,
            },
        );
        Ok(verified)
    }

    // ---------------------------------------------------------------------
    // Read-only queries
    // ---------------------------------------------------------------------

    pub fn get_user_info(&self, user: &Identity) -> Option<&UserRecord> {
        self.users.get(user)
    }

    pub fn is_registered(&self, user: &Identity) -> bool {
        self.users.contains_key(user)
    }

    /// False for unknown identities.
    pub fn is_verified(&self, user: &Identity) -> bool {
        self.users.get(user).is_some_and(|record| record.verified)
    }

    /// True only if the record exists, is verified, is active and holds `role`.
    pub fn has_role(&self, user: &Identity, role: Role) -> bool {
        self.users.get(user).is_some_and(|record| record.holds(role))
    }

    /// Number of active members holding `role`.
    pub fn get_role_count(&self, role: Role) -> u64 {
        self.role_counts.get(role)
    }

    pub fn get_contract_admin(&self) -> Identity {
        self.admin
    }

    pub fn is_contract_paused(&self) -> bool {
        self.paused
    }

    /// Active members across all roles.
    pub fn total_active(&self) -> u64 {
        self.role_counts.total()
    }

    pub fn role_counts(&self) -> &RoleCounts {
        &self.role_counts
    }

    /// All records in identity order.
    pub fn participants(&self) -> impl Iterator<Item = (&Identity, &UserRecord)> {
        self.users.iter()
    }

    // ---------------------------------------------------------------------
    // Guards
    // ---------------------------------------------------------------------

    fn ensure_not_paused(&self) -> Result<()> {
        if self.paused {
            return Err(RegistryError::Paused);
        }
        Ok(())
    }

    fn ensure_admin(&self, caller: &Identity) -> Result<()> {
        if *caller != self.admin {
            return Err(RegistryError::Unauthorized);
        }
        Ok(())
    }

    fn mark_verified(&mut self, verifier: Identity, target: &Identity, height: LedgerHeight) {
        if let Some(record) = self.users.get_mut(target) {
            record.verified = true;
            record.verifier = Some(verifier);
            self.events.record(
                height,
                RegistryEventKind::Verified {
                    user: *target,
                    verifier,
                },
            );
        }
    }
}

fn parse_role(role: &str) -> Result<Role> {
    role.parse().map_err(|_| RegistryError::InvalidRole)
}

/// Check name and description bounds, in that order.
pub fn validate_profile(name: &str, description: &str) -> Result<()> {
    let name_chars = name.chars().count();
    if name_chars == 0 || name_chars > MAX_NAME_CHARS {
        return Err(RegistryError::InvalidName);
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(RegistryError::DescriptionTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Identity {
        Identity::from_label("deployer")
    }

    fn user(label: &str) -> Identity {
        Identity::from_label(label)
    }

    fn ctx(caller: Identity) -> CallContext {
        CallContext::new(caller, 10)
    }

    fn registry_with_company() -> (ParticipantRegistry, Identity) {
        let mut registry = ParticipantRegistry::new(admin());
        let company = user("acme");
        registry
            .register(&ctx(company), "company", "Test", "Desc")
            .unwrap();
        (registry, company)
    }

    #[test]
    fn test_new_registry_defaults() {
        let registry = ParticipantRegistry::new(admin());
        assert_eq!(registry.get_contract_admin(), admin());
        assert!(!registry.is_contract_paused());
        assert_eq!(registry.total_active(), 0);
        assert_eq!(registry.participants().count(), 0);
    }

    #[test]
    fn test_register_creates_unverified_active_record() {
        let (registry, company) = registry_with_company();

        assert!(registry.is_registered(&company));
        assert!(!registry.is_verified(&company));
        assert_eq!(registry.get_role_count(Role::Company), 1);

        let record = registry.get_user_info(&company).unwrap();
        assert_eq!(record.role, Role::Company);
        assert_eq!(record.name, "Test");
        assert_eq!(record.description, "Desc");
        assert_eq!(record.registered_at, 10);
        assert!(record.active);
        assert!(!record.verified);
        assert_eq!(record.verifier, None);
    }

    #[test]
    fn test_register_twice_keeps_original_record() {
        let (mut registry, company) = registry_with_company();
        let before = registry.get_user_info(&company).cloned();

        let err = registry
            .register(&CallContext::new(company, 99), "facility", "Other", "")
            .unwrap_err();
        assert_eq!(err, RegistryError::AlreadyRegistered);
        assert_eq!(registry.get_user_info(&company).cloned(), before);
        assert_eq!(registry.get_role_count(Role::Company), 1);
        assert_eq!(registry.get_role_count(Role::Facility), 0);
    }

    #[test]
    fn test_register_error_priority() {
        let mut registry = ParticipantRegistry::new(admin());
        let caller = user("x");
        let long_desc = "d".repeat(501);

        // Every input is bad: the role check wins over name and description.
        assert_eq!(
            registry.register(&ctx(caller), "miner", "", &long_desc),
            Err(RegistryError::InvalidRole)
        );
        assert_eq!(
            registry.register(&ctx(caller), "company", "", &long_desc),
            Err(RegistryError::InvalidName)
        );
        assert_eq!(
            registry.register(&ctx(caller), "company", "ok", &long_desc),
            Err(RegistryError::DescriptionTooLong)
        );
        assert!(!registry.is_registered(&caller));
        assert!(registry.take_events().is_empty());
    }

    #[test]
    fn test_name_and_description_bounds_count_code_points() {
        assert!(validate_profile(&"é".repeat(100), "").is_ok());
        assert_eq!(
            validate_profile(&"é".repeat(101), ""),
            Err(RegistryError::InvalidName)
        );
        assert!(validate_profile("n", &"字".repeat(500)).is_ok());
        assert_eq!(
            validate_profile("n", &"字".repeat(501)),
            Err(RegistryError::DescriptionTooLong)
        );
    }

    #[test]
    fn test_verify_requires_admin() {
        let (mut registry, company) = registry_with_company();
        let regulator = user("epa");
        registry
            .register(&ctx(regulator), "regulator", "EPA", "")
            .unwrap();
        registry.verify(&ctx(admin()), &regulator).unwrap();

        // A verified regulator still cannot verify anyone.
        assert_eq!(
            registry.verify(&ctx(regulator), &company),
            Err(RegistryError::Unauthorized)
        );
        // Nor can a record verify itself.
        assert_eq!(
            registry.verify(&ctx(company), &company),
            Err(RegistryError::Unauthorized)
        );
        assert!(!registry.is_verified(&company));
    }

    #[test]
    fn test_verify_twice() {
        let (mut registry, company) = registry_with_company();
        assert_eq!(registry.verify(&ctx(admin()), &company), Ok(()));
        assert_eq!(
            registry.verify(&ctx(admin()), &company),
            Err(RegistryError::AlreadyVerified)
        );
        let record = registry.get_user_info(&company).unwrap();
        assert!(record.verified);
        assert_eq!(record.verifier, Some(admin()));
    }

    #[test]
    fn test_verify_unknown_target() {
        let mut registry = ParticipantRegistry::new(admin());
        assert_eq!(
            registry.verify(&ctx(admin()), &user("ghost")),
            Err(RegistryError::NotRegistered)
        );
        // Existence is checked before authorization.
        assert_eq!(
            registry.verify(&ctx(user("mallory")), &user("ghost")),
            Err(RegistryError::NotRegistered)
        );
    }

    #[test]
    fn test_update_profile_only_touches_text() {
        let (mut registry, company) = registry_with_company();
        registry.verify(&ctx(admin()), &company).unwrap();
        let before = registry.get_user_info(&company).cloned().unwrap();

        registry
            .update_profile(&CallContext::new(company, 50), "Acme Waste", "")
            .unwrap();

        let after = registry.get_user_info(&company).unwrap();
        assert_eq!(after.name, "Acme Waste");
        assert_eq!(after.description, "");
        assert_eq!(after.role, before.role);
        assert_eq!(after.registered_at, before.registered_at);
        assert_eq!(after.verified, before.verified);
        assert_eq!(after.active, before.active);
        assert_eq!(after.verifier, before.verifier);
    }

    #[test]
    fn test_update_profile_errors() {
        let (mut registry, company) = registry_with_company();
        assert_eq!(
            registry.update_profile(&ctx(user("nobody")), "x", ""),
            Err(RegistryError::NotRegistered)
        );
        assert_eq!(
            registry.update_profile(&ctx(company), "", ""),
            Err(RegistryError::InvalidName)
        );
        assert_eq!(
            registry.update_profile(&ctx(company), "x", &"d".repeat(501)),
            Err(RegistryError::DescriptionTooLong)
        );
        assert_eq!(registry.get_user_info(&company).unwrap().name, "Test");
    }

    #[test]
    fn test_deactivate_is_permanent() {
        let (mut registry, company) = registry_with_company();
        registry.deactivate(&ctx(company), &company).unwrap();
        assert_eq!(registry.get_role_count(Role::Company), 0);
        assert!(!registry.get_user_info(&company).unwrap().active);
        assert!(registry.is_registered(&company));

        assert_eq!(
            registry.deactivate(&ctx(company), &company),
            Err(RegistryError::NotRegistered)
        );
        assert_eq!(
            registry.deactivate(&ctx(admin()), &company),
            Err(RegistryError::NotRegistered)
        );
        assert_eq!(registry.get_role_count(Role::Company), 0);
    }

    #[test]
    fn test_deactivate_authorization() {
        let (mut registry, company) = registry_with_company();
        let other = user("rival");
        registry.register(&ctx(other), "company", "Rival", "").unwrap();

        assert_eq!(
            registry.deactivate(&ctx(other), &company),
            Err(RegistryError::Unauthorized)
        );
        assert_eq!(registry.get_role_count(Role::Company), 2);

        registry.deactivate(&ctx(admin()), &company).unwrap();
        assert_eq!(registry.get_role_count(Role::Company), 1);

        // Authorization is checked before the active flag.
        assert_eq!(
            registry.deactivate(&ctx(other), &company),
            Err(RegistryError::Unauthorized)
        );
    }

    #[test]
    fn test_change_role_moves_count() {
        let (mut registry, company) = registry_with_company();
        registry.change_role(&ctx(admin()), &company, "facility").unwrap();

        assert_eq!(registry.get_role_count(Role::Company), 0);
        assert_eq!(registry.get_role_count(Role::Facility), 1);
        assert_eq!(registry.total_active(), 1);
        assert_eq!(registry.get_user_info(&company).unwrap().role, Role::Facility);
    }

    #[test]
    fn test_change_role_to_same_role_is_neutral() {
        let (mut registry, company) = registry_with_company();
        registry.change_role(&ctx(admin()), &company, "company").unwrap();
        assert_eq!(registry.get_role_count(Role::Company), 1);
    }

    #[test]
    fn test_change_role_errors() {
        let (mut registry, company) = registry_with_company();

        assert_eq!(
            registry.change_role(&ctx(company), &company, "regulator"),
            Err(RegistryError::Unauthorized)
        );
        assert_eq!(
            registry.change_role(&ctx(admin()), &company, "Regulator"),
            Err(RegistryError::InvalidRole)
        );
        assert_eq!(
            registry.change_role(&ctx(admin()), &user("ghost"), "company"),
            Err(RegistryError::NotRegistered)
        );

        registry.deactivate(&ctx(company), &company).unwrap();
        assert_eq!(
            registry.change_role(&ctx(admin()), &company, "facility"),
            Err(RegistryError::NotRegistered)
        );
        assert_eq!(registry.get_role_count(Role::Facility), 0);
    }

    #[test]
    fn test_pause_gates_mutations() {
        let (mut registry, company) = registry_with_company();
        registry.pause(&ctx(admin())).unwrap();
        let before = registry.snapshot();
        let targets = BulkTargets::try_from(vec![company]).unwrap();

        assert_eq!(
            registry.register(&ctx(user("late")), "company", "Late", ""),
            Err(RegistryError::Paused)
        );
        assert_eq!(registry.verify(&ctx(admin()), &company), Err(RegistryError::Paused));
        assert_eq!(
            registry.update_profile(&ctx(company), "New", ""),
            Err(RegistryError::Paused)
        );
        assert_eq!(
            registry.deactivate(&ctx(company), &company),
            Err(RegistryError::Paused)
        );
        assert_eq!(
            registry.change_role(&ctx(admin()), &company, "facility"),
            Err(RegistryError::Paused)
        );
        assert_eq!(
            registry.bulk_verify(&ctx(admin()), &targets),
            Err(RegistryError::Paused)
        );
        assert_eq!(registry.snapshot(), before);

        // Administrative toggles keep working while paused.
        registry.pause(&ctx(admin())).unwrap();
        registry.set_admin(&ctx(admin()), user("ops")).unwrap();
        registry.unpause(&ctx(user("ops"))).unwrap();
        assert!(!registry.is_contract_paused());
        registry.verify(&ctx(user("ops")), &company).unwrap();
    }

    #[test]
    fn test_pause_requires_admin() {
        let mut registry = ParticipantRegistry::new(admin());
        assert_eq!(registry.pause(&ctx(user("x"))), Err(RegistryError::Unauthorized));
        registry.pause(&ctx(admin())).unwrap();
        assert_eq!(registry.unpause(&ctx(user("x"))), Err(RegistryError::Unauthorized));
        assert!(registry.is_contract_paused());
    }

    #[test]
    fn test_set_admin_rotation() {
        let mut registry = ParticipantRegistry::new(admin());
        let next = user("next-admin");

        assert_eq!(
            registry.set_admin(&ctx(next), next),
            Err(RegistryError::Unauthorized)
        );
        registry.set_admin(&ctx(admin()), next).unwrap();
        assert_eq!(registry.get_contract_admin(), next);
        assert!(!registry.is_registered(&next));

        // The previous admin lost its rights.
        assert_eq!(
            registry.set_admin(&ctx(admin()), admin()),
            Err(RegistryError::Unauthorized)
        );
    }

    #[test]
    fn test_bulk_verify_skips_failures() {
        let (mut registry, company) = registry_with_company();
        let fresh = user("fresh");
        registry.register(&ctx(fresh), "facility", "Fresh", "").unwrap();
        registry.verify(&ctx(admin()), &company).unwrap();

        let targets = BulkTargets::try_from(vec![company, fresh, user("ghost")]).unwrap();
        assert_eq!(registry.bulk_verify(&ctx(admin()), &targets), Ok(1));
        assert!(registry.is_verified(&fresh));
        assert_eq!(
            registry.get_user_info(&fresh).unwrap().verifier,
            Some(admin())
        );
    }

    #[test]
    fn test_bulk_verify_duplicate_targets_count_once() {
        let (mut registry, company) = registry_with_company();
        let targets = BulkTargets::try_from(vec![company, company]).unwrap();
        assert_eq!(registry.bulk_verify(&ctx(admin()), &targets), Ok(1));
    }

    #[test]
    fn test_bulk_verify_requires_admin() {
        let (mut registry, company) = registry_with_company();
        let targets = BulkTargets::try_from(vec![company]).unwrap();
        assert_eq!(
            registry.bulk_verify(&ctx(company), &targets),
            Err(RegistryError::Unauthorized)
        );
        assert!(!registry.is_verified(&company));
    }

    #[test]
    fn test_has_role_combinations() {
        let (mut registry, company) = registry_with_company();
        assert!(!registry.has_role(&user("ghost"), Role::Company));
        assert!(!registry.has_role(&company, Role::Company));

        registry.verify(&ctx(admin()), &company).unwrap();
        assert!(registry.has_role(&company, Role::Company));
        assert!(!registry.has_role(&company, Role::Facility));

        registry.deactivate(&ctx(admin()), &company).unwrap();
        assert!(!registry.has_role(&company, Role::Company));
        // Verification survives deactivation.
        assert!(registry.is_verified(&company));
    }

    #[test]
    fn test_events_follow_successful_calls_only() {
        let (mut registry, company) = registry_with_company();
        let events = registry.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].kind,
            RegistryEventKind::Registered {
                user: company,
                role: Role::Company
            }
        );

        let _ = registry.verify(&ctx(company), &company);
        assert!(registry.take_events().is_empty());

        registry.change_role(&CallContext::new(admin(), 12), &company, "regulator").unwrap();
        let events = registry.take_events();
        assert_eq!(events[0].height, 12);
        assert_eq!(
            events[0].kind,
            RegistryEventKind::RoleChanged {
                user: company,
                from: Role::Company,
                to: Role::Regulator
            }
        );
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_queries() {
        let (mut registry, company) = registry_with_company();
        registry.verify(&ctx(admin()), &company).unwrap();
        registry.pause(&ctx(admin())).unwrap();

        let restored = ParticipantRegistry::from_snapshot(registry.snapshot());
        assert!(restored.has_role(&company, Role::Company));
        assert!(restored.is_contract_paused());
        assert_eq!(restored.get_role_count(Role::Company), 1);
        assert_eq!(
            restored.snapshot().state_root().unwrap(),
            registry.snapshot().state_root().unwrap()
        );
    }
}
