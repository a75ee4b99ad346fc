//! Serializable registry calls and their receipts
//!
//! Hosts that receive calls as data (files, RPC bodies) decode them into a
//! [`RegistryCall`] and hand it to [`ParticipantRegistry::apply`].

use crate::errors::{RegistryError, Result};
use crate::registry::ParticipantRegistry;
use crate::types::BulkTargets;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wastewatch_types::{CallContext, Identity, LedgerHeight};

/// One mutating registry invocation.
///
/// Roles are carried as raw names; unknown names surface as
/// [`RegistryError::InvalidRole`] at the point the operation checks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum RegistryCall {
    Register {
        role: String,
        name: String,
        #[serde(default)]
        description: String,
    },
    Verify {
        target: Identity,
    },
    UpdateProfile {
        name: String,
        #[serde(default)]
        description: String,
    },
    Deactivate {
        target: Identity,
    },
    ChangeRole {
        target: Identity,
        role: String,
    },
    Pause,
    Unpause,
    SetAdmin {
        admin: Identity,
    },
    BulkVerify {
        targets: BulkTargets,
    },
}

impl RegistryCall {
    pub fn name(&self) -> &'static str {
        match self {
            RegistryCall::Register { .. } => "register",
            RegistryCall::Verify { .. } => "verify",
            RegistryCall::UpdateProfile { .. } => "update-profile",
            RegistryCall::Deactivate { .. } => "deactivate",
            RegistryCall::ChangeRole { .. } => "change-role",
            RegistryCall::Pause => "pause",
            RegistryCall::Unpause => "unpause",
            RegistryCall::SetAdmin { .. } => "set-admin",
            RegistryCall::BulkVerify { .. } => "bulk-verify",
        }
    }
}

/// Successful result of an applied call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CallOutcome {
    Ok,
    Verified { count: usize },
}

/// Host-side record of one call and its result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallReceipt {
    pub height: LedgerHeight,
    pub caller: Identity,
    pub call: RegistryCall,
    pub outcome: Option<CallOutcome>,
    /// Numeric error code when the call was rejected.
    pub error_code: Option<u32>,
}

impl CallReceipt {
    pub fn new(ctx: &CallContext, call: RegistryCall, result: &Result<CallOutcome>) -> Self {
        let (outcome, error_code) = match result {
            Ok(outcome) => (Some(*outcome), None),
            Err(err) => (None, Some(err.code())),
        };
        Self {
            height: ctx.height,
            caller: ctx.caller,
            call,
            outcome,
            error_code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error_code.is_none()
    }

    pub fn error(&self) -> Option<RegistryError> {
        self.error_code.and_then(RegistryError::from_code)
    }
}

impl ParticipantRegistry {
    /// Dispatch a decoded call.
    pub fn apply(&mut self, ctx: &CallContext, call: &RegistryCall) -> Result<CallOutcome> {
        let result = match call {
            RegistryCall::Register {
                role,
                name,
                description,
            } => self.register(ctx, role, name, description).map(|_| CallOutcome::Ok),
            RegistryCall::Verify { target } => self.verify(ctx, target).map(|_| CallOutcome::Ok),
            RegistryCall::UpdateProfile { name, description } => self
                .update_profile(ctx, name, description)
                .map(|_| CallOutcome::Ok),
            RegistryCall::Deactivate { target } => {
                self.deactivate(ctx, target).map(|_| CallOutcome::Ok)
            }
            RegistryCall::ChangeRole { target, role } => {
                self.change_role(ctx, target, role).map(|_| CallOutcome::Ok)
            }
            RegistryCall::Pause => self.pause(ctx).map(|_| CallOutcome::Ok),
            RegistryCall::Unpause => self.unpause(ctx).map(|_| CallOutcome::Ok),
            RegistryCall::SetAdmin { admin } => {
                self.set_admin(ctx, *admin).map(|_| CallOutcome::Ok)
            }
            RegistryCall::BulkVerify { targets } => self
                .bulk_verify(ctx, targets)
                .map(|count| CallOutcome::Verified { count }),
        };

        if let Err(err) = &result {
            debug!(
                op = call.name(),
                caller = %ctx.caller,
                height = ctx.height,
                code = err.code(),
                "registry call rejected: {err}"
            );
        }
        result
    }
}
