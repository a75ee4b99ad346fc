use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Participant role held by a registry record.
///
/// `Admin` is only a label here; elevated rights come from being the
/// registry's current administrator identity, not from holding this role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Company,
    Facility,
    Regulator,
}

/// Error returned when a role name is not part of the fixed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl Role {
    /// Every role, in canonical order.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Company, Role::Facility, Role::Regulator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Company => "company",
            Role::Facility => "facility",
            Role::Regulator => "regulator",
        }
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    /// Role names are matched exactly; `"Company"` is not a valid role.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "company" => Ok(Role::Company),
            "facility" => Ok(Role::Facility),
            "regulator" => Ok(Role::Regulator),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
