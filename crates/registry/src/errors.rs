//! Error types for the participant registry

use thiserror::Error;

/// Rejections returned by registry operations.
///
/// Each kind carries a stable numeric code that callers observe. The first
/// failing precondition of an operation decides which kind is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryError {
    #[error("caller is already registered")]
    AlreadyRegistered,

    /// Also returned when deactivating a record that is already inactive.
    #[error("identity is not registered")]
    NotRegistered,

    #[error("caller is not authorized for this operation")]
    Unauthorized,

    #[error("role is not one of admin, company, facility, regulator")]
    InvalidRole,

    #[error("name must be between 1 and 100 characters")]
    InvalidName,

    /// Reserved; no operation returns it yet.
    #[error("identity is not verified")]
    NotVerified,

    #[error("identity is already verified")]
    AlreadyVerified,

    #[error("registry is paused")]
    Paused,

    /// Reserved; no operation returns it yet.
    #[error("invalid address")]
    InvalidAddress,

    #[error("description must be at most 500 characters")]
    DescriptionTooLong,
}

impl RegistryError {
    /// Every error kind in code order.
    pub const ALL: [RegistryError; 10] = [
        RegistryError::AlreadyRegistered,
        RegistryError::NotRegistered,
        RegistryError::Unauthorized,
        RegistryError::InvalidRole,
        RegistryError::InvalidName,
        RegistryError::NotVerified,
        RegistryError::AlreadyVerified,
        RegistryError::Paused,
        RegistryError::InvalidAddress,
        RegistryError::DescriptionTooLong,
    ];

    /// Stable numeric code for this error kind.
    pub fn code(&self) -> u32 {
        match self {
            RegistryError::AlreadyRegistered => 100,
            RegistryError::NotRegistered => 101,
            RegistryError::Unauthorized => 102,
            RegistryError::InvalidRole => 103,
            RegistryError::InvalidName => 104,
            RegistryError::NotVerified => 105,
            RegistryError::AlreadyVerified => 106,
            RegistryError::Paused => 107,
            RegistryError::InvalidAddress => 108,
            RegistryError::DescriptionTooLong => 109,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors raised by registry persistence backends.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt store entry: {0}")]
    Corrupt(String),
}
