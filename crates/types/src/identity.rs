use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tag character that opens every identity in text form.
pub const IDENTITY_TAG: char = 'w';
/// Raw width of a principal.
pub const IDENTITY_BYTES: usize = 32;
/// Hex digits following the tag.
pub const IDENTITY_HEX_CHARS: usize = IDENTITY_BYTES * 2;

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity text must open with 'w'")]
    MissingTag,
    #[error("identity needs 64 hex digits after the tag, found {0}")]
    DigitCount(usize),
    #[error("identity digits are not hex: {0}")]
    NotHex(#[from] hex::FromHexError),
}

/// `w` followed by lowercase hex, e.g. `w00ff…`.
pub fn encode_identity(bytes: &[u8; IDENTITY_BYTES]) -> String {
    format!("{IDENTITY_TAG}{}", hex::encode(bytes))
}

/// Parse the text form back into raw bytes. Upper and lower case digits are
/// both accepted.
pub fn decode_identity(text: &str) -> Result<[u8; IDENTITY_BYTES], IdentityError> {
    let digits = text
        .strip_prefix(IDENTITY_TAG)
        .ok_or(IdentityError::MissingTag)?;
    if digits.len() != IDENTITY_HEX_CHARS {
        return Err(IdentityError::DigitCount(digits.len()));
    }

    let mut bytes = [0u8; IDENTITY_BYTES];
    hex::decode_to_slice(digits, &mut bytes)?;
    Ok(bytes)
}

/// Principal that owns a registry record and authorizes calls.
///
/// The hosting layer authenticates callers; the registry only compares
/// identities for equality.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(pub [u8; IDENTITY_BYTES]);

impl Identity {
    pub const fn new(bytes: [u8; IDENTITY_BYTES]) -> Self {
        Self(bytes)
    }

    /// Derive a deterministic identity from an arbitrary label.
    ///
    /// Used by hosts and tests that want stable, readable principals.
    pub fn from_label(label: &str) -> Self {
        Self(*blake3::hash(label.as_bytes()).as_bytes())
    }
}

impl From<[u8; IDENTITY_BYTES]> for Identity {
    fn from(value: [u8; IDENTITY_BYTES]) -> Self {
        Identity(value)
    }
}

impl From<Identity> for String {
    fn from(value: Identity) -> Self {
        encode_identity(&value.0)
    }
}

impl TryFrom<String> for Identity {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        decode_identity(&value).map(Identity)
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_identity(s).map(Identity)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_identity(&self.0))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form keeps log lines readable.
        write!(f, "Identity(w{}…)", hex::encode(&self.0[..4]))
    }
}
