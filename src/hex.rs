use std::fmt;
use std::str::FromStr;

/// Number of characters in a 128-bit value rendered as hex
pub const HEX_LEN: usize = 32;

/// Reasons a string is rejected as a key or value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Input was empty or missing
    #[error("empty payload")]
    EmptyPayload,
    /// Wrong length or a character outside `[0-9a-fA-F]`
    #[error("invalid hex format: {0}")]
    InvalidFormat(String),
}

impl ValidationError {
    /// Machine-readable name used in error responses
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::EmptyPayload => "empty_payload",
            ValidationError::InvalidFormat(_) => "invalid_format",
        }
    }
}

/// A 32-character hexadecimal string, always held in lowercase
///
/// Equality, ordering and hashing work on the canonical form, so two inputs
/// that differ only by case compare equal once parsed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HexString(String);

impl HexString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Validate `input` and return its canonical lowercase form
pub fn validate(input: &str) -> Result<HexString, ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::EmptyPayload);
    }

    let len = input.chars().count();
    if len != HEX_LEN {
        return Err(ValidationError::InvalidFormat(format!(
            "expected {} hex characters, got {}",
            HEX_LEN, len
        )));
    }

    if let Some((pos, ch)) = input
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_hexdigit())
    {
        return Err(ValidationError::InvalidFormat(format!(
            "non-hex character {:?} at position {}",
            ch, pos
        )));
    }

    Ok(HexString(input.to_ascii_lowercase()))
}

impl FromStr for HexString {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

impl TryFrom<String> for HexString {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)
    }
}

impl AsRef<str> for HexString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl serde::Serialize for HexString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
