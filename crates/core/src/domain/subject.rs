// Participant and session labels

use serde::{Deserialize, Serialize};

use super::error::{DomainError, Result};

/// Reject labels that would escape or split a path component
fn check_label(kind: &'static str, value: &str) -> Result<()> {
    let invalid = |reason| DomainError::InvalidIdentifier {
        kind,
        value: value.to_string(),
        reason,
    };

    if value.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(invalid("must be a single path component"));
    }
    Ok(())
}

/// Participant label, e.g. `sub-001`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub const PREFIX: &'static str = "sub-";

    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        check_label("participant ID", &value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// BIDS labels start with `sub-`; anything else is accepted but unusual
    pub fn has_standard_prefix(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Session label, e.g. `ses-01`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub const PREFIX: &'static str = "ses-";

    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        check_label("session ID", &value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn has_standard_prefix(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
