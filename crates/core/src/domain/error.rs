// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid {kind} '{value}': {reason}")]
    InvalidIdentifier {
        kind: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Invalid contrast '{value}': {reason}")]
    InvalidContrast { value: String, reason: &'static str },

    #[error("Invalid age '{0}': expected a non-negative integer or 'n/a'")]
    InvalidAge(String),

    #[error("Invalid sex '{0}': expected 'M', 'F' or 'n/a'")]
    InvalidSex(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
