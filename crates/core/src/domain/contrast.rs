// Contrast Domain Model

use serde::{Deserialize, Serialize};

use super::error::{DomainError, Result};

/// BIDS datatype folder inside a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Datatype {
    Anat,
    Dwi,
}

impl Datatype {
    pub fn folder_name(&self) -> &'static str {
        match self {
            Datatype::Anat => "anat",
            Datatype::Dwi => "dwi",
        }
    }
}

impl std::fmt::Display for Datatype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.folder_name())
    }
}

/// Requested contrast: a BIDS suffix, optionally preceded by entities.
///
/// `T2w`, `dwi` and `acq-axial_T2w` are all valid. The suffix (last
/// `_`-separated token) decides the datatype folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contrast(String);

impl Contrast {
    const DIFFUSION_SUFFIX: &'static str = "dwi";

    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let invalid = |reason| DomainError::InvalidContrast {
            value: value.clone(),
            reason,
        };

        if value.is_empty() {
            return Err(invalid("must not be empty"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(invalid("must not contain whitespace"));
        }
        if value.contains(['/', '\\', '.']) {
            return Err(invalid("must not contain path separators or dots"));
        }
        if value.starts_with('_') || value.ends_with('_') || value.contains("__") {
            return Err(invalid("entities must be joined by single underscores"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn suffix(&self) -> &str {
        self.0.rsplit('_').next().unwrap_or(&self.0)
    }

    pub fn is_diffusion(&self) -> bool {
        self.suffix() == Self::DIFFUSION_SUFFIX
    }

    pub fn datatype(&self) -> Datatype {
        if self.is_diffusion() {
            Datatype::Dwi
        } else {
            Datatype::Anat
        }
    }
}

impl std::fmt::Display for Contrast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
