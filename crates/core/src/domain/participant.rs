// participants.tsv row

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::{DomainError, Result};
use super::subject::{ParticipantId, SessionId};

/// Placeholder BIDS uses for unknown values
pub const NOT_AVAILABLE: &str = "n/a";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[default]
    #[serde(rename = "n/a")]
    Unknown,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Unknown => NOT_AVAILABLE,
        }
    }
}

impl FromStr for Sex {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "M" => Ok(Sex::Male),
            "F" => Ok(Sex::Female),
            NOT_AVAILABLE => Ok(Sex::Unknown),
            other => Err(DomainError::InvalidSex(other.to_string())),
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Age in years at the time of the scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Age(Option<u16>);

impl Age {
    pub fn years(years: u16) -> Self {
        Self(Some(years))
    }

    pub fn unknown() -> Self {
        Self(None)
    }

    pub fn value(&self) -> Option<u16> {
        self.0
    }
}

impl FromStr for Age {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == NOT_AVAILABLE {
            return Ok(Self::unknown());
        }
        s.parse::<u16>()
            .map(Self::years)
            .map_err(|_| DomainError::InvalidAge(s.to_string()))
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(years) => write!(f, "{years}"),
            None => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// One row of `participants.tsv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub participant_id: ParticipantId,
    pub session_id: SessionId,
    /// Name of the DICOM folder the session was imported from
    pub source_id: String,
    pub age: Age,
    pub sex: Sex,
}

impl ParticipantRecord {
    pub const COLUMNS: [&'static str; 5] = ["participant_id", "ses_id", "source_id", "age", "sex"];

    pub fn fields(&self) -> [String; 5] {
        [
            self.participant_id.to_string(),
            self.session_id.to_string(),
            self.source_id.clone(),
            self.age.to_string(),
            self.sex.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_round_trips_through_labels() {
        assert_eq!("M".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("n/a".parse::<Sex>().unwrap().to_string(), "n/a");
        assert!("X".parse::<Sex>().is_err());
    }

    #[test]
    fn test_age_parsing() {
        assert_eq!("25".parse::<Age>().unwrap().value(), Some(25));
        assert_eq!("n/a".parse::<Age>().unwrap(), Age::unknown());
        assert!("-3".parse::<Age>().is_err());
        assert!("twenty".parse::<Age>().is_err());
    }

    #[test]
    fn test_record_fields_follow_column_order() {
        let record = ParticipantRecord {
            participant_id: ParticipantId::parse("sub-001").unwrap(),
            session_id: SessionId::parse("ses-01").unwrap(),
            source_id: "dir_20231010".to_string(),
            age: Age::years(42),
            sex: Sex::Female,
        };

        assert_eq!(
            record.fields(),
            ["sub-001", "ses-01", "dir_20231010", "42", "F"].map(String::from)
        );
    }
}
