//! Command-line arguments

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use bidsify_core::domain::{Age, Contrast, DomainError, ParticipantId, SessionId, Sex};

#[derive(Parser, Debug)]
#[command(name = "bidsify")]
#[command(about = "Convert DICOM to NIfTI and identify images for the further analysis", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Folder containing DICOM images, e.g. ~/sci-study/sourcedata/dir_20230711
    #[arg(long, value_name = "DIR")]
    pub dicom_folder: String,

    /// BIDS folder where the converted NIfTI images will be stored, e.g. ~/sci-study/bids
    #[arg(long, value_name = "DIR")]
    pub bids_folder: String,

    /// Participant ID, e.g. sub-001
    #[arg(long, value_parser = parse_participant)]
    pub participant: ParticipantId,

    /// Session ID, e.g. ses-01
    #[arg(long, value_parser = parse_session)]
    pub session: SessionId,

    /// MRI contrasts to use. Use the 'acq' entity to tell apart two images of the
    /// same contrast, e.g. 'acq-axial_T2w acq-sag_T2w'
    #[arg(long, num_args = 1.., value_parser = parse_contrast, default_values = ["T2w", "dwi"])]
    pub contrasts: Vec<Contrast>,

    /// Age of the subject at the time of the MRI scan, e.g. 25
    #[arg(long, value_parser = parse_age, default_value = "n/a")]
    pub age: Age,

    /// Sex of the subject
    #[arg(long, value_enum, default_value_t = SexArg::Unknown)]
    pub sex: SexArg,

    /// Keep the temporary folder with the converter output
    #[arg(long)]
    pub debug: bool,

    /// Settings file (TOML) overriding the user configuration
    #[arg(long, env = "BIDSIFY_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SexArg {
    #[value(name = "M")]
    Male,
    #[value(name = "F")]
    Female,
    #[value(name = "n/a")]
    Unknown,
}

impl From<SexArg> for Sex {
    fn from(arg: SexArg) -> Self {
        match arg {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
            SexArg::Unknown => Sex::Unknown,
        }
    }
}

fn parse_participant(s: &str) -> Result<ParticipantId, DomainError> {
    ParticipantId::parse(s)
}

fn parse_session(s: &str) -> Result<SessionId, DomainError> {
    SessionId::parse(s)
}

fn parse_contrast(s: &str) -> Result<Contrast, DomainError> {
    Contrast::parse(s)
}

fn parse_age(s: &str) -> Result<Age, DomainError> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 9] = [
        "bidsify",
        "--dicom-folder",
        "~/src/dir_20231010",
        "--bids-folder",
        "~/bids",
        "--participant",
        "sub-001",
        "--session",
        "ses-01",
    ];

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(REQUIRED).unwrap();

        let contrasts: Vec<_> = cli.contrasts.iter().map(Contrast::as_str).collect();
        assert_eq!(contrasts, vec!["T2w", "dwi"]);
        assert_eq!(cli.age, Age::unknown());
        assert_eq!(Sex::from(cli.sex), Sex::Unknown);
        assert!(!cli.debug);
        assert_eq!(cli.participant.as_str(), "sub-001");
    }

    #[test]
    fn test_explicit_values() {
        let args = REQUIRED.iter().copied().chain([
            "--contrasts",
            "acq-axial_T2w",
            "acq-sag_T2w",
            "--age",
            "25",
            "--sex",
            "F",
            "--debug",
        ]);
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.contrasts.len(), 2);
        assert_eq!(cli.contrasts[1].suffix(), "T2w");
        assert_eq!(cli.age.value(), Some(25));
        assert_eq!(Sex::from(cli.sex), Sex::Female);
        assert!(cli.debug);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let with = |extra: [&'static str; 2]| {
            Cli::try_parse_from(REQUIRED.iter().copied().chain(extra)).is_err()
        };
        assert!(with(["--sex", "X"]));
        assert!(with(["--age", "old"]));
        assert!(with(["--contrasts", "anat/T2w"]));
    }

    #[test]
    fn test_missing_required_argument() {
        assert!(Cli::try_parse_from(["bidsify", "--dicom-folder", "x"]).is_err());
    }
}
