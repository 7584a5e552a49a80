// BIDS destination layout

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::{Contrast, Datatype, ParticipantId, SessionId};

pub const PARTICIPANTS_FILE: &str = "participants.tsv";

/// Folder names that are configurable per installation
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Scratch folder inside the session folder that receives converter output
    pub scratch_dir_name: String,
    /// Log folder inside the BIDS root
    pub log_dir_name: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            scratch_dir_name: "temp_dcm2niix".to_string(),
            log_dir_name: "logs".to_string(),
        }
    }
}

/// Paths of one participant/session inside a BIDS dataset
///
/// ```text
/// <root>/
/// ├── participants.tsv
/// ├── logs/
/// └── sub-001/ses-01/
///     ├── anat/sub-001_ses-01_T2w.{nii.gz,json}
///     └── dwi/sub-001_ses-01_dwi.{nii.gz,json,bval,bvec}
/// ```
#[derive(Debug, Clone)]
pub struct BidsLayout {
    root: PathBuf,
    participant: ParticipantId,
    session: SessionId,
    options: LayoutOptions,
}

impl BidsLayout {
    pub fn new(
        root: impl Into<PathBuf>,
        participant: ParticipantId,
        session: SessionId,
        options: LayoutOptions,
    ) -> Self {
        Self {
            root: root.into(),
            participant,
            session,
            options,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn participant(&self) -> &ParticipantId {
        &self.participant
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub fn session_dir(&self) -> PathBuf {
        self.root
            .join(self.participant.as_str())
            .join(self.session.as_str())
    }

    pub fn scratch_dir(&self) -> PathBuf {
        self.session_dir().join(&self.options.scratch_dir_name)
    }

    pub fn datatype_dir(&self, datatype: Datatype) -> PathBuf {
        self.session_dir().join(datatype.folder_name())
    }

    /// `<participant>_<session>_<contrast>`
    pub fn output_stem(&self, contrast: &Contrast) -> String {
        format!("{}_{}_{}", self.participant, self.session, contrast)
    }

    /// Destination of a file with the given extension (`nii.gz`, `json`, ...)
    pub fn output_path(&self, contrast: &Contrast, extension: &str) -> PathBuf {
        self.datatype_dir(contrast.datatype())
            .join(format!("{}.{extension}", self.output_stem(contrast)))
    }

    pub fn participants_file(&self) -> PathBuf {
        self.root.join(PARTICIPANTS_FILE)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.root.join(&self.options.log_dir_name)
    }

    /// `dicom_to_nifti_<participant>_<session>_<stamp>.log`
    pub fn log_file_name(&self, stamp: &str) -> String {
        format!(
            "dicom_to_nifti_{}_{}_{stamp}.log",
            self.participant, self.session
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> BidsLayout {
        BidsLayout::new(
            "/data/bids",
            ParticipantId::parse("sub-001").unwrap(),
            SessionId::parse("ses-01").unwrap(),
            LayoutOptions::default(),
        )
    }

    #[test]
    fn test_session_and_scratch_dirs() {
        let layout = layout();
        assert_eq!(layout.session_dir(), PathBuf::from("/data/bids/sub-001/ses-01"));
        assert_eq!(
            layout.scratch_dir(),
            PathBuf::from("/data/bids/sub-001/ses-01/temp_dcm2niix")
        );
    }

    #[test]
    fn test_anatomical_output_path() {
        let contrast = Contrast::parse("acq-axial_T2w").unwrap();
        assert_eq!(
            layout().output_path(&contrast, "nii.gz"),
            PathBuf::from("/data/bids/sub-001/ses-01/anat/sub-001_ses-01_acq-axial_T2w.nii.gz")
        );
    }

    #[test]
    fn test_diffusion_output_path() {
        let contrast = Contrast::parse("dwi").unwrap();
        assert_eq!(
            layout().output_path(&contrast, "bvec"),
            PathBuf::from("/data/bids/sub-001/ses-01/dwi/sub-001_ses-01_dwi.bvec")
        );
    }

    #[test]
    fn test_registry_and_logs_live_at_root() {
        let layout = layout();
        assert_eq!(
            layout.participants_file(),
            PathBuf::from("/data/bids/participants.tsv")
        );
        assert_eq!(layout.log_dir(), PathBuf::from("/data/bids/logs"));
        assert_eq!(
            layout.log_file_name("20231010_142501"),
            "dicom_to_nifti_sub-001_ses-01_20231010_142501.log"
        );
    }
}
