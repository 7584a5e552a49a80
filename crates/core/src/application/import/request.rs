// Import request

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::application::layout::BidsLayout;
use crate::domain::{Age, Contrast, ParticipantRecord, Sex};
use crate::error::{AppError, Result};

/// Everything one import run needs, already parsed from the command line
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub dicom_dir: PathBuf,
    pub layout: BidsLayout,
    pub contrasts: Vec<Contrast>,
    pub age: Age,
    pub sex: Sex,
    /// Keep the scratch folder with the raw converter output
    pub keep_scratch: bool,
}

/// Contrasts must be given at least once and at most once each
pub fn validate_contrasts(contrasts: &[Contrast]) -> Result<()> {
    if contrasts.is_empty() {
        return Err(AppError::Validation(
            "At least one contrast is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for contrast in contrasts {
        if !seen.insert(contrast.as_str()) {
            return Err(AppError::Validation(format!(
                "Contrast '{contrast}' was requested more than once"
            )));
        }
    }
    Ok(())
}

impl ImportRequest {
    pub fn validate(&self) -> Result<()> {
        validate_contrasts(&self.contrasts)?;

        if !self.layout.participant().has_standard_prefix() {
            warn!(
                participant = %self.layout.participant(),
                "Participant ID does not start with 'sub-'"
            );
        }
        if !self.layout.session().has_standard_prefix() {
            warn!(
                session = %self.layout.session(),
                "Session ID does not start with 'ses-'"
            );
        }
        Ok(())
    }

    /// Last path component of the DICOM folder, e.g. `dir_20231010`
    pub fn source_id(&self) -> String {
        source_id_of(&self.dicom_dir)
    }

    pub fn participant_record(&self) -> ParticipantRecord {
        ParticipantRecord {
            participant_id: self.layout.participant().clone(),
            session_id: self.layout.session().clone(),
            source_id: self.source_id(),
            age: self.age,
            sex: self.sex,
        }
    }

    pub fn log_summary(&self) {
        let contrasts: Vec<&str> = self.contrasts.iter().map(Contrast::as_str).collect();
        info!("Dicom folder: {}", self.dicom_dir.display());
        info!("BIDS folder: {}", self.layout.root().display());
        info!("Participant ID: {}", self.layout.participant());
        info!("Session ID: {}", self.layout.session());
        info!("MRI contrasts to use: {}", contrasts.join(" "));
        info!("Age: {}", self.age);
        info!("Sex: {}", self.sex);
    }
}

fn source_id_of(dir: &Path) -> String {
    dir.components()
        .filter(|c| matches!(c, std::path::Component::Normal(_)))
        .last()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}
