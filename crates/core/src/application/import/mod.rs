// Import Service - the whole DICOM folder to BIDS session run

pub mod request;

pub use request::ImportRequest;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use super::catalog::build_catalog;
use super::copy::{copy_to_bids, CopiedImage};
use super::overwrite::confirm_overwrite;
use super::registry::append_participant;
use super::selection::select_image;
use crate::error::{AppError, Result};
use crate::port::{CatalogPresenter, ConversionStatus, Converter, ImageInspector, Prompt};

/// How a run ended
#[derive(Debug)]
pub enum ImportOutcome {
    /// Images copied and participant registered
    Completed {
        session_dir: PathBuf,
        images: Vec<CopiedImage>,
        /// Scratch folder, when kept for inspection
        scratch_dir: Option<PathBuf>,
    },
    /// Operator declined to overwrite an existing session
    Skipped { session_dir: PathBuf },
}

/// Import Service
pub struct ImportService {
    converter: Arc<dyn Converter>,
    inspector: Arc<dyn ImageInspector>,
    prompt: Arc<dyn Prompt>,
    presenter: Arc<dyn CatalogPresenter>,
}

impl ImportService {
    pub fn new(
        converter: Arc<dyn Converter>,
        inspector: Arc<dyn ImageInspector>,
        prompt: Arc<dyn Prompt>,
        presenter: Arc<dyn CatalogPresenter>,
    ) -> Self {
        Self {
            converter,
            inspector,
            prompt,
            presenter,
        }
    }

    /// Convert, select, copy and register one session
    ///
    /// # Errors
    /// - AppError::DicomFolderMissing if the input folder does not exist
    /// - AppError::NoImages if the converter produced nothing usable
    /// - AppError::Aborted if operator input ends early
    pub async fn run(&self, req: ImportRequest) -> Result<ImportOutcome> {
        req.validate()?;

        if !req.dicom_dir.is_dir() {
            return Err(AppError::DicomFolderMissing(req.dicom_dir.clone()));
        }

        let layout = &req.layout;
        let session_dir = layout.session_dir();

        if session_dir.is_dir() {
            if !confirm_overwrite(&session_dir, self.prompt.as_ref())? {
                info!("Skipping the DICOM to NIfTI conversion.");
                return Ok(ImportOutcome::Skipped { session_dir });
            }
            info!("Overwriting the existing folder.");
            fs::remove_dir_all(&session_dir).map_err(AppError::io_at(&session_dir))?;
            info!("Removed existing folder: {}", session_dir.display());
        }
        fs::create_dir_all(&session_dir).map_err(AppError::io_at(&session_dir))?;
        info!("Converted NIfTI images will be stored in: {}", session_dir.display());

        let scratch_dir = layout.scratch_dir();
        info!(
            "Creating a temporary folder for DICOM to NIfTI conversion: {}",
            scratch_dir.display()
        );
        fs::create_dir_all(&scratch_dir).map_err(AppError::io_at(&scratch_dir))?;

        self.convert(&req, &scratch_dir).await?;

        info!("{}", "-".repeat(100));
        info!("DICOM to NIfTI is done. Please review the images and select images for further processing.");
        info!("{}", "-".repeat(100));

        let catalog = build_catalog(&scratch_dir, self.inspector.as_ref())?;
        self.presenter.present(&catalog);

        let mut selections = Vec::with_capacity(req.contrasts.len());
        for contrast in &req.contrasts {
            selections.push(select_image(contrast, &catalog, self.prompt.as_ref())?);
        }

        let mut images = Vec::with_capacity(selections.len());
        for selection in &selections {
            images.push(copy_to_bids(selection, layout)?);
        }

        let kept_scratch = if req.keep_scratch {
            info!(
                "Temporary folder with NIfTI images is stored in: {}",
                scratch_dir.display()
            );
            Some(scratch_dir)
        } else {
            info!("Removing the temporary folder {}", scratch_dir.display());
            fs::remove_dir_all(&scratch_dir).map_err(AppError::io_at(&scratch_dir))?;
            None
        };

        info!("{}", "-".repeat(100));
        info!("All files have been successfully converted and validated. You can find the images in the BIDS folder:");
        info!("\t{}", session_dir.display());
        info!("{}", "-".repeat(100));

        append_participant(&layout.participants_file(), &req.participant_record())?;

        Ok(ImportOutcome::Completed {
            session_dir,
            images,
            scratch_dir: kept_scratch,
        })
    }

    async fn convert(&self, req: &ImportRequest, scratch_dir: &std::path::Path) -> Result<()> {
        info!(
            converter = %self.converter.name(),
            "Starting DICOM to NIfTI conversion"
        );

        let outcome = self.converter.convert(&req.dicom_dir, scratch_dir).await?;

        if outcome.status != ConversionStatus::Success {
            warn!(
                exit_code = ?outcome.exit_code,
                stderr = %outcome.stderr.as_deref().unwrap_or_default().trim(),
                "Converter reported a failure; continuing with the series it produced"
            );
        }
        info!(duration_ms = outcome.duration_ms, "Conversion finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::layout::{BidsLayout, LayoutOptions};
    use crate::domain::{Age, Contrast, ImageInfo, ParticipantId, SessionId, Sex};
    use crate::port::converter::mocks::{FakeBehavior, FakeConverter};
    use crate::port::image_inspector::MockImageInspector;
    use crate::port::presenter::mocks::RecordingPresenter;
    use crate::port::prompt::mocks::ScriptedPrompt;
    use std::path::Path;

    fn inspector() -> MockImageInspector {
        let mut inspector = MockImageInspector::new();
        inspector.expect_inspect().returning(|_| {
            Ok(ImageInfo {
                dims: [64, 64, 30],
                voxel_size: [2.0, 2.0, 2.0],
                volumes: 1,
            })
        });
        inspector
    }

    fn request(dicom: &Path, bids: &Path, contrasts: &[&str]) -> ImportRequest {
        ImportRequest {
            dicom_dir: dicom.to_path_buf(),
            layout: BidsLayout::new(
                bids,
                ParticipantId::parse("sub-001").unwrap(),
                SessionId::parse("ses-01").unwrap(),
                LayoutOptions::default(),
            ),
            contrasts: contrasts.iter().map(|c| Contrast::parse(*c).unwrap()).collect(),
            age: Age::unknown(),
            sex: Sex::Unknown,
            keep_scratch: false,
        }
    }

    fn series(names: &[&str]) -> Vec<(String, Vec<u8>)> {
        names.iter().map(|n| (n.to_string(), b"x".to_vec())).collect()
    }

    #[tokio::test]
    async fn test_missing_dicom_folder() {
        let bids = tempfile::tempdir().unwrap();
        let converter = Arc::new(FakeConverter::producing(vec![]));
        let service = ImportService::new(
            converter.clone(),
            Arc::new(MockImageInspector::new()),
            Arc::new(ScriptedPrompt::new(Vec::<String>::new())),
            Arc::new(RecordingPresenter::new()),
        );

        let req = request(&bids.path().join("nope"), bids.path(), &["T2w"]);
        let err = service.run(req).await.unwrap_err();

        assert!(matches!(err, AppError::DicomFolderMissing(_)));
        assert_eq!(converter.call_count(), 0);
    }

    #[tokio::test]
    async fn test_declined_overwrite_leaves_session_untouched() {
        let dicom = tempfile::tempdir().unwrap();
        let bids = tempfile::tempdir().unwrap();
        let existing = bids.path().join("sub-001/ses-01/anat");
        fs::create_dir_all(&existing).unwrap();
        fs::write(existing.join("keep.txt"), b"").unwrap();

        let converter = Arc::new(FakeConverter::producing(vec![]));
        let service = ImportService::new(
            converter.clone(),
            Arc::new(MockImageInspector::new()),
            Arc::new(ScriptedPrompt::new(["no"])),
            Arc::new(RecordingPresenter::new()),
        );

        let outcome = service
            .run(request(dicom.path(), bids.path(), &["T2w"]))
            .await
            .unwrap();

        assert!(matches!(outcome, ImportOutcome::Skipped { .. }));
        assert!(existing.join("keep.txt").is_file());
        assert_eq!(converter.call_count(), 0);
        assert!(!bids.path().join("participants.tsv").exists());
    }

    #[tokio::test]
    async fn test_full_run_with_failed_converter_exit() {
        let dicom = tempfile::tempdir().unwrap();
        let bids = tempfile::tempdir().unwrap();

        let converter = Arc::new(FakeConverter::new(FakeBehavior::ProduceWithFailure(
            series(&["t2_tse_3.nii.gz", "t2_tse_3.json"]),
            2,
        )));
        let presenter = Arc::new(RecordingPresenter::new());
        let service = ImportService::new(
            converter,
            Arc::new(inspector()),
            Arc::new(ScriptedPrompt::new(["0"])),
            presenter.clone(),
        );

        let outcome = service
            .run(request(dicom.path(), bids.path(), &["T2w"]))
            .await
            .unwrap();

        match outcome {
            ImportOutcome::Completed {
                images,
                scratch_dir,
                ..
            } => {
                assert_eq!(images.len(), 1);
                assert!(images[0].destination.is_file());
                assert!(scratch_dir.is_none());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(presenter.shown(), vec![1]);
        assert!(!bids.path().join("sub-001/ses-01/temp_dcm2niix").exists());
        assert!(bids.path().join("participants.tsv").is_file());
    }

    #[tokio::test]
    async fn test_no_images_keeps_registry_untouched() {
        let dicom = tempfile::tempdir().unwrap();
        let bids = tempfile::tempdir().unwrap();

        let service = ImportService::new(
            Arc::new(FakeConverter::producing(series(&["report.txt"]))),
            Arc::new(MockImageInspector::new()),
            Arc::new(ScriptedPrompt::new(["0"])),
            Arc::new(RecordingPresenter::new()),
        );

        let err = service
            .run(request(dicom.path(), bids.path(), &["T2w"]))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NoImages(_)));
        assert!(!bids.path().join("participants.tsv").exists());
    }

    #[tokio::test]
    async fn test_spawn_failure_is_propagated() {
        let dicom = tempfile::tempdir().unwrap();
        let bids = tempfile::tempdir().unwrap();

        let service = ImportService::new(
            Arc::new(FakeConverter::new(FakeBehavior::SpawnFail("not found".into()))),
            Arc::new(MockImageInspector::new()),
            Arc::new(ScriptedPrompt::new(Vec::<String>::new())),
            Arc::new(RecordingPresenter::new()),
        );

        let err = service
            .run(request(dicom.path(), bids.path(), &["T2w"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conversion(_)));
    }
}
