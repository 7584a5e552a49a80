// Converter Port
// Abstraction for the external DICOM-to-NIfTI converter

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Result of a converter run
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub status: ConversionStatus,
    pub duration_ms: i64,
    pub exit_code: Option<i32>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

/// Conversion status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionStatus {
    Success,
    /// Converter ran but reported a failure; some series may still exist
    Failed,
}

/// Conversion errors
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Cannot start converter '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    #[error("Converter timeout after {0}ms")]
    Timeout(u64),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Converter trait
///
/// Implementations:
/// - Dcm2niixConverter: spawns the dcm2niix executable
/// - mocks::FakeConverter: writes canned files (tests)
#[async_trait]
pub trait Converter: Send + Sync {
    /// Short name used in log messages
    fn name(&self) -> &str;

    /// Convert every DICOM series found under `dicom_dir` into `output_dir`
    ///
    /// # Errors
    /// - ConversionError::SpawnFailed if the converter cannot be started
    /// - ConversionError::Timeout if the run exceeds the configured limit
    async fn convert(
        &self,
        dicom_dir: &Path,
        output_dir: &Path,
    ) -> Result<ConversionOutcome, ConversionError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Fake converter behavior
    #[derive(Debug, Clone)]
    pub enum FakeBehavior {
        /// Write the given (file name, bytes) pairs and report success
        Produce(Vec<(String, Vec<u8>)>),
        /// Write the files but report a non-zero exit code
        ProduceWithFailure(Vec<(String, Vec<u8>)>, i32),
        /// Fail to start
        SpawnFail(String),
    }

    /// Fake Converter for testing
    pub struct FakeConverter {
        behavior: FakeBehavior,
        call_count: Arc<Mutex<usize>>,
    }

    impl FakeConverter {
        pub fn new(behavior: FakeBehavior) -> Self {
            Self {
                behavior,
                call_count: Arc::new(Mutex::new(0)),
            }
        }

        pub fn producing(files: Vec<(String, Vec<u8>)>) -> Self {
            Self::new(FakeBehavior::Produce(files))
        }

        pub fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }

        fn write_all(files: &[(String, Vec<u8>)], output_dir: &Path) -> Result<(), ConversionError> {
            for (name, bytes) in files {
                std::fs::write(output_dir.join(name), bytes)
                    .map_err(|e| ConversionError::IoError(e.to_string()))?;
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Converter for FakeConverter {
        fn name(&self) -> &str {
            "fake"
        }

        async fn convert(
            &self,
            _dicom_dir: &Path,
            output_dir: &Path,
        ) -> Result<ConversionOutcome, ConversionError> {
            *self.call_count.lock().unwrap() += 1;

            match &self.behavior {
                FakeBehavior::Produce(files) => {
                    Self::write_all(files, output_dir)?;
                    Ok(ConversionOutcome {
                        status: ConversionStatus::Success,
                        duration_ms: 10,
                        exit_code: Some(0),
                        stdout: Some("fake conversion".to_string()),
                        stderr: None,
                    })
                }
                FakeBehavior::ProduceWithFailure(files, code) => {
                    Self::write_all(files, output_dir)?;
                    Ok(ConversionOutcome {
                        status: ConversionStatus::Failed,
                        duration_ms: 10,
                        exit_code: Some(*code),
                        stdout: None,
                        stderr: Some("fake failure".to_string()),
                    })
                }
                FakeBehavior::SpawnFail(reason) => Err(ConversionError::SpawnFailed {
                    program: "fake".to_string(),
                    reason: reason.clone(),
                }),
            }
        }
    }
}
