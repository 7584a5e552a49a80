// dcm2niix converter adapter
// reason: async-trait, tokio for async process management
use async_trait::async_trait;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Output, Stdio};
use std::sync::Arc;
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::time::timeout;
use tracing::{debug, info};

use bidsify_core::port::converter::{
    ConversionError, ConversionOutcome, ConversionStatus, Converter,
};
use bidsify_core::port::TimeProvider;

/// How dcm2niix is invoked
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Dcm2niixOptions {
    /// Executable name or path
    pub program: String,
    /// `-z y`: gzip the output (the catalog only lists `.nii.gz`)
    pub compress: bool,
    /// `-f`: output file name pattern, `%d` series description, `%s` series number
    pub filename_format: String,
    /// `-i y`: ignore derived, localizer and 2D images
    pub ignore_derived: bool,
    /// Kill the converter after this many seconds
    pub timeout_secs: Option<u64>,
}

impl Default for Dcm2niixOptions {
    fn default() -> Self {
        Self {
            program: "dcm2niix".to_string(),
            compress: true,
            filename_format: "%d_%s".to_string(),
            ignore_derived: true,
            timeout_secs: None,
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "y"
    } else {
        "n"
    }
}

/// Runs dcm2niix as a child process
pub struct Dcm2niixConverter {
    options: Dcm2niixOptions,
    time_provider: Arc<dyn TimeProvider>,
}

impl Dcm2niixConverter {
    /// Create a new converter adapter
    ///
    /// # Example
    /// ```ignore
    /// let converter = Dcm2niixConverter::new(
    ///     Dcm2niixOptions::default(),
    ///     Arc::new(SystemTimeProvider),
    /// );
    /// ```
    pub fn new(options: Dcm2niixOptions, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            options,
            time_provider,
        }
    }

    /// Command line arguments, in dcm2niix order: flags, `-o <out>`, input folder
    fn build_args(&self, dicom_dir: &Path, output_dir: &Path) -> Vec<OsString> {
        let opts = &self.options;
        let mut args: Vec<OsString> = [
            "-z",
            yes_no(opts.compress),
            "-f",
            opts.filename_format.as_str(),
            "-i",
            yes_no(opts.ignore_derived),
            "-o",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(output_dir.as_os_str().to_owned());
        args.push(dicom_dir.as_os_str().to_owned());
        args
    }

    fn spawn(&self, args: &[OsString]) -> Result<Child, ConversionError> {
        Command::new(&self.options.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ConversionError::SpawnFailed {
                program: self.options.program.clone(),
                reason: match e.kind() {
                    std::io::ErrorKind::NotFound => {
                        "executable not found, is it installed and on PATH?".to_string()
                    }
                    _ => e.to_string(),
                },
            })
    }

    /// Collect output; dropping the child on timeout kills it
    async fn collect(&self, child: Child) -> Result<Output, ConversionError> {
        let finished = child.wait_with_output();
        let output = match self.options.timeout_secs {
            Some(secs) => timeout(Duration::from_secs(secs), finished)
                .await
                .map_err(|_| ConversionError::Timeout(secs * 1000))?,
            None => finished.await,
        };
        output.map_err(|e| ConversionError::IoError(e.to_string()))
    }
}

fn lossy(bytes: &[u8]) -> Option<String> {
    Some(String::from_utf8_lossy(bytes).into_owned())
}

#[async_trait]
impl Converter for Dcm2niixConverter {
    fn name(&self) -> &str {
        &self.options.program
    }

    async fn convert(
        &self,
        dicom_dir: &Path,
        output_dir: &Path,
    ) -> Result<ConversionOutcome, ConversionError> {
        let args = self.build_args(dicom_dir, output_dir);
        let start_time = self.time_provider.now().timestamp_millis();

        info!(
            program = %self.options.program,
            args = ?args,
            timeout_secs = ?self.options.timeout_secs,
            "Starting converter"
        );

        let child = self.spawn(&args)?;
        let output = self.collect(child).await?;

        let outcome = ConversionOutcome {
            status: if output.status.success() {
                ConversionStatus::Success
            } else {
                ConversionStatus::Failed
            },
            duration_ms: self.time_provider.now().timestamp_millis() - start_time,
            exit_code: output.status.code(),
            stdout: lossy(&output.stdout),
            stderr: lossy(&output.stderr),
        };

        if let Some(stdout) = outcome.stdout.as_deref() {
            for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
                debug!(target: "bidsify::converter", "{line}");
            }
        }

        info!(
            program = %self.options.program,
            duration_ms = outcome.duration_ms,
            exit_code = ?outcome.exit_code,
            status = ?outcome.status,
            "Converter completed"
        );

        Ok(outcome)
    }
}
