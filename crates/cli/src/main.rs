//! bidsify - convert a DICOM folder and file the chosen images into a BIDS dataset

mod args;
mod logging;
mod presenter;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use bidsify_core::application::import::request::validate_contrasts;
use bidsify_core::application::{BidsLayout, ImportOutcome, ImportRequest, ImportService};
use bidsify_core::port::{SystemTimeProvider, TimeProvider};
use bidsify_infra_system::{Dcm2niixConverter, NiftiHeaderInspector, StdinPrompt};

use crate::args::Cli;
use crate::presenter::TablePresenter;
use crate::settings::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);

    let (request, _guard) = match prepare(cli, &settings, time_provider.as_ref()) {
        Ok(prepared) => prepared,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    let service = ImportService::new(
        Arc::new(Dcm2niixConverter::new(
            settings.converter.clone(),
            time_provider,
        )),
        Arc::new(NiftiHeaderInspector::new()),
        Arc::new(StdinPrompt::new()),
        Arc::new(TablePresenter),
    );

    match service.run(request).await {
        Ok(outcome) => {
            report(&outcome);
            info!("Finished successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Resolve paths and check the arguments, without touching the filesystem
fn build_request(cli: Cli, settings: &Settings, cwd: &Path) -> Result<ImportRequest> {
    validate_contrasts(&cli.contrasts)?;

    let layout = BidsLayout::new(
        resolve(&cli.bids_folder, cwd),
        cli.participant,
        cli.session,
        settings.layout.clone(),
    );

    Ok(ImportRequest {
        dicom_dir: resolve(&cli.dicom_folder, cwd),
        layout,
        contrasts: cli.contrasts,
        age: cli.age,
        sex: cli.sex.into(),
        keep_scratch: cli.debug,
    })
}

/// Build the request, then start logging into the BIDS folder
fn prepare(
    cli: Cli,
    settings: &Settings,
    time: &dyn TimeProvider,
) -> Result<(ImportRequest, tracing_appender::non_blocking::WorkerGuard)> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let request = build_request(cli, settings, &cwd)?;

    let log_dir = request.layout.log_dir();
    let log_file = request.layout.log_file_name(&time.file_stamp());
    let guard = logging::init(&log_dir, &log_file, settings.log_format)?;

    info!("{}", "-".repeat(100));
    info!("bidsify {}", bidsify_core::VERSION);
    request.log_summary();
    info!("Log file: {}", log_dir.join(&log_file).display());

    Ok((request, guard))
}

/// Expand `~` and anchor relative paths at `cwd`
fn resolve(raw: &str, cwd: &Path) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(raw).as_ref());
    if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    }
}

fn report(outcome: &ImportOutcome) {
    match outcome {
        ImportOutcome::Completed {
            session_dir,
            images,
            scratch_dir,
        } => {
            println!();
            println!(
                "{}",
                format!("✓ Session stored in {}", session_dir.display())
                    .green()
                    .bold()
            );
            println!();
            println!("{}", presenter::render_copied(images));
            if let Some(scratch) = scratch_dir {
                println!();
                println!(
                    "  {} converter output kept in {}",
                    "•".bold(),
                    scratch.display()
                );
            }
        }
        ImportOutcome::Skipped { session_dir } => {
            println!(
                "{}",
                format!("○ {} left unchanged", session_dir.display()).yellow()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(extra: &[&str]) -> Cli {
        let required = [
            "bidsify",
            "--dicom-folder",
            "src/dir_20231010",
            "--bids-folder",
            "bids",
            "--participant",
            "sub-001",
            "--session",
            "ses-01",
        ];
        Cli::try_parse_from(required.iter().copied().chain(extra.iter().copied())).unwrap()
    }

    #[test]
    fn test_build_request_resolves_paths() {
        let request = build_request(cli(&[]), &Settings::default(), Path::new("/work")).unwrap();

        assert_eq!(request.dicom_dir, PathBuf::from("/work/src/dir_20231010"));
        assert_eq!(request.layout.root(), Path::new("/work/bids"));
        assert_eq!(request.source_id(), "dir_20231010");
    }

    #[test]
    fn test_duplicate_contrasts_rejected_before_log_folder_exists() {
        let cwd = tempfile::tempdir().unwrap();
        let args = cli(&["--contrasts", "T2w", "dwi", "T2w"]);

        let err = build_request(args, &Settings::default(), cwd.path()).unwrap_err();

        assert!(format!("{err:#}").contains("more than once"));
        assert!(!cwd.path().join("bids").exists());
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let cwd = Path::new("/work");
        assert_eq!(resolve("bids", cwd), PathBuf::from("/work/bids"));
        assert_eq!(resolve("/data/bids", cwd), PathBuf::from("/data/bids"));
    }

    #[test]
    fn test_resolve_expands_home() {
        let resolved = resolve("~/bids", Path::new("/work"));
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("bids"));
        assert!(!resolved.to_string_lossy().contains('~'));
    }
}
