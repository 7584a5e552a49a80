// Selection Use Case - operator picks one catalog row per contrast

use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

use super::sidecars::GradientTables;
use crate::domain::{Contrast, SeriesCatalog};
use crate::error::{AppError, Result};
use crate::port::Prompt;

/// Image chosen for a contrast, still inside the scratch folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub contrast: Contrast,
    pub image: PathBuf,
}

/// Why an answer was not accepted as a row number
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RowError {
    #[error("Input cannot be empty. Please try again.")]
    Empty,

    #[error("Invalid input. Please enter a valid row number.")]
    NotANumber,

    #[error("Invalid image number. Please try again.")]
    OutOfRange,
}

/// Parse an operator answer into a row index below `rows`
pub fn parse_row(answer: &str, rows: usize) -> std::result::Result<usize, RowError> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(RowError::Empty);
    }

    let row: i64 = answer.parse().map_err(|_| RowError::NotANumber)?;
    usize::try_from(row)
        .ok()
        .filter(|row| *row < rows)
        .ok_or(RowError::OutOfRange)
}

/// Ask until the operator gives a valid row for `contrast`
///
/// Diffusion contrasts additionally need `.bval` and `.bvec` next to the
/// chosen image; otherwise the operator is asked again.
///
/// # Errors
/// - AppError::Aborted if input ends before a valid answer
pub fn select_image(
    contrast: &Contrast,
    catalog: &SeriesCatalog,
    prompt: &dyn Prompt,
) -> Result<Selection> {
    let last_row = catalog.len().saturating_sub(1);

    loop {
        info!(
            "Please specify the row number (from 0 to {last_row}) of the {contrast} image you want to use: "
        );

        let Some(answer) = prompt.read_line()? else {
            return Err(AppError::Aborted(format!("selection of the {contrast} image")));
        };

        let row = match parse_row(&answer, catalog.len()) {
            Ok(row) => row,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };

        let Some(entry) = catalog.get(row) else {
            warn!("{}", RowError::OutOfRange);
            continue;
        };
        let image = catalog.path_of(entry);

        if contrast.is_diffusion() {
            let tables = GradientTables::for_image(&image);
            let missing = tables.missing();
            if !missing.is_empty() {
                warn!(
                    missing = ?missing,
                    "bval or bvec file is missing for the provided DWI image. Please try another DWI image."
                );
                continue;
            }
        }

        info!("Selected {contrast} image: {}", entry.series.file_name);
        return Ok(Selection {
            contrast: contrast.clone(),
            image,
        });
    }
}
