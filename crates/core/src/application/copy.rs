// Copy Use Case - place a selected image and its sidecars into the layout

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::layout::BidsLayout;
use super::selection::Selection;
use super::sidecars::{sidecar, GradientTables};
use crate::domain::Contrast;
use crate::error::{AppError, Result};

const IMAGE_EXT: &str = "nii.gz";
const JSON_EXT: &str = "json";

/// Files written for one contrast
#[derive(Debug, Clone)]
pub struct CopiedImage {
    pub contrast: Contrast,
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Sidecars copied next to the destination image
    pub sidecars: Vec<PathBuf>,
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    info!("Copying {} to {}", from.display(), to.display());
    fs::copy(from, to).map_err(AppError::io_at(from))?;
    Ok(())
}

/// Copy the image, its JSON sidecar and, for diffusion contrasts, the
/// gradient tables into `<session>/<datatype>/`.
///
/// A missing JSON sidecar is logged and skipped; missing gradient tables
/// are an error since selection already checked them.
pub fn copy_to_bids(selection: &Selection, layout: &BidsLayout) -> Result<CopiedImage> {
    let contrast = &selection.contrast;
    let target_dir = layout.datatype_dir(contrast.datatype());
    fs::create_dir_all(&target_dir).map_err(AppError::io_at(&target_dir))?;

    let destination = layout.output_path(contrast, IMAGE_EXT);
    copy_file(&selection.image, &destination)?;

    let mut sidecars = Vec::new();

    let json = sidecar(&selection.image, JSON_EXT);
    if json.is_file() {
        let json_dest = layout.output_path(contrast, JSON_EXT);
        copy_file(&json, &json_dest)?;
        sidecars.push(json_dest);
    } else {
        warn!(path = %json.display(), "JSON sidecar not found, skipping");
    }

    if contrast.is_diffusion() {
        let tables = GradientTables::for_image(&selection.image);
        for (source, ext) in tables.files() {
            let dest = layout.output_path(contrast, ext);
            copy_file(source, &dest)?;
            sidecars.push(dest);
        }
    }

    Ok(CopiedImage {
        contrast: contrast.clone(),
        source: selection.image.clone(),
        destination,
        sidecars,
    })
}
