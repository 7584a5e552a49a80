// Catalog Use Case - list, sort and inspect converter output

use std::path::Path;
use tracing::{debug, warn};

use crate::domain::{SeriesCatalog, SeriesFile};
use crate::error::{AppError, Result};
use crate::port::ImageInspector;

/// Build the table of converted series found in `scratch_dir`
///
/// Only regular `*.nii.gz` files are listed. Rows are sorted by series
/// number (see [`SeriesFile::from_file_name`]).
///
/// # Errors
/// - AppError::NoImages if the folder holds no compressed NIfTI file
/// - AppError::Inspection if a header cannot be read
pub fn build_catalog(scratch_dir: &Path, inspector: &dyn ImageInspector) -> Result<SeriesCatalog> {
    let mut series = Vec::new();

    for entry in std::fs::read_dir(scratch_dir).map_err(AppError::io_at(scratch_dir))? {
        let entry = entry.map_err(AppError::io_at(scratch_dir))?;
        let file_type = entry.file_type().map_err(AppError::io_at(entry.path()))?;
        if !file_type.is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            warn!(path = %entry.path().display(), "Skipping file with non UTF-8 name");
            continue;
        };

        if SeriesFile::is_compressed_nifti(&name) {
            series.push(SeriesFile::from_file_name(name));
        }
    }

    if series.is_empty() {
        return Err(AppError::NoImages(scratch_dir.to_path_buf()));
    }

    series.sort();

    let mut rows = Vec::with_capacity(series.len());
    for file in series {
        let path = scratch_dir.join(&file.file_name);
        let info = inspector
            .inspect(&path)
            .map_err(|e| AppError::Inspection {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        debug!(
            file = %file.file_name,
            series_number = ?file.series_number,
            dims = %info.dimensions_label(),
            "Inspected series"
        );
        rows.push((file, info));
    }

    Ok(SeriesCatalog::new(scratch_dir, rows))
}
