// Converted series and their header summary

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// File extension the converter produces with compression enabled
pub const NIFTI_GZ_EXT: &str = ".nii.gz";

/// File name without its `.nii.gz` / `.nii` extension; other dots are kept
pub fn nifti_stem(file_name: &str) -> &str {
    file_name
        .strip_suffix(NIFTI_GZ_EXT)
        .or_else(|| file_name.strip_suffix(".nii"))
        .unwrap_or(file_name)
}

/// A converted NIfTI file in the scratch folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesFile {
    pub file_name: String,
    /// Series number encoded by the `%d_%s` filename format, if any
    pub series_number: Option<u64>,
}

impl SeriesFile {
    /// Parse the series number out of a converter file name.
    ///
    /// The number is the last purely numeric `_`-separated token of the
    /// stem, so echo/phase suffixes (`gre_7_e2.nii.gz`) still sort by series
    /// and dots inside the description (`ep2d_diff_1.5mm_7.nii.gz`) are kept.
    pub fn from_file_name(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let stem = nifti_stem(&file_name);
        let series_number = stem
            .rsplit('_')
            .find(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|token| token.parse().ok());

        Self {
            file_name,
            series_number,
        }
    }

    pub fn is_compressed_nifti(file_name: &str) -> bool {
        file_name.ends_with(NIFTI_GZ_EXT) && file_name.len() > NIFTI_GZ_EXT.len()
    }
}

impl Ord for SeriesFile {
    /// Numbered series first, ascending; ties and unnumbered files by name
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.series_number, other.series_number) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| self.file_name.cmp(&other.file_name))
    }
}

impl PartialOrd for SeriesFile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dimensions and voxel size read from an image header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub dims: [u64; 3],
    /// Voxel size in mm
    pub voxel_size: [f32; 3],
    /// Size of the 4th dimension (1 for 3D images)
    pub volumes: u64,
}

impl ImageInfo {
    /// `X×Y×Z`
    pub fn dimensions_label(&self) -> String {
        let [x, y, z] = self.dims;
        format!("{x}×{y}×{z}")
    }

    /// `x.xx×y.yy×z.zz`
    pub fn pixel_size_label(&self) -> String {
        let [x, y, z] = self.voxel_size;
        format!("{x:.2}×{y:.2}×{z:.2}")
    }
}
