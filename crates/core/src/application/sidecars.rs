// Sidecar files written by the converter next to each image

use std::path::{Path, PathBuf};

use crate::domain::series::nifti_stem;

/// Image path without its `.nii.gz` / `.nii` extension
pub fn image_stem(image: &Path) -> PathBuf {
    PathBuf::from(nifti_stem(&image.to_string_lossy()))
}

/// Sidecar with the given extension, e.g. `json` or `bval`
pub fn sidecar(image: &Path, extension: &str) -> PathBuf {
    let mut stem = image_stem(image).into_os_string();
    stem.push(".");
    stem.push(extension);
    PathBuf::from(stem)
}

/// b-values and b-vectors of a diffusion acquisition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientTables {
    pub bval: PathBuf,
    pub bvec: PathBuf,
}

impl GradientTables {
    pub const EXTENSIONS: [&'static str; 2] = ["bval", "bvec"];

    pub fn for_image(image: &Path) -> Self {
        let [bval, bvec] = Self::EXTENSIONS;
        Self {
            bval: sidecar(image, bval),
            bvec: sidecar(image, bvec),
        }
    }

    /// Each table with its extension, in `EXTENSIONS` order
    pub fn files(&self) -> [(&Path, &'static str); 2] {
        let [bval, bvec] = Self::EXTENSIONS;
        [(self.bval.as_path(), bval), (self.bvec.as_path(), bvec)]
    }

    /// Tables that are not present as regular files
    pub fn missing(&self) -> Vec<&Path> {
        self.files()
            .into_iter()
            .map(|(path, _)| path)
            .filter(|p| !p.is_file())
            .collect()
    }
}

pub fn has_gradient_tables(image: &Path) -> bool {
    GradientTables::for_image(image).missing().is_empty()
}
